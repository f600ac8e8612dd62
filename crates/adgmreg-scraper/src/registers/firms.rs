//! Financial-services (FSRA) firms register.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use adgmreg_core::{FirmRecord, NOT_AVAILABLE};

use crate::parse_helpers::{detail_pairs, entry_link, information_pairs, text_of};
use crate::types::DetailFields;

static FIRM_ROW: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".fsp-second-table .every-accord").expect("valid selector")
});
static NAME_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".col-md-4.col-lg-5").expect("valid selector"));
static PERMISSION_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".col-md-3.col-lg-2").expect("valid selector"));
static DETAIL_REGION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("#main-container > main > section:nth-child(9) > section.fsp-first-table")
        .expect("valid selector")
});

/// One row of the firms register listing.
///
/// `info` holds whatever labeled pairs the accordion body renders for this
/// firm; the set varies per entity. The serde layout (renamed fixed fields
/// plus a flattened map) reproduces the flat JSON shape of the raw list
/// cache, so a cache written by an earlier run loads back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmEntry {
    pub name: String,
    #[serde(rename = "permissionNumber")]
    pub permission_number: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(flatten)]
    pub info: BTreeMap<String, String>,
}

/// Parses one list page's HTML fragment into firm rows.
///
/// Selection is purely structural; a missing cell yields an empty string,
/// never an error, and an unrecognized fragment yields no rows.
#[must_use]
pub fn parse_firm_list(fragment: &str, base_origin: &str) -> Vec<FirmEntry> {
    let doc = Html::parse_fragment(fragment);
    doc.select(&FIRM_ROW)
        .map(|row| FirmEntry {
            name: text_of(row, &NAME_CELL),
            permission_number: text_of(row, &PERMISSION_CELL),
            link: entry_link(row, base_origin),
            info: information_pairs(row),
        })
        .collect()
}

/// Scrapes the labeled rows out of a firm detail page.
///
/// Extraction is scoped to the first permissions table of the page body;
/// a page without that region yields an empty map.
#[must_use]
pub fn parse_firm_detail(html: &str) -> DetailFields {
    let doc = Html::parse_document(html);
    doc.select(&DETAIL_REGION)
        .next()
        .map(detail_pairs)
        .unwrap_or_default()
}

/// Merges a list row with its detail fields and projects the result onto
/// the fixed firms output shape.
///
/// Detail values win over list values on key collision. Any projected key
/// that is missing or empty after the merge becomes `"NA"`; keys outside
/// the projection are dropped here.
#[must_use]
pub fn normalize_firm(entry: &FirmEntry, details: &DetailFields) -> FirmRecord {
    let merged = merged_fields(entry, details);
    let field = |key: &str| -> String {
        merged
            .get(key)
            .filter(|value| !value.is_empty())
            .cloned()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };

    FirmRecord {
        name: field("name"),
        permission_number: field("permissionNumber"),
        link: field("link"),
        financial_services_permission_number: field("financial_services_permission_number"),
        company_status: field("company_status"),
        address: field("address"),
        date_of_financial_services_permission: field("date_of_financial_services_permission"),
        legal_status: field("legal_status"),
        phone: field("phone"),
        email: field("email"),
    }
}

/// Flat merge of the fixed list fields, the open `info` pairs, and the
/// detail fields, in increasing precedence.
fn merged_fields(entry: &FirmEntry, details: &DetailFields) -> BTreeMap<String, String> {
    let mut merged = BTreeMap::new();
    merged.insert("name".to_string(), entry.name.clone());
    merged.insert("permissionNumber".to_string(), entry.permission_number.clone());
    if let Some(link) = &entry.link {
        merged.insert("link".to_string(), link.clone());
    }
    for (key, value) in &entry.info {
        merged.insert(key.clone(), value.clone());
    }
    for (key, value) in details {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
