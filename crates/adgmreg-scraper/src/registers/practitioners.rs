//! Insolvency practitioners register.
//!
//! Differs from the firms register in three ways that matter here: the
//! listing carries a third fixed column (date of registration), the detail
//! table sits directly under `main` instead of nested one section deeper,
//! and the portal labels the phone row "Call". The normalizer maps that
//! label onto the `phone` output field.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use adgmreg_core::{PractitionerRecord, NOT_AVAILABLE};

use crate::parse_helpers::{detail_pairs, entry_link, information_pairs, text_of, text_of_last};
use crate::types::DetailFields;

static PRACTITIONER_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".every-accord").expect("valid selector"));
static NAME_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".opn-accord .col-md-4").expect("valid selector"));
static NUMBER_DATE_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".opn-accord .col-md-3").expect("valid selector"));
static DETAIL_REGION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("#main-container > main > section.s-table-fsp").expect("valid selector")
});

/// One row of the practitioners register listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PractitionerEntry {
    pub name: String,
    #[serde(rename = "registrationNumber")]
    pub registration_number: String,
    #[serde(rename = "dateOfRegistration")]
    pub date_of_registration: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(flatten)]
    pub info: BTreeMap<String, String>,
}

/// Parses one list page's HTML fragment into practitioner rows.
///
/// The registration number and date share a column class; the first match
/// is the number, the last the date.
#[must_use]
pub fn parse_practitioner_list(fragment: &str, base_origin: &str) -> Vec<PractitionerEntry> {
    let doc = Html::parse_fragment(fragment);
    doc.select(&PRACTITIONER_ROW)
        .map(|row| PractitionerEntry {
            name: text_of(row, &NAME_CELL),
            registration_number: text_of(row, &NUMBER_DATE_CELL),
            date_of_registration: text_of_last(row, &NUMBER_DATE_CELL),
            link: entry_link(row, base_origin),
            info: information_pairs(row),
        })
        .collect()
}

/// Scrapes the labeled rows out of a practitioner detail page.
#[must_use]
pub fn parse_practitioner_detail(html: &str) -> DetailFields {
    let doc = Html::parse_document(html);
    doc.select(&DETAIL_REGION)
        .next()
        .map(detail_pairs)
        .unwrap_or_default()
}

/// Merges a list row with its detail fields and projects the result onto
/// the fixed practitioners output shape.
///
/// Detail values win on key collision; anything missing or empty becomes
/// `"NA"`. Source keys are renamed on the way out: `call` → phone, the
/// long employer labels → the short employer fields, `link` → profile link.
#[must_use]
pub fn normalize_practitioner(
    entry: &PractitionerEntry,
    details: &DetailFields,
) -> PractitionerRecord {
    let merged = merged_fields(entry, details);
    let field = |key: &str| -> String {
        merged
            .get(key)
            .filter(|value| !value.is_empty())
            .cloned()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };

    PractitionerRecord {
        name: field("name"),
        registration_number: field("registrationNumber"),
        date_of_registration: field("dateOfRegistration"),
        email: field("email"),
        phone: field("call"),
        employer_name: field("insolvency_practitioner_employer_name"),
        employer_registration_number: field("registered_number_of_the_employer"),
        business_address: field("business_address"),
        service_address: field("service_address"),
        website_address: field("website_address"),
        profile_link: field("link"),
    }
}

/// Flat merge of the fixed list fields, the open `info` pairs, and the
/// detail fields, in increasing precedence.
fn merged_fields(entry: &PractitionerEntry, details: &DetailFields) -> BTreeMap<String, String> {
    let mut merged = BTreeMap::new();
    merged.insert("name".to_string(), entry.name.clone());
    merged.insert(
        "registrationNumber".to_string(),
        entry.registration_number.clone(),
    );
    merged.insert(
        "dateOfRegistration".to_string(),
        entry.date_of_registration.clone(),
    );
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
