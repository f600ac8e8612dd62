//! Low-level extraction helpers shared by the register parsers.
//!
//! Everything here is structural: selection goes by the portal's grid
//! classes, and an element that is not where the markup usually puts it
//! produces an empty string rather than an error.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::types::DetailFields;

static INFORMATION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".information").expect("valid selector"));
static LABEL_VALUE_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".col-sm-6").expect("valid selector"));
static DETAIL_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".col-sm-12").expect("valid selector"));
static CLICK_ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".click a").expect("valid selector"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").expect("valid selector"));

/// Joined, trimmed text of an element and its descendants.
pub(crate) fn collect_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text of the first descendant matching `selector`, or `""` when absent.
pub(crate) fn text_of(scope: ElementRef<'_>, selector: &Selector) -> String {
    scope.select(selector).next().map(collect_text).unwrap_or_default()
}

/// Text of the last descendant matching `selector`, or `""` when absent.
pub(crate) fn text_of_last(scope: ElementRef<'_>, selector: &Selector) -> String {
    scope.select(selector).last().map(collect_text).unwrap_or_default()
}

/// Lowercases a label and collapses each whitespace run into one underscore.
pub(crate) fn normalize_label(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Resolves an entry's detail link: the first anchor under `.click`,
/// prefixed with the portal origin. `None` when the entry has no anchor.
pub(crate) fn entry_link(entry: ElementRef<'_>, base_origin: &str) -> Option<String> {
    entry
        .select(&CLICK_ANCHOR)
        .next()
        .and_then(|anchor| anchor.attr("href"))
        .map(|href| format!("{base_origin}{href}"))
}

/// Extracts the open-ended label/value pairs from the `.information` blocks
/// nested under a list entry. The first `.col-sm-6` in a block is the label,
/// the last is the value; a block with a single cell uses it for both.
pub(crate) fn information_pairs(entry: ElementRef<'_>) -> BTreeMap<String, String> {
    let mut pairs = BTreeMap::new();
    for block in entry.select(&INFORMATION) {
        let key = normalize_label(&text_of(block, &LABEL_VALUE_CELL));
        let value = text_of_last(block, &LABEL_VALUE_CELL);
        pairs.insert(key, value);
    }
    pairs
}

/// Extracts the labeled rows of a detail-page region into a field map.
///
/// Each `.col-sm-12` row contributes one normalized-label → text pair. For
/// the `email` and `phone` labels an anchor inside the value cell wins over
/// the cell text: the `mailto:` payload of its `href` for email, its visible
/// text for phone. Rows with an empty key or empty value are dropped.
pub(crate) fn detail_pairs(region: ElementRef<'_>) -> DetailFields {
    let mut fields = DetailFields::new();

    for row in region.select(&DETAIL_ROW) {
        let cells: Vec<ElementRef<'_>> = row.select(&LABEL_VALUE_CELL).collect();
        let key = cells
            .first()
            .map(|cell| normalize_label(&collect_text(*cell)))
            .unwrap_or_default();
        let value_cell = cells.last().copied();
        let mut value = value_cell.map(collect_text).unwrap_or_default();

        if key == "email" || key == "phone" {
            if let Some(anchor) = value_cell.and_then(|cell| cell.select(&ANCHOR).next()) {
                value = if key == "email" {
                    anchor
                        .attr("href")
                        .map(|href| href.strip_prefix("mailto:").unwrap_or(href).to_string())
                        .unwrap_or_default()
                } else {
                    collect_text(anchor)
                };
            }
        }

        if !key.is_empty() && !value.is_empty() {
            fields.insert(key, value);
        }
    }

    fields
}
