//! Wire and field-map types shared across the register pipelines.
//!
//! ## Observed list-endpoint shape
//!
//! Both registers answer with a small JSON envelope rather than a data
//! payload: the portal renders one page of accordion rows server-side and
//! ships the resulting HTML fragment in `tableResult`. Pagination state
//! lives entirely in the `pageNumber`/`pageSize` request parameters; the
//! envelope carries no row count or next-page marker, which is why the
//! pipelines rely on the short-page heuristic to stop.

use std::collections::BTreeMap;

use serde::Deserialize;

/// JSON envelope returned by the register list endpoints.
#[derive(Debug, Deserialize)]
pub struct ListResponse {
    /// Server-rendered HTML fragment holding one page of accordion rows.
    #[serde(rename = "tableResult")]
    pub table_result: String,
}

/// Normalized-label → text pairs scraped from one detail page.
///
/// Labels are lowercased with whitespace runs collapsed to `_`. Rows with
/// an empty label or an empty value are never inserted.
pub type DetailFields = BTreeMap<String, String>;
