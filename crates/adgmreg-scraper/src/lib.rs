pub mod client;
pub mod error;
pub mod pagination;
mod parse_helpers;
pub mod registers;
pub mod types;

pub use client::RegisterClient;
pub use error::ScraperError;
pub use pagination::fetch_all_pages;
pub use registers::firms::{normalize_firm, parse_firm_detail, parse_firm_list, FirmEntry};
pub use registers::practitioners::{
    normalize_practitioner, parse_practitioner_detail, parse_practitioner_list, PractitionerEntry,
};
pub use types::{DetailFields, ListResponse};
