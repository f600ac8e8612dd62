//! Fixed-shape output records for both registers.
//!
//! These are the only shapes that reach the JSON/CSV artifacts. The
//! normalizers in `adgmreg-scraper` project the open-ended merged field
//! maps onto them, substituting [`NOT_AVAILABLE`] for anything missing.
//! Serde renames reproduce the key spelling of the portal datasets
//! (`permissionNumber` next to `company_status` is inherited, not a typo).

use serde::{Deserialize, Serialize};

/// Literal written for any projected field with no usable value.
pub const NOT_AVAILABLE: &str = "NA";

/// A record that can be written as one fixed-column CSV row.
pub trait CsvRecord {
    /// Column headers, in output order.
    const HEADER: &'static [&'static str];

    /// Field values in the same order as [`Self::HEADER`].
    fn csv_fields(&self) -> Vec<&str>;
}

/// Normalized output row of the financial-services (FSRA firms) register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmRecord {
    pub name: String,
    #[serde(rename = "permissionNumber")]
    pub permission_number: String,
    pub link: String,
    pub financial_services_permission_number: String,
    pub company_status: String,
    pub address: String,
    pub date_of_financial_services_permission: String,
    pub legal_status: String,
    pub phone: String,
    pub email: String,
}

impl CsvRecord for FirmRecord {
    const HEADER: &'static [&'static str] = &[
        "Name",
        "Permission Number",
        "Link",
        "Financial Services Permission Number",
        "Company Status",
        "Address",
        "Date of Financial Services Permission",
        "Legal Status",
        "Phone",
        "Email",
    ];

    fn csv_fields(&self) -> Vec<&str> {
        vec![
            &self.name,
            &self.permission_number,
            &self.link,
            &self.financial_services_permission_number,
            &self.company_status,
            &self.address,
            &self.date_of_financial_services_permission,
            &self.legal_status,
            &self.phone,
            &self.email,
        ]
    }
}

/// Normalized output row of the insolvency practitioners register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PractitionerRecord {
    pub name: String,
    pub registration_number: String,
    pub date_of_registration: String,
    pub email: String,
    pub phone: String,
    pub employer_name: String,
    pub employer_registration_number: String,
    pub business_address: String,
    pub service_address: String,
    pub website_address: String,
    pub profile_link: String,
}

impl CsvRecord for PractitionerRecord {
    const HEADER: &'static [&'static str] = &[
        "Name",
        "Registration Number",
        "Date of Registration",
        "Email",
        "Phone",
        "Employer Name",
        "Employer Registration Number",
        "Business Address",
        "Service Address",
        "Website Address",
        "Profile Link",
    ];

    fn csv_fields(&self) -> Vec<&str> {
        vec![
            &self.name,
            &self.registration_number,
            &self.date_of_registration,
            &self.email,
            &self.phone,
            &self.employer_name,
            &self.employer_registration_number,
            &self.business_address,
            &self.service_address,
            &self.website_address,
            &self.profile_link,
        ]
    }
}
