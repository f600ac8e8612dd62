//! Insolvency practitioners pipeline.
//!
//! No list cache and no detail fan-out: the register is small, so the
//! pipeline re-paginates on every run and fetches details one at a time.

use tracing::{info, warn};

use adgmreg_core::{AppConfig, PractitionerRecord};
use adgmreg_scraper::{
    fetch_all_pages, normalize_practitioner, parse_practitioner_detail, parse_practitioner_list,
    DetailFields, RegisterClient,
};

use crate::output;

const PRACTITIONERS_DIR: &str = "practitioners";
const DETAILS_JSON: &str = "practitioners_details.json";
const DETAILS_CSV: &str = "practitioners_details.csv";

pub(crate) async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let client = RegisterClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        &config.session_cookie,
    )?;

    let entries = fetch_all_pages(
        &client,
        &config.practitioners_api_url,
        &config.practitioners_referer,
        config.page_size,
        |fragment| parse_practitioner_list(fragment, &config.base_origin),
    )
    .await;
    let total = entries.len();
    info!(total, "practitioner list pagination complete");

    let mut records: Vec<PractitionerRecord> = Vec::with_capacity(total);
    for (index, entry) in entries.iter().enumerate() {
        info!(current = index + 1, total, name = %entry.name, "fetching practitioner detail");

        let details = match entry.link.as_deref() {
            Some(url) => match client
                .fetch_detail_page(url, &config.practitioners_referer)
                .await
            {
                Ok(html) => parse_practitioner_detail(&html),
                Err(e) => {
                    warn!(url, error = %e, "detail fetch failed; keeping list fields only");
                    DetailFields::default()
                }
            },
            None => {
                warn!(name = %entry.name, "practitioner has no detail link");
                DetailFields::default()
            }
        };

        records.push(normalize_practitioner(entry, &details));
    }

    let dir = config.output_root.join(PRACTITIONERS_DIR);
    if let Err(e) = output::save_dataset(&dir, DETAILS_JSON, DETAILS_CSV, &records) {
        tracing::error!(error = %e, "failed to save practitioner details");
    }

    Ok(())
}

#[cfg(test)]
#[path = "practitioners_test.rs"]
mod tests;
