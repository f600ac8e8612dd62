//! Financial-services (FSRA firms) pipeline.
//!
//! Runs in two phases. The list phase is resumable: a raw-list cache file
//! on disk short-circuits pagination entirely. The detail phase fans out
//! over the rows with a bounded number of in-flight requests; results are
//! collected in row order so each record stays positionally associated
//! with its originating entry.

use anyhow::Context;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use adgmreg_core::{AppConfig, FirmRecord};
use adgmreg_scraper::{
    fetch_all_pages, normalize_firm, parse_firm_detail, parse_firm_list, DetailFields, FirmEntry,
    RegisterClient,
};

use crate::output;

const FIRMS_DIR: &str = "companies";
const LIST_FILE: &str = "companies_list.json";
const DETAILS_JSON: &str = "company_details.json";
const DETAILS_CSV: &str = "company_details.csv";

pub(crate) async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let client = RegisterClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        &config.session_cookie,
    )?;

    let entries = load_or_fetch_list(&client, config).await?;
    let total = entries.len();
    info!(total, "harvesting firm details");

    let records: Vec<FirmRecord> = stream::iter(entries.iter().enumerate())
        .map(|(index, entry)| {
            let client = &client;
            async move {
                info!(current = index + 1, total, name = %entry.name, "fetching firm detail");
                let details = fetch_details(client, config, entry).await;
                normalize_firm(entry, &details)
            }
        })
        .buffered(config.detail_concurrency.max(1))
        .collect()
        .await;

    let dir = config.output_root.join(FIRMS_DIR);
    if let Err(e) = output::save_dataset(&dir, DETAILS_JSON, DETAILS_CSV, &records) {
        tracing::error!(error = %e, "failed to save firm details");
    }

    Ok(())
}

/// Loads the raw-list cache when present; otherwise paginates the register
/// and persists the raw list before detail harvesting begins.
async fn load_or_fetch_list(
    client: &RegisterClient,
    config: &AppConfig,
) -> anyhow::Result<Vec<FirmEntry>> {
    let dir = config.output_root.join(FIRMS_DIR);
    let cache_path = dir.join(LIST_FILE);

    if cache_path.exists() {
        info!(path = %cache_path.display(), "firm list cache found; skipping list fetch");
        let content = std::fs::read_to_string(&cache_path)
            .with_context(|| format!("failed to read {}", cache_path.display()))?;
        let entries: Vec<FirmEntry> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", cache_path.display()))?;
        info!(total = entries.len(), "loaded cached firm list");
        return Ok(entries);
    }

    info!("no firm list cache; paginating the register");
    let entries = fetch_all_pages(
        client,
        &config.firms_api_url,
        &config.firms_referer,
        config.page_size,
        |fragment| parse_firm_list(fragment, &config.base_origin),
    )
    .await;
    info!(total = entries.len(), "firm list pagination complete");

    output::ensure_dir(&dir)?;
    output::write_json(&cache_path, &entries)?;
    info!(path = %cache_path.display(), "raw firm list saved");

    Ok(entries)
}

/// Detail harvesting degrades per entity: a missing link or a failed fetch
/// keeps the list row, just without detail augmentation.
async fn fetch_details(
    client: &RegisterClient,
    config: &AppConfig,
    entry: &FirmEntry,
) -> DetailFields {
    let Some(url) = entry.link.as_deref() else {
        warn!(name = %entry.name, "firm has no detail link");
        return DetailFields::default();
    };

    match client.fetch_detail_page(url, &config.firms_referer).await {
        Ok(html) => parse_firm_detail(&html),
        Err(e) => {
            warn!(url, error = %e, "detail fetch failed; keeping list fields only");
            DetailFields::default()
        }
    }
}

#[cfg(test)]
#[path = "firms_test.rs"]
mod tests;
