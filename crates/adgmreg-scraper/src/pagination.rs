//! Sequential page loop shared by both register pipelines.

use tracing::{error, info};

use crate::client::RegisterClient;

/// Fetches list pages starting at 1 until a short page signals the end of
/// the data.
///
/// Each page's fragment is run through `parse` and the rows accumulate in
/// request order. A page yielding strictly fewer rows than `page_size` ends
/// the loop, so a register whose total is an exact multiple of the page size
/// costs one extra request that comes back with zero rows.
///
/// A fetch failure does not fail the harvest: the error is logged, the loop
/// stops, and the rows collected so far are returned.
pub async fn fetch_all_pages<T, P>(
    client: &RegisterClient,
    api_url: &str,
    referer: &str,
    page_size: usize,
    parse: P,
) -> Vec<T>
where
    P: Fn(&str) -> Vec<T>,
{
    let mut entries: Vec<T> = Vec::new();
    let mut page: usize = 1;

    loop {
        let fragment = match client
            .fetch_list_fragment(api_url, referer, page, page_size)
            .await
        {
            Ok(fragment) => fragment,
            Err(e) => {
                error!(page, error = %e, "list page fetch failed; keeping rows collected so far");
                break;
            }
        };

        let rows = parse(&fragment);
        let count = rows.len();
        entries.extend(rows);
        info!(page, count, total = entries.len(), "fetched register page");

        if count < page_size {
            break;
        }
        page += 1;
    }

    entries
}
