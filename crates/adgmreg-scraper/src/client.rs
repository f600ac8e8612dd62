use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;
use crate::types::ListResponse;

/// HTTP client for the register list endpoints and firm/practitioner
/// detail pages.
///
/// The portal only answers list XHR calls that look like they came from the
/// register page itself, so every request carries a browser header profile,
/// a per-register `Referer`, and the configured session cookie forwarded
/// verbatim. Non-2xx responses become typed errors; the caller decides
/// whether a failure aborts pagination or degrades a single entity.
pub struct RegisterClient {
    client: Client,
    session_cookie: String,
}

impl RegisterClient {
    /// Creates a `RegisterClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        session_cookie: &str,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            session_cookie: session_cookie.to_owned(),
        })
    }

    /// Fetches one list page and returns the HTML fragment from the JSON
    /// envelope.
    ///
    /// `api_url` is the endpoint with its fixed filter/ordering parameters;
    /// `pageNumber` and `pageSize` are appended here. Errors propagate so the
    /// pagination loop can decide to stop.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] — any non-2xx status.
    /// - [`ScraperError::Http`] — network or TLS failure.
    /// - [`ScraperError::Deserialize`] — body is not the expected envelope.
    pub async fn fetch_list_fragment(
        &self,
        api_url: &str,
        referer: &str,
        page: usize,
        page_size: usize,
    ) -> Result<String, ScraperError> {
        let url = Self::list_url(api_url, page, page_size);
        let response = self.get(&url, referer).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let envelope =
            serde_json::from_str::<ListResponse>(&body).map_err(|e| ScraperError::Deserialize {
                context: format!("list page {page} from {api_url}"),
                source: e,
            })?;

        Ok(envelope.table_result)
    }

    /// Fetches a detail page and returns the raw HTML body.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] — any non-2xx status.
    /// - [`ScraperError::Http`] — network or TLS failure.
    pub async fn fetch_detail_page(
        &self,
        url: &str,
        referer: &str,
    ) -> Result<String, ScraperError> {
        let response = self.get(url, referer).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }

    /// Starts a GET with the browser-profile headers the portal expects on
    /// XHR traffic.
    fn get(&self, url: &str, referer: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header(reqwest::header::ACCEPT, "*/*")
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::REFERER, referer)
            .header(reqwest::header::COOKIE, &self.session_cookie)
            .header("x-requested-with", "XMLHttpRequest")
    }

    /// Appends `pageNumber`/`pageSize` to the configured endpoint URL.
    fn list_url(api_url: &str, page: usize, page_size: usize) -> String {
        let separator = if api_url.contains('?') { '&' } else { '?' };
        format!("{api_url}{separator}pageNumber={page}&pageSize={page_size}")
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
