use std::path::PathBuf;

/// Runtime configuration for the register harvester.
///
/// Every knob is env-overridable and defaulted (see `config.rs`), so the
/// binary runs with zero configuration against the live portal while tests
/// point the same pipelines at a local fixture server.
#[derive(Clone)]
pub struct AppConfig {
    /// Firms list endpoint with its fixed filter/ordering query parameters;
    /// `pageNumber`/`pageSize` are appended per request.
    pub firms_api_url: String,
    pub firms_referer: String,
    /// Practitioners list endpoint, same convention as `firms_api_url`.
    pub practitioners_api_url: String,
    pub practitioners_referer: String,
    /// Origin prepended to the relative detail-page hrefs found in list rows.
    pub base_origin: String,
    /// Cookie header value forwarded verbatim on every request.
    pub session_cookie: String,
    /// Rows requested per list page; a shorter page ends pagination.
    pub page_size: usize,
    /// In-flight detail requests for the firms pipeline.
    pub detail_concurrency: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Directory under which `companies/` and `practitioners/` are written.
    pub output_root: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("firms_api_url", &self.firms_api_url)
            .field("firms_referer", &self.firms_referer)
            .field("practitioners_api_url", &self.practitioners_api_url)
            .field("practitioners_referer", &self.practitioners_referer)
            .field("base_origin", &self.base_origin)
            .field("session_cookie", &"[redacted]")
            .field("page_size", &self.page_size)
            .field("detail_concurrency", &self.detail_concurrency)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("output_root", &self.output_root)
            .finish()
    }
}
