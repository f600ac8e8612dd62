//! Integration tests for `RegisterClient` and the pagination loop.
//!
//! Uses `wiremock` to stand up a local portal for each test so no real
//! network traffic is made. The fixture fragments reproduce the accordion
//! markup of the firms register.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use adgmreg_scraper::{parse_firm_list, RegisterClient, ScraperError};

const PAGE_SIZE: usize = 10;

fn test_client() -> RegisterClient {
    RegisterClient::new(5, "adgmreg-test/0.1", "adgm#sc_mode=normal")
        .expect("failed to build test RegisterClient")
}

/// Builds a list fragment with `count` accordion rows numbered from `start`.
fn firm_fragment(start: usize, count: usize) -> String {
    let rows: String = (start..start + count)
        .map(|n| {
            format!(
                concat!(
                    r#"<div class="every-accord">"#,
                    r#"<div class="col-md-4 col-lg-5">Firm {n}</div>"#,
                    r#"<div class="col-md-3 col-lg-2">19{n:04}</div>"#,
                    r#"<div class="click"><a href="/firm/{n}">View</a></div>"#,
                    r#"</div>"#,
                ),
                n = n
            )
        })
        .collect();
    format!(r#"<div class="fsp-second-table">{rows}</div>"#)
}

fn envelope(fragment: &str) -> serde_json::Value {
    json!({ "tableResult": fragment })
}

async fn fetch_firms(client: &RegisterClient, server: &MockServer) -> Vec<adgmreg_scraper::FirmEntry> {
    let api_url = format!("{}/api/fsf/GetFirms", server.uri());
    let referer = format!("{}/public-registers/fsra", server.uri());
    let base_origin = server.uri();
    adgmreg_scraper::fetch_all_pages(client, &api_url, &referer, PAGE_SIZE, |fragment| {
        parse_firm_list(fragment, &base_origin)
    })
    .await
}

// ---------------------------------------------------------------------------
// Single list page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_list_fragment_returns_embedded_html() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/fsf/GetFirms"))
        .and(query_param("pageNumber", "1"))
        .and(query_param("pageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope("<div>rows</div>")))
        .mount(&server)
        .await;

    let client = test_client();
    let api_url = format!("{}/api/fsf/GetFirms", server.uri());
    let fragment = client
        .fetch_list_fragment(&api_url, &server.uri(), 1, 10)
        .await
        .expect("fragment");
    assert_eq!(fragment, "<div>rows</div>");
}

#[tokio::test]
async fn fetch_list_fragment_rejects_non_2xx() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/fsf/GetFirms"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client();
    let api_url = format!("{}/api/fsf/GetFirms", server.uri());
    let err = client
        .fetch_list_fragment(&api_url, &server.uri(), 1, 10)
        .await
        .expect_err("expected status error");
    assert!(
        matches!(err, ScraperError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus(503), got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_list_fragment_rejects_malformed_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/fsf/GetFirms"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = test_client();
    let api_url = format!("{}/api/fsf/GetFirms", server.uri());
    let err = client
        .fetch_list_fragment(&api_url, &server.uri(), 1, 10)
        .await
        .expect_err("expected deserialize error");
    assert!(
        matches!(err, ScraperError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pagination_accumulates_until_short_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/fsf/GetFirms"))
        .and(query_param("pageNumber", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&firm_fragment(1, 10))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/fsf/GetFirms"))
        .and(query_param("pageNumber", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&firm_fragment(11, 7))))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client();
    let entries = fetch_firms(&client, &server).await;

    assert_eq!(entries.len(), 17, "expected 10 + 7 rows across 2 pages");
    assert_eq!(entries[0].name, "Firm 1");
    assert_eq!(entries[16].name, "Firm 17");
    // Mock expectations verify exactly two list requests were issued.
}

#[tokio::test]
async fn exact_multiple_total_costs_one_extra_empty_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/fsf/GetFirms"))
        .and(query_param("pageNumber", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&firm_fragment(1, 10))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/fsf/GetFirms"))
        .and(query_param("pageNumber", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&firm_fragment(1, 0))))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client();
    let entries = fetch_firms(&client, &server).await;

    assert_eq!(entries.len(), 10, "zero-row page terminates the loop");
}

#[tokio::test]
async fn page_failure_keeps_rows_collected_so_far() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/fsf/GetFirms"))
        .and(query_param("pageNumber", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&firm_fragment(1, 10))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/fsf/GetFirms"))
        .and(query_param("pageNumber", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client();
    let entries = fetch_firms(&client, &server).await;

    assert_eq!(entries.len(), 10, "partial results survive a page failure");
}

// ---------------------------------------------------------------------------
// Detail pages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_detail_page_returns_raw_html() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/firm/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>firm</body></html>"))
        .mount(&server)
        .await;

    let client = test_client();
    let url = format!("{}/firm/1", server.uri());
    let html = client
        .fetch_detail_page(&url, &server.uri())
        .await
        .expect("detail html");
    assert!(html.contains("firm"));
}

#[tokio::test]
async fn fetch_detail_page_rejects_non_2xx() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/firm/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client();
    let url = format!("{}/firm/404", server.uri());
    let err = client
        .fetch_detail_page(&url, &server.uri())
        .await
        .expect_err("expected status error");
    assert!(
        matches!(err, ScraperError::UnexpectedStatus { status: 404, .. }),
        "expected UnexpectedStatus(404), got: {err:?}"
    );
}
