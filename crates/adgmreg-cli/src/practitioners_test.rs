use std::fs;
use std::path::Path;

use serde_json::json;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use adgmreg_core::{AppConfig, CsvRecord, PractitionerRecord};

use super::run;

fn test_config(server_uri: &str, output_root: &Path) -> AppConfig {
    AppConfig {
        firms_api_url: format!("{server_uri}/api/fsf/GetFirms"),
        firms_referer: format!("{server_uri}/public-registers/fsra"),
        practitioners_api_url: format!("{server_uri}/api/GetInsolvencyPractitioners"),
        practitioners_referer: format!("{server_uri}/register-of-insolvency-practitioners"),
        base_origin: server_uri.to_string(),
        session_cookie: "adgm#sc_mode=normal".to_string(),
        page_size: 10,
        detail_concurrency: 5,
        request_timeout_secs: 5,
        user_agent: "adgmreg-test/0.1".to_string(),
        output_root: output_root.to_path_buf(),
    }
}

/// Builds a list fragment with `count` practitioner rows numbered from 1.
fn practitioner_fragment(count: usize) -> String {
    (1..=count)
        .map(|n| {
            format!(
                concat!(
                    r#"<div class="every-accord">"#,
                    r#"<div class="opn-accord">"#,
                    r#"<div class="col-md-4">Practitioner {n}</div>"#,
                    r#"<div class="col-md-3">IP{n:03}</div>"#,
                    r#"<div class="col-md-3">0{n} Jan 2021</div>"#,
                    r#"</div>"#,
                    r#"<div class="click"><a href="/ip/{n}">View</a></div>"#,
                    r#"</div>"#,
                ),
                n = n
            )
        })
        .collect()
}

fn envelope(fragment: &str) -> serde_json::Value {
    json!({ "tableResult": fragment })
}

fn detail_page() -> &'static str {
    r#"<html><body><div id="main-container"><main>
        <section class="s-table-fsp">
            <div class="col-sm-12"><div class="col-sm-6">Call</div><div class="col-sm-6">+971 2 1111111</div></div>
            <div class="col-sm-12"><div class="col-sm-6">Email</div><div class="col-sm-6"><a href="mailto:ip@example.com">email</a></div></div>
            <div class="col-sm-12"><div class="col-sm-6">Insolvency Practitioner Employer Name</div><div class="col-sm-6">Restructuring LLP</div></div>
        </section>
    </main></div></body></html>"#
}

#[tokio::test]
async fn single_short_page_run_writes_both_artifacts() {
    let server = MockServer::start().await;
    let workdir = tempfile::tempdir().expect("tempdir");

    Mock::given(method("GET"))
        .and(path("/api/GetInsolvencyPractitioners"))
        .and(query_param("pageNumber", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(&practitioner_fragment(3))),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/ip/\d+$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_page()))
        .expect(3)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), workdir.path());
    run(&config).await.expect("practitioners run");

    let content = fs::read_to_string(
        workdir
            .path()
            .join("practitioners/practitioners_details.json"),
    )
    .expect("practitioners_details.json must exist");
    let records: Vec<PractitionerRecord> =
        serde_json::from_str(&content).expect("valid records json");

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].name, "Practitioner 1");
    assert_eq!(records[0].registration_number, "IP001");
    assert_eq!(records[0].date_of_registration, "01 Jan 2021");
    assert_eq!(records[0].phone, "+971 2 1111111");
    assert_eq!(records[0].email, "ip@example.com");
    assert_eq!(records[0].employer_name, "Restructuring LLP");
    assert_eq!(
        records[0].profile_link,
        format!("{}/ip/1", server.uri())
    );
    assert_eq!(records[0].service_address, "NA");

    // The output JSON keeps the camelCase key spelling of the dataset.
    let value: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert!(value[0].get("registrationNumber").is_some());
    assert!(value[0].get("profileLink").is_some());

    let csv = fs::read_to_string(
        workdir
            .path()
            .join("practitioners/practitioners_details.csv"),
    )
    .expect("practitioners_details.csv must exist");
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some(PractitionerRecord::HEADER.join(",").as_str()),
        "CSV header must match the fixed column order"
    );
    assert_eq!(lines.count(), 3);

    // This pipeline never writes a list cache.
    assert!(!workdir
        .path()
        .join("practitioners/practitioners_list.json")
        .exists());
}

#[tokio::test]
async fn list_failure_on_first_page_still_writes_empty_artifacts() {
    let server = MockServer::start().await;
    let workdir = tempfile::tempdir().expect("tempdir");

    Mock::given(method("GET"))
        .and(path("/api/GetInsolvencyPractitioners"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), workdir.path());
    run(&config).await.expect("practitioners run");

    let content = fs::read_to_string(
        workdir
            .path()
            .join("practitioners/practitioners_details.json"),
    )
    .expect("practitioners_details.json must exist");
    let records: Vec<PractitionerRecord> =
        serde_json::from_str(&content).expect("valid records json");
    assert!(records.is_empty(), "no rows were harvested");
}
