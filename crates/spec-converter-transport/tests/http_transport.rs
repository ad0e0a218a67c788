// crates/spec-converter-transport/tests/http_transport.rs
// ============================================================================
// Module: HTTP Report Transport Tests
// Description: Submission and retrieval against a local HTTP server.
// Purpose: Verify request paths, methods, auth, and fail-closed handling.
// ============================================================================
//! ## Overview
//! Each test serves exactly one request from a `tiny_http` server and checks
//! what the transport sent and how it treated the reply.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::io::Read;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use spec_converter_core::Entity;
use spec_converter_core::TestId;
use spec_converter_core::TestResultsSummary;
use spec_converter_transport::HttpReportTransport;
use spec_converter_transport::HttpTransportSettings;
use spec_converter_transport::ReportTransport;
use spec_converter_transport::TransportError;
use tiny_http::Response;
use tiny_http::Server;
use url::Url;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const REPORT: &str = include_str!("../../spec-converter-core/tests/fixtures/minimal_report.json");

/// Request as seen by the server.
struct Seen {
    method: String,
    url: String,
    authorization: Option<String>,
    body: String,
}

fn serve_once(status: u16, reply: String) -> (Url, mpsc::Receiver<Seen>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        if let Ok(mut request) = server.recv() {
            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);
            let authorization = request
                .headers()
                .iter()
                .find(|header| header.field.equiv("Authorization"))
                .map(|header| header.value.to_string());
            let _ = tx.send(Seen {
                method: request.method().to_string(),
                url: request.url().to_string(),
                authorization,
                body,
            });
            let _ = request.respond(Response::from_string(reply).with_status_code(status));
        }
    });
    (Url::parse(&format!("http://{addr}")).unwrap(), rx)
}

fn transport(base_url: Url, username: Option<&str>) -> HttpReportTransport {
    HttpReportTransport::new(HttpTransportSettings {
        base_url,
        path_prefix: "/ProvMnS/v1alpha1/SubNetwork".to_string(),
        timeout: Duration::from_secs(5),
        username: username.map(ToString::to_string),
        password: username.map(|_| "secret".to_string()),
    })
    .unwrap()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn submit_puts_document_under_test_id() -> Result<(), Box<dyn std::error::Error>> {
    let report = TestResultsSummary::from_json_str(REPORT)?;
    let (base, seen) = serve_once(200, String::new());
    transport(base, None).submit(&report)?;

    let request = seen.recv_timeout(Duration::from_secs(5))?;
    assert_eq!(request.method, "PUT");
    assert_eq!(request.url, "/ProvMnS/v1alpha1/SubNetwork/ORAN240001");
    assert_eq!(request.authorization, None);
    assert_eq!(TestResultsSummary::from_json_str(&request.body)?, report);
    Ok(())
}

#[test]
fn fetch_uses_basic_auth_and_validates() -> Result<(), Box<dyn std::error::Error>> {
    let (base, seen) = serve_once(200, REPORT.to_string());
    let test_id = TestId::parse("ORAN240001").unwrap();
    let report = transport(base, Some("admin")).fetch(&test_id)?;
    assert_eq!(report.test_id(), &test_id);

    let request = seen.recv_timeout(Duration::from_secs(5))?;
    assert_eq!(request.method, "GET");
    assert_eq!(request.authorization.as_deref(), Some("Basic YWRtaW46c2VjcmV0"));
    Ok(())
}

#[test]
fn fetched_invalid_documents_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let broken = REPORT.replace("\"result\": \"PASS\",\n    \"testType\"", "\"result\": \"SKIP\",\n    \"testType\"");
    assert_ne!(broken, REPORT);
    let (base, _seen) = serve_once(200, broken);
    let test_id = TestId::parse("ORAN240001").unwrap();
    let err = transport(base, None).fetch(&test_id).unwrap_err();
    assert!(matches!(err, TransportError::Report(_)), "unexpected error: {err}");
    Ok(())
}

#[test]
fn error_statuses_fail_closed() -> Result<(), Box<dyn std::error::Error>> {
    let report = TestResultsSummary::from_json_str(REPORT)?;
    let (base, _seen) = serve_once(409, "conflict".to_string());
    let err = transport(base, None).submit(&report).unwrap_err();
    match err {
        TransportError::Status { status, body } => {
            assert_eq!(status, 409);
            assert_eq!(body, "conflict");
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[test]
fn document_url_joins_prefix() {
    let base = Url::parse("http://localhost:8000/").unwrap();
    let test_id = TestId::parse("ORAN240001").unwrap();
    let url = transport(base, None).document_url(&test_id).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8000/ProvMnS/v1alpha1/SubNetwork/ORAN240001");
}
