// crates/spec-converter-mapper/tests/openai_stream.rs
// ============================================================================
// Module: Streaming Completion Tests
// Description: OpenAI-compatible client against a local event-stream server.
// Purpose: Verify request shape, stream accumulation, status and timeout handling.
// ============================================================================
//! ## Overview
//! Stands up a `tiny_http` server that answers one chat-completions request
//! with a canned server-sent event stream, then maps a record end to end.

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

use serde_json::Value;
use serde_json::json;
use spec_converter_mapper::CompletionClient;
use spec_converter_mapper::CompletionError;
use spec_converter_mapper::OpenAiCompletionClient;
use spec_converter_mapper::OpenAiSettings;
use spec_converter_mapper::SchemaMapper;
use spec_converter_mapper::TargetSchema;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;
use url::Url;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Captured request details.
struct Captured {
    url: String,
    authorization: Option<String>,
    body: Value,
}

/// Serves one request with `status` and `body`, reporting what it received.
fn serve_once(status: u16, body: &'static str, delay: Duration) -> (Url, mpsc::Receiver<Captured>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        if let Ok(mut request) = server.recv() {
            let mut raw = String::new();
            let _ = request.as_reader().read_to_string(&mut raw);
            let authorization = request
                .headers()
                .iter()
                .find(|header| header.field.equiv("Authorization"))
                .map(|header| header.value.to_string());
            let _ = tx.send(Captured {
                url: request.url().to_string(),
                authorization,
                body: serde_json::from_str(&raw).unwrap_or(Value::Null),
            });
            thread::sleep(delay);
            let content_type =
                Header::from_bytes(&b"Content-Type"[..], &b"text/event-stream"[..]).unwrap();
            let response =
                Response::from_string(body).with_status_code(status).with_header(content_type);
            let _ = request.respond(response);
        }
    });
    (Url::parse(&format!("http://{addr}/v1")).unwrap(), rx)
}

fn settings(base_url: Url, timeout: Duration) -> OpenAiSettings {
    OpenAiSettings {
        base_url,
        model: "meta/llama-3.3-70b-instruct".to_string(),
        temperature: 0.1,
        top_p: 0.7,
        max_tokens: 1024,
        timeout,
        api_key: Some("test-key".to_string()),
    }
}

const STREAM: &str = "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\",\"content\":\"\"}}]}\n\n\
data: {\"choices\":[{\"delta\":{\"content\":\"```json\\n{\\\"azimuth\\\": 120,\"}}]}\n\n\
data: {\"choices\":[{\"delta\":{\"content\":\" \\\"band5G\\\": [\\\"n78\\\"]}\\n```\"}}]}\n\n\
data: [DONE]\n\n";

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn streamed_reply_is_mapped() -> Result<(), Box<dyn std::error::Error>> {
    let (base, captured) = serve_once(200, STREAM, Duration::ZERO);
    let client = OpenAiCompletionClient::new(settings(base, Duration::from_secs(5)))?;
    let schema = TargetSchema::from_value(json!({
        "type": "object",
        "properties": {"azimuth": {"type": "integer"}, "band5G": {"type": "array"}}
    }))?;
    let mapper = SchemaMapper::new(client, schema);

    let mapped = mapper.map_record(&json!({"antenna Azimuth": "120", "Band 5G": "n78"}))?;
    assert_eq!(Value::Object(mapped), json!({"azimuth": 120, "band5G": ["n78"]}));

    let request = captured.recv_timeout(Duration::from_secs(5))?;
    assert_eq!(request.url, "/v1/chat/completions");
    assert_eq!(request.authorization.as_deref(), Some("Bearer test-key"));
    assert_eq!(request.body["stream"], json!(true));
    assert_eq!(request.body["model"], json!("meta/llama-3.3-70b-instruct"));
    assert_eq!(request.body["max_tokens"], json!(1024));
    assert_eq!(request.body["messages"][0]["role"], json!("user"));
    Ok(())
}

#[test]
fn error_status_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let (base, _captured) = serve_once(429, "rate limited", Duration::ZERO);
    let client = OpenAiCompletionClient::new(settings(base, Duration::from_secs(5)))?;
    let err = client.complete("hello").unwrap_err();
    match err {
        CompletionError::Status { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[test]
fn slow_service_times_out() -> Result<(), Box<dyn std::error::Error>> {
    let (base, _captured) = serve_once(200, STREAM, Duration::from_millis(1500));
    let client = OpenAiCompletionClient::new(settings(base, Duration::from_millis(200)))?;
    let err = client.complete("hello").unwrap_err();
    assert!(matches!(err, CompletionError::Timeout), "unexpected error: {err}");
    Ok(())
}
