// crates/spec-converter-mapper/src/openai.rs
// ============================================================================
// Module: OpenAI-Compatible Completion Client
// Description: Streaming chat-completions client over blocking HTTP.
// Purpose: Accumulate a server-sent event stream into one response string.
// Dependencies: reqwest, serde, serde_json, tracing, url, crate::completion
// ============================================================================

//! ## Overview
//! [`OpenAiCompletionClient`] posts one user message to
//! `<base_url>/chat/completions` with `stream: true` and concatenates every
//! `choices[0].delta.content` fragment until `data: [DONE]` or end of stream.
//!
//! ## Invariants
//! - Every request is bounded by the configured timeout.
//! - Redirects are rejected.
//! - Accumulated text is capped at [`MAX_RESPONSE_BYTES`].
//! - No event line is buffered past [`MAX_LINE_BYTES`].
//!
//! Security posture: the API key is sent only as a bearer header and is never
//! logged or included in errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::completion::CompletionClient;
use crate::completion::CompletionError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Cap on accumulated response text.
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Cap on one event line, terminator included.
pub const MAX_LINE_BYTES: u64 = 8 * 1024 * 1024;

/// Stream terminator payload.
const DONE_MARKER: &str = "[DONE]";

/// Longest error body excerpt kept in [`CompletionError::Status`].
const MAX_ERROR_BODY: u64 = 2048;

/// User agent sent with completion requests.
const USER_AGENT: &str = concat!("spec-converter/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Connection and sampling settings for the completion client.
#[derive(Clone)]
pub struct OpenAiSettings {
    /// API root, for example `https://integrate.api.nvidia.com/v1`.
    pub base_url: Url,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Nucleus sampling mass.
    pub top_p: f64,
    /// Response token cap.
    pub max_tokens: u32,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Bearer token, when the endpoint requires one.
    pub api_key: Option<String>,
}

impl fmt::Debug for OpenAiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiSettings")
            .field("base_url", &self.base_url.as_str())
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// ============================================================================
// SECTION: Wire Types
// ============================================================================

/// Chat completion request body.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    /// Model identifier.
    model: &'a str,
    /// Conversation messages.
    messages: [ChatMessage<'a>; 1],
    /// Sampling temperature.
    temperature: f64,
    /// Nucleus sampling mass.
    top_p: f64,
    /// Response token cap.
    max_tokens: u32,
    /// Always true; responses arrive as server-sent events.
    stream: bool,
}

/// One chat message.
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    /// Speaker role.
    role: &'a str,
    /// Message text.
    content: &'a str,
}

/// One streamed chunk.
#[derive(Debug, Deserialize)]
struct StreamChunk {
    /// Incremental choices.
    #[serde(default)]
    choices: Vec<StreamChoice>,
    /// Error object some servers send mid-stream.
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// One streamed choice.
#[derive(Debug, Deserialize)]
struct StreamChoice {
    /// Incremental message content.
    #[serde(default)]
    delta: StreamDelta,
}

/// Incremental message content.
#[derive(Debug, Default, Deserialize)]
struct StreamDelta {
    /// Text fragment, absent on role-only and final chunks.
    #[serde(default)]
    content: Option<String>,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Streaming client for OpenAI-compatible chat completion endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiCompletionClient {
    /// HTTP client with timeout and redirect policy applied.
    client: Client,
    /// Resolved `chat/completions` endpoint.
    endpoint: Url,
    /// Request settings.
    settings: OpenAiSettings,
}

impl OpenAiCompletionClient {
    /// Builds a client from settings.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Transport`] when the endpoint URL cannot be
    /// derived or the HTTP client cannot be constructed.
    pub fn new(settings: OpenAiSettings) -> Result<Self, CompletionError> {
        let endpoint = chat_endpoint(&settings.base_url)?;
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(USER_AGENT)
            .redirect(Policy::none())
            .build()
            .map_err(|err| CompletionError::Transport(err.to_string()))?;
        Ok(Self { client, endpoint, settings })
    }

    /// Returns the resolved endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl CompletionClient for OpenAiCompletionClient {
    fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let body = ChatRequest {
            model: &self.settings.model,
            messages: [ChatMessage { role: "user", content: prompt }],
            temperature: self.settings.temperature,
            top_p: self.settings.top_p,
            max_tokens: self.settings.max_tokens,
            stream: true,
        };
        let payload =
            serde_json::to_vec(&body).map_err(|err| CompletionError::Transport(err.to_string()))?;
        debug!(
            endpoint = %self.endpoint,
            model = %self.settings.model,
            prompt_bytes = prompt.len(),
            "sending completion request"
        );

        let mut request = self
            .client
            .post(self.endpoint.as_str())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "text/event-stream")
            .body(payload);
        if let Some(key) = &self.settings.api_key {
            request = request.header(AUTHORIZATION, format!("Bearer {key}"));
        }
        let response = request.send().map_err(map_request_error)?;
        let status = response.status();
        if !status.is_success() {
            let mut excerpt = String::new();
            let _ = response.take(MAX_ERROR_BODY).read_to_string(&mut excerpt);
            return Err(CompletionError::Status { status: status.as_u16(), body: excerpt });
        }
        let text = accumulate_stream(BufReader::new(response))?;
        debug!(endpoint = %self.endpoint, response_bytes = text.len(), "completion stream finished");
        Ok(text)
    }
}

/// Appends `chat/completions` to the API root.
fn chat_endpoint(base_url: &Url) -> Result<Url, CompletionError> {
    let mut root = base_url.clone();
    if !root.path().ends_with('/') {
        let path = format!("{}/", root.path());
        root.set_path(&path);
    }
    root.join("chat/completions").map_err(|err| CompletionError::Transport(err.to_string()))
}

/// Classifies a request error.
fn map_request_error(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        CompletionError::Timeout
    } else {
        CompletionError::Transport(err.to_string())
    }
}

// ============================================================================
// SECTION: Stream Decoding
// ============================================================================

/// Concatenates the content fragments of a server-sent event stream.
///
/// Lines other than `data:` fields are ignored. The stream ends at
/// `data: [DONE]` or end of input.
///
/// # Errors
///
/// Returns [`CompletionError::Stream`] for unreadable input, undecodable
/// chunks, error chunks, event lines beyond [`MAX_LINE_BYTES`], or text
/// beyond [`MAX_RESPONSE_BYTES`], and
/// [`CompletionError::Timeout`] when the read times out.
pub fn accumulate_stream<R: BufRead>(mut reader: R) -> Result<String, CompletionError> {
    let mut text = String::new();
    let mut chunks = 0_usize;
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        let mut line_reader = (&mut reader).take(MAX_LINE_BYTES + 1);
        let read = line_reader.read_until(b'\n', &mut buffer).map_err(|err| {
            if err.kind() == std::io::ErrorKind::TimedOut {
                CompletionError::Timeout
            } else {
                CompletionError::Stream(err.to_string())
            }
        })?;
        if read == 0 {
            break;
        }
        if line_reader.limit() == 0 {
            return Err(CompletionError::Stream(format!(
                "event line exceeds {MAX_LINE_BYTES} bytes"
            )));
        }
        let line = std::str::from_utf8(&buffer)
            .map_err(|err| CompletionError::Stream(format!("stream is not utf-8: {err}")))?
            .trim_end_matches(['\r', '\n']);
        let Some(data) = line.strip_prefix("data:") else {
            continue;
        };
        let data = data.trim();
        if data == DONE_MARKER {
            break;
        }
        if data.is_empty() {
            continue;
        }
        let chunk: StreamChunk = serde_json::from_str(data)
            .map_err(|err| CompletionError::Stream(format!("undecodable chunk: {err}")))?;
        if let Some(error) = chunk.error {
            return Err(CompletionError::Stream(format!("service error: {error}")));
        }
        chunks += 1;
        if let Some(content) = chunk.choices.into_iter().next().and_then(|c| c.delta.content) {
            if text.len() + content.len() > MAX_RESPONSE_BYTES {
                return Err(CompletionError::Stream(format!(
                    "response exceeds {MAX_RESPONSE_BYTES} bytes"
                )));
            }
            text.push_str(&content);
        }
    }
    debug!(chunks, "decoded completion stream");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_are_joined_until_done() {
        let stream = "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n\
                      data: {\"choices\":[{\"delta\":{\"content\":\"```json\\n{\\\"az\"}}]}\n\n\
                      : keep-alive\n\
                      data: {\"choices\":[{\"delta\":{\"content\":\"imuth\\\": 120}\\n```\"}}]}\n\n\
                      data: [DONE]\n\n\
                      data: {\"choices\":[{\"delta\":{\"content\":\"ignored\"}}]}\n";
        let text = accumulate_stream(stream.as_bytes()).unwrap_or_default();
        assert_eq!(text, "```json\n{\"azimuth\": 120}\n```");
    }

    #[test]
    fn error_chunks_fail_the_stream() {
        let stream = "data: {\"error\":{\"message\":\"overloaded\"}}\n";
        assert!(matches!(accumulate_stream(stream.as_bytes()), Err(CompletionError::Stream(_))));
    }

    #[test]
    fn garbage_chunks_fail_the_stream() {
        let stream = "data: not json\n";
        assert!(matches!(accumulate_stream(stream.as_bytes()), Err(CompletionError::Stream(_))));
    }

    #[test]
    fn unterminated_oversized_lines_stop_the_read() {
        let mut stream = b"data: ".to_vec();
        let oversized = usize::try_from(MAX_LINE_BYTES).unwrap_or(usize::MAX - 4096) + 4096;
        stream.resize(oversized, b'x');
        let err = accumulate_stream(stream.as_slice()).err();
        assert!(
            matches!(&err, Some(CompletionError::Stream(message)) if message.contains("event line")),
            "{err:?}"
        );
    }

    #[test]
    fn oversized_content_is_rejected_across_chunks() {
        let piece = "y".repeat(MAX_RESPONSE_BYTES / 2 + 1);
        let line = format!("data: {{\"choices\":[{{\"delta\":{{\"content\":\"{piece}\"}}}}]}}\n");
        let stream = line.repeat(2);
        let err = accumulate_stream(stream.as_bytes()).err();
        assert!(
            matches!(&err, Some(CompletionError::Stream(message)) if message.contains("response exceeds")),
            "{err:?}"
        );
    }

    #[test]
    fn crlf_terminated_events_decode() {
        let stream = "data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\r\n\r\ndata: [DONE]\r\n";
        assert_eq!(accumulate_stream(stream.as_bytes()).unwrap_or_default(), "ok");
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let base = Url::parse("https://integrate.api.nvidia.com/v1").unwrap_or_else(|err| panic!("{err}"));
        let endpoint = chat_endpoint(&base).unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(endpoint.as_str(), "https://integrate.api.nvidia.com/v1/chat/completions");
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let settings = OpenAiSettings {
            base_url: Url::parse("http://127.0.0.1:1/v1").unwrap_or_else(|err| panic!("{err}")),
            model: "m".to_string(),
            temperature: 0.1,
            top_p: 0.7,
            max_tokens: 16,
            timeout: Duration::from_secs(1),
            api_key: Some("secret-key".to_string()),
        };
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
