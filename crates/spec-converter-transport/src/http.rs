// crates/spec-converter-transport/src/http.rs
// ============================================================================
// Module: HTTP Report Transport
// Description: PUT/GET of test reports over blocking HTTP.
// Purpose: Submit and fetch TestResultsSummary documents by test id.
// Dependencies: reqwest, serde_json, spec-converter-core, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! Documents are sent as pretty JSON with field names preserved and absent
//! optionals omitted. Non-success statuses fail closed; redirects are refused.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::blocking::RequestBuilder;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use spec_converter_core::Entity;
use spec_converter_core::ReportError;
use spec_converter_core::TestId;
use spec_converter_core::TestResultsSummary;
use thiserror::Error;
use tracing::info;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Cap on a retrieved document.
pub const MAX_DOCUMENT_BYTES: u64 = 16 * 1024 * 1024;

/// Longest error body excerpt kept in [`TransportError::Status`].
const MAX_ERROR_BODY: u64 = 2048;

/// User agent sent with transport requests.
const USER_AGENT: &str = concat!("spec-converter/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Submission and retrieval failures.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Target URL could not be built.
    #[error("invalid submission url: {0}")]
    Url(String),
    /// Connection or client failure.
    #[error("transport error: {0}")]
    Http(String),
    /// Request did not finish within the configured timeout.
    #[error("request timed out")]
    Timeout,
    /// Service answered with a non-success status.
    #[error("service returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body excerpt.
        body: String,
    },
    /// Retrieved document exceeds [`MAX_DOCUMENT_BYTES`].
    #[error("retrieved document exceeds {MAX_DOCUMENT_BYTES} bytes")]
    TooLarge,
    /// Document could not be serialized, parsed, or validated.
    #[error(transparent)]
    Report(#[from] ReportError),
}

// ============================================================================
// SECTION: Interface
// ============================================================================

/// Submission and retrieval of finished reports.
pub trait ReportTransport {
    /// Submits `report` under its test id.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the document cannot be serialized or
    /// the service rejects it.
    fn submit(&self, report: &TestResultsSummary) -> Result<(), TransportError>;

    /// Retrieves the report stored under `test_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the request fails or the returned
    /// document does not validate.
    fn fetch(&self, test_id: &TestId) -> Result<TestResultsSummary, TransportError>;
}

// ============================================================================
// SECTION: HTTP Transport
// ============================================================================

/// Settings for [`HttpReportTransport`].
#[derive(Clone)]
pub struct HttpTransportSettings {
    /// Service root, for example `http://localhost:8000`.
    pub base_url: Url,
    /// Path under which reports are keyed by test id.
    pub path_prefix: String,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Basic-auth user for retrieval.
    pub username: Option<String>,
    /// Basic-auth password for retrieval.
    pub password: Option<String>,
}

impl fmt::Debug for HttpTransportSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransportSettings")
            .field("base_url", &self.base_url.as_str())
            .field("path_prefix", &self.path_prefix)
            .field("timeout", &self.timeout)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// HTTP implementation of [`ReportTransport`].
#[derive(Debug, Clone)]
pub struct HttpReportTransport {
    /// HTTP client with timeout and redirect policy applied.
    client: Client,
    /// Transport settings.
    settings: HttpTransportSettings,
}

impl HttpReportTransport {
    /// Builds a transport.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] when the HTTP client cannot be built.
    pub fn new(settings: HttpTransportSettings) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(USER_AGENT)
            .redirect(Policy::none())
            .build()
            .map_err(|err| TransportError::Http(err.to_string()))?;
        Ok(Self { client, settings })
    }

    /// Returns the document URL for `test_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Url`] when the joined URL is invalid.
    pub fn document_url(&self, test_id: &TestId) -> Result<Url, TransportError> {
        let mut url = self.settings.base_url.clone();
        let prefix = self.settings.path_prefix.trim_matches('/');
        let base = url.path().trim_end_matches('/').to_string();
        let path = if prefix.is_empty() {
            format!("{base}/{test_id}")
        } else {
            format!("{base}/{prefix}/{test_id}")
        };
        url.set_path(&path);
        if url.cannot_be_a_base() {
            return Err(TransportError::Url(url.to_string()));
        }
        Ok(url)
    }

    /// Applies basic auth when a user is configured.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.settings.username {
            Some(user) => request.basic_auth(user, self.settings.password.as_deref()),
            None => request,
        }
    }
}

impl ReportTransport for HttpReportTransport {
    fn submit(&self, report: &TestResultsSummary) -> Result<(), TransportError> {
        report.validate().map_err(ReportError::from)?;
        let url = self.document_url(report.test_id())?;
        let body = report.to_json_string()?;
        let response = self
            .client
            .put(url.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(map_request_error)?;
        ensure_success(response)?;
        info!(url = %url, test_id = %report.test_id(), "submitted report");
        Ok(())
    }

    fn fetch(&self, test_id: &TestId) -> Result<TestResultsSummary, TransportError> {
        let url = self.document_url(test_id)?;
        let response = self
            .authorize(self.client.get(url.as_str()).header(ACCEPT, "application/json"))
            .send()
            .map_err(map_request_error)?;
        let response = ensure_success(response)?;
        if response.content_length().is_some_and(|length| length > MAX_DOCUMENT_BYTES) {
            return Err(TransportError::TooLarge);
        }
        let mut text = String::new();
        response
            .take(MAX_DOCUMENT_BYTES + 1)
            .read_to_string(&mut text)
            .map_err(|err| TransportError::Http(err.to_string()))?;
        if u64::try_from(text.len()).unwrap_or(u64::MAX) > MAX_DOCUMENT_BYTES {
            return Err(TransportError::TooLarge);
        }
        let report = TestResultsSummary::from_json_str(&text)?;
        info!(url = %url, test_id = %test_id, "fetched report");
        Ok(report)
    }
}

/// Fails on non-success statuses, keeping a body excerpt.
fn ensure_success(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let mut excerpt = String::new();
    let _ = response.take(MAX_ERROR_BODY).read_to_string(&mut excerpt);
    Err(TransportError::Status { status: status.as_u16(), body: excerpt })
}

/// Classifies a request error.
fn map_request_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() { TransportError::Timeout } else { TransportError::Http(err.to_string()) }
}
