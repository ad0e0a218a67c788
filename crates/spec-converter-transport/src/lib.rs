// crates/spec-converter-transport/src/lib.rs
// ============================================================================
// Module: Spec Converter Transport
// Description: Submission and retrieval of finished test reports.
// Purpose: Hand validated documents to the provisioning service keyed by test id.
// Dependencies: reqwest, serde_json, spec-converter-core, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! [`ReportTransport`] is the document submission boundary. The bundled
//! [`HttpReportTransport`] PUTs the serialized report to
//! `<base_url><path_prefix>/<testId>` and GETs it back from the same path.
//!
//! ## Invariants
//! - Only documents that passed validation are sent; retrieved documents are
//!   validated before they are returned.
//! - One request per call with an explicit timeout; no retries.
//!
//! Security posture: the retrieval password is never logged.

pub mod http;

pub use http::HttpReportTransport;
pub use http::HttpTransportSettings;
pub use http::ReportTransport;
pub use http::TransportError;
