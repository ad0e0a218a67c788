// crates/spec-converter-mapper/src/completion.rs
// ============================================================================
// Module: Completion Boundary
// Description: Interface to the external text completion service.
// Purpose: Decouple mapping from any particular completion provider.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! One prompt in, one accumulated text response out. Implementations perform
//! exactly one request per call, carry no session state, and must bound the
//! call with a timeout.

use thiserror::Error;

/// Completion service failures.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Client setup or connection failure.
    #[error("completion transport error: {0}")]
    Transport(String),
    /// Request did not finish within the configured timeout.
    #[error("completion request timed out")]
    Timeout,
    /// Service answered with a non-success status.
    #[error("completion service returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body excerpt.
        body: String,
    },
    /// Streamed response could not be decoded.
    #[error("completion stream error: {0}")]
    Stream(String),
}

/// Text completion service.
pub trait CompletionClient {
    /// Sends `prompt` and returns the full response text.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError`] when the request fails or times out.
    fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

impl<T: CompletionClient + ?Sized> CompletionClient for &T {
    fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        (**self).complete(prompt)
    }
}
