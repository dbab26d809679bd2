//! Error taxonomy for the AI form pipeline.

use crate::storage::StorageError;
use thiserror::Error;

/// Errors raised by the AI form-synthesis pipeline.
///
/// `generate` recovers from `Parse`, `Structure`, and `Upstream` by
/// substituting the fallback form; `modify` and `analyze` surface every
/// kind to the caller. `NotFound` and `Permission` are never silently
/// recovered.
#[derive(Error, Debug)]
pub enum AiError {
    /// Malformed or disallowed request input - user-correctable.
    #[error("Validation error: {0}")]
    Validation(String),
    /// The model reply did not contain extractable/decodable JSON.
    #[error("Failed to parse model response: {0}")]
    Parse(String),
    /// Decoded JSON failed the form structure validator.
    #[error("Generated form structure is invalid: {0}")]
    Structure(String),
    /// Referenced form or session does not exist.
    #[error("{0} not found")]
    NotFound(String),
    /// Caller does not own the referenced form.
    #[error("Permission denied: {0}")]
    Permission(String),
    /// The LLM call failed (includes quota-exceeded and timeout subtypes).
    #[error("Model service error: {0}")]
    Upstream(#[from] LlmError),
    /// A store write failed.
    #[error("Storage error: {0}")]
    Persistence(#[from] StorageError),
}

impl AiError {
    /// True for the error kinds the generate operation degrades on rather
    /// than failing.
    pub fn is_recoverable_for_generate(&self) -> bool {
        matches!(
            self,
            AiError::Parse(_) | AiError::Structure(_) | AiError::Upstream(_)
        )
    }
}

/// Errors from the LLM text-completion client.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Model API key not configured")]
    NotConfigured,
    #[error("Model request timed out")]
    Timeout,
    #[error("Model quota exceeded")]
    QuotaExceeded,
    #[error("Model API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Model request failed: {0}")]
    Network(String),
    #[error("Model returned an empty response")]
    EmptyResponse,
}
