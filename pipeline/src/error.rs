//! Pipeline error types

use thiserror::Error;

/// Result type for single generation attempts
pub type GenerationResult<T> = Result<T, GenerationFailure>;

/// Failure modes of one generation attempt.
///
/// Only `Unavailable` is worth retrying; everything else is terminal for
/// the attempt and surfaces as a per-section error.
#[derive(Error, Debug)]
pub enum GenerationFailure {
    #[error("service unavailable (HTTP {status})")]
    Unavailable { status: u16 },

    #[error("request failed (HTTP {status})")]
    Failed { status: u16 },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("invalid response body: {message}")]
    InvalidBody { message: String },
}

impl GenerationFailure {
    /// Classify an upstream HTTP status. 500 and 503 signal transient
    /// overload, the rest is treated as a hard rejection.
    pub fn from_status(status: u16) -> Self {
        match status {
            500 | 503 => GenerationFailure::Unavailable { status },
            _ => GenerationFailure::Failed { status },
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, GenerationFailure::Unavailable { .. })
    }
}
