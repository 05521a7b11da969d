//! Classifier port - interface over classification backends.
//!
//! One contract covers both the deterministic keyword fallback and the
//! AI-backed implementation, so the submit handler never needs to know which
//! backend produced a result. A classifier failure only forfeits the
//! classification enrichment; it must never surface as a submission failure.

use async_trait::async_trait;

use crate::domain::classification::{ClassificationInput, ClassificationResult};

/// Port for deriving `{category, priority}` from raw citizen input.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify the given input.
    ///
    /// Implementations backed by external services should bound their own
    /// timeouts so callers degrade instead of hanging.
    async fn classify(
        &self,
        input: &ClassificationInput,
    ) -> Result<ClassificationResult, ClassifierError>;

    /// Short backend name for logging ("keyword", "llm", ...).
    fn backend_name(&self) -> &'static str;
}

/// Classification backend errors.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// Rate limited by the backend.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Backend is unavailable.
    #[error("backend unavailable: {message}")]
    Unavailable { message: String },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Backend response was invalid or unparseable.
    #[error("parse error: {0}")]
    Parse(String),

    /// Audio transcription failed.
    #[error("transcription failed: {0}")]
    Transcription(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// Invalid request configuration (caller's fault).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ClassifierError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if another backend may succeed where this one failed.
    ///
    /// Everything except a malformed request is recoverable: the caller
    /// treats a recoverable failure as "classification unavailable", not as a
    /// hard failure of submission.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ClassifierError::InvalidRequest(_))
    }
}
