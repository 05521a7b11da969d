//! Failover classifier - automatic fallback between backends.
//!
//! When the primary backend fails with a recoverable error, the fallback
//! backend classifies instead. Pairing the LLM backend with the keyword
//! backend gives every submission a classification without ever blocking on
//! AI availability.
//!
//! # Example
//!
//! ```ignore
//! let classifier = FailoverClassifier::new(
//!     Arc::new(llm_classifier),
//!     Arc::new(KeywordClassifier::new()),
//! );
//! ```

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::classification::{ClassificationInput, ClassificationResult};
use crate::ports::{Classifier, ClassifierError};

/// Classifier wrapper that falls back to a second backend on recoverable
/// failure.
pub struct FailoverClassifier {
    primary: Arc<dyn Classifier>,
    fallback: Arc<dyn Classifier>,
}

impl FailoverClassifier {
    /// Creates a failover classifier over a primary and a fallback backend.
    pub fn new(primary: Arc<dyn Classifier>, fallback: Arc<dyn Classifier>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl Classifier for FailoverClassifier {
    async fn classify(
        &self,
        input: &ClassificationInput,
    ) -> Result<ClassificationResult, ClassifierError> {
        match self.primary.classify(input).await {
            Ok(result) => Ok(result),
            Err(err) if err.is_recoverable() => {
                tracing::warn!(
                    primary = self.primary.backend_name(),
                    fallback = self.fallback.backend_name(),
                    error = %err,
                    "classification backend failed, falling back"
                );
                self.fallback.classify(input).await
            }
            Err(err) => Err(err),
        }
    }

    fn backend_name(&self) -> &'static str {
        "failover"
    }
}
