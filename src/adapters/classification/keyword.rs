//! Keyword classifier - the deterministic fallback backend.
//!
//! Scans the text for keyword signals. Never fails and performs no I/O; this
//! is the required safety net behind every AI-backed backend.
//!
//! Priority rules (case-insensitive, whole tokens):
//! - "urgent" or "critical" => Critical
//! - "minor" or "low" => Low
//! - otherwise => Moderate
//!
//! Category falls back to the generic `Other` bucket when no keyword signal
//! names a specific category.

use async_trait::async_trait;

use crate::domain::classification::{
    Category, ClassificationInput, ClassificationResult, Priority,
};
use crate::ports::{Classifier, ClassifierError};

/// Deterministic keyword-scan classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    /// Creates a new keyword classifier.
    pub fn new() -> Self {
        Self
    }

    fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_ascii_lowercase())
    }

    fn priority_of(text: &str) -> Priority {
        let mut priority = Priority::Moderate;
        for token in Self::tokens(text) {
            match token.as_str() {
                // Critical signals win over Low signals.
                "urgent" | "critical" => return Priority::Critical,
                "minor" | "low" => priority = Priority::Low,
                _ => {}
            }
        }
        priority
    }

    fn category_of(text: &str) -> Category {
        for token in Self::tokens(text) {
            match token.as_str() {
                "pothole" | "potholes" | "road" | "pavement" | "sidewalk" => {
                    return Category::RoadMaintenance
                }
                "garbage" | "trash" | "waste" | "litter" | "dumping" => {
                    return Category::WasteDisposal
                }
                "streetlight" | "streetlights" | "lamppost" | "lamp" => {
                    return Category::StreetlightMaintenance
                }
                _ => {}
            }
        }
        Category::Other
    }
}

#[async_trait]
impl Classifier for KeywordClassifier {
    async fn classify(
        &self,
        input: &ClassificationInput,
    ) -> Result<ClassificationResult, ClassifierError> {
        let text = format!("{} {}", input.text, input.address);
        Ok(ClassificationResult::new(
            Self::category_of(&text),
            Self::priority_of(&text),
        ))
    }

    fn backend_name(&self) -> &'static str {
        "keyword"
    }
}
