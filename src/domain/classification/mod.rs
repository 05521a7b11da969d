//! Classification value objects.
//!
//! Category and priority are closed enumerations. A classification result is
//! ephemeral: it is produced by a classifier and folded into the issue at
//! creation time, never persisted on its own.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Issue category.
///
/// `Other` is the generic bucket: classifier output that names none of the
/// specific categories is stored as `Other` rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    RoadMaintenance,
    WasteDisposal,
    StreetlightMaintenance,
    Other,
}

impl Category {
    /// All categories, in prompt order.
    pub const ALL: [Category; 4] = [
        Category::RoadMaintenance,
        Category::WasteDisposal,
        Category::StreetlightMaintenance,
        Category::Other,
    ];

    /// Parses a category from a human-facing label or storage key.
    ///
    /// Accepts both the display form ("Road Maintenance") and the snake_case
    /// storage form ("road_maintenance"), case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "roadmaintenance" => Some(Category::RoadMaintenance),
            "wastedisposal" => Some(Category::WasteDisposal),
            "streetlightmaintenance" => Some(Category::StreetlightMaintenance),
            "other" => Some(Category::Other),
            _ => None,
        }
    }

    /// Human-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::RoadMaintenance => "Road Maintenance",
            Category::WasteDisposal => "Waste Disposal",
            Category::StreetlightMaintenance => "Streetlight Maintenance",
            Category::Other => "Other",
        }
    }

    /// Storage key used by the persistence layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::RoadMaintenance => "road_maintenance",
            Category::WasteDisposal => "waste_disposal",
            Category::StreetlightMaintenance => "streetlight_maintenance",
            Category::Other => "other",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Issue priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    Moderate,
    Low,
}

impl Priority {
    /// Parses a priority from a label, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Some(Priority::Critical),
            "moderate" => Some(Priority::Moderate),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }

    /// Storage key used by the persistence layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::Moderate => "moderate",
            Priority::Low => "low",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Moderate
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Critical => "Critical",
            Priority::Moderate => "Moderate",
            Priority::Low => "Low",
        };
        write!(f, "{}", s)
    }
}

/// Raw citizen input handed to a classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationInput {
    /// Best available text signal (description, or empty string).
    pub text: String,
    /// Free-text address of the reported problem.
    pub address: String,
    /// Reference to an uploaded audio recording, if any.
    pub audio_ref: Option<String>,
}

impl ClassificationInput {
    /// Creates a text-only classification input.
    pub fn text_only(text: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            address: address.into(),
            audio_ref: None,
        }
    }

    /// Attaches an audio reference.
    pub fn with_audio(mut self, audio_ref: impl Into<String>) -> Self {
        self.audio_ref = Some(audio_ref.into());
        self
    }
}

/// Result of classifying citizen input.
///
/// Ephemeral value object: folded into the issue at creation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Transcription derived from audio input, if any.
    pub transcription: Option<String>,
    /// Derived category.
    pub category: Category,
    /// Derived priority.
    pub priority: Priority,
}

impl ClassificationResult {
    /// Creates a result with no transcription.
    pub fn new(category: Category, priority: Priority) -> Self {
        Self {
            transcription: None,
            category,
            priority,
        }
    }

    /// Attaches a transcription.
    pub fn with_transcription(mut self, transcription: impl Into<String>) -> Self {
        self.transcription = Some(transcription.into());
        self
    }

    /// Result used when no classifier output is available: the reporting
    /// mission must not block on AI availability.
    pub fn unclassified() -> Self {
        Self::default()
    }
}
