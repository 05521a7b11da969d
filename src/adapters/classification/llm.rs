//! LLM classifier - AI-backed implementation of the Classifier port.
//!
//! Sends the citizen's text (transcribing audio first when present) to a
//! chat-completions endpoint with a prompt constrained to the category and
//! priority enumerations, and parses a strict JSON response. Any network or
//! parse failure maps to a recoverable `ClassifierError`; callers treat that
//! as "classification unavailable", never as a submission failure.
//!
//! # Configuration
//!
//! ```ignore
//! let config = LlmClassifierConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let classifier = LlmClassifier::new(config, transcriber);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::classification::{
    Category, ClassificationInput, ClassificationResult, Priority,
};
use crate::ports::{Classifier, ClassifierError, Transcriber};

/// Configuration for the LLM classifier.
#[derive(Debug, Clone)]
pub struct LlmClassifierConfig {
    /// API key for authentication.
    api_key: String,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout. Kept short so the caller's degrade path triggers
    /// instead of hanging a submission.
    pub timeout: Duration,
}

impl LlmClassifierConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// AI-backed classifier calling a chat-completions API.
pub struct LlmClassifier {
    config: LlmClassifierConfig,
    client: Client,
    transcriber: Option<Arc<dyn Transcriber>>,
}

impl LlmClassifier {
    /// Creates a new LLM classifier.
    ///
    /// Without a transcriber, audio references are ignored and only the text
    /// signal is classified.
    pub fn new(config: LlmClassifierConfig, transcriber: Option<Arc<dyn Transcriber>>) -> Result<Self, ClassifierError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClassifierError::InvalidRequest(e.to_string()))?;

        Ok(Self {
            config,
            client,
            transcriber,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn system_prompt() -> String {
        let categories: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
        format!(
            "You classify municipal issue reports. Respond with strict JSON \
             {{\"category\": <category>, \"priority\": <priority>}} where category is one of \
             [{}] and priority is one of [Critical, Moderate, Low]. No other text.",
            categories.join(", ")
        )
    }

    async fn send_request(&self, text: &str, address: &str) -> Result<Response, ClassifierError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Self::system_prompt(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!("Report: {}\nAddress: {}", text, address),
                },
            ],
            temperature: 0.0,
        };

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClassifierError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    ClassifierError::network(format!("Connection failed: {}", e))
                } else {
                    ClassifierError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(response: Response) -> Result<Response, ClassifierError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 => Err(ClassifierError::AuthenticationFailed),
            429 => Err(ClassifierError::RateLimited { retry_after_secs: 30 }),
            500..=599 => Err(ClassifierError::unavailable(format!(
                "server error {}: {}",
                status, error_body
            ))),
            _ => Err(ClassifierError::unavailable(format!(
                "unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses the model's message content into a classification.
    ///
    /// The contract is strict JSON with the enumerated labels; anything else
    /// is a recoverable parse error. A missing priority defaults to Moderate.
    fn parse_content(content: &str) -> Result<(Category, Priority), ClassifierError> {
        let parsed: RawClassification = serde_json::from_str(content.trim())
            .map_err(|e| ClassifierError::parse(format!("invalid JSON: {}", e)))?;

        let category = Category::parse(&parsed.category).ok_or_else(|| {
            ClassifierError::parse(format!("unknown category: {}", parsed.category))
        })?;

        let priority = match parsed.priority {
            Some(raw) => Priority::parse(&raw)
                .ok_or_else(|| ClassifierError::parse(format!("unknown priority: {}", raw)))?,
            None => Priority::Moderate,
        };

        Ok((category, priority))
    }
}

#[async_trait]
impl Classifier for LlmClassifier {
    async fn classify(
        &self,
        input: &ClassificationInput,
    ) -> Result<ClassificationResult, ClassifierError> {
        // Audio, when present, carries the primary signal.
        let transcription = match (&input.audio_ref, &self.transcriber) {
            (Some(audio_ref), Some(transcriber)) => Some(transcriber.transcribe(audio_ref).await?),
            _ => None,
        };

        let text = transcription.as_deref().unwrap_or(&input.text);

        let response = self.send_request(text, &input.address).await?;
        let response = Self::handle_response_status(response).await?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::parse(format!("invalid response body: {}", e)))?;

        let content = body
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| ClassifierError::parse("response contained no choices"))?;

        let (category, priority) = Self::parse_content(content)?;

        let mut result = ClassificationResult::new(category, priority);
        if let Some(transcription) = transcription {
            result = result.with_transcription(transcription);
        }
        Ok(result)
    }

    fn backend_name(&self) -> &'static str {
        "llm"
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Wire shape of the model's classification payload.
#[derive(Debug, Deserialize)]
struct RawClassification {
    category: String,
    priority: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_content_accepts_strict_json() {
        let (category, priority) =
            LlmClassifier::parse_content(r#"{"category": "Road Maintenance", "priority": "Critical"}"#)
                .unwrap();
        assert_eq!(category, Category::RoadMaintenance);
        assert_eq!(priority, Priority::Critical);
    }

    #[test]
    fn parse_content_defaults_missing_priority_to_moderate() {
        let (_, priority) =
            LlmClassifier::parse_content(r#"{"category": "Other"}"#).unwrap();
        assert_eq!(priority, Priority::Moderate);
    }

    #[test]
    fn parse_content_rejects_prose() {
        let result = LlmClassifier::parse_content("The category is Road Maintenance.");
        assert!(matches!(result, Err(ClassifierError::Parse(_))));
    }

    #[test]
    fn parse_content_rejects_unknown_category() {
        let result = LlmClassifier::parse_content(r#"{"category": "Graffiti"}"#);
        assert!(matches!(result, Err(ClassifierError::Parse(_))));
    }

    #[test]
    fn parse_content_rejects_unknown_priority() {
        let result =
            LlmClassifier::parse_content(r#"{"category": "Other", "priority": "High"}"#);
        assert!(matches!(result, Err(ClassifierError::Parse(_))));
    }

    #[test]
    fn parse_errors_are_recoverable() {
        let err = LlmClassifier::parse_content("not json").unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn system_prompt_enumerates_all_categories() {
        let prompt = LlmClassifier::system_prompt();
        for category in Category::ALL {
            assert!(prompt.contains(category.label()), "missing {}", category);
        }
    }
}
