//! Transcriber port - audio reference to text.
//!
//! Consumed only by the AI-backed classifier: when a submission carries an
//! audio recording, the recording is transcribed before classification.

use async_trait::async_trait;

use super::ClassifierError;

/// Port for transcribing uploaded audio recordings.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the recording behind the given media reference.
    ///
    /// # Errors
    ///
    /// - `Transcription` if the backend cannot produce text
    async fn transcribe(&self, audio_ref: &str) -> Result<String, ClassifierError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcriber_is_object_safe() {
        fn _accepts_dyn(_t: &dyn Transcriber) {}
    }
}
