//! Classification backends.

mod failover;
mod keyword;
mod llm;
mod mock;

pub use failover::FailoverClassifier;
pub use keyword::KeywordClassifier;
pub use llm::{LlmClassifier, LlmClassifierConfig};
pub use mock::MockClassifier;
