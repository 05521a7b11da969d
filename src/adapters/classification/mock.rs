//! Mock classifier for testing.
//!
//! Configurable to return queued results or inject errors, with call
//! tracking for verification, so tests run without a real AI backend.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::classification::{ClassificationInput, ClassificationResult};
use crate::ports::{Classifier, ClassifierError};

enum MockOutcome {
    Result(ClassificationResult),
    Error(ClassifierError),
}

/// Mock classifier for tests.
///
/// Queued outcomes are consumed in order; once the queue is empty, the
/// default result (unclassified) is returned.
#[derive(Clone, Default)]
pub struct MockClassifier {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    calls: Arc<Mutex<Vec<ClassificationInput>>>,
}

impl MockClassifier {
    /// Creates a new mock classifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful result.
    pub fn with_result(self, result: ClassificationResult) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Result(result));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: ClassifierError) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Error(error));
        self
    }

    /// Returns the inputs this classifier was called with.
    pub fn calls(&self) -> Vec<ClassificationInput> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(
        &self,
        input: &ClassificationInput,
    ) -> Result<ClassificationResult, ClassifierError> {
        self.calls.lock().unwrap().push(input.clone());

        match self.outcomes.lock().unwrap().pop_front() {
            Some(MockOutcome::Result(result)) => Ok(result),
            Some(MockOutcome::Error(error)) => Err(error),
            None => Ok(ClassificationResult::unclassified()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classification::{Category, Priority};

    fn input() -> ClassificationInput {
        ClassificationInput::text_only("leaning lamppost", "Oak St")
    }

    #[tokio::test]
    async fn returns_queued_results_in_order() {
        let classifier = MockClassifier::new()
            .with_result(ClassificationResult::new(
                Category::StreetlightMaintenance,
                Priority::Low,
            ))
            .with_result(ClassificationResult::new(
                Category::RoadMaintenance,
                Priority::Critical,
            ));

        let first = classifier.classify(&input()).await.unwrap();
        let second = classifier.classify(&input()).await.unwrap();
        assert_eq!(first.category, Category::StreetlightMaintenance);
        assert_eq!(second.category, Category::RoadMaintenance);
    }

    #[tokio::test]
    async fn returns_unclassified_when_queue_is_empty() {
        let classifier = MockClassifier::new();
        let result = classifier.classify(&input()).await.unwrap();
        assert_eq!(result, ClassificationResult::unclassified());
    }

    #[tokio::test]
    async fn injects_queued_errors() {
        let classifier =
            MockClassifier::new().with_error(ClassifierError::unavailable("down"));
        let result = classifier.classify(&input()).await;
        assert!(matches!(result, Err(ClassifierError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn tracks_calls() {
        let classifier = MockClassifier::new();
        classifier.classify(&input()).await.unwrap();
        classifier.classify(&input()).await.unwrap();
        assert_eq!(classifier.call_count(), 2);
        assert_eq!(classifier.calls()[0].address, "Oak St");
    }
}
