//! SubmitIssueHandler - Command handler for reporting new issues.

use std::sync::Arc;

use tracing::warn;

use crate::domain::classification::{ClassificationInput, ClassificationResult};
use crate::domain::foundation::{ActingUser, ErrorCode, IssueId};
use crate::domain::issue::{Issue, IssueError};
use crate::ports::{Classifier, IssueNumberAllocator, IssueRepository, Notification, NotificationSink};

/// Attempts to persist before giving up on repeated number collisions.
const MAX_NUMBER_RETRIES: u32 = 3;

/// Command to submit a new issue.
#[derive(Debug, Clone)]
pub struct SubmitIssueCommand {
    pub description: Option<String>,
    pub address: String,
    pub photo_ref: Option<String>,
    pub audio_ref: Option<String>,
}

/// Handler for submitting issues.
pub struct SubmitIssueHandler {
    issues: Arc<dyn IssueRepository>,
    numbers: Arc<dyn IssueNumberAllocator>,
    classifier: Arc<dyn Classifier>,
    notifications: Arc<dyn NotificationSink>,
}

impl SubmitIssueHandler {
    pub fn new(
        issues: Arc<dyn IssueRepository>,
        numbers: Arc<dyn IssueNumberAllocator>,
        classifier: Arc<dyn Classifier>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            issues,
            numbers,
            classifier,
            notifications,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitIssueCommand,
        acting: ActingUser,
    ) -> Result<Issue, IssueError> {
        // 1. Classify. A classifier failure forfeits the enrichment only;
        //    submission continues with the unclassified defaults.
        let input = self.build_input(&cmd);
        let classification = match self.classifier.classify(&input).await {
            Ok(result) => result,
            Err(e) => {
                warn!(
                    backend = self.classifier.backend_name(),
                    error = %e,
                    "classification unavailable, storing defaults"
                );
                ClassificationResult::unclassified()
            }
        };

        // 2. Allocate a number, build the aggregate, persist. A number
        //    collision means another writer won the race; retry with a
        //    freshly allocated number.
        let mut attempts = 0;
        let issue = loop {
            attempts += 1;
            let number = self.numbers.next().await?;
            let issue = Issue::submit(
                IssueId::new(),
                number,
                cmd.description.clone(),
                cmd.address.clone(),
                cmd.photo_ref.clone(),
                cmd.audio_ref.clone(),
                acting.id.clone(),
                classification.clone(),
            )?;

            match self.issues.save(&issue).await {
                Ok(()) => break issue,
                Err(e) if e.code == ErrorCode::IssueNumberConflict && attempts < MAX_NUMBER_RETRIES => {
                    warn!(number = %issue.number(), attempt = attempts, "issue number collision, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        };

        // 3. Notify. Sink failures never fail the submission.
        let notification = Notification::IssueCreated {
            issue_id: *issue.id(),
            number: issue.number(),
            creator: issue.creator().clone(),
            category: issue.category(),
            priority: issue.priority(),
            occurred_at: *issue.created_at(),
        };
        if let Err(e) = self.notifications.notify(notification).await {
            warn!(issue_id = %issue.id(), error = %e, "issue-created notification failed");
        }

        Ok(issue)
    }

    fn build_input(&self, cmd: &SubmitIssueCommand) -> ClassificationInput {
        let input = ClassificationInput::text_only(
            cmd.description.clone().unwrap_or_default(),
            cmd.address.clone(),
        );
        match &cmd.audio_ref {
            Some(audio_ref) => input.with_audio(audio_ref.clone()),
            None => input,
        }
    }
}
