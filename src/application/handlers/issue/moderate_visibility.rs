//! ModerateVisibilityHandler - Command handler for admin visibility decisions.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::foundation::{ActingUser, IssueId};
use crate::domain::issue::{Issue, IssueError, ModerationDecision};
use crate::ports::IssueRepository;

/// Command to apply a visibility decision to an issue.
#[derive(Debug, Clone)]
pub struct ModerateVisibilityCommand {
    pub issue_id: String,
    pub decision: ModerationDecision,
    /// Required for Reject, ignored for Approve.
    pub reason: Option<String>,
}

/// Handler for visibility moderation.
pub struct ModerateVisibilityHandler {
    issues: Arc<dyn IssueRepository>,
}

impl ModerateVisibilityHandler {
    pub fn new(issues: Arc<dyn IssueRepository>) -> Self {
        Self { issues }
    }

    pub async fn handle(
        &self,
        cmd: ModerateVisibilityCommand,
        acting: ActingUser,
    ) -> Result<Issue, IssueError> {
        if !acting.role.can_moderate() {
            return Err(IssueError::forbidden());
        }

        let issue_id = IssueId::from_str(&cmd.issue_id)
            .map_err(|_| IssueError::malformed_reference("issue_id", &cmd.issue_id))?;

        let mut issue = self
            .issues
            .find_by_id(&issue_id)
            .await?
            .ok_or(IssueError::NotFound(issue_id))?;

        issue.moderate(cmd.decision, cmd.reason)?;
        self.issues.update(&issue).await?;

        Ok(issue)
    }
}
