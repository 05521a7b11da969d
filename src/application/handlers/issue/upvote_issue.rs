//! UpvoteIssueHandler - Command handler for endorsing an issue.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::foundation::{ActingUser, ErrorCode, IssueId};
use crate::domain::issue::IssueError;
use crate::ports::IssueRepository;

/// Command to upvote an issue.
#[derive(Debug, Clone)]
pub struct UpvoteIssueCommand {
    pub issue_id: String,
}

/// Handler for upvoting issues.
pub struct UpvoteIssueHandler {
    issues: Arc<dyn IssueRepository>,
}

impl UpvoteIssueHandler {
    pub fn new(issues: Arc<dyn IssueRepository>) -> Self {
        Self { issues }
    }

    pub async fn handle(
        &self,
        cmd: UpvoteIssueCommand,
        acting: ActingUser,
    ) -> Result<(), IssueError> {
        let issue_id = IssueId::from_str(&cmd.issue_id)
            .map_err(|_| IssueError::malformed_reference("issue_id", &cmd.issue_id))?;

        // The uniqueness check and the insert are one atomic repository
        // operation; a concurrent duplicate can never double-count.
        self.issues
            .add_upvoter(&issue_id, &acting.id)
            .await
            .map_err(|e| match e.code {
                ErrorCode::IssueNotFound => IssueError::not_found(issue_id),
                _ => e.into(),
            })
    }
}
