//! ChangeStatusHandler - Command handler for updating an issue's work status.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::foundation::{ActingUser, IssueId};
use crate::domain::issue::{Issue, IssueError, WorkStatus};
use crate::ports::IssueRepository;

/// Command to change an issue's work status.
#[derive(Debug, Clone)]
pub struct ChangeStatusCommand {
    pub issue_id: String,
    /// Requested status label ("Pending", "In Progress", "Resolved", "Closed").
    pub new_status: String,
}

/// Handler for work-status changes.
pub struct ChangeStatusHandler {
    issues: Arc<dyn IssueRepository>,
}

impl ChangeStatusHandler {
    pub fn new(issues: Arc<dyn IssueRepository>) -> Self {
        Self { issues }
    }

    pub async fn handle(
        &self,
        cmd: ChangeStatusCommand,
        acting: ActingUser,
    ) -> Result<Issue, IssueError> {
        if !acting.role.can_triage() {
            return Err(IssueError::forbidden());
        }

        let issue_id = IssueId::from_str(&cmd.issue_id)
            .map_err(|_| IssueError::malformed_reference("issue_id", &cmd.issue_id))?;

        let new_status = WorkStatus::parse(&cmd.new_status).ok_or_else(|| {
            IssueError::validation("new_status", format!("Unknown status: {}", cmd.new_status))
        })?;

        let mut issue = self
            .issues
            .find_by_id(&issue_id)
            .await?
            .ok_or(IssueError::NotFound(issue_id))?;

        issue.change_status(new_status)?;
        self.issues.update(&issue).await?;

        Ok(issue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryIssueRepository;
    use crate::domain::classification::ClassificationResult;
    use crate::domain::foundation::{Role, UserId};
    use crate::domain::issue::IssueNumber;

    fn authority() -> ActingUser {
        ActingUser::new(UserId::new("authority-1").unwrap(), Role::Authority)
    }

    fn citizen() -> ActingUser {
        ActingUser::new(UserId::new("citizen-2").unwrap(), Role::Citizen)
    }

    async fn seeded() -> (ChangeStatusHandler, Arc<InMemoryIssueRepository>, IssueId) {
        let repo = Arc::new(InMemoryIssueRepository::new());
        let issue = Issue::submit(
            IssueId::new(),
            IssueNumber::FIRST,
            Some("Pothole".to_string()),
            "5th Ave".to_string(),
            None,
            None,
            UserId::new("citizen-1").unwrap(),
            ClassificationResult::unclassified(),
        )
        .unwrap();
        let id = *issue.id();
        repo.save(&issue).await.unwrap();
        (ChangeStatusHandler::new(repo.clone()), repo, id)
    }

    fn cmd(id: IssueId, status: &str) -> ChangeStatusCommand {
        ChangeStatusCommand {
            issue_id: id.to_string(),
            new_status: status.to_string(),
        }
    }

    #[tokio::test]
    async fn authority_changes_status() {
        let (handler, repo, id) = seeded().await;

        let issue = handler.handle(cmd(id, "In Progress"), authority()).await.unwrap();
        assert_eq!(issue.work_status(), WorkStatus::InProgress);

        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.work_status(), WorkStatus::InProgress);
    }

    #[tokio::test]
    async fn citizen_is_forbidden() {
        let (handler, _, id) = seeded().await;
        let result = handler.handle(cmd(id, "Resolved"), citizen()).await;
        assert_eq!(result, Err(IssueError::Forbidden));
    }

    #[tokio::test]
    async fn unknown_status_label_fails_validation() {
        let (handler, _, id) = seeded().await;
        let result = handler.handle(cmd(id, "Archived"), authority()).await;
        assert!(matches!(result, Err(IssueError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn pending_issue_can_be_closed_directly() {
        let (handler, _, id) = seeded().await;
        let issue = handler.handle(cmd(id, "Closed"), authority()).await.unwrap();
        assert_eq!(issue.work_status(), WorkStatus::Closed);
    }

    #[tokio::test]
    async fn closed_issue_rejects_further_changes() {
        let (handler, _, id) = seeded().await;
        handler.handle(cmd(id, "Closed"), authority()).await.unwrap();

        let result = handler.handle(cmd(id, "Pending"), authority()).await;
        assert_eq!(result, Err(IssueError::Closed));
    }

    #[tokio::test]
    async fn absent_issue_is_not_found() {
        let (handler, _, _) = seeded().await;
        let missing = IssueId::new();
        let result = handler.handle(cmd(missing, "Resolved"), authority()).await;
        assert_eq!(result, Err(IssueError::NotFound(missing)));
    }
}
