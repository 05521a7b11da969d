//! AssignTeamHandler - Command handler for routing an issue to a team.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::foundation::{ActingUser, IssueId, TeamId};
use crate::domain::issue::{Issue, IssueError};
use crate::ports::IssueRepository;

/// Command to assign a response team to an issue.
#[derive(Debug, Clone)]
pub struct AssignTeamCommand {
    pub issue_id: String,
    pub team_id: String,
}

/// Handler for team assignment.
pub struct AssignTeamHandler {
    issues: Arc<dyn IssueRepository>,
}

impl AssignTeamHandler {
    pub fn new(issues: Arc<dyn IssueRepository>) -> Self {
        Self { issues }
    }

    pub async fn handle(
        &self,
        cmd: AssignTeamCommand,
        acting: ActingUser,
    ) -> Result<Issue, IssueError> {
        if !acting.role.can_triage() {
            return Err(IssueError::forbidden());
        }

        let issue_id = IssueId::from_str(&cmd.issue_id)
            .map_err(|_| IssueError::malformed_reference("issue_id", &cmd.issue_id))?;
        let team_id = TeamId::from_str(&cmd.team_id)
            .map_err(|_| IssueError::malformed_reference("team_id", &cmd.team_id))?;

        let mut issue = self
            .issues
            .find_by_id(&issue_id)
            .await?
            .ok_or(IssueError::NotFound(issue_id))?;

        issue.assign_team(team_id)?;
        self.issues.update(&issue).await?;

        Ok(issue)
    }
}
