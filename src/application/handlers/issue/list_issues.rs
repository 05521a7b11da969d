//! ListIssuesHandler - Query handler for browsing issues.

use std::sync::Arc;

use crate::domain::issue::{Issue, IssueError};
use crate::ports::{IssueFilters, IssueRepository};

/// Query for listing issues, newest first.
#[derive(Debug, Clone, Default)]
pub struct ListIssuesQuery {
    pub filters: IssueFilters,
}

/// Handler for the issue listing query.
pub struct ListIssuesHandler {
    issues: Arc<dyn IssueRepository>,
}

impl ListIssuesHandler {
    pub fn new(issues: Arc<dyn IssueRepository>) -> Self {
        Self { issues }
    }

    pub async fn handle(&self, query: ListIssuesQuery) -> Result<Vec<Issue>, IssueError> {
        Ok(self.issues.find_with_filters(&query.filters).await?)
    }
}
