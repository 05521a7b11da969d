//! Issue repository port.
//!
//! Defines the contract for persisting and retrieving Issue aggregates.
//!
//! # Design
//!
//! - **Atomic upvotes**: `add_upvoter` performs the uniqueness check and the
//!   insert as one storage-level operation, so concurrent upvotes on the same
//!   issue can never race a read-then-write.
//! - **Derived counts**: implementations never store an upvote counter; the
//!   count is always the upvoter set's cardinality.

use async_trait::async_trait;

use crate::domain::classification::{Category, Priority};
use crate::domain::foundation::{DomainError, IssueId, UserId};
use crate::domain::issue::{Issue, WorkStatus};

/// Filters accepted by the issue listing query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilters {
    /// Match a specific work status.
    pub status: Option<WorkStatus>,
    /// Match a specific priority.
    pub priority: Option<Priority>,
    /// Match a specific category.
    pub category: Option<Category>,
    /// Case-insensitive substring match on the address.
    pub address_contains: Option<String>,
    /// Match issues reported by a specific user.
    pub owner: Option<UserId>,
}

impl IssueFilters {
    /// Returns true when no filter is set.
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.category.is_none()
            && self.address_contains.is_none()
            && self.owner.is_none()
    }
}

/// Repository port for Issue aggregate persistence.
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Save a newly submitted issue.
    ///
    /// # Errors
    ///
    /// - `IssueNumberConflict` if the issue number is already taken; the
    ///   caller retries with a freshly allocated number
    /// - `DatabaseError` on persistence failure
    async fn save(&self, issue: &Issue) -> Result<(), DomainError>;

    /// Update an existing issue.
    ///
    /// # Errors
    ///
    /// - `IssueNotFound` if the issue doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, issue: &Issue) -> Result<(), DomainError>;

    /// Find an issue by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &IssueId) -> Result<Option<Issue>, DomainError>;

    /// Atomically add a user to an issue's upvoter set.
    ///
    /// The duplicate check and the insert happen in one storage-level
    /// operation.
    ///
    /// # Errors
    ///
    /// - `IssueNotFound` if the issue doesn't exist
    /// - `OwnIssueUpvote` if the user reported the issue
    /// - `DuplicateUpvote` if the user has already upvoted
    /// - `DatabaseError` on persistence failure
    async fn add_upvoter(&self, id: &IssueId, user_id: &UserId) -> Result<(), DomainError>;

    /// Find issues matching the given filters, newest first.
    async fn find_with_filters(&self, filters: &IssueFilters) -> Result<Vec<Issue>, DomainError>;

    /// Hard-delete an issue.
    ///
    /// Destructive admin operation outside the normal moderation flow;
    /// rejection is a state, not an erasure.
    ///
    /// # Errors
    ///
    /// - `IssueNotFound` if the issue doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &IssueId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn IssueRepository) {}
    }

    #[test]
    fn default_filters_are_empty() {
        assert!(IssueFilters::default().is_empty());
    }

    #[test]
    fn filters_with_status_are_not_empty() {
        let filters = IssueFilters {
            status: Some(WorkStatus::Pending),
            ..Default::default()
        };
        assert!(!filters.is_empty());
    }
}
