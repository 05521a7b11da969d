//! In-memory issue repository for testing and local runs.
//!
//! All mutations on one issue happen under a single lock, so the
//! duplicate-upvote check and the insert are atomic with respect to
//! concurrent upvotes, as the port requires.
//!
//! # Panics
//!
//! Methods panic if the internal lock is poisoned. This is acceptable for
//! test code; production deployments use the Postgres adapter.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, IssueId, UserId};
use crate::domain::issue::Issue;
use crate::ports::{IssueFilters, IssueRepository};

/// In-memory implementation of IssueRepository.
#[derive(Default)]
pub struct InMemoryIssueRepository {
    issues: Mutex<HashMap<IssueId, Issue>>,
}

impl InMemoryIssueRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored issues (for test assertions).
    pub fn issue_count(&self) -> usize {
        self.issues
            .lock()
            .expect("InMemoryIssueRepository: lock poisoned")
            .len()
    }

    fn matches(issue: &Issue, filters: &IssueFilters) -> bool {
        if let Some(status) = filters.status {
            if issue.work_status() != status {
                return false;
            }
        }
        if let Some(priority) = filters.priority {
            if issue.priority() != priority {
                return false;
            }
        }
        if let Some(category) = filters.category {
            if issue.category() != category {
                return false;
            }
        }
        if let Some(ref needle) = filters.address_contains {
            if !issue
                .address()
                .to_ascii_lowercase()
                .contains(&needle.to_ascii_lowercase())
            {
                return false;
            }
        }
        if let Some(ref owner) = filters.owner {
            if issue.creator() != owner {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl IssueRepository for InMemoryIssueRepository {
    async fn save(&self, issue: &Issue) -> Result<(), DomainError> {
        let mut issues = self
            .issues
            .lock()
            .expect("InMemoryIssueRepository: lock poisoned");

        if issues.values().any(|i| i.number() == issue.number()) {
            return Err(DomainError::new(
                ErrorCode::IssueNumberConflict,
                format!("Issue number already taken: {}", issue.number()),
            ));
        }

        issues.insert(*issue.id(), issue.clone());
        Ok(())
    }

    async fn update(&self, issue: &Issue) -> Result<(), DomainError> {
        let mut issues = self
            .issues
            .lock()
            .expect("InMemoryIssueRepository: lock poisoned");

        let existing = issues.get(issue.id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::IssueNotFound,
                format!("Issue not found: {}", issue.id()),
            )
            .with_detail("issue_id", issue.id().to_string())
        })?;

        // The stored upvoter set is authoritative: upvotes go through
        // add_upvoter, so a stale caller snapshot must not overwrite them.
        let merged = Issue::reconstitute(
            *issue.id(),
            issue.number(),
            issue.description().map(String::from),
            issue.address().to_string(),
            issue.photo_ref().map(String::from),
            issue.audio_ref().map(String::from),
            issue.transcription().map(String::from),
            issue.category(),
            issue.priority(),
            issue.work_status(),
            issue.visibility(),
            issue.rejection_reason().map(String::from),
            issue.creator().clone(),
            issue.team().copied(),
            existing.upvoters().clone(),
            *issue.created_at(),
            *issue.updated_at(),
        );
        issues.insert(*issue.id(), merged);
        Ok(())
    }

    async fn find_by_id(&self, id: &IssueId) -> Result<Option<Issue>, DomainError> {
        let issues = self
            .issues
            .lock()
            .expect("InMemoryIssueRepository: lock poisoned");
        Ok(issues.get(id).cloned())
    }

    async fn add_upvoter(&self, id: &IssueId, user_id: &UserId) -> Result<(), DomainError> {
        let mut issues = self
            .issues
            .lock()
            .expect("InMemoryIssueRepository: lock poisoned");

        let issue = issues.get_mut(id).ok_or_else(|| {
            DomainError::new(ErrorCode::IssueNotFound, format!("Issue not found: {}", id))
                .with_detail("issue_id", id.to_string())
        })?;

        issue.upvote(user_id.clone())
    }

    async fn find_with_filters(&self, filters: &IssueFilters) -> Result<Vec<Issue>, DomainError> {
        let issues = self
            .issues
            .lock()
            .expect("InMemoryIssueRepository: lock poisoned");

        let mut matching: Vec<Issue> = issues
            .values()
            .filter(|issue| Self::matches(issue, filters))
            .cloned()
            .collect();

        // Newest first; issue numbers break ties deterministically.
        matching.sort_by(|a, b| {
            b.created_at()
                .cmp(a.created_at())
                .then_with(|| b.number().cmp(&a.number()))
        });
        Ok(matching)
    }

    async fn delete(&self, id: &IssueId) -> Result<(), DomainError> {
        let mut issues = self
            .issues
            .lock()
            .expect("InMemoryIssueRepository: lock poisoned");

        if issues.remove(id).is_none() {
            return Err(DomainError::new(
                ErrorCode::IssueNotFound,
                format!("Issue not found: {}", id),
            )
            .with_detail("issue_id", id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classification::{ClassificationResult, Priority};
    use crate::domain::issue::{IssueNumber, WorkStatus};

    fn issue(number: u32, creator: &str, address: &str) -> Issue {
        Issue::submit(
            IssueId::new(),
            IssueNumber::new(number),
            Some("something broken".to_string()),
            address.to_string(),
            None,
            None,
            UserId::new(creator).unwrap(),
            ClassificationResult::unclassified(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn save_and_find_round_trips() {
        let repo = InMemoryIssueRepository::new();
        let issue = issue(1000, "citizen-1", "5th Ave");
        repo.save(&issue).await.unwrap();

        let found = repo.find_by_id(issue.id()).await.unwrap().unwrap();
        assert_eq!(found, issue);
    }

    #[tokio::test]
    async fn save_rejects_duplicate_number() {
        let repo = InMemoryIssueRepository::new();
        repo.save(&issue(1000, "citizen-1", "5th Ave")).await.unwrap();

        let err = repo
            .save(&issue(1000, "citizen-2", "Oak St"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::IssueNumberConflict);
    }

    #[tokio::test]
    async fn update_requires_existing_issue() {
        let repo = InMemoryIssueRepository::new();
        let missing = issue(1000, "citizen-1", "5th Ave");
        let err = repo.update(&missing).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::IssueNotFound);
        assert_eq!(
            err.details.get("issue_id"),
            Some(&missing.id().to_string())
        );
    }

    #[tokio::test]
    async fn update_with_stale_snapshot_keeps_concurrent_upvotes() {
        let repo = InMemoryIssueRepository::new();
        let issue = issue(1000, "citizen-1", "5th Ave");
        repo.save(&issue).await.unwrap();

        // Snapshot taken before another user's upvote lands.
        let mut stale = repo.find_by_id(issue.id()).await.unwrap().unwrap();
        repo.add_upvoter(issue.id(), &UserId::new("citizen-2").unwrap())
            .await
            .unwrap();

        stale.change_status(WorkStatus::InProgress).unwrap();
        repo.update(&stale).await.unwrap();

        let stored = repo.find_by_id(issue.id()).await.unwrap().unwrap();
        assert_eq!(stored.work_status(), WorkStatus::InProgress);
        assert_eq!(stored.upvote_count(), 1);
    }

    #[tokio::test]
    async fn add_upvoter_is_rejected_for_missing_issue() {
        let repo = InMemoryIssueRepository::new();
        let err = repo
            .add_upvoter(&IssueId::new(), &UserId::new("citizen-2").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::IssueNotFound);
    }

    #[tokio::test]
    async fn add_upvoter_detects_duplicates() {
        let repo = InMemoryIssueRepository::new();
        let issue = issue(1000, "citizen-1", "5th Ave");
        repo.save(&issue).await.unwrap();

        let voter = UserId::new("citizen-2").unwrap();
        repo.add_upvoter(issue.id(), &voter).await.unwrap();
        let err = repo.add_upvoter(issue.id(), &voter).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateUpvote);

        let stored = repo.find_by_id(issue.id()).await.unwrap().unwrap();
        assert_eq!(stored.upvote_count(), 1);
    }

    #[tokio::test]
    async fn filters_match_status_and_address() {
        let repo = InMemoryIssueRepository::new();
        let mut resolved = issue(1000, "citizen-1", "5th Ave");
        resolved.change_status(WorkStatus::Resolved).unwrap();
        repo.save(&resolved).await.unwrap();
        repo.save(&issue(1001, "citizen-2", "Oak St")).await.unwrap();

        let by_status = repo
            .find_with_filters(&IssueFilters {
                status: Some(WorkStatus::Resolved),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_status.len(), 1);
        assert_eq!(by_status[0].number(), IssueNumber::new(1000));

        let by_address = repo
            .find_with_filters(&IssueFilters {
                address_contains: Some("oak".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_address.len(), 1);
        assert_eq!(by_address[0].address(), "Oak St");
    }

    #[tokio::test]
    async fn listing_is_newest_first() {
        let repo = InMemoryIssueRepository::new();
        repo.save(&issue(1000, "citizen-1", "5th Ave")).await.unwrap();
        repo.save(&issue(1001, "citizen-1", "Oak St")).await.unwrap();
        repo.save(&issue(1002, "citizen-1", "Main St")).await.unwrap();

        let all = repo.find_with_filters(&IssueFilters::default()).await.unwrap();
        let numbers: Vec<u32> = all.iter().map(|i| i.number().value()).collect();
        assert_eq!(numbers, vec![1002, 1001, 1000]);
    }

    #[tokio::test]
    async fn delete_removes_issue() {
        let repo = InMemoryIssueRepository::new();
        let issue = issue(1000, "citizen-1", "5th Ave");
        repo.save(&issue).await.unwrap();
        repo.delete(issue.id()).await.unwrap();
        assert!(repo.find_by_id(issue.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn priority_filter_matches_default() {
        let repo = InMemoryIssueRepository::new();
        repo.save(&issue(1000, "citizen-1", "5th Ave")).await.unwrap();

        let matching = repo
            .find_with_filters(&IssueFilters {
                priority: Some(Priority::Moderate),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(matching.len(), 1);

        let none = repo
            .find_with_filters(&IssueFilters {
                priority: Some(Priority::Critical),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
