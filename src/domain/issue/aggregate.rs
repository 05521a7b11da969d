//! Issue aggregate entity.
//!
//! Issues are citizen-reported urban problem records. The aggregate owns the
//! work-status and visibility state machines, the upvoter set, and the team
//! assignment, and enforces every invariant at the lifecycle boundary.
//!
//! # Invariants
//!
//! - `number` is unique and assigned exactly once at creation
//! - the creator never appears in the upvoter set
//! - each user appears in the upvoter set at most once
//! - a rejection always carries a non-empty reason
//! - once work status is Closed, no status or team mutation is permitted

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::classification::{Category, ClassificationResult, Priority};
use crate::domain::foundation::{
    DomainError, ErrorCode, IssueId, StateMachine, TeamId, Timestamp, UserId,
};

use super::number::IssueNumber;
use super::status::{VisibilityState, WorkStatus};

/// Admin moderation decision on an issue's visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationDecision {
    Approve,
    Reject,
}

/// Issue aggregate - a citizen-reported urban problem record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Unique identifier for this issue.
    id: IssueId,

    /// Sequential human-facing issue number.
    number: IssueNumber,

    /// Free-text problem description (optional when photo or audio present).
    description: Option<String>,

    /// Free-text address of the reported problem.
    address: String,

    /// Reference to an uploaded photo, if any.
    photo_ref: Option<String>,

    /// Reference to an uploaded audio recording, if any.
    audio_ref: Option<String>,

    /// Transcription derived from the audio recording, if any.
    transcription: Option<String>,

    /// Classified category.
    category: Category,

    /// Classified priority.
    priority: Priority,

    /// Operational progress.
    work_status: WorkStatus,

    /// Moderation status controlling public exposure.
    visibility: VisibilityState,

    /// Reason recorded when visibility is Rejected.
    rejection_reason: Option<String>,

    /// Citizen who reported the issue. Immutable after creation.
    creator: UserId,

    /// Assigned response team, if any.
    team: Option<TeamId>,

    /// Users who have endorsed this issue's importance.
    upvoters: BTreeSet<UserId>,

    /// When the issue was reported.
    created_at: Timestamp,

    /// When the issue was last mutated.
    updated_at: Timestamp,
}

impl Issue {
    /// Creates a newly submitted issue in Review/Pending state.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if address is empty, or none of description,
    ///   photo, and audio is present
    pub fn submit(
        id: IssueId,
        number: IssueNumber,
        description: Option<String>,
        address: String,
        photo_ref: Option<String>,
        audio_ref: Option<String>,
        creator: UserId,
        classification: ClassificationResult,
    ) -> Result<Self, DomainError> {
        if address.trim().is_empty() {
            return Err(DomainError::validation("address", "Address is required"));
        }

        let has_description = description.as_deref().is_some_and(|d| !d.trim().is_empty());
        if !has_description && photo_ref.is_none() && audio_ref.is_none() {
            return Err(DomainError::validation(
                "description",
                "At least one of description, photo, or audio is required",
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            number,
            description: description.filter(|d| !d.trim().is_empty()),
            address,
            photo_ref,
            audio_ref,
            transcription: classification.transcription,
            category: classification.category,
            priority: classification.priority,
            work_status: WorkStatus::Pending,
            visibility: VisibilityState::Review,
            rejection_reason: None,
            creator,
            team: None,
            upvoters: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute an issue from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: IssueId,
        number: IssueNumber,
        description: Option<String>,
        address: String,
        photo_ref: Option<String>,
        audio_ref: Option<String>,
        transcription: Option<String>,
        category: Category,
        priority: Priority,
        work_status: WorkStatus,
        visibility: VisibilityState,
        rejection_reason: Option<String>,
        creator: UserId,
        team: Option<TeamId>,
        upvoters: BTreeSet<UserId>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            number,
            description,
            address,
            photo_ref,
            audio_ref,
            transcription,
            category,
            priority,
            work_status,
            visibility,
            rejection_reason,
            creator,
            team,
            upvoters,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the issue ID.
    pub fn id(&self) -> &IssueId {
        &self.id
    }

    /// Returns the human-facing issue number.
    pub fn number(&self) -> IssueNumber {
        self.number
    }

    /// Returns the description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the photo reference, if any.
    pub fn photo_ref(&self) -> Option<&str> {
        self.photo_ref.as_deref()
    }

    /// Returns the audio reference, if any.
    pub fn audio_ref(&self) -> Option<&str> {
        self.audio_ref.as_deref()
    }

    /// Returns the derived transcription, if any.
    pub fn transcription(&self) -> Option<&str> {
        self.transcription.as_deref()
    }

    /// Returns the classified category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns the classified priority.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the current work status.
    pub fn work_status(&self) -> WorkStatus {
        self.work_status
    }

    /// Returns the current visibility state.
    pub fn visibility(&self) -> VisibilityState {
        self.visibility
    }

    /// Returns the rejection reason, if the issue was rejected.
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    /// Returns the reporting citizen's user ID.
    pub fn creator(&self) -> &UserId {
        &self.creator
    }

    /// Returns the assigned team, if any.
    pub fn team(&self) -> Option<&TeamId> {
        self.team.as_ref()
    }

    /// Returns the upvoter set.
    pub fn upvoters(&self) -> &BTreeSet<UserId> {
        &self.upvoters
    }

    /// Derived upvote count: always the upvoter set's cardinality, never a
    /// stored counter.
    pub fn upvote_count(&self) -> usize {
        self.upvoters.len()
    }

    /// Returns when the issue was reported.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the issue was last mutated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Checks if the given user reported this issue.
    pub fn is_creator(&self, user_id: &UserId) -> bool {
        &self.creator == user_id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Records an upvote by the given user.
    ///
    /// # Errors
    ///
    /// - `OwnIssueUpvote` if the user reported this issue
    /// - `DuplicateUpvote` if the user has already upvoted
    pub fn upvote(&mut self, user_id: UserId) -> Result<(), DomainError> {
        if self.is_creator(&user_id) {
            return Err(DomainError::new(
                ErrorCode::OwnIssueUpvote,
                "Cannot upvote own issue",
            ));
        }
        if !self.upvoters.insert(user_id) {
            return Err(DomainError::new(
                ErrorCode::DuplicateUpvote,
                "User has already upvoted this issue",
            ));
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Changes the work status.
    ///
    /// # Errors
    ///
    /// - `IssueClosed` if the issue is already closed
    pub fn change_status(&mut self, new_status: WorkStatus) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.work_status = new_status;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Assigns a response team. Does not change work status.
    ///
    /// # Errors
    ///
    /// - `IssueClosed` if the issue is already closed
    pub fn assign_team(&mut self, team_id: TeamId) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.team = Some(team_id);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Applies an admin moderation decision.
    ///
    /// Reject requires a non-empty reason and records it; Approve clears any
    /// prior reason.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if rejecting without a reason
    pub fn moderate(
        &mut self,
        decision: ModerationDecision,
        reason: Option<String>,
    ) -> Result<(), DomainError> {
        match decision {
            ModerationDecision::Approve => {
                self.visibility = VisibilityState::Approved;
                self.rejection_reason = None;
            }
            ModerationDecision::Reject => {
                let reason = reason
                    .filter(|r| !r.trim().is_empty())
                    .ok_or_else(|| {
                        DomainError::validation("reason", "Rejection requires a non-empty reason")
                    })?;
                self.visibility = VisibilityState::Rejected;
                self.rejection_reason = Some(reason);
            }
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates that the work status still permits mutation.
    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.work_status.is_terminal() {
            Err(DomainError::new(
                ErrorCode::IssueClosed,
                "Issue is closed and can no longer be modified",
            ))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creator() -> UserId {
        UserId::new("citizen-1").unwrap()
    }

    fn other_user() -> UserId {
        UserId::new("citizen-2").unwrap()
    }

    fn test_issue() -> Issue {
        Issue::submit(
            IssueId::new(),
            IssueNumber::FIRST,
            Some("Pothole on the corner".to_string()),
            "5th Ave".to_string(),
            None,
            None,
            creator(),
            ClassificationResult::unclassified(),
        )
        .unwrap()
    }

    // Construction tests

    #[test]
    fn submitted_issue_starts_pending_and_in_review() {
        let issue = test_issue();
        assert_eq!(issue.work_status(), WorkStatus::Pending);
        assert_eq!(issue.visibility(), VisibilityState::Review);
        assert_eq!(issue.upvote_count(), 0);
        assert!(issue.team().is_none());
        assert!(issue.rejection_reason().is_none());
    }

    #[test]
    fn submit_rejects_empty_address() {
        let result = Issue::submit(
            IssueId::new(),
            IssueNumber::FIRST,
            Some("Broken streetlight".to_string()),
            "   ".to_string(),
            None,
            None,
            creator(),
            ClassificationResult::unclassified(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn submit_rejects_when_no_content_present() {
        let result = Issue::submit(
            IssueId::new(),
            IssueNumber::FIRST,
            None,
            "5th Ave".to_string(),
            None,
            None,
            creator(),
            ClassificationResult::unclassified(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn submit_accepts_photo_without_description() {
        let issue = Issue::submit(
            IssueId::new(),
            IssueNumber::FIRST,
            None,
            "5th Ave".to_string(),
            Some("photos/abc.jpg".to_string()),
            None,
            creator(),
            ClassificationResult::unclassified(),
        )
        .unwrap();
        assert!(issue.description().is_none());
        assert_eq!(issue.photo_ref(), Some("photos/abc.jpg"));
    }

    #[test]
    fn submit_treats_blank_description_as_absent() {
        let result = Issue::submit(
            IssueId::new(),
            IssueNumber::FIRST,
            Some("   ".to_string()),
            "5th Ave".to_string(),
            None,
            None,
            creator(),
            ClassificationResult::unclassified(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn submit_folds_classification_into_issue() {
        let classification = ClassificationResult::new(Category::RoadMaintenance, Priority::Critical)
            .with_transcription("urgent pothole");
        let issue = Issue::submit(
            IssueId::new(),
            IssueNumber::FIRST,
            None,
            "5th Ave".to_string(),
            None,
            Some("audio/rec.ogg".to_string()),
            creator(),
            classification,
        )
        .unwrap();
        assert_eq!(issue.category(), Category::RoadMaintenance);
        assert_eq!(issue.priority(), Priority::Critical);
        assert_eq!(issue.transcription(), Some("urgent pothole"));
    }

    // Upvote tests

    #[test]
    fn upvote_by_other_user_succeeds() {
        let mut issue = test_issue();
        issue.upvote(other_user()).unwrap();
        assert_eq!(issue.upvote_count(), 1);
    }

    #[test]
    fn upvote_by_creator_fails() {
        let mut issue = test_issue();
        let err = issue.upvote(creator()).unwrap_err();
        assert_eq!(err.code, ErrorCode::OwnIssueUpvote);
        assert_eq!(issue.upvote_count(), 0);
    }

    #[test]
    fn duplicate_upvote_fails_and_does_not_double_count() {
        let mut issue = test_issue();
        issue.upvote(other_user()).unwrap();
        let err = issue.upvote(other_user()).unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateUpvote);
        assert_eq!(issue.upvote_count(), 1);
    }

    #[test]
    fn upvote_count_equals_set_cardinality() {
        let mut issue = test_issue();
        for i in 0..5 {
            issue.upvote(UserId::new(format!("voter-{}", i)).unwrap()).unwrap();
        }
        assert_eq!(issue.upvote_count(), issue.upvoters().len());
        assert_eq!(issue.upvote_count(), 5);
    }

    // Status tests

    #[test]
    fn change_status_overwrites_when_open() {
        let mut issue = test_issue();
        issue.change_status(WorkStatus::InProgress).unwrap();
        assert_eq!(issue.work_status(), WorkStatus::InProgress);
        issue.change_status(WorkStatus::Resolved).unwrap();
        assert_eq!(issue.work_status(), WorkStatus::Resolved);
    }

    #[test]
    fn change_status_fails_once_closed() {
        let mut issue = test_issue();
        issue.change_status(WorkStatus::Closed).unwrap();
        let err = issue.change_status(WorkStatus::Pending).unwrap_err();
        assert_eq!(err.code, ErrorCode::IssueClosed);
        assert_eq!(issue.work_status(), WorkStatus::Closed);
    }

    #[test]
    fn pending_issue_can_be_closed_directly() {
        let mut issue = test_issue();
        issue.change_status(WorkStatus::Closed).unwrap();
        assert_eq!(issue.work_status(), WorkStatus::Closed);
    }

    // Team assignment tests

    #[test]
    fn assign_team_sets_reference_without_status_change() {
        let mut issue = test_issue();
        let team = TeamId::new();
        issue.assign_team(team).unwrap();
        assert_eq!(issue.team(), Some(&team));
        assert_eq!(issue.work_status(), WorkStatus::Pending);
    }

    #[test]
    fn assign_team_fails_once_closed() {
        let mut issue = test_issue();
        issue.change_status(WorkStatus::Closed).unwrap();
        let err = issue.assign_team(TeamId::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::IssueClosed);
        assert!(issue.team().is_none());
    }

    // Moderation tests

    #[test]
    fn reject_without_reason_fails() {
        let mut issue = test_issue();
        let err = issue.moderate(ModerationDecision::Reject, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(issue.visibility(), VisibilityState::Review);
    }

    #[test]
    fn reject_with_blank_reason_fails() {
        let mut issue = test_issue();
        let result = issue.moderate(ModerationDecision::Reject, Some("  ".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn reject_with_reason_records_it() {
        let mut issue = test_issue();
        issue
            .moderate(ModerationDecision::Reject, Some("spam".to_string()))
            .unwrap();
        assert_eq!(issue.visibility(), VisibilityState::Rejected);
        assert_eq!(issue.rejection_reason(), Some("spam"));
    }

    #[test]
    fn approve_clears_prior_rejection_reason() {
        let mut issue = test_issue();
        issue
            .moderate(ModerationDecision::Reject, Some("spam".to_string()))
            .unwrap();
        issue.moderate(ModerationDecision::Approve, None).unwrap();
        assert_eq!(issue.visibility(), VisibilityState::Approved);
        assert!(issue.rejection_reason().is_none());
    }

    #[test]
    fn moderation_is_independent_of_work_status() {
        let mut issue = test_issue();
        issue.change_status(WorkStatus::Closed).unwrap();
        issue.moderate(ModerationDecision::Approve, None).unwrap();
        assert_eq!(issue.visibility(), VisibilityState::Approved);
    }
}
