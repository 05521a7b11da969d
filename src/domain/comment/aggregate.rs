//! Comment aggregate entity.
//!
//! A comment is a free-text note attached to exactly one issue, owned by
//! exactly one author. Comments are never edited after creation, only
//! moderated or left as-is.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CommentId, DomainError, IssueId, Timestamp, UserId};

/// Moderation state of a comment, mirroring the issue visibility concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationState {
    Pending,
    Approved,
    Declined,
}

impl ModerationState {
    /// Storage key used by the persistence layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationState::Pending => "pending",
            ModerationState::Approved => "approved",
            ModerationState::Declined => "declined",
        }
    }
}

impl Default for ModerationState {
    fn default() -> Self {
        ModerationState::Pending
    }
}

/// Comment aggregate - a note attached to one issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier for this comment.
    id: CommentId,

    /// Issue this comment belongs to.
    issue_id: IssueId,

    /// Author of the comment (any authenticated role).
    author: UserId,

    /// Comment body. Immutable after creation.
    body: String,

    /// Current moderation state.
    moderation: ModerationState,

    /// Reason recorded when the comment was declined.
    declined_reason: Option<String>,

    /// When the comment was created.
    created_at: Timestamp,
}

impl Comment {
    /// Creates a new pending comment.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the body is empty
    pub fn new(
        id: CommentId,
        issue_id: IssueId,
        author: UserId,
        body: String,
    ) -> Result<Self, DomainError> {
        if body.trim().is_empty() {
            return Err(DomainError::validation("body", "Comment body cannot be empty"));
        }

        Ok(Self {
            id,
            issue_id,
            author,
            body,
            moderation: ModerationState::Pending,
            declined_reason: None,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute a comment from persistence (no validation).
    pub fn reconstitute(
        id: CommentId,
        issue_id: IssueId,
        author: UserId,
        body: String,
        moderation: ModerationState,
        declined_reason: Option<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            issue_id,
            author,
            body,
            moderation,
            declined_reason,
            created_at,
        }
    }

    /// Returns the comment ID.
    pub fn id(&self) -> &CommentId {
        &self.id
    }

    /// Returns the owning issue's ID.
    pub fn issue_id(&self) -> &IssueId {
        &self.issue_id
    }

    /// Returns the author's user ID.
    pub fn author(&self) -> &UserId {
        &self.author
    }

    /// Returns the comment body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the current moderation state.
    pub fn moderation(&self) -> ModerationState {
        self.moderation
    }

    /// Returns the declined reason, if the comment was declined.
    pub fn declined_reason(&self) -> Option<&str> {
        self.declined_reason.as_deref()
    }

    /// Returns when the comment was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Approves the comment, clearing any prior declined reason.
    pub fn approve(&mut self) {
        self.moderation = ModerationState::Approved;
        self.declined_reason = None;
    }

    /// Declines the comment with a reason.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the reason is empty
    pub fn decline(&mut self, reason: String) -> Result<(), DomainError> {
        if reason.trim().is_empty() {
            return Err(DomainError::validation(
                "reason",
                "Declining a comment requires a non-empty reason",
            ));
        }
        self.moderation = ModerationState::Declined;
        self.declined_reason = Some(reason);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_comment() -> Comment {
        Comment::new(
            CommentId::new(),
            IssueId::new(),
            UserId::new("authority-1").unwrap(),
            "Crew dispatched, barrier in place.".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn new_comment_starts_pending() {
        let comment = test_comment();
        assert_eq!(comment.moderation(), ModerationState::Pending);
        assert!(comment.declined_reason().is_none());
    }

    #[test]
    fn new_comment_rejects_empty_body() {
        let result = Comment::new(
            CommentId::new(),
            IssueId::new(),
            UserId::new("citizen-1").unwrap(),
            "   ".to_string(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn approve_sets_state_and_clears_reason() {
        let mut comment = test_comment();
        comment.decline("off topic".to_string()).unwrap();
        comment.approve();
        assert_eq!(comment.moderation(), ModerationState::Approved);
        assert!(comment.declined_reason().is_none());
    }

    #[test]
    fn decline_records_reason() {
        let mut comment = test_comment();
        comment.decline("abusive language".to_string()).unwrap();
        assert_eq!(comment.moderation(), ModerationState::Declined);
        assert_eq!(comment.declined_reason(), Some("abusive language"));
    }

    #[test]
    fn decline_without_reason_fails() {
        let mut comment = test_comment();
        let result = comment.decline("  ".to_string());
        assert!(result.is_err());
        assert_eq!(comment.moderation(), ModerationState::Pending);
    }
}
