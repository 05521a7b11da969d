//! Comment repository port.

use async_trait::async_trait;

use crate::domain::comment::Comment;
use crate::domain::foundation::{CommentId, DomainError, IssueId};

/// Repository port for Comment persistence.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Save a new comment.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, comment: &Comment) -> Result<(), DomainError>;

    /// Update an existing comment (moderation state only; bodies are
    /// immutable).
    ///
    /// # Errors
    ///
    /// - `CommentNotFound` if the comment doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, comment: &Comment) -> Result<(), DomainError>;

    /// Find a comment by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, DomainError>;

    /// Find all comments on an issue, oldest first.
    async fn find_by_issue(&self, issue_id: &IssueId) -> Result<Vec<Comment>, DomainError>;
}
