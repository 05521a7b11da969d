//! ModerateCommentHandler - Command handler for admin comment decisions.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::comment::{Comment, CommentError};
use crate::domain::foundation::{ActingUser, CommentId};
use crate::ports::CommentRepository;

/// Admin decision on a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentDecision {
    Approve,
    /// Decline with a non-empty reason.
    Decline(String),
}

/// Command to moderate a comment.
#[derive(Debug, Clone)]
pub struct ModerateCommentCommand {
    pub comment_id: String,
    pub decision: CommentDecision,
}

/// Handler for comment moderation.
pub struct ModerateCommentHandler {
    comments: Arc<dyn CommentRepository>,
}

impl ModerateCommentHandler {
    pub fn new(comments: Arc<dyn CommentRepository>) -> Self {
        Self { comments }
    }

    pub async fn handle(
        &self,
        cmd: ModerateCommentCommand,
        acting: ActingUser,
    ) -> Result<Comment, CommentError> {
        if !acting.role.can_moderate() {
            return Err(CommentError::forbidden());
        }

        let comment_id = CommentId::from_str(&cmd.comment_id)
            .map_err(|_| CommentError::malformed_reference("comment_id", &cmd.comment_id))?;

        let mut comment = self
            .comments
            .find_by_id(&comment_id)
            .await?
            .ok_or(CommentError::NotFound(comment_id))?;

        match cmd.decision {
            CommentDecision::Approve => comment.approve(),
            CommentDecision::Decline(reason) => comment.decline(reason)?,
        }

        self.comments.update(&comment).await?;
        Ok(comment)
    }
}
