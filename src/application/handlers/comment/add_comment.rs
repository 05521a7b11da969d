//! AddCommentHandler - Command handler for commenting on an issue.

use std::str::FromStr;
use std::sync::Arc;

use tracing::warn;

use crate::domain::comment::{Comment, CommentError};
use crate::domain::foundation::{ActingUser, CommentId, IssueId};
use crate::ports::{CommentRepository, IssueRepository, Notification, NotificationSink};

/// Command to add a comment to an issue.
#[derive(Debug, Clone)]
pub struct AddCommentCommand {
    pub issue_id: String,
    pub body: String,
}

/// Handler for adding comments.
pub struct AddCommentHandler {
    comments: Arc<dyn CommentRepository>,
    issues: Arc<dyn IssueRepository>,
    notifications: Arc<dyn NotificationSink>,
}

impl AddCommentHandler {
    pub fn new(
        comments: Arc<dyn CommentRepository>,
        issues: Arc<dyn IssueRepository>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            comments,
            issues,
            notifications,
        }
    }

    pub async fn handle(
        &self,
        cmd: AddCommentCommand,
        acting: ActingUser,
    ) -> Result<Comment, CommentError> {
        let issue_id = IssueId::from_str(&cmd.issue_id)
            .map_err(|_| CommentError::malformed_reference("issue_id", &cmd.issue_id))?;

        if self.issues.find_by_id(&issue_id).await?.is_none() {
            return Err(CommentError::issue_not_found(issue_id));
        }

        let comment = Comment::new(CommentId::new(), issue_id, acting.id, cmd.body)?;
        self.comments.save(&comment).await?;

        let notification = Notification::CommentAdded {
            comment_id: *comment.id(),
            issue_id,
            author: comment.author().clone(),
            occurred_at: *comment.created_at(),
        };
        if let Err(e) = self.notifications.notify(notification).await {
            warn!(comment_id = %comment.id(), error = %e, "comment-added notification failed");
        }

        Ok(comment)
    }
}
