//! Notification sink port.
//!
//! The core emits "issue created" and "new comment" events; delivery,
//! persistence, and read-state tracking of notifications are entirely
//! external. Sink failures are logged by callers and never fail the
//! originating operation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::classification::{Category, Priority};
use crate::domain::foundation::{CommentId, DomainError, IssueId, Timestamp, UserId};
use crate::domain::issue::IssueNumber;

/// Event handed to the notification sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// A citizen submitted a new issue.
    IssueCreated {
        issue_id: IssueId,
        number: IssueNumber,
        creator: UserId,
        category: Category,
        priority: Priority,
        occurred_at: Timestamp,
    },
    /// A comment was added to an issue.
    CommentAdded {
        comment_id: CommentId,
        issue_id: IssueId,
        author: UserId,
        occurred_at: Timestamp,
    },
}

/// Port for dispatching notifications to the external sink.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Dispatch a single notification.
    ///
    /// # Errors
    ///
    /// - `InternalError` on dispatch failure
    async fn notify(&self, notification: Notification) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_sink_is_object_safe() {
        fn _accepts_dyn(_sink: &dyn NotificationSink) {}
    }

    #[test]
    fn notification_serializes_with_type_tag() {
        let notification = Notification::CommentAdded {
            comment_id: CommentId::new(),
            issue_id: IssueId::new(),
            author: UserId::new("citizen-1").unwrap(),
            occurred_at: Timestamp::now(),
        };
        let json = serde_json::to_string(&notification).unwrap();
        assert!(json.contains("\"type\":\"comment_added\""));
    }
}
