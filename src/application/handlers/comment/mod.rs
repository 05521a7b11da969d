//! Comment handlers.

mod add_comment;
mod moderate_comment;

pub use add_comment::{AddCommentCommand, AddCommentHandler};
pub use moderate_comment::{CommentDecision, ModerateCommentCommand, ModerateCommentHandler};
