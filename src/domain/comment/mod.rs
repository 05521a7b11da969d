//! Comment aggregate and moderation types.

mod aggregate;
mod errors;

pub use aggregate::{Comment, ModerationState};
pub use errors::CommentError;
