//! Foundation types shared across the domain layer.

mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{ActingUser, Role};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CommentId, IssueId, TeamId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
