//! Issue aggregate and its lifecycle types.

mod aggregate;
mod errors;
mod number;
mod status;

pub use aggregate::{Issue, ModerationDecision};
pub use errors::IssueError;
pub use number::IssueNumber;
pub use status::{VisibilityState, WorkStatus};
