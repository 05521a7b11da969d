//! Issue lifecycle handlers.

mod assign_team;
mod change_status;
mod list_issues;
mod moderate_visibility;
mod submit_issue;
mod upvote_issue;

pub use assign_team::{AssignTeamCommand, AssignTeamHandler};
pub use change_status::{ChangeStatusCommand, ChangeStatusHandler};
pub use list_issues::{ListIssuesHandler, ListIssuesQuery};
pub use moderate_visibility::{ModerateVisibilityCommand, ModerateVisibilityHandler};
pub use submit_issue::{SubmitIssueCommand, SubmitIssueHandler};
pub use upvote_issue::{UpvoteIssueCommand, UpvoteIssueHandler};
