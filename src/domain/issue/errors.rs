//! Issue-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, IssueId};

/// Issue-specific errors surfaced by the lifecycle handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueError {
    /// Issue was not found.
    NotFound(IssueId),
    /// Acting user lacks the required role.
    Forbidden,
    /// Creator attempted to upvote their own issue.
    OwnIssueUpvote,
    /// User has already upvoted this issue.
    DuplicateUpvote,
    /// Issue is closed; status and team mutations are no longer permitted.
    Closed,
    /// A supplied identifier could not be parsed.
    MalformedReference { field: String, value: String },
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Unique issue-number collision; the caller must retry with a fresh number.
    NumberConflict,
    /// Infrastructure error.
    Infrastructure(String),
}

impl IssueError {
    pub fn not_found(id: IssueId) -> Self {
        IssueError::NotFound(id)
    }
    pub fn forbidden() -> Self {
        IssueError::Forbidden
    }
    pub fn malformed_reference(field: impl Into<String>, value: impl Into<String>) -> Self {
        IssueError::MalformedReference {
            field: field.into(),
            value: value.into(),
        }
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        IssueError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        IssueError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            IssueError::NotFound(_) => ErrorCode::IssueNotFound,
            IssueError::Forbidden => ErrorCode::Forbidden,
            IssueError::OwnIssueUpvote => ErrorCode::OwnIssueUpvote,
            IssueError::DuplicateUpvote => ErrorCode::DuplicateUpvote,
            IssueError::Closed => ErrorCode::IssueClosed,
            IssueError::MalformedReference { .. } => ErrorCode::MalformedReference,
            IssueError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            IssueError::NumberConflict => ErrorCode::IssueNumberConflict,
            IssueError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            IssueError::NotFound(id) => format!("Issue not found: {}", id),
            IssueError::Forbidden => "Permission denied".to_string(),
            IssueError::OwnIssueUpvote => "Cannot upvote own issue".to_string(),
            IssueError::DuplicateUpvote => "User has already upvoted this issue".to_string(),
            IssueError::Closed => "Issue is closed and can no longer be modified".to_string(),
            IssueError::MalformedReference { field, value } => {
                format!("Malformed reference for '{}': {}", field, value)
            }
            IssueError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            IssueError::NumberConflict => "Issue number already taken".to_string(),
            IssueError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for IssueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for IssueError {}

impl From<DomainError> for IssueError {
    fn from(err: DomainError) -> Self {
        match err.code {
            // Repositories attach the offending id as a detail; without it
            // there is no id to report, so the error stays infrastructural.
            ErrorCode::IssueNotFound => match err.details.get("issue_id").and_then(|v| v.parse().ok()) {
                Some(id) => IssueError::NotFound(id),
                None => IssueError::Infrastructure(err.to_string()),
            },
            ErrorCode::Forbidden | ErrorCode::Unauthorized => IssueError::Forbidden,
            ErrorCode::OwnIssueUpvote => IssueError::OwnIssueUpvote,
            ErrorCode::DuplicateUpvote => IssueError::DuplicateUpvote,
            ErrorCode::IssueClosed => IssueError::Closed,
            ErrorCode::MalformedReference => IssueError::MalformedReference {
                field: "unknown".to_string(),
                value: err.to_string(),
            },
            ErrorCode::IssueNumberConflict => IssueError::NumberConflict,
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                IssueError::ValidationFailed {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            _ => IssueError::Infrastructure(err.to_string()),
        }
    }
}
