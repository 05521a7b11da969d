//! Comment-specific error types.

use crate::domain::foundation::{CommentId, DomainError, ErrorCode, IssueId};

/// Comment-specific errors surfaced by the comment handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentError {
    /// Comment was not found.
    NotFound(CommentId),
    /// The issue the comment targets was not found.
    IssueNotFound(IssueId),
    /// Acting user lacks the required role.
    Forbidden,
    /// A supplied identifier could not be parsed.
    MalformedReference { field: String, value: String },
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl CommentError {
    pub fn not_found(id: CommentId) -> Self {
        CommentError::NotFound(id)
    }
    pub fn issue_not_found(id: IssueId) -> Self {
        CommentError::IssueNotFound(id)
    }
    pub fn forbidden() -> Self {
        CommentError::Forbidden
    }
    pub fn malformed_reference(field: impl Into<String>, value: impl Into<String>) -> Self {
        CommentError::MalformedReference {
            field: field.into(),
            value: value.into(),
        }
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CommentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        CommentError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            CommentError::NotFound(_) => ErrorCode::CommentNotFound,
            CommentError::IssueNotFound(_) => ErrorCode::IssueNotFound,
            CommentError::Forbidden => ErrorCode::Forbidden,
            CommentError::MalformedReference { .. } => ErrorCode::MalformedReference,
            CommentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CommentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            CommentError::NotFound(id) => format!("Comment not found: {}", id),
            CommentError::IssueNotFound(id) => format!("Issue not found: {}", id),
            CommentError::Forbidden => "Permission denied".to_string(),
            CommentError::MalformedReference { field, value } => {
                format!("Malformed reference for '{}': {}", field, value)
            }
            CommentError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CommentError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CommentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CommentError {}

impl From<DomainError> for CommentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden | ErrorCode::Unauthorized => CommentError::Forbidden,
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                CommentError::ValidationFailed {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            _ => CommentError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_variants() {
        assert_eq!(
            CommentError::not_found(CommentId::new()).code(),
            ErrorCode::CommentNotFound
        );
        assert_eq!(CommentError::forbidden().code(), ErrorCode::Forbidden);
    }

    #[test]
    fn validation_domain_error_keeps_field_detail() {
        let err: CommentError = DomainError::validation("body", "Comment body cannot be empty").into();
        match err {
            CommentError::ValidationFailed { field, .. } => assert_eq!(field, "body"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
