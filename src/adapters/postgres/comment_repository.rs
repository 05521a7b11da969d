//! PostgreSQL implementation of CommentRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::comment::{Comment, ModerationState};
use crate::domain::foundation::{
    CommentId, DomainError, ErrorCode, IssueId, Timestamp, UserId,
};
use crate::ports::CommentRepository;

/// PostgreSQL implementation of CommentRepository.
#[derive(Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    /// Creates a new PostgresCommentRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn save(&self, comment: &Comment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, issue_id, author, body, moderation, declined_reason, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(comment.id().as_uuid())
        .bind(comment.issue_id().as_uuid())
        .bind(comment.author().as_str())
        .bind(comment.body())
        .bind(comment.moderation().as_str())
        .bind(comment.declined_reason())
        .bind(comment.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert comment: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, comment: &Comment) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE comments SET moderation = $2, declined_reason = $3
            WHERE id = $1
            "#,
        )
        .bind(comment.id().as_uuid())
        .bind(comment.moderation().as_str())
        .bind(comment.declined_reason())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update comment: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CommentNotFound,
                format!("Comment not found: {}", comment.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, DomainError> {
        let row = sqlx::query(
            "SELECT id, issue_id, author, body, moderation, declined_reason, created_at \
             FROM comments WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch comment: {}", e),
            )
        })?;

        match row {
            Some(row) => Ok(Some(row_to_comment(row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_issue(&self, issue_id: &IssueId) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, issue_id, author, body, moderation, declined_reason, created_at \
             FROM comments WHERE issue_id = $1 ORDER BY created_at ASC",
        )
        .bind(issue_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch comments: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_comment).collect()
    }
}

fn row_to_comment(row: sqlx::postgres::PgRow) -> Result<Comment, DomainError> {
    let get = |name: &str, e: sqlx::Error| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    };

    let id: uuid::Uuid = row.try_get("id").map_err(|e| get("id", e))?;
    let issue_id: uuid::Uuid = row.try_get("issue_id").map_err(|e| get("issue_id", e))?;
    let author: String = row.try_get("author").map_err(|e| get("author", e))?;
    let body: String = row.try_get("body").map_err(|e| get("body", e))?;
    let moderation_str: String = row.try_get("moderation").map_err(|e| get("moderation", e))?;
    let declined_reason: Option<String> = row
        .try_get("declined_reason")
        .map_err(|e| get("declined_reason", e))?;
    let created_at: chrono::DateTime<chrono::Utc> =
        row.try_get("created_at").map_err(|e| get("created_at", e))?;

    let moderation = match moderation_str.as_str() {
        "pending" => ModerationState::Pending,
        "approved" => ModerationState::Approved,
        "declined" => ModerationState::Declined,
        other => {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid moderation state: {}", other),
            ))
        }
    };

    let author = UserId::new(author).map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid author: {}", e))
    })?;

    Ok(Comment::reconstitute(
        CommentId::from_uuid(id),
        IssueId::from_uuid(issue_id),
        author,
        body,
        moderation,
        declined_reason,
        Timestamp::from_datetime(created_at),
    ))
}
