//! PostgreSQL implementation of IssueNumberAllocator.
//!
//! A single counter row advanced with `UPDATE ... RETURNING`; row-level
//! locking makes concurrent allocations serialize, so numbers come out
//! unique and gap-free.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::issue::IssueNumber;
use crate::ports::IssueNumberAllocator;

/// PostgreSQL implementation of IssueNumberAllocator.
#[derive(Clone)]
pub struct PostgresIssueNumberAllocator {
    pool: PgPool,
}

impl PostgresIssueNumberAllocator {
    /// Creates a new PostgresIssueNumberAllocator.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IssueNumberAllocator for PostgresIssueNumberAllocator {
    async fn next(&self) -> Result<IssueNumber, DomainError> {
        let (value,): (i64,) = sqlx::query_as(
            "UPDATE issue_number_counter SET next_number = next_number + 1 \
             WHERE id = 1 RETURNING next_number - 1",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to allocate issue number: {}", e),
            )
        })?;

        Ok(IssueNumber::new(value as u32))
    }
}
