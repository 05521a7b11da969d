//! PostgreSQL implementation of IssueRepository.
//!
//! Upvoters live in a dedicated `issue_upvotes` table keyed by
//! `(issue_id, user_id)`, so the duplicate check is the primary-key
//! constraint itself and concurrent upvotes cannot race.

use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder, Row};
use std::collections::BTreeSet;

use crate::domain::classification::{Category, Priority};
use crate::domain::foundation::{
    DomainError, ErrorCode, IssueId, TeamId, Timestamp, UserId,
};
use crate::domain::issue::{Issue, IssueNumber, VisibilityState, WorkStatus};
use crate::ports::{IssueFilters, IssueRepository};

const ISSUE_COLUMNS: &str = "i.id, i.number, i.description, i.address, i.photo_ref, i.audio_ref, \
     i.transcription, i.category, i.priority, i.work_status, i.visibility, \
     i.rejection_reason, i.creator, i.team, i.created_at, i.updated_at, \
     COALESCE(array_agg(u.user_id) FILTER (WHERE u.user_id IS NOT NULL), '{}') AS upvoters";

/// PostgreSQL implementation of IssueRepository.
#[derive(Clone)]
pub struct PostgresIssueRepository {
    pool: PgPool,
}

impl PostgresIssueRepository {
    /// Creates a new PostgresIssueRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IssueRepository for PostgresIssueRepository {
    async fn save(&self, issue: &Issue) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO issues (
                id, number, description, address, photo_ref, audio_ref,
                transcription, category, priority, work_status, visibility,
                rejection_reason, creator, team, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(issue.id().as_uuid())
        .bind(issue.number().value() as i64)
        .bind(issue.description())
        .bind(issue.address())
        .bind(issue.photo_ref())
        .bind(issue.audio_ref())
        .bind(issue.transcription())
        .bind(issue.category().as_str())
        .bind(issue.priority().as_str())
        .bind(issue.work_status().as_str())
        .bind(issue.visibility().as_str())
        .bind(issue.rejection_reason())
        .bind(issue.creator().as_str())
        .bind(issue.team().map(|t| *t.as_uuid()))
        .bind(issue.created_at().as_datetime())
        .bind(issue.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.constraint() == Some("issues_number_key") => {
                DomainError::new(
                    ErrorCode::IssueNumberConflict,
                    format!("Issue number already taken: {}", issue.number()),
                )
            }
            _ => DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert issue: {}", e),
            ),
        })?;

        Ok(())
    }

    async fn update(&self, issue: &Issue) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE issues SET
                work_status = $2,
                visibility = $3,
                rejection_reason = $4,
                team = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(issue.id().as_uuid())
        .bind(issue.work_status().as_str())
        .bind(issue.visibility().as_str())
        .bind(issue.rejection_reason())
        .bind(issue.team().map(|t| *t.as_uuid()))
        .bind(issue.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update issue: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::IssueNotFound,
                format!("Issue not found: {}", issue.id()),
            )
            .with_detail("issue_id", issue.id().to_string()));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &IssueId) -> Result<Option<Issue>, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM issues i
            LEFT JOIN issue_upvotes u ON u.issue_id = i.id
            WHERE i.id = $1
            GROUP BY i.id
            "#,
            ISSUE_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch issue: {}", e),
            )
        })?;

        match row {
            Some(row) => Ok(Some(row_to_issue(row)?)),
            None => Ok(None),
        }
    }

    async fn add_upvoter(&self, id: &IssueId, user_id: &UserId) -> Result<(), DomainError> {
        // Creator is immutable, so reading it first cannot race the insert.
        let creator: Option<(String,)> =
            sqlx::query_as("SELECT creator FROM issues WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to fetch issue creator: {}", e),
                    )
                })?;

        let creator = creator.ok_or_else(|| {
            DomainError::new(ErrorCode::IssueNotFound, format!("Issue not found: {}", id))
                .with_detail("issue_id", id.to_string())
        })?;

        if creator.0 == user_id.as_str() {
            return Err(DomainError::new(
                ErrorCode::OwnIssueUpvote,
                "Cannot upvote own issue",
            ));
        }

        let result = sqlx::query(
            "INSERT INTO issue_upvotes (issue_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(id.as_uuid())
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let constraint = match &e {
                sqlx::Error::Database(db_err) => db_err.constraint().map(str::to_owned),
                _ => None,
            };
            upvote_insert_error(id, constraint.as_deref(), &e)
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::DuplicateUpvote,
                "User has already upvoted this issue",
            ));
        }

        sqlx::query("UPDATE issues SET updated_at = NOW() WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to touch issue: {}", e),
                )
            })?;

        Ok(())
    }

    async fn find_with_filters(&self, filters: &IssueFilters) -> Result<Vec<Issue>, DomainError> {
        let mut builder = QueryBuilder::new(format!(
            r#"
            SELECT {}
            FROM issues i
            LEFT JOIN issue_upvotes u ON u.issue_id = i.id
            WHERE 1=1
            "#,
            ISSUE_COLUMNS
        ));

        if let Some(status) = filters.status {
            builder.push(" AND i.work_status = ").push_bind(status.as_str());
        }
        if let Some(priority) = filters.priority {
            builder.push(" AND i.priority = ").push_bind(priority.as_str());
        }
        if let Some(category) = filters.category {
            builder.push(" AND i.category = ").push_bind(category.as_str());
        }
        if let Some(ref needle) = filters.address_contains {
            builder
                .push(" AND i.address ILIKE ")
                .push_bind(format!("%{}%", needle));
        }
        if let Some(ref owner) = filters.owner {
            builder.push(" AND i.creator = ").push_bind(owner.as_str().to_string());
        }

        builder.push(" GROUP BY i.id ORDER BY i.created_at DESC, i.number DESC");

        let rows = builder.build().fetch_all(&self.pool).await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch issues: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_issue).collect()
    }

    async fn delete(&self, id: &IssueId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM issues WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete issue: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::IssueNotFound,
                format!("Issue not found: {}", id),
            )
            .with_detail("issue_id", id.to_string()));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

/// Maps a failed upvote insert to a domain error.
///
/// The issue row can be hard-deleted between the creator read and the insert;
/// at that point the foreign-key violation is the not-found signal.
fn upvote_insert_error(
    id: &IssueId,
    constraint: Option<&str>,
    err: &impl std::fmt::Display,
) -> DomainError {
    match constraint {
        Some("issue_upvotes_issue_id_fkey") => {
            DomainError::new(ErrorCode::IssueNotFound, format!("Issue not found: {}", id))
                .with_detail("issue_id", id.to_string())
        }
        _ => DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to insert upvote: {}", err),
        ),
    }
}

fn column<'r, T>(row: &'r sqlx::postgres::PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

fn parse_enum<T>(
    value: Option<T>,
    name: &str,
    raw: &str,
) -> Result<T, DomainError> {
    value.ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid {}: {}", name, raw),
        )
    })
}

fn row_to_issue(row: sqlx::postgres::PgRow) -> Result<Issue, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    let number: i64 = column(&row, "number")?;
    let description: Option<String> = column(&row, "description")?;
    let address: String = column(&row, "address")?;
    let photo_ref: Option<String> = column(&row, "photo_ref")?;
    let audio_ref: Option<String> = column(&row, "audio_ref")?;
    let transcription: Option<String> = column(&row, "transcription")?;
    let category_str: String = column(&row, "category")?;
    let priority_str: String = column(&row, "priority")?;
    let status_str: String = column(&row, "work_status")?;
    let visibility_str: String = column(&row, "visibility")?;
    let rejection_reason: Option<String> = column(&row, "rejection_reason")?;
    let creator: String = column(&row, "creator")?;
    let team: Option<uuid::Uuid> = column(&row, "team")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(&row, "updated_at")?;
    let upvoter_strs: Vec<String> = column(&row, "upvoters")?;

    let category = parse_enum(Category::parse(&category_str), "category", &category_str)?;
    let priority = parse_enum(Priority::parse(&priority_str), "priority", &priority_str)?;
    let work_status = parse_enum(WorkStatus::parse(&status_str), "work_status", &status_str)?;
    let visibility = parse_enum(
        match visibility_str.as_str() {
            "review" => Some(VisibilityState::Review),
            "approved" => Some(VisibilityState::Approved),
            "rejected" => Some(VisibilityState::Rejected),
            _ => None,
        },
        "visibility",
        &visibility_str,
    )?;

    let creator = UserId::new(creator).map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid creator: {}", e))
    })?;

    let upvoters: BTreeSet<UserId> = upvoter_strs
        .into_iter()
        .map(|s| {
            UserId::new(s).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid upvoter: {}", e))
            })
        })
        .collect::<Result<_, _>>()?;

    Ok(Issue::reconstitute(
        IssueId::from_uuid(id),
        IssueNumber::new(number as u32),
        description,
        address,
        photo_ref,
        audio_ref,
        transcription,
        category,
        priority,
        work_status,
        visibility,
        rejection_reason,
        creator,
        team.map(TeamId::from_uuid),
        upvoters,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upvote_fk_violation_maps_to_issue_not_found() {
        let id = IssueId::new();
        let err = upvote_insert_error(&id, Some("issue_upvotes_issue_id_fkey"), &"fk violation");
        assert_eq!(err.code, ErrorCode::IssueNotFound);
        assert_eq!(err.details.get("issue_id"), Some(&id.to_string()));
    }

    #[test]
    fn other_upvote_insert_failures_stay_database_errors() {
        let err = upvote_insert_error(&IssueId::new(), None, &"connection reset");
        assert_eq!(err.code, ErrorCode::DatabaseError);

        let err = upvote_insert_error(&IssueId::new(), Some("issue_upvotes_pkey"), &"pk");
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
