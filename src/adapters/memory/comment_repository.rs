//! In-memory comment repository for testing and local runs.
//!
//! # Panics
//!
//! Methods panic if the internal lock is poisoned. This is acceptable for
//! test code; production deployments use the Postgres adapter.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::comment::Comment;
use crate::domain::foundation::{CommentId, DomainError, ErrorCode, IssueId};
use crate::ports::CommentRepository;

/// In-memory implementation of CommentRepository.
#[derive(Default)]
pub struct InMemoryCommentRepository {
    comments: Mutex<HashMap<CommentId, Comment>>,
}

impl InMemoryCommentRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn save(&self, comment: &Comment) -> Result<(), DomainError> {
        self.comments
            .lock()
            .expect("InMemoryCommentRepository: lock poisoned")
            .insert(*comment.id(), comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> Result<(), DomainError> {
        let mut comments = self
            .comments
            .lock()
            .expect("InMemoryCommentRepository: lock poisoned");

        if !comments.contains_key(comment.id()) {
            return Err(DomainError::new(
                ErrorCode::CommentNotFound,
                format!("Comment not found: {}", comment.id()),
            ));
        }

        comments.insert(*comment.id(), comment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, DomainError> {
        let comments = self
            .comments
            .lock()
            .expect("InMemoryCommentRepository: lock poisoned");
        Ok(comments.get(id).cloned())
    }

    async fn find_by_issue(&self, issue_id: &IssueId) -> Result<Vec<Comment>, DomainError> {
        let comments = self
            .comments
            .lock()
            .expect("InMemoryCommentRepository: lock poisoned");

        let mut matching: Vec<Comment> = comments
            .values()
            .filter(|c| c.issue_id() == issue_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at().cmp(b.created_at()));
        Ok(matching)
    }
}
