//! In-memory issue number allocator.
//!
//! A single atomic counter: unique, monotonically increasing, gap-free
//! numbers under concurrent submissions.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::domain::foundation::DomainError;
use crate::domain::issue::IssueNumber;
use crate::ports::IssueNumberAllocator;

/// In-memory implementation of IssueNumberAllocator.
pub struct InMemoryIssueNumberAllocator {
    next: AtomicU32,
}

impl InMemoryIssueNumberAllocator {
    /// Creates an allocator starting at [`IssueNumber::FIRST`].
    pub fn new() -> Self {
        Self {
            next: AtomicU32::new(IssueNumber::FIRST.value()),
        }
    }

    /// Creates an allocator resuming from an existing highest number.
    pub fn starting_after(highest: IssueNumber) -> Self {
        Self {
            next: AtomicU32::new(highest.value() + 1),
        }
    }
}

impl Default for InMemoryIssueNumberAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IssueNumberAllocator for InMemoryIssueNumberAllocator {
    async fn next(&self) -> Result<IssueNumber, DomainError> {
        let value = self.next.fetch_add(1, Ordering::SeqCst);
        Ok(IssueNumber::new(value))
    }
}
