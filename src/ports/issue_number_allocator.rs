//! Issue number allocator port.
//!
//! An explicit atomic sequence, replacing the hidden auto-increment side
//! effect of the original schema. Allocation is serialized per collection so
//! numbers are unique and gap-free under concurrent submissions.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::issue::IssueNumber;

/// Port for allocating sequential issue numbers.
#[async_trait]
pub trait IssueNumberAllocator: Send + Sync {
    /// Atomically allocate the next issue number.
    ///
    /// The first allocated number is [`IssueNumber::FIRST`]; numbers are
    /// monotonically increasing and never reused.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn next(&self) -> Result<IssueNumber, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_is_object_safe() {
        fn _accepts_dyn(_alloc: &dyn IssueNumberAllocator) {}
    }
}
