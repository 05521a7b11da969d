//! PostgreSQL persistence adapters.

mod comment_repository;
mod issue_number_allocator;
mod issue_repository;

pub use comment_repository::PostgresCommentRepository;
pub use issue_number_allocator::PostgresIssueNumberAllocator;
pub use issue_repository::PostgresIssueRepository;
