//! In-memory adapters for testing and local runs.

mod comment_repository;
mod issue_number_allocator;
mod issue_repository;
mod notification_sink;

pub use comment_repository::InMemoryCommentRepository;
pub use issue_number_allocator::InMemoryIssueNumberAllocator;
pub use issue_repository::InMemoryIssueRepository;
pub use notification_sink::InMemoryNotificationSink;
