//! Ports: contracts between the application core and its collaborators.

mod classifier;
mod comment_repository;
mod issue_number_allocator;
mod issue_repository;
mod notification_sink;
mod transcriber;

pub use classifier::{Classifier, ClassifierError};
pub use comment_repository::CommentRepository;
pub use issue_number_allocator::IssueNumberAllocator;
pub use issue_repository::{IssueFilters, IssueRepository};
pub use notification_sink::{Notification, NotificationSink};
pub use transcriber::Transcriber;
