//! In-memory notification sink for testing.
//!
//! Captures dispatched notifications for assertions; can inject failures to
//! verify that sink errors never fail the originating operation.
//!
//! # Panics
//!
//! Methods panic if the internal lock is poisoned. This is acceptable for
//! test code.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{Notification, NotificationSink};

/// In-memory implementation of NotificationSink.
#[derive(Default)]
pub struct InMemoryNotificationSink {
    dispatched: Mutex<Vec<Notification>>,
    fail_dispatch: bool,
}

impl InMemoryNotificationSink {
    /// Creates a new sink that accepts every notification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that fails every dispatch.
    pub fn failing() -> Self {
        Self {
            dispatched: Mutex::new(Vec::new()),
            fail_dispatch: true,
        }
    }

    /// Returns all dispatched notifications (for test assertions).
    pub fn dispatched(&self) -> Vec<Notification> {
        self.dispatched
            .lock()
            .expect("InMemoryNotificationSink: lock poisoned")
            .clone()
    }

    /// Returns the number of dispatched notifications.
    pub fn dispatch_count(&self) -> usize {
        self.dispatched
            .lock()
            .expect("InMemoryNotificationSink: lock poisoned")
            .len()
    }
}

#[async_trait]
impl NotificationSink for InMemoryNotificationSink {
    async fn notify(&self, notification: Notification) -> Result<(), DomainError> {
        if self.fail_dispatch {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Simulated dispatch failure",
            ));
        }
        self.dispatched
            .lock()
            .expect("InMemoryNotificationSink: lock poisoned")
            .push(notification);
        Ok(())
    }
}
