//! Human-facing sequential issue number.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequential human-facing issue number.
///
/// Assigned exactly once at creation, monotonically increasing, never reused.
/// The first allocated number is 1000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueNumber(u32);

impl IssueNumber {
    /// The first number an allocator hands out.
    pub const FIRST: IssueNumber = IssueNumber(1000);

    /// Creates an issue number from a raw value.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Returns the number following this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_number_is_one_thousand() {
        assert_eq!(IssueNumber::FIRST.value(), 1000);
    }

    #[test]
    fn next_increments_by_one() {
        assert_eq!(IssueNumber::FIRST.next(), IssueNumber::new(1001));
    }

    #[test]
    fn displays_with_hash_prefix() {
        assert_eq!(format!("{}", IssueNumber::new(1042)), "#1042");
    }

    #[test]
    fn ordering_follows_value() {
        assert!(IssueNumber::new(1000) < IssueNumber::new(1001));
    }
}
