//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_monotonic_enough_for_ordering() {
        let a = Timestamp::now();
        let b = Timestamp::now();
        assert!(!b.is_before(&a));
    }

    #[test]
    fn from_datetime_preserves_value() {
        let dt = Utc::now();
        let ts = Timestamp::from_datetime(dt);
        assert_eq!(ts.as_datetime(), &dt);
    }

    #[test]
    fn is_before_and_after_are_consistent() {
        let early = Timestamp::from_datetime(
            "2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap(),
        );
        let late = Timestamp::from_datetime(
            "2024-06-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap(),
        );
        assert!(early.is_before(&late));
        assert!(late.is_after(&early));
        assert!(!early.is_after(&late));
    }

    #[test]
    fn serializes_transparently() {
        let ts = Timestamp::from_datetime(
            "2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap(),
        );
        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.starts_with("\"2024-01-01"));
    }
}
