//! Work status and visibility state enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Operational progress of resolving an issue.
///
/// Closed is terminal: once closed, no status or team mutation is permitted.
/// Every non-closed status may move to any other status; the lifecycle
/// boundary enforces only the terminality of Closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    Pending,
    InProgress,
    Resolved,
    Closed,
}

impl WorkStatus {
    /// Parses a status from a label, accepting "In Progress" and
    /// "in_progress" forms case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Some(WorkStatus::Pending),
            "inprogress" => Some(WorkStatus::InProgress),
            "resolved" => Some(WorkStatus::Resolved),
            "closed" => Some(WorkStatus::Closed),
            _ => None,
        }
    }

    /// Storage key used by the persistence layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkStatus::Pending => "pending",
            WorkStatus::InProgress => "in_progress",
            WorkStatus::Resolved => "resolved",
            WorkStatus::Closed => "closed",
        }
    }
}

impl Default for WorkStatus {
    fn default() -> Self {
        WorkStatus::Pending
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkStatus::Pending => "Pending",
            WorkStatus::InProgress => "In Progress",
            WorkStatus::Resolved => "Resolved",
            WorkStatus::Closed => "Closed",
        };
        write!(f, "{}", s)
    }
}

impl StateMachine for WorkStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        *self != WorkStatus::Closed && self != target
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use WorkStatus::*;
        match self {
            Pending => vec![InProgress, Resolved, Closed],
            InProgress => vec![Pending, Resolved, Closed],
            Resolved => vec![Pending, InProgress, Closed],
            Closed => vec![],
        }
    }
}

/// Admin moderation status controlling public exposure.
///
/// Independent of work status. New issues enter Review; admins decide
/// Approved or Rejected, and may overturn a prior decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityState {
    Review,
    Approved,
    Rejected,
}

impl VisibilityState {
    /// Storage key used by the persistence layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            VisibilityState::Review => "review",
            VisibilityState::Approved => "approved",
            VisibilityState::Rejected => "rejected",
        }
    }
}

impl Default for VisibilityState {
    fn default() -> Self {
        VisibilityState::Review
    }
}

impl fmt::Display for VisibilityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VisibilityState::Review => "Review",
            VisibilityState::Approved => "Approved",
            VisibilityState::Rejected => "Rejected",
        };
        write!(f, "{}", s)
    }
}

impl StateMachine for VisibilityState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use VisibilityState::*;
        matches!((self, target), (Review, Approved) | (Review, Rejected))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use VisibilityState::*;
        match self {
            Review => vec![Approved, Rejected],
            Approved | Rejected => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_status_parse_accepts_both_label_forms() {
        assert_eq!(WorkStatus::parse("Pending"), Some(WorkStatus::Pending));
        assert_eq!(WorkStatus::parse("In Progress"), Some(WorkStatus::InProgress));
        assert_eq!(WorkStatus::parse("in_progress"), Some(WorkStatus::InProgress));
        assert_eq!(WorkStatus::parse("RESOLVED"), Some(WorkStatus::Resolved));
        assert_eq!(WorkStatus::parse("closed"), Some(WorkStatus::Closed));
    }

    #[test]
    fn work_status_parse_rejects_unknown() {
        assert_eq!(WorkStatus::parse("archived"), None);
        assert_eq!(WorkStatus::parse(""), None);
    }

    #[test]
    fn work_status_defaults_to_pending() {
        assert_eq!(WorkStatus::default(), WorkStatus::Pending);
    }

    #[test]
    fn closed_is_terminal() {
        assert!(WorkStatus::Closed.is_terminal());
        assert!(!WorkStatus::Closed.can_transition_to(&WorkStatus::Pending));
        assert!(!WorkStatus::Closed.can_transition_to(&WorkStatus::InProgress));
        assert!(!WorkStatus::Closed.can_transition_to(&WorkStatus::Resolved));
    }

    #[test]
    fn pending_can_close_directly() {
        assert!(WorkStatus::Pending.can_transition_to(&WorkStatus::Closed));
    }

    #[test]
    fn every_non_closed_status_reaches_every_other_status() {
        let all = [
            WorkStatus::Pending,
            WorkStatus::InProgress,
            WorkStatus::Resolved,
            WorkStatus::Closed,
        ];
        for from in all.iter().filter(|s| **s != WorkStatus::Closed) {
            for to in all.iter().filter(|t| *t != from) {
                assert!(from.can_transition_to(to), "{:?} -> {:?}", from, to);
            }
        }
    }

    #[test]
    fn visibility_defaults_to_review() {
        assert_eq!(VisibilityState::default(), VisibilityState::Review);
    }

    #[test]
    fn review_transitions_to_approved_or_rejected() {
        assert!(VisibilityState::Review.can_transition_to(&VisibilityState::Approved));
        assert!(VisibilityState::Review.can_transition_to(&VisibilityState::Rejected));
        assert!(VisibilityState::Approved.is_terminal());
        assert!(VisibilityState::Rejected.is_terminal());
    }
}
