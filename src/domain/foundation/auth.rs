//! Acting-user types supplied by the identity provider.
//!
//! The core trusts the identity provider's output: it receives an already
//! authenticated `{id, role}` pair with every lifecycle operation and only
//! enforces the role and ownership checks described by each handler. It never
//! performs credential verification itself.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Role assigned to an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular citizen: submits issues, upvotes others' issues, comments.
    Citizen,
    /// Municipal authority: triages issues (status, team assignment).
    Authority,
    /// Administrator: moderates content and manages the platform.
    Admin,
}

impl Role {
    /// Returns true for roles allowed to change work status and assign teams.
    pub fn can_triage(&self) -> bool {
        matches!(self, Role::Authority | Role::Admin)
    }

    /// Returns true for roles allowed to moderate visibility and comments.
    pub fn can_moderate(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Authenticated user acting on a lifecycle operation.
///
/// This is a domain type with no provider dependencies; any identity
/// provider can populate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActingUser {
    /// The unique user identifier from the identity provider.
    pub id: UserId,
    /// The user's role on the platform.
    pub role: Role,
}

impl ActingUser {
    /// Creates a new acting user.
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }
}
