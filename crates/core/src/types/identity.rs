//! Authenticated identity.

use serde::{Deserialize, Serialize};

use super::Role;

/// The authenticated panel user, as kept in the session slot.
///
/// Serialized as `{"email": "...", "role": "admin" | "employee"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Login key the user matched in the credential table, as stored there.
    pub email: String,
    /// Role granted by the matching credential entry.
    pub role: Role,
}

impl Identity {
    /// Create a new identity.
    #[must_use]
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }

    /// Whether this identity has the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
