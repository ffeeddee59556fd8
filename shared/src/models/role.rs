//! Role Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// User role
///
/// Exactly two roles exist and there is no hierarchy between them:
/// a check for `Tienda` is not satisfied by `Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Back-office administrator, sees every store
    Admin,
    /// Store-bound user, operates only on its own store
    Tienda,
}

impl Role {
    /// Database / wire representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Tienda => "TIENDA",
        }
    }

    /// Parse the stored representation (exact match)
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "ADMIN" => Some(Role::Admin),
            "TIENDA" => Some(Role::Tienda),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown role string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Role::from_db(&value).ok_or(UnknownRole(value))
    }
}
