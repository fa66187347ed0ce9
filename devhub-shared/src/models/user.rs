//! User accounts as reported by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::role::{Capability, Role, deserialize_roles};

/// Identifier of a user account. The backend emits numeric ids for most
/// accounts but some endpoints return them as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    /// Numeric database id.
    Numeric(i64),
    /// Opaque string id.
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// Represents a user in the system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// The user's username.
    pub username: String,

    /// The user's email address.
    pub email: String,

    /// Normalized role list, never the raw wire shapes.
    #[serde(default, deserialize_with = "deserialize_roles")]
    pub roles: Vec<Role>,

    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Token balance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,

    /// `false` when an administrator disabled the account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// When the user registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Whether the account holds the administrator role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.can(Capability::Admin)
    }

    /// Whether the account's roles grant `capability`.
    #[must_use]
    pub fn can(&self, capability: Capability) -> bool {
        capability.permits(&self.roles)
    }

    /// Name to show in headers and menus.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            &self.email
        } else {
            &self.username
        }
    }
}
