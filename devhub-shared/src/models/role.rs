//! Role normalization and the capabilities roles grant.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{convert::Infallible, fmt, str::FromStr};

const SPRING_ROLE_PREFIX: &str = "ROLE_";

/// Global role assignments for a user account.
///
/// The backend reports roles either as bare strings (`"ADMIN"`,
/// `"ROLE_ADMIN"`) or as role objects (`{"name": "ROLE_ADMIN"}`). Both shapes
/// collapse into this type during deserialization so nothing past the wire
/// boundary ever sees the raw representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    /// Full access, including the admin console.
    Admin,
    /// Access to the moderation queue.
    Moderator,
    /// Regular community member.
    User,
    /// A role the client has no special handling for, kept verbatim.
    Other(String),
}

impl Role {
    /// Canonical string form, without the `ROLE_` prefix.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "ADMIN",
            Self::Moderator => "MODERATOR",
            Self::User => "USER",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let name = value.strip_prefix(SPRING_ROLE_PREFIX).unwrap_or(value);
        Ok(match name {
            "ADMIN" => Self::Admin,
            "MODERATOR" => Self::Moderator,
            "USER" => Self::User,
            _ => Self::Other(value.to_string()),
        })
    }
}

/// Wire shapes a single role may take.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawRole {
    Name(String),
    Object { name: String },
}

impl From<RawRole> for Role {
    fn from(raw: RawRole) -> Self {
        let (RawRole::Name(name) | RawRole::Object { name }) = raw;
        match name.parse() {
            Ok(role) => role,
            Err(never) => match never {},
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawRole::deserialize(deserializer).map(Self::from)
    }
}

/// Deserializes a role list that may be missing, `null`, a single role or an
/// array of mixed shapes. The result is always a list.
///
/// # Errors
/// Returns the deserializer error when an entry is neither a string nor a
/// role object.
pub fn deserialize_roles<'de, D>(deserializer: D) -> Result<Vec<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<Role>),
        One(Role),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::Many(roles)) => roles,
        Some(OneOrMany::One(role)) => vec![role],
    })
}

/// Something that can be granted to a session based on its roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Any signed-in user.
    Authenticated,
    /// Moderators and administrators.
    Moderator,
    /// Administrators only.
    Admin,
}

impl Capability {
    /// Whether the given role set carries this capability.
    #[must_use]
    pub fn permits(self, roles: &[Role]) -> bool {
        match self {
            Self::Authenticated => true,
            Self::Moderator => roles
                .iter()
                .any(|role| matches!(role, Role::Moderator | Role::Admin)),
            Self::Admin => roles.contains(&Role::Admin),
        }
    }
}
