//! Response envelope and the login/registration payloads.

use serde::{Deserialize, Serialize};

use super::role::Role;
use super::user::User;

/// Failure code the backend attaches to logins of disabled accounts.
pub const USER_DISABLED_CODE: &str = "USER_DISABLED";

/// Envelope every backend endpoint answers with.
///
/// `data` is only meaningful when `success` is true; failures carry a
/// human-readable `message` and sometimes a machine `code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Missing on bare `{message, code}` failure bodies.
    #[serde(default)]
    pub success: bool,
    /// Payload of a successful call.
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    /// Human-readable failure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Machine-readable failure code, e.g. [`USER_DISABLED_CODE`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope around `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            code: None,
        }
    }

    /// Failed envelope with a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            code: None,
        }
    }

    /// Attaches a failure code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// The payload of a successful response, `None` for failures or
    /// successes without data.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }

    /// Whether the failure reports a disabled account.
    #[must_use]
    pub fn is_user_disabled(&self) -> bool {
        self.code.as_deref() == Some(USER_DISABLED_CODE)
    }
}

/// Credentials posted to `auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account name.
    pub username: String,
    /// Plain-text password, sent over TLS only.
    pub password: String,
}

/// Payload of a successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginData {
    /// Bearer token, stored in the `token` cookie.
    pub token: String,
    /// The signed-in account.
    pub user: User,
}

/// Account creation request posted to `auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Contact address.
    pub email: String,
    /// Requested account name.
    pub username: String,
    /// Chosen password.
    pub password: String,
    /// Requested role; the backend decides whether to grant it.
    pub role: Role,
}
