use serde::{Deserialize, Serialize};
use shared::models::{Capability, User};
use yewdux::Store;

/// Session state shared by the whole component tree.
///
/// `loading` and `initialized` are independent flags: a fetch started after
/// hydration runs with `initialized` already set.
#[derive(Debug, Default, Clone, PartialEq, Store)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub initialized: bool,
    pub error: Option<String>,
}

/// Where the session lifecycle currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// No session check has completed yet.
    Uninitialized,
    /// A session request is in flight.
    Loading,
    /// A user is signed in.
    Authenticated,
    /// The check completed without a session.
    Anonymous,
}

impl AuthState {
    /// Lifecycle phase derived from the flags.
    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        if self.loading {
            AuthPhase::Loading
        } else if !self.initialized {
            AuthPhase::Uninitialized
        } else if self.session_user().is_some() {
            AuthPhase::Authenticated
        } else {
            AuthPhase::Anonymous
        }
    }

    /// The user, when the session is authenticated.
    #[must_use]
    pub fn session_user(&self) -> Option<&User> {
        self.user.as_ref().filter(|_| self.is_authenticated)
    }

    /// Whether the session user holds `capability`.
    #[must_use]
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.session_user().is_some_and(|user| user.can(capability))
    }

    /// Whether a guard has to ask the backend before deciding.
    #[must_use]
    pub fn needs_session_fetch(&self) -> bool {
        !self.is_authenticated || self.user.is_none()
    }

    pub(crate) fn set_authenticated(&mut self, user: User) {
        self.user = Some(user);
        self.is_authenticated = true;
        self.loading = false;
        self.initialized = true;
        self.error = None;
    }

    pub(crate) fn set_anonymous(&mut self, error: Option<String>) {
        self.user = None;
        self.is_authenticated = false;
        self.loading = false;
        self.initialized = true;
        self.error = error;
    }

    pub(crate) fn persisted(&self) -> PersistedAuth {
        PersistedAuth {
            user: self.user.clone(),
            is_authenticated: self.is_authenticated,
            initialized: self.initialized,
        }
    }

    pub(crate) fn from_persisted(persisted: PersistedAuth) -> Self {
        Self {
            user: persisted.user,
            is_authenticated: persisted.is_authenticated,
            initialized: persisted.initialized,
            ..Self::default()
        }
    }
}

/// Subset of [`AuthState`] that survives reloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PersistedAuth {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub initialized: bool,
}

/// Versioned wrapper written to local storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PersistEnvelope<T> {
    pub state: T,
    #[serde(default)]
    pub version: u32,
}
