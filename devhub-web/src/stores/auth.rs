//! Session store.
//!
//! [`AuthStore`] owns the session lifecycle: it hydrates from local storage,
//! asks the backend who the token belongs to, logs in and out, and publishes
//! every change through a yewdux [`Dispatch`] so components re-render.
//!
//! Session fetches are single-flight. Every caller of
//! [`AuthStore::fetch_user`] while a fetch is outstanding receives a clone of
//! the same shared future, so the backend sees one request no matter how many
//! guards mount at once.

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use shared::models::{Capability, LoginData, LoginRequest, RegisterRequest, User};
use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};
use thiserror::Error;
use yewdux::{Context, Dispatch};

use crate::api::{ApiError, AuthApi};
use crate::models::auth_state::{AuthState, PersistEnvelope, PersistedAuth};
use crate::storage::{AUTH_STORAGE_KEY, StateStorage, StorageError, TokenJar};

pub const FETCH_USER_FAILED: &str = "Failed to fetch user";
pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTER_FAILED: &str = "Registration failed";
pub const ACCOUNT_DISABLED: &str = "This account has been disabled";
pub const UNREACHABLE: &str = "Unable to connect to server";

const PERSIST_VERSION: u32 = 0;

/// Why a login or registration did not succeed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    /// The backend refused the request.
    #[error("{message}")]
    Rejected {
        message: String,
        code: Option<String>,
    },
    /// The account exists but has been disabled.
    #[error("{message}")]
    Disabled { message: String },
    #[error("{}", UNREACHABLE)]
    Transport(#[from] ApiError),
}

/// A session fetch every concurrent caller can await.
pub type PendingFetch = Shared<LocalBoxFuture<'static, ()>>;

struct Inner {
    api: Rc<dyn AuthApi>,
    tokens: Rc<dyn TokenJar>,
    storage: Rc<dyn StateStorage>,
    state: Dispatch<AuthState>,
    pending: RefCell<Option<PendingFetch>>,
    /// Bumped whenever the session is replaced so late fetch results are dropped.
    epoch: Cell<u64>,
}

/// Explicitly owned session service, handed to components through context.
#[derive(Clone)]
pub struct AuthStore {
    inner: Rc<Inner>,
}

impl PartialEq for AuthStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthStore")
            .field("phase", &self.state().phase())
            .field("state", &self.state())
            .field("fetch_pending", &self.is_fetch_pending())
            .finish_non_exhaustive()
    }
}

impl AuthStore {
    /// Creates the store and restores any persisted session record.
    pub fn new(
        cx: &Context,
        api: Rc<dyn AuthApi>,
        tokens: Rc<dyn TokenJar>,
        storage: Rc<dyn StateStorage>,
    ) -> Self {
        let store = Self {
            inner: Rc::new(Inner {
                api,
                tokens,
                storage,
                state: Dispatch::new(cx),
                pending: RefCell::new(None),
                epoch: Cell::new(0),
            }),
        };
        store.hydrate();
        store
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> Rc<AuthState> {
        self.inner.state.get()
    }

    /// Whether a session fetch is outstanding.
    #[must_use]
    pub fn is_fetch_pending(&self) -> bool {
        self.inner.pending.borrow().is_some()
    }

    /// Resolves the session behind the token cookie.
    ///
    /// Without a token the store settles anonymous without touching the
    /// network. Any failure, including a `success: false` envelope, settles
    /// anonymous with [`FETCH_USER_FAILED`]. Callers arriving while a fetch
    /// is outstanding share it.
    pub fn fetch_user(&self) -> PendingFetch {
        if let Some(pending) = self.inner.pending.borrow().as_ref() {
            log::debug!("joining in-flight session fetch");
            return pending.clone();
        }

        let inner = Rc::clone(&self.inner);
        let epoch = inner.epoch.get();
        let fetch = async move {
            inner.resolve_session(epoch).await;
            if inner.epoch.get() == epoch {
                inner.pending.take();
            }
        }
        .boxed_local()
        .shared();

        self.inner.pending.replace(Some(fetch.clone()));
        fetch
    }

    /// Exchanges credentials for a session.
    ///
    /// # Errors
    /// Returns [`AuthError`] when the backend rejects the credentials or
    /// cannot be reached; the message is also recorded in `error`.
    pub async fn login(&self, credentials: LoginRequest) -> Result<User, AuthError> {
        self.update(|state| {
            state.loading = true;
            state.error = None;
        });

        let outcome = match self.inner.api.login(&credentials).await {
            Ok(response) => {
                let disabled = response.is_user_disabled();
                let message = response.message.clone();
                let code = response.code.clone();
                match response.into_data() {
                    Some(data) => Ok(data),
                    None if disabled => Err(AuthError::Disabled {
                        message: message.unwrap_or_else(|| ACCOUNT_DISABLED.to_string()),
                    }),
                    None => Err(AuthError::Rejected {
                        message: message.unwrap_or_else(|| LOGIN_FAILED.to_string()),
                        code,
                    }),
                }
            }
            Err(err) => Err(AuthError::from(err)),
        };

        match outcome {
            Ok(LoginData { token, user }) => {
                self.inner.tokens.store(&token);
                self.supersede_pending();
                log::info!("signed in as {}", user.username);
                self.update(|state| state.set_authenticated(user.clone()));
                Ok(user)
            }
            Err(err) => {
                log::warn!("login failed: {err:?}");
                self.update(|state| {
                    state.loading = false;
                    state.error = Some(err.to_string());
                });
                Err(err)
            }
        }
    }

    /// Creates an account. Does not sign in.
    ///
    /// # Errors
    /// Returns [`AuthError`] when the backend refuses the registration or
    /// cannot be reached.
    pub async fn register(&self, request: RegisterRequest) -> Result<(), AuthError> {
        let result = match self.inner.api.register(&request).await {
            Ok(response) if response.success => Ok(()),
            Ok(response) => Err(AuthError::Rejected {
                message: response
                    .message
                    .unwrap_or_else(|| REGISTER_FAILED.to_string()),
                code: response.code,
            }),
            Err(err) => Err(AuthError::from(err)),
        };

        if let Err(err) = &result {
            log::warn!("registration failed: {err:?}");
            self.update(|state| state.error = Some(err.to_string()));
        }
        result
    }

    /// Drops the session locally.
    ///
    /// `initialized` is left as it was. A guard mounted afterwards still
    /// calls [`Self::fetch_user`], which settles anonymous without a request
    /// because the token cookie is gone.
    pub fn logout(&self) {
        self.inner.tokens.clear();
        self.supersede_pending();
        self.update(|state| {
            state.user = None;
            state.is_authenticated = false;
            state.loading = false;
            state.error = None;
        });
        log::info!("signed out");
    }

    /// Whether the in-memory roles include the administrator role.
    #[must_use]
    pub fn check_is_admin(&self) -> bool {
        self.state().user.as_ref().is_some_and(User::is_admin)
    }

    /// Whether the signed-in user holds `capability`.
    #[must_use]
    #[allow(dead_code)]
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.state().has_capability(capability)
    }

    /// Clears the last error, if any.
    pub fn clear_error(&self) {
        if self.state().error.is_some() {
            self.update(|state| state.error = None);
        }
    }

    fn update(&self, mutate: impl FnOnce(&mut AuthState)) {
        self.inner.update(mutate);
    }

    fn supersede_pending(&self) {
        self.inner.epoch.set(self.inner.epoch.get() + 1);
        self.inner.pending.take();
    }

    fn hydrate(&self) {
        let Some(raw) = self.inner.storage.load(AUTH_STORAGE_KEY) else {
            return;
        };
        match serde_json::from_str::<PersistEnvelope<PersistedAuth>>(&raw) {
            Ok(envelope) => self
                .inner
                .state
                .set(AuthState::from_persisted(envelope.state)),
            Err(err) => {
                log::warn!("discarding unreadable session record: {err}");
                self.inner.storage.remove(AUTH_STORAGE_KEY);
            }
        }
    }
}

impl Inner {
    async fn resolve_session(&self, epoch: u64) {
        let Some(token) = self.tokens.token() else {
            self.update(|state| state.set_anonymous(None));
            return;
        };

        self.update(|state| {
            state.loading = true;
            state.error = None;
        });

        let result = self.api.current_user(&token).await;
        if self.epoch.get() != epoch {
            log::debug!("dropping session fetch superseded by login or logout");
            return;
        }

        match result.map(shared::models::ApiResponse::into_data) {
            Ok(Some(user)) => self.update(|state| state.set_authenticated(user)),
            Ok(None) => {
                log::info!("backend reported no active session");
                self.update(|state| state.set_anonymous(Some(FETCH_USER_FAILED.to_string())));
            }
            Err(err) => {
                log::warn!("session fetch failed: {err}");
                self.update(|state| state.set_anonymous(Some(FETCH_USER_FAILED.to_string())));
            }
        }
    }

    fn update(&self, mutate: impl FnOnce(&mut AuthState)) {
        self.state.reduce_mut(mutate);
        if let Err(err) = self.persist() {
            log::warn!("unable to persist session: {err}");
        }
    }

    fn persist(&self) -> Result<(), StorageError> {
        let envelope = PersistEnvelope {
            state: self.state.get().persisted(),
            version: PERSIST_VERSION,
        };
        let encoded = serde_json::to_string(&envelope)?;
        self.storage.save(AUTH_STORAGE_KEY, &encoded)
    }
}
