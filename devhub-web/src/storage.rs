//! Browser persistence seams.
//!
//! The session token lives in a cookie and client preferences live in local
//! storage. Both are reached through small traits so the stores can be driven
//! by in-memory doubles outside a browser.

use cookie::{Cookie, SameSite};
use gloo_storage::{LocalStorage, Storage};
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

/// Local-storage key of the persisted session record.
pub const AUTH_STORAGE_KEY: &str = "auth-storage";
/// Local-storage key of the theme preference.
pub const THEME_STORAGE_KEY: &str = "doctech-theme";
/// Cookie holding the bearer token.
pub const TOKEN_COOKIE_NAME: &str = "token";

const TOKEN_COOKIE_DAYS: i64 = 7;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write `{key}`")]
    Write { key: String },
    #[error("failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key/value storage surviving page reloads.
pub trait StateStorage {
    fn load(&self, key: &str) -> Option<String>;
    /// # Errors
    /// Returns [`StorageError`] when the backend refuses the write.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// Holder of the session bearer token.
pub trait TokenJar {
    fn token(&self) -> Option<String>;
    fn store(&self, token: &str);
    fn clear(&self);
}

/// [`StateStorage`] over `window.localStorage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

impl StateStorage for BrowserStorage {
    fn load(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|_| StorageError::Write {
                key: key.to_string(),
            })
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

/// [`TokenJar`] over `document.cookie`.
#[derive(Debug, Clone)]
pub struct DocumentCookieJar {
    name: &'static str,
}

impl Default for DocumentCookieJar {
    fn default() -> Self {
        Self {
            name: TOKEN_COOKIE_NAME,
        }
    }
}

impl DocumentCookieJar {
    fn document() -> Option<HtmlDocument> {
        web_sys::window()?.document()?.dyn_into().ok()
    }

    fn write(&self, cookie: &Cookie<'_>) {
        let written = Self::document().is_some_and(|doc| doc.set_cookie(&cookie.to_string()).is_ok());
        if !written {
            log::warn!("unable to write cookie `{}`", self.name);
        }
    }
}

impl TokenJar for DocumentCookieJar {
    fn token(&self) -> Option<String> {
        let header = Self::document()?.cookie().ok()?;
        read_cookie(&header, self.name)
    }

    fn store(&self, token: &str) {
        let cookie = Cookie::build((self.name, token))
            .path("/")
            .same_site(SameSite::Lax)
            .max_age(cookie::time::Duration::days(TOKEN_COOKIE_DAYS))
            .build();
        self.write(&cookie);
    }

    fn clear(&self) {
        let mut cookie = Cookie::build((self.name, "")).path("/").build();
        cookie.make_removal();
        self.write(&cookie);
    }
}

/// Finds a non-empty cookie value in a `document.cookie` style string.
#[must_use]
pub fn read_cookie(header: &str, name: &str) -> Option<String> {
    Cookie::split_parse(header)
        .flatten()
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// In-memory [`StateStorage`] for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl StateStorage for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// In-memory [`TokenJar`] for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryTokenJar {
    token: std::cell::RefCell<Option<String>>,
}

#[cfg(test)]
impl MemoryTokenJar {
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: std::cell::RefCell::new(Some(token.to_string())),
        }
    }
}

#[cfg(test)]
impl TokenJar for MemoryTokenJar {
    fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn store(&self, token: &str) {
        self.token.replace(Some(token.to_string()));
    }

    fn clear(&self) {
        self.token.take();
    }
}
