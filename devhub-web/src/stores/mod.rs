pub mod auth;
mod auth_test;
pub mod theme;
pub mod users;

pub use auth::{AuthError, AuthStore};
pub use theme::ThemePreferences;
pub use users::UserListStore;
