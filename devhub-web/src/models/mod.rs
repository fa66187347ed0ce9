pub mod auth_state;
pub mod theme;
pub mod toast;
pub mod user_list_state;

pub use auth_state::AuthState;
pub use theme::Theme;
pub use toast::{Toast, ToastQueue, ToastVariant};
pub use user_list_state::UserListState;
