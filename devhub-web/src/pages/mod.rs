mod admin_users;
mod docs;
mod error;
mod home;
pub mod login;
mod moderation;
pub mod register;
mod register_validation;

pub use admin_users::AdminUsersPage;
pub use docs::DocsPage;
pub use error::ErrorPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use moderation::ModerationPage;
pub use register::RegisterPage;
