//! Request, response and domain models.

pub mod auth;
pub mod errors;
pub mod role;
pub mod user;
pub mod user_list;

pub use auth::{ApiResponse, LoginData, LoginRequest, RegisterRequest, USER_DISABLED_CODE};
pub use errors::ErrorResponse;
pub use role::{Capability, Role};
pub use user::{User, UserId};
pub use user_list::{
    ActivityLevel, DEFAULT_PAGE_SIZE, Page, SortDirection, SortOrder, UserFilters, UserListQuery,
};
