use shared::models::{User, UserListQuery};
use yewdux::Store;

/// Admin console user listing.
#[derive(Debug, Default, Clone, PartialEq, Store)]
pub struct UserListState {
    pub users: Vec<User>,
    pub query: UserListQuery,
    pub total_pages: u32,
    pub total_elements: u64,
    pub loading: bool,
    pub error: Option<String>,
}

impl UserListState {
    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.query.page > 0
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.query.page + 1 < self.total_pages
    }
}
