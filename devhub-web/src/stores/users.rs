use shared::models::{SortOrder, UserFilters};
use std::{cell::Cell, fmt, rc::Rc};
use yewdux::{Context, Dispatch};

use crate::api::UserDirectoryApi;
use crate::models::UserListState;
use crate::storage::TokenJar;

pub const LOAD_USERS_FAILED: &str = "Failed to load users";

struct Inner {
    api: Rc<dyn UserDirectoryApi>,
    tokens: Rc<dyn TokenJar>,
    state: Dispatch<UserListState>,
    /// Sequence number of the newest request; older responses are dropped.
    latest: Cell<u64>,
}

/// Paginated, filterable user listing for the admin console.
#[derive(Clone)]
pub struct UserListStore {
    inner: Rc<Inner>,
}

impl PartialEq for UserListStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for UserListStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserListStore")
            .field("query", &self.state().query)
            .finish_non_exhaustive()
    }
}

impl UserListStore {
    /// Creates the store on top of the app's yewdux context.
    pub fn new(cx: &Context, api: Rc<dyn UserDirectoryApi>, tokens: Rc<dyn TokenJar>) -> Self {
        Self {
            inner: Rc::new(Inner {
                api,
                tokens,
                state: Dispatch::new(cx),
                latest: Cell::new(0),
            }),
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> Rc<UserListState> {
        self.inner.state.get()
    }

    /// Loads the page described by the current query. When requests overlap
    /// only the most recent one is applied.
    pub async fn fetch_users(&self) {
        let inner = &self.inner;
        let sequence = inner.latest.get() + 1;
        inner.latest.set(sequence);

        let query = inner.state.get().query.clone();
        inner.state.reduce_mut(|state| {
            state.loading = true;
            state.error = None;
        });

        let token = inner.tokens.token();
        let result = inner.api.list_users(token.as_deref(), &query).await;
        if inner.latest.get() != sequence {
            log::debug!("dropping superseded user list response (page {})", query.page);
            return;
        }

        match result {
            Ok(response) if response.success => {
                let page = response.data.unwrap_or_default();
                inner.state.reduce_mut(|state| {
                    state.users = page.content;
                    state.total_pages = page.total_pages;
                    state.total_elements = page.total_elements;
                    state.loading = false;
                });
            }
            Ok(response) => {
                let message = response
                    .message
                    .unwrap_or_else(|| LOAD_USERS_FAILED.to_string());
                log::warn!("user listing rejected: {message}");
                inner.state.reduce_mut(|state| {
                    state.loading = false;
                    state.error = Some(message);
                });
            }
            Err(err) => {
                log::warn!("user listing failed: {err}");
                inner.state.reduce_mut(|state| {
                    state.loading = false;
                    state.error = Some(LOAD_USERS_FAILED.to_string());
                });
            }
        }
    }

    /// Replaces the filters and returns to the first page.
    pub fn set_filters(&self, filters: UserFilters) {
        self.inner.state.reduce_mut(|state| {
            state.query.filters = filters;
            state.query.page = 0;
        });
    }

    /// Clears every filter and returns to the first page.
    pub fn reset_filters(&self) {
        self.set_filters(UserFilters::default());
    }

    /// Moves to the zero-based `page`.
    pub fn set_page(&self, page: u32) {
        self.inner.state.reduce_mut(|state| state.query.page = page);
    }

    /// Changes the page size, at least one row, and returns to the first page.
    pub fn set_page_size(&self, size: u32) {
        self.inner.state.reduce_mut(|state| {
            state.query.size = size.max(1);
            state.query.page = 0;
        });
    }

    /// Replaces the server-side sort; `None` keeps the backend order.
    pub fn set_sort(&self, sort: Option<SortOrder>) {
        self.inner.state.reduce_mut(|state| state.query.sort = sort);
    }
}
