//! In-memory doubles for the backend seams.

use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::json;
use shared::models::{
    ApiResponse, LoginData, LoginRequest, Page, RegisterRequest, User, UserListQuery,
};
use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
};
use yewdux::Context;

use crate::api::{ApiError, AuthApi, UserDirectoryApi};
use crate::storage::{MemoryStorage, MemoryTokenJar};
use crate::stores::auth::AuthStore;

type Reply<T> = Result<ApiResponse<T>, ApiError>;

/// Builds a user from a JSON role payload, exercising the wire decoder.
pub fn user_with_roles(username: &str, roles: serde_json::Value) -> User {
    serde_json::from_value(json!({
        "id": 1,
        "username": username,
        "email": format!("{username}@example.com"),
        "roles": roles,
    }))
    .unwrap()
}

fn unscripted<T>() -> Reply<T> {
    Err(ApiError::Transport("no scripted response".to_string()))
}

/// Scripted [`AuthApi`] that counts calls and can hold `auth/me` open.
#[derive(Default)]
pub struct FakeAuthApi {
    pub me_calls: Cell<usize>,
    pub login_calls: Cell<usize>,
    pub register_calls: Cell<usize>,
    pub last_token: RefCell<Option<String>>,
    me_replies: RefCell<VecDeque<Reply<User>>>,
    login_replies: RefCell<VecDeque<Reply<LoginData>>>,
    register_replies: RefCell<VecDeque<Reply<serde_json::Value>>>,
    me_gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl FakeAuthApi {
    pub fn reply_me(&self, reply: Reply<User>) {
        self.me_replies.borrow_mut().push_back(reply);
    }

    pub fn reply_login(&self, reply: Reply<LoginData>) {
        self.login_replies.borrow_mut().push_back(reply);
    }

    pub fn reply_register(&self, reply: Reply<serde_json::Value>) {
        self.register_replies.borrow_mut().push_back(reply);
    }

    /// Makes the next `auth/me` call wait until the returned sender fires.
    pub fn hold_me(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.me_gate.replace(Some(rx));
        tx
    }
}

#[async_trait(?Send)]
impl AuthApi for FakeAuthApi {
    async fn current_user(&self, token: &str) -> Reply<User> {
        self.me_calls.set(self.me_calls.get() + 1);
        self.last_token.replace(Some(token.to_string()));
        let gate = self.me_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.me_replies.borrow_mut().pop_front().unwrap_or_else(unscripted)
    }

    async fn login(&self, _credentials: &LoginRequest) -> Reply<LoginData> {
        self.login_calls.set(self.login_calls.get() + 1);
        self.login_replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn register(&self, _request: &RegisterRequest) -> Reply<serde_json::Value> {
        self.register_calls.set(self.register_calls.get() + 1);
        self.register_replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(unscripted)
    }
}

/// Scripted [`UserDirectoryApi`] that can hold individual requests open.
#[derive(Default)]
pub struct FakeUserDirectory {
    pub queries: RefCell<Vec<UserListQuery>>,
    pub tokens: RefCell<Vec<Option<String>>>,
    replies: RefCell<VecDeque<(Option<oneshot::Receiver<()>>, Reply<Page<User>>)>>,
}

impl FakeUserDirectory {
    pub fn reply(&self, reply: Reply<Page<User>>) {
        self.replies.borrow_mut().push_back((None, reply));
    }

    pub fn reply_held(&self, reply: Reply<Page<User>>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back((Some(rx), reply));
        tx
    }
}

#[async_trait(?Send)]
impl UserDirectoryApi for FakeUserDirectory {
    async fn list_users(&self, token: Option<&str>, query: &UserListQuery) -> Reply<Page<User>> {
        self.queries.borrow_mut().push(query.clone());
        self.tokens.borrow_mut().push(token.map(str::to_string));
        let next = self.replies.borrow_mut().pop_front();
        match next {
            Some((gate, reply)) => {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                reply
            }
            None => unscripted(),
        }
    }
}

/// An [`AuthStore`] wired to fakes, each test with its own yewdux context.
pub struct AuthHarness {
    pub store: AuthStore,
    pub api: Rc<FakeAuthApi>,
    pub tokens: Rc<MemoryTokenJar>,
    pub storage: Rc<MemoryStorage>,
    pub cx: Context,
}

impl AuthHarness {
    pub fn new(token: Option<&str>) -> Self {
        Self::with_storage(token, MemoryStorage::default())
    }

    pub fn with_storage(token: Option<&str>, storage: MemoryStorage) -> Self {
        let cx = Context::new();
        let api = Rc::new(FakeAuthApi::default());
        let tokens = Rc::new(token.map(MemoryTokenJar::with_token).unwrap_or_default());
        let storage = Rc::new(storage);
        let store = AuthStore::new(&cx, api.clone(), tokens.clone(), storage.clone());
        Self {
            store,
            api,
            tokens,
            storage,
            cx,
        }
    }
}
