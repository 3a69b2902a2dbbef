//! Auth session
//!
//! Holds the bearer token the API client attaches to every request. The
//! token lives behind a [`TokenStore`] so the browser build can persist it
//! in `localStorage` while tests keep it in memory.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Where the session token is kept between page loads
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Token kept only for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RefCell::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
    }
}

/// Shared handle to the current session token
#[derive(Clone)]
pub struct AuthSession {
    store: Rc<dyn TokenStore>,
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("signed_in", &self.is_signed_in())
            .finish()
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl AuthSession {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self { store: Rc::new(store) }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::new())
    }

    pub fn token(&self) -> Option<String> {
        self.store.load().filter(|t| !t.is_empty())
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn sign_in(&self, token: &str) {
        log::info!("session started");
        self.store.save(token);
    }

    pub fn sign_out(&self) {
        log::info!("session cleared");
        self.store.clear();
    }
}

/// `POST /login` body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// `POST /login` response; errors may carry only `message`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
