//! API Layer
//!
//! HTTP access to the REST backend plus the session token it needs.

mod auth;
mod client;
mod config;
mod error;
mod repository;

pub use auth::{AuthSession, Credentials, LoginResponse, MemoryTokenStore, TokenStore};
pub use client::ApiClient;
pub use config::{ApiConfig, DEFAULT_BASE_URL, NOTICE_DISMISS_MS};
pub use error::{ApiError, ApiResult};
pub use repository::Repository;
