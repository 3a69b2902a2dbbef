//! Browser token store
//!
//! Persists the session token in `localStorage["token"]`.

use orcamento_core::api::TokenStore;

const TOKEN_KEY: &str = "token";

/// `localStorage` backed [`TokenStore`]; silently degrades to "no token"
/// when storage is unavailable (private mode, sandboxed iframe).
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageTokenStore;

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        storage()?.get_item(TOKEN_KEY).ok().flatten()
    }

    fn save(&self, token: &str) {
        match storage() {
            Some(s) => {
                if let Err(e) = s.set_item(TOKEN_KEY, token) {
                    log::warn!("could not persist token: {e:?}");
                }
            }
            None => log::warn!("localStorage unavailable, token not saved"),
        }
    }

    fn clear(&self) {
        if let Some(s) = storage() {
            let _ = s.remove_item(TOKEN_KEY);
        }
    }
}
