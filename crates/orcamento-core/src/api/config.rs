//! API client configuration

/// Base path used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "/api";

/// How long a notice banner stays up before dismissing itself
pub const NOTICE_DISMISS_MS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Absolute (`https://host/api`) or origin-relative (`/api`) base
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base taken from `ORCAMENTO_API_URL` at build time, else `/api`
    pub fn from_build_env() -> Self {
        match option_env!("ORCAMENTO_API_URL") {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    /// Resolve an origin-relative base against `origin`
    /// (`/api` + `http://localhost:8080` → `http://localhost:8080/api`).
    /// reqwest only accepts absolute URLs.
    pub fn resolve_against(self, origin: &str) -> Self {
        if self.base_url.starts_with('/') {
            Self::new(format!("{}{}", origin.trim_end_matches('/'), self.base_url))
        } else {
            self
        }
    }

    /// Join a path (`"clientes"`, `"dashboard/counts"`) onto the base
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
