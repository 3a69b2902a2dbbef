//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;

use orcamento_core::api::{ApiClient, ApiError, NOTICE_DISMISS_MS};

/// Top-level screens, switched from the nav bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Clients,
    Materials,
    Resources,
    Budgets,
    Login,
    Logs,
}

impl Page {
    pub const NAV: [Page; 5] = [
        Page::Dashboard,
        Page::Clients,
        Page::Materials,
        Page::Resources,
        Page::Budgets,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Clients => "Clientes",
            Page::Materials => "Materiais",
            Page::Resources => "Recursos",
            Page::Budgets => "Orçamentos",
            Page::Login => "Login",
            Page::Logs => "Registros",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

/// Banner message; `id` tells a newer notice from the one a timer was set for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current screen
    pub page: RwSignal<Page>,
    /// Banner shown above the page, dismissed after a few seconds
    pub notice: RwSignal<Option<Notice>>,
    /// Whether a session token is present
    pub signed_in: RwSignal<bool>,
    /// REST client (not Send, so kept in local storage)
    api: StoredValue<ApiClient, LocalStorage>,
    next_notice: StoredValue<u64>,
}

impl AppContext {
    pub fn new(api: ApiClient) -> Self {
        let signed_in = api.auth().is_signed_in();
        Self {
            page: RwSignal::new(Page::Dashboard),
            notice: RwSignal::new(None),
            signed_in: RwSignal::new(signed_in),
            api: StoredValue::new_local(api),
            next_notice: StoredValue::new(0),
        }
    }

    /// Handle to the API client for one request
    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    pub fn navigate(&self, page: Page) {
        self.page.set(page);
    }

    /// Show a banner that clears itself after `NOTICE_DISMISS_MS`
    pub fn notify(&self, kind: NoticeKind, message: impl Into<String>) {
        let id = self.next_notice.get_value() + 1;
        self.next_notice.set_value(id);
        self.notice.set(Some(Notice {
            id,
            kind,
            message: message.into(),
        }));
        let notice = self.notice;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(NOTICE_DISMISS_MS).await;
            // a newer notice keeps its own timer
            if notice.get_untracked().is_some_and(|n| n.id == id) {
                notice.set(None);
            }
        });
    }

    pub fn notify_success(&self, message: impl Into<String>) {
        self.notify(NoticeKind::Success, message);
    }

    pub fn notify_error(&self, message: impl Into<String>) {
        self.notify(NoticeKind::Error, message);
    }

    pub fn dismiss_notice(&self) {
        self.notice.set(None);
    }

    /// Report a failed request; a rejected token ends the session
    pub fn report(&self, context: &str, err: &ApiError) {
        log::warn!("{context}: {err}");
        if err.is_unauthorized() {
            self.api().logout();
            self.signed_in.set(false);
            self.navigate(Page::Login);
            self.notify_error("Sessão expirada. Entre novamente.");
        } else {
            self.notify_error(format!("{context}: {err}"));
        }
    }

    pub fn mark_signed_in(&self) {
        self.signed_in.set(true);
    }

    pub fn sign_out(&self) {
        self.api().logout();
        self.signed_in.set(false);
        self.navigate(Page::Login);
    }
}

/// Get the app context
pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}
