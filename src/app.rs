//! Orçamentos Admin App
//!
//! Root component: builds the API client, provides context and the store,
//! and switches between screens.

use std::marker::PhantomData;

use leptos::prelude::*;
use reactive_stores::Store;

use orcamento_core::forms::{ClientForm, MaterialForm, ResourceForm};
use orcamento_core::{ApiClient, ApiConfig, AuthSession};

use crate::components::{BudgetPage, Dashboard, EntityPage, LogPanel, LoginForm, NavBar, NoticeBanner};
use crate::context::{AppContext, Page};
use crate::storage::LocalStorageTokenStore;
use crate::store::AppState;

fn build_api() -> ApiClient {
    // reqwest needs absolute URLs; a relative base resolves against the page
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default();
    let config = ApiConfig::from_build_env().resolve_against(&origin);
    log::info!("API base: {}", config.base_url);
    ApiClient::new(config, AuthSession::new(LocalStorageTokenStore))
}

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(build_api());
    provide_context(ctx);
    provide_context(Store::new(AppState::default()));

    let page = move || match ctx.page.get() {
        Page::Dashboard => view! { <Dashboard /> }.into_any(),
        Page::Clients => view! {
            <EntityPage title="Clientes" new_title="Novo cliente" form={PhantomData::<ClientForm>} />
        }
        .into_any(),
        Page::Materials => view! {
            <EntityPage title="Materiais" new_title="Novo material" form={PhantomData::<MaterialForm>} />
        }
        .into_any(),
        Page::Resources => view! {
            <EntityPage title="Recursos" new_title="Novo recurso" form={PhantomData::<ResourceForm>} />
        }
        .into_any(),
        Page::Budgets => view! { <BudgetPage /> }.into_any(),
        Page::Login => view! { <LoginForm /> }.into_any(),
        Page::Logs => view! { <LogPanel /> }.into_any(),
    };

    view! {
        <div class="app-layout">
            <NavBar />
            <NoticeBanner />
            <main class="main-content">{page}</main>
        </div>
    }
}
