//! Nav Bar Component
//!
//! Tab bar for switching between the admin screens.

use leptos::prelude::*;

use crate::context::{use_app, Page};

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app();

    view! {
        <nav class="nav-bar">
            <span class="nav-brand">"Orçamentos"</span>
            {Page::NAV
                .iter()
                .map(|&page| {
                    let tab_class = move || {
                        if ctx.page.get() == page { "nav-tab active" } else { "nav-tab" }
                    };
                    view! {
                        <button class=tab_class on:click=move |_| ctx.navigate(page)>
                            {page.title()}
                        </button>
                    }
                })
                .collect_view()}
            <span class="nav-spacer"></span>
            <button
                class=move || if ctx.page.get() == Page::Logs { "nav-tab active" } else { "nav-tab" }
                on:click=move |_| ctx.navigate(Page::Logs)
            >
                {Page::Logs.title()}
            </button>
            {move || if ctx.signed_in.get() {
                view! {
                    <button class="nav-tab" on:click=move |_| ctx.sign_out()>"Sair"</button>
                }.into_any()
            } else {
                view! {
                    <button class="nav-tab" on:click=move |_| ctx.navigate(Page::Login)>"Entrar"</button>
                }.into_any()
            }}
        </nav>
    }
}
