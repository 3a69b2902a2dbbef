//! Login Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use orcamento_core::api::Credentials;

use crate::context::{use_app, Page};

#[component]
pub fn LoginForm() -> impl IntoView {
    let ctx = use_app();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let credentials = Credentials {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        pending.set(true);
        error.set(None);
        let api = ctx.api();
        spawn_local(async move {
            match api.login(&credentials).await {
                Ok(()) => {
                    password.set(String::new());
                    ctx.mark_signed_in();
                    ctx.notify_success("Login realizado");
                    ctx.navigate(Page::Dashboard);
                }
                Err(err) => {
                    log::warn!("login failed: {err}");
                    error.set(Some(err.to_string()));
                }
            }
            pending.set(false);
        });
    };

    view! {
        <section class="login-page">
            <form class="login-form" on:submit=on_submit>
                <h1>"Entrar"</h1>
                <label class="field">
                    <span class="field-label">"E-mail"</span>
                    <input
                        type="email"
                        class="field-input"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span class="field-label">"Senha"</span>
                    <input
                        type="password"
                        class="field-input"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                {move || error.get().map(|e| view! { <p class="field-error">{e}</p> })}
                <button type="submit" class="btn btn-primary" disabled=move || pending.get()>
                    {move || if pending.get() { "Entrando..." } else { "Entrar" }}
                </button>
            </form>
        </section>
    }
}
