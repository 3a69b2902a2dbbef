//! Log Panel Component
//!
//! Recent log lines kept by the console logger, newest first, for checking
//! what a failed request reported without opening the dev tools.

use leptos::prelude::*;

#[component]
pub fn LogPanel() -> impl IntoView {
    let lines = RwSignal::new(Vec::<String>::new());
    let refresh = move || {
        let mut recent = console_logger::recent();
        recent.reverse();
        lines.set(recent);
    };
    refresh();

    view! {
        <section class="entity-page">
            <header class="page-header">
                <h1>"Registros"</h1>
                <button class="btn" on:click=move |_| refresh()>"Atualizar"</button>
            </header>
            <Show
                when=move || !lines.with(Vec::is_empty)
                fallback=|| view! { <p class="list-empty">"Nenhum registro"</p> }
            >
                <pre class="log-lines">
                    {move || lines.get().join("\n")}
                </pre>
            </Show>
        </section>
    }
}
