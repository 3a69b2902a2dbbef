//! Selection Field Component
//!
//! Dropdown for a reference id (client, material, operation) whose options
//! come from an async source. Options load once when the field mounts; a
//! failed load is retried when the dropdown gets focus again.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use orcamento_core::selection::{options_from, OptionsState, SelectOption};
use orcamento_core::{Entity, RecordId};

use crate::context::use_app;

type OptionsFuture = Pin<Box<dyn Future<Output = Result<Vec<SelectOption>, String>>>>;

/// Injected fetcher for a [`SelectionField`]
#[derive(Clone, Copy)]
pub struct OptionSource(StoredValue<Rc<dyn Fn() -> OptionsFuture>, LocalStorage>);

impl OptionSource {
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<Vec<SelectOption>, String>> + 'static,
    {
        let fetch: Rc<dyn Fn() -> OptionsFuture> = Rc::new(move || Box::pin(fetch()));
        Self(StoredValue::new_local(fetch))
    }

    /// Options listed from `GET /<collection>` of `T`
    pub fn entities<T: Entity>() -> Self {
        let ctx = use_app();
        Self::new(move || {
            let api = ctx.api();
            async move {
                api.list::<T>()
                    .await
                    .map(|records| options_from(&records))
                    .map_err(|e| e.to_string())
            }
        })
    }

    async fn fetch(self) -> Result<Vec<SelectOption>, String> {
        let fetch = self.0.get_value();
        fetch().await
    }

    /// Fetch into `options` unless a load is running or already succeeded
    pub fn load_into(self, options: RwSignal<OptionsState>) {
        if options.try_update(|s| s.begin_load()).unwrap_or(false) {
            spawn_local(async move {
                let result = self.fetch().await;
                options.update(|s| s.finish(result));
            });
        }
    }
}

/// One option list shared by every field that references the same collection
#[derive(Clone, Copy)]
pub struct SharedOptions {
    pub source: OptionSource,
    pub state: RwSignal<OptionsState>,
}

impl SharedOptions {
    pub fn new(source: OptionSource) -> Self {
        Self {
            source,
            state: RwSignal::new(OptionsState::default()),
        }
    }

    pub fn entities<T: Entity>() -> Self {
        Self::new(OptionSource::entities::<T>())
    }

    pub fn load(self) {
        self.source.load_into(self.state);
    }

    /// Tracked label lookup, the raw id until the options arrive
    pub fn label(self, id: &RecordId) -> String {
        self.state.with(|s| s.label_for(id))
    }
}

/// Reference dropdown
///
/// Pass a shared `options` signal to let many fields (every part of a
/// budget, say) share one fetch.
#[component]
pub fn SelectionField(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    source: OptionSource,
    #[prop(optional)] options: Option<RwSignal<OptionsState>>,
    #[prop(into, optional)] error: Signal<Option<String>>,
    #[prop(into, optional)] disabled: Signal<bool>,
) -> impl IntoView {
    let options = options.unwrap_or_else(|| RwSignal::new(OptionsState::default()));

    let load = move || source.load_into(options);

    Effect::new(move |_| load());

    // Current value not (yet) among the options: show it by id or label
    let unresolved = move || {
        let current = value.get();
        if current.is_empty() {
            return None;
        }
        options.with(|s| {
            let known = s.options().iter().any(|o| o.id.as_str() == current);
            (!known).then(|| (current.clone(), s.label_for(&RecordId::from(current.as_str()))))
        })
    };

    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <select
                class=move || if error.get().is_some() { "field-input invalid" } else { "field-input" }
                disabled=move || disabled.get()
                on:focus=move |_| load()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <option value="" disabled=true selected=move || value.get().is_empty()>
                    {move || if options.with(OptionsState::is_loading) { "Carregando..." } else { "Selecione" }}
                </option>
                {move || unresolved().map(|(id, text)| view! {
                    <option value=id selected=true>{text}</option>
                })}
                <For
                    each=move || options.with(|s| s.options().to_vec())
                    key=|opt| opt.id.clone()
                    children=move |opt| {
                        let id = opt.id.to_string();
                        let is_selected = {
                            let id = id.clone();
                            move || value.get() == id
                        };
                        view! { <option value=id selected=is_selected>{opt.label}</option> }
                    }
                />
            </select>
            {move || options.with(|s| s.error().map(|e| {
                let message = format!("Falha ao carregar opções: {e}");
                view! { <span class="field-error">{message}</span> }
            }))}
            {move || error.get().map(|e| view! { <span class="field-error">{e}</span> })}
        </label>
    }
}
