//! Record Form Fields Component
//!
//! Renders the inputs of a flat [`RecordForm`] bound to its open draft.

use leptos::prelude::*;

use orcamento_core::forms::{FieldSpec, Mask, RecordForm};

use crate::crud::Crud;
use crate::store::StoredEntity;

#[component]
pub fn FormFields<F>(crud: Crud<F::Record, F>) -> impl IntoView
where
    F: RecordForm + Send + Sync,
    F::Record: StoredEntity,
{
    F::FIELDS
        .iter()
        .map(|spec| field_input(crud, spec))
        .collect_view()
}

fn field_input<F>(crud: Crud<F::Record, F>, spec: &'static FieldSpec) -> impl IntoView
where
    F: RecordForm + Send + Sync,
    F::Record: StoredEntity,
{
    let key = spec.key;
    let value = move || crud.draft_with(|d| d.get(key)).unwrap_or_default();
    let error = move || crud.errors.with(|e| e.get(key).map(str::to_string));

    let on_input = move |ev| {
        let raw = event_target_value(&ev);
        crud.update_draft(|mut draft| {
            draft.input(key, &raw);
            draft
        });
        crud.errors.update(|e| e.clear(key));
    };

    let input_mode = match spec.mask {
        Mask::Currency => "decimal",
        Mask::Cnpj | Mask::Cep => "numeric",
        Mask::Phone => "tel",
        Mask::Plain => "text",
    };

    view! {
        <label class="field">
            <span class="field-label">
                {spec.label}
                {spec.required.then(|| view! { <span class="field-required">" *"</span> })}
            </span>
            <input
                type="text"
                class=move || if error().is_some() { "field-input invalid" } else { "field-input" }
                inputmode=input_mode
                name=key
                prop:value=value
                on:input=on_input
            />
            {move || error().map(|e| view! { <span class="field-error">{e}</span> })}
        </label>
    }
}
