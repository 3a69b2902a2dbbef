//! Entity Page Component
//!
//! List screen for one flat collection (clients, materials, resources):
//! search box, table, "Novo" button and the record modal.

use std::marker::PhantomData;

use leptos::prelude::*;

use orcamento_core::forms::RecordForm;
use orcamento_core::{list, Capabilities, Entity};

use super::{FormFields, ModalView, RecordModal};
use crate::columns::ListColumns;
use crate::crud::Crud;
use crate::store::{use_app_store, StoredEntity};

/// Pass `form=PhantomData::<ClientForm>` to pick the collection
#[component]
pub fn EntityPage<F>(
    title: &'static str,
    /// Modal title while creating
    new_title: &'static str,
    form: PhantomData<F>,
) -> impl IntoView
where
    F: RecordForm + Send + Sync,
    F::Record: StoredEntity + ListColumns,
    <F::Record as Entity>::Payload: 'static,
{
    let _ = form;
    let store = use_app_store();
    let crud = Crud::<F::Record, F>::new(Capabilities::FULL);
    let search = RwSignal::new(String::new());

    Effect::new(move |_| crud.reload());

    let rows = move || {
        let items = <F::Record as StoredEntity>::items(store);
        let query = search.get();
        list::filter_by_label(&items, &query)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>()
    };

    let modal_title = move || {
        crud.session.with(|s| match s.as_ref() {
            Some(s) if s.is_creating() => new_title.to_string(),
            Some(s) => s.record().map(Entity::label).unwrap_or_default(),
            None => String::new(),
        })
    };
    let modal_view = move || {
        crud.session
            .with(|s| s.as_ref().map(ModalView::of).unwrap_or(ModalView::Viewing))
    };
    let modal_error = move || {
        crud.session
            .with(|s| s.as_ref().and_then(|s| s.error().map(str::to_string)))
    };
    let can_edit = move || crud.session.with(|s| s.as_ref().is_some_and(|s| s.can_edit()));
    let can_delete = move || crud.session.with(|s| s.as_ref().is_some_and(|s| s.can_delete()));

    let detail = move || {
        let rows = crud
            .session
            .with(|s| s.as_ref().and_then(|s| s.record()).map(F::detail_rows))
            .unwrap_or_default();
        view! {
            <dl class="detail-list">
                {rows
                    .into_iter()
                    .map(|(label, value)| view! {
                        <dt>{label}</dt>
                        <dd>{if value.is_empty() { "-".to_string() } else { value }}</dd>
                    })
                    .collect_view()}
            </dl>
        }
    };

    view! {
        <section class="entity-page">
            <header class="page-header">
                <h1>{title}</h1>
                <input
                    type="search"
                    class="search-input"
                    placeholder="Buscar..."
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <button class="btn btn-primary" on:click=move |_| crud.create(F::default())>"Novo"</button>
            </header>

            <table class="record-table">
                <thead>
                    <tr>
                        {<F::Record as ListColumns>::HEADERS.iter().map(|h| view! { <th>{*h}</th> }).collect_view()}
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=rows
                        key=|record| (record.id().clone(), record.cells())
                        children=move |record| {
                            let cells = record.cells();
                            view! {
                                <tr class="record-row" on:click=move |_| crud.open(record.clone())>
                                    {cells.into_iter().map(|c| view! { <td>{c}</td> }).collect_view()}
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            {move || {
                if crud.loading.get() {
                    Some(view! { <p class="list-empty">"Carregando..."</p> })
                } else if rows().is_empty() {
                    Some(view! { <p class="list-empty">"Nenhum registro encontrado"</p> })
                } else {
                    None
                }
            }}

            <Show when=move || crud.is_open()>
                <RecordModal
                    title=Signal::derive(modal_title)
                    view=Signal::derive(modal_view)
                    can_edit=Signal::derive(can_edit)
                    can_delete=Signal::derive(can_delete)
                    deleting=crud.deleting
                    error=Signal::derive(modal_error)
                    on_close=move |_| crud.close()
                    on_edit=move |_| crud.edit(F::from_record)
                    on_save=move |_| crud.save(F::to_payload)
                    on_cancel=move |_| crud.cancel()
                    on_delete=move |_| crud.delete()
                    detail=detail
                    form=move || view! { <FormFields crud=crud /> }
                />
            </Show>
        </section>
    }
}
