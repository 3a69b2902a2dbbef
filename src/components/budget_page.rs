//! Budget Page Component
//!
//! Budget list with client names and hour totals, plus the record modal
//! hosting the nested editor.

use leptos::prelude::*;

use orcamento_core::domain::{Budget, BudgetPayload, Client, Material, Resource};
use orcamento_core::selection::options_from;
use orcamento_core::{list, BudgetDraft, Capabilities, Entity, ValidationErrors};

use super::budget_editor::format_hours;
use super::{BudgetEditor, BudgetLookups, ModalView, OptionSource, RecordModal, SharedOptions};
use crate::context::use_app;
use crate::crud::Crud;
use crate::store::{store_replace, use_app_store, StoredEntity};

/// Required fields and numbers both have to pass before anything is sent
fn budget_payload(draft: &BudgetDraft) -> Result<BudgetPayload, ValidationErrors> {
    draft.validate().into_result()?;
    draft.serialize()
}

#[component]
pub fn BudgetPage() -> impl IntoView {
    let ctx = use_app();
    let store = use_app_store();
    let crud = Crud::<Budget, BudgetDraft>::new(Capabilities::FULL);
    let search = RwSignal::new(String::new());

    // client options double as the list's name lookup, and the records go
    // to the store so the editor can read contact names
    let clients = SharedOptions::new(OptionSource::new(move || {
        let api = ctx.api();
        async move {
            let records = api.list::<Client>().await.map_err(|e| e.to_string())?;
            let options = options_from(&records);
            store_replace(store, records);
            Ok(options)
        }
    }));
    let lookups = BudgetLookups {
        clients,
        materials: SharedOptions::entities::<Material>(),
        resources: SharedOptions::entities::<Resource>(),
    };

    Effect::new(move |_| {
        crud.reload();
        lookups.load();
    });

    let rows = move || {
        let items = Budget::items(store);
        let query = search.get();
        list::filter_by_label(&items, &query)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>()
    };

    let modal_title = move || {
        crud.session.with(|s| match s.as_ref() {
            Some(s) if s.is_creating() => "Novo orçamento".to_string(),
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
        crud.session
            .with(|s| s.as_ref().and_then(|s| s.record()).cloned())
            .map(|budget| view! { <BudgetDetail budget=budget lookups=lookups /> })
    };

    view! {
        <section class="entity-page">
            <header class="page-header">
                <h1>"Orçamentos"</h1>
                <input
                    type="search"
                    class="search-input"
                    placeholder="Buscar..."
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <button
                    class="btn btn-primary"
                    on:click=move |_| crud.create(BudgetDraft::new().add_tool())
                >
                    "Novo"
                </button>
            </header>

            <table class="record-table">
                <thead>
                    <tr>
                        <th>"Nome"</th>
                        <th>"Cliente"</th>
                        <th>"Contato"</th>
                        <th>"Criado em"</th>
                        <th>"Horas"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || rows()
                        .into_iter()
                        .map(|budget| {
                            let client_id = budget.cliente_id.clone();
                            let client = move || lookups.clients.label(&client_id);
                            let created = budget.created_at_display().unwrap_or_else(|| "-".into());
                            let hours = format_hours(budget.total_hours());
                            let name = budget.name.clone();
                            let contact = budget.contact.clone();
                            view! {
                                <tr class="record-row" on:click=move |_| crud.open(budget.clone())>
                                    <td>{name}</td>
                                    <td>{client}</td>
                                    <td>{contact}</td>
                                    <td>{created}</td>
                                    <td>{hours}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
            {move || {
                if crud.loading.get() {
                    Some(view! { <p class="list-empty">"Carregando..."</p> })
                } else if rows().is_empty() {
                    Some(view! { <p class="list-empty">"Nenhum orçamento encontrado"</p> })
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
                    on_edit=move |_| crud.edit(BudgetDraft::from_record)
                    on_save=move |_| crud.save(budget_payload)
                    on_cancel=move |_| crud.cancel()
                    on_delete=move |_| crud.delete()
                    detail=detail
                    form=move || view! { <BudgetEditor crud=crud lookups=lookups /> }
                />
            </Show>
        </section>
    }
}

/// Read-only tree of a stored budget
#[component]
fn BudgetDetail(budget: Budget, lookups: BudgetLookups) -> impl IntoView {
    // legacy flat records show through the same regrouping the editor uses
    let draft = BudgetDraft::from_record(&budget);
    let client_id = budget.cliente_id.clone();
    let created = budget.created_at_display().unwrap_or_else(|| "-".into());

    let tools = draft
        .tools
        .into_iter()
        .map(|tool| {
            let parts = tool
                .parts
                .into_iter()
                .map(|part| {
                    let material_id = part.material_ref.clone();
                    let operations = part
                        .operations
                        .into_iter()
                        .map(|usage| {
                            let operation_id = usage.operation_ref.clone();
                            view! {
                                <li>
                                    {move || lookups.resources.label(&operation_id)}
                                    ": "
                                    {usage.hours.to_string()}
                                    " h"
                                </li>
                            }
                        })
                        .collect_view();
                    view! {
                        <li class="detail-part">
                            <strong>{part.name}</strong>
                            {format!(" × {}", part.quantity)}
                            " · "
                            {move || lookups.materials.label(&material_id)}
                            {format!(" · {} kg", part.weight)}
                            {(!part.note.is_empty()).then(|| format!(" · {}", part.note))}
                            <ul>{operations}</ul>
                        </li>
                    }
                })
                .collect_view();
            view! {
                <li class="detail-tool">
                    <strong>{tool.name}</strong>
                    {format!(" × {}", tool.quantity)}
                    <ul>{parts}</ul>
                </li>
            }
        })
        .collect_view();

    view! {
        <dl class="detail-list">
            <dt>"Nome"</dt>
            <dd>{budget.name.clone()}</dd>
            <dt>"Cliente"</dt>
            <dd>{move || lookups.clients.label(&client_id)}</dd>
            <dt>"Contato"</dt>
            <dd>{budget.contact.clone()}</dd>
            <dt>"Criado em"</dt>
            <dd>{created}</dd>
            <dt>"Total de horas"</dt>
            <dd>{format_hours(budget.total_hours())}</dd>
        </dl>
        <h3 class="editor-section">"Ferramentas"</h3>
        <ul class="detail-tree">{tools}</ul>
    }
}
