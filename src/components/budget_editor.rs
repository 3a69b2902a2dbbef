//! Budget Editor Component
//!
//! Edit form for a budget: header fields, then tools → parts → operation
//! usages with add/remove at every level. Every input reads and writes the
//! open draft through its [`FieldPath`], so a keystroke replaces exactly
//! one leaf. Rows are keyed by position; removing a row shifts the rows
//! below it up and they re-read their values from the new index.

use leptos::prelude::*;

use orcamento_core::domain::{Budget, Client};
use orcamento_core::editor::{BudgetField, OperationField, PartField, ToolField};
use orcamento_core::{list, BudgetDraft, FieldPath, RecordId, ValidationErrors};

use super::{SelectionField, SharedOptions};
use crate::crud::Crud;
use crate::store::{use_app_store, StoredEntity};

type BudgetCrud = Crud<Budget, BudgetDraft>;

/// Option lists the editor picks references from, fetched once per page
#[derive(Clone, Copy)]
pub struct BudgetLookups {
    pub clients: SharedOptions,
    pub materials: SharedOptions,
    pub resources: SharedOptions,
}

impl BudgetLookups {
    pub fn load(self) {
        self.clients.load();
        self.materials.load();
        self.resources.load();
    }
}

/// Hours as shown in lists and totals (`12,5 h`)
pub fn format_hours(hours: f64) -> String {
    let text = format!("{hours:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{} h", text.replace('.', ","))
}

fn field_text(crud: BudgetCrud, path: FieldPath) -> impl Fn() -> String + Copy + Send + Sync + 'static {
    move || crud.draft_with(|d| d.get_field(path)).flatten().unwrap_or_default()
}

fn field_error(crud: BudgetCrud, path: FieldPath) -> Signal<Option<String>> {
    Signal::derive(move || crud.errors.with(|e| e.get(&path.key()).map(str::to_string)))
}

fn write_field(crud: BudgetCrud, path: FieldPath, value: String) {
    crud.update_draft(|d| d.set_field(path, value));
    crud.errors.update(|e| e.clear(&path.key()));
}

/// Add or remove a row; indexed error keys no longer line up afterwards
fn restructure(crud: BudgetCrud, change: impl FnOnce(BudgetDraft) -> BudgetDraft) {
    crud.update_draft(change);
    crud.errors.set(ValidationErrors::new());
}

#[component]
fn DraftInput(
    crud: BudgetCrud,
    path: FieldPath,
    label: &'static str,
    #[prop(optional)] numeric: bool,
) -> impl IntoView {
    let value = field_text(crud, path);
    let error = field_error(crud, path);

    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <input
                type="text"
                class=move || if error.get().is_some() { "field-input invalid" } else { "field-input" }
                inputmode={if numeric { "decimal" } else { "text" }}
                prop:value=value
                on:input=move |ev| write_field(crud, path, event_target_value(&ev))
            />
            {move || error.get().map(|e| view! { <span class="field-error">{e}</span> })}
        </label>
    }
}

#[component]
fn DraftSelect(crud: BudgetCrud, path: FieldPath, label: &'static str, options: SharedOptions) -> impl IntoView {
    view! {
        <SelectionField
            label=label
            value=Signal::derive(field_text(crud, path))
            on_change=move |id: String| write_field(crud, path, id)
            source=options.source
            options=options.state
            error=field_error(crud, path)
        />
    }
}

#[component]
pub fn BudgetEditor(crud: BudgetCrud, lookups: BudgetLookups) -> impl IntoView {
    let store = use_app_store();
    let tool_count = Memo::new(move |_| crud.draft_with(|d| d.tools.len()).unwrap_or(0));
    let client_path = FieldPath::Budget(BudgetField::Client);

    // picking a client fills an empty contact with the client's contact person
    let on_client = move |id: String| {
        let contact = crud.draft_with(|d| d.contact.clone()).unwrap_or_default();
        if contact.trim().is_empty() {
            let clients = Client::items(store);
            if let Some(client) = list::find_by_id(&clients, &RecordId::from(id.as_str())) {
                write_field(crud, FieldPath::Budget(BudgetField::Contact), client.data.contato_nome.clone());
            }
        }
        write_field(crud, client_path, id);
    };

    let total = move || format_hours(crud.draft_with(BudgetDraft::total_hours).unwrap_or(0.0));

    view! {
        <div class="budget-editor">
            <DraftInput crud=crud path=FieldPath::Budget(BudgetField::Name) label="Nome" />
            <SelectionField
                label="Cliente"
                value=Signal::derive(field_text(crud, client_path))
                on_change=on_client
                source=lookups.clients.source
                options=lookups.clients.state
                error=field_error(crud, client_path)
            />
            <DraftInput crud=crud path=FieldPath::Budget(BudgetField::Contact) label="Contato" />

            <h3 class="editor-section">"Ferramentas"</h3>
            <For
                each=move || 0..tool_count.get()
                key=|i| *i
                children=move |tool| view! { <ToolEditor crud=crud lookups=lookups tool=tool /> }
            />
            <button type="button" class="btn" on:click=move |_| restructure(crud, BudgetDraft::add_tool)>
                "+ Ferramenta"
            </button>

            <p class="editor-total">"Total de horas: " {total}</p>
        </div>
    }
}

#[component]
fn ToolEditor(crud: BudgetCrud, lookups: BudgetLookups, tool: usize) -> impl IntoView {
    let part_count = Memo::new(move |_| {
        crud.draft_with(|d| d.tool(tool).map_or(0, |t| t.parts.len()))
            .unwrap_or(0)
    });

    view! {
        <fieldset class="tool-card">
            <legend>{format!("Ferramenta {}", tool + 1)}</legend>
            <div class="row-fields">
                <DraftInput crud=crud path=FieldPath::tool(tool, ToolField::Name) label="Nome" />
                <DraftInput crud=crud path=FieldPath::tool(tool, ToolField::Quantity) label="Quantidade" numeric=true />
                <button
                    type="button"
                    class="btn btn-danger"
                    on:click=move |_| restructure(crud, move |d| d.remove_tool(tool))
                >
                    "Remover ferramenta"
                </button>
            </div>
            <For
                each=move || 0..part_count.get()
                key=|i| *i
                children=move |part| view! { <PartEditor crud=crud lookups=lookups tool=tool part=part /> }
            />
            <button type="button" class="btn" on:click=move |_| restructure(crud, move |d| d.add_part(tool))>
                "+ Peça"
            </button>
        </fieldset>
    }
}

#[component]
fn PartEditor(crud: BudgetCrud, lookups: BudgetLookups, tool: usize, part: usize) -> impl IntoView {
    let op_count = Memo::new(move |_| {
        crud.draft_with(|d| d.part(tool, part).map_or(0, |p| p.operations.len()))
            .unwrap_or(0)
    });
    let path = move |field| FieldPath::part(tool, part, field);

    view! {
        <fieldset class="part-card">
            <legend>{format!("Peça {}", part + 1)}</legend>
            <div class="row-fields">
                <DraftInput crud=crud path=path(PartField::Name) label="Nome" />
                <DraftInput crud=crud path=path(PartField::Quantity) label="Quantidade" numeric=true />
                <DraftSelect crud=crud path=path(PartField::Material) label="Material" options=lookups.materials />
                <DraftInput crud=crud path=path(PartField::Weight) label="Peso (kg)" numeric=true />
                <DraftInput crud=crud path=path(PartField::Note) label="Nota" />
                <button
                    type="button"
                    class="btn btn-danger"
                    on:click=move |_| restructure(crud, move |d| d.remove_part(tool, part))
                >
                    "Remover peça"
                </button>
            </div>
            <For
                each=move || 0..op_count.get()
                key=|i| *i
                children=move |op| {
                    let path = move |field| FieldPath::operation(tool, part, op, field);
                    view! {
                        <div class="row-fields operation-row">
                            <DraftSelect
                                crud=crud
                                path=path(OperationField::Operation)
                                label="Operação"
                                options=lookups.resources
                            />
                            <DraftInput crud=crud path=path(OperationField::Hours) label="Horas" numeric=true />
                            <button
                                type="button"
                                class="btn btn-danger"
                                on:click=move |_| restructure(crud, move |d| d.remove_operation_usage(tool, part, op))
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
            <button
                type="button"
                class="btn"
                on:click=move |_| restructure(crud, move |d| d.add_operation_usage(tool, part))
            >
                "+ Operação"
            </button>
        </fieldset>
    }
}
