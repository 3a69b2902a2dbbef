//! Record Modal Component
//!
//! Detail dialog for one record. Toggles between a read-only view and an
//! edit form; every action goes back to the caller through callbacks, the
//! modal itself never talks to the API.

use leptos::prelude::*;

use orcamento_core::session::ModalMode;
use orcamento_core::{EditSession, Entity};

use super::DeleteConfirmButton;

/// What the modal body shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalView {
    Viewing,
    Editing,
    Saving,
}

impl ModalView {
    pub fn of<R: Entity, D: Clone>(session: &EditSession<R, D>) -> Self {
        match session.mode() {
            ModalMode::Viewing => ModalView::Viewing,
            ModalMode::Editing(_) => ModalView::Editing,
            ModalMode::Saving(_) => ModalView::Saving,
        }
    }
}

#[component]
pub fn RecordModal(
    #[prop(into)] title: Signal<String>,
    #[prop(into)] view: Signal<ModalView>,
    #[prop(into)] can_edit: Signal<bool>,
    #[prop(into)] can_delete: Signal<bool>,
    #[prop(into, optional)] deleting: Signal<bool>,
    #[prop(into, optional)] error: Signal<Option<String>>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_edit: Callback<()>,
    #[prop(into)] on_save: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
    #[prop(into)] on_delete: Callback<()>,
    /// Read-only body
    #[prop(into)]
    detail: ViewFn,
    /// Edit form body
    #[prop(into)]
    form: ViewFn,
) -> impl IntoView {
    let editing = move || view.get() != ModalView::Viewing;
    let saving = move || view.get() == ModalView::Saving;

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if !saving() {
            on_save.run(());
        }
    };

    view! {
        <div
            class="modal-backdrop"
            on:click=move |_| {
                if !editing() {
                    on_close.run(());
                }
            }
        >
            <div class="modal" role="dialog" on:click=|ev| ev.stop_propagation()>
                <header class="modal-header">
                    <h2>{move || title.get()}</h2>
                    <button class="modal-close" title="Fechar" on:click=move |_| on_close.run(())>"×"</button>
                </header>

                {move || error.get().map(|e| view! { <div class="modal-error">{e}</div> })}

                <Show
                    when=editing
                    fallback=move || view! {
                        <div class="modal-body">{detail.run()}</div>
                        <footer class="modal-actions">
                            <Show when=move || can_edit.get()>
                                <button class="btn btn-primary" on:click=move |_| on_edit.run(())>"Editar"</button>
                            </Show>
                            <Show when=move || can_delete.get()>
                                <DeleteConfirmButton on_confirm=on_delete disabled=deleting />
                            </Show>
                            <button class="btn" on:click=move |_| on_close.run(())>"Fechar"</button>
                        </footer>
                    }
                >
                    <form class="modal-body" on:submit=on_submit>
                        <fieldset disabled=saving>{form.run()}</fieldset>
                        <footer class="modal-actions">
                            <button type="submit" class="btn btn-primary" disabled=saving>
                                {move || if saving() { "Salvando..." } else { "Salvar" }}
                            </button>
                            <button type="button" class="btn" disabled=saving on:click=move |_| on_cancel.run(())>
                                "Cancelar"
                            </button>
                        </footer>
                    </form>
                </Show>
            </div>
        </div>
    }
}
