//! List + modal controller
//!
//! Wires one collection's list fetch and its record modal session to the
//! API: open → edit → save (POST or PUT) → patch the list or refetch, and
//! delete. Both the flat entity pages and the budget page drive their views
//! through it.

use leptos::prelude::*;
use leptos::task::spawn_local;

use orcamento_core::session::SaveOutcome;
use orcamento_core::{ApiError, Capabilities, EditSession, Entity, Repository, ValidationErrors};

use crate::context::{use_app, AppContext};
use crate::store::{store_remove, store_replace, store_upsert, use_app_store, AppStore, StoredEntity};

pub struct Crud<R: 'static, D: 'static> {
    pub session: RwSignal<Option<EditSession<R, D>>>,
    pub errors: RwSignal<ValidationErrors>,
    pub loading: RwSignal<bool>,
    pub deleting: RwSignal<bool>,
    caps: Capabilities,
    ctx: AppContext,
    store: AppStore,
}

impl<R: 'static, D: 'static> Clone for Crud<R, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: 'static, D: 'static> Copy for Crud<R, D> {}

impl<R, D> Crud<R, D>
where
    R: StoredEntity,
    D: Clone + Send + Sync + 'static,
{
    pub fn new(caps: Capabilities) -> Self {
        Self {
            session: RwSignal::new(None),
            errors: RwSignal::new(ValidationErrors::new()),
            loading: RwSignal::new(false),
            deleting: RwSignal::new(false),
            caps,
            ctx: use_app(),
            store: use_app_store(),
        }
    }

    /// `GET` the collection into the store
    pub fn reload(self) {
        self.loading.set(true);
        let api = self.ctx.api();
        spawn_local(async move {
            match api.list::<R>().await {
                Ok(items) => {
                    log::debug!("loaded {} {}", items.len(), R::COLLECTION);
                    store_replace(self.store, items);
                }
                Err(err) => {
                    if matches!(err, ApiError::Decode(_) | ApiError::EmptyBody) {
                        store_replace::<R>(self.store, Vec::new());
                    }
                    self.ctx.report(&format!("Erro ao carregar {}", R::COLLECTION), &err);
                }
            }
            self.loading.set(false);
        });
    }

    pub fn open(self, record: R) {
        self.errors.set(ValidationErrors::new());
        self.session.set(Some(EditSession::view(record, self.caps)));
    }

    pub fn create(self, draft: D) {
        self.errors.set(ValidationErrors::new());
        self.session.set(Some(EditSession::create(draft, self.caps)));
    }

    pub fn edit(self, to_draft: impl FnOnce(&R) -> D) {
        self.session.update(|s| {
            if let Some(s) = s {
                s.begin_edit(to_draft);
            }
        });
    }

    pub fn update_draft(self, edit: impl FnOnce(D) -> D) {
        self.session.update(|s| {
            if let Some(s) = s {
                s.update_draft(edit);
            }
        });
    }

    /// Current draft text for one field of the form
    pub fn draft_with<T>(self, read: impl FnOnce(&D) -> T) -> Option<T> {
        self.session.with(|s| s.as_ref().and_then(|s| s.draft()).map(read))
    }

    pub fn cancel(self) {
        let close = self
            .session
            .try_update(|s| s.as_mut().map(|s| s.cancel()).unwrap_or(true))
            .unwrap_or(true);
        self.errors.set(ValidationErrors::new());
        if close {
            self.session.set(None);
        }
    }

    /// Close the modal; a request still in flight is ignored when it lands
    pub fn close(self) {
        self.session.update(|s| {
            if let Some(s) = s {
                s.abandon();
            }
        });
        self.session.set(None);
        self.errors.set(ValidationErrors::new());
    }

    /// Validate, then POST or PUT the draft
    pub fn save(self, to_payload: impl FnOnce(&D) -> Result<R::Payload, ValidationErrors>)
    where
        R::Payload: 'static,
    {
        let Some(draft) = self
            .session
            .with_untracked(|s| s.as_ref().and_then(|s| s.draft()).cloned())
        else {
            return;
        };
        let payload = match to_payload(&draft) {
            Ok(payload) => payload,
            Err(errors) => {
                log::debug!("{} form has {} invalid fields", R::COLLECTION, errors.len());
                self.errors.set(errors);
                self.ctx.notify_error("Corrija os campos destacados");
                return;
            }
        };
        self.errors.set(ValidationErrors::new());

        let Some(ticket) = self.session.try_update(|s| s.as_mut().and_then(|s| s.begin_save())).flatten() else {
            return;
        };
        let api = self.ctx.api();
        spawn_local(async move {
            let result = match Repository::<R>::save(&api, &ticket.target, &payload).await {
                Ok(echoed) => Ok(echoed),
                Err(err) => {
                    if err.is_unauthorized() {
                        self.ctx.report("Erro ao salvar", &err);
                    }
                    Err(err)
                }
            };
            let echoed = result.as_ref().ok().cloned().flatten();
            let failure = result.as_ref().err().filter(|e| !e.is_unauthorized()).map(ToString::to_string);

            let outcome = self
                .session
                .try_update(|s| {
                    s.as_mut()
                        .map(|s| s.finish_save(ticket.id, result.map_err(|e| e.to_string())))
                })
                .flatten()
                .unwrap_or(SaveOutcome::Stale);

            match outcome {
                SaveOutcome::Saved { .. } => {
                    self.ctx.notify_success("Salvo com sucesso");
                    let creating = self.session.with_untracked(|s| s.as_ref().is_some_and(|s| s.is_creating()));
                    match echoed {
                        Some(record) => store_upsert(self.store, record),
                        None => self.reload(),
                    }
                    if creating {
                        self.session.set(None);
                    }
                }
                SaveOutcome::Failed => {
                    if let Some(message) = failure {
                        self.ctx.notify_error(format!("Erro ao salvar: {message}"));
                    }
                }
                SaveOutcome::Stale => {
                    // modal closed meanwhile: still reflect the write in the list
                    if let Some(record) = echoed {
                        store_upsert(self.store, record);
                    } else {
                        self.reload();
                    }
                }
            }
        });
    }

    /// DELETE the record shown in the modal
    pub fn delete(self) {
        let Some(id) = self
            .session
            .with_untracked(|s| s.as_ref().and_then(|s| s.record().map(|r| r.id().clone())))
        else {
            return;
        };
        self.deleting.set(true);
        let api = self.ctx.api();
        spawn_local(async move {
            match api.delete::<R>(&id).await {
                Ok(()) => {
                    store_remove::<R>(self.store, &id);
                    self.session.set(None);
                    self.ctx.notify_success("Registro excluído");
                }
                Err(err) => self.ctx.report("Erro ao excluir", &err),
            }
            self.deleting.set(false);
        });
    }

    pub fn is_open(self) -> bool {
        self.session.with(Option::is_some)
    }
}
