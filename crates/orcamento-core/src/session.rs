//! Record Modal Session
//!
//! State machine behind the detail modal:
//!
//! ```text
//! Viewing ──edit──▶ Editing(draft) ──save──▶ Saving(draft) ──ok──▶ Viewing
//!    ▲                 │    ▲                     │
//!    └─────cancel──────┘    └───────failure───────┘
//! ```
//!
//! A session opened for a new record starts in `Editing` with no record and
//! saves with POST instead of PUT. Persistence itself happens outside; the
//! session hands out a [`SaveTicket`] and accepts the result back only if the
//! ticket is still current.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{Entity, RecordId};

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// What the modal may offer for a record type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub can_edit: bool,
    pub can_delete: bool,
}

impl Capabilities {
    pub const FULL: Capabilities = Capabilities {
        can_edit: true,
        can_delete: true,
    };

    pub const READ_ONLY: Capabilities = Capabilities {
        can_edit: false,
        can_delete: false,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalMode<D> {
    Viewing,
    Editing(D),
    Saving(D),
}

/// Request to issue for a save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    /// POST to the collection
    Create,
    /// PUT to the record
    Update(RecordId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveTicket<D> {
    pub id: u64,
    pub target: SaveTarget,
    pub draft: D,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Ticket no longer current, result dropped
    Stale,
    /// Back to viewing; `true` when the server echoed the record
    Saved { echoed: bool },
    /// Back to editing with the draft intact
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditSession<R, D> {
    record: Option<R>,
    mode: ModalMode<D>,
    caps: Capabilities,
    ticket: Option<u64>,
    error: Option<String>,
}

impl<R: Entity, D: Clone> EditSession<R, D> {
    /// Open an existing record read-only
    pub fn view(record: R, caps: Capabilities) -> Self {
        Self {
            record: Some(record),
            mode: ModalMode::Viewing,
            caps,
            ticket: None,
            error: None,
        }
    }

    /// Open an empty draft for a record that does not exist yet
    pub fn create(draft: D, caps: Capabilities) -> Self {
        Self {
            record: None,
            mode: ModalMode::Editing(draft),
            caps,
            ticket: None,
            error: None,
        }
    }

    pub fn record(&self) -> Option<&R> {
        self.record.as_ref()
    }

    pub fn mode(&self) -> &ModalMode<D> {
        &self.mode
    }

    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    pub fn is_creating(&self) -> bool {
        self.record.is_none()
    }

    pub fn is_saving(&self) -> bool {
        matches!(self.mode, ModalMode::Saving(_))
    }

    /// Draft being edited or saved
    pub fn draft(&self) -> Option<&D> {
        match &self.mode {
            ModalMode::Editing(d) | ModalMode::Saving(d) => Some(d),
            ModalMode::Viewing => None,
        }
    }

    /// Last save error, cleared on the next edit or save
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_edit(&self) -> bool {
        self.caps.can_edit && matches!(self.mode, ModalMode::Viewing) && self.record.is_some()
    }

    pub fn can_delete(&self) -> bool {
        self.caps.can_delete && matches!(self.mode, ModalMode::Viewing) && self.record.is_some()
    }

    /// Viewing → Editing with a detached draft of the record
    pub fn begin_edit(&mut self, to_draft: impl FnOnce(&R) -> D) -> bool {
        if !self.can_edit() {
            return false;
        }
        if let Some(record) = &self.record {
            self.mode = ModalMode::Editing(to_draft(record));
            self.error = None;
            return true;
        }
        false
    }

    /// Apply one edit to the draft; ignored unless editing
    pub fn update_draft(&mut self, edit: impl FnOnce(D) -> D) {
        if let ModalMode::Editing(d) = &mut self.mode {
            *d = edit(d.clone());
            self.error = None;
        }
    }

    /// Drop the draft. Returns `true` when the modal should close (a new
    /// record has nothing to fall back to).
    pub fn cancel(&mut self) -> bool {
        match self.mode {
            ModalMode::Editing(_) => {
                self.mode = ModalMode::Viewing;
                self.error = None;
                self.record.is_none()
            }
            ModalMode::Saving(_) => false,
            ModalMode::Viewing => self.record.is_none(),
        }
    }

    /// Editing → Saving; returns the request to issue
    pub fn begin_save(&mut self) -> Option<SaveTicket<D>> {
        let draft = match &self.mode {
            ModalMode::Editing(d) => d.clone(),
            _ => return None,
        };
        let id = NEXT_TICKET.fetch_add(1, Ordering::Relaxed);
        let target = match &self.record {
            Some(r) => SaveTarget::Update(r.id().clone()),
            None => SaveTarget::Create,
        };
        self.mode = ModalMode::Saving(draft.clone());
        self.ticket = Some(id);
        self.error = None;
        Some(SaveTicket { id, target, draft })
    }

    /// Accept the outcome of the request issued for `ticket`
    ///
    /// `Ok(Some(record))` replaces the shown record; `Ok(None)` means the
    /// server did not echo it and the caller should refetch.
    pub fn finish_save(&mut self, ticket: u64, result: Result<Option<R>, String>) -> SaveOutcome {
        if self.ticket != Some(ticket) {
            log::debug!("dropping stale save response (ticket {ticket})");
            return SaveOutcome::Stale;
        }
        self.ticket = None;
        let draft = match std::mem::replace(&mut self.mode, ModalMode::Viewing) {
            ModalMode::Saving(d) => d,
            other => {
                self.mode = other;
                return SaveOutcome::Stale;
            }
        };
        match result {
            Ok(echoed) => {
                let was_echoed = echoed.is_some();
                if echoed.is_some() {
                    self.record = echoed;
                }
                SaveOutcome::Saved { echoed: was_echoed }
            }
            Err(e) => {
                self.mode = ModalMode::Editing(draft);
                self.error = Some(e);
                SaveOutcome::Failed
            }
        }
    }

    /// Invalidate any request in flight; its response will be dropped
    pub fn abandon(&mut self) {
        self.ticket = None;
    }
}
