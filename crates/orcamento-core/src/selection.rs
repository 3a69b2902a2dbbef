//! Selection Options
//!
//! Load state behind a reference dropdown (client, material, operation).
//! Options are fetched lazily, at most one fetch in flight, and a value held
//! before they arrive is shown as its raw id until it can be resolved.

use crate::domain::{Entity, RecordId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub id: RecordId,
    pub label: String,
}

impl SelectOption {
    pub fn from_entity<T: Entity>(record: &T) -> Self {
        Self {
            id: record.id().clone(),
            label: record.label(),
        }
    }
}

/// Options for a list of records, in list order
pub fn options_from<T: Entity>(records: &[T]) -> Vec<SelectOption> {
    records.iter().map(SelectOption::from_entity).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OptionsState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<SelectOption>),
    Failed(String),
}

impl OptionsState {
    /// Claim the fetch. Returns `true` when the caller should start one:
    /// nothing loaded yet, or the previous attempt failed.
    pub fn begin_load(&mut self) -> bool {
        match self {
            OptionsState::Idle | OptionsState::Failed(_) => {
                *self = OptionsState::Loading;
                true
            }
            OptionsState::Loading | OptionsState::Loaded(_) => false,
        }
    }

    pub fn finish(&mut self, result: Result<Vec<SelectOption>, String>) {
        *self = match result {
            Ok(options) => OptionsState::Loaded(options),
            Err(e) => {
                log::warn!("failed to load options: {e}");
                OptionsState::Failed(e)
            }
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, OptionsState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            OptionsState::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn options(&self) -> &[SelectOption] {
        match self {
            OptionsState::Loaded(options) => options,
            _ => &[],
        }
    }

    /// Label for `id`, falling back to the id itself while unresolved
    pub fn label_for(&self, id: &RecordId) -> String {
        self.options()
            .iter()
            .find(|o| &o.id == id)
            .map(|o| o.label.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Material, MaterialPayload};

    fn options() -> Vec<SelectOption> {
        vec![
            SelectOption { id: "1".into(), label: "Aço".into() },
            SelectOption { id: "2".into(), label: "Latão".into() },
        ]
    }

    #[test]
    fn test_value_before_load_resolves_after_single_fetch() {
        let mut state = OptionsState::default();
        let value = RecordId::from("2");
        assert_eq!(state.label_for(&value), "2");

        let mut fetches = 0;
        if state.begin_load() {
            fetches += 1;
        }
        // opening the dropdown again while the request is in flight
        if state.begin_load() {
            fetches += 1;
        }
        assert!(state.is_loading());
        assert_eq!(state.label_for(&value), "2");

        state.finish(Ok(options()));
        if state.begin_load() {
            fetches += 1;
        }
        assert_eq!(fetches, 1);
        assert_eq!(state.label_for(&value), "Latão");
    }

    #[test]
    fn test_failed_load_can_retry() {
        let mut state = OptionsState::default();
        assert!(state.begin_load());
        state.finish(Err("HTTP 500".into()));
        assert_eq!(state.error(), Some("HTTP 500"));
        assert!(state.options().is_empty());
        assert!(state.begin_load());
    }

    #[test]
    fn test_unknown_id_shows_raw() {
        let mut state = OptionsState::default();
        state.begin_load();
        state.finish(Ok(options()));
        assert_eq!(state.label_for(&"99".into()), "99");
    }

    #[test]
    fn test_options_from_entities() {
        let materials = vec![Material {
            id: "5".into(),
            data: MaterialPayload { name: "Cobre".into(), ..Default::default() },
        }];
        assert_eq!(
            options_from(&materials),
            vec![SelectOption { id: "5".into(), label: "Cobre".into() }]
        );
    }
}
