//! List patching after writes
//!
//! When the server echoes the saved record the list is patched in place;
//! otherwise the caller refetches.

use crate::domain::{Entity, RecordId};

/// Replace the record with the same id, or append it when it is new
pub fn upsert<T: Entity>(items: &mut Vec<T>, record: T) {
    match items.iter_mut().find(|r| r.id() == record.id()) {
        Some(slot) => *slot = record,
        None => items.push(record),
    }
}

/// Remove the record with `id`; `false` when it was not in the list
pub fn remove_by_id<T: Entity>(items: &mut Vec<T>, id: &RecordId) -> bool {
    let before = items.len();
    items.retain(|r| r.id() != id);
    before != items.len()
}

pub fn find_by_id<'a, T: Entity>(items: &'a [T], id: &RecordId) -> Option<&'a T> {
    items.iter().find(|r| r.id() == id)
}

/// Records whose label contains `query`, ignoring case
pub fn filter_by_label<'a, T: Entity>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let query = query.trim().to_lowercase();
    items
        .iter()
        .filter(|r| query.is_empty() || r.label().to_lowercase().contains(&query))
        .collect()
}
