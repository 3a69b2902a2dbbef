//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Each collection
//! holds the last list fetched from the API; writes patch it in place.

use leptos::prelude::*;
use reactive_stores::Store;

use orcamento_core::domain::{Budget, Client, Material, Resource};
use orcamento_core::{list, Entity, RecordId};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub clients: Vec<Client>,
    pub materials: Vec<Material>,
    pub resources: Vec<Resource>,
    pub budgets: Vec<Budget>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Maps a record type to its collection in the store
pub trait StoredEntity: Entity + Send + Sync {
    /// Tracked read of the whole collection
    fn items(store: AppStore) -> Vec<Self>;

    fn update(store: AppStore, edit: impl FnOnce(&mut Vec<Self>));
}

macro_rules! stored_entity {
    ($ty:ty, $field:ident) => {
        impl StoredEntity for $ty {
            fn items(store: AppStore) -> Vec<Self> {
                store.$field().get()
            }

            fn update(store: AppStore, edit: impl FnOnce(&mut Vec<Self>)) {
                edit(&mut store.$field().write());
            }
        }
    };
}

stored_entity!(Client, clients);
stored_entity!(Material, materials);
stored_entity!(Resource, resources);
stored_entity!(Budget, budgets);

// ========================
// Store Helper Functions
// ========================

/// Replace a collection with a freshly fetched list
pub fn store_replace<T: StoredEntity>(store: AppStore, items: Vec<T>) {
    T::update(store, |list| *list = items);
}

/// Insert or update a record by ID
pub fn store_upsert<T: StoredEntity>(store: AppStore, record: T) {
    T::update(store, |items| list::upsert(items, record));
}

/// Remove a record by ID
pub fn store_remove<T: StoredEntity>(store: AppStore, id: &RecordId) {
    T::update(store, |items| {
        list::remove_by_id(items, id);
    });
}
