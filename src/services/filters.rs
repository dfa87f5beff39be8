use std::sync::Arc;

use crate::{
    models::FilterState,
    storage::{KeyValueStore, Loaded, Saved, ScopedStore, FILTERS_PREFIX},
};

/// Persisted search/filter selections, one record per user
#[derive(Clone)]
pub struct FilterStore {
    scoped: ScopedStore,
}

impl FilterStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            scoped: ScopedStore::new(backend, FILTERS_PREFIX),
        }
    }

    /// Replaces the stored record with `filters`
    pub fn save(&self, identity: Option<&str>, filters: &FilterState) -> Saved {
        self.scoped.save(identity, filters)
    }

    /// Restores the stored record over `current`, field by field
    pub fn load(&self, identity: Option<&str>, current: FilterState) -> Loaded<FilterState> {
        self.scoped.load(identity, current)
    }

    pub fn key(&self, identity: Option<&str>) -> String {
        self.scoped.key(identity)
    }
}
