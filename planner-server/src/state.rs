use std::sync::Arc;

use crate::store::TaskStore;

/// Shared application state
///
/// Holds no per-request memory; every handler goes straight to the store.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TaskStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        AppState { store }
    }

    pub fn store(&self) -> &dyn TaskStore {
        self.store.as_ref()
    }
}
