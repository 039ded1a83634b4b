//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::EntityStore;

/// Application state shared across all handlers.
///
/// Cheap to clone. Holds the entity store chosen at startup, so handlers
/// never reach for a global connection.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn EntityStore>,
}

impl AppState {
    /// Create a new application state around `store`.
    #[must_use]
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    /// Get a reference to the entity store.
    #[must_use]
    pub fn store(&self) -> &dyn EntityStore {
        self.inner.store.as_ref()
    }
}
