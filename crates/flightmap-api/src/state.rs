use std::sync::Arc;

use flightmap_core::RouteStore;

/// Handler state. The store is fully loaded before the router is built and
/// never written again, so it is shared without a lock.
#[derive(Clone)]
pub struct AppState {
    store: Arc<RouteStore>,
}

impl AppState {
    pub fn new(store: RouteStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &RouteStore {
        &self.store
    }
}
