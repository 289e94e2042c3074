//! API server state

use std::sync::Arc;

use crate::service::{ContactService, StoredContactService};
use crate::storage::ContactStore;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Contact collaborator shared by every handler
    pub service: Arc<dyn ContactService>,
}

impl AppState {
    pub fn new(service: Arc<dyn ContactService>) -> Self {
        Self { service }
    }

    /// Create state backed by the default service over `store`
    pub fn with_store(store: Arc<dyn ContactStore>) -> Self {
        Self::new(Arc::new(StoredContactService::new(store)))
    }
}
