use std::sync::Arc;

use crate::database::TenantRegistry;

/// Shared application state. The registry is constructed once at startup
/// and reaches every handler through here; nothing hangs off module-level
/// globals.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<TenantRegistry>,
}

impl AppState {
    pub fn new(registry: TenantRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}
