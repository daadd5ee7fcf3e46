//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor and
//! handed to the reaper task. The catalog and session store are built once in
//! `main` and passed down explicitly, so tests can stand up isolated copies.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::catalog::ProductCatalog;
use crate::services::session::SessionStore;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ProductCatalog>,
    pub sessions: SessionStore,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: ProductCatalog, config: ServerConfig) -> Self {
        let catalog = Arc::new(catalog);
        let sessions = SessionStore::new(Arc::clone(&catalog)).with_option_enforcement(config.enforce_options);
        Self { catalog, sessions, config: Arc::new(config) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
