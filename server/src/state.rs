//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds read-only configuration and the reference-number source; requests
//! share nothing mutable.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::reference::{RefSource, SystemSource};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub refs: Arc<dyn RefSource>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self::with_source(config, Arc::new(SystemSource))
    }

    #[must_use]
    pub fn with_source(config: ServerConfig, refs: Arc<dyn RefSource>) -> Self {
        Self { config: Arc::new(config), refs }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
