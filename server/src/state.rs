//! Shared application state.
//!
//! DESIGN
//! ======
//! The server holds no per-user data: auth and item storage live in
//! Supabase. `AppState` only carries the validated process configuration.

use std::sync::Arc;

use crate::config::AppConfig;

/// Injected into Axum handlers via the `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self { config: Arc::new(config) }
    }
}
