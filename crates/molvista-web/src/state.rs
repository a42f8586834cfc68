//! Shared application state for the web server.

use std::sync::Arc;

use molvista_common::error::Result;
use molvista_common::CompoundRegistry;

/// Shared state injected into every Axum handler. The registry is built once
/// at startup and read-only afterwards, so no locking is needed.
pub struct AppState {
    pub registry: CompoundRegistry,
}

impl AppState {
    pub fn new() -> Result<Self> {
        Ok(Self {
            registry: CompoundRegistry::embedded()?,
        })
    }
}

pub type SharedState = Arc<AppState>;
