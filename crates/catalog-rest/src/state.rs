//! Application state for Axum handlers.

use catalog_core::HealthCheck;
use catalog_service::{AuthorService, MusicService};
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub author_service: Arc<dyn AuthorService>,
    pub music_service: Arc<dyn MusicService>,
    /// Dependency probed by the readiness endpoint, if any.
    pub readiness: Option<Arc<dyn HealthCheck>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(author_service: Arc<dyn AuthorService>, music_service: Arc<dyn MusicService>) -> Self {
        Self {
            author_service,
            music_service,
            readiness: None,
        }
    }

    /// Resolves the services from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module + HasComponent<dyn AuthorService> + HasComponent<dyn MusicService>,
    {
        Self::new(module.resolve(), module.resolve())
    }

    /// Sets the dependency checked by `/health/ready`.
    #[must_use]
    pub fn with_readiness(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.readiness = Some(check);
        self
    }
}
