//! Application state for the HTTP server.

use std::sync::Arc;
use crate::db::repository::VolumeRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of interval volume records
    pub repository: Arc<dyn VolumeRepository>,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn VolumeRepository>) -> Self {
        Self { repository }
    }
}
