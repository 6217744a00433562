//! Data access for interval volume records.
//!
//! This module provides abstractions for fetching volume data via the
//! Repository pattern, allowing different data sources to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, CLI)                      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Dashboard service (services::dashboard)                │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository) - Abstract Interface     │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!        ┌────────────┴─────────────┐
//!        │                          │
//!  ┌─────▼──────────┐      ┌────────▼────────┐
//!  │ MockRepository │      │ LocalRepository │
//!  │ (seeded)       │      │ (in-memory)     │
//!  └────────────────┘      └─────────────────┘
//! ```
//!
//! The repository is selected by `TCI_CONFIG` (path to a TOML file) when
//! set, otherwise by the `REPOSITORY_TYPE` and `MOCK_SEED` variables.

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::{LineOfBusinessSettings, MockSettings, RepositoryConfig};
pub use repositories::{LocalRepository, MockRepository};
pub use repository::{ErrorContext, RepositoryError, RepositoryResult, VolumeRepository};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn VolumeRepository>> = OnceLock::new();

fn create_selected_repository() -> RepositoryResult<Arc<dyn VolumeRepository>> {
    match std::env::var("TCI_CONFIG") {
        Ok(path) if !path.trim().is_empty() => RepositoryFactory::from_config_file(path),
        _ => RepositoryFactory::from_env(),
    }
}

/// Initialize the global repository singleton.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = create_selected_repository().map_err(|e| anyhow::Error::msg(e.to_string()))?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn VolumeRepository>> {
    if REPOSITORY.get().is_none() {
        init_repository()?;
    }

    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
