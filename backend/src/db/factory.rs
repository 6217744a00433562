//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository instances
//! based on runtime configuration.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use log::info;

use super::repo_config::{MockSettings, RepositoryConfig};
use super::repositories::{LocalRepository, MockRepository};
use super::repository::{RepositoryError, RepositoryResult, VolumeRepository};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepositoryType {
    /// Seeded synthetic data
    #[default]
    Mock,
    /// In-memory fixture store
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("mock", "local")
    ///
    /// # Returns
    /// * `Ok(RepositoryType)` if valid
    /// * `Err` if invalid
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" | "synthetic" => Ok(Self::Mock),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. Defaults to Mock when unset or unparseable.
    pub fn from_env() -> Self {
        std::env::var("REPOSITORY_TYPE")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or_default()
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use tci_backend::db::{RepositoryFactory, RepositoryType};
///
/// let mock = RepositoryFactory::create(RepositoryType::Mock, None)?;
/// let local = RepositoryFactory::create_local();
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `mock_settings` - Optional mock settings (defaults are used when absent)
    pub fn create(
        repo_type: RepositoryType,
        mock_settings: Option<&MockSettings>,
    ) -> RepositoryResult<Arc<dyn VolumeRepository>> {
        match repo_type {
            RepositoryType::Mock => {
                let settings = mock_settings.cloned().unwrap_or_default();
                Self::create_mock(&settings)
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create a seeded mock repository.
    pub fn create_mock(settings: &MockSettings) -> RepositoryResult<Arc<dyn VolumeRepository>> {
        let repo = MockRepository::from_settings(settings)?;
        info!(
            "Created mock repository (seed {}, {} lines of business)",
            settings.seed,
            settings.lines_of_business.len()
        );
        Ok(Arc::new(repo))
    }

    /// Create an empty in-memory local repository.
    pub fn create_local() -> Arc<dyn VolumeRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create repository from environment configuration.
    ///
    /// Reads `REPOSITORY_TYPE` to pick the implementation and `MOCK_SEED`
    /// for the mock generator seed.
    pub fn from_env() -> RepositoryResult<Arc<dyn VolumeRepository>> {
        Self::create(RepositoryType::from_env(), Some(&MockSettings::from_env()))
    }

    /// Create repository from a TOML configuration file.
    ///
    /// # Arguments
    /// * `config_path` - Path to the `tci.toml` configuration file
    pub fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn VolumeRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_repository_config(&config)
    }

    /// Create repository from the default configuration file location.
    pub fn from_default_config() -> RepositoryResult<Arc<dyn VolumeRepository>> {
        let config = RepositoryConfig::from_default_location()?;
        Self::from_repository_config(&config)
    }

    /// Create repository from a RepositoryConfig instance.
    pub fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn VolumeRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;
        Self::create(repo_type, Some(&config.mock))
    }
}
