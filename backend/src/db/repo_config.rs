//! Repository configuration file support.
//!
//! This module provides utilities for reading repository configuration from
//! TOML configuration files.
//!
//! ```toml
//! [repository]
//! type = "mock"
//!
//! [mock]
//! seed = 42
//!
//! [[mock.lines_of_business]]
//! name = "Premium Orders"
//! multiplier = 1.0
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::RepositoryError;

/// Default name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "tci.toml";

/// Repository configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub mock: MockSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
}

/// Settings of the seeded mock data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockSettings {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_lines_of_business")]
    pub lines_of_business: Vec<LineOfBusinessSettings>,
}

/// A line of business and its volume multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineOfBusinessSettings {
    pub name: String,
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

impl LineOfBusinessSettings {
    pub fn new(name: impl Into<String>, multiplier: f64) -> Self {
        Self {
            name: name.into(),
            multiplier,
        }
    }
}

fn default_seed() -> u64 {
    42
}

fn default_multiplier() -> f64 {
    1.0
}

fn default_lines_of_business() -> Vec<LineOfBusinessSettings> {
    vec![
        LineOfBusinessSettings::new("Premium Orders", 1.0),
        LineOfBusinessSettings::new("Technical Support", 0.8),
        LineOfBusinessSettings::new("Billing", 0.6),
        LineOfBusinessSettings::new("Retention", 0.45),
    ]
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            lines_of_business: default_lines_of_business(),
        }
    }
}

impl MockSettings {
    /// Default settings with the seed taken from `MOCK_SEED` when set.
    pub fn from_env() -> Self {
        let seed = std::env::var("MOCK_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(default_seed);
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Reject settings the mock source cannot serve.
    pub fn validate(&self) -> Result<(), RepositoryError> {
        if self.lines_of_business.is_empty() {
            return Err(RepositoryError::configuration(
                "Mock repository requires at least one line of business",
            ));
        }
        for line in &self.lines_of_business {
            if line.name.trim().is_empty() {
                return Err(RepositoryError::configuration(
                    "Line of business names must not be empty",
                ));
            }
            if !line.multiplier.is_finite() || line.multiplier < 0.0 {
                return Err(RepositoryError::configuration(format!(
                    "Invalid multiplier {} for line of business '{}'",
                    line.multiplier, line.name
                )));
            }
        }
        Ok(())
    }
}

impl RepositoryConfig {
    /// Parse repository configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, RepositoryError> {
        toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load repository configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(RepositoryConfig)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        Self::from_toml_str(&content)
    }

    /// Load repository configuration from the default location.
    ///
    /// Searches for `tci.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        let search_paths = vec![
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(RepositoryError::configuration(format!(
            "No {} found in standard locations",
            CONFIG_FILE_NAME
        )))
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_mock_config() {
        let toml = r#"
[repository]
type = "mock"

[mock]
seed = 7

[[mock.lines_of_business]]
name = "Sales"
multiplier = 1.5

[[mock.lines_of_business]]
name = "Claims"
"#;

        let config = RepositoryConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Mock);
        assert_eq!(config.mock.seed, 7);
        assert_eq!(
            config.mock.lines_of_business,
            vec![
                LineOfBusinessSettings::new("Sales", 1.5),
                LineOfBusinessSettings::new("Claims", 1.0),
            ]
        );
        assert!(config.mock.validate().is_ok());
    }

    #[test]
    fn test_parse_local_config_uses_mock_defaults() {
        let toml = r#"
[repository]
type = "local"
"#;

        let config = RepositoryConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
        assert_eq!(config.mock, MockSettings::default());
    }

    #[test]
    fn test_unknown_repository_type() {
        let config = RepositoryConfig::from_toml_str("[repository]\ntype = \"postgres\"\n").unwrap();
        assert!(config.repository_type().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = RepositoryConfig::from_toml_str("[repository\ntype=").unwrap_err();
        assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let empty = MockSettings {
            seed: 1,
            lines_of_business: vec![],
        };
        assert!(empty.validate().is_err());

        let negative = MockSettings {
            seed: 1,
            lines_of_business: vec![LineOfBusinessSettings::new("Sales", -1.0)],
        };
        assert!(negative.validate().is_err());

        let blank = MockSettings {
            seed: 1,
            lines_of_business: vec![LineOfBusinessSettings::new("  ", 1.0)],
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[repository]\ntype = \"mock\"\n\n[mock]\nseed = 99").unwrap();

        let config = RepositoryConfig::from_file(file.path()).unwrap();
        assert_eq!(config.mock.seed, 99);
        assert_eq!(config.mock.lines_of_business.len(), 4);
    }

    #[test]
    fn test_from_missing_file() {
        let err = RepositoryConfig::from_file("/definitely/not/here/tci.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
