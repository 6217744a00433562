//! Tests for db::factory and db::repo_config - repository creation and configuration.

mod support;

use std::io::Write;
use std::str::FromStr;
use tci_backend::api::DateRangeBound;
use tci_backend::db::factory::{RepositoryFactory, RepositoryType};
use tci_backend::db::repo_config::RepositoryConfig;

#[test]
fn test_repository_type_from_str_mock() {
    assert_eq!(RepositoryType::from_str("mock").unwrap(), RepositoryType::Mock);
    assert_eq!(RepositoryType::from_str("MOCK").unwrap(), RepositoryType::Mock);
    assert_eq!(RepositoryType::from_str("synthetic").unwrap(), RepositoryType::Mock);
}

#[test]
fn test_repository_type_from_str_invalid() {
    let result = RepositoryType::from_str("postgres");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("Unknown repository type"));
}

#[test]
fn test_repository_type_from_env_default() {
    support::with_scoped_env(&[("REPOSITORY_TYPE", None)], || {
        assert_eq!(RepositoryType::from_env(), RepositoryType::Mock);
    });
}

#[test]
fn test_repository_type_from_env_explicit() {
    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("local"))], || {
        assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
    });
}

#[test]
fn test_repository_type_from_env_invalid_defaults_to_mock() {
    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("invalid"))], || {
        assert_eq!(RepositoryType::from_env(), RepositoryType::Mock);
    });
}

#[tokio::test]
async fn test_from_env_honours_mock_seed() {
    let range = DateRangeBound::new("2024-05-01", "2024-05-03");
    let env = |seed: &'static str| {
        support::with_scoped_env(
            &[("REPOSITORY_TYPE", Some("mock")), ("MOCK_SEED", Some(seed))],
            RepositoryFactory::from_env,
        )
        .unwrap()
    };

    let a = env("9").fetch_interval_records(&range, "Billing").await.unwrap();
    let b = env("9").fetch_interval_records(&range, "Billing").await.unwrap();
    let c = env("10").fetch_interval_records(&range, "Billing").await.unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[tokio::test]
async fn test_from_env_local_is_empty() {
    let repo = support::with_scoped_env(
        &[("REPOSITORY_TYPE", Some("local")), ("MOCK_SEED", None)],
        RepositoryFactory::from_env,
    )
    .unwrap();
    assert!(repo.list_lines_of_business().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[repository]
type = "mock"

[mock]
seed = 3

[[mock.lines_of_business]]
name = "Claims"
multiplier = 0.5
"#
    )
    .unwrap();

    let repo = RepositoryFactory::from_config_file(file.path()).unwrap();
    assert_eq!(
        repo.list_lines_of_business().await.unwrap(),
        vec!["Claims".to_string()]
    );
    assert!(repo
        .fetch_interval_records(&DateRangeBound::new("2024-01-01", "2024-01-01"), "Billing")
        .await
        .is_err());
}

#[test]
fn test_from_config_file_invalid_type() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[repository]\ntype = \"azure\"").unwrap();

    let err = RepositoryFactory::from_config_file(file.path()).err().unwrap();
    assert!(err.to_string().contains("Invalid repository type"));
}

#[test]
fn test_repository_config_round_trips_through_toml() {
    let config = RepositoryConfig::from_toml_str("[repository]\ntype = \"mock\"\n").unwrap();
    let text = toml::to_string(&config).unwrap();
    let parsed = RepositoryConfig::from_toml_str(&text).unwrap();
    assert_eq!(parsed.mock, config.mock);
    assert_eq!(parsed.repository_type().unwrap(), RepositoryType::Mock);
}
