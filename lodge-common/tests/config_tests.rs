//! Tests for bootstrap configuration loading
//!
//! Tests that touch LODGE_CONFIG or LODGE_DATABASE are marked #[serial] so
//! they never run concurrently with each other.

use lodge_common::config::{
    load_config, resolve_database_path, TomlConfig, CONFIG_ENV_VAR, DATABASE_ENV_VAR, DEFAULT_PORT,
};
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};

fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_defaults() {
    let config = TomlConfig::default();

    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.bind_address, "127.0.0.1");
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.import.max_listed_warnings, 5);
    assert!(config.database_path.is_none());
}

#[test]
fn test_partial_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "port = 6000\n\n[import]\nmax_listed_warnings = 10\n");

    let config = TomlConfig::from_file(&path).unwrap();

    assert_eq!(config.port, 6000);
    assert_eq!(config.import.max_listed_warnings, 10);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.bind_address, "127.0.0.1");
}

#[test]
fn test_malformed_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "port = \"not a number\"");

    let err = TomlConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, lodge_common::Error::Config(_)));
}

#[test]
#[serial]
fn test_cli_path_wins_over_env() {
    let dir = tempfile::tempdir().unwrap();
    let cli_path = write_config(dir.path(), "port = 7001\n");
    env::set_var(CONFIG_ENV_VAR, dir.path().join("missing.toml"));

    let config = load_config(Some(&cli_path)).unwrap();
    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(config.port, 7001);
}

#[test]
#[serial]
fn test_env_path_used_without_cli() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "bind_address = \"0.0.0.0\"\n");
    env::set_var(CONFIG_ENV_VAR, &path);

    let config = load_config(None).unwrap();
    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(config.bind_address, "0.0.0.0");
}

#[test]
#[serial]
fn test_explicit_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    env::remove_var(CONFIG_ENV_VAR);

    assert!(load_config(Some(&dir.path().join("absent.toml"))).is_err());
}

#[test]
#[serial]
fn test_database_path_priority() {
    let mut config = TomlConfig::default();
    config.database_path = Some(PathBuf::from("/srv/lodge/from-config.db"));
    env::remove_var(DATABASE_ENV_VAR);

    assert_eq!(
        resolve_database_path(None, &config),
        PathBuf::from("/srv/lodge/from-config.db")
    );

    env::set_var(DATABASE_ENV_VAR, "/srv/lodge/from-env.db");
    assert_eq!(
        resolve_database_path(None, &config),
        PathBuf::from("/srv/lodge/from-env.db")
    );
    assert_eq!(
        resolve_database_path(Some(Path::new("/tmp/cli.db")), &config),
        PathBuf::from("/tmp/cli.db")
    );
    env::remove_var(DATABASE_ENV_VAR);
}

#[test]
#[serial]
fn test_default_database_file_name() {
    env::remove_var(DATABASE_ENV_VAR);

    let path = resolve_database_path(None, &TomlConfig::default());
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("lodge.db"));
}
