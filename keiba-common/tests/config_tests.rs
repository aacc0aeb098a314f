//! Configuration resolution and graceful degradation
//!
//! Uses serial_test: tests touching KEIBA_ROOT_FOLDER or KEIBA_CONFIG are
//! marked #[serial] so they never run in parallel.

use keiba_common::config::{
    default_root_folder, resolve_root_folder, ProviderKind, TomlConfig, CONFIG_FILE_ENV,
    DEFAULT_PORT, ROOT_FOLDER_ENV,
};
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    env::remove_var(ROOT_FOLDER_ENV);

    let root_folder = resolve_root_folder(None, &TomlConfig::default());

    assert!(!root_folder.as_os_str().is_empty());
    assert_eq!(root_folder, default_root_folder());
}

#[test]
#[serial]
fn test_resolver_env_var_beats_toml() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/keiba-test-env-folder");

    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/keiba-test-toml-folder")),
        ..Default::default()
    };
    let root_folder = resolve_root_folder(None, &config);

    env::remove_var(ROOT_FOLDER_ENV);
    assert_eq!(root_folder, PathBuf::from("/tmp/keiba-test-env-folder"));
}

#[test]
#[serial]
fn test_resolver_cli_beats_env() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/keiba-test-env-folder");

    let root_folder = resolve_root_folder(Some(Path::new("/tmp/keiba-cli")), &TomlConfig::default());

    env::remove_var(ROOT_FOLDER_ENV);
    assert_eq!(root_folder, PathBuf::from("/tmp/keiba-cli"));
}

#[test]
#[serial]
fn test_resolver_toml_when_no_env() {
    env::remove_var(ROOT_FOLDER_ENV);

    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/keiba-test-toml-folder")),
        ..Default::default()
    };

    assert_eq!(
        resolve_root_folder(None, &config),
        PathBuf::from("/tmp/keiba-test-toml-folder")
    );
}

#[test]
#[serial]
fn test_load_explicit_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "port = 6000\n[provider]\nmock_latency_ms = 250\n").unwrap();

    let config = TomlConfig::load_or_default(Some(&path));

    assert_eq!(config.port, 6000);
    assert_eq!(config.provider.kind, ProviderKind::Mock);
    assert_eq!(config.provider.mock_latency_ms, 250);
}

#[test]
#[serial]
fn test_load_from_env_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("keiba.toml");
    std::fs::write(&path, "bind = \"0.0.0.0\"\n").unwrap();
    env::set_var(CONFIG_FILE_ENV, &path);

    let config = TomlConfig::load_or_default(None);

    env::remove_var(CONFIG_FILE_ENV);
    assert_eq!(config.bind, "0.0.0.0");
}

#[test]
#[serial]
fn test_missing_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("does-not-exist.toml");

    let config = TomlConfig::load_or_default(Some(&path));

    assert_eq!(config.port, DEFAULT_PORT);
}

#[test]
#[serial]
fn test_invalid_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "[provider]\nkind = \"carrier-pigeon\"\n").unwrap();

    let config = TomlConfig::load_or_default(Some(&path));

    assert_eq!(config.provider.kind, ProviderKind::Mock);
    assert_eq!(config.port, DEFAULT_PORT);
}
