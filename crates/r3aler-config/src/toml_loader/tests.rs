//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_parse_error() {
    let result = load_from_path(Path::new("/tmp/nonexistent_r3aler_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, r3aler_common::ConfigError::ParseError(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[api]
base_url = "https://r3aler.example/api"

[chat]
max_attempts = 5
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.api.base_url, "https://r3aler.example/api");
    assert_eq!(config.chat.max_attempts, 5);
    // Defaults preserved
    assert_eq!(config.chat.attempt_timeout_ms, 8000);
    assert_eq!(config.api.connect_timeout_ms, 10_000);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, r3aler_common::ConfigError::ParseError(_)));
}

#[test]
fn load_config_with_invalid_values_is_returned_as_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[voice]\nvolume = 3.0\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.voice.volume, 3.0);
}

#[test]
fn log_level_parses_uppercase() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[logging]\nlevel = \"WARNING\"\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.logging.level.as_filter(), "warn");
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("r3aler").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.chat.max_attempts, 3);
    assert!(config.chat.welcome_message.contains("Welcome"));
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::R3alerConfig;

    let config: R3alerConfig = toml::from_str(&default_config_toml()).unwrap();
    assert_eq!(config.voice.lang, "en-US");
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("r3aler"));
        assert!(path_str.ends_with("config.toml"));
    }
}
