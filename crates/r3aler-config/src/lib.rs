//! R3ÆLƎR client configuration.
//!
//! TOML-based configuration with validation. All config sections use
//! sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use r3aler_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{R3alerConfig, CONFIG_SCHEMA_VERSION};

use std::path::Path;

use r3aler_common::ConfigError;

/// Load config from the platform default path, creating a commented
/// default file if none exists, and validate the result.
pub fn load_config() -> Result<R3alerConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path. The file must exist.
pub fn load_config_from(path: &Path) -> Result<R3alerConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &R3alerConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = R3alerConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"api\""));
        assert!(json.contains("\"chat\""));
        assert!(json.contains("\"voice\""));
        assert!(json.contains("\"storage\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn defaults_match_web_client() {
        let config = R3alerConfig::default();
        assert_eq!(config.chat.max_attempts, 3);
        assert_eq!(config.chat.attempt_timeout_ms, 8000);
        assert_eq!(config.chat.initial_backoff_ms, 1000);
        assert_eq!(config.voice.rate, 0.9);
        assert_eq!(config.voice.pitch, 0.8);
        assert_eq!(config.voice.volume, 0.8);
        assert!(!config.voice.output_enabled);
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = R3alerConfig::default();
        let json = config_to_json(&config);
        let parsed: R3alerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.api.base_url, "http://localhost:3000/api");
        assert_eq!(parsed.voice.lang, "en-US");
        assert_eq!(parsed.logging.level, schema::LogLevel::Info);
    }

    #[test]
    fn load_config_from_missing_path_is_file_not_found() {
        let err = load_config_from(Path::new("/tmp/definitely_missing_r3aler.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn load_config_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[chat]\nmax_attempts = 0\n").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
