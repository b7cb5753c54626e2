//! Tests for the full validation pipeline.

use super::*;

#[test]
fn default_config_validates() {
    let config = R3alerConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_zero_attempts() {
    let mut config = R3alerConfig::default();
    config.chat.max_attempts = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("chat.max_attempts"));
}

#[test]
fn catches_attempt_timeout_too_large() {
    let mut config = R3alerConfig::default();
    config.chat.attempt_timeout_ms = 500_000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("chat.attempt_timeout_ms"));
}

#[test]
fn catches_backoff_ceiling_below_initial() {
    let mut config = R3alerConfig::default();
    config.chat.initial_backoff_ms = 5000;
    config.chat.max_backoff_ms = 1000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("chat.max_backoff_ms"));
}

#[test]
fn catches_non_http_base_url() {
    let mut config = R3alerConfig::default();
    config.api.base_url = "ftp://r3aler/api".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("api.base_url"));
}

#[test]
fn catches_voice_volume_out_of_range() {
    let mut config = R3alerConfig::default();
    config.voice.volume = 1.5;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("voice.volume"));
}

#[test]
fn catches_nan_pitch() {
    let mut config = R3alerConfig::default();
    config.voice.pitch = f64::NAN;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("voice.pitch"));
}

#[test]
fn collects_every_error() {
    let mut config = R3alerConfig::default();
    config.chat.max_attempts = 50;
    config.voice.rate = 0.0;
    config.api.connect_timeout_ms = 1;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("chat.max_attempts"));
    assert!(err.contains("voice.rate"));
    assert!(err.contains("api.connect_timeout_ms"));
    assert_eq!(err.matches("; ").count(), 2);
}
