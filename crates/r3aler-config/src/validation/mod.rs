//! Full configuration validation.
//!
//! Each section has its own check; this orchestrator calls them all and
//! collects errors into a single `ConfigError`.

mod helpers;

#[cfg(test)]
mod tests;

use crate::schema::R3alerConfig;
use helpers::{validate_range, validate_range_f64};
use r3aler_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &R3alerConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_api(&mut errors, config);
    validate_chat(&mut errors, config);
    validate_voice(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_api(errors: &mut Vec<String>, config: &R3alerConfig) {
    let url = config.api.base_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(format!(
            "api.base_url = {url:?} must start with http:// or https://"
        ));
    }
    validate_range(
        errors,
        "api.connect_timeout_ms",
        config.api.connect_timeout_ms,
        100,
        60_000,
    );
}

fn validate_chat(errors: &mut Vec<String>, config: &R3alerConfig) {
    let chat = &config.chat;
    validate_range(errors, "chat.max_attempts", chat.max_attempts.into(), 1, 10);
    validate_range(
        errors,
        "chat.attempt_timeout_ms",
        chat.attempt_timeout_ms,
        100,
        120_000,
    );
    validate_range(
        errors,
        "chat.initial_backoff_ms",
        chat.initial_backoff_ms,
        0,
        60_000,
    );
    if chat.max_backoff_ms < chat.initial_backoff_ms {
        errors.push(format!(
            "chat.max_backoff_ms = {} is below chat.initial_backoff_ms = {}",
            chat.max_backoff_ms, chat.initial_backoff_ms
        ));
    }
}

fn validate_voice(errors: &mut Vec<String>, config: &R3alerConfig) {
    let voice = &config.voice;
    validate_range_f64(errors, "voice.rate", voice.rate, 0.1, 10.0);
    validate_range_f64(errors, "voice.pitch", voice.pitch, 0.0, 2.0);
    validate_range_f64(errors, "voice.volume", voice.volume, 0.0, 1.0);
}
