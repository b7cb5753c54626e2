//! Translate the loaded config into client construction parameters.

use std::path::PathBuf;
use std::time::Duration;

use r3aler_client::{
    ControllerOptions, FileTokenStore, HttpBackendConfig, RetryPolicy, SpeechParams,
};
use r3aler_common::StorageError;
use r3aler_config::R3alerConfig;

pub fn backend_config(config: &R3alerConfig, base_url: Option<&str>) -> HttpBackendConfig {
    let base_url = base_url.unwrap_or(&config.api.base_url);
    HttpBackendConfig::new(base_url.trim())
        .with_connect_timeout(Duration::from_millis(config.api.connect_timeout_ms))
}

pub fn controller_options(config: &R3alerConfig) -> ControllerOptions {
    let chat = &config.chat;
    let voice = &config.voice;
    ControllerOptions {
        retry: RetryPolicy {
            max_attempts: chat.max_attempts,
            attempt_timeout: Duration::from_millis(chat.attempt_timeout_ms),
            initial_backoff: Duration::from_millis(chat.initial_backoff_ms),
            max_backoff: Duration::from_millis(chat.max_backoff_ms),
        },
        speech: SpeechParams {
            rate: voice.rate,
            pitch: voice.pitch,
            volume: voice.volume,
            lang: voice.lang.clone(),
            preferred_voices: voice.preferred_voices.clone(),
        },
        voice_enabled: voice.enabled,
        voice_output: voice.output_enabled,
        welcome_message: Some(chat.welcome_message.clone()).filter(|w| !w.trim().is_empty()),
    }
}

pub fn token_path(config: &R3alerConfig) -> Result<PathBuf, StorageError> {
    match &config.storage.token_path {
        Some(path) => Ok(path.clone()),
        None => FileTokenStore::default_path(),
    }
}
