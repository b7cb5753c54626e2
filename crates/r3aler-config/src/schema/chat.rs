//! Chat dispatch settings: retry bounds, timeouts, welcome notice.

use serde::{Deserialize, Serialize};

pub const DEFAULT_WELCOME_MESSAGE: &str =
    "R3ÆLƎR TƎCH™ Authorization complete. Welcome to R3ÆLƎR AI.";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Total attempts per message, first try included (valid range: 1-10).
    pub max_attempts: u32,
    /// Upper bound for a single attempt (valid range: 100-120000).
    pub attempt_timeout_ms: u64,
    /// Delay before the second attempt; doubles afterwards (valid range: 0-60000).
    pub initial_backoff_ms: u64,
    /// Ceiling for the doubled delay.
    pub max_backoff_ms: u64,
    /// System notice appended when a session starts. Empty disables it.
    pub welcome_message: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            attempt_timeout_ms: 8000,
            initial_backoff_ms: 1000,
            max_backoff_ms: 30_000,
            welcome_message: DEFAULT_WELCOME_MESSAGE.into(),
        }
    }
}
