//! Backend endpoint settings.

use serde::{Deserialize, Serialize};

/// Where the relay server lives and how long to wait for a connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL the `/auth/*` and `/chat` paths are appended to.
    pub base_url: String,
    /// TCP connect timeout in milliseconds (valid range: 100-60000).
    pub connect_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".into(),
            connect_timeout_ms: 10_000,
        }
    }
}
