//! Configuration schema types for the R3ÆLƎR client.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the values the web front-end shipped with.

mod api;
mod chat;
mod system;
mod voice;

pub use api::*;
pub use chat::*;
pub use system::*;
pub use voice::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct R3alerConfig {
    pub api: ApiConfig,
    pub chat: ChatConfig,
    pub voice: VoiceConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}
