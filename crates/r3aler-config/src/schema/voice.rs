//! Voice capture and playback configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Expose voice controls at all when the platform supports them.
    pub enabled: bool,
    /// Speak assistant replies aloud from startup.
    pub output_enabled: bool,
    pub rate: f64,
    pub pitch: f64,
    pub volume: f64,
    pub lang: String,
    /// Substrings matched against engine voice names, first hit wins.
    pub preferred_voices: Vec<String>,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output_enabled: false,
            rate: 0.9,
            pitch: 0.8,
            volume: 0.8,
            lang: "en-US".into(),
            preferred_voices: vec!["Google".into(), "Microsoft".into(), "Alex".into()],
        }
    }
}
