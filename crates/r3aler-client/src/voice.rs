//! Speech capture and playback capabilities.
//!
//! The controller never owns a speech engine. Front-ends inject adapters
//! for whatever the platform offers; with none injected the controller
//! runs in typed-only mode.

use async_trait::async_trait;

use r3aler_common::VoiceError;

/// Speech-to-text. One call yields one final transcript, then stops.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn capture(&self, lang: &str) -> Result<String, VoiceError>;
}

/// Text-to-speech. Resolves when playback completes or fails.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn speak(&self, text: &str, params: &SpeechParams) -> Result<(), VoiceError>;

    /// Cut off any utterance in progress.
    fn stop(&self) {}
}

/// Utterance settings handed to the synthesizer.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechParams {
    pub rate: f64,
    pub pitch: f64,
    pub volume: f64,
    pub lang: String,
    pub preferred_voices: Vec<String>,
}

impl Default for SpeechParams {
    fn default() -> Self {
        Self {
            rate: 0.9,
            pitch: 0.8,
            volume: 0.8,
            lang: "en-US".into(),
            preferred_voices: vec!["Google".into(), "Microsoft".into(), "Alex".into()],
        }
    }
}

/// Which voice controls a front-end should expose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoiceCapabilities {
    pub capture: bool,
    pub playback: bool,
}

impl VoiceCapabilities {
    pub fn any(&self) -> bool {
        self.capture || self.playback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_carry_preferred_voices() {
        let params = SpeechParams::default();
        assert_eq!(params.lang, "en-US");
        assert_eq!(params.preferred_voices, vec!["Google", "Microsoft", "Alex"]);
        assert_eq!((params.rate, params.pitch, params.volume), (0.9, 0.8, 0.8));
    }

    #[test]
    fn capabilities_any() {
        assert!(!VoiceCapabilities::default().any());
        assert!(VoiceCapabilities {
            capture: false,
            playback: true
        }
        .any());
    }
}
