//! Voice capture and spoken-reply toggling.

use tracing::{debug, info, warn};

use r3aler_common::{AssistantState, R3alerError, Sender, Trigger, VoiceError};

use super::controller::SessionController;

impl SessionController {
    /// Capture one utterance and submit it as a prompt.
    ///
    /// Returns `Ok(None)` when capture could not start (assistant busy) or
    /// the transcript was empty or arrived too late to be used.
    pub async fn listen(&self) -> Result<Option<String>, R3alerError> {
        let recognizer = match &self.recognizer {
            Some(r) if self.options.voice_enabled => r,
            _ => return Err(VoiceError::Unsupported("speech recognition".into()).into()),
        };

        let (generation, cancel) = {
            let mut st = self.lock();
            if self.is_busy() {
                debug!("request in flight, not listening");
                return Ok(None);
            }
            if !self.transition(&mut st, Trigger::StartListening) {
                return Ok(None);
            }
            self.append(&mut st, Sender::System, "Listening...");
            (st.generation, st.cancel.clone())
        };

        let captured = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(None),
            result = recognizer.capture(&self.options.speech.lang) => result,
        };

        {
            let mut st = self.lock();
            if st.generation != generation || st.assistant != AssistantState::Listening {
                debug!("discarding late transcript");
                return Ok(None);
            }
            match &captured {
                Ok(transcript) if transcript.trim().is_empty() => {
                    self.transition(&mut st, Trigger::CaptureEnded);
                    return Ok(None);
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "speech capture failed");
                    self.append(&mut st, Sender::System, format!("Speech Error: {e}"));
                    self.transition(&mut st, Trigger::CaptureEnded);
                }
            }
        }

        let transcript = captured?;
        match self.send_message(&transcript).await {
            Ok(reply) => Ok(reply),
            Err(e) => {
                // A submit rejected before leaving Listening must still end the capture.
                let mut st = self.lock();
                if st.generation == generation && st.assistant == AssistantState::Listening {
                    self.transition(&mut st, Trigger::CaptureEnded);
                }
                Err(e.into())
            }
        }
    }

    /// Turn spoken replies on or off.
    pub fn set_voice_output(&self, enabled: bool) -> Result<(), VoiceError> {
        if enabled && !self.capabilities().playback {
            return Err(VoiceError::Unsupported("speech synthesis".into()));
        }

        let mut st = self.lock();
        st.voice_output = enabled;
        let notice = if enabled { "Voice enabled" } else { "Voice disabled" };
        self.append(&mut st, Sender::System, notice);
        info!(enabled, "voice output toggled");
        Ok(())
    }

    /// Flip spoken replies and return the new setting.
    pub fn toggle_voice_output(&self) -> Result<bool, VoiceError> {
        let enabled = !self.voice_output_enabled();
        self.set_voice_output(enabled)?;
        Ok(enabled)
    }
}
