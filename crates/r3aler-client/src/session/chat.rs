//! Chat dispatch: one request in flight, retried under the controller's
//! policy, with optional spoken playback of the reply.

use tokio_util::sync::CancellationToken;
use tracing::{debug, debug_span, info, warn, Instrument};

use r3aler_common::{new_correlation_id, ChatError, Sender, Trigger};

use crate::backend::ChatRequest;
use crate::debrief::{debrief_prompt, format_transcript, NOT_ENOUGH_DATA};
use crate::retry::retry;

use super::controller::SessionController;
use super::types::BusyGuard;

impl SessionController {
    /// Submit a prompt and wait for the assistant's reply.
    ///
    /// Returns `Ok(None)` for a blank prompt. The user message is appended
    /// before the request goes out; the reply, or a `System` notice on
    /// failure, is appended when it settles.
    pub async fn send_message(&self, prompt: &str) -> Result<Option<String>, ChatError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Ok(None);
        }

        let _busy = BusyGuard::acquire(&self.busy)?;

        let (request, generation, cancel) = {
            let mut st = self.lock();
            let history = st.log.dialogue();
            self.append(&mut st, Sender::User, prompt);
            self.transition(&mut st, Trigger::Submit);
            st.generation += 1;
            let request = ChatRequest {
                prompt: prompt.to_string(),
                history,
                token: st.session.as_ref().and_then(|s| s.token.clone()),
                voice_enabled: self.speaks(&st),
            };
            (request, st.generation, st.cancel.clone())
        };

        let request_id = new_correlation_id();
        debug!(
            %request_id,
            generation,
            history = request.history.len(),
            "dispatching chat request"
        );
        let backend = &self.backend;
        let request = &request;
        let outcome = retry(&self.options.retry, &cancel, move |_| backend.chat(request))
            .instrument(debug_span!("chat", %request_id))
            .await;

        let (outcome, speak) = {
            let mut st = self.lock();
            if st.generation != generation {
                info!(%request_id, generation, "discarding stale chat response");
                return Err(ChatError::Cancelled);
            }
            match outcome {
                Ok(reply) => {
                    let speak = self.speaks(&st);
                    self.append(&mut st, Sender::Assistant, reply.clone());
                    self.transition(&mut st, Trigger::ResponseReceived { speak });
                    (Ok(reply), speak)
                }
                Err(e) => {
                    warn!(%request_id, error = %e, "chat request failed");
                    self.append(&mut st, Sender::System, format!("Error: {e}"));
                    self.transition(&mut st, Trigger::RequestFailed);
                    (Err(e), false)
                }
            }
        };

        let reply = outcome?;
        if speak {
            self.play(&reply, generation, &cancel).await;
        }
        Ok(Some(reply))
    }

    /// Ask the assistant to summarise the conversation so far. The log is
    /// left as it was.
    pub async fn generate_debrief(&self) -> Result<String, ChatError> {
        let transcript = format_transcript(&self.messages());
        let Some(prompt) = debrief_prompt(&transcript) else {
            return Ok(NOT_ENOUGH_DATA.to_string());
        };

        let _busy = BusyGuard::acquire(&self.busy)?;

        let (request, cancel) = {
            let st = self.lock();
            let request = ChatRequest {
                prompt,
                history: Vec::new(),
                token: st.session.as_ref().and_then(|s| s.token.clone()),
                voice_enabled: false,
            };
            (request, st.cancel.clone())
        };

        let request_id = new_correlation_id();
        info!(%request_id, "requesting mission debrief");
        let backend = &self.backend;
        let request = &request;
        retry(&self.options.retry, &cancel, move |_| backend.chat(request))
            .instrument(debug_span!("debrief", %request_id))
            .await
            .inspect_err(|e| warn!(error = %e, "debrief request failed"))
    }

    /// Speak `text`, then settle back to `Idle` unless the session moved on.
    async fn play(&self, text: &str, generation: u64, cancel: &CancellationToken) {
        let Some(synthesizer) = &self.synthesizer else {
            return;
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                synthesizer.stop();
                return;
            }
            result = synthesizer.speak(text, &self.options.speech) => {
                if let Err(e) = result {
                    warn!(error = %e, "speech synthesis failed");
                }
            }
        }

        let mut st = self.lock();
        if st.generation == generation {
            self.transition(&mut st, Trigger::PlaybackFinished);
        }
    }
}
