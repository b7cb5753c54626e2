//! SessionController struct, construction, and shared state helpers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use r3aler_common::{AssistantState, ConversationLog, Event, EventBus, Message, Sender, Trigger};

use crate::backend::ChatBackend;
use crate::storage::TokenStore;
use crate::voice::{SpeechRecognizer, SpeechSynthesizer, VoiceCapabilities};

use super::types::{ControllerOptions, Session, TokenValidator, TrustStoredToken};

/// Everything a request or the render layer may observe. Only ever touched
/// under the controller's mutex, which is never held across an `.await`.
pub(super) struct ControllerState {
    pub(super) session: Option<Session>,
    pub(super) log: ConversationLog,
    pub(super) assistant: AssistantState,
    pub(super) voice_output: bool,
    /// Bumped on every send and on logout; a result whose generation no
    /// longer matches is stale and dropped.
    pub(super) generation: u64,
    /// Cancelled and replaced on logout.
    pub(super) cancel: CancellationToken,
}

/// Client-side chat session: auth, conversation log, and request dispatch.
///
/// Methods take `&self`; share the controller through an `Arc` so that a
/// logout can run while a send is still waiting on the network.
pub struct SessionController {
    pub(super) backend: Arc<dyn ChatBackend>,
    pub(super) store: Arc<dyn TokenStore>,
    pub(super) validator: Arc<dyn TokenValidator>,
    pub(super) recognizer: Option<Arc<dyn SpeechRecognizer>>,
    pub(super) synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    pub(super) options: ControllerOptions,
    pub(super) state: Mutex<ControllerState>,
    /// Whether a chat request is currently in flight.
    pub(super) busy: AtomicBool,
    pub(super) events: EventBus,
}

impl SessionController {
    pub fn new(backend: Arc<dyn ChatBackend>, store: Arc<dyn TokenStore>) -> Self {
        let options = ControllerOptions::default();
        Self {
            backend,
            store,
            validator: Arc::new(TrustStoredToken),
            recognizer: None,
            synthesizer: None,
            state: Mutex::new(ControllerState {
                session: None,
                log: ConversationLog::new(),
                assistant: AssistantState::Idle,
                voice_output: options.voice_output,
                generation: 0,
                cancel: CancellationToken::new(),
            }),
            options,
            busy: AtomicBool::new(false),
            events: EventBus::default(),
        }
    }

    pub fn with_options(mut self, options: ControllerOptions) -> Self {
        self.lock().voice_output = options.voice_output;
        self.options = options;
        self
    }

    pub fn with_validator(mut self, validator: Arc<dyn TokenValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_recognizer(mut self, recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    pub fn with_synthesizer(mut self, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    /// Subscribe to render events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Snapshot of the conversation log.
    pub fn messages(&self) -> Vec<Message> {
        self.lock().log.messages().to_vec()
    }

    pub fn assistant_state(&self) -> AssistantState {
        self.lock().assistant
    }

    pub fn session(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock()
            .session
            .as_ref()
            .is_some_and(|s| s.authenticated)
    }

    /// Whether a chat request is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Voice controls the front-end may expose, probed from the injected
    /// adapters.
    pub fn capabilities(&self) -> VoiceCapabilities {
        if !self.options.voice_enabled {
            return VoiceCapabilities::default();
        }
        VoiceCapabilities {
            capture: self.recognizer.is_some(),
            playback: self.synthesizer.is_some(),
        }
    }

    pub fn voice_output_enabled(&self) -> bool {
        let st = self.lock();
        self.speaks(&st)
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn speaks(&self, st: &ControllerState) -> bool {
        st.voice_output && self.capabilities().playback
    }

    pub(super) fn append(
        &self,
        st: &mut ControllerState,
        sender: Sender,
        text: impl Into<String>,
    ) -> Message {
        let message = st.log.append(sender, text);
        self.events.publish(Event::MessageAppended(message.clone()));
        message
    }

    /// Apply `trigger` to the assistant state. Returns `false`, leaving the
    /// state untouched, when the current state has no edge for it.
    pub(super) fn transition(&self, st: &mut ControllerState, trigger: Trigger) -> bool {
        let from = st.assistant;
        match from.next(trigger) {
            Some(to) => {
                st.assistant = to;
                if from != to {
                    debug!(%from, %to, "assistant state changed");
                    self.events.publish(Event::StateChanged { from, to });
                }
                true
            }
            None => {
                debug!(state = %from, ?trigger, "ignoring transition");
                false
            }
        }
    }
}
