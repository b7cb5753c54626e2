//! Chat session client for R3ÆLƎR AI.
//!
//! Provides the `SessionController` that sits between a front-end and the
//! relay server:
//! - Login, registration, and token persistence across restarts
//! - An append-only conversation log with render events
//! - Chat dispatch with per-attempt timeout and exponential backoff
//! - Cancellation of in-flight requests on logout
//! - Optional speech capture and playback through injected adapters

pub mod backend;
pub mod debrief;
pub mod retry;
pub mod session;
pub mod storage;
pub mod voice;

pub use backend::{
    ChatBackend, ChatRequest, Credentials, HttpBackend, HttpBackendConfig, Registration,
};
pub use retry::RetryPolicy;
pub use session::{ControllerOptions, Session, SessionController, TokenValidator, TrustStoredToken};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use voice::{SpeechParams, SpeechRecognizer, SpeechSynthesizer, VoiceCapabilities};

pub use r3aler_common::{
    AssistantState, AuthError, ChatError, Event, Message, Sender, StorageError, VoiceError,
};
