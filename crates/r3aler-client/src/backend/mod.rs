//! Relay server protocol.
//!
//! `ChatBackend` is the seam between the controller and the network;
//! `HttpBackend` speaks the JSON-over-HTTP API the web front-ends used.

mod http;

pub use http::{HttpBackend, HttpBackendConfig};

use async_trait::async_trait;
use serde::Serialize;

use r3aler_common::{AuthError, ChatError, Message};

#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Exchange credentials for an opaque auth token.
    async fn login(&self, credentials: &Credentials) -> Result<String, AuthError>;

    /// Create an account. Does not log in.
    async fn register(&self, registration: &Registration) -> Result<(), AuthError>;

    /// Send one chat prompt and return the assistant's reply.
    async fn chat(&self, request: &ChatRequest) -> Result<String, ChatError>;
}

#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Account creation form. Profile fields are optional.
#[derive(Clone, Default, Serialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Registration {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn with_date_of_birth(mut self, date_of_birth: impl Into<String>) -> Self {
        self.date_of_birth = Some(date_of_birth.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("full_name", &self.full_name)
            .field("date_of_birth", &self.date_of_birth)
            .field("email", &self.email)
            .finish()
    }
}

/// One outbound chat call. Built fresh per send and dropped when it settles.
#[derive(Clone)]
pub struct ChatRequest {
    pub prompt: String,
    /// Prior user/assistant turns, oldest first. Excludes `prompt`.
    pub history: Vec<Message>,
    pub token: Option<String>,
    pub voice_enabled: bool,
}

impl std::fmt::Debug for ChatRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatRequest")
            .field("prompt", &self.prompt)
            .field("history", &self.history.len())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("voice_enabled", &self.voice_enabled)
            .finish()
    }
}
