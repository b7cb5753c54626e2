//! `ChatBackend` over the relay server's JSON-over-HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use r3aler_common::{AuthError, ChatError, Message};

use super::{ChatBackend, ChatRequest, Credentials, Registration};

const FALLBACK_REGISTRATION_ERROR: &str = "Registration failed";

#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Base URL ending in `/api`; endpoint paths are appended to it.
    pub base_url: String,
    pub connect_timeout: Duration,
}

impl HttpBackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// HTTP client for `/auth/login`, `/auth/register` and `/chat`.
///
/// No overall request timeout is set here: the session controller bounds
/// each chat attempt itself.
pub struct HttpBackend {
    config: HttpBackendConfig,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct ChatBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    history: &'a [Message],
    voice_enabled: bool,
}

#[derive(Debug, Default, Deserialize)]
struct AuthReply {
    success: Option<bool>,
    token: Option<String>,
    error: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ChatReply {
    response: Option<String>,
    error: Option<String>,
    message: Option<String>,
}

impl HttpBackend {
    pub fn new(config: HttpBackendConfig) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ChatError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(crate) fn chat_request(&self, request: &ChatRequest) -> reqwest::RequestBuilder {
        let body = ChatBody {
            message: &request.prompt,
            history: &request.history,
            voice_enabled: request.voice_enabled,
        };
        let builder = self.http.post(self.endpoint("chat")).json(&body);
        match request.token.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// Read a response body as JSON, treating an empty body as `{}`.
fn parse_body<T: DeserializeOwned + Default>(body: &str) -> Result<T, serde_json::Error> {
    if body.trim().is_empty() {
        Ok(T::default())
    } else {
        serde_json::from_str(body)
    }
}

pub(crate) fn interpret_login(status: StatusCode, body: &str) -> Result<String, AuthError> {
    let reply: AuthReply = match parse_body(body) {
        Ok(reply) => reply,
        Err(e) if status.is_success() => {
            return Err(AuthError::Network(format!("invalid login response: {e}")));
        }
        Err(_) => return Err(AuthError::invalid_credentials()),
    };

    let accepted = status.is_success() && reply.success.unwrap_or(true);
    match reply.token {
        Some(token) if accepted && !token.is_empty() => Ok(token),
        _ => Err(reply
            .error
            .or(reply.message)
            .map(AuthError::InvalidCredentials)
            .unwrap_or_else(AuthError::invalid_credentials)),
    }
}

pub(crate) fn interpret_register(status: StatusCode, body: &str) -> Result<(), AuthError> {
    let reply: AuthReply = parse_body(body).unwrap_or_default();
    if status.is_success() && reply.success == Some(true) {
        return Ok(());
    }
    Err(AuthError::RegistrationFailed(
        reply
            .error
            .or(reply.message)
            .unwrap_or_else(|| FALLBACK_REGISTRATION_ERROR.to_string()),
    ))
}

pub(crate) fn interpret_chat(status: StatusCode, body: &str) -> Result<String, ChatError> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let reply: ChatReply = parse_body(body).unwrap_or_default();
        return Err(ChatError::Unauthorized(
            reply.error.or(reply.message).unwrap_or_else(|| format!("HTTP {status}")),
        ));
    }
    if !status.is_success() {
        let reply: ChatReply = parse_body(body).unwrap_or_default();
        let detail = reply.error.or(reply.message).unwrap_or_else(|| body.trim().to_string());
        return Err(ChatError::Transport(format!("HTTP {status}: {detail}")));
    }

    let reply: ChatReply =
        parse_body(body).map_err(|e| ChatError::InvalidResponse(e.to_string()))?;
    reply
        .response
        .ok_or_else(|| ChatError::InvalidResponse("no 'response' field in reply".to_string()))
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn login(&self, credentials: &Credentials) -> Result<String, AuthError> {
        debug!(username = %credentials.username, "login request");

        let response = self
            .http
            .post(self.endpoint("auth/login"))
            .json(credentials)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        interpret_login(status, &body)
    }

    async fn register(&self, registration: &Registration) -> Result<(), AuthError> {
        debug!(username = %registration.username, "register request");

        let response = self
            .http
            .post(self.endpoint("auth/register"))
            .json(registration)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        interpret_register(status, &body)
    }

    async fn chat(&self, request: &ChatRequest) -> Result<String, ChatError> {
        debug!(
            history = request.history.len(),
            authenticated = request.token.is_some(),
            "chat request"
        );

        let response = self
            .chat_request(request)
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        interpret_chat(status, &body)
    }
}
