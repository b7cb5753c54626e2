//! Session types, controller options, and concurrency guards.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use r3aler_common::{AuthError, ChatError};

use crate::retry::RetryPolicy;
use crate::voice::SpeechParams;

/// The authenticated-or-not state of the client.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub authenticated: bool,
}

impl Session {
    pub(crate) fn authenticated(token: String) -> Self {
        Self {
            token: Some(token),
            authenticated: true,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("authenticated", &self.authenticated)
            .finish()
    }
}

/// Hook for checking a persisted token with the server before trusting it.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// `Ok(false)` means the server rejected the token. `Err` means the
    /// check could not be made.
    async fn validate(&self, token: &str) -> Result<bool, AuthError>;
}

/// Accepts every stored token without a round trip.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrustStoredToken;

#[async_trait]
impl TokenValidator for TrustStoredToken {
    async fn validate(&self, _token: &str) -> Result<bool, AuthError> {
        Ok(true)
    }
}

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub retry: RetryPolicy,
    pub speech: SpeechParams,
    /// Expose voice capture/playback when adapters are present.
    pub voice_enabled: bool,
    /// Speak replies from the start.
    pub voice_output: bool,
    /// System notice appended when a session starts.
    pub welcome_message: Option<String>,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            speech: SpeechParams::default(),
            voice_enabled: true,
            voice_output: false,
            welcome_message: None,
        }
    }
}

/// Guard that clears the `busy` flag on drop, ensuring it is always released
/// even if the future is cancelled or an early return occurs.
pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    /// Attempt to acquire the busy lock. Returns `Err` if already busy.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Result<Self, ChatError> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(ChatError::Busy);
        }
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
