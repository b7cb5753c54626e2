//! Login, registration, session restore, and logout.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use r3aler_common::{AuthError, Event, Sender, Trigger};

use crate::backend::{Credentials, Registration};

use super::controller::SessionController;
use super::types::Session;

impl SessionController {
    /// Exchange credentials for a token and start a session. Never retried.
    ///
    /// A failed login destroys any session that was active.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let credentials = Credentials {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        info!(username = %credentials.username, "logging in");

        match self.backend.login(&credentials).await {
            Ok(token) => {
                if let Err(e) = self.store.save(&token) {
                    warn!(error = %e, "failed to persist auth token");
                }
                Ok(self.start_session(token))
            }
            Err(e) => {
                warn!(error = %e, "login failed");
                self.end_session_after_failed_login();
                Err(e)
            }
        }
    }

    /// Create an account. The caller logs in separately.
    pub async fn register(&self, registration: &Registration) -> Result<(), AuthError> {
        if registration.username.trim().is_empty() || registration.password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        info!(username = %registration.username, "registering account");
        self.backend.register(registration).await.inspect_err(|e| {
            warn!(error = %e, "registration failed");
        })
    }

    /// Pick up a token persisted by an earlier run.
    ///
    /// The token is trusted unless the injected validator explicitly
    /// rejects it; if validation cannot be performed the token is kept.
    pub async fn restore_session(&self) -> Option<Session> {
        let token = match self.store.load() {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "failed to read stored auth token");
                return None;
            }
        };

        match self.validator.validate(&token).await {
            Ok(true) => {}
            Ok(false) => {
                info!("stored auth token rejected, discarding");
                if let Err(e) = self.store.clear() {
                    warn!(error = %e, "failed to clear rejected auth token");
                }
                return None;
            }
            Err(e) => {
                warn!(error = %e, "could not validate stored auth token, trusting it");
            }
        }

        info!("restored session from stored token");
        Some(self.start_session(token))
    }

    /// Tear the session down: abort any in-flight request or retry timer,
    /// forget the token, empty the log, and return to `Idle`.
    pub fn logout(&self) {
        let had_session = {
            let mut st = self.lock();
            st.cancel.cancel();
            st.cancel = CancellationToken::new();
            st.generation += 1;
            st.log.clear();
            self.events.publish(Event::LogCleared);
            self.transition(&mut st, Trigger::Reset);
            st.session.take().is_some()
        };

        if let Some(synthesizer) = &self.synthesizer {
            synthesizer.stop();
        }
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear stored auth token");
        }
        if had_session {
            self.events.publish(Event::SessionEnded);
        }
        info!("logged out");
    }

    fn start_session(&self, token: String) -> Session {
        let session = Session::authenticated(token);
        let mut st = self.lock();
        st.session = Some(session.clone());
        self.events.publish(Event::SessionStarted);
        if let Some(welcome) = self
            .options
            .welcome_message
            .as_deref()
            .filter(|w| !w.trim().is_empty())
        {
            self.append(&mut st, Sender::System, welcome);
        }
        session
    }

    fn end_session_after_failed_login(&self) {
        let had_session = self.lock().session.take().is_some();
        if had_session {
            if let Err(e) = self.store.clear() {
                warn!(error = %e, "failed to clear stored auth token");
            }
            self.events.publish(Event::SessionEnded);
        }
    }
}
