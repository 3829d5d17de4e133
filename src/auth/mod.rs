//! Session/credential collaborator interface.
//!
//! Credential issuance and refresh live outside this crate. The pipeline
//! depends on the [`SessionProvider`] trait only: it borrows a bearer
//! [`Credential`] fresh for each operation, never caches or inspects it,
//! and treats absence or a provider failure as a sign-in redirect.

use std::fmt;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::broadcast;

/// Opaque bearer token forwarded via the Authorization header.
///
/// Debug output is redacted so tokens never land in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for header construction.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(****)")
    }
}

/// Session state change published to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
}

/// Errors surfaced by a session provider.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The external auth provider failed to produce a session.
    #[error("session provider failure: {message}")]
    Provider {
        /// Provider-supplied failure description.
        message: String,
    },
}

impl SessionError {
    /// Creates a provider failure from any displayable cause.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }
}

/// External auth collaborator: current credential, verification status,
/// sign-out, and a change-stream subscription.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Returns the current bearer credential, or `None` when no session
    /// is active.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the provider itself fails; callers
    /// treat that the same as an absent session.
    async fn current_credential(&self) -> Result<Option<Credential>, SessionError>;

    /// Whether the signed-in account has a verified email address.
    fn email_verified(&self) -> bool;

    /// Terminates the current session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the provider rejects the sign-out.
    async fn sign_out(&self) -> Result<(), SessionError>;

    /// Subscribes to session state changes.
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}

/// Fixed-token provider for CLI use and tests.
///
/// Holds one credential for the process lifetime; `sign_out` clears it
/// and publishes [`AuthEvent::SignedOut`].
pub struct StaticSessionProvider {
    credential: Mutex<Option<Credential>>,
    verified: bool,
    events: broadcast::Sender<AuthEvent>,
}

impl StaticSessionProvider {
    /// Creates a provider holding the given token, treated as verified.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(8);
        Self {
            credential: Mutex::new(Some(Credential::new(token))),
            verified: true,
            events,
        }
    }

    /// Creates a provider with no active session.
    #[must_use]
    pub fn anonymous() -> Self {
        let (events, _) = broadcast::channel(8);
        Self {
            credential: Mutex::new(None),
            verified: false,
            events,
        }
    }

    /// Overrides the email-verified flag (defaults to true for `new`).
    #[must_use]
    pub fn with_verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn current_credential(&self) -> Result<Option<Credential>, SessionError> {
        self.credential
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| SessionError::provider("credential store poisoned"))
    }

    fn email_verified(&self) -> bool {
        self.verified
    }

    async fn sign_out(&self) -> Result<(), SessionError> {
        let mut guard = self
            .credential
            .lock()
            .map_err(|_| SessionError::provider("credential store poisoned"))?;
        *guard = None;
        drop(guard);
        // No receivers is fine; the event stream is optional.
        let _ = self.events.send(AuthEvent::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}
