//! Session/Identity store.
//!
//! One explicit store owns the current-user state. It is initialized by a
//! single restoration call at startup, mutated only by sign-in, sign-up, and
//! sign-out, and observed by dependents through a `watch` channel rather than
//! shared mutable globals. The rest of the client only ever asks "is a user
//! present" and reads the id.

use crate::gateway::{Gateway, GatewayError};
use colloquy_core::{UserId, UserProfile};
use tokio::sync::watch;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Startup restoration is still in flight.
    Restoring,
    Anonymous,
    Authenticated(UserProfile),
}

impl SessionState {
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

pub struct SessionStore {
    gateway: Gateway,
    tx: watch::Sender<SessionState>,
    access_token: Option<String>,
}

impl SessionStore {
    pub fn new(gateway: Gateway) -> (Self, watch::Receiver<SessionState>) {
        let (tx, rx) = watch::channel(SessionState::Restoring);
        (
            Self {
                gateway,
                tx,
                access_token: None,
            },
            rx,
        )
    }

    /// Resolve a persisted token into a session. Called exactly once at
    /// startup; any failure (expired token, network) lands in Anonymous.
    pub async fn restore(&mut self, token: Option<String>) {
        let state = match token {
            Some(token) => match self.gateway.current_user(&token).await {
                Ok(user) => {
                    self.access_token = Some(token);
                    SessionState::Authenticated(user)
                }
                Err(err) => {
                    warn!(error = %err, "session restoration failed");
                    SessionState::Anonymous
                }
            },
            None => SessionState::Anonymous,
        };
        self.tx.send_replace(state);
    }

    /// Sign in. Failures propagate so the form can display them.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<(), GatewayError> {
        let session = self.gateway.sign_in(email, password).await?;
        self.access_token = Some(session.access_token);
        self.tx.send_replace(SessionState::Authenticated(session.user));
        Ok(())
    }

    /// Create an account and sign in. Failures propagate like sign-in.
    pub async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<(), GatewayError> {
        let session = self.gateway.sign_up(email, password, display_name).await?;
        self.access_token = Some(session.access_token);
        self.tx.send_replace(SessionState::Authenticated(session.user));
        Ok(())
    }

    /// Sign out. The remote call may fail; the local session ends regardless.
    pub async fn sign_out(&mut self) {
        if let Some(token) = self.access_token.take() {
            if let Err(err) = self.gateway.sign_out(&token).await {
                warn!(error = %err, "sign-out request failed");
            }
        }
        self.tx.send_replace(SessionState::Anonymous);
    }

    pub fn state(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.tx.borrow().user().cloned()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user().map(|user| user.user_id)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(&*self.tx.borrow(), SessionState::Authenticated(_))
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}
