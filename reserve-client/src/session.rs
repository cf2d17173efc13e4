//! Session context
//!
//! The service keeps the session in a cookie; the client never sees a
//! token. What the client does know is tracked here as one of three states,
//! and every protected view is gated on it instead of probing `/auth/me`
//! on its own.

use std::sync::Arc;

use shared::models::{CurrentUser, Role};
use tokio::sync::{RwLock, broadcast};

use crate::error::{ClientError, ClientResult};

/// What the client knows about the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Not probed yet
    #[default]
    Unknown,
    Authenticated(CurrentUser),
    /// Probed and absent, logged out, or expired (a 401 was seen)
    Unauthenticated,
}

impl SessionState {
    pub fn user(&self) -> Option<&CurrentUser> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// Shared, cloneable handle on the session state
#[derive(Debug, Clone)]
pub struct SessionContext {
    state: Arc<RwLock<SessionState>>,
    changes: broadcast::Sender<SessionState>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            state: Arc::new(RwLock::new(SessionState::Unknown)),
            changes,
        }
    }

    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn current_user(&self) -> Option<CurrentUser> {
        self.state.read().await.user().cloned()
    }

    /// Receives every state change, e.g. to route back to sign-in
    pub fn subscribe(&self) -> broadcast::Receiver<SessionState> {
        self.changes.subscribe()
    }

    pub(crate) async fn set(&self, next: SessionState) {
        let mut state = self.state.write().await;
        if *state == next {
            return;
        }
        match &next {
            SessionState::Authenticated(user) => {
                tracing::info!(user_id = user.id, "Session authenticated")
            }
            SessionState::Unauthenticated => tracing::info!("Session unauthenticated"),
            SessionState::Unknown => tracing::debug!("Session reset"),
        }
        *state = next.clone();
        // no subscribers is fine
        let _ = self.changes.send(next);
    }

    /// Marks the session as gone after a 401
    pub(crate) async fn expire(&self) {
        let was_authenticated = self.state.read().await.is_authenticated();
        if was_authenticated {
            tracing::warn!("Session expired");
        }
        self.set(SessionState::Unauthenticated).await;
    }

    /// Signed-in user, or `Unauthorized`
    pub async fn require_user(&self) -> ClientResult<CurrentUser> {
        self.current_user().await.ok_or(ClientError::Unauthorized)
    }

    /// Signed-in user holding `role`; `Forbidden` when the role is missing
    pub async fn require_role(&self, role: Role) -> ClientResult<CurrentUser> {
        let user = self.require_user().await?;
        if user.has_role(role) {
            Ok(user)
        } else {
            Err(ClientError::Forbidden(format!("{} role required", role.as_str())))
        }
    }

    pub async fn require_owner(&self) -> ClientResult<CurrentUser> {
        self.require_role(Role::RestaurantOwner).await
    }

    pub async fn require_admin(&self) -> ClientResult<CurrentUser> {
        self.require_role(Role::Admin).await
    }
}
