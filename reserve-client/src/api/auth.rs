//! Sign-in, sign-out and registration

use reqwest::Method;
use shared::models::{CurrentUser, RegisterRequest};

use super::ReserveClient;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionState;

impl ReserveClient {
    /// Signs in and loads the current user.
    ///
    /// The service answers the login with a session cookie only; the user
    /// comes from a follow-up `/auth/me`.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<CurrentUser> {
        tracing::info!(email, "Signing in");
        self.http.login_basic(email, password).await?;
        match self.refresh_session().await? {
            SessionState::Authenticated(user) => Ok(user),
            _ => Err(ClientError::InvalidResponse(
                "login succeeded but no session was established".into(),
            )),
        }
    }

    /// Fetches the current user without touching the session state
    pub async fn me(&self) -> ClientResult<CurrentUser> {
        self.http.get("auth/me").await
    }

    /// Probes `/auth/me` and records the outcome in the session context.
    ///
    /// A 401 is an answer here, not a failure.
    pub async fn refresh_session(&self) -> ClientResult<SessionState> {
        let next = match self.me().await {
            Ok(user) => SessionState::Authenticated(user),
            Err(ClientError::Unauthorized) => SessionState::Unauthenticated,
            Err(e) => return Err(e),
        };
        self.session.set(next.clone()).await;
        Ok(next)
    }

    /// Ends the session. The local state is cleared even if the call fails.
    pub async fn logout(&self) -> ClientResult<()> {
        let result = self.http.send::<()>(Method::POST, "auth/logout", None).await;
        self.session.set(SessionState::Unauthenticated).await;
        match result {
            Ok(()) | Err(ClientError::Unauthorized) => Ok(()),
            Err(e) => Err(e),
        }
    }

    pub async fn register(&self, email: &str, password: &str) -> ClientResult<()> {
        let request = RegisterRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        self.http.send(Method::POST, "user", Some(&request)).await?;
        tracing::info!(email = %request.email, "Account registered");
        Ok(())
    }
}
