//! Typed API surface
//!
//! [`ReserveClient`] owns the transport and the session context. The
//! endpoints are grouped by audience:
//!
//! - `auth`: sign-in, sign-out, registration
//! - `restaurants`: browsing, search, reviews, advisory availability
//! - `reservations`: the guest's own reservations
//! - `favorites`: favorite restaurants
//! - `panel`: the owner panel of one restaurant
//! - `admin`: the administrator console

mod admin;
mod auth;
mod favorites;
mod panel;
mod reservations;
mod restaurants;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::session::SessionContext;

/// Client for the reservation service
#[derive(Debug, Clone)]
pub struct ReserveClient {
    http: HttpClient,
    session: SessionContext,
    config: ClientConfig,
}

impl ReserveClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let session = SessionContext::new();
        let http = HttpClient::new(&config, session.clone())?;
        tracing::debug!(base_url = http.base_url(), "Reservation client created");
        Ok(Self {
            http,
            session,
            config,
        })
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
