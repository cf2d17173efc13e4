//! Client error types

use shared::ModelError;
use thiserror::Error;

use crate::draft::ValidationError;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (network, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Session missing or expired (401)
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied (403)
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Business rule rejected by the service (400, 409, 422)
    #[error("Rejected by server: {0}")]
    Conflict(String),

    /// Server-side failure (5xx)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Draft failed client-side validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Input violates a model rule (rating, comment, seats)
    #[error("Invalid input: {0}")]
    Model(#[from] ModelError),

    /// Action is not offered in the current state
    #[error("Not allowed: {0}")]
    NotAllowed(String),

    /// Superseded by a newer request or the owning view went away
    #[error("Request cancelled")]
    Cancelled,

    /// Unusable configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification used to decide how a failure is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Detected locally, never reached the network
    Validation,
    /// Service rejected the request on business rules
    Conflict,
    /// Session is gone; re-authentication required
    Auth,
    Forbidden,
    NotFound,
    /// Network failure, server failure or unreadable body
    Transport,
    /// Result discarded; nothing to show
    Cancelled,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Validation(_)
            | ClientError::Model(_)
            | ClientError::NotAllowed(_)
            | ClientError::Config(_) => ErrorKind::Validation,
            ClientError::Conflict(_) => ErrorKind::Conflict,
            ClientError::Unauthorized => ErrorKind::Auth,
            ClientError::Forbidden(_) => ErrorKind::Forbidden,
            ClientError::NotFound(_) => ErrorKind::NotFound,
            ClientError::Http(_)
            | ClientError::InvalidResponse(_)
            | ClientError::Internal(_)
            | ClientError::Serialization(_) => ErrorKind::Transport,
            ClientError::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// True when the caller must send the user back to sign-in
    pub fn requires_reauth(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Cancelled)
    }

    /// Message tied to the action that failed, e.g. `"create reservation"`
    pub fn user_message(&self, action: &str) -> String {
        match self.kind() {
            ErrorKind::Auth => "Your session has expired, please sign in again".to_string(),
            ErrorKind::Transport => format!("Could not {action}, please try again later"),
            _ => format!("Could not {action}: {self}"),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
