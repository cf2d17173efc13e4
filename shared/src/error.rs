//! Model-level error types
//!
//! Raised when a value coming from user input or the wire does not satisfy
//! a model invariant (clock time format, rating range, comment length).

use thiserror::Error;

/// Errors produced while constructing or checking shared models
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Wall-clock time is not a zero-padded 24h "HH:mm" value
    #[error("invalid clock time: {0:?} (expected HH:mm)")]
    InvalidClockTime(String),

    /// Review rating outside 1..=5
    #[error("rating must be between {min} and {max}, got {got}")]
    RatingOutOfRange { got: i64, min: u8, max: u8 },

    /// Review comment shorter than the minimum
    #[error("comment must be at least {min} characters")]
    CommentTooShort { min: usize },

    /// Table seat count must be positive
    #[error("table must have at least one seat")]
    NoSeats,
}

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;
