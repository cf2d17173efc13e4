//! Reservation submission
//!
//! One validated draft becomes one `POST /reservations`. There is no retry
//! and no idempotency key: sending the same draft twice books twice.

use shared::models::{OpeningHours, Reservation};
use thiserror::Error;

use crate::api::ReserveClient;
use crate::draft::{ReservationDraft, ValidationError, validate};
use crate::error::{ClientError, ErrorKind};

/// Why a submission did not produce a reservation
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Rejected locally; nothing was sent
    #[error("Invalid reservation: {0}")]
    Invalid(#[from] ValidationError),

    /// The service refused the reservation (no free table, bad input, ...)
    #[error("Reservation rejected: {0}")]
    Conflict(String),

    /// No valid session; sign in and try again
    #[error("Sign in to make a reservation")]
    Unauthenticated,

    #[error("Could not create reservation: {0}")]
    Unknown(ClientError),
}

impl From<ClientError> for SubmitError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Validation(reason) => SubmitError::Invalid(reason),
            ClientError::Unauthorized => SubmitError::Unauthenticated,
            ClientError::Conflict(message)
            | ClientError::NotFound(message)
            | ClientError::Forbidden(message) => SubmitError::Conflict(message),
            other => SubmitError::Unknown(other),
        }
    }
}

impl SubmitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SubmitError::Invalid(_) => ErrorKind::Validation,
            SubmitError::Conflict(_) => ErrorKind::Conflict,
            SubmitError::Unauthenticated => ErrorKind::Auth,
            SubmitError::Unknown(err) => err.kind(),
        }
    }
}

/// Validates `draft` against `hours`, then creates the reservation.
///
/// The draft is only read; a failed submission can be fixed and resent.
pub async fn submit(
    client: &ReserveClient,
    draft: &ReservationDraft,
    hours: &OpeningHours,
) -> Result<Reservation, SubmitError> {
    if let Err(reason) = validate(draft, hours) {
        tracing::debug!(restaurant_id = draft.restaurant_id, %reason, "Draft rejected locally");
        return Err(reason.into());
    }
    let payload = draft.to_payload()?;
    let reservation = client.create_reservation(&payload).await.map_err(|e| {
        tracing::warn!(restaurant_id = draft.restaurant_id, error = %e, "Reservation not created");
        SubmitError::from(e)
    })?;
    Ok(reservation)
}
