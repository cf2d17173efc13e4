//! The guest's own reservations

use reqwest::Method;
use shared::models::{Reservation, ReservationCreate};

use super::ReserveClient;
use crate::error::ClientResult;

impl ReserveClient {
    /// Creates a reservation. The result is PENDING until the owner acts.
    pub async fn create_reservation(&self, payload: &ReservationCreate) -> ClientResult<Reservation> {
        let reservation: Reservation = self.http.post("reservations", payload).await?;
        tracing::info!(
            reservation_id = reservation.id,
            restaurant_id = payload.restaurant_id,
            status = %reservation.status,
            "Reservation created"
        );
        Ok(reservation)
    }

    pub async fn my_reservations(&self) -> ClientResult<Vec<Reservation>> {
        self.http.get("reservations/my").await
    }

    /// Self-cancel; the service only accepts it while PENDING
    pub async fn cancel_reservation(&self, id: i64) -> ClientResult<()> {
        self.http
            .send::<()>(Method::PATCH, &format!("reservations/{id}/cancel"), None)
            .await?;
        tracing::info!(reservation_id = id, "Reservation cancelled");
        Ok(())
    }
}
