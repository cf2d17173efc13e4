//! Owner panel of one restaurant

use shared::models::{
    Dashboard, DiningTable, DiningTableCreate, DiningTableUpdate, OwnedRestaurant, Reservation,
    ReservationFilter, ReservationStatus, RestaurantProfile, RestaurantProfileUpdate, StatusUpdate,
    TableAssignment,
};

use super::ReserveClient;
use crate::error::ClientResult;

fn panel(restaurant_id: i64, rest: &str) -> String {
    format!("restaurants/{restaurant_id}/panel/{rest}")
}

impl ReserveClient {
    /// Restaurants the caller manages
    pub async fn my_restaurants(&self) -> ClientResult<Vec<OwnedRestaurant>> {
        self.http.get("restaurants/my").await
    }

    // ========== Profile ==========

    pub async fn profile(&self, restaurant_id: i64) -> ClientResult<RestaurantProfile> {
        self.http.get(&panel(restaurant_id, "profile")).await
    }

    pub async fn update_profile(
        &self,
        restaurant_id: i64,
        update: &RestaurantProfileUpdate,
    ) -> ClientResult<RestaurantProfile> {
        let profile = self.http.patch(&panel(restaurant_id, "profile"), update).await?;
        tracing::info!(restaurant_id, "Restaurant profile updated");
        Ok(profile)
    }

    pub async fn dashboard(&self, restaurant_id: i64) -> ClientResult<Dashboard> {
        self.http.get(&panel(restaurant_id, "dashboard")).await
    }

    // ========== Tables ==========

    pub async fn panel_tables(&self, restaurant_id: i64) -> ClientResult<Vec<DiningTable>> {
        self.http.get(&panel(restaurant_id, "tables")).await
    }

    pub async fn create_table(
        &self,
        restaurant_id: i64,
        table: &DiningTableCreate,
    ) -> ClientResult<DiningTable> {
        let created: DiningTable = self.http.post(&panel(restaurant_id, "tables"), table).await?;
        tracing::info!(restaurant_id, table_id = created.id, seats = created.seats, "Table created");
        Ok(created)
    }

    pub async fn update_table(
        &self,
        restaurant_id: i64,
        table_id: i64,
        update: &DiningTableUpdate,
    ) -> ClientResult<DiningTable> {
        let updated = self
            .http
            .patch(&panel(restaurant_id, &format!("tables/{table_id}")), update)
            .await?;
        tracing::info!(restaurant_id, table_id, "Table updated");
        Ok(updated)
    }

    // ========== Reservations ==========

    pub async fn panel_reservations(
        &self,
        restaurant_id: i64,
        filter: &ReservationFilter,
    ) -> ClientResult<Vec<Reservation>> {
        self.http
            .get_query(&panel(restaurant_id, "reservations"), filter)
            .await
    }

    pub async fn set_reservation_status(
        &self,
        restaurant_id: i64,
        reservation_id: i64,
        status: ReservationStatus,
    ) -> ClientResult<()> {
        self.http
            .send(
                reqwest::Method::PATCH,
                &panel(restaurant_id, &format!("reservations/{reservation_id}/status")),
                Some(&StatusUpdate { status }),
            )
            .await?;
        tracing::info!(restaurant_id, reservation_id, %status, "Reservation status changed");
        Ok(())
    }

    pub async fn assign_table(
        &self,
        restaurant_id: i64,
        reservation_id: i64,
        table_id: i64,
    ) -> ClientResult<()> {
        self.http
            .send(
                reqwest::Method::POST,
                &panel(restaurant_id, &format!("reservations/{reservation_id}/assign-table")),
                Some(&TableAssignment { table_id }),
            )
            .await?;
        tracing::info!(restaurant_id, reservation_id, table_id, "Table assigned");
        Ok(())
    }

    pub async fn unassign_table(
        &self,
        restaurant_id: i64,
        reservation_id: i64,
        table_id: i64,
    ) -> ClientResult<()> {
        self.http
            .send(
                reqwest::Method::POST,
                &panel(restaurant_id, &format!("reservations/{reservation_id}/unassign-table")),
                Some(&TableAssignment { table_id }),
            )
            .await?;
        tracing::info!(restaurant_id, reservation_id, table_id, "Table unassigned");
        Ok(())
    }
}
