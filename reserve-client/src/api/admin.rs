//! Administrator console

use reqwest::Method;
use shared::Page;
use shared::models::{
    AdminReservationQuery, AdminRestaurantRow, AdminReviewQuery, ListQuery, Reservation,
    RestaurantCreate, Review, Role, RoleChange, RolesReplace, UserRow,
};

use super::ReserveClient;
use crate::error::ClientResult;

impl ReserveClient {
    // ========== Users ==========

    pub async fn admin_users(&self, query: &ListQuery) -> ClientResult<Page<UserRow>> {
        self.http.get_query("admin/users", query).await
    }

    /// Adds or removes a single role
    pub async fn admin_change_role(&self, user_id: i64, role: Role, add: bool) -> ClientResult<()> {
        self.http
            .send(
                Method::PATCH,
                &format!("admin/users/{user_id}/role"),
                Some(&RoleChange { role, add }),
            )
            .await?;
        tracing::info!(user_id, role = role.as_str(), add, "User role changed");
        Ok(())
    }

    pub async fn admin_set_roles(&self, user_id: i64, roles: Vec<Role>) -> ClientResult<()> {
        self.http
            .send(
                Method::PUT,
                &format!("admin/users/{user_id}/roles"),
                Some(&RolesReplace { roles }),
            )
            .await?;
        tracing::info!(user_id, "User roles replaced");
        Ok(())
    }

    // ========== Restaurants ==========

    pub async fn admin_restaurants(&self, query: &ListQuery) -> ClientResult<Page<AdminRestaurantRow>> {
        self.http.get_query("admin/restaurants", query).await
    }

    pub async fn admin_create_restaurant(&self, restaurant: &RestaurantCreate) -> ClientResult<()> {
        self.http
            .send(Method::POST, "admin/restaurants", Some(restaurant))
            .await?;
        tracing::info!(name = %restaurant.name, owner_id = restaurant.owner_id, "Restaurant created");
        Ok(())
    }

    pub async fn admin_delete_restaurant(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("admin/restaurants/{id}")).await?;
        tracing::info!(restaurant_id = id, "Restaurant deleted");
        Ok(())
    }

    // ========== Reservations ==========

    pub async fn admin_reservations(
        &self,
        query: &AdminReservationQuery,
    ) -> ClientResult<Page<Reservation>> {
        self.http.get_query("admin/reservations", query).await
    }

    pub async fn admin_cancel_reservation(&self, id: i64) -> ClientResult<()> {
        self.http
            .send(
                Method::PATCH,
                &format!("admin/reservations/{id}/cancel"),
                Some(&serde_json::json!({})),
            )
            .await?;
        tracing::info!(reservation_id = id, "Reservation cancelled by admin");
        Ok(())
    }

    /// Administrative override: brings a cancelled or rejected reservation back
    pub async fn admin_restore_reservation(&self, id: i64) -> ClientResult<()> {
        self.http
            .send(
                Method::PATCH,
                &format!("admin/reservations/{id}/restore"),
                Some(&serde_json::json!({})),
            )
            .await?;
        tracing::info!(reservation_id = id, "Reservation restored");
        Ok(())
    }

    pub async fn admin_delete_reservation(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("admin/reservations/{id}")).await?;
        tracing::info!(reservation_id = id, "Reservation deleted");
        Ok(())
    }

    // ========== Reviews ==========

    pub async fn admin_reviews(&self, query: &AdminReviewQuery) -> ClientResult<Page<Review>> {
        self.http.get_query("admin/reviews", query).await
    }

    pub async fn admin_delete_review(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("admin/reviews/{id}")).await?;
        tracing::info!(review_id = id, "Review deleted");
        Ok(())
    }
}
