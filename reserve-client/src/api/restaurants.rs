//! Restaurant browsing and reviews

use shared::models::{
    DiningTable, NearbyQuery, Restaurant, RestaurantFilter, RestaurantSearch, Review, ReviewCreate,
};

use super::ReserveClient;
use crate::availability::AvailabilityQuery;
use crate::error::ClientResult;

impl ReserveClient {
    pub async fn list_restaurants(&self) -> ClientResult<Vec<Restaurant>> {
        self.http.get("restaurants").await
    }

    pub async fn search_restaurants(&self, search: &RestaurantSearch) -> ClientResult<Vec<Restaurant>> {
        self.http
            .get_query("restaurants/search", &search.to_query())
            .await
    }

    pub async fn filter_restaurants(&self, filter: &RestaurantFilter) -> ClientResult<Vec<Restaurant>> {
        self.http
            .get_query("restaurants/filter", &filter.to_query())
            .await
    }

    pub async fn nearby_restaurants(&self, query: &NearbyQuery) -> ClientResult<Vec<Restaurant>> {
        self.http.get_query("restaurants/nearby", query).await
    }

    /// Restaurant with opening hours and menu
    pub async fn restaurant(&self, id: i64) -> ClientResult<Restaurant> {
        self.http.get(&format!("restaurants/{id}")).await
    }

    pub async fn restaurant_reviews(&self, restaurant_id: i64) -> ClientResult<Vec<Review>> {
        self.http
            .get(&format!("restaurants/reviews/{restaurant_id}"))
            .await
    }

    pub async fn create_review(&self, review: &ReviewCreate) -> ClientResult<Review> {
        let created: Review = self.http.post("restaurants/reviews", review).await?;
        tracing::info!(
            reservation_id = review.reservation_id,
            rating = review.rating,
            "Review created"
        );
        Ok(created)
    }

    /// Tables free for the whole requested window.
    ///
    /// Advisory: nothing is held, and the answer may be stale by the time
    /// the reservation is submitted.
    pub async fn free_tables(&self, query: &AvailabilityQuery) -> ClientResult<Vec<DiningTable>> {
        self.http
            .get_query(
                &format!("restaurants/{}/tables/free", query.restaurant_id),
                &query.to_query(),
            )
            .await
    }
}
