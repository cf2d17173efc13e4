//! Favorite restaurants

use reqwest::Method;
use shared::models::Favorite;

use super::ReserveClient;
use crate::error::ClientResult;

impl ReserveClient {
    /// Ids of the caller's favorite restaurants
    pub async fn favorites(&self) -> ClientResult<Vec<i64>> {
        let favorites: Vec<Favorite> = self.http.get("favorites").await?;
        Ok(favorites.into_iter().map(|f| f.restaurant_id).collect())
    }

    pub async fn add_favorite(&self, restaurant_id: i64) -> ClientResult<()> {
        self.http
            .send::<()>(Method::POST, &format!("favorites/{restaurant_id}"), None)
            .await
    }

    pub async fn remove_favorite(&self, restaurant_id: i64) -> ClientResult<()> {
        self.http.delete(&format!("favorites/{restaurant_id}")).await
    }

    /// Flips the favorite flag; returns the new value
    pub async fn toggle_favorite(&self, restaurant_id: i64, is_favorite: bool) -> ClientResult<bool> {
        if is_favorite {
            self.remove_favorite(restaurant_id).await?;
        } else {
            self.add_favorite(restaurant_id).await?;
        }
        Ok(!is_favorite)
    }
}
