//! Restaurant Model

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::opening_hours::OpeningHours;
use super::reservation::ReservationStatus;

/// Restaurant as returned by the public endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub image_gallery: Option<String>,
    /// Serialized weekly schedule, see [`OpeningHours`]
    #[serde(default)]
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub cuisines: Vec<CuisineLink>,
    #[serde(default)]
    pub menu: Vec<MenuItem>,
}

impl Restaurant {
    /// Parsed opening hours; empty when absent or unreadable
    pub fn hours(&self) -> OpeningHours {
        OpeningHours::parse_opt(self.opening_hours.as_deref())
    }

    /// Cuisine names from the join rows, falling back to the flat field
    pub fn cuisine_names(&self) -> Vec<&str> {
        if self.cuisines.is_empty() {
            return self.cuisine.as_deref().into_iter().collect();
        }
        self.cuisines.iter().map(|c| c.cuisine.name.as_str()).collect()
    }

    /// Menu grouped by trimmed category, categories in name order.
    /// Items without a category land in "Other".
    pub fn menu_by_category(&self) -> BTreeMap<String, Vec<&MenuItem>> {
        let mut groups: BTreeMap<String, Vec<&MenuItem>> = BTreeMap::new();
        for item in &self.menu {
            let key = item
                .category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or("Other");
            groups.entry(key.to_string()).or_default().push(item);
        }
        groups
    }
}

/// Postal address with coordinates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: i64,
    pub city: String,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub street_number: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Restaurant ↔ cuisine join row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuisineLink {
    pub cuisine: Cuisine,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cuisine {
    pub id: i64,
    pub name: String,
}

/// Menu entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_available: Option<bool>,
}

impl MenuItem {
    /// Items are available unless explicitly marked otherwise
    pub fn available(&self) -> bool {
        self.is_available != Some(false)
    }
}

/// Restaurant reference embedded in reservations and reviews
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRef {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
}

/// Entry of `/restaurants/my`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedRestaurant {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// Owner panel
// =============================================================================

/// Owner panel profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantProfile {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
}

impl RestaurantProfile {
    pub fn hours(&self) -> OpeningHours {
        OpeningHours::parse_opt(self.opening_hours.as_deref())
    }
}

/// Profile update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

impl RestaurantProfileUpdate {
    pub fn with_hours(mut self, hours: &OpeningHours) -> Self {
        self.opening_hours = Some(hours.to_json());
        self
    }
}

/// Owner dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub restaurant: OwnedRestaurant,
    /// Today's occupancy in percent
    pub occupancy: f64,
    #[serde(default)]
    pub today: Vec<DashboardEntry>,
    #[serde(default)]
    pub tomorrow: Vec<DashboardEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardEntry {
    pub id: i64,
    pub date: String,
    pub people: u32,
    pub status: ReservationStatus,
}

// =============================================================================
// Search
// =============================================================================

/// `/restaurants/search` parameters
#[derive(Debug, Clone, Default)]
pub struct RestaurantSearch {
    pub cuisine: Vec<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<f64>,
}

impl RestaurantSearch {
    /// Query pairs; `cuisine` repeats, blank names are dropped
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query: Vec<(&'static str, String)> =
            self.cuisine.iter().map(|c| ("cuisine", c.clone())).collect();
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            query.push(("name", name.to_string()));
        }
        if let Some(location) = self.location.as_deref().filter(|l| !l.is_empty()) {
            query.push(("location", location.to_string()));
        }
        if let Some(lat) = self.latitude {
            query.push(("latitude", lat.to_string()));
        }
        if let Some(lng) = self.longitude {
            query.push(("longitude", lng.to_string()));
        }
        if let Some(radius) = self.radius {
            query.push(("radius", radius.to_string()));
        }
        query
    }
}

/// `/restaurants/filter` parameters
#[derive(Debug, Clone, Default)]
pub struct RestaurantFilter {
    pub cuisine: Vec<String>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
}

impl RestaurantFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query: Vec<(&'static str, String)> =
            self.cuisine.iter().map(|c| ("cuisine", c.clone())).collect();
        if let Some(min) = self.min_rating.filter(|r| *r > 0.0) {
            query.push(("minRating", min.to_string()));
        }
        if let Some(max) = self.max_rating.filter(|r| *r > 0.0) {
            query.push(("maxRating", max.to_string()));
        }
        query
    }
}

/// `/restaurants/nearby` parameters
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
}
