//! Admin console payloads and listing rows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::reservation::{ReservationStatus, UserRef};
use super::user::Role;

/// Text search with offset paging (`q`, `skip`, `take`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListQuery {
    pub q: String,
    pub skip: u32,
    pub take: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            q: String::new(),
            skip: 0,
            take: 20,
        }
    }
}

impl ListQuery {
    pub fn search(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Default::default()
        }
    }

    pub fn page(mut self, skip: u32, take: u32) -> Self {
        self.skip = skip;
        self.take = take;
        self
    }
}

/// Add or remove a single role
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RoleChange {
    pub role: Role,
    pub add: bool,
}

/// Replace the full role set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolesReplace {
    pub roles: Vec<Role>,
}

/// Admin restaurant listing row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRestaurantRow {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(default)]
    pub owner: Option<UserRef>,
}

/// Admin create-restaurant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantCreate {
    pub name: String,
    pub location: String,
    pub cuisine: String,
    pub owner_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

/// Admin reservation listing parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminReservationQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take: Option<u32>,
}

/// Admin review listing parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminReviewQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take: Option<u32>,
}

/// `/favorites` entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub restaurant_id: i64,
}
