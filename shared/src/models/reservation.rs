//! Reservation Model
//!
//! Reservations are owned by the service. The client holds short-lived
//! copies and never patches them locally; every change is followed by a
//! refetch.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::dining_table::TableRef;
use super::opening_hours::ClockTime;
use super::restaurant::RestaurantRef;
use crate::util::{deserialize_instant, deserialize_opt_instant};

/// Reservation status
///
/// ```text
/// PENDING   -> CONFIRMED   (owner/admin)
/// PENDING   -> REJECTED    (owner/admin)
/// PENDING   -> CANCELLED   (guest, owner/admin)
/// CONFIRMED -> CANCELLED   (owner/admin)
/// ```
///
/// REJECTED and CANCELLED are terminal. The admin `restore` endpoint is an
/// override outside this machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
}

/// Who is asking for a status change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// The guest who made the reservation
    Guest,
    Owner,
    Admin,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 4] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::Rejected,
        ReservationStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::Rejected => "REJECTED",
            ReservationStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ReservationStatus::Rejected | ReservationStatus::Cancelled)
    }

    /// Whether `actor` may move a reservation from `self` to `next`
    pub fn can_transition(self, next: ReservationStatus, actor: Actor) -> bool {
        use ReservationStatus::*;
        let staff = matches!(actor, Actor::Owner | Actor::Admin);
        match (self, next) {
            (Pending, Confirmed) | (Pending, Rejected) => staff,
            (Pending, Cancelled) => true,
            (Confirmed, Cancelled) => staff,
            _ => false,
        }
    }

    /// Statuses reachable from `self` for `actor`
    pub fn next_for(self, actor: Actor) -> Vec<ReservationStatus> {
        Self::ALL
            .into_iter()
            .filter(|next| self.can_transition(*next, actor))
            .collect()
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reservation record as returned by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    #[serde(deserialize_with = "deserialize_instant")]
    pub date: DateTime<Utc>,
    pub time: String,
    pub people: u32,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_opt_instant")]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default)]
    pub restaurant: Option<RestaurantRef>,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default)]
    pub tables: Vec<ReservationTable>,
    #[serde(default)]
    pub review: Option<ReviewRef>,
}

impl Reservation {
    pub fn restaurant_id(&self) -> Option<i64> {
        self.restaurant.as_ref().map(|r| r.id)
    }

    pub fn table_ids(&self) -> Vec<i64> {
        self.tables.iter().map(|t| t.table.id).collect()
    }

    pub fn has_table(&self, table_id: i64) -> bool {
        self.tables.iter().any(|t| t.table.id == table_id)
    }

    /// Sum of seats over assigned tables. Display only; capacity is
    /// enforced by the service.
    pub fn assigned_seats(&self) -> u32 {
        self.tables.iter().map(|t| t.table.seats).sum()
    }

    pub fn is_reviewed(&self) -> bool {
        self.review.is_some()
    }
}

/// Reservation ↔ table join row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationTable {
    pub table: TableRef,
}

/// User reference embedded in reservations and reviews
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
}

/// Link to the review left for a reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRef {
    pub id: i64,
}

// =============================================================================
// Payloads
// =============================================================================

/// Create reservation payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreate {
    pub restaurant_id: i64,
    /// Calendar date, "YYYY-MM-DD"
    pub date: NaiveDate,
    pub time: ClockTime,
    pub people: u32,
    pub duration_minutes: u32,
}

/// Status change payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: ReservationStatus,
}

/// Assign / unassign table payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableAssignment {
    pub table_id: i64,
}

/// Owner panel listing filter, sent as query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
}

impl ReservationFilter {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Default::default()
        }
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }
}
