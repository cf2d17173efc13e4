//! Advisory availability
//!
//! The service computes which tables are free for a window; this module
//! shapes the query and turns the answer into something a booking form can
//! show. Nothing here holds capacity: a table that is free now may be gone
//! by the time the reservation is submitted.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use shared::models::{ClockTime, DiningTable};

use crate::api::ReserveClient;
use crate::error::ClientResult;

/// Shown when no table is free
pub const NO_TABLES_MESSAGE: &str = "No tables available";

/// Window to check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub restaurant_id: i64,
    pub date: NaiveDate,
    pub time: ClockTime,
    pub duration_minutes: u32,
}

impl AvailabilityQuery {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("date", self.date.format("%Y-%m-%d").to_string()),
            ("time", self.time.to_string()),
            ("durationMinutes", self.duration_minutes.to_string()),
        ]
    }
}

/// Free tables for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    query: AvailabilityQuery,
    tables: Vec<DiningTable>,
}

impl Availability {
    pub fn new(query: AvailabilityQuery, tables: Vec<DiningTable>) -> Self {
        Self { query, tables }
    }

    pub fn query(&self) -> &AvailabilityQuery {
        &self.query
    }

    pub fn tables(&self) -> &[DiningTable] {
        &self.tables
    }

    pub fn is_available(&self) -> bool {
        !self.tables.is_empty()
    }

    pub fn total_seats(&self) -> u32 {
        self.tables.iter().map(|t| t.seats).sum()
    }

    /// Whether the free tables together could seat `people`
    pub fn can_seat(&self, people: u32) -> bool {
        people > 0 && self.total_seats() >= people
    }

    pub fn summary(&self) -> String {
        summarize(&self.tables)
    }
}

/// Groups tables by seat count, largest first: `"2×4-seat, 3×2-seat"`
pub fn summarize(tables: &[DiningTable]) -> String {
    if tables.is_empty() {
        return NO_TABLES_MESSAGE.to_string();
    }
    let mut by_seats: BTreeMap<u32, usize> = BTreeMap::new();
    for table in tables {
        *by_seats.entry(table.seats).or_default() += 1;
    }
    by_seats
        .iter()
        .rev()
        .map(|(seats, count)| format!("{count}×{seats}-seat"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ReserveClient {
    /// Asks the service which tables are free for `query`
    pub async fn check_availability(&self, query: AvailabilityQuery) -> ClientResult<Availability> {
        let tables = self.free_tables(&query).await?;
        tracing::debug!(
            restaurant_id = query.restaurant_id,
            free = tables.len(),
            "Availability checked"
        );
        Ok(Availability::new(query, tables))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(id: i64, seats: u32) -> DiningTable {
        DiningTable {
            id,
            name: None,
            seats,
            is_active: true,
            restaurant_id: Some(1),
        }
    }

    fn query() -> AvailabilityQuery {
        AvailabilityQuery {
            restaurant_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
            time: ClockTime::from_hm(18, 0).unwrap(),
            duration_minutes: 90,
        }
    }

    #[test]
    fn test_summarize_groups_descending() {
        let tables = vec![table(1, 2), table(2, 4), table(3, 2), table(4, 6), table(5, 2)];
        assert_eq!(summarize(&tables), "1×6-seat, 1×4-seat, 3×2-seat");
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), NO_TABLES_MESSAGE);
    }

    #[test]
    fn test_query_params() {
        assert_eq!(
            query().to_query(),
            vec![
                ("date", "2025-01-20".to_string()),
                ("time", "18:00".to_string()),
                ("durationMinutes", "90".to_string()),
            ]
        );
    }

    #[test]
    fn test_can_seat() {
        let availability = Availability::new(query(), vec![table(1, 2), table(2, 4)]);
        assert!(availability.is_available());
        assert_eq!(availability.total_seats(), 6);
        assert!(availability.can_seat(6));
        assert!(!availability.can_seat(7));
        assert!(!availability.can_seat(0));

        let none = Availability::new(query(), vec![]);
        assert!(!none.is_available());
        assert!(!none.can_seat(1));
    }
}
