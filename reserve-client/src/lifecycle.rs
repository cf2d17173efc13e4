//! The guest's reservations: upcoming/past split, self-cancel and reviews

use chrono::{DateTime, Utc};
use shared::models::{Actor, Reservation, ReservationStatus, Review, ReviewCreate};

use crate::api::ReserveClient;
use crate::error::{ClientError, ClientResult};
use crate::scope::RequestScope;

/// Reservations split around a reference instant
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// `date >= now`
    pub upcoming: Vec<Reservation>,
    /// `date < now`
    pub past: Vec<Reservation>,
}

/// Splits `reservations` around `now`, keeping their order
pub fn partition(reservations: &[Reservation], now: DateTime<Utc>) -> Partition {
    let (upcoming, past) = reservations.iter().cloned().partition(|r| r.date >= now);
    Partition { upcoming, past }
}

/// A review may be left once, after the reservation date
pub fn can_review(reservation: &Reservation, now: DateTime<Utc>) -> bool {
    reservation.date < now && !reservation.is_reviewed()
}

/// Whether the guest is offered the cancel action
pub fn can_self_cancel(reservation: &Reservation) -> bool {
    reservation
        .status
        .can_transition(ReservationStatus::Cancelled, Actor::Guest)
}

/// "My reservations" view
///
/// Holds the last list fetched from the service. Every action is followed
/// by a refetch; nothing is patched locally.
#[derive(Debug)]
pub struct ReservationViewer {
    client: ReserveClient,
    reservations: Vec<Reservation>,
    scope: RequestScope,
}

impl ReservationViewer {
    pub fn new(client: ReserveClient) -> Self {
        Self {
            client,
            reservations: Vec::new(),
            scope: RequestScope::new(),
        }
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn reservation(&self, id: i64) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == id)
    }

    pub fn partition(&self, now: DateTime<Utc>) -> Partition {
        partition(&self.reservations, now)
    }

    pub async fn refresh(&mut self) -> ClientResult<&[Reservation]> {
        self.client.session().require_user().await?;
        let reservations = self.scope.run(self.client.my_reservations()).await?;
        tracing::debug!(count = reservations.len(), "Reservations loaded");
        self.reservations = reservations;
        Ok(&self.reservations)
    }

    /// Self-cancel. The service decides; a reservation that is no longer
    /// PENDING comes back as `Conflict`.
    pub async fn cancel(&mut self, reservation_id: i64) -> ClientResult<()> {
        self.client.cancel_reservation(reservation_id).await?;
        self.refresh().await?;
        Ok(())
    }

    pub async fn add_review(
        &mut self,
        reservation_id: i64,
        rating: i64,
        comment: &str,
        now: DateTime<Utc>,
    ) -> ClientResult<Review> {
        let reservation = self
            .reservation(reservation_id)
            .ok_or_else(|| ClientError::NotFound(format!("reservation {reservation_id}")))?;
        if !can_review(reservation, now) {
            return Err(ClientError::NotAllowed(
                "only past reservations without a review can be reviewed".into(),
            ));
        }
        let restaurant_id = reservation.restaurant_id().ok_or_else(|| {
            ClientError::InvalidResponse(format!("reservation {reservation_id} has no restaurant"))
        })?;

        let review = ReviewCreate::new(restaurant_id, reservation_id, rating, comment)?;
        let created = self.client.create_review(&review).await?;
        self.refresh().await?;
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;
    use shared::models::ReviewRef;

    use super::*;

    fn reservation(id: i64, date: DateTime<Utc>, status: ReservationStatus) -> Reservation {
        Reservation {
            id,
            date,
            time: "18:00".into(),
            people: 2,
            duration_minutes: Some(90),
            end_at: None,
            status,
            restaurant: None,
            user: None,
            tables: Vec::new(),
            review: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 20, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_partition_boundary() {
        let list = vec![
            reservation(1, now() - Duration::days(1), ReservationStatus::Confirmed),
            reservation(2, now(), ReservationStatus::Pending),
            reservation(3, now() + Duration::hours(1), ReservationStatus::Pending),
        ];
        let split = partition(&list, now());
        let ids = |v: &[Reservation]| v.iter().map(|r| r.id).collect::<Vec<_>>();
        assert_eq!(ids(&split.upcoming), vec![2, 3]);
        assert_eq!(ids(&split.past), vec![1]);
    }

    #[test]
    fn test_review_gate() {
        let past = reservation(1, now() - Duration::days(2), ReservationStatus::Confirmed);
        assert!(can_review(&past, now()));

        let mut reviewed = past.clone();
        reviewed.review = Some(ReviewRef { id: 4 });
        assert!(!can_review(&reviewed, now()));

        let today = reservation(2, now(), ReservationStatus::Confirmed);
        assert!(!can_review(&today, now()));
    }

    #[test]
    fn test_self_cancel_only_while_pending() {
        assert!(can_self_cancel(&reservation(1, now(), ReservationStatus::Pending)));
        assert!(!can_self_cancel(&reservation(1, now(), ReservationStatus::Confirmed)));
        assert!(!can_self_cancel(&reservation(1, now(), ReservationStatus::Cancelled)));
    }

    proptest! {
        #[test]
        fn prop_later_now_moves_reservations_to_past(
            offsets in prop::collection::vec(-10_000i64..10_000, 0..20),
            a in -10_000i64..10_000,
            b in -10_000i64..10_000,
        ) {
            let list: Vec<_> = offsets
                .iter()
                .enumerate()
                .map(|(i, m)| reservation(i as i64, now() + Duration::minutes(*m), ReservationStatus::Pending))
                .collect();
            let (early, late) = (now() + Duration::minutes(a.min(b)), now() + Duration::minutes(a.max(b)));

            let first = partition(&list, early);
            let second = partition(&list, late);
            prop_assert_eq!(first.upcoming.len() + first.past.len(), list.len());
            prop_assert!(second.past.len() >= first.past.len());
            for r in &first.past {
                prop_assert!(second.past.iter().any(|p| p.id == r.id));
            }
        }
    }
}
