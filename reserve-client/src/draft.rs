//! Reservation draft
//!
//! A draft is what the booking form holds before it is sent. Validation is
//! pure and runs only at submit time; while the user edits, the form keeps
//! the slot list in step with the chosen date and drops any availability
//! answer that no longer matches the inputs.

use chrono::NaiveDate;
use shared::models::{
    ClockTime, DayWindow, OpeningHours, Reservation, ReservationCreate, Restaurant, TimeSlot,
};
use thiserror::Error;

use crate::api::ReserveClient;
use crate::availability::{Availability, AvailabilityQuery};
use crate::config::{ClientConfig, DEFAULT_DURATION_MINUTES};
use crate::error::ClientResult;
use crate::scope::RequestScope;
use crate::submission::{self, SubmitError};

/// Party size a new draft starts with
pub const DEFAULT_PARTY_SIZE: u32 = 2;

/// Why a draft cannot be submitted. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Choose a date")]
    MissingDate,

    #[error("Choose a time")]
    MissingTime,

    #[error("Party size must be at least 1")]
    InvalidPartySize,

    #[error("Duration must be at least 1 minute")]
    InvalidDuration,

    #[error("The restaurant is closed at that time")]
    OutsideOpeningHours,

    #[error("The reservation would end after closing time")]
    ExceedsClosingTime,
}

pub type ValidationResult = Result<(), ValidationError>;

/// Unsubmitted reservation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationDraft {
    pub restaurant_id: i64,
    pub date: Option<NaiveDate>,
    pub time: Option<ClockTime>,
    pub people: u32,
    pub duration_minutes: u32,
}

impl ReservationDraft {
    pub fn new(restaurant_id: i64) -> Self {
        Self {
            restaurant_id,
            date: None,
            time: None,
            people: DEFAULT_PARTY_SIZE,
            duration_minutes: DEFAULT_DURATION_MINUTES,
        }
    }

    pub fn at(mut self, date: NaiveDate, time: ClockTime) -> Self {
        self.date = Some(date);
        self.time = Some(time);
        self
    }

    pub fn for_people(mut self, people: u32) -> Self {
        self.people = people;
        self
    }

    pub fn lasting(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Wire payload; needs a date and a time
    pub fn to_payload(&self) -> Result<ReservationCreate, ValidationError> {
        Ok(ReservationCreate {
            restaurant_id: self.restaurant_id,
            date: self.date.ok_or(ValidationError::MissingDate)?,
            time: self.time.ok_or(ValidationError::MissingTime)?,
            people: self.people,
            duration_minutes: self.duration_minutes,
        })
    }

    /// Availability question for the current inputs, once date and time are set
    pub fn availability_query(&self) -> Option<AvailabilityQuery> {
        Some(AvailabilityQuery {
            restaurant_id: self.restaurant_id,
            date: self.date?,
            time: self.time?,
            duration_minutes: self.duration_minutes,
        })
    }
}

/// Checks a draft against the restaurant's hours.
///
/// When no hours are known at all, the opening-hours checks are skipped and
/// the service has the last word.
pub fn validate(draft: &ReservationDraft, hours: &OpeningHours) -> ValidationResult {
    let date = draft.date.ok_or(ValidationError::MissingDate)?;
    let time = draft.time.ok_or(ValidationError::MissingTime)?;
    if draft.people < 1 {
        return Err(ValidationError::InvalidPartySize);
    }
    if draft.duration_minutes < 1 {
        return Err(ValidationError::InvalidDuration);
    }

    let day = match hours.window(date) {
        DayWindow::Unknown => return Ok(()),
        DayWindow::Closed => return Err(ValidationError::OutsideOpeningHours),
        DayWindow::Open(day) => day,
    };
    if !day.contains(time) {
        return Err(ValidationError::OutsideOpeningHours);
    }
    // past midnight counts as after closing
    match time.checked_add_minutes(draft.duration_minutes) {
        Some(end) if end <= day.close => Ok(()),
        _ => Err(ValidationError::ExceedsClosingTime),
    }
}

// =============================================================================
// DraftForm
// =============================================================================

/// Booking form state for one restaurant
#[derive(Debug)]
pub struct DraftForm {
    draft: ReservationDraft,
    hours: OpeningHours,
    slot_step: u32,
    slots: Vec<TimeSlot>,
    availability: Option<Availability>,
    scope: RequestScope,
}

impl DraftForm {
    pub fn new(restaurant_id: i64, hours: OpeningHours, config: &ClientConfig) -> Self {
        let draft = ReservationDraft::new(restaurant_id).lasting(config.default_duration_minutes);
        Self {
            draft,
            hours,
            slot_step: config.slot_step_minutes,
            slots: Vec::new(),
            availability: None,
            scope: RequestScope::new(),
        }
    }

    pub fn for_restaurant(restaurant: &Restaurant, config: &ClientConfig) -> Self {
        Self::new(restaurant.id, restaurant.hours(), config)
    }

    pub fn draft(&self) -> &ReservationDraft {
        &self.draft
    }

    pub fn hours(&self) -> &OpeningHours {
        &self.hours
    }

    /// Start times offered for the chosen date
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    // ========== Field changes ==========

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.draft.date = date;
        self.slots = date
            .map(|d| self.hours.slots_for(d, self.slot_step))
            .unwrap_or_default();
        self.inputs_changed();
    }

    pub fn set_time(&mut self, time: Option<ClockTime>) {
        self.draft.time = time;
        self.inputs_changed();
    }

    pub fn select_slot(&mut self, slot: &TimeSlot) {
        self.set_time(slot.time());
    }

    pub fn set_people(&mut self, people: u32) {
        self.draft.people = people;
        self.inputs_changed();
    }

    pub fn set_duration(&mut self, minutes: u32) {
        self.draft.duration_minutes = minutes;
        self.inputs_changed();
    }

    fn inputs_changed(&mut self) {
        self.availability = None;
        self.scope.cancel_pending();
    }

    // ========== Availability ==========

    /// Last availability answer, if it still matches the inputs
    pub fn availability(&self) -> Option<&Availability> {
        self.availability.as_ref()
    }

    pub fn availability_summary(&self) -> Option<String> {
        self.availability.as_ref().map(Availability::summary)
    }

    /// Asks the service about the current inputs. Does nothing until both
    /// date and time are chosen.
    pub async fn refresh_availability(
        &mut self,
        client: &ReserveClient,
    ) -> ClientResult<Option<&Availability>> {
        let Some(query) = self.draft.availability_query() else {
            self.availability = None;
            return Ok(None);
        };
        let availability = self.scope.run(client.check_availability(query)).await?;
        if self.draft.availability_query() == Some(query) {
            self.availability = Some(availability);
        }
        Ok(self.availability.as_ref())
    }

    // ========== Submit ==========

    pub fn validate(&self) -> ValidationResult {
        validate(&self.draft, &self.hours)
    }

    /// Whether the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
            && self
                .availability
                .as_ref()
                .is_none_or(|a| a.can_seat(self.draft.people))
    }

    /// Validates and sends the draft. On failure the draft is left as it was.
    pub async fn submit(&mut self, client: &ReserveClient) -> Result<Reservation, SubmitError> {
        submission::submit(client, &self.draft, &self.hours).await
    }
}
