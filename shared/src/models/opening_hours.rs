//! Opening Hours Model
//!
//! Restaurants keep their weekly schedule as an opaque JSON string owned by
//! the service, for example:
//!
//! ```json
//! { "monday": { "open": "10:00", "close": "22:00" }, "sunday": null }
//! ```
//!
//! The client owns parsing and serialization. Parsing never fails: a blob
//! that cannot be read yields an empty schedule ("no hours known").
//! Slot generation fails closed: anything unknown produces no slots.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::ModelError;

/// Default distance between two bookable slots
pub const DEFAULT_SLOT_STEP_MINUTES: u32 = 30;

/// Minutes in one calendar day
pub const MINUTES_PER_DAY: u32 = 24 * 60;

// =============================================================================
// ClockTime
// =============================================================================

/// Wall-clock time of day, "HH:mm" on the wire.
///
/// Stored as minutes since midnight, always `< 1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour as u16 * 60 + minute as u16))
        } else {
            None
        }
    }

    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes as u16))
    }

    /// Minutes since midnight
    pub fn minutes(self) -> u32 {
        self.0 as u32
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    /// Adds minutes on the same day. `None` when the result reaches or
    /// passes midnight.
    pub fn checked_add_minutes(self, minutes: u32) -> Option<Self> {
        Self::from_minutes(self.minutes().checked_add(minutes)?)
    }
}

impl FromStr for ClockTime {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidClockTime(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }
        let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(invalid());
        }
        let hour = (digits[0] - b'0') * 10 + (digits[1] - b'0');
        let minute = (digits[2] - b'0') * 10 + (digits[3] - b'0');
        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// DayKey
// =============================================================================

/// Canonical weekday key used in the opening-hours blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKey {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayKey {
    pub const ALL: [DayKey; 7] = [
        DayKey::Monday,
        DayKey::Tuesday,
        DayKey::Wednesday,
        DayKey::Thursday,
        DayKey::Friday,
        DayKey::Saturday,
        DayKey::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DayKey::Monday => "monday",
            DayKey::Tuesday => "tuesday",
            DayKey::Wednesday => "wednesday",
            DayKey::Thursday => "thursday",
            DayKey::Friday => "friday",
            DayKey::Saturday => "saturday",
            DayKey::Sunday => "sunday",
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayKey::Monday,
            Weekday::Tue => DayKey::Tuesday,
            Weekday::Wed => DayKey::Wednesday,
            Weekday::Thu => DayKey::Thursday,
            Weekday::Fri => DayKey::Friday,
            Weekday::Sat => DayKey::Saturday,
            Weekday::Sun => DayKey::Sunday,
        }
    }

    pub fn of_date(date: NaiveDate) -> Self {
        Self::from_weekday(date.weekday())
    }

    /// Translates a (possibly localized) day name into the canonical key.
    ///
    /// Calendar widgets hand out display names in the user's locale. English
    /// (full or three-letter) and Polish names are understood, with or
    /// without diacritics. Anything else is `None`.
    pub fn from_day_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        if let Ok(weekday) = Weekday::from_str(&name) {
            return Some(Self::from_weekday(weekday));
        }
        let key = match name.as_str() {
            "poniedziałek" | "poniedzialek" => DayKey::Monday,
            "wtorek" => DayKey::Tuesday,
            "środa" | "sroda" => DayKey::Wednesday,
            "czwartek" => DayKey::Thursday,
            "piątek" | "piatek" => DayKey::Friday,
            "sobota" => DayKey::Saturday,
            "niedziela" => DayKey::Sunday,
            _ => return None,
        };
        Some(key)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// DayHours / TimeSlot
// =============================================================================

/// Opening window of a single day, half-open `[open, close)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub open: ClockTime,
    pub close: ClockTime,
}

impl DayHours {
    pub fn new(open: ClockTime, close: ClockTime) -> Self {
        Self { open, close }
    }

    /// Whether a start time falls inside the window
    pub fn contains(&self, time: ClockTime) -> bool {
        self.open <= time && time < self.close
    }

    /// Bookable start times, one per `step_minutes`, each leaving a full
    /// step before closing.
    pub fn slots(&self, step_minutes: u32) -> Vec<TimeSlot> {
        if step_minutes == 0 {
            return Vec::new();
        }
        let close = self.close.minutes();
        let mut cursor = self.open.minutes();
        let mut slots = Vec::new();
        while let Some(next) = cursor.checked_add(step_minutes).filter(|end| *end <= close) {
            if let Some(time) = ClockTime::from_minutes(cursor) {
                slots.push(TimeSlot::at(time));
            }
            cursor = next;
        }
        slots
    }
}

/// A bookable start time as offered to a picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub value: String,
    pub label: String,
}

impl TimeSlot {
    pub fn at(time: ClockTime) -> Self {
        let text = time.to_string();
        Self {
            value: text.clone(),
            label: text,
        }
    }

    pub fn time(&self) -> Option<ClockTime> {
        self.value.parse().ok()
    }
}

/// What the schedule says about one calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayWindow {
    /// No hours are known for the restaurant at all
    Unknown,
    /// Hours are known and the date is closed (or not listed)
    Closed,
    Open(DayHours),
}

// =============================================================================
// OpeningHours
// =============================================================================

/// Weekly opening hours. A day mapped to `None` is closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpeningHours {
    days: BTreeMap<DayKey, Option<DayHours>>,
}

impl OpeningHours {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the serialized schedule.
    ///
    /// Malformed JSON or a non-object yields an empty schedule. Entries
    /// that are `null`, `{"closed": true}` or carry unreadable times are
    /// closed days. Unknown keys are ignored.
    pub fn parse(raw: &str) -> Self {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "Opening hours are not valid JSON, treating as unknown");
                return Self::default();
            }
        };
        let Value::Object(entries) = value else {
            tracing::debug!("Opening hours are not a JSON object, treating as unknown");
            return Self::default();
        };

        let mut days = BTreeMap::new();
        for (key, entry) in entries {
            let Some(day) = DayKey::from_day_name(&key) else {
                continue;
            };
            days.insert(day, Self::parse_entry(day, &entry));
        }
        Self { days }
    }

    /// Like [`OpeningHours::parse`] for an optional blob
    pub fn parse_opt(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }

    fn parse_entry(day: DayKey, entry: &Value) -> Option<DayHours> {
        let obj = entry.as_object()?;
        if obj.get("closed").and_then(Value::as_bool) == Some(true) {
            return None;
        }
        let time = |field: &str| obj.get(field)?.as_str()?.parse::<ClockTime>().ok();
        match (time("open"), time("close")) {
            (Some(open), Some(close)) => Some(DayHours::new(open, close)),
            _ => {
                tracing::warn!(day = %day, "Unreadable opening hours entry, treating day as closed");
                None
            }
        }
    }

    pub fn with_day(mut self, day: DayKey, hours: Option<DayHours>) -> Self {
        self.set_day(day, hours);
        self
    }

    pub fn set_day(&mut self, day: DayKey, hours: Option<DayHours>) {
        self.days.insert(day, hours);
    }

    /// Hours for a weekday, `None` if closed or not listed
    pub fn hours_on(&self, day: DayKey) -> Option<DayHours> {
        self.days.get(&day).copied().flatten()
    }

    /// True when at least one day is listed (open or closed)
    pub fn is_known(&self) -> bool {
        !self.days.is_empty()
    }

    pub fn window(&self, date: NaiveDate) -> DayWindow {
        if !self.is_known() {
            return DayWindow::Unknown;
        }
        match self.hours_on(DayKey::of_date(date)) {
            Some(hours) => DayWindow::Open(hours),
            None => DayWindow::Closed,
        }
    }

    /// Bookable slots for a calendar date
    pub fn slots_for(&self, date: NaiveDate, step_minutes: u32) -> Vec<TimeSlot> {
        self.slots_for_day(DayKey::of_date(date), step_minutes)
    }

    /// Bookable slots for a localized day name; unknown names get no slots
    pub fn slots_for_day_name(&self, day_name: &str, step_minutes: u32) -> Vec<TimeSlot> {
        match DayKey::from_day_name(day_name) {
            Some(day) => self.slots_for_day(day, step_minutes),
            None => Vec::new(),
        }
    }

    pub fn slots_for_day(&self, day: DayKey, step_minutes: u32) -> Vec<TimeSlot> {
        self.hours_on(day)
            .map(|hours| hours.slots(step_minutes))
            .unwrap_or_default()
    }

    /// Serializes all seven days, `null` for closed or unlisted ones
    pub fn to_json(&self) -> String {
        let mut map = Map::new();
        for day in DayKey::ALL {
            let entry = match self.hours_on(day) {
                Some(hours) => serde_json::json!({
                    "open": hours.open.to_string(),
                    "close": hours.close.to_string(),
                }),
                None => Value::Null,
            };
            map.insert(day.as_str().to_string(), entry);
        }
        Value::Object(map).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    // 2025-01-20 is a Monday
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()
    }

    #[test]
    fn test_clock_time_parse_and_display() {
        assert_eq!(t("00:00"), ClockTime::MIDNIGHT);
        assert_eq!(t("13:45").minutes(), 13 * 60 + 45);
        assert_eq!(t("09:05").to_string(), "09:05");
        for bad in ["9:05", "24:00", "12:60", "12-30", "ab:cd", "", "12:300"] {
            assert!(bad.parse::<ClockTime>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_clock_time_add_stops_at_midnight() {
        assert_eq!(t("13:45").checked_add_minutes(60), Some(t("14:45")));
        assert_eq!(t("23:30").checked_add_minutes(30), None);
        assert_eq!(t("23:30").checked_add_minutes(29), Some(t("23:59")));
    }

    #[test]
    fn test_slots_scenario_a() {
        let hours = OpeningHours::parse(r#"{"monday":{"open":"10:00","close":"14:00"}}"#);
        let slots: Vec<String> = hours
            .slots_for(monday(), DEFAULT_SLOT_STEP_MINUTES)
            .into_iter()
            .map(|s| s.value)
            .collect();
        assert_eq!(
            slots,
            ["10:00", "10:30", "11:00", "11:30", "12:00", "12:30", "13:00", "13:30"]
        );
    }

    #[test]
    fn test_slot_label_equals_value() {
        let hours = OpeningHours::new().with_day(DayKey::Monday, Some(DayHours::new(t("12:00"), t("13:00"))));
        for slot in hours.slots_for(monday(), 30) {
            assert_eq!(slot.value, slot.label);
            assert!(slot.time().is_some());
        }
    }

    #[test]
    fn test_closed_and_missing_days_have_no_slots() {
        let hours = OpeningHours::parse(
            r#"{"monday":null,"tuesday":{"closed":true},"wednesday":{"open":"10:00","close":"12:00"}}"#,
        );
        assert!(hours.slots_for(monday(), 30).is_empty());
        assert!(hours.slots_for_day(DayKey::Tuesday, 30).is_empty());
        assert!(hours.slots_for_day(DayKey::Friday, 30).is_empty());
        assert_eq!(hours.slots_for_day(DayKey::Wednesday, 30).len(), 4);
    }

    #[test]
    fn test_open_equals_close_yields_nothing() {
        let hours = OpeningHours::parse(r#"{"monday":{"open":"12:00","close":"12:00"}}"#);
        assert!(hours.is_known());
        assert!(hours.slots_for(monday(), 30).is_empty());
    }

    #[test]
    fn test_partial_final_step_is_dropped() {
        let hours = OpeningHours::new().with_day(DayKey::Monday, Some(DayHours::new(t("10:00"), t("10:45"))));
        let slots = hours.slots_for(monday(), 30);
        assert_eq!(slots, vec![TimeSlot::at(t("10:00"))]);
    }

    #[test]
    fn test_malformed_json_is_unknown() {
        for raw in ["", "not json", "[1,2]", "\"monday\"", "{"] {
            let hours = OpeningHours::parse(raw);
            assert!(!hours.is_known(), "{raw:?}");
            assert_eq!(hours.window(monday()), DayWindow::Unknown);
            assert!(hours.slots_for(monday(), 30).is_empty());
        }
    }

    #[test]
    fn test_unreadable_entry_is_closed() {
        let hours = OpeningHours::parse(r#"{"monday":{"open":"10am","close":"14:00"}}"#);
        assert!(hours.is_known());
        assert_eq!(hours.window(monday()), DayWindow::Closed);
    }

    #[test]
    fn test_localized_day_names() {
        assert_eq!(DayKey::from_day_name("poniedziałek"), Some(DayKey::Monday));
        assert_eq!(DayKey::from_day_name("Środa"), Some(DayKey::Wednesday));
        assert_eq!(DayKey::from_day_name("piatek"), Some(DayKey::Friday));
        assert_eq!(DayKey::from_day_name("Sunday"), Some(DayKey::Sunday));
        assert_eq!(DayKey::from_day_name("sat"), Some(DayKey::Saturday));
        assert_eq!(DayKey::from_day_name("lundi"), None);

        let hours = OpeningHours::parse(r#"{"monday":{"open":"10:00","close":"11:00"}}"#);
        assert_eq!(hours.slots_for_day_name("Poniedziałek", 30).len(), 2);
        assert!(hours.slots_for_day_name("montag", 30).is_empty());
    }

    #[test]
    fn test_to_json_writes_every_day() {
        let hours = OpeningHours::new().with_day(DayKey::Friday, Some(DayHours::new(t("17:00"), t("23:00"))));
        let value: Value = serde_json::from_str(&hours.to_json()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 7);
        assert_eq!(obj["monday"], Value::Null);
        assert_eq!(obj["friday"]["open"], "17:00");

        let reparsed = OpeningHours::parse(&hours.to_json());
        assert_eq!(reparsed.hours_on(DayKey::Friday), hours.hours_on(DayKey::Friday));
        assert_eq!(reparsed.window(monday()), DayWindow::Closed);
    }

    #[test]
    fn test_step_longer_than_window_yields_nothing() {
        let hours = DayHours::new(t("10:00"), t("14:00"));
        assert!(hours.slots(u32::MAX).is_empty());
        assert!(hours.slots(241).is_empty());
        assert_eq!(hours.slots(240).len(), 1);
    }

    #[test]
    fn test_zero_step_yields_nothing() {
        let hours = DayHours::new(t("10:00"), t("12:00"));
        assert!(hours.slots(0).is_empty());
    }

    proptest! {
        #[test]
        fn prop_slot_count_and_order(open in 0u32..1439, span in 1u32..1440, step in 1u32..180) {
            let close = (open + span).min(MINUTES_PER_DAY - 1);
            prop_assume!(open < close);
            let hours = DayHours::new(
                ClockTime::from_minutes(open).unwrap(),
                ClockTime::from_minutes(close).unwrap(),
            );
            let slots = hours.slots(step);
            prop_assert_eq!(slots.len() as u32, (close - open) / step);

            let times: Vec<ClockTime> = slots.iter().map(|s| s.time().unwrap()).collect();
            prop_assert!(times.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(times.iter().all(|t| *t < hours.close && *t >= hours.open));
        }
    }
}
