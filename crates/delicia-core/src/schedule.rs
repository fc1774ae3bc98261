//! # Pickup Schedule
//!
//! Store hours, the pickup slot table and wall-clock times.
//!
//! ## Default Window
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Sunday                                                                 │
//! │                                                                         │
//! │  08:00  08:10  08:20  08:30  08:40  08:50                               │
//! │  09:00  09:10  09:20  09:30  09:40  09:50     (10 pickups per slot)     │
//! │                                                                         │
//! │  Store is "open" while 08:00 <= now < 10:00 on Sunday.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Booking counts come from outside this crate (simulated in the mock
//! crate); the window only lays out the slots and answers "is it open".

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};

// =============================================================================
// Clock Time
// =============================================================================

/// A wall-clock time with minute precision, written `HH:MM`.
///
/// Serialized as the `HH:MM` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime { hour: 0, minute: 0 };

    /// Builds a time, returning `None` outside 00:00..=23:59.
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(ClockTime { hour, minute })
        } else {
            None
        }
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes since midnight.
    pub const fn minutes_of_day(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    const fn from_minutes_of_day(minutes: u32) -> Option<Self> {
        if minutes >= 24 * 60 {
            return None;
        }
        Some(ClockTime {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        })
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        // hour/minute are range-checked on construction
        NaiveTime::from_hms_opt(self.hour as u32, self.minute as u32, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = ValidationError;

    /// Parses `HH:MM` (a single-digit hour is accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "time".to_string(),
            reason: reason.to_string(),
        };

        let (h, m) = s.trim().split_once(':').ok_or_else(|| invalid("expected HH:MM"))?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(invalid("expected HH:MM"));
        }

        let hour: u8 = h.parse().map_err(|_| invalid("hour is not a number"))?;
        let minute: u8 = m.parse().map_err(|_| invalid("minute is not a number"))?;

        ClockTime::new(hour, minute).ok_or_else(|| invalid("must be between 00:00 and 23:59"))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self {
        ClockTime {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }
}

// =============================================================================
// Time Slot
// =============================================================================

/// One pickup slot as shown on the scheduling screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimeSlot {
    #[ts(as = "String")]
    pub time: ClockTime,
    pub available: bool,
    pub capacity: u32,
    pub booked: u32,
}

impl TimeSlot {
    /// A slot can take another pickup while it is open and not full.
    pub fn is_bookable(&self) -> bool {
        self.available && self.booked < self.capacity
    }

    pub fn remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.booked)
    }
}

/// Finds the slot starting at `time`.
pub fn find_slot(slots: &[TimeSlot], time: ClockTime) -> Option<&TimeSlot> {
    slots.iter().find(|s| s.time == time)
}

/// Checks that `time` is a bookable slot in `slots`.
pub fn ensure_bookable(slots: &[TimeSlot], time: ClockTime) -> CoreResult<()> {
    match find_slot(slots, time) {
        Some(slot) if slot.is_bookable() => Ok(()),
        _ => Err(CoreError::SlotUnavailable(time.to_string())),
    }
}

// =============================================================================
// Pickup Window
// =============================================================================

/// The weekly opening window in which orders are picked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupWindow {
    /// Day of the week the store opens.
    pub weekday: Weekday,
    /// First hour of service (inclusive).
    pub open_hour: u8,
    /// Hour service ends (exclusive).
    pub close_hour: u8,
    /// Minutes between slot starts.
    pub slot_minutes: u8,
    /// Pickups each slot can take.
    pub slot_capacity: u32,
}

impl Default for PickupWindow {
    fn default() -> Self {
        PickupWindow {
            weekday: Weekday::Sun,
            open_hour: 8,
            close_hour: 10,
            slot_minutes: 10,
            slot_capacity: 10,
        }
    }
}

impl PickupWindow {
    /// Checks the window is usable.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.open_hour >= self.close_hour || self.close_hour > 24 {
            return Err(ValidationError::InvalidFormat {
                field: "pickup window".to_string(),
                reason: format!(
                    "open hour {} must be before close hour {}",
                    self.open_hour, self.close_hour
                ),
            });
        }

        if self.slot_minutes == 0 || self.slot_minutes > 60 {
            return Err(ValidationError::OutOfRange {
                field: "slot minutes".to_string(),
                min: 1,
                max: 60,
            });
        }

        if self.slot_capacity == 0 {
            return Err(ValidationError::MustBePositive {
                field: "slot capacity".to_string(),
            });
        }

        Ok(())
    }

    /// Start times of every slot, in order.
    pub fn slot_times(&self) -> Vec<ClockTime> {
        let start = self.open_hour as u32 * 60;
        let end = self.close_hour as u32 * 60;
        let step = self.slot_minutes.max(1) as usize;

        (start..end)
            .step_by(step)
            .filter_map(ClockTime::from_minutes_of_day)
            .collect()
    }

    /// Builds the slot table, taking booked counts from `bookings`.
    ///
    /// Times missing from `bookings` count as empty.
    pub fn slots(&self, bookings: &BTreeMap<ClockTime, u32>) -> Vec<TimeSlot> {
        self.slot_times()
            .into_iter()
            .map(|time| TimeSlot {
                time,
                available: true,
                capacity: self.slot_capacity,
                booked: bookings.get(&time).copied().unwrap_or(0),
            })
            .collect()
    }

    /// True when `time` is the start of a slot in this window.
    pub fn contains(&self, time: ClockTime) -> bool {
        let minutes = time.minutes_of_day();
        let start = self.open_hour as u32 * 60;
        let end = self.close_hour as u32 * 60;
        minutes >= start && minutes < end && (minutes - start) % self.slot_minutes.max(1) as u32 == 0
    }

    /// Whether the store is open at local time `now`.
    pub fn is_open_at(&self, now: NaiveDateTime) -> bool {
        let hour = now.hour();
        now.weekday() == self.weekday
            && hour >= self.open_hour as u32
            && hour < self.close_hour as u32
    }

    /// The next moment the store opens, strictly after `now` unless it is
    /// open right now, in which case the current opening is returned.
    pub fn next_opening(&self, now: NaiveDateTime) -> NaiveDateTime {
        let open_time = NaiveTime::from_hms_opt(self.open_hour as u32, 0, 0).unwrap_or(NaiveTime::MIN);

        if self.is_open_at(now) {
            return now.date().and_time(open_time);
        }

        let mut date = now.date();
        for _ in 0..8 {
            let candidate = date.and_time(open_time);
            if date.weekday() == self.weekday && candidate > now {
                return candidate;
            }
            date += Duration::days(1);
        }

        // unreachable for a well-formed weekday, fall back to a week out
        now + Duration::weeks(1)
    }

    /// Short label like `Sun 08:00-10:00`.
    pub fn hours_label(&self) -> String {
        format!(
            "{} {:02}:00-{:02}:00",
            self.weekday, self.open_hour, self.close_hour
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_clock_time_parse_and_display() {
        assert_eq!(t("08:10").to_string(), "08:10");
        assert_eq!(t("9:50").to_string(), "09:50");
        assert!("24:00".parse::<ClockTime>().is_err());
        assert!("08:60".parse::<ClockTime>().is_err());
        assert!("0810".parse::<ClockTime>().is_err());
        assert!("08:1".parse::<ClockTime>().is_err());
        assert!("ab:cd".parse::<ClockTime>().is_err());
    }

    #[test]
    fn test_clock_time_orders_by_time_of_day() {
        assert!(t("08:50") < t("09:00"));
        assert!(t("09:00") < t("18:00"));
    }

    #[test]
    fn test_clock_time_serializes_as_string() {
        let json = serde_json::to_string(&t("08:30")).unwrap();
        assert_eq!(json, "\"08:30\"");

        let back: ClockTime = serde_json::from_str("\"09:40\"").unwrap();
        assert_eq!(back, t("09:40"));
        assert!(serde_json::from_str::<ClockTime>("\"25:00\"").is_err());
    }

    #[test]
    fn test_default_window_has_twelve_slots() {
        let window = PickupWindow::default();
        let times = window.slot_times();

        assert_eq!(times.len(), 12);
        assert_eq!(times.first().copied(), Some(t("08:00")));
        assert_eq!(times.last().copied(), Some(t("09:50")));
    }

    #[test]
    fn test_slots_use_bookings() {
        let window = PickupWindow::default();
        let mut bookings = BTreeMap::new();
        bookings.insert(t("08:10"), 10);
        bookings.insert(t("08:20"), 3);

        let slots = window.slots(&bookings);
        assert_eq!(slots.len(), 12);

        let full = find_slot(&slots, t("08:10")).unwrap();
        assert!(!full.is_bookable());
        assert_eq!(full.remaining(), 0);

        let partial = find_slot(&slots, t("08:20")).unwrap();
        assert!(partial.is_bookable());
        assert_eq!(partial.remaining(), 7);

        assert_eq!(find_slot(&slots, t("08:00")).unwrap().booked, 0);
    }

    #[test]
    fn test_ensure_bookable() {
        let window = PickupWindow::default();
        let mut bookings = BTreeMap::new();
        bookings.insert(t("09:00"), 10);
        let slots = window.slots(&bookings);

        assert!(ensure_bookable(&slots, t("08:30")).is_ok());
        assert!(matches!(
            ensure_bookable(&slots, t("09:00")),
            Err(CoreError::SlotUnavailable(_))
        ));
        assert!(ensure_bookable(&slots, t("11:00")).is_err());
        assert!(ensure_bookable(&slots, t("08:05")).is_err());
    }

    #[test]
    fn test_unavailable_slot_is_not_bookable() {
        let slot = TimeSlot {
            time: t("08:00"),
            available: false,
            capacity: 10,
            booked: 0,
        };
        assert!(!slot.is_bookable());
    }

    #[test]
    fn test_contains() {
        let window = PickupWindow::default();
        assert!(window.contains(t("08:00")));
        assert!(window.contains(t("09:50")));
        assert!(!window.contains(t("08:05")));
        assert!(!window.contains(t("10:00")));
        assert!(!window.contains(t("07:50")));
    }

    #[test]
    fn test_is_open_at() {
        let window = PickupWindow::default();
        // 2024-06-09 is a Sunday
        assert!(window.is_open_at(at(2024, 6, 9, 8, 0)));
        assert!(window.is_open_at(at(2024, 6, 9, 9, 59)));
        assert!(!window.is_open_at(at(2024, 6, 9, 7, 59)));
        assert!(!window.is_open_at(at(2024, 6, 9, 10, 0)));
        // Monday, same hours
        assert!(!window.is_open_at(at(2024, 6, 10, 8, 30)));
    }

    #[test]
    fn test_next_opening() {
        let window = PickupWindow::default();

        // Wednesday → following Sunday 08:00
        assert_eq!(
            window.next_opening(at(2024, 6, 12, 14, 0)),
            at(2024, 6, 16, 8, 0)
        );
        // Sunday before opening → same day
        assert_eq!(
            window.next_opening(at(2024, 6, 9, 6, 0)),
            at(2024, 6, 9, 8, 0)
        );
        // Sunday after closing → next week
        assert_eq!(
            window.next_opening(at(2024, 6, 9, 11, 0)),
            at(2024, 6, 16, 8, 0)
        );
        // open now → current opening
        assert_eq!(
            window.next_opening(at(2024, 6, 9, 9, 15)),
            at(2024, 6, 9, 8, 0)
        );
    }

    #[test]
    fn test_window_validation() {
        assert!(PickupWindow::default().validate().is_ok());

        let backwards = PickupWindow {
            open_hour: 10,
            close_hour: 8,
            ..PickupWindow::default()
        };
        assert!(backwards.validate().is_err());

        let no_capacity = PickupWindow {
            slot_capacity: 0,
            ..PickupWindow::default()
        };
        assert!(no_capacity.validate().is_err());
    }

    #[test]
    fn test_hours_label() {
        assert_eq!(PickupWindow::default().hours_label(), "Sun 08:00-10:00");
    }
}
