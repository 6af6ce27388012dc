//! Natural-language day and time-of-day signals.
//!
//! A prospect's reply is reduced upstream to at most one day token
//! ("monday", "tomorrow", ...) and one time-of-day bucket ("morning",
//! "afternoon", "evening"). Both are closed enums here so an unknown token is
//! rejected when parsed instead of silently matching everything.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use tracing::debug;

use crate::error::SlotError;
use crate::slot::{parse_sorted, raw_strings};

/// A requested day, evaluated against the slot's tenant-local date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DaySignal {
    Weekday(Weekday),
    Today,
    Tomorrow,
}

impl FromStr for DaySignal {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let signal = match s.trim().to_ascii_lowercase().as_str() {
            "monday" => Self::Weekday(Weekday::Mon),
            "tuesday" => Self::Weekday(Weekday::Tue),
            "wednesday" => Self::Weekday(Weekday::Wed),
            "thursday" => Self::Weekday(Weekday::Thu),
            "friday" => Self::Weekday(Weekday::Fri),
            "saturday" => Self::Weekday(Weekday::Sat),
            "sunday" => Self::Weekday(Weekday::Sun),
            "today" => Self::Today,
            "tomorrow" => Self::Tomorrow,
            _ => return Err(SlotError::InvalidDaySignal(s.to_string())),
        };
        Ok(signal)
    }
}

impl fmt::Display for DaySignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Weekday(Weekday::Mon) => "monday",
            Self::Weekday(Weekday::Tue) => "tuesday",
            Self::Weekday(Weekday::Wed) => "wednesday",
            Self::Weekday(Weekday::Thu) => "thursday",
            Self::Weekday(Weekday::Fri) => "friday",
            Self::Weekday(Weekday::Sat) => "saturday",
            Self::Weekday(Weekday::Sun) => "sunday",
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
        };
        f.write_str(name)
    }
}

/// Time-of-day bucket over tenant-local hours.
///
/// Used both as a filter signal and as the category the pair selector
/// contrasts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeOfDay {
    /// Local hours `[0, 12)`.
    Morning,
    /// Local hours `[12, 17)`.
    Afternoon,
    /// Local hours `[17, 24)`.
    Evening,
}

impl TimeOfDay {
    /// Half-open range of local hours covered by this bucket.
    pub fn hours(self) -> Range<u32> {
        match self {
            Self::Morning => 0..12,
            Self::Afternoon => 12..17,
            Self::Evening => 17..24,
        }
    }

    /// Classify a local hour (0-23).
    pub fn of_hour(hour: u32) -> Self {
        if hour < 12 {
            Self::Morning
        } else if hour < 17 {
            Self::Afternoon
        } else {
            Self::Evening
        }
    }

    /// The bucket to offer alongside a slot in this bucket.
    ///
    /// Morning and afternoon contrast with each other. Evening contrasts with
    /// morning, never afternoon.
    pub fn contrast(self) -> Self {
        match self {
            Self::Morning => Self::Afternoon,
            Self::Afternoon => Self::Morning,
            Self::Evening => Self::Morning,
        }
    }

    /// Lowercase token, as accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            _ => Err(SlotError::InvalidTimeOfDay(s.to_string())),
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter slots by day and time-of-day signals, using the current time.
///
/// See [`filter_by_signals_at`].
pub fn filter_by_signals<S: AsRef<str>>(
    slots: &[S],
    day: Option<DaySignal>,
    time_of_day: Option<TimeOfDay>,
    tz: Tz,
) -> Vec<String> {
    filter_by_signals_at(slots, day, time_of_day, tz, Utc::now())
}

/// Filter slots by day and time-of-day signals relative to `now`.
///
/// Each slot is converted to `tz` before comparison. `Today` and `Tomorrow`
/// match the local calendar date of `now` (plus one day for `Tomorrow`); a
/// weekday matches the local weekday. The time-of-day filter requires the
/// local hour to fall in the bucket's half-open range. Both signals must
/// match when present; `None` disables that filter.
///
/// Returns the original slot strings sorted by instant. Unparseable slots are
/// dropped.
pub fn filter_by_signals_at<S: AsRef<str>>(
    slots: &[S],
    day: Option<DaySignal>,
    time_of_day: Option<TimeOfDay>,
    tz: Tz,
    now: DateTime<Utc>,
) -> Vec<String> {
    let today = now.with_timezone(&tz).date_naive();
    let tomorrow = today.succ_opt();

    let kept: Vec<_> = parse_sorted(slots, tz)
        .into_iter()
        .filter(|slot| {
            let local_date = slot.local.date_naive();
            let day_ok = match day {
                None => true,
                Some(DaySignal::Today) => local_date == today,
                Some(DaySignal::Tomorrow) => Some(local_date) == tomorrow,
                Some(DaySignal::Weekday(weekday)) => slot.local.weekday() == weekday,
            };
            let window_ok = time_of_day
                .map(|bucket| bucket.hours().contains(&slot.local.hour()))
                .unwrap_or(true);
            day_ok && window_ok
        })
        .collect();

    debug!(
        input = slots.len(),
        kept = kept.len(),
        day = ?day,
        time_of_day = ?time_of_day,
        "signal filter applied"
    );
    raw_strings(&kept)
}
