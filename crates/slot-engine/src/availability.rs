//! Tenant weekly availability windows.
//!
//! A schedule maps a three-letter weekday key (`mon` .. `sun`) to the local
//! time ranges during which slots may be offered:
//!
//! ```json
//! {
//!   "mon": [{"start": "09:00", "end": "17:00"}],
//!   "tue": [{"start": "09:00", "end": "12:00"}, {"start": "14:00", "end": "17:00"}]
//! }
//! ```
//!
//! An empty schedule means "no restriction configured". A weekday missing from
//! a non-empty schedule means "not available that day".

use std::collections::BTreeMap;

use chrono::{Datelike, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::slot::{parse_sorted, raw_strings};

/// A half-open local time range `[start, end)` in zero-padded `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRange {
    #[serde(default = "default_start")]
    pub start: String,
    #[serde(default = "default_end")]
    pub end: String,
}

fn default_start() -> String {
    "00:00".to_string()
}

fn default_end() -> String {
    "23:59".to_string()
}

impl WindowRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Whether a local `HH:MM` string falls inside this range.
    ///
    /// Comparison is lexical on the `HH:MM` text, which orders correctly for
    /// zero-padded values.
    pub fn contains(&self, hhmm: &str) -> bool {
        self.start.as_str() <= hhmm && hhmm < self.end.as_str()
    }
}

/// Weekly availability keyed by lowercase three-letter weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilitySchedule {
    days: BTreeMap<String, Vec<WindowRange>>,
}

impl AvailabilitySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of the windows for one weekday.
    pub fn with_day(mut self, weekday: Weekday, windows: Vec<WindowRange>) -> Self {
        self.days.insert(day_key(weekday).to_string(), windows);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Windows configured for `weekday`; empty when the day is absent.
    pub fn windows_for(&self, weekday: Weekday) -> &[WindowRange] {
        self.days
            .get(day_key(weekday))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Schedule key for a weekday.
pub fn day_key(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

/// Keep slots that start inside one of the tenant's weekly windows.
///
/// With no schedule (or an empty one) the input is returned unchanged, in
/// its original order and including entries that would not parse. Otherwise
/// each slot is converted to `tz`; its local weekday selects the windows and
/// its local `HH:MM` must fall in at least one of them. The result is sorted
/// by instant and unparseable slots are dropped.
pub fn filter_by_availability<S: AsRef<str>>(
    slots: &[S],
    schedule: Option<&AvailabilitySchedule>,
    tz: Tz,
) -> Vec<String> {
    let schedule = match schedule {
        Some(s) if !s.is_empty() => s,
        _ => return slots.iter().map(|s| s.as_ref().to_string()).collect(),
    };

    let kept: Vec<_> = parse_sorted(slots, tz)
        .into_iter()
        .filter(|slot| {
            let windows = schedule.windows_for(slot.local.weekday());
            if windows.is_empty() {
                return false;
            }
            let hhmm = slot.local.format("%H:%M").to_string();
            windows.iter().any(|w| w.contains(&hhmm))
        })
        .collect();

    debug!(
        input = slots.len(),
        kept = kept.len(),
        "availability filter applied"
    );
    raw_strings(&kept)
}
