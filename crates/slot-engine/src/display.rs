//! Render slots as tenant-local "Weekday HH:MM" strings.

use chrono_tz::Tz;

use crate::slot::parse_slot;

/// Format each slot as e.g. `"Friday 09:00"` in `tz`.
///
/// Weekday names are English regardless of locale and the clock is 24-hour.
/// Output follows input order; unparseable slots are dropped.
pub fn format_slots<S: AsRef<str>>(slots: &[S], tz: Tz) -> Vec<String> {
    slots
        .iter()
        .filter_map(|s| parse_slot(s.as_ref(), tz))
        .map(|slot| slot.local.format("%A %H:%M").to_string())
        .collect()
}
