//! Slot parsing -- the single timezone-conversion primitive every stage uses.
//!
//! A slot travels through the pipeline as the exact string the provider
//! returned. Stages parse it to a UTC instant plus a tenant-local view, make
//! their decision, and hand back the original string.

use crate::error::{Result, SlotError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use tracing::trace;

/// Tenant timezone used when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::London;

/// Layouts carrying an offset, tried after RFC 3339. `%#z` also takes an
/// hour-only offset such as `+01`.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
];

/// Offset-less layouts, interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A slot string resolved to its instant and its tenant-local wall time.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSlot<'a> {
    pub instant: DateTime<Utc>,
    pub local: DateTime<Tz>,
    pub raw: &'a str,
}

/// Parse an IANA timezone identifier (e.g. "Europe/London").
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| SlotError::InvalidTimezone(name.to_string()))
}

/// Parse an ISO 8601 timestamp into a UTC instant.
///
/// Accepts RFC 3339 (`Z` or `+01:00`), compact (`+0100`) and hour-only
/// (`+01`) offsets, offset forms without seconds (`09:00Z`), and offset-less
/// forms, which are taken to be UTC. A bare date resolves to midnight UTC.
/// Returns `None` for anything else.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let zulu;
    let with_offset = match s.strip_suffix(['Z', 'z']) {
        Some(stripped) => {
            zulu = format!("{stripped}+00:00");
            zulu.as_str()
        }
        None => s,
    };
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(with_offset, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc())
}

/// Parse a slot and convert it to `tz`.
pub fn parse_slot(raw: &str, tz: Tz) -> Option<ParsedSlot<'_>> {
    let instant = parse_instant(raw)?;
    Some(ParsedSlot {
        instant,
        local: instant.with_timezone(&tz),
        raw,
    })
}

/// Parse every slot, dropping malformed entries, and sort by instant.
///
/// The sort is stable: slots sharing an instant keep their input order.
pub fn parse_sorted<S: AsRef<str>>(slots: &[S], tz: Tz) -> Vec<ParsedSlot<'_>> {
    let mut parsed: Vec<ParsedSlot<'_>> = slots
        .iter()
        .filter_map(|s| {
            let raw = s.as_ref();
            let slot = parse_slot(raw, tz);
            if slot.is_none() {
                trace!(slot = raw, "dropping unparseable slot");
            }
            slot
        })
        .collect();
    parsed.sort_by_key(|p| p.instant);
    parsed
}

/// Collect the original strings of parsed slots.
pub(crate) fn raw_strings(parsed: &[ParsedSlot<'_>]) -> Vec<String> {
    parsed.iter().map(|p| p.raw.to_string()).collect()
}
