//! Pick a "best match + contrasting alternative" pair of slots.
//!
//! Offering two options at different times of day (a morning and an
//! afternoon, say) reads as broader availability than two adjacent slots.

use chrono::Timelike;
use chrono_tz::Tz;
use tracing::debug;

use crate::signal::TimeOfDay;
use crate::slot::{parse_sorted, ParsedSlot};

/// Select up to two slots to offer.
///
/// - **A** is the earliest parseable slot in `slots`. Callers encode the
///   prospect's preference by filtering `slots` upstream.
/// - **B** is the earliest slot in `contrast_pool` (or `slots` when no pool,
///   or an empty pool, is given) whose local time-of-day is A's contrast
///   bucket: morning ↔ afternoon, evening → morning. A is left out of the
///   pool by exact string match.
/// - With no contrasting slot, B falls back to the second-earliest slot of
///   `slots`.
///
/// Returns `[A, B]` sorted by instant, `[A]` when no B exists, or an empty
/// vector when nothing in `slots` parses.
pub fn pick_slot_pair<S: AsRef<str>>(
    slots: &[S],
    tz: Tz,
    contrast_pool: Option<&[S]>,
) -> Vec<String> {
    if slots.is_empty() {
        return Vec::new();
    }

    let preferred = parse_sorted(slots, tz);
    let Some(a) = preferred.first() else {
        return Vec::new();
    };

    let a_bucket = TimeOfDay::of_hour(a.local.hour());
    let target = a_bucket.contrast();

    let pool_source = match contrast_pool {
        Some(pool) if !pool.is_empty() => pool,
        _ => slots,
    };
    let pool: Vec<ParsedSlot<'_>> = parse_sorted(pool_source, tz)
        .into_iter()
        .filter(|p| p.raw != a.raw)
        .collect();

    let contrasting = pool
        .iter()
        .find(|p| TimeOfDay::of_hour(p.local.hour()) == target);

    let b = match contrasting {
        Some(b) => Some(b),
        None => preferred.get(1),
    };

    debug!(
        a = a.raw,
        a_bucket = %a_bucket,
        target = %target,
        b = ?b.map(|p| p.raw),
        contrasted = contrasting.is_some(),
        "slot pair selected"
    );

    match b {
        Some(b) if b.instant < a.instant => vec![b.raw.to_string(), a.raw.to_string()],
        Some(b) => vec![a.raw.to_string(), b.raw.to_string()],
        None => vec![a.raw.to_string()],
    }
}
