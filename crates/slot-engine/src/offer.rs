//! End-to-end offer construction: windows → signals → pair → display.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::info;

use crate::availability::{filter_by_availability, AvailabilitySchedule};
use crate::display::format_slots;
use crate::selector::pick_slot_pair;
use crate::signal::{filter_by_signals_at, DaySignal, TimeOfDay};

/// The prospect's stated preference, already reduced to signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OfferSignals {
    pub day: Option<DaySignal>,
    pub time_of_day: Option<TimeOfDay>,
}

/// Slots chosen for the prospect and their display strings, index-aligned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlotOffer {
    pub slots: Vec<String>,
    pub display: Vec<String>,
}

impl SlotOffer {
    /// `true` means "no slots available", not a failure.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Build an offer using the current time for `today`/`tomorrow`.
pub fn build_offer<S: AsRef<str>>(
    slots: &[S],
    tz: Tz,
    schedule: Option<&AvailabilitySchedule>,
    signals: &OfferSignals,
) -> SlotOffer {
    build_offer_at(slots, tz, schedule, signals, Utc::now())
}

/// Build an offer relative to `now`.
///
/// The schedule-filtered list serves as the contrast pool; the
/// signal-filtered subset of it is the preference list that supplies slot A.
/// An empty preference list yields an empty offer.
pub fn build_offer_at<S: AsRef<str>>(
    slots: &[S],
    tz: Tz,
    schedule: Option<&AvailabilitySchedule>,
    signals: &OfferSignals,
    now: DateTime<Utc>,
) -> SlotOffer {
    let available = filter_by_availability(slots, schedule, tz);
    let preferred = filter_by_signals_at(&available, signals.day, signals.time_of_day, tz, now);
    let chosen = pick_slot_pair(&preferred, tz, Some(available.as_slice()));
    let display = format_slots(&chosen, tz);

    info!(
        candidates = slots.len(),
        available = available.len(),
        preferred = preferred.len(),
        offered = chosen.len(),
        "built slot offer"
    );
    SlotOffer {
        slots: chosen,
        display,
    }
}
