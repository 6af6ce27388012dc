//! Provider payload normalisation and deduplication.
//!
//! Calendar providers return free slots grouped by day, alongside a trace id:
//!
//! ```json
//! {
//!   "2026-01-30": {"slots": ["2026-01-30T09:00:00Z", "2026-01-30T14:00:00Z"]},
//!   "2026-01-31": {"slots": ["2026-01-31T10:00:00Z"]},
//!   "traceId": "abc-123"
//! }
//! ```
//!
//! This module flattens the buckets into one list, deduplicated by exact
//! string and kept in first-seen order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Reserved top-level key carrying the provider's trace id.
pub const TRACE_ID_KEY: &str = "traceId";

/// Trace id reported when slots come from a [`StubSlots`] override.
pub const STUB_TRACE_ID: &str = "stub-trace-id";

/// A flat, deduplicated slot list plus the provider's trace id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlots {
    pub slots: Vec<String>,
    pub trace_id: Option<String>,
}

/// Remove duplicate slot strings, keeping the first occurrence of each.
///
/// Equality is textual: two spellings of the same instant are both kept.
pub fn dedup_slots<I, S>(slots: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for slot in slots {
        let slot = slot.into();
        if seen.insert(slot.clone()) {
            out.push(slot);
        }
    }
    out
}

/// Flatten a provider free-slots payload into [`FreeSlots`].
///
/// Buckets are visited in document order. A bucket that is not an object, or
/// whose `slots` field is not an array, is skipped; non-string entries inside
/// `slots` are ignored. A payload that is not an object yields no slots.
pub fn normalize_free_slots(payload: &Value) -> FreeSlots {
    let Some(buckets) = payload.as_object() else {
        warn!("provider payload is not an object; no slots extracted");
        return FreeSlots::default();
    };

    let trace_id = buckets
        .get(TRACE_ID_KEY)
        .and_then(Value::as_str)
        .map(str::to_string);

    let flattened = buckets
        .iter()
        .filter(|(key, _)| key.as_str() != TRACE_ID_KEY)
        .filter_map(|(_, bucket)| bucket.as_object()?.get("slots")?.as_array())
        .flatten()
        .filter_map(Value::as_str);

    let slots = dedup_slots(flattened);
    debug!(count = slots.len(), trace_id = ?trace_id, "normalized provider slots");
    FreeSlots { slots, trace_id }
}

/// Operator-supplied slot list that replaces the provider fetch.
///
/// Injected into the fetch collaborator at construction so deterministic runs
/// never touch the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubSlots(Vec<String>);

impl StubSlots {
    pub fn new(slots: Vec<String>) -> Self {
        Self(slots)
    }

    /// Parse a JSON array of ISO strings, e.g.
    /// `["2026-01-30T09:00:00Z","2026-01-30T14:00:00Z"]`.
    ///
    /// Returns `None` for blank input, invalid JSON, or anything other than an
    /// array of strings. An empty array is a valid (empty) override.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(slots) => Some(Self(slots)),
            Err(e) => {
                warn!(error = %e, "ignoring malformed stub slot override");
                None
            }
        }
    }

    pub fn slots(&self) -> &[String] {
        &self.0
    }

    /// The override as a provider result, verbatim, with [`STUB_TRACE_ID`].
    pub fn to_free_slots(&self) -> FreeSlots {
        FreeSlots {
            slots: self.0.clone(),
            trace_id: Some(STUB_TRACE_ID.to_string()),
        }
    }
}
