//! The fetch seam: anything that can produce free slots for a query.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde_json::Value;
use slot_engine::{normalize_free_slots, FreeSlots, DEFAULT_TIMEZONE};

use crate::error::Result;

/// A free-slot search window.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Timezone the provider should bucket days in.
    pub timezone: Tz,
    /// Restrict to one team member's calendar.
    pub user_id: Option<String>,
}

impl SlotQuery {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            timezone: DEFAULT_TIMEZONE,
            user_id: None,
        }
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// A source of candidate slots.
///
/// Implementations return a flat, deduplicated list in provider order; the
/// engine does the filtering.
#[async_trait]
pub trait SlotSource: Send + Sync {
    async fn free_slots(&self, query: &SlotQuery) -> Result<FreeSlots>;
}

/// Serves a fixed provider payload, normalised on every call.
///
/// Useful offline and in tests that want to exercise the payload shape
/// without HTTP.
#[derive(Debug, Clone)]
pub struct StaticSource {
    payload: Value,
}

impl StaticSource {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }
}

#[async_trait]
impl SlotSource for StaticSource {
    async fn free_slots(&self, _query: &SlotQuery) -> Result<FreeSlots> {
        Ok(normalize_free_slots(&self.payload))
    }
}
