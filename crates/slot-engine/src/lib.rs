//! # slot-engine
//!
//! Timezone-aware slot negotiation for meeting booking.
//!
//! Given the free slots a calendar provider returned, the engine narrows them
//! to what the prospect asked for and what the tenant allows, then picks two
//! options at contrasting times of day. Every stage is a pure function over
//! slot strings; the original provider string is what comes out the other end.
//!
//! ## Quick start
//!
//! ```rust
//! use slot_engine::{filter_by_signals, format_slots, pick_slot_pair, TimeOfDay, DEFAULT_TIMEZONE};
//!
//! let slots = ["2026-01-30T08:00:00Z", "2026-01-30T15:00:00Z", "2026-01-31T09:00:00Z"];
//!
//! let morning = filter_by_signals(&slots, None, Some(TimeOfDay::Morning), DEFAULT_TIMEZONE);
//! assert_eq!(morning, ["2026-01-30T08:00:00Z", "2026-01-31T09:00:00Z"]);
//!
//! let pair = pick_slot_pair(&slots, DEFAULT_TIMEZONE, None);
//! assert_eq!(pair, ["2026-01-30T08:00:00Z", "2026-01-30T15:00:00Z"]);
//! assert_eq!(format_slots(&pair, DEFAULT_TIMEZONE), ["Friday 08:00", "Friday 15:00"]);
//! ```
//!
//! ## Modules
//!
//! - [`normalize`] — provider payload → flat deduplicated list; stub override
//! - [`signal`] — day / time-of-day signals and their filter
//! - [`availability`] — tenant weekly windows and their filter
//! - [`selector`] — best + contrasting slot pair
//! - [`display`] — "Friday 09:00" rendering
//! - [`offer`] — the stages composed end to end
//! - [`slot`] — shared parse + timezone conversion
//! - [`config`] — tenant configuration
//! - [`error`] — Error types

pub mod availability;
pub mod config;
pub mod display;
pub mod error;
pub mod normalize;
pub mod offer;
pub mod selector;
pub mod signal;
pub mod slot;

pub use availability::{filter_by_availability, AvailabilitySchedule, WindowRange};
pub use config::TenantConfig;
pub use display::format_slots;
pub use error::SlotError;
pub use normalize::{dedup_slots, normalize_free_slots, FreeSlots, StubSlots, STUB_TRACE_ID};
pub use offer::{build_offer, build_offer_at, OfferSignals, SlotOffer};
pub use selector::pick_slot_pair;
pub use signal::{filter_by_signals, filter_by_signals_at, DaySignal, TimeOfDay};
pub use slot::{parse_timezone, DEFAULT_TIMEZONE};
