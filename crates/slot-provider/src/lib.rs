//! # slot-provider
//!
//! The I/O-side collaborators around `slot-engine`: fetching candidate slots
//! from a calendar provider and handing a chosen slot to a booker.
//!
//! ## Modules
//!
//! - [`source`] — `SlotSource` trait, `SlotQuery`, in-memory `StaticSource`
//! - [`leadconnector`] — HTTP client for the LeadConnector free-slots API
//! - [`booking`] — `SlotBooker` trait and `StubBooker`
//! - [`error`] — Error types

pub mod booking;
pub mod error;
pub mod leadconnector;
pub mod source;

pub use booking::{BookingConfirmation, BookingRequest, SlotBooker, StubBooker};
pub use error::ProviderError;
pub use leadconnector::{LeadConnectorSource, ProviderConfig};
pub use source::{SlotQuery, SlotSource, StaticSource};

use chrono::{DateTime, Utc};
use serde::Serialize;
use slot_engine::{build_offer_at, AvailabilitySchedule, OfferSignals, SlotOffer};

/// An offer together with the provider trace id it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchedOffer {
    #[serde(flatten)]
    pub offer: SlotOffer,
    pub trace_id: Option<String>,
}

/// Fetch slots for `query` and build an offer from them in the query's
/// timezone.
///
/// Fetch errors propagate untouched; an empty slot list is an empty offer.
pub async fn fetch_offer(
    source: &dyn SlotSource,
    query: &SlotQuery,
    schedule: Option<&AvailabilitySchedule>,
    signals: &OfferSignals,
    now: DateTime<Utc>,
) -> error::Result<FetchedOffer> {
    let free = source.free_slots(query).await?;
    let offer = build_offer_at(&free.slots, query.timezone, schedule, signals, now);
    Ok(FetchedOffer {
        offer,
        trace_id: free.trace_id,
    })
}
