//! The booking seam.
//!
//! The chosen slot is handed over as the exact string the provider returned.
//! Whether the booking really landed is the booker's concern, not the
//! engine's.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub tenant_id: String,
    /// Original provider string, never re-serialised.
    pub slot: String,
    pub contact_id: String,
    pub conversation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub success: bool,
    pub booking_id: String,
    pub slot: String,
    pub tenant_id: String,
    pub contact_id: String,
    pub conversation_id: String,
}

#[async_trait]
pub trait SlotBooker: Send + Sync {
    async fn book(&self, request: BookingRequest) -> Result<BookingConfirmation>;
}

/// Accepts every booking and issues a `stub-` prefixed id.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubBooker;

#[async_trait]
impl SlotBooker for StubBooker {
    async fn book(&self, request: BookingRequest) -> Result<BookingConfirmation> {
        let hex = Uuid::new_v4().simple().to_string();
        let booking_id = format!("stub-{}", &hex[..12]);
        info!(
            booking_id = %booking_id,
            tenant_id = %request.tenant_id,
            slot = %request.slot,
            "stub booking confirmed"
        );
        Ok(BookingConfirmation {
            success: true,
            booking_id,
            slot: request.slot,
            tenant_id: request.tenant_id,
            contact_id: request.contact_id,
            conversation_id: request.conversation_id,
        })
    }
}
