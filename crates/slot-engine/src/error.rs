//! Error types for slot-engine configuration parsing.
//!
//! Pipeline stages never fail: malformed slots are dropped, not reported.
//! These errors only surface when tenant configuration or signal tokens are
//! parsed at the edge.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid day signal: {0}")]
    InvalidDaySignal(String),

    #[error("Invalid time-of-day signal: {0}")]
    InvalidTimeOfDay(String),

    #[error("Invalid tenant config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
