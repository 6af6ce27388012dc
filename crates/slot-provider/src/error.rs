//! Error types for provider fetch and booking calls.
//!
//! None of these are retried here; retry policy belongs to the caller.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// The access token was rejected (expired, revoked, or missing scope).
    #[error("Unauthorized: check token and calendars.readonly scope")]
    Unauthorized,

    /// Any other non-success status.
    #[error("Provider returned HTTP {status}")]
    Http { status: u16 },

    /// Connection, timeout, or body decoding failure.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
