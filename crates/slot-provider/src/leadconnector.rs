//! LeadConnector (HighLevel) calendar free-slots client.
//!
//! `GET {base}/calendars/{calendar_id}/free-slots?startDate=..&endDate=..&timezone=..`
//! with epoch-millisecond bounds and a bearer token. The response is the
//! day-bucketed payload handled by [`slot_engine::normalize_free_slots`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde_json::Value;
use slot_engine::{normalize_free_slots, FreeSlots, StubSlots};
use tracing::{info, warn};

use crate::error::{ProviderError, Result};
use crate::source::{SlotQuery, SlotSource};

pub const DEFAULT_BASE_URL: &str = "https://services.leadconnectorhq.com";

/// Upper bound on one free-slots request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for one tenant calendar.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub access_token: String,
    pub calendar_id: String,
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn new(access_token: impl Into<String>, calendar_id: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: access_token.into(),
            calendar_id: calendar_id.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn free_slots_url(&self) -> String {
        format!(
            "{}/calendars/{}/free-slots",
            self.base_url.trim_end_matches('/'),
            self.calendar_id
        )
    }
}

/// Fetches free slots over HTTP, unless a stub override was injected.
#[derive(Debug, Clone)]
pub struct LeadConnectorSource {
    config: ProviderConfig,
    http: reqwest::Client,
    stub: Option<StubSlots>,
}

impl LeadConnectorSource {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            config,
            http,
            stub: None,
        })
    }

    /// Serve `stub` verbatim instead of calling the provider.
    pub fn with_stub(mut self, stub: Option<StubSlots>) -> Self {
        self.stub = stub;
        self
    }

    pub fn is_stubbed(&self) -> bool {
        self.stub.is_some()
    }

    async fn fetch(&self, query: &SlotQuery) -> Result<FreeSlots> {
        let mut params: Vec<(&str, String)> = vec![
            ("startDate", query.start.timestamp_millis().to_string()),
            ("endDate", query.end.timestamp_millis().to_string()),
            ("timezone", query.timezone.name().to_string()),
        ];
        if let Some(user_id) = &query.user_id {
            params.push(("userId", user_id.clone()));
        }

        let response = self
            .http
            .get(self.config.free_slots_url())
            .query(&params)
            .bearer_auth(&self.config.access_token)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!(calendar_id = %self.config.calendar_id, "free-slots request unauthorized");
            return Err(ProviderError::Unauthorized);
        }
        if !status.is_success() {
            warn!(calendar_id = %self.config.calendar_id, status = status.as_u16(), "free-slots request failed");
            return Err(ProviderError::Http {
                status: status.as_u16(),
            });
        }

        let payload: Value = response.json().await?;
        Ok(normalize_free_slots(&payload))
    }
}

#[async_trait]
impl SlotSource for LeadConnectorSource {
    async fn free_slots(&self, query: &SlotQuery) -> Result<FreeSlots> {
        if let Some(stub) = &self.stub {
            info!(count = stub.slots().len(), "serving stub slots");
            return Ok(stub.to_free_slots());
        }

        let free = self.fetch(query).await?;
        info!(
            calendar_id = %self.config.calendar_id,
            count = free.slots.len(),
            trace_id = ?free.trace_id,
            "fetched free slots"
        );
        Ok(free)
    }
}
