//! Tenant configuration consumed by the pipeline.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::availability::AvailabilitySchedule;
use crate::error::Result;
use crate::slot::{parse_timezone, DEFAULT_TIMEZONE};

/// Per-tenant settings: the IANA timezone all day/hour logic runs in, and
/// the optional weekly availability schedule.
///
/// ```json
/// {
///   "timezone": "America/New_York",
///   "availability": {"mon": [{"start": "09:00", "end": "17:00"}]}
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantConfig {
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<AvailabilitySchedule>,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.name().to_string()
}

impl Default for TenantConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            availability: None,
        }
    }
}

impl TenantConfig {
    /// Parse a tenant config from JSON, rejecting unknown timezones up front.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.tz()?;
        Ok(config)
    }

    /// The configured timezone as a `Tz`.
    pub fn tz(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }
}
