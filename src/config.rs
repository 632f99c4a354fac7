use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default root of the ORCID public read API.
pub const DEFAULT_BASE_URL: &str = "https://pub.orcid.org/v3.0";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// HTTP client configuration for registry access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the registry's read API
    pub base_url: String,
    /// Request timeout duration
    #[serde(with = "duration_millis")]
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!(
                "orcid-works/",
                env!("CARGO_PKG_VERSION"),
                " (Academic Research Tool)"
            )
            .to_string(),
        }
    }
}

impl ClientConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::InvalidInput {
                field: "base_url".to_string(),
                reason: "base URL cannot be empty".to_string(),
            });
        }
        if self.timeout.is_zero() {
            return Err(Error::InvalidInput {
                field: "timeout".to_string(),
                reason: "timeout must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}
