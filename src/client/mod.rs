//! Client for the ORCID public read API
//!
//! The client sanitizes the researcher identifier once at construction,
//! builds request URLs, performs GETs under a timeout race and feeds the
//! raw JSON through the parser. A per-instance two-state cache backs
//! [`OrcidClient::works`] and the convenience query methods.

use crate::config::ClientConfig;
use crate::models::{Work, WorkSummary, WorkType};
use crate::query::{self, SortOrder, WorkStats};
use crate::{parser, Error, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use tokio::sync::RwLock;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Registry bound on put codes per bulk request.
pub const MAX_BULK_PUT_CODES: usize = 100;

const REGISTRY_URL_PREFIXES: &[&str] = &["https://orcid.org/", "http://orcid.org/"];

/// ORCID iD wrapper for type safety
///
/// Strips an optional registry URL prefix, so both
/// "0000-0002-1825-0097" and "https://orcid.org/0000-0002-1825-0097"
/// produce the same identifier. No checksum or format validation beyond
/// non-emptiness.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrcidId(String);

impl OrcidId {
    /// Create a new identifier from a string, stripping a registry URL
    /// prefix if present
    pub fn new(id: &str) -> Result<Self> {
        let mut cleaned = id.trim();
        for prefix in REGISTRY_URL_PREFIXES {
            cleaned = cleaned.trim_start_matches(prefix);
        }

        if cleaned.is_empty() {
            return Err(Error::InvalidInput {
                field: "orcid_id".to_string(),
                reason: "identifier is required".to_string(),
            });
        }

        Ok(Self(cleaned.to_string()))
    }

    /// Get the bare identifier string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrcidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OrcidId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Per-instance work cache
///
/// An explicit two-state machine rather than a nullable field, so the
/// concurrent-call behavior of [`OrcidClient::works`] is a deliberate
/// decision: callers racing on an empty cache may each fetch, and the
/// last writer wins.
#[derive(Debug)]
enum WorksCache {
    Empty,
    Populated(Vec<Work>),
}

/// Client for one researcher's works on the ORCID registry
pub struct OrcidClient {
    id: OrcidId,
    config: ClientConfig,
    http: reqwest::Client,
    cache: RwLock<WorksCache>,
}

impl OrcidClient {
    /// Create a client with the default configuration
    ///
    /// Fails synchronously on an empty identifier; no network access is
    /// attempted.
    pub fn new(id: &str) -> Result<Self> {
        Self::with_config(id, ClientConfig::default())
    }

    /// Create a client with a custom configuration
    pub fn with_config(id: &str, config: ClientConfig) -> Result<Self> {
        let id = OrcidId::new(id)?;
        config.validate()?;

        let http = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            id,
            config,
            http,
            cache: RwLock::new(WorksCache::Empty),
        })
    }

    /// The sanitized identifier this client queries
    #[must_use]
    pub fn id(&self) -> &OrcidId {
        &self.id
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self, suffix: &str) -> Result<Url> {
        let raw = format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.id.as_str(),
            suffix
        );
        Url::parse(&raw).map_err(|e| Error::InvalidInput {
            field: "base_url".to_string(),
            reason: e.to_string(),
        })
    }

    /// One GET against the registry, raced against the configured timer
    ///
    /// Whichever settles first wins; on expiry the in-flight request
    /// future is dropped, which also closes the connection. A non-success
    /// status surfaces as [`Error::HttpStatus`] with the code.
    async fn fetch_json(&self, url: Url) -> Result<Value> {
        debug!("GET {}", url);

        let request = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");

        let round_trip = async {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                warn!("Registry request failed with HTTP {}", status);
                return Err(Error::HttpStatus {
                    status: status.as_u16(),
                });
            }
            Ok(response.json::<Value>().await?)
        };

        match timeout(self.config.timeout, round_trip).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                timeout: self.config.timeout,
            }),
        }
    }

    /// Fetch the summary listing for this researcher
    ///
    /// Always hits the network and never touches the cache. Each group
    /// in the response contributes its first summary entry.
    #[instrument(skip(self), fields(id = %self.id))]
    pub async fn fetch_work_summaries(&self) -> Result<Vec<WorkSummary>> {
        let url = self.endpoint("works")?;
        let raw = self.fetch_json(url).await?;
        let summaries = parser::parse_summary_listing(&raw)?;
        info!("Fetched {} work summaries", summaries.len());
        Ok(summaries)
    }

    /// Fetch one full work record by its put code
    ///
    /// Uses the registry's legacy single-record path.
    #[instrument(skip(self), fields(id = %self.id))]
    pub async fn fetch_work(&self, put_code: u64) -> Result<Work> {
        let url = self.endpoint(&format!("work/{put_code}"))?;
        let raw = self.fetch_json(url).await?;
        parser::parse_work(&raw)
    }

    /// Fetch full work records for exactly the given put codes
    ///
    /// At most [`MAX_BULK_PUT_CODES`] codes per call; more fails with
    /// [`Error::TooManyPutCodes`] before any network I/O. An empty code
    /// list short-circuits to an empty result, also without I/O.
    #[instrument(skip(self, put_codes), fields(id = %self.id, count = put_codes.len()))]
    pub async fn fetch_with_codes(&self, put_codes: &[u64]) -> Result<Vec<Work>> {
        if put_codes.len() > MAX_BULK_PUT_CODES {
            return Err(Error::TooManyPutCodes {
                count: put_codes.len(),
                limit: MAX_BULK_PUT_CODES,
            });
        }
        if put_codes.is_empty() {
            return Ok(Vec::new());
        }

        let joined = put_codes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let url = self.endpoint(&format!("works/{joined}"))?;
        let raw = self.fetch_json(url).await?;
        let works = parser::parse_bulk(&raw)?;
        info!("Fetched {} works in bulk", works.len());
        Ok(works)
    }

    /// Fetch full work records, discovering put codes when none are given
    ///
    /// With no codes, the summary listing is requested first and the
    /// first [`MAX_BULK_PUT_CODES`] known codes are fetched in bulk.
    /// Always a fresh network round trip (one or two requests); the
    /// cache is neither read nor written.
    pub async fn fetch_works(&self, put_codes: Option<&[u64]>) -> Result<Vec<Work>> {
        let codes: Vec<u64> = match put_codes {
            Some(codes) if !codes.is_empty() => codes.to_vec(),
            _ => {
                let summaries = self.fetch_work_summaries().await?;
                summaries
                    .iter()
                    .filter_map(|s| s.put_code)
                    .take(MAX_BULK_PUT_CODES)
                    .collect()
            }
        };

        self.fetch_with_codes(&codes).await
    }

    /// Return the cached work collection, fetching it on first use
    ///
    /// Concurrent callers racing on an empty cache may each trigger an
    /// independent fetch; the last one to finish populates the cache.
    pub async fn works(&self) -> Result<Vec<Work>> {
        if let WorksCache::Populated(works) = &*self.cache.read().await {
            debug!("Serving {} works from cache", works.len());
            return Ok(works.clone());
        }

        let works = self.fetch_works(None).await?;
        *self.cache.write().await = WorksCache::Populated(works.clone());
        Ok(works)
    }

    /// Re-fetch the work collection and replace the cache
    pub async fn refresh(&self) -> Result<Vec<Work>> {
        let works = self.fetch_works(None).await?;
        *self.cache.write().await = WorksCache::Populated(works.clone());
        Ok(works)
    }

    /// Bucket the cached works by the string form of a named field
    pub async fn group_by(&self, key: &str) -> Result<BTreeMap<String, Vec<Work>>> {
        Ok(query::group_by(&self.works().await?, key))
    }

    /// Filter the cached works by type membership
    pub async fn filter_by_type(&self, types: &[WorkType]) -> Result<Vec<Work>> {
        Ok(query::filter_by_type(&self.works().await?, types))
    }

    /// Filter the cached works by inclusive publication-year range
    pub async fn filter_by_year_range(&self, start: u32, end: u32) -> Result<Vec<Work>> {
        Ok(query::filter_by_year_range(&self.works().await?, start, end))
    }

    /// Sort the cached works by publication date
    pub async fn sort_by_date(&self, order: SortOrder) -> Result<Vec<Work>> {
        Ok(query::sort_by_date(&self.works().await?, order))
    }

    /// Aggregate statistics over the cached works
    pub async fn stats(&self) -> Result<WorkStats> {
        Ok(query::stats(&self.works().await?))
    }
}

impl fmt::Debug for OrcidClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrcidClient")
            .field("id", &self.id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orcid_id_strips_registry_prefixes() {
        let id = OrcidId::new("https://orcid.org/0000-0002-1825-0097").unwrap();
        assert_eq!(id.as_str(), "0000-0002-1825-0097");

        let id = OrcidId::new("http://orcid.org/0000-0002-1825-0097").unwrap();
        assert_eq!(id.as_str(), "0000-0002-1825-0097");

        let id = OrcidId::new("0000-0002-1825-0097").unwrap();
        assert_eq!(id.as_str(), "0000-0002-1825-0097");
    }

    #[test]
    fn test_orcid_id_sanitize_is_idempotent() {
        let once = OrcidId::new("https://orcid.org/0000-0002-1825-0097").unwrap();
        let twice = OrcidId::new(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_orcid_id_rejects_empty() {
        assert!(matches!(
            OrcidId::new(""),
            Err(Error::InvalidInput { .. })
        ));
        assert!(matches!(
            OrcidId::new("   "),
            Err(Error::InvalidInput { .. })
        ));
        // A bare prefix carries no identifier
        assert!(matches!(
            OrcidId::new("https://orcid.org/"),
            Err(Error::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_client_requires_identifier() {
        assert!(matches!(
            OrcidClient::new(""),
            Err(Error::InvalidInput { .. })
        ));
        assert!(OrcidClient::new("0000-0002-1825-0097").is_ok());
    }

    #[test]
    fn test_endpoint_building() {
        let client = OrcidClient::new("https://orcid.org/0000-0002-1825-0097").unwrap();
        let url = client.endpoint("works").unwrap();
        assert_eq!(
            url.as_str(),
            "https://pub.orcid.org/v3.0/0000-0002-1825-0097/works"
        );

        let url = client.endpoint("works/1,2,3").unwrap();
        assert!(url.as_str().ends_with("/works/1,2,3"));
    }

    #[tokio::test]
    async fn test_fetch_with_codes_bounds_error_before_io() {
        // The base URL is unroutable; the bounds check must fire first.
        let mut config = ClientConfig::default();
        config.base_url = "http://127.0.0.1:1".to_string();
        let client = OrcidClient::with_config("0000-0002-1825-0097", config).unwrap();

        let codes: Vec<u64> = (0..101).collect();
        let err = client.fetch_with_codes(&codes).await.unwrap_err();
        assert!(matches!(
            err,
            Error::TooManyPutCodes {
                count: 101,
                limit: 100
            }
        ));
        assert!(err.is_pre_request());
    }

    #[tokio::test]
    async fn test_fetch_with_empty_codes_short_circuits() {
        let mut config = ClientConfig::default();
        config.base_url = "http://127.0.0.1:1".to_string();
        let client = OrcidClient::with_config("0000-0002-1825-0097", config).unwrap();

        let works = client.fetch_with_codes(&[]).await.unwrap();
        assert!(works.is_empty());
    }
}
