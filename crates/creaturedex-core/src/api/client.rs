//! HTTP client for the creature catalog endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::{debug, warn};

use super::ApiError;
use crate::models::Creature;

// ============================================================================
// Constants
// ============================================================================

/// Endpoint serving the full catalog as a JSON array.
pub const DEFAULT_CATALOG_URL: &str = "https://stud.hosted.hr.nl/1029788/creature/creatures.json";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Anything that can produce the current creature list.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_creatures(&self) -> Result<Vec<Creature>, ApiError>;
}

/// Catalog client.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    url: String,
    initial_backoff: Duration,
}

impl CatalogClient {
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            initial_backoff: Duration::from_millis(INITIAL_BACKOFF_MS),
        })
    }

    /// Override the first rate-limit backoff; later ones double from here.
    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The endpoint has no error payload; anything but an array of
    /// creatures is malformed.
    fn parse_catalog(body: &str) -> Result<Vec<Creature>, ApiError> {
        Ok(serde_json::from_str(body)?)
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_creatures(&self) -> Result<Vec<Creature>, ApiError> {
        let mut retries = 0;
        let mut backoff = self.initial_backoff;

        loop {
            let response = self
                .client
                .get(&self.url)
                .header(header::ACCEPT, "application/json")
                .send()
                .await
                .map_err(|e| {
                    if e.is_connect() {
                        ApiError::Offline(e.to_string())
                    } else {
                        ApiError::Transport(e)
                    }
                })?;

            let status = response.status();
            if status.is_success() {
                let body = response.text().await?;
                let creatures = Self::parse_catalog(&body)?;
                debug!(url = %self.url, count = creatures.len(), "Fetched catalog");
                return Ok(creatures);
            }

            if status.as_u16() != 429 {
                let body = response.text().await.unwrap_or_default();
                return Err(ApiError::from_status(status, &body));
            }

            retries += 1;
            if retries > MAX_RATE_LIMIT_RETRIES {
                return Err(ApiError::RateLimited);
            }
            warn!(url = %self.url, retry = retries, backoff_ms = backoff.as_millis() as u64, "Rate limited, backing off");
            tokio::time::sleep(backoff).await;
            backoff *= 2;
        }
    }
}
