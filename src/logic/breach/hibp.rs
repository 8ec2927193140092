//! Have I Been Pwned Integration
//!
//! Queries the HIBP v3 `breachedaccount` endpoint.
//!
//! - 200 = breached, 404 = clean, anything else = error
//! - One attempt per request, bounded by the client timeout
//! - The API key is sent as a header and never appears in errors or logs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};

use super::{mask_identifier, BreachLookup, BreachLookupError};

// ============================================================================
// CONSTANTS
// ============================================================================

pub const HIBP_API_BASE: &str = "https://haveibeenpwned.com/api/v3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Clone)]
pub struct HibpConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for HibpConfig {
    fn default() -> Self {
        Self {
            base_url: HIBP_API_BASE.to_string(),
            api_key: None,
            user_agent: concat!("sms-shield/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for HibpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HibpConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

// ============================================================================
// CLIENT
// ============================================================================

#[derive(Debug, Clone)]
pub struct HibpClient {
    config: HibpConfig,
    http_client: reqwest::Client,
}

impl HibpClient {
    pub fn new(config: HibpConfig) -> Result<Self, BreachLookupError> {
        // Validate early so a bad URL fails at startup, not per request
        Url::parse(&config.base_url).map_err(|e| BreachLookupError::InvalidUrl(e.to_string()))?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| BreachLookupError::Network(e.to_string()))?;

        Ok(Self { config, http_client })
    }

    fn account_url(&self, identifier: &str) -> Result<Url, BreachLookupError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| BreachLookupError::InvalidUrl(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| BreachLookupError::InvalidUrl(format!("{} cannot be a base URL", self.config.base_url)))?
            .pop_if_empty()
            .push("breachedaccount")
            .push(identifier);

        url.query_pairs_mut().append_pair("truncateResponse", "true");

        Ok(url)
    }
}

#[async_trait]
impl BreachLookup for HibpClient {
    async fn is_breached(&self, identifier: &str) -> Result<bool, BreachLookupError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(BreachLookupError::NotConfigured)?;

        let url = self.account_url(identifier)?;

        tracing::debug!("Checking breach status for {}", mask_identifier(identifier));

        let response = self
            .http_client
            .get(url)
            .header("hibp-api-key", api_key)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BreachLookupError::Timeout(Duration::from_secs(self.config.timeout_seconds))
                } else {
                    // Strip the URL: it contains the identifier
                    BreachLookupError::Network(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        tracing::debug!("Breach service responded {} for {}", status.as_u16(), mask_identifier(identifier));

        match status {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(BreachLookupError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse().ok());
                Err(BreachLookupError::RateLimited { retry_after })
            }
            other => Err(BreachLookupError::UnexpectedStatus(other.as_u16())),
        }
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

// ============================================================================
// TESTS
// ============================================================================
