//! Session cache configuration
//!
//! Values come from the environment (callers load `.env` via dotenvy before
//! constructing the config); everything has a working default.

use chrono::Duration;

const DEFAULT_TTL_MINUTES: i64 = 30;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BASE_URL: &str = "https://api.accounting.example.com/v1";

/// Configuration for the session cache and the accounting API client.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long one generation of session rows stays live.
    pub session_ttl: Duration,
    /// Base URL of the accounting API.
    pub base_url: String,
    /// Per-request timeout for report fetches.
    pub request_timeout: std::time::Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::minutes(DEFAULT_TTL_MINUTES),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl CacheConfig {
    /// Build a config from `CONSO_*` environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let session_ttl = std::env::var("CONSO_SESSION_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .map(Duration::minutes)
            .unwrap_or(defaults.session_ttl);

        let base_url = std::env::var("CONSO_ACCOUNTING_BASE_URL")
            .unwrap_or(defaults.base_url);

        let request_timeout = std::env::var("CONSO_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(std::time::Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        Self {
            session_ttl,
            base_url,
            request_timeout,
        }
    }

    /// Override the TTL, keeping everything else.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }
}
