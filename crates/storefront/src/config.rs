//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! Every variable is optional; the defaults point at the production
//! services.
//!
//! - `STOREFRONT_AUTH_URL` - Base URL of the authentication service
//! - `STOREFRONT_ORDERS_URL` - Base URL of the orders service
//! - `STOREFRONT_RATES_URL` - Base URL of the exchange-rate service
//! - `STOREFRONT_BASE_CURRENCY` - Catalog base currency code (default: INR)
//! - `STOREFRONT_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `STOREFRONT_RATE_TTL_SECS` - Rate cache freshness window (default: 3600)
//! - `STOREFRONT_STATE_PATH` - Override path of the persisted state file

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use monsoon_core::Currency;

const DEFAULT_AUTH_URL: &str =
    "https://backend-auth-cqfxbjd8fqbtezc8.canadacentral-01.azurewebsites.net/api/auth";
const DEFAULT_ORDERS_URL: &str =
    "https://backend-orders-webapp-h6gzajarh8gdaaf5.canadacentral-01.azurewebsites.net/api";
const DEFAULT_RATES_URL: &str = "https://api.exchangerate-api.com/v4/latest";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RATE_TTL_SECS: u64 = 3600;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the authentication service.
    pub auth_url: Url,
    /// Base URL of the orders service.
    pub orders_url: Url,
    /// Base URL of the exchange-rate service.
    pub rates_url: Url,
    /// Currency catalog prices are denominated in.
    pub base_currency: Currency,
    /// Per-request timeout for all service calls.
    pub request_timeout: Duration,
    /// Freshness window for cached exchange rates.
    pub rate_ttl: Duration,
    /// Override path for the persisted state file. `None` uses the platform
    /// data directory.
    pub state_path: Option<PathBuf>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            auth_url: get_url("STOREFRONT_AUTH_URL", DEFAULT_AUTH_URL)?,
            orders_url: get_url("STOREFRONT_ORDERS_URL", DEFAULT_ORDERS_URL)?,
            rates_url: get_url("STOREFRONT_RATES_URL", DEFAULT_RATES_URL)?,
            base_currency: get_parsed("STOREFRONT_BASE_CURRENCY")?
                .unwrap_or(Currency::Inr),
            request_timeout: Duration::from_secs(
                get_parsed("STOREFRONT_REQUEST_TIMEOUT_SECS")?
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            rate_ttl: Duration::from_secs(
                get_parsed("STOREFRONT_RATE_TTL_SECS")?.unwrap_or(DEFAULT_RATE_TTL_SECS),
            ),
            state_path: std::env::var("STOREFRONT_STATE_PATH").ok().map(PathBuf::from),
        })
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            auth_url: Url::parse(DEFAULT_AUTH_URL).expect("default auth URL is valid"),
            orders_url: Url::parse(DEFAULT_ORDERS_URL).expect("default orders URL is valid"),
            rates_url: Url::parse(DEFAULT_RATES_URL).expect("default rates URL is valid"),
            base_currency: Currency::Inr,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            rate_ttl: Duration::from_secs(DEFAULT_RATE_TTL_SECS),
            state_path: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable parsed as a URL, with a default.
fn get_url(key: &str, default: &str) -> Result<Url, ConfigError> {
    let value = std::env::var(key).unwrap_or_else(|_| default.to_owned());
    Url::parse(&value).map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
}

/// Get an environment variable parsed with `FromStr`, or `None` if unset.
fn get_parsed<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string())),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.base_currency, Currency::Inr);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.rate_ttl, Duration::from_secs(3600));
        assert!(config.state_path.is_none());
        assert!(config.auth_url.as_str().ends_with("/api/auth"));
    }

    #[test]
    fn test_get_url_rejects_garbage() {
        // Key is unset, so the default is parsed; an invalid default errors.
        let result = get_url("STOREFRONT_TEST_UNSET_URL", "not a url");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidEnvVar("FOO".to_owned(), "bad value".to_owned());
        assert_eq!(err.to_string(), "Invalid environment variable FOO: bad value");
    }
}
