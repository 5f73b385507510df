//! Exchange-rate service client.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use monsoon_core::Currency;

use crate::api::{ApiError, error_for_status};
use crate::config::StorefrontConfig;

/// Client for the exchange-rate service.
#[derive(Clone)]
pub struct RatesClient {
    inner: Arc<RatesClientInner>,
}

struct RatesClientInner {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    /// Map of currency code to units-per-base rate.
    rates: HashMap<String, f64>,
}

impl RatesClient {
    /// Create a new exchange-rate client.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self {
            inner: Arc::new(RatesClientInner {
                client: reqwest::Client::new(),
                base_url: config.rates_url.as_str().trim_end_matches('/').to_owned(),
                timeout: config.request_timeout,
            }),
        }
    }

    /// Fetch the latest rates for a base currency: `GET {base_url}/{CODE}`.
    ///
    /// # Errors
    ///
    /// Returns a transport error or `ApiError::Status`. Callers treat any
    /// failure as non-fatal and fall back to cached rates.
    pub async fn latest(&self, base: Currency) -> Result<HashMap<String, f64>, ApiError> {
        let url = format!("{}/{}", self.inner.base_url, base.code());
        let response = self
            .inner
            .client
            .get(&url)
            .timeout(self.inner.timeout)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }

        let body: RatesResponse = response.json().await.map_err(ApiError::from_transport)?;
        Ok(body.rates)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_latest_parses_rate_map() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/INR"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                "{\"base\":\"INR\",\"rates\":{\"GBP\":0.0094,\"USD\":0.012}}",
                "application/json",
            ))
            .mount(&server)
            .await;

        let config = StorefrontConfig {
            rates_url: url::Url::parse(&server.uri()).unwrap(),
            ..StorefrontConfig::default()
        };
        let client = RatesClient::new(&config);
        let rates = client.latest(Currency::Inr).await.unwrap();
        assert_eq!(rates.get("GBP"), Some(&0.0094));
        assert_eq!(rates.get("USD"), Some(&0.012));
    }
}
