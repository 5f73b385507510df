//! Orders service client.
//!
//! The service is line-oriented: `POST /orders` creates a single order line,
//! and `GET /orders` returns a flat list of per-line records which the
//! [`crate::orders`] module groups into orders client-side.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use monsoon_core::{OrderId, OrderStatus, ProductId};

use crate::api::{ApiError, error_for_status};
use crate::config::StorefrontConfig;

/// Client for the remote orders service.
#[derive(Clone)]
pub struct OrdersClient {
    inner: Arc<OrdersClientInner>,
}

struct OrdersClientInner {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

/// Payload for creating one order line.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    /// Catalog product being ordered.
    pub product_id: ProductId,
    /// Units ordered.
    pub quantity: u32,
    /// Converted unit price, rounded to two fraction digits.
    pub price: f64,
    /// Display currency symbol at purchase time (`₹`, `£`, `A$`, ...).
    pub currency: String,
}

/// One row of the flat per-line order listing.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderLineRecord {
    /// Order this line belongs to; lines sharing an id form one order.
    pub id: OrderId,
    /// Account the order was placed from.
    #[serde(default)]
    pub user_email: Option<String>,
    pub product_id: ProductId,
    pub quantity: u32,
    /// Unit price as charged, in the purchase currency.
    pub price: f64,
    pub status: OrderStatus,
    /// Creation timestamp as sent by the service.
    pub created_at: String,
    /// Currency symbol recorded at purchase time.
    pub currency: String,
}

impl OrderLineRecord {
    /// Parse the service's `created_at` timestamp.
    ///
    /// Accepts RFC 3339 or a bare `YYYY-MM-DDTHH:MM:SS[.f]` datetime, which
    /// is assumed to be UTC.
    #[must_use]
    pub fn created_at_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }
}

impl OrdersClient {
    /// Create a new orders service client.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self {
            inner: Arc::new(OrdersClientInner {
                client: reqwest::Client::new(),
                base_url: config.orders_url.as_str().trim_end_matches('/').to_owned(),
                timeout: config.request_timeout,
            }),
        }
    }

    /// Create one order line.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Timeout`/`NoResponse` for transport failures or
    /// `ApiError::Status` with the service's detail message.
    pub async fn create_order(&self, token: &str, request: &OrderRequest) -> Result<(), ApiError> {
        let url = format!("{}/orders", self.inner.base_url);
        let response = self
            .inner
            .client
            .post(&url)
            .timeout(self.inner.timeout)
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }
        debug!(product_id = %request.product_id, quantity = request.quantity, "order line created");
        Ok(())
    }

    /// Fetch the shopper's flat order-line records.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with status 401 for an expired token, or a
    /// transport error.
    pub async fn list_orders(&self, token: &str) -> Result<Vec<OrderLineRecord>, ApiError> {
        let url = format!("{}/orders", self.inner.base_url);
        let response = self
            .inner
            .client
            .get(&url)
            .timeout(self.inner.timeout)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }

        let records: Vec<OrderLineRecord> =
            response.json().await.map_err(ApiError::from_transport)?;
        Ok(records)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record(created_at: &str) -> OrderLineRecord {
        OrderLineRecord {
            id: OrderId::new(1),
            user_email: None,
            product_id: ProductId::new(1),
            quantity: 1,
            price: 10.0,
            status: OrderStatus::Pending,
            created_at: created_at.to_owned(),
            currency: "₹".to_owned(),
        }
    }

    #[test]
    fn test_created_at_rfc3339() {
        let parsed = record("2025-03-14T09:26:53+00:00").created_at_datetime();
        assert!(parsed.is_some());
    }

    #[test]
    fn test_created_at_naive() {
        let parsed = record("2025-03-14T09:26:53.123456").created_at_datetime();
        assert!(parsed.is_some());
    }

    #[test]
    fn test_created_at_garbage() {
        assert!(record("yesterday").created_at_datetime().is_none());
    }

    #[test]
    fn test_order_request_wire_shape() {
        let request = OrderRequest {
            product_id: ProductId::new(3),
            quantity: 2,
            price: 107.5,
            currency: "£".to_owned(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "product_id": 3,
                "quantity": 2,
                "price": 107.5,
                "currency": "£",
            })
        );
    }
}
