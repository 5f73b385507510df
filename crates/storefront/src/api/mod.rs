//! HTTP clients for the remote shop services.
//!
//! # Architecture
//!
//! - One client per service (auth, orders, exchange rates), each a cheap
//!   `Arc` handle over a shared `reqwest::Client`
//! - Plain REST/JSON; error bodies carry a `detail` message which is
//!   surfaced verbatim to the shopper
//! - Per-request timeouts from [`crate::config::StorefrontConfig`]

mod auth;
mod orders;
mod rates;

pub use auth::AuthClient;
pub use orders::{OrderLineRecord, OrderRequest, OrdersClient};
pub use rates::RatesClient;

use serde::Deserialize;
use thiserror::Error;

/// Errors from the remote services.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request timed out.
    #[error("Request timed out. Please check your connection.")]
    Timeout,

    /// The server could not be reached at all.
    #[error("No response from server. Please try again later.")]
    NoResponse,

    /// The server answered with a non-success status. `detail` is the
    /// service's own message when the body carried one.
    #[error("{detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Human-readable failure message.
        detail: String,
    },

    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Malformed JSON in a response body.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether this is a 401 response, which forces a logout.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    /// Classify a reqwest transport error.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::NoResponse
        } else {
            Self::Http(err)
        }
    }
}

/// Error body shape shared by the auth and orders services.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Turn a non-success response into `ApiError::Status`, preferring the
/// service's `detail` message, then the raw body, then the status reason.
pub(crate) async fn error_for_status(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|parsed| parsed.detail)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_owned()
            } else {
                body.chars().take(200).collect()
            }
        });
    ApiError::Status {
        status: status.as_u16(),
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            ApiError::Timeout.to_string(),
            "Request timed out. Please check your connection."
        );
        assert_eq!(
            ApiError::NoResponse.to_string(),
            "No response from server. Please try again later."
        );
        let err = ApiError::Status {
            status: 400,
            detail: "Email already registered".to_owned(),
        };
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[test]
    fn test_is_unauthorized() {
        let err = ApiError::Status {
            status: 401,
            detail: "Invalid token".to_owned(),
        };
        assert!(err.is_unauthorized());
        assert!(!ApiError::Timeout.is_unauthorized());
    }
}
