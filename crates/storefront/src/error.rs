//! Unified error handling for the storefront library.
//!
//! Each subsystem keeps its own error type; `StorefrontError` is the
//! umbrella the CLI and other embedders can hold.

use thiserror::Error;

use crate::api::ApiError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::session::AuthError;
use crate::store::StoreError;

/// Top-level error type for storefront operations.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Persisted state could not be read or written.
    #[error("State store error: {0}")]
    Store(#[from] StoreError),

    /// Session or account operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout was blocked or a submission failed.
    #[error("{0}")]
    Checkout(#[from] CheckoutError),

    /// A remote service call failed.
    #[error("Network error: {0}")]
    Api(#[from] ApiError),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorefrontError::Auth(AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "Auth error: invalid credentials");

        let err = StorefrontError::Checkout(CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "your basket is empty");
    }
}
