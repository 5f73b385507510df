//! Checkout validation and order submission.
//!
//! Preconditions: an authenticated session, at least one active cart line,
//! and a complete shipping profile. Submission posts one order per line,
//! all concurrently, and fails on the first error with no partial-success
//! reconciliation; the cart is only cleared after every line succeeded.

use std::sync::Arc;

use futures::future::try_join_all;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::info;

use crate::api::{ApiError, OrderRequest, OrdersClient};
use crate::cart::CartStore;
use crate::currency::CurrencyConverter;
use crate::models::User;
use crate::session::SessionManager;

/// Display labels of the required shipping fields, in display order.
const REQUIRED_FIELD_LABELS: [&str; 8] = [
    "First Name",
    "Last Name",
    "Street Address",
    "City",
    "State/Province",
    "ZIP/Postal Code",
    "Country",
    "Contact Number",
];

/// Errors that block or fail a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No authenticated session.
    #[error("please log in to complete checkout")]
    NotAuthenticated,

    /// The session expired while checking out; it has been cleared.
    #[error("session expired, please log in again")]
    SessionExpired,

    /// No cart line has a positive quantity.
    #[error("your basket is empty")]
    EmptyCart,

    /// Required shipping fields are missing; the payload lists their
    /// display labels.
    #[error("missing required information: {}", .0.join(", "))]
    ProfileIncomplete(Vec<String>),

    /// An order submission failed. No partial-success reconciliation is
    /// attempted and the cart is left untouched for a retry.
    #[error("{0}")]
    Submit(ApiError),
}

/// Result of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    /// Number of order lines submitted.
    pub lines_submitted: usize,
    /// Formatted total charged, in the resolved display currency.
    pub total: String,
}

/// Labels of required shipping fields that are empty or whitespace.
///
/// First and last name live on the user; the rest on the profile.
#[must_use]
pub fn missing_profile_fields(user: &User) -> Vec<String> {
    let profile = user.profile.as_ref();
    let values: [Option<&str>; 8] = [
        Some(user.first_name.as_str()),
        Some(user.last_name.as_str()),
        profile.and_then(|p| p.address_line1.as_deref()),
        profile.and_then(|p| p.city.as_deref()),
        profile.and_then(|p| p.state.as_deref()),
        profile.and_then(|p| p.pincode.as_deref()),
        profile.and_then(|p| p.country.as_deref()),
        profile.and_then(|p| p.contact_number.as_deref()),
    ];

    REQUIRED_FIELD_LABELS
        .iter()
        .zip(values)
        .filter(|(_, value)| value.is_none_or(|v| v.trim().is_empty()))
        .map(|(label, _)| (*label).to_owned())
        .collect()
}

/// Drives checkout over the session, cart, currency, and orders handles.
#[derive(Clone)]
pub struct CheckoutFlow {
    inner: Arc<CheckoutInner>,
}

struct CheckoutInner {
    session: SessionManager,
    cart: CartStore,
    currency: CurrencyConverter,
    orders: OrdersClient,
}

impl CheckoutFlow {
    /// Assemble a checkout flow from shared handles.
    #[must_use]
    pub fn new(
        session: SessionManager,
        cart: CartStore,
        currency: CurrencyConverter,
        orders: OrdersClient,
    ) -> Self {
        Self {
            inner: Arc::new(CheckoutInner {
                session,
                cart,
                currency,
                orders,
            }),
        }
    }

    /// Check the preconditions without submitting anything.
    ///
    /// # Errors
    ///
    /// Returns the first failed precondition: `NotAuthenticated`,
    /// `EmptyCart`, or `ProfileIncomplete` with the missing labels.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let user = self
            .inner
            .session
            .current_user()
            .ok_or(CheckoutError::NotAuthenticated)?;
        if self.inner.cart.active_lines().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let missing = missing_profile_fields(&user);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CheckoutError::ProfileIncomplete(missing))
        }
    }

    /// Submit one order per active cart line, all concurrently.
    ///
    /// Each line carries the converted unit price and the display currency
    /// symbol. On full success the cart is cleared; on any failure the
    /// first error is surfaced and the cart is left untouched.
    ///
    /// # Errors
    ///
    /// Returns a precondition error, `SessionExpired` after a 401 (the
    /// session is already cleared), or `Submit` with the first request
    /// failure.
    pub async fn submit(&self) -> Result<CheckoutReceipt, CheckoutError> {
        let (user, token) = self
            .inner
            .session
            .credentials()
            .ok_or(CheckoutError::NotAuthenticated)?;

        let lines = self.inner.cart.active_lines();
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let missing = missing_profile_fields(&user);
        if !missing.is_empty() {
            return Err(CheckoutError::ProfileIncomplete(missing));
        }

        let quote = self.inner.currency.quote(user.country()).await;
        let total = quote.format(lines.iter().map(|line| line.line_total()).sum::<Decimal>());

        let requests: Vec<OrderRequest> = lines
            .iter()
            .map(|line| OrderRequest {
                product_id: line.product_id,
                quantity: line.quantity,
                price: quote
                    .convert(line.unit_price)
                    .amount
                    .to_f64()
                    .unwrap_or_default(),
                currency: quote.currency.symbol().to_owned(),
            })
            .collect();

        let submissions = requests
            .iter()
            .map(|request| self.inner.orders.create_order(token.expose_secret(), request));
        if let Err(error) = try_join_all(submissions).await {
            if error.is_unauthorized() {
                self.inner.session.logout();
                return Err(CheckoutError::SessionExpired);
            }
            return Err(CheckoutError::Submit(error));
        }

        self.inner.cart.clear();
        info!(lines = requests.len(), %total, "checkout complete");
        Ok(CheckoutReceipt {
            lines_submitted: requests.len(),
            total,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::Profile;
    use monsoon_core::Email;

    fn complete_user() -> User {
        User {
            email: Email::parse("jane@example.com").unwrap(),
            first_name: "Jane".to_owned(),
            last_name: "Doe".to_owned(),
            profile: Some(Profile {
                country: Some("United Kingdom".to_owned()),
                contact_number: Some("+44 20 7946 0000".to_owned()),
                pincode: Some("SW1A 1AA".to_owned()),
                address_line1: Some("1 Baker Street".to_owned()),
                city: Some("London".to_owned()),
                state: Some("Greater London".to_owned()),
                ..Profile::default()
            }),
        }
    }

    #[test]
    fn test_complete_profile_has_no_missing_fields() {
        assert!(missing_profile_fields(&complete_user()).is_empty());
    }

    #[test]
    fn test_missing_profile_lists_labels() {
        let mut user = complete_user();
        user.profile = None;
        assert_eq!(
            missing_profile_fields(&user),
            vec![
                "Street Address",
                "City",
                "State/Province",
                "ZIP/Postal Code",
                "Country",
                "Contact Number",
            ]
        );
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let mut user = complete_user();
        if let Some(profile) = user.profile.as_mut() {
            profile.city = Some("   ".to_owned());
        }
        user.first_name = String::new();
        assert_eq!(missing_profile_fields(&user), vec!["First Name", "City"]);
    }
}
