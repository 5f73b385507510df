//! Storefront facade wiring configuration, clients, and shared state.

use std::sync::Arc;

use rust_decimal::Decimal;
use secrecy::ExposeSecret;

use crate::api::{AuthClient, OrdersClient, RatesClient};
use crate::cart::CartStore;
use crate::checkout::CheckoutFlow;
use crate::config::StorefrontConfig;
use crate::currency::{CurrencyConverter, RateQuote};
use crate::error::StorefrontError;
use crate::orders::{Order, group_order_lines};
use crate::session::{AuthError, SessionManager};
use crate::store::StateStore;

/// Shared storefront handle.
///
/// This struct is cheaply cloneable via `Arc`; clones share the session,
/// cart, and currency caches.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    config: StorefrontConfig,
    session: SessionManager,
    cart: CartStore,
    currency: CurrencyConverter,
    orders: OrdersClient,
}

impl Storefront {
    /// Build a storefront from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted state file cannot be opened.
    pub fn new(config: StorefrontConfig) -> Result<Self, StorefrontError> {
        let store = match &config.state_path {
            Some(path) => StateStore::open_at(path.clone()),
            None => StateStore::open(),
        }?;

        let session = SessionManager::new(AuthClient::new(&config), store.clone());
        let currency = CurrencyConverter::new(
            RatesClient::new(&config),
            store,
            config.base_currency,
            config.rate_ttl,
        );
        let orders = OrdersClient::new(&config);

        Ok(Self {
            inner: Arc::new(StorefrontInner {
                config,
                session,
                cart: CartStore::new(),
                currency,
                orders,
            }),
        })
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the session manager.
    #[must_use]
    pub fn session(&self) -> &SessionManager {
        &self.inner.session
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the currency converter.
    #[must_use]
    pub fn currency(&self) -> &CurrencyConverter {
        &self.inner.currency
    }

    /// Checkout flow over this storefront's session, cart, and currency
    /// state.
    #[must_use]
    pub fn checkout(&self) -> CheckoutFlow {
        CheckoutFlow::new(
            self.inner.session.clone(),
            self.inner.cart.clone(),
            self.inner.currency.clone(),
            self.inner.orders.clone(),
        )
    }

    /// Convert a base-currency amount for display with the shopper's rate.
    ///
    /// The display currency follows the logged-in shopper's country; logged
    /// out (or country-less) shoppers see base-currency prices.
    pub async fn convert_price(&self, amount: Decimal) -> (String, RateQuote) {
        let country = self
            .inner
            .session
            .current_user()
            .and_then(|user| user.country().map(ToOwned::to_owned));
        self.inner
            .currency
            .convert_price(amount, country.as_deref())
            .await
    }

    /// Fetch and group the shopper's order history.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` without a session, or
    /// `AuthError::SessionExpired` after a 401 (the session is cleared).
    pub async fn order_history(&self) -> Result<Vec<Order>, AuthError> {
        let token = self
            .inner
            .session
            .current_token()
            .ok_or(AuthError::NotAuthenticated)?;

        match self.inner.orders.list_orders(token.expose_secret()).await {
            Ok(records) => Ok(group_order_lines(records)),
            Err(e) if e.is_unauthorized() => {
                self.inner.session.logout();
                Err(AuthError::SessionExpired)
            }
            Err(e) => Err(AuthError::Api(e)),
        }
    }
}
