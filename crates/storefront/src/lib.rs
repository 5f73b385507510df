//! Monsoon Market storefront client library.
//!
//! A client-side storefront core over the remote shop services: session
//! lifecycle (bearer-token expiry, automatic logout), currency conversion
//! with a one-hour rate cache, an in-memory cart, checkout submission, and
//! order history.
//!
//! # Architecture
//!
//! - [`Storefront`] wires configuration, HTTP clients, and shared state into
//!   one cheaply-cloneable handle
//! - [`session`] owns the bearer token and the auto-logout timer
//! - [`currency`] caches exchange rates (memory + persisted state) and
//!   degrades to the last known rate when the rate service is unreachable
//! - [`checkout`] validates the shipping profile and submits one order per
//!   cart line, concurrently
//!
//! # Example
//!
//! ```rust,ignore
//! use monsoon_storefront::{Storefront, StorefrontConfig};
//!
//! let storefront = Storefront::new(StorefrontConfig::from_env()?)?;
//! storefront.session().login("jane@example.com", "Secret#123").await?;
//!
//! let sneakers = monsoon_storefront::catalog::find(1.into()).expect("catalog product");
//! storefront.cart().add(sneakers);
//!
//! let receipt = storefront.checkout().submit().await?;
//! println!("charged {}", receipt.total);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod currency;
pub mod error;
pub mod models;
pub mod orders;
pub mod session;
pub mod state;
pub mod store;

pub use cart::{CartLine, CartStore};
pub use checkout::{CheckoutError, CheckoutFlow, CheckoutReceipt, missing_profile_fields};
pub use config::{ConfigError, StorefrontConfig};
pub use currency::{CachedRate, CurrencyConverter, RateQuote, RateSource};
pub use error::{Result, StorefrontError};
pub use models::{Profile, ProfileUpdate, User};
pub use orders::{Order, OrderItem};
pub use session::{AuthError, Registration, Session, SessionManager};
pub use state::Storefront;
pub use store::{StateStore, StoreError};
