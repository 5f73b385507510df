//! Integration tests for Monsoon Market.
//!
//! The tests drive the storefront library end-to-end against `wiremock`
//! stand-ins for the auth, orders, and exchange-rate services, with the
//! persisted state redirected into a `tempfile` directory.
//!
//! # Test Files
//!
//! - `session_lifecycle` - login, token expiry, forced logout
//! - `currency_rates` - rate caching, TTL, and degraded fallbacks
//! - `checkout_flow` - precondition gating and concurrent submission
//!
//! Run with: `cargo test -p monsoon-integration-tests`

pub mod support;
