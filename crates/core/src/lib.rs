//! Monsoon Core - Shared types library.
//!
//! This crate provides common types used across all Monsoon Market components:
//! - `storefront` - Client library for the remote shop services
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, currencies, and
//!   prices, plus order status enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
