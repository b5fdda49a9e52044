//! Fiber Fit Core - Shared types library.
//!
//! This crate provides common types used across all Fiber Fit components:
//! - `storefront` - Catalog loading, cart state and view models
//! - `cli` - Command-line front end for browsing and managing the cart
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Slug IDs, prices, catalog records, cart lines and page variants

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
