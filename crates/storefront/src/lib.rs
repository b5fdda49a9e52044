//! Fiber Fit storefront library.
//!
//! Catalog loading with fallback, the persisted shopping cart, product and
//! blog filtering, and the view models the CLI renders.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod pages;
pub mod state;
pub mod views;

pub use error::{AppError, Result};
pub use state::AppState;
