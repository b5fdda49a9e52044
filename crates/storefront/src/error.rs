//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for the storefront. Callers show
//! [`AppError::user_message`] to the user and hand the error to
//! [`AppError::report`], which logs it and captures infrastructure failures
//! to Sentry.

use thiserror::Error;

use crate::cart::{CartError, StorageError};
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client for the remote data source could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Durable storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Whether this error is a fault in the system rather than in the input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::Http(_)
                | Self::Storage(_)
                | Self::Serialize(_)
                | Self::Cart(CartError::Storage(_))
        )
    }

    /// Message safe to show the user.
    ///
    /// Internal details (paths, URLs, parser output) are never included.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(err) => format!("Invalid configuration: {err}"),
            Self::Http(_) => "Failed to load data. Please try again.".to_string(),
            Self::Storage(_) | Self::Cart(CartError::Storage(_)) => {
                "Your cart could not be saved.".to_string()
            }
            Self::Serialize(_) => "Internal error".to_string(),
            Self::Cart(CartError::ProductNotFound(_)) => "Product not found".to_string(),
            Self::Cart(CartError::RecipeNotFound(_)) => "Recipe not found".to_string(),
            Self::Cart(err @ (CartError::InvalidQuantity | CartError::QuantityTooLarge)) => {
                err.to_string()
            }
            Self::NotFound(what) => format!("Not found: {what}"),
        }
    }

    /// Log the error, capturing internal failures to Sentry.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error. Without an initialized Sentry client this is a no-op.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "ragi-flour")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
