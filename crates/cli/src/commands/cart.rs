//! Cart commands.
//!
//! Every mutation is saved before the command prints its result.

use fiber_fit_storefront::{AppError, AppState};

use crate::output::{self, Output};

/// Show cart contents and totals.
///
/// # Errors
///
/// Returns an error if output serialization fails.
pub fn show(state: &AppState, out: &Output) -> Result<(), AppError> {
    out.emit(&state.cart_view(), output::cart)
}

/// Add a product to the cart.
///
/// # Errors
///
/// Returns `AppError::Cart` if the product is unknown, the quantity is zero or
/// the cart cannot be saved.
pub fn add(
    state: &mut AppState,
    product_id: &str,
    quantity: u32,
    size: Option<&str>,
    out: &Output,
) -> Result<(), AppError> {
    let notice = state.add_to_cart(product_id, quantity, size)?;
    out.notice(&notice.message)
}

/// Remove a product line.
///
/// # Errors
///
/// Returns `AppError::Cart` if the cart cannot be saved.
pub fn remove(
    state: &mut AppState,
    product_id: &str,
    size: Option<&str>,
    out: &Output,
) -> Result<(), AppError> {
    state.remove_from_cart(product_id, size)?;
    show(state, out)
}

/// Set a line's quantity.
///
/// # Errors
///
/// Returns `AppError::Cart` if the quantity is out of range or the cart
/// cannot be saved.
pub fn update(
    state: &mut AppState,
    product_id: &str,
    quantity: i64,
    size: Option<&str>,
    out: &Output,
) -> Result<(), AppError> {
    state.update_quantity(product_id, size, quantity)?;
    show(state, out)
}

/// Add the catalog products a recipe uses.
///
/// # Errors
///
/// Returns `AppError::Cart` if the recipe is unknown or the cart cannot be
/// saved.
pub fn add_recipe(state: &mut AppState, recipe_id: &str, out: &Output) -> Result<(), AppError> {
    match state.add_recipe_to_cart(recipe_id)? {
        Some(notice) => out.notice(&notice.message),
        None => out.notice("This recipe has no ingredients sold in the shop."),
    }
}

/// Empty the cart.
///
/// # Errors
///
/// Returns `AppError::Cart` if the cart cannot be saved.
pub fn clear(state: &mut AppState, out: &Output) -> Result<(), AppError> {
    state.clear_cart()?;
    out.notice("Cart cleared.")
}
