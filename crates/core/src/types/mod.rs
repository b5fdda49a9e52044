//! Core types for Fiber Fit.
//!
//! This module provides type-safe wrappers and records for the catalog and cart.

pub mod blog;
pub mod cart;
pub mod id;
pub mod page;
pub mod price;
pub mod product;
pub mod recipe;

pub use blog::{BlogPost, BlogPostsPayload};
pub use cart::{CartLineItem, CartTotals, LineKey};
pub use id::*;
pub use page::Page;
pub use price::{CURRENCY_SYMBOL, Price};
pub use product::{Product, ProductsPayload};
pub use recipe::{Difficulty, Ingredient, Recipe, RecipesPayload};
