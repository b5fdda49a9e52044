//! Text and JSON output.

#![allow(clippy::print_stdout)]

use std::fmt::Write as _;

use serde::Serialize;

use fiber_fit_storefront::AppError;
use fiber_fit_storefront::views::{
    BlogPostView, CartView, ProductCardView, ProductDetailView, RecipeCardView, RecipeDetailView,
};

/// Where command results are printed.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub const fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print `value` as pretty JSON, or as the text produced by `text`.
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce(&T) -> String) -> Result<(), AppError> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            print!("{}", text(value));
        }
        Ok(())
    }

    /// Print a short confirmation.
    pub fn notice(&self, message: &str) -> Result<(), AppError> {
        self.emit(&serde_json::json!({ "notice": message }), |_| format!("{message}\n"))
    }
}

// =============================================================================
// Text renderers
// =============================================================================

pub fn product_list(products: &[ProductCardView]) -> String {
    if products.is_empty() {
        return "No products found.\n".to_string();
    }
    let mut out = String::new();
    for product in products {
        let _ = write!(out, "{:<18} {:<32} {:>6}", product.id, product.name, product.price);
        if let Some(savings) = &product.savings {
            let _ = write!(out, "  (save {savings})");
        }
        if !product.in_stock {
            out.push_str("  [out of stock]");
        }
        out.push('\n');
    }
    out
}

pub fn product_detail(product: &ProductDetailView) -> String {
    let card = &product.card;
    let mut out = format!("{}\n", card.name);
    if !card.subtitle.is_empty() {
        let _ = writeln!(out, "{}", card.subtitle);
    }
    let _ = write!(out, "\nPrice: {}", card.price);
    if let Some(original) = &card.original_price {
        let _ = write!(out, " (was {original})");
    }
    let _ = writeln!(out, "\nRating: {} ({} reviews)", card.rating, card.reviews);
    if !card.sizes.is_empty() {
        let _ = writeln!(out, "Sizes: {}", card.sizes.join(", "));
    }
    if !product.description.is_empty() {
        let _ = writeln!(out, "\n{}", product.description);
    }
    if !card.health_benefits.is_empty() {
        let _ = writeln!(out, "\nHealth benefits: {}", card.health_benefits.join(", "));
    }
    if !product.nutritional_info.is_empty() {
        out.push_str("\nNutrition:\n");
        for (name, value) in &product.nutritional_info {
            let _ = writeln!(out, "  {name:<10} {value}");
        }
    }
    for (label, value) in [
        ("Usage", &product.usage),
        ("Storage", &product.storage),
        ("Shelf life", &product.shelf_life),
    ] {
        if let Some(value) = value {
            let _ = writeln!(out, "{label}: {value}");
        }
    }
    out
}

pub fn recipe_list(recipes: &[RecipeCardView]) -> String {
    if recipes.is_empty() {
        return "No recipes found.\n".to_string();
    }
    let mut out = String::new();
    for recipe in recipes {
        let _ = writeln!(
            out,
            "{:<18} {:<32} {:>4} min  {}",
            recipe.id, recipe.name, recipe.total_time_minutes, recipe.difficulty
        );
    }
    out
}

pub fn recipe_detail(recipe: &RecipeDetailView) -> String {
    let card = &recipe.card;
    let mut out = format!(
        "{}\n{} | {} | prep {} min, cook {} min | serves {}\n",
        card.name,
        card.category,
        card.difficulty,
        recipe.prep_time_minutes,
        recipe.cook_time_minutes,
        card.servings
    );
    if !card.description.is_empty() {
        let _ = writeln!(out, "\n{}", card.description);
    }
    out.push_str("\nIngredients:\n");
    for ingredient in &recipe.ingredients {
        let _ = write!(out, "  - {} {}", ingredient.amount, ingredient.name);
        if let Some(product_id) = &ingredient.product_id {
            let _ = write!(out, " [{product_id}]");
        }
        out.push('\n');
    }
    out.push_str("\nInstructions:\n");
    for (step, instruction) in recipe.instructions.iter().enumerate() {
        let _ = writeln!(out, "  {}. {instruction}", step + 1);
    }
    if !recipe.tips.is_empty() {
        out.push_str("\nTips:\n");
        for tip in &recipe.tips {
            let _ = writeln!(out, "  * {tip}");
        }
    }
    out
}

pub fn post_list(posts: &[BlogPostView]) -> String {
    if posts.is_empty() {
        return "No posts found.\n".to_string();
    }
    let mut out = String::new();
    for post in posts {
        let _ = writeln!(
            out,
            "{}{}\n  {} | {} | {} | {}\n  {}\n",
            post.title,
            if post.featured { " *" } else { "" },
            post.author,
            post.published,
            post.category,
            post.read_time,
            post.excerpt
        );
    }
    out
}

pub fn post_detail(post: &BlogPostView) -> String {
    format!(
        "{}\nBy {} | {} | {}\n\n{}\n",
        post.title, post.author, post.published, post.read_time, post.content_html
    )
}

pub fn cart(cart: &CartView) -> String {
    if cart.is_empty() {
        return "Your cart is empty.\n".to_string();
    }
    let mut out = String::new();
    for item in &cart.items {
        let name = match &item.size {
            Some(size) => format!("{} ({size})", item.name),
            None => item.name.clone(),
        };
        let _ = writeln!(
            out,
            "{name:<40} {:>3} x {:>9} = {:>10}",
            item.quantity, item.price, item.line_price
        );
    }
    let _ = writeln!(out, "\n{} items, subtotal {}", cart.item_count, cart.subtotal);
    out
}
