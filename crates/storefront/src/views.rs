//! Display view models.
//!
//! Plain serializable records built from catalog and cart state. The CLI
//! prints them as text or JSON; nothing here holds a reference back into the
//! stores, so a view built after a mutation always reflects it.

use std::collections::BTreeMap;

use comrak::{Options, markdown_to_html};
use serde::Serialize;

use fiber_fit_core::{BlogPost, CartLineItem, CartTotals, Ingredient, Price, Product, Recipe};

// =============================================================================
// Cart
// =============================================================================

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: String,
    pub name: String,
    pub size: Option<String>,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: String,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: Price::ZERO.display(),
            item_count: 0,
        }
    }

    /// Build from the cart's lines.
    #[must_use]
    pub fn from_lines(lines: &[CartLineItem]) -> Self {
        let totals = CartTotals::from_lines(lines);
        Self {
            items: lines.iter().map(CartItemView::from).collect(),
            subtotal: totals.total_price.display(),
            item_count: totals.item_count,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&CartLineItem> for CartItemView {
    fn from(line: &CartLineItem) -> Self {
        Self {
            product_id: line.product_id.to_string(),
            name: line.name.clone(),
            size: line.size.clone(),
            quantity: line.quantity,
            price: line.price.display(),
            line_price: line.line_total().display(),
            image: line.image.clone(),
        }
    }
}

// =============================================================================
// Products
// =============================================================================

/// Product card in a listing.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub subtitle: String,
    pub category: String,
    pub price: String,
    pub original_price: Option<String>,
    /// Present only when the product is discounted.
    pub savings: Option<String>,
    pub image: String,
    pub health_benefits: Vec<String>,
    pub sizes: Vec<String>,
    pub rating: f64,
    pub reviews: u32,
    pub in_stock: bool,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            subtitle: product.subtitle.clone(),
            category: product.category.clone(),
            price: product.price.display_short(),
            original_price: product.original_price.map(|p| p.display_short()),
            savings: product.savings().map(|p| p.display_short()),
            image: product.image.clone(),
            health_benefits: product.health_benefits.clone(),
            sizes: product.sizes.clone(),
            rating: product.rating,
            reviews: product.reviews,
            in_stock: product.in_stock,
        }
    }
}

/// Full product page.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetailView {
    #[serde(flatten)]
    pub card: ProductCardView,
    pub description: String,
    pub millet_type: Option<String>,
    pub nutritional_info: BTreeMap<String, String>,
    pub usage: Option<String>,
    pub storage: Option<String>,
    pub shelf_life: Option<String>,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            card: ProductCardView::from(product),
            description: product.description.clone(),
            millet_type: product.millet_type.clone(),
            nutritional_info: product.nutritional_info.clone(),
            usage: product.usage.clone(),
            storage: product.storage.clone(),
            shelf_life: product.shelf_life.clone(),
        }
    }
}

// =============================================================================
// Recipes
// =============================================================================

/// Recipe card in a listing.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeCardView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub difficulty: String,
    pub total_time_minutes: u32,
    pub servings: u32,
    pub rating: f64,
    pub image: String,
    pub tags: Vec<String>,
}

impl From<&Recipe> for RecipeCardView {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.to_string(),
            name: recipe.name.clone(),
            description: recipe.description.clone(),
            category: recipe.category.clone(),
            difficulty: recipe.difficulty.to_string(),
            total_time_minutes: recipe.total_time_minutes(),
            servings: recipe.servings,
            rating: recipe.rating,
            image: recipe.image.clone(),
            tags: recipe.tags.clone(),
        }
    }
}

/// Ingredient line on a recipe page.
#[derive(Debug, Clone, Serialize)]
pub struct IngredientView {
    pub name: String,
    pub amount: String,
    /// Catalog product this ingredient can be bought as.
    pub product_id: Option<String>,
}

impl From<&Ingredient> for IngredientView {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            name: ingredient.name.clone(),
            amount: ingredient.amount.clone(),
            product_id: ingredient.product_id.as_ref().map(ToString::to_string),
        }
    }
}

/// Full recipe page.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetailView {
    #[serde(flatten)]
    pub card: RecipeCardView,
    pub prep_time_minutes: u32,
    pub cook_time_minutes: u32,
    pub ingredients: Vec<IngredientView>,
    pub instructions: Vec<String>,
    pub nutritional_info: BTreeMap<String, String>,
    pub tips: Vec<String>,
}

impl From<&Recipe> for RecipeDetailView {
    fn from(recipe: &Recipe) -> Self {
        Self {
            card: RecipeCardView::from(recipe),
            prep_time_minutes: recipe.prep_time,
            cook_time_minutes: recipe.cook_time,
            ingredients: recipe.ingredients.iter().map(IngredientView::from).collect(),
            instructions: recipe.instructions.clone(),
            nutritional_info: recipe.nutritional_info.clone(),
            tips: recipe.tips.clone(),
        }
    }
}

// =============================================================================
// Blog
// =============================================================================

/// Blog post display data.
///
/// `content_html` is only filled in for full post views; listings leave it
/// empty.
#[derive(Debug, Clone, Serialize)]
pub struct BlogPostView {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub author: String,
    pub author_bio: Option<String>,
    pub category: String,
    /// Formatted date, e.g. "October 15, 2024".
    pub published: String,
    pub read_time: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub featured: bool,
    pub image: String,
    pub likes: u32,
    pub shares: u32,
    pub comments: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content_html: String,
}

impl BlogPostView {
    /// Summary view for a listing.
    #[must_use]
    pub fn summary(post: &BlogPost) -> Self {
        Self {
            id: post.id.to_string(),
            slug: post.slug.clone(),
            title: post.title.clone(),
            author: post.author.clone(),
            author_bio: post.author_bio.clone(),
            category: post.category.clone(),
            published: post.publish_date.format("%B %-d, %Y").to_string(),
            read_time: post
                .read_time
                .clone()
                .unwrap_or_else(|| format!("{} min read", reading_time_minutes(&post.content))),
            excerpt: post.excerpt.clone(),
            tags: post.tags.clone(),
            featured: post.featured,
            image: post.image.clone(),
            likes: post.likes,
            shares: post.shares,
            comments: post.comments,
            content_html: String::new(),
        }
    }

    /// Full view with the Markdown content rendered to HTML.
    #[must_use]
    pub fn full(post: &BlogPost) -> Self {
        Self {
            content_html: render_markdown(&post.content),
            ..Self::summary(post)
        }
    }
}

/// Estimate reading time at 200 words per minute, at least one minute.
#[must_use]
pub fn reading_time_minutes(content: &str) -> usize {
    content.split_whitespace().count().div_ceil(200).max(1)
}

/// Render Markdown to HTML with GitHub-flavored extensions.
#[must_use]
pub fn render_markdown(content: &str) -> String {
    let mut options = Options::default();

    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.header_ids = Some(String::new());

    // Allow raw HTML in post bodies
    options.render.r#unsafe = true;

    markdown_to_html(content, &options)
}
