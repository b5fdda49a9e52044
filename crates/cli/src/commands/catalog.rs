//! Catalog browsing commands.

use serde::Serialize;
use tracing::info;

use fiber_fit_storefront::catalog::LoadReport;
use fiber_fit_storefront::filter::{filter_blog_posts, filter_products};
use fiber_fit_storefront::views::{
    BlogPostView, ProductCardView, ProductDetailView, RecipeCardView, RecipeDetailView,
};
use fiber_fit_storefront::{AppError, AppState};

use crate::output::{self, Output};

/// List products matching a category and search term.
///
/// # Errors
///
/// Returns an error if output serialization fails.
pub fn products(
    state: &AppState,
    category: &str,
    search: Option<&str>,
    out: &Output,
) -> Result<(), AppError> {
    let views: Vec<ProductCardView> = filter_products(state.catalog().products(), category, search)
        .into_iter()
        .map(ProductCardView::from)
        .collect();
    out.emit(&views, |v| output::product_list(v))
}

/// Show one product.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product does not exist.
pub fn product(state: &AppState, id: &str, out: &Output) -> Result<(), AppError> {
    let product = state
        .catalog()
        .find_product(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    out.emit(&ProductDetailView::from(product), output::product_detail)
}

/// List recipes.
///
/// # Errors
///
/// Returns an error if output serialization fails.
pub fn recipes(state: &AppState, out: &Output) -> Result<(), AppError> {
    let views: Vec<RecipeCardView> = state
        .catalog()
        .recipes()
        .iter()
        .map(RecipeCardView::from)
        .collect();
    out.emit(&views, |v| output::recipe_list(v))
}

/// Show one recipe.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the recipe does not exist.
pub fn recipe(state: &AppState, id: &str, out: &Output) -> Result<(), AppError> {
    let recipe = state
        .catalog()
        .find_recipe(id)
        .ok_or_else(|| AppError::NotFound(format!("recipe {id}")))?;
    out.emit(&RecipeDetailView::from(recipe), output::recipe_detail)
}

/// List blog posts in a category, in catalog order.
///
/// # Errors
///
/// Returns an error if output serialization fails.
pub fn blog(state: &AppState, category: &str, out: &Output) -> Result<(), AppError> {
    let views: Vec<BlogPostView> = filter_blog_posts(state.catalog().blog_posts(), category)
        .into_iter()
        .map(BlogPostView::summary)
        .collect();
    out.emit(&views, |v| output::post_list(v))
}

/// Show one blog post with its rendered content.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no post has this id or slug.
pub fn post(state: &AppState, id_or_slug: &str, out: &Output) -> Result<(), AppError> {
    let post = state
        .catalog()
        .find_blog_post(id_or_slug)
        .ok_or_else(|| AppError::NotFound(format!("post {id_or_slug}")))?;
    out.emit(&BlogPostView::full(post), output::post_detail)
}

#[derive(Serialize)]
struct StatusView<'a> {
    data_source: &'a str,
    storage_path: String,
    report: &'a LoadReport,
}

/// Report where each collection came from, optionally after a reload.
///
/// # Errors
///
/// Returns an error if output serialization fails.
pub async fn status(state: &mut AppState, retry: bool, out: &Output) -> Result<(), AppError> {
    if retry {
        info!("Reloading catalog");
        state.reload_catalog().await;
    }

    let view = StatusView {
        data_source: state.report().primary,
        storage_path: state.config().storage_path.display().to_string(),
        report: state.report(),
    };
    out.emit(&view, |v| {
        let mut text = format!(
            "Data source: {}\nCart storage: {}\n",
            v.data_source, v.storage_path
        );
        for collection in v.report.collections() {
            text.push_str(&format!(
                "  {:<11} {:>3} from {:?}\n",
                collection.collection.to_string(),
                collection.count,
                collection.origin
            ));
            for error in &collection.errors {
                text.push_str(&format!("      {error}\n"));
            }
        }
        text
    })
}
