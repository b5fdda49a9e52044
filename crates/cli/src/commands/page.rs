//! Page rendering command.

use fiber_fit_core::Page;
use fiber_fit_storefront::pages::{PageBody, PageQuery, PageView};
use fiber_fit_storefront::{AppError, AppState};

use crate::output::{self, Output};

/// Render a site page by slug. Unknown slugs render the home page.
///
/// # Errors
///
/// Returns an error if output serialization fails.
pub fn render(
    state: &AppState,
    slug: &str,
    category: Option<String>,
    search: Option<String>,
    out: &Output,
) -> Result<(), AppError> {
    let page = Page::from_slug(slug);
    let view = state.page(page, &PageQuery { category, search });
    out.emit(&view, page_text)
}

fn page_text(view: &PageView) -> String {
    let mut text = String::new();
    if let Some(notice) = view.notice {
        text.push_str(notice);
        text.push_str("\n\n");
    }
    text.push_str(&format!("== {} ==  (cart: {} items)\n\n", view.page, view.cart.item_count));

    match &view.body {
        PageBody::Home(home) => {
            text.push_str(&output::product_list(&home.products));
            if !home.featured_posts.is_empty() {
                text.push_str("\nFeatured:\n");
                text.push_str(&output::post_list(&home.featured_posts));
            }
        }
        PageBody::Products(products) => {
            text.push_str(&format!(
                "Categories: all, {}\n\n",
                products.categories.join(", ")
            ));
            text.push_str(&output::product_list(&products.products));
        }
        PageBody::Recipes(recipes) => text.push_str(&output::recipe_list(&recipes.recipes)),
        PageBody::WhyMillets(why) => {
            for row in &why.nutrition {
                let facts: Vec<String> = row
                    .nutritional_info
                    .iter()
                    .map(|(name, value)| format!("{name} {value}"))
                    .collect();
                text.push_str(&format!("{:<32} {}\n", row.product, facts.join(", ")));
            }
        }
        PageBody::Blog(blog) => text.push_str(&output::post_list(&blog.posts)),
        PageBody::Static(page) => {
            text.push_str(page.title);
            text.push('\n');
        }
    }
    text
}
