//! Page dispatch.
//!
//! Each [`Page`] variant has exactly one handler producing its body. Every
//! page also carries the cart summary and, when the catalog failed to load
//! from every source, a generic load-failure notice.

use std::collections::BTreeMap;

use serde::Serialize;

use fiber_fit_core::{CartLineItem, Page};

use crate::catalog::{CatalogStore, LoadReport};
use crate::filter::{ALL_CATEGORIES, filter_blog_posts, filter_products};
use crate::views::{BlogPostView, CartView, ProductCardView, RecipeCardView};

/// Notice shown when nothing at all could be loaded.
pub const LOAD_FAILURE_NOTICE: &str = "Failed to load data. Please refresh the page.";

/// Number of products shown on the home page.
const HOME_PRODUCT_COUNT: usize = 4;

/// Listing parameters taken from the request.
#[derive(Debug, Clone, Default)]
pub struct PageQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl PageQuery {
    fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(ALL_CATEGORIES)
    }
}

/// Everything a page handler reads.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub catalog: &'a CatalogStore,
    pub report: &'a LoadReport,
    pub cart: &'a [CartLineItem],
    pub query: &'a PageQuery,
}

/// A rendered page.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub page: Page,
    pub cart: CartView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
    pub body: PageBody,
}

/// Page-specific content.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PageBody {
    Home(HomeView),
    Products(ProductsView),
    Recipes(RecipesView),
    WhyMillets(WhyMilletsView),
    Blog(BlogView),
    Static(StaticView),
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub products: Vec<ProductCardView>,
    pub featured_posts: Vec<BlogPostView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductsView {
    pub categories: Vec<String>,
    pub selected_category: String,
    pub search: Option<String>,
    pub products: Vec<ProductCardView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipesView {
    pub recipes: Vec<RecipeCardView>,
}

/// Nutrition facts for one millet product.
#[derive(Debug, Clone, Serialize)]
pub struct NutritionRow {
    pub product: String,
    pub millet_type: Option<String>,
    pub nutritional_info: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WhyMilletsView {
    pub nutrition: Vec<NutritionRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogView {
    pub categories: Vec<String>,
    pub selected_category: String,
    pub posts: Vec<BlogPostView>,
}

/// A page with no catalog content.
#[derive(Debug, Clone, Serialize)]
pub struct StaticView {
    pub title: &'static str,
}

/// Render `page` from the current state.
#[must_use]
pub fn render(page: Page, ctx: PageContext<'_>) -> PageView {
    let body = match page {
        Page::Index => home(ctx),
        Page::Products => products(ctx),
        Page::Recipes => recipes(ctx),
        Page::WhyMillets => why_millets(ctx),
        Page::Blog => blog(ctx),
        Page::Story => story(),
        Page::Contact => contact(),
    };

    PageView {
        page,
        cart: CartView::from_lines(ctx.cart),
        notice: ctx
            .report
            .is_total_failure()
            .then_some(LOAD_FAILURE_NOTICE),
        body,
    }
}

fn home(ctx: PageContext<'_>) -> PageBody {
    PageBody::Home(HomeView {
        products: ctx
            .catalog
            .products()
            .iter()
            .take(HOME_PRODUCT_COUNT)
            .map(ProductCardView::from)
            .collect(),
        featured_posts: ctx
            .catalog
            .featured_posts()
            .map(BlogPostView::summary)
            .collect(),
    })
}

fn products(ctx: PageContext<'_>) -> PageBody {
    let selected = ctx.query.category();
    let matches = filter_products(
        ctx.catalog.products(),
        selected,
        ctx.query.search.as_deref(),
    );

    PageBody::Products(ProductsView {
        categories: ctx
            .catalog
            .product_categories()
            .into_iter()
            .map(str::to_string)
            .collect(),
        selected_category: selected.to_string(),
        search: ctx.query.search.clone(),
        products: matches.into_iter().map(ProductCardView::from).collect(),
    })
}

fn recipes(ctx: PageContext<'_>) -> PageBody {
    PageBody::Recipes(RecipesView {
        recipes: ctx
            .catalog
            .recipes()
            .iter()
            .map(RecipeCardView::from)
            .collect(),
    })
}

fn why_millets(ctx: PageContext<'_>) -> PageBody {
    PageBody::WhyMillets(WhyMilletsView {
        nutrition: ctx
            .catalog
            .products()
            .iter()
            .filter(|p| !p.nutritional_info.is_empty())
            .map(|p| NutritionRow {
                product: p.name.clone(),
                millet_type: p.millet_type.clone(),
                nutritional_info: p.nutritional_info.clone(),
            })
            .collect(),
    })
}

fn blog(ctx: PageContext<'_>) -> PageBody {
    let selected = ctx.query.category();

    PageBody::Blog(BlogView {
        categories: ctx
            .catalog
            .blog_categories()
            .into_iter()
            .map(str::to_string)
            .collect(),
        selected_category: selected.to_string(),
        posts: filter_blog_posts(ctx.catalog.blog_posts(), selected)
            .into_iter()
            .map(BlogPostView::summary)
            .collect(),
    })
}

const fn story() -> PageBody {
    PageBody::Static(StaticView { title: "Our Story" })
}

const fn contact() -> PageBody {
    PageBody::Static(StaticView {
        title: "Contact Us",
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{DataLoader, EmbeddedSource};

    async fn bundled() -> (CatalogStore, LoadReport) {
        let load = DataLoader::new(EmbeddedSource, EmbeddedSource).load().await;
        (load.catalog, load.report)
    }

    #[tokio::test]
    async fn test_every_page_renders() {
        let (catalog, report) = bundled().await;
        let query = PageQuery::default();
        let ctx = PageContext {
            catalog: &catalog,
            report: &report,
            cart: &[],
            query: &query,
        };

        for page in Page::ALL {
            let view = render(page, ctx);
            assert_eq!(view.page, page);
            assert!(view.notice.is_none());
            assert!(view.cart.is_empty());
        }
    }

    #[tokio::test]
    async fn test_products_page_applies_query() {
        let (catalog, report) = bundled().await;
        let query = PageQuery {
            category: Some("flour".to_string()),
            search: Some("ragi".to_string()),
        };
        let ctx = PageContext {
            catalog: &catalog,
            report: &report,
            cart: &[],
            query: &query,
        };

        let PageBody::Products(view) = render(Page::Products, ctx).body else {
            panic!("products page should render a product listing");
        };
        assert_eq!(view.products.len(), 1);
        assert_eq!(view.products[0].name, "Organic Ragi Flour");
        assert_eq!(view.selected_category, "flour");
        assert!(view.categories.contains(&"grain".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_slug_renders_home() {
        let (catalog, report) = bundled().await;
        let query = PageQuery::default();
        let ctx = PageContext {
            catalog: &catalog,
            report: &report,
            cart: &[],
            query: &query,
        };

        let view = render(Page::from_slug("nope.html"), ctx);
        assert!(matches!(view.body, PageBody::Home(ref home) if home.products.len() == 4));
        assert_eq!(
            serde_json::to_value(&view).unwrap()["body"]["kind"],
            "home"
        );
    }

    #[tokio::test]
    async fn test_total_failure_shows_notice() {
        let (_, mut report) = bundled().await;
        for collection in [
            &mut report.products,
            &mut report.recipes,
            &mut report.blog_posts,
        ] {
            collection.origin = crate::catalog::Origin::Empty;
        }
        let catalog = CatalogStore::default();
        let query = PageQuery::default();
        let ctx = PageContext {
            catalog: &catalog,
            report: &report,
            cart: &[],
            query: &query,
        };

        assert_eq!(render(Page::Blog, ctx).notice, Some(LOAD_FAILURE_NOTICE));
    }
}
