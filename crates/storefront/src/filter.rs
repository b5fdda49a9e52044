//! Product and blog filtering.
//!
//! Filters are pure functions over catalog slices. They return references in
//! catalog order and never touch the catalog itself.

use fiber_fit_core::{BlogPost, Product};

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// A category selection: everything, or one exact category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter<'a> {
    #[default]
    All,
    Only(&'a str),
}

impl<'a> CategoryFilter<'a> {
    /// Parse a category argument. `"all"` and `None` select everything.
    #[must_use]
    pub fn parse(value: Option<&'a str>) -> Self {
        match value {
            None | Some(ALL_CATEGORIES) => Self::All,
            Some(category) => Self::Only(category),
        }
    }

    /// Exact, case-sensitive category match.
    #[must_use]
    pub fn matches(self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

/// Filter products by category, then by a free-text search term.
///
/// An absent or empty search term matches everything. Any other term is used
/// as given: a product matches when its name, description or any
/// health-benefit tag contains it, ignoring case.
#[must_use]
pub fn filter_products<'p>(
    products: &'p [Product],
    category: &str,
    search_term: Option<&str>,
) -> Vec<&'p Product> {
    let category = CategoryFilter::parse(Some(category));
    let needle = normalize_term(search_term);

    products
        .iter()
        .filter(|product| category.matches(&product.category))
        .filter(|product| needle.as_deref().is_none_or(|needle| product_matches(product, needle)))
        .collect()
}

/// Filter blog posts by category. `"all"` keeps every post.
#[must_use]
pub fn filter_blog_posts<'p>(posts: &'p [BlogPost], category: &str) -> Vec<&'p BlogPost> {
    let category = CategoryFilter::parse(Some(category));
    posts
        .iter()
        .filter(|post| category.matches(&post.category))
        .collect()
}

fn normalize_term(term: Option<&str>) -> Option<String> {
    term.filter(|term| !term.is_empty())
        .map(str::to_lowercase)
}

fn product_matches(product: &Product, needle: &str) -> bool {
    contains_ignore_case(&product.name, needle)
        || contains_ignore_case(&product.description, needle)
        || product
            .health_benefits
            .iter()
            .any(|benefit| contains_ignore_case(benefit, needle))
}

/// `needle` must already be lowercase.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
