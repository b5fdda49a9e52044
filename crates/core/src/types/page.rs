//! Site page variants.

use serde::{Deserialize, Serialize};

/// Every page the storefront renders.
///
/// Parsing is total: unknown slugs resolve to [`Page::Index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    #[default]
    Index,
    Products,
    Recipes,
    WhyMillets,
    Blog,
    Story,
    Contact,
}

impl Page {
    /// All pages, in navigation order.
    pub const ALL: [Self; 7] = [
        Self::Index,
        Self::Products,
        Self::Recipes,
        Self::WhyMillets,
        Self::Blog,
        Self::Story,
        Self::Contact,
    ];

    /// Resolve a page slug (`"products"`, `"blog.html"`), defaulting to the index.
    #[must_use]
    pub fn from_slug(slug: &str) -> Self {
        let slug = slug.trim().trim_end_matches(".html");
        match slug {
            "products" => Self::Products,
            "recipes" => Self::Recipes,
            "why-millets" => Self::WhyMillets,
            "blog" => Self::Blog,
            "story" => Self::Story,
            "contact" => Self::Contact,
            _ => Self::Index,
        }
    }

    /// Canonical slug for the page.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Products => "products",
            Self::Recipes => "recipes",
            Self::WhyMillets => "why-millets",
            Self::Blog => "blog",
            Self::Story => "story",
            Self::Contact => "contact",
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for Page {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_slug(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_slug(page.slug()), page);
        }
    }

    #[test]
    fn test_unknown_and_html_slugs() {
        assert_eq!(Page::from_slug("blog.html"), Page::Blog);
        assert_eq!(Page::from_slug(""), Page::Index);
        assert_eq!(Page::from_slug("checkout"), Page::Index);
    }
}
