//! Catalog data sources.
//!
//! A [`DataSource`] returns the raw JSON payload for one [`Collection`].
//! Three implementations exist:
//!
//! - [`RemoteSource`] - HTTP fetch relative to a base URL (`reqwest`)
//! - [`DirectorySource`] - local files under a base directory (`tokio::fs`)
//! - [`EmbeddedSource`] - payloads compiled into the binary, used as the fallback
//!
//! [`ConfiguredSource`] wraps whichever one the configuration selects.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::{DataSourceConfig, StorefrontConfig};

/// The three catalog collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Products,
    Recipes,
    BlogPosts,
}

impl Collection {
    pub const ALL: [Self; 3] = [Self::Products, Self::Recipes, Self::BlogPosts];

    /// Conventional path of the payload relative to the site root.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Products => "data/products.json",
            Self::Recipes => "data/recipes.json",
            Self::BlogPosts => "data/blog-posts.json",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Products => write!(f, "products"),
            Self::Recipes => write!(f, "recipes"),
            Self::BlogPosts => write!(f, "blog posts"),
        }
    }
}

/// Errors raised while fetching or decoding one collection.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The payload URL could not be built from the base URL.
    #[error("invalid URL for {collection}: {source}")]
    Url {
        collection: Collection,
        #[source]
        source: url::ParseError,
    },

    /// Transport-level HTTP failure (connect, timeout, body read).
    #[error("HTTP error fetching {collection}: {source}")]
    Http {
        collection: Collection,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{collection} request returned HTTP {status}")]
    Status { collection: Collection, status: u16 },

    /// Reading a local payload file failed.
    #[error("IO error reading {collection} from {path}: {source}")]
    Io {
        collection: Collection,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload was not valid JSON of the expected shape.
    #[error("failed to parse {collection}: {source}")]
    Parse {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    /// The source cannot serve this collection at all.
    #[error("{collection} unavailable from {source_name}")]
    Unavailable {
        collection: Collection,
        source_name: &'static str,
    },
}

/// A provider of raw catalog payloads.
pub trait DataSource {
    /// Short name used in logs and load reports.
    fn name(&self) -> &'static str;

    /// Whether the source can be used at all.
    ///
    /// The loader skips an unavailable primary source and goes straight to
    /// the fallback instead of attempting three doomed fetches.
    fn is_available(&self) -> bool {
        true
    }

    /// Fetch the raw JSON payload for `collection`.
    fn fetch(&self, collection: Collection)
    -> impl Future<Output = Result<String, LoadError>> + Send;
}

// =============================================================================
// RemoteSource
// =============================================================================

/// Fetches payloads over HTTP relative to a base URL.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: reqwest::Client,
    base_url: Url,
}

impl RemoteSource {
    /// Create a remote source.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the HTTP client cannot be built (e.g. no
    /// TLS backend could be initialized).
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }
}

impl DataSource for RemoteSource {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn fetch(&self, collection: Collection) -> Result<String, LoadError> {
        let url = self
            .base_url
            .join(collection.path())
            .map_err(|source| LoadError::Url { collection, source })?;

        debug!(%url, %collection, "Fetching catalog payload");

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| LoadError::Http { collection, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                collection,
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|source| LoadError::Http { collection, source })
    }
}

// =============================================================================
// DirectorySource
// =============================================================================

/// Reads payloads from a local directory laid out like the site root.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DataSource for DirectorySource {
    fn name(&self) -> &'static str {
        "directory"
    }

    fn is_available(&self) -> bool {
        self.root.join("data").is_dir()
    }

    async fn fetch(&self, collection: Collection) -> Result<String, LoadError> {
        let path = self.root.join(collection.path());
        debug!(path = %path.display(), %collection, "Reading catalog payload");

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| LoadError::Io {
                collection,
                path,
                source,
            })
    }
}

// =============================================================================
// EmbeddedSource
// =============================================================================

const EMBEDDED_PRODUCTS: &str = include_str!("../../data/products.json");
const EMBEDDED_RECIPES: &str = include_str!("../../data/recipes.json");
const EMBEDDED_BLOG_POSTS: &str = include_str!("../../data/blog-posts.json");

/// The dataset bundled with the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl EmbeddedSource {
    /// The bundled payload for `collection`.
    #[must_use]
    pub const fn payload(collection: Collection) -> &'static str {
        match collection {
            Collection::Products => EMBEDDED_PRODUCTS,
            Collection::Recipes => EMBEDDED_RECIPES,
            Collection::BlogPosts => EMBEDDED_BLOG_POSTS,
        }
    }
}

impl DataSource for EmbeddedSource {
    fn name(&self) -> &'static str {
        "embedded"
    }

    async fn fetch(&self, collection: Collection) -> Result<String, LoadError> {
        Ok(Self::payload(collection).to_string())
    }
}

// =============================================================================
// ConfiguredSource
// =============================================================================

/// The primary source selected by [`StorefrontConfig::data_source`].
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    Remote(RemoteSource),
    Directory(DirectorySource),
    Embedded(EmbeddedSource),
}

impl ConfiguredSource {
    /// Build the configured primary source.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if a remote source's HTTP client cannot be built.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, reqwest::Error> {
        Ok(match &config.data_source {
            DataSourceConfig::Remote { base_url } => {
                Self::Remote(RemoteSource::new(base_url.clone(), config.fetch_timeout)?)
            }
            DataSourceConfig::Directory { root } => {
                Self::Directory(DirectorySource::new(root.clone()))
            }
            DataSourceConfig::Embedded => Self::Embedded(EmbeddedSource),
        })
    }
}

impl DataSource for ConfiguredSource {
    fn name(&self) -> &'static str {
        match self {
            Self::Remote(source) => source.name(),
            Self::Directory(source) => source.name(),
            Self::Embedded(source) => source.name(),
        }
    }

    fn is_available(&self) -> bool {
        match self {
            Self::Remote(source) => source.is_available(),
            Self::Directory(source) => source.is_available(),
            Self::Embedded(source) => source.is_available(),
        }
    }

    async fn fetch(&self, collection: Collection) -> Result<String, LoadError> {
        match self {
            Self::Remote(source) => source.fetch(collection).await,
            Self::Directory(source) => source.fetch(collection).await,
            Self::Embedded(source) => source.fetch(collection).await,
        }
    }
}
