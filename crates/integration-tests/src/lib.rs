//! Integration test helpers for the Fiber Fit storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fiber-fit-integration-tests
//! ```
//!
//! No external services are needed. Remote catalog tests start a
//! [`StubServer`] on an ephemeral local port that serves whatever payloads
//! the test gives it.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::time::Duration;

use axum::Router;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::task::JoinHandle;
use url::Url;

use fiber_fit_storefront::catalog::{Collection, EmbeddedSource};
use fiber_fit_storefront::config::{DataSourceConfig, StorefrontConfig};

/// What the stub server answers for one collection.
#[derive(Debug, Clone)]
pub enum StubResponse {
    /// 200 with this JSON body.
    Json(String),
    /// An empty response with this status.
    Status(u16),
}

impl StubResponse {
    /// The bundled payload for `collection`.
    #[must_use]
    pub fn bundled(collection: Collection) -> Self {
        Self::Json(EmbeddedSource::payload(collection).to_string())
    }
}

impl IntoResponse for StubResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Json(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
            Self::Status(code) => StatusCode::from_u16(code)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
                .into_response(),
        }
    }
}

/// A local HTTP server standing in for the catalog host.
///
/// Payloads are served under `/site/data/*.json`; anything not configured
/// returns 404. The server stops when dropped.
pub struct StubServer {
    base_url: Url,
    handle: JoinHandle<()>,
}

impl StubServer {
    /// Start a server answering `routes`.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start(routes: impl IntoIterator<Item = (Collection, StubResponse)>) -> Self {
        let mut app = Router::new();
        for (collection, response) in routes {
            app = app.route(
                &format!("/site/{}", collection.path()),
                get(move || {
                    let response = response.clone();
                    async move { response }
                }),
            );
        }

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub server");
        let addr = listener.local_addr().expect("Failed to read stub address");

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let base_url =
            Url::parse(&format!("http://{addr}/site/")).expect("Stub base URL should parse");
        Self { base_url, handle }
    }

    /// Start a server serving the bundled dataset for every collection.
    pub async fn bundled() -> Self {
        Self::start(Collection::ALL.map(|c| (c, StubResponse::bundled(c)))).await
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Configuration pointing the remote source at this server.
    #[must_use]
    pub fn config(&self, storage_path: &Path) -> StorefrontConfig {
        StorefrontConfig {
            data_source: DataSourceConfig::Remote {
                base_url: self.base_url.clone(),
            },
            fetch_timeout: Duration::from_secs(5),
            storage_path: storage_path.to_path_buf(),
            ..StorefrontConfig::default()
        }
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Configuration using only the bundled dataset.
#[must_use]
pub fn embedded_config(storage_path: &Path) -> StorefrontConfig {
    StorefrontConfig {
        data_source: DataSourceConfig::Embedded,
        storage_path: storage_path.to_path_buf(),
        ..StorefrontConfig::default()
    }
}
