//! Fixture development server
//!
//! Serves testimonial fixtures on the same endpoint the widget fetches from,
//! plus a `/preview` page that runs the full bootstrap headlessly with the
//! query string as embed attributes.
//!
//! ```text
//! GET /api/testimonials?slug=acme      -> JSON array of testimonials
//! GET /preview?slug=acme&layout=grid   -> rendered HTML page
//! GET /health                          -> ok
//! ```

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};

use testimania::fixture::{FixtureStore, FixtureTransport};
use testimania::host::HeadlessHost;
use testimania::loader::ENDPOINT_PATH;
use testimania::widget::bootstrap;

use crate::config::attribute_name;
use crate::error::{CliError, CliResult};

/// Dev server configuration
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable permissive CORS
    pub cors: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors: true,
        }
    }
}

/// Shared handler state
#[derive(Debug, Clone)]
struct AppState {
    store: Arc<FixtureStore>,
}

/// Fixture server
#[derive(Debug)]
pub struct DevServer {
    config: DevServerConfig,
    store: Arc<FixtureStore>,
}

impl DevServer {
    /// Create a new dev server over a fixture store
    #[must_use]
    pub fn new(config: DevServerConfig, store: FixtureStore) -> Self {
        Self {
            config,
            store: Arc::new(store),
        }
    }

    /// Base URL clients should use
    #[must_use]
    pub fn http_url(&self) -> String {
        format!("http://{}:{}", self.config.host, self.config.port)
    }

    /// The server's routes
    #[must_use]
    pub fn router(&self) -> Router {
        router(Arc::clone(&self.store), self.config.cors)
    }

    /// Serves until the process is stopped
    pub async fn run(&self) -> CliResult<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| CliError::invalid_argument(format!("bad listen address: {e}")))?;
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| CliError::server(format!("cannot bind {addr}: {e}")))?;

        tracing::info!(
            %addr,
            collections = self.store.len(),
            cors = self.config.cors,
            "fixture server listening"
        );
        axum::serve(listener, self.router())
            .await
            .map_err(|e| CliError::server(e.to_string()))
    }
}

/// Builds the fixture router
pub fn router(store: Arc<FixtureStore>, cors: bool) -> Router {
    let app = Router::new()
        .route(ENDPOINT_PATH, get(testimonials))
        .route("/preview", get(preview))
        .route("/health", get(health))
        .with_state(AppState { store });

    if cors {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        app
    }
}

#[derive(Debug, Deserialize)]
struct SlugQuery {
    slug: Option<String>,
}

async fn testimonials(State(state): State<AppState>, Query(query): Query<SlugQuery>) -> Response {
    let Some(slug) = query.slug.filter(|s| !s.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "slug is required" })),
        )
            .into_response();
    };
    let items = state.store.get(&slug);
    tracing::debug!(slug = %slug, count = items.len(), "serving fixtures");
    Json(items).into_response()
}

async fn preview(
    State(state): State<AppState>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Response {
    let mut host = HeadlessHost::new().with_attributes(
        params
            .into_iter()
            .map(|(name, value)| (attribute_name(&name), value)),
    );
    let transport = FixtureTransport::new(Arc::clone(&state.store));

    match bootstrap(&mut host, &transport).await {
        Ok(mounted) => {
            let title = format!("{} testimonials", mounted.config.collection_id);
            Html(host.page_html(&title)).into_response()
        }
        Err(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    }
}

async fn health() -> &'static str {
    "ok"
}
