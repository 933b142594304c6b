//! HTTP server setup and routing.

use std::path::Path;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use lift_data::store::DataStore;
use tower_http::compression::CompressionLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared application context passed to all handlers.
///
/// `AppContext` implements `Clone`, which gives us `FromRef<AppContext>`
/// for free via Axum's blanket implementation.
#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<DataStore>,
}

/// Build the router: JSON data endpoints, multipart upload, static client
/// assets, gzip compression and request tracing.
pub fn build_router(ctx: AppContext, assets_dir: &Path) -> Router {
    Router::new()
        .route("/api/data", get(handlers::all_data))
        .route("/api/data/:user", get(handlers::user_data))
        .route("/upload", post(handlers::upload))
        .nest_service("/assets", ServeDir::new(assets_dir))
        .route_service("/", ServeFile::new(assets_dir.join("index.html")))
        .layer(DefaultBodyLimit::max(10 << 20))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
