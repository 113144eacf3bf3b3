//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the `/api` endpoints and serves the client-rendered
//! bundle as static files. Unknown paths fall back to `index.html` so the
//! client router can resolve them.

pub mod complaints;
pub mod runtime;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API routes consumed by the browser client.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/complaints/new-ref", get(complaints::new_ref))
        .route("/api/runtime-config", get(runtime::runtime_config))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Full application: API routes plus the static client bundle.
pub fn app(state: AppState) -> Router {
    let site_dir = state.config.site_dir.clone();
    let static_files = ServeDir::new(&site_dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(site_dir.join("index.html")));

    api_routes(state)
        .fallback_service(static_files)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
