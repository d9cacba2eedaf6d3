//! Router construction.

use axum::{routing::get, Extension, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::handlers;
use crate::state::AppState;

/// All routes of the viewer service.
pub fn build_router(state: Arc<AppState>, prometheus: PrometheusHandle) -> Router {
    let static_files = ServeDir::new(&state.static_dir);
    let favicon = ServeFile::new(state.static_dir.join("favicon.ico"));

    Router::new()
        // Pages
        .route("/", get(handlers::pages::index_handler))
        .route("/spheres/:filename", get(handlers::pages::sphere_page_handler))
        // JSON API
        .route("/api/view-state", get(handlers::api::view_state_handler))
        .route(
            "/api/view-state/encode",
            get(handlers::api::encode_view_state_handler),
        )
        .route("/api/layers", get(handlers::api::layers_handler))
        .route("/api/overlays/:name", get(handlers::api::overlay_handler))
        .route("/api/spheres/:filename", get(handlers::api::sphere_handler))
        .route("/api/share", get(handlers::api::share_handler))
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Static files
        .route_service("/favicon.ico", favicon)
        .nest_service("/static", static_files)
        // Middleware
        .layer(Extension(state))
        .layer(Extension(prometheus))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
