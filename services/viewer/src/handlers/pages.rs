//! Map and panorama page handlers.

use axum::{
    extract::{Extension, Path, RawQuery},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;
use viewer_common::ViewerError;

use crate::error::ApiError;
use crate::metrics::record_page_view;
use crate::pages::{map_page, not_found_page, sphere_page};
use crate::state::AppState;

/// GET / - The map, opened at the view described by the query string
pub async fn index_handler(
    Extension(state): Extension<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, ApiError> {
    record_page_view("map");

    let view = state.codec().decode(query.as_deref().unwrap_or_default());
    let html = map_page(&view, &state.registry)?;
    Ok(Html(html))
}

/// GET /spheres/:filename - Panorama viewer for one image
pub async fn sphere_page_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Response {
    record_page_view("sphere");

    match state.sphere(&filename).await {
        Ok(sphere) => Html(sphere_page(&sphere)).into_response(),
        Err(ViewerError::SphereNotFound(_)) => {
            (StatusCode::NOT_FOUND, Html(not_found_page(&filename))).into_response()
        }
        Err(e) => {
            warn!(filename = %filename, error = %e, "Failed to look up sphere");
            ApiError(e).into_response()
        }
    }
}
