//! JSON API used by the browser shell.

use axum::{
    extract::{Extension, Path, Query, RawQuery},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use overlays::{load_overlay, OverlayState};
use viewer_common::{LayerRegistry, ShareLink, SphereProperties, ViewState, ViewerError};

use crate::error::ApiError;
use crate::metrics::{record_overlay_build, record_overlay_failure, record_share_link};
use crate::state::AppState;

/// GET /api/view-state - Decode a query string into a full view state
pub async fn view_state_handler(
    Extension(state): Extension<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Json<ViewState> {
    Json(state.codec().decode(query.as_deref().unwrap_or_default()))
}

/// GET /api/layers - Registered base layers and overlays
pub async fn layers_handler(Extension(state): Extension<Arc<AppState>>) -> Json<LayerRegistry> {
    Json(state.registry.clone())
}

/// GET /api/overlays/:name - Build one overlay
///
/// A failed fetch is answered with the overlay's failed state and a 502, so
/// the shell can show a notice instead of silently omitting the layer.
pub async fn overlay_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let def = state
        .registry
        .overlay(&name)
        .ok_or_else(|| ViewerError::OverlayNotFound(name.clone()))?;

    match load_overlay(def, &state.source).await {
        Ok(overlay) => {
            record_overlay_build(&def.name);
            Ok(Json(OverlayState::Ready(overlay)).into_response())
        }
        Err(e) => {
            record_overlay_failure(&def.name);
            tracing::error!(overlay = %def.name, error = %e, "Overlay failed to load");
            let body = OverlayState::failed(&def.name, &e);
            let status = StatusCode::from_u16(ViewerError::from(e).http_status_code())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            Ok((status, Json(body)).into_response())
        }
    }
}

/// GET /api/spheres/:filename - Metadata of one sphere
pub async fn sphere_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<SphereProperties>, ApiError> {
    Ok(Json(state.sphere(&filename).await?))
}

/// Query parameters of the share endpoint besides the view state.
#[derive(Debug, Default, Deserialize)]
pub struct ShareParams {
    /// `location.origin + location.pathname` of the page asking for the link
    pub page: Option<String>,
}

/// GET /api/share - Share link for the view state in the query string
///
/// Links point at the configured public URL, else at the `page` the shell
/// reports, else at this host.
pub async fn share_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<ShareParams>,
    RawQuery(query): RawQuery,
) -> Result<Json<ShareLink>, ApiError> {
    let page_url = match (&state.public_url, params.page) {
        (Some(public), _) => public.clone(),
        (None, Some(page)) => page,
        (None, None) => {
            let host = headers
                .get(header::HOST)
                .and_then(|h| h.to_str().ok())
                .unwrap_or("localhost");
            format!("http://{}/", host)
        }
    };

    let controller = state.share_controller(&page_url)?;
    let view = state.codec().decode(query.as_deref().unwrap_or_default());
    let link = controller.share(&view);

    record_share_link();
    info!(url = %link.url, "Created share link");

    Ok(Json(link))
}

/// Canonical query string for a view state.
#[derive(Debug, Serialize)]
pub struct EncodedViewState {
    pub query: String,
}

/// GET /api/view-state/encode - Canonical query for the view state in the query string
///
/// Used by the shell to keep the address bar in sync; not a share.
pub async fn encode_view_state_handler(
    Extension(state): Extension<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Json<EncodedViewState> {
    let codec = state.codec();
    let view = codec.decode(query.as_deref().unwrap_or_default());
    let query = codec.encode(&view);
    debug!(query = %query, "Encoded view state");
    Json(EncodedViewState { query })
}
