//! Requests against the full router, backed by a scratch static directory.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use viewer::config::ViewerConfig;
use viewer::routes::build_router;
use viewer::state::AppState;
use viewer_common::{OverlayDef, OverlayKind, DEFAULT_BASE_LAYER, SPHERES_OVERLAY};

const SPHERES: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [15.6, 78.2]},
            "properties": {
                "filename": "a.jpg", "date": "2020-06-15", "label": "Åbreen",
                "author": "P", "thumbnail": "static/sphere-thumbnails/a.thumbnail"
            }
        }
    ]
}"#;

fn setup(config: ViewerConfig) -> (TempDir, Router) {
    setup_with_metrics(config, PrometheusBuilder::new().build_recorder().handle())
}

fn setup_with_metrics(config: ViewerConfig, handle: PrometheusHandle) -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("shapes")).unwrap();
    std::fs::write(dir.path().join("shapes/spheres.geojson"), SPHERES).unwrap();
    std::fs::write(dir.path().join("favicon.ico"), b"icon").unwrap();

    let state = Arc::new(AppState::new(&config, dir.path()).unwrap());
    (dir, build_router(state, handle))
}

fn with_missing_overlay() -> ViewerConfig {
    let mut config = ViewerConfig::default();
    config.overlays.push(OverlayDef {
        name: "Glaciers (1990)".to_string(),
        kind: OverlayKind::Glaciers,
        source: "/static/shapes/glaciers_1990.geojson".to_string(),
        color: None,
        legacy_alias: None,
    });
    config
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .uri(uri)
        .header(header::HOST, "viewer.test")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

// ============================================================================
// View state
// ============================================================================

#[tokio::test]
async fn test_view_state_defaults() {
    let (_dir, app) = setup(ViewerConfig::default());
    let (status, json) = get_json(&app, "/api/view-state").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["lat"], 78.0);
    assert_eq!(json["lon"], 16.0);
    assert_eq!(json["zoom"], 7);
    assert_eq!(json["base_layer"], DEFAULT_BASE_LAYER);
    assert_eq!(json["overlays"], serde_json::json!([]));
}

#[tokio::test]
async fn test_view_state_legacy_layers_parameter() {
    let (_dir, app) = setup(ViewerConfig::default());
    let (_, json) = get_json(&app, "/api/view-state?layers=spheres&zoom=10&lat=abc").await;

    assert_eq!(json["overlays"], serde_json::json!([SPHERES_OVERLAY]));
    assert_eq!(json["zoom"], 10);
    assert_eq!(json["lat"], 78.0);
}

#[tokio::test]
async fn test_layers_lists_registry() {
    let (_dir, app) = setup(with_missing_overlay());
    let (status, json) = get_json(&app, "/api/layers").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["default_base_layer"], DEFAULT_BASE_LAYER);
    assert_eq!(json["overlays"].as_array().unwrap().len(), 2);
}

// ============================================================================
// Overlays
// ============================================================================

#[tokio::test]
async fn test_sphere_overlay_is_ready() {
    let (_dir, app) = setup(ViewerConfig::default());
    let (status, json) = get_json(&app, "/api/overlays/Spherical%20(360)%20images").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ready");
    assert_eq!(json["items"].as_array().unwrap().len(), 1);
    assert_eq!(json["skipped"], 0);
}

#[tokio::test]
async fn test_missing_dataset_is_reported_as_failed_overlay() {
    let (_dir, app) = setup(with_missing_overlay());
    let (status, json) = get_json(&app, "/api/overlays/Glaciers%20(1990)").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["status"], "failed");
    assert_eq!(json["name"], "Glaciers (1990)");
}

#[tokio::test]
async fn test_unknown_overlay_is_not_found() {
    let (_dir, app) = setup(ViewerConfig::default());
    let (status, json) = get_json(&app, "/api/overlays/Nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
}

// ============================================================================
// Spheres
// ============================================================================

#[tokio::test]
async fn test_sphere_metadata() {
    let (_dir, app) = setup(ViewerConfig::default());
    let (status, json) = get_json(&app, "/api/spheres/a.jpg").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["label"], "Åbreen");
    assert_eq!(json["author"], "P");

    let (status, _) = get_json(&app, "/api/spheres/b.jpg").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sphere_page_caption() {
    let (_dir, app) = setup(ViewerConfig::default());
    let (status, html) = get(&app, "/spheres/a.jpg").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Åbreen, 2020-06-15. Photographer: P"));
    assert!(html.contains("/static/spheres/a.jpg"));
}

#[tokio::test]
async fn test_unknown_sphere_page() {
    let (_dir, app) = setup(ViewerConfig::default());
    let (status, html) = get(&app, "/spheres/missing.jpg").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("missing.jpg"));
}

// ============================================================================
// Share links
// ============================================================================

#[tokio::test]
async fn test_share_link_uses_request_host() {
    let (_dir, app) = setup(ViewerConfig::default());
    let (status, json) = get_json(&app, "/api/share?lat=78.5&lon=16.2&zoom=9").await;

    assert_eq!(status, StatusCode::OK);
    let url = json["url"].as_str().unwrap();
    assert!(url.starts_with("http://viewer.test/?"));
    assert!(url.contains("lat=78.5"));
    assert!(url.contains("zoom=9"));
    assert!(json["panel_html"].as_str().unwrap().contains("share-popup-close"));
}

#[tokio::test]
async fn test_share_link_uses_public_url() {
    let config = ViewerConfig {
        public_url: Some("https://spheres.example.org/map?old=1".to_string()),
        ..ViewerConfig::default()
    };
    let (_dir, app) = setup(config);
    let (_, json) = get_json(&app, "/api/share").await;

    let url = json["url"].as_str().unwrap();
    assert!(url.starts_with("https://spheres.example.org/map?"));
    assert!(!url.contains("old=1"));
}

#[tokio::test]
async fn test_share_link_uses_reporting_page() {
    let (_dir, app) = setup(ViewerConfig::default());
    let (status, json) = get_json(
        &app,
        "/api/share?lat=78.5&page=https%3A%2F%2Fspheres.example.org%2Fsvalbard%2F",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let url = json["url"].as_str().unwrap();
    assert!(url.starts_with("https://spheres.example.org/svalbard/?"));
    assert!(url.contains("lat=78.5"));
    assert!(!url.contains("page="));
}

#[tokio::test]
async fn test_share_link_rejects_relative_page() {
    let (_dir, app) = setup(ViewerConfig::default());
    let (status, _) = get_json(&app, "/api/share?page=%2Fsvalbard%2F").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_encode_view_state_is_canonical() {
    let (_dir, app) = setup(ViewerConfig::default());
    let (status, json) =
        get_json(&app, "/api/view-state/encode?zoom=9&overlay=Nope&layers=spheres").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["query"],
        "base_layer=NPI+Basiskart+%2820m%29&overlay=Spherical+%28360%29+images&lat=78&lon=16&zoom=9"
    );
    assert!(json.get("panel_html").is_none());
}

#[test]
fn test_only_share_requests_count_as_shares() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let (_dir, app) = setup_with_metrics(ViewerConfig::default(), recorder.handle());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    metrics::with_local_recorder(&recorder, || {
        runtime.block_on(async {
            for zoom in 8..11 {
                get(&app, &format!("/api/view-state/encode?zoom={}", zoom)).await;
            }
            get(&app, "/api/share?zoom=10").await;
        })
    });

    let rendered = recorder.handle().render();
    assert!(rendered.contains("viewer_share_links_total 1"));
}

// ============================================================================
// Pages, static files, health
// ============================================================================

#[tokio::test]
async fn test_index_embeds_view_state() {
    let (_dir, app) = setup(ViewerConfig::default());
    let (status, html) = get(&app, "/?zoom=11").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("\"zoom\":11"));
    assert!(html.contains("/static/js/viewer.js"));
}

#[tokio::test]
async fn test_static_files_and_favicon() {
    let (_dir, app) = setup(ViewerConfig::default());

    let (status, body) = get(&app, "/static/shapes/spheres.geojson").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("a.jpg"));

    let (status, body) = get(&app, "/favicon.ico").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "icon");
}

#[tokio::test]
async fn test_health() {
    let (_dir, app) = setup(ViewerConfig::default());
    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[test]
fn test_invalid_public_url_is_rejected_at_startup() {
    let dir = TempDir::new().unwrap();
    let config = ViewerConfig {
        public_url: Some("not a url".to_string()),
        ..ViewerConfig::default()
    };
    assert!(AppState::new(&config, dir.path()).is_err());
}
