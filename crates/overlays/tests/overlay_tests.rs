//! End-to-end overlay loading from a static directory.

use overlays::{
    load_overlay, DatasetSource, FeatureSource, FileSource, HttpSource, OverlayState, SourceError,
};
use std::fs;
use tempfile::TempDir;
use viewer_common::{LayerRegistry, OverlayDef, OverlayKind, Rgb, ViewerError};

const SPHERES: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [15.6, 78.2]},
            "properties": {
                "filename": "a.jpg", "date": "2020-06-15", "label": "L",
                "author": "P", "thumbnail": "t.jpg"
            }
        },
        {
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [16.0, 78.5]},
            "properties": {
                "filename": "b.jpg", "date": "not a date", "label": "M",
                "author": "P", "thumbnail": "u.jpg"
            }
        },
        {"type": "Feature", "geometry": null, "properties": {"filename": "c.jpg"}}
    ]
}"#;

const GLACIERS: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "geometry": {"type": "Polygon", "coordinates": [[[15, 78], [15.2, 78], [15.2, 78.1], [15, 78]]]},
            "properties": {"NAME": "Aabreen", "Shape_Area": 1234000.0, "LENGTH": 1520.0}
        }
    ]
}"#;

fn static_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("shapes")).unwrap();
    fs::write(dir.path().join("shapes/spheres.geojson"), SPHERES).unwrap();
    fs::write(dir.path().join("shapes/glaciers.geojson"), GLACIERS).unwrap();
    fs::write(dir.path().join("shapes/broken.geojson"), "{ not json").unwrap();
    dir
}

fn glacier_overlay(source: &str) -> OverlayDef {
    OverlayDef {
        name: "Glaciers (1990)".to_string(),
        kind: OverlayKind::Glaciers,
        source: source.to_string(),
        color: Some(Rgb::new(0x00, 0x80, 0xff)),
        legacy_alias: None,
    }
}

#[tokio::test]
async fn test_sphere_overlay_skips_bad_features() {
    let dir = static_dir();
    let source = FileSource::new(dir.path());
    let registry = LayerRegistry::builtin();
    let spheres = &registry.overlays()[0];

    let overlay = load_overlay(spheres, &source).await.unwrap();

    assert_eq!(overlay.name, "Spherical (360) images");
    assert_eq!(overlay.items.len(), 1);
    assert_eq!(overlay.skipped, 2);

    let item = &overlay.items[0];
    let marker = item.marker.as_ref().unwrap();
    assert_eq!(marker.class_name, "pin-#6fcf96");
    assert!(item.shape.is_none());
    assert!(item.popup_html.contains("/spheres/a.jpg"));
}

#[tokio::test]
async fn test_glacier_polygons_get_outline_style() {
    let dir = static_dir();
    let source = FileSource::new(dir.path());

    let overlay = load_overlay(&glacier_overlay("/static/shapes/glaciers.geojson"), &source)
        .await
        .unwrap();

    let item = &overlay.items[0];
    assert!(item.marker.is_none());
    assert_eq!(item.shape.as_ref().unwrap().color.to_hex(), "#0080ff");
    assert_eq!(item.popup_html, "Name: Aabreen, Area: 1.2 km², Length: 1.5 km");
}

#[tokio::test]
async fn test_missing_dataset_is_an_explicit_failure() {
    let dir = static_dir();
    let source = FileSource::new(dir.path());
    let def = glacier_overlay("/static/shapes/absent.geojson");

    let err = load_overlay(&def, &source).await.unwrap_err();
    assert!(matches!(err, SourceError::NotFound(_)));

    let state = OverlayState::failed(&def.name, &err);
    assert!(!state.is_ready());
    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["status"], "failed");
    assert_eq!(json["name"], "Glaciers (1990)");
    assert!(json["error"].as_str().unwrap().contains("absent.geojson"));

    assert_eq!(ViewerError::from(err).http_status_code(), 502);
}

#[tokio::test]
async fn test_invalid_json_is_a_parse_error() {
    let dir = static_dir();
    let source = DatasetSource::new(FileSource::new(dir.path()), HttpSource::default());

    let err = source.fetch("/static/shapes/broken.geojson").await.unwrap_err();
    assert!(matches!(err, SourceError::Parse { .. }));
}

#[tokio::test]
async fn test_ready_state_serialization() {
    let dir = static_dir();
    let source = FileSource::new(dir.path());
    let registry = LayerRegistry::builtin();

    let overlay = load_overlay(&registry.overlays()[0], &source).await.unwrap();
    let json = serde_json::to_value(OverlayState::Ready(overlay)).unwrap();

    assert_eq!(json["status"], "ready");
    assert_eq!(json["items"][0]["geometry"]["type"], "Point");
    assert_eq!(json["items"][0]["marker"]["popup_anchor"][1], -10);
}
