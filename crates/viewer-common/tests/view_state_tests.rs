//! View state codec tests against a custom registry.

use std::collections::BTreeSet;
use viewer_common::layer::{BaseLayer, LayerRegistry, OverlayDef, OverlayKind};
use viewer_common::view_state::{ViewState, ViewStateCodec, DEFAULT_LAT, DEFAULT_LON, DEFAULT_ZOOM};

fn base(name: &str) -> BaseLayer {
    BaseLayer {
        name: name.to_string(),
        url_template: format!("/static/tiles/{}/{{z}}/{{x}}/{{y}}.png", name),
        attribution: String::new(),
        min_zoom: 0,
        max_zoom: 18,
    }
}

fn overlay(name: &str) -> OverlayDef {
    OverlayDef {
        name: name.to_string(),
        kind: OverlayKind::Spheres,
        source: format!("/static/shapes/{}.geojson", name),
        color: None,
        legacy_alias: None,
    }
}

fn registry() -> LayerRegistry {
    LayerRegistry::new(
        vec![base("Default"), base("X")],
        vec![overlay("B"), overlay("A"), overlay("Glaciers (1990)")],
        "Default",
    )
    .unwrap()
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_round_trip_preserves_state() {
    let registry = registry();
    let codec = ViewStateCodec::new(&registry);

    let state = ViewState {
        lat: 78.5,
        lon: 16.2,
        zoom: 9,
        base_layer: "X".to_string(),
        overlays: ["A", "B"].iter().map(|s| s.to_string()).collect(),
    };

    let decoded = codec.decode(&codec.encode(&state));
    assert_eq!(decoded.lat, 78.5);
    assert_eq!(decoded.lon, 16.2);
    assert_eq!(decoded.zoom, 9);
    assert_eq!(decoded.base_layer, "X");
    assert_eq!(decoded.overlays, state.overlays);
    assert_eq!(decoded, state);
}

#[test]
fn test_round_trip_with_awkward_coordinates() {
    let registry = registry();
    let codec = ViewStateCodec::new(&registry);

    let state = ViewState {
        lat: 77.123456789012,
        lon: -0.000001,
        zoom: 13,
        base_layer: "Default".to_string(),
        overlays: BTreeSet::from(["Glaciers (1990)".to_string()]),
    };

    let decoded = codec.decode(&codec.encode(&state));
    assert_eq!(decoded, state);
}

#[test]
fn test_overlays_encoded_in_registry_order() {
    let registry = registry();
    let codec = ViewStateCodec::new(&registry);

    let state = ViewState::default_for(&registry)
        .with_overlay("A")
        .with_overlay("B");

    let query = codec.encode(&state);
    let b = query.find("overlay=B").unwrap();
    let a = query.find("overlay=A").unwrap();
    assert!(b < a, "registry lists B before A: {}", query);
}

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn test_decode_empty() {
    let registry = registry();
    let state = ViewStateCodec::new(&registry).decode("");
    assert_eq!(state.lat, DEFAULT_LAT);
    assert_eq!(state.lon, DEFAULT_LON);
    assert_eq!(state.zoom, DEFAULT_ZOOM);
    assert_eq!(state.base_layer, "Default");
    assert!(state.overlays.is_empty());
}

#[test]
fn test_unknown_base_layer_falls_back() {
    let registry = registry();
    let state = ViewStateCodec::new(&registry).decode("base_layer=unknown");
    assert_eq!(state.base_layer, "Default");
}

#[test]
fn test_unknown_overlay_kept_raw_but_filtered_by_registry() {
    let registry = registry();
    let state = ViewStateCodec::new(&registry).decode("?overlay=A&overlay=Nope");

    assert!(state.overlays.contains("Nope"));
    let known: Vec<&str> = state
        .known_overlays(&registry)
        .iter()
        .map(|o| o.name.as_str())
        .collect();
    assert_eq!(known, vec!["A"]);
}

#[test]
fn test_percent_encoded_names_decode() {
    let registry = registry();
    let state =
        ViewStateCodec::new(&registry).decode("overlay=Glaciers%20%281990%29&lat=79.1&zoom=10");
    assert!(state.overlays.contains("Glaciers (1990)"));
    assert_eq!(state.lat, 79.1);
    assert_eq!(state.zoom, 10);
}
