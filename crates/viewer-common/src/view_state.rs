//! Shareable map view state and its URL query encoding.
//!
//! Query parameters:
//! - `base_layer` - single value, the active base layer
//! - `overlay` - repeated, one per active overlay
//! - `lat`, `lon` - map center in decimal degrees
//! - `zoom` - integer zoom level
//! - `layers` - legacy form, e.g. `layers=spheres`
//!
//! Decoding never fails. Anything missing or unusable falls back to the
//! defaults in [`ViewStateCodec::resolve`], which is the one place where
//! defaulting happens.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;
use url::form_urlencoded;

use crate::layer::{LayerRegistry, OverlayDef};

pub const DEFAULT_LAT: f64 = 78.0;
pub const DEFAULT_LON: f64 = 16.0;
pub const DEFAULT_ZOOM: u8 = 7;

pub const PARAM_BASE_LAYER: &str = "base_layer";
pub const PARAM_OVERLAY: &str = "overlay";
pub const PARAM_LAT: &str = "lat";
pub const PARAM_LON: &str = "lon";
pub const PARAM_ZOOM: &str = "zoom";
pub const PARAM_LEGACY_LAYERS: &str = "layers";

/// The map's shareable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub lat: f64,
    pub lon: f64,
    pub zoom: u8,
    pub base_layer: String,
    /// Active overlay names. A set, so comparisons ignore order.
    pub overlays: BTreeSet<String>,
}

impl ViewState {
    /// The view shown when the URL carries no state.
    pub fn default_for(registry: &LayerRegistry) -> Self {
        Self {
            lat: DEFAULT_LAT,
            lon: DEFAULT_LON,
            zoom: DEFAULT_ZOOM,
            base_layer: registry.default_base_layer().to_string(),
            overlays: BTreeSet::new(),
        }
    }

    pub fn with_overlay(mut self, name: impl Into<String>) -> Self {
        self.overlays.insert(name.into());
        self
    }

    /// Active overlays that exist in the registry, in registry order.
    pub fn known_overlays<'a>(&self, registry: &'a LayerRegistry) -> Vec<&'a OverlayDef> {
        registry
            .overlays()
            .iter()
            .filter(|o| self.overlays.contains(&o.name))
            .collect()
    }
}

/// Query parameters as they appear in the URL, before defaults are applied.
///
/// Single-valued parameters keep their first occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawViewParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub zoom: Option<String>,
    pub base_layer: Option<String>,
    pub overlays: Vec<String>,
    pub legacy_layers: Vec<String>,
}

impl RawViewParams {
    /// Split a query string (with or without the leading `?`).
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut raw = RawViewParams::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                PARAM_LAT => {
                    raw.lat.get_or_insert_with(|| value.into_owned());
                }
                PARAM_LON => {
                    raw.lon.get_or_insert_with(|| value.into_owned());
                }
                PARAM_ZOOM => {
                    raw.zoom.get_or_insert_with(|| value.into_owned());
                }
                PARAM_BASE_LAYER => {
                    raw.base_layer.get_or_insert_with(|| value.into_owned());
                }
                PARAM_OVERLAY => raw.overlays.push(value.into_owned()),
                PARAM_LEGACY_LAYERS => raw.legacy_layers.push(value.into_owned()),
                _ => {}
            }
        }

        raw
    }
}

/// Encodes and decodes [`ViewState`] against a layer registry.
#[derive(Debug, Clone, Copy)]
pub struct ViewStateCodec<'a> {
    registry: &'a LayerRegistry,
}

impl<'a> ViewStateCodec<'a> {
    pub fn new(registry: &'a LayerRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a LayerRegistry {
        self.registry
    }

    /// Write `state` as a query string (without the leading `?`).
    ///
    /// Base layer and overlays are only written when the registry knows them;
    /// overlays follow registry order.
    pub fn encode(&self, state: &ViewState) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());

        if let Some(layer) = self.registry.base_layer(&state.base_layer) {
            query.append_pair(PARAM_BASE_LAYER, &layer.name);
        }

        for overlay in state.known_overlays(self.registry) {
            query.append_pair(PARAM_OVERLAY, &overlay.name);
        }

        query.append_pair(PARAM_LAT, &state.lat.to_string());
        query.append_pair(PARAM_LON, &state.lon.to_string());
        query.append_pair(PARAM_ZOOM, &state.zoom.to_string());

        query.finish()
    }

    /// Read a view state from a query string.
    ///
    /// Overlay names are returned as given; use
    /// [`ViewState::known_overlays`] to drop the ones the registry lacks.
    pub fn decode(&self, query: &str) -> ViewState {
        self.resolve(RawViewParams::parse(query))
    }

    /// Apply defaults to raw parameters.
    ///
    /// - `lat`/`lon`: must parse as finite numbers, otherwise 78.0 / 16.0
    /// - `zoom`: must parse as a number in 0..=255 (rounded), otherwise 7
    /// - `base_layer`: must name a registry base layer, otherwise the
    ///   registry default
    /// - `layers`: every overlay whose legacy alias occurs in a value is
    ///   switched on
    pub fn resolve(&self, raw: RawViewParams) -> ViewState {
        let mut state = ViewState::default_for(self.registry);

        if let Some(lat) = raw.lat.as_deref().and_then(parse_coordinate) {
            state.lat = lat;
        }
        if let Some(lon) = raw.lon.as_deref().and_then(parse_coordinate) {
            state.lon = lon;
        }
        if let Some(zoom) = raw.zoom.as_deref().and_then(parse_zoom) {
            state.zoom = zoom;
        }

        match raw.base_layer {
            Some(name) if self.registry.is_base_layer(&name) => state.base_layer = name,
            Some(name) => debug!(base_layer = %name, "Unknown base layer, using default"),
            None => {}
        }

        state.overlays.extend(raw.overlays);

        for value in &raw.legacy_layers {
            for overlay in self.registry.overlays_for_legacy(value) {
                state.overlays.insert(overlay.name.clone());
            }
        }

        state
    }
}

fn parse_coordinate(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_zoom(value: &str) -> Option<u8> {
    let zoom = value.trim().parse::<f64>().ok()?;
    if zoom.is_finite() && (0.0..=f64::from(u8::MAX)).contains(&zoom) {
        Some(zoom.round() as u8)
    } else {
        None
    }
}
