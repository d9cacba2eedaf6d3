//! Base layer and overlay definitions.
//!
//! The [`LayerRegistry`] is the ordered catalogue of everything the map can
//! show. Its order is the order used when view state is written to a URL.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::color::Rgb;
use crate::error::{ViewerError, ViewerResult};

/// Name of the base layer used when a URL does not select a known one.
pub const DEFAULT_BASE_LAYER: &str = "NPI Basiskart (20m)";

/// Name of the spherical image overlay.
pub const SPHERES_OVERLAY: &str = "Spherical (360) images";

/// A background tile layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseLayer {
    /// Display name, also used as the `base_layer` URL value
    pub name: String,

    /// XYZ tile URL template with `{z}`, `{x}`, `{y}` placeholders
    pub url_template: String,

    /// HTML attribution shown in the map corner
    #[serde(default)]
    pub attribution: String,

    #[serde(default = "default_min_zoom")]
    pub min_zoom: u8,

    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
}

fn default_min_zoom() -> u8 {
    0
}

fn default_max_zoom() -> u8 {
    18
}

/// How an overlay's features are styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    /// Spherical image locations, coloured by capture season
    Spheres,
    /// Glacier outlines with name/area/length popups
    Glaciers,
}

/// A toggleable GeoJSON overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayDef {
    /// Display name, also used as the `overlay` URL value
    pub name: String,

    pub kind: OverlayKind,

    /// Where the GeoJSON lives: a site path (`/static/...`) or an http(s) URL
    pub source: String,

    /// Fixed marker/outline colour (glacier overlays)
    #[serde(default)]
    pub color: Option<Rgb>,

    /// Keyword accepted in the legacy `layers=` URL parameter
    #[serde(default)]
    pub legacy_alias: Option<String>,
}

/// Ordered catalogue of base layers and overlays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerRegistry {
    base_layers: Vec<BaseLayer>,
    overlays: Vec<OverlayDef>,
    default_base_layer: String,
}

impl LayerRegistry {
    /// Build a registry, checking that names are unique and the default exists.
    pub fn new(
        base_layers: Vec<BaseLayer>,
        overlays: Vec<OverlayDef>,
        default_base_layer: impl Into<String>,
    ) -> ViewerResult<Self> {
        let default_base_layer = default_base_layer.into();

        if base_layers.is_empty() {
            return Err(ViewerError::InvalidConfig(
                "at least one base layer is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for name in base_layers.iter().map(|l| &l.name) {
            if !seen.insert(name.as_str()) {
                return Err(ViewerError::InvalidConfig(format!(
                    "duplicate base layer '{}'",
                    name
                )));
            }
        }

        let mut seen = HashSet::new();
        for name in overlays.iter().map(|o| &o.name) {
            if !seen.insert(name.as_str()) {
                return Err(ViewerError::InvalidConfig(format!("duplicate overlay '{}'", name)));
            }
        }

        if !base_layers.iter().any(|l| l.name == default_base_layer) {
            return Err(ViewerError::InvalidConfig(format!(
                "default base layer '{}' is not a configured base layer",
                default_base_layer
            )));
        }

        Ok(Self {
            base_layers,
            overlays,
            default_base_layer,
        })
    }

    /// The layers the viewer ships with.
    pub fn builtin() -> Self {
        Self {
            base_layers: vec![
                BaseLayer {
                    name: DEFAULT_BASE_LAYER.to_string(),
                    url_template: "/static/tiles/Basiskart_20m/{z}/{x}/{y}.png".to_string(),
                    attribution: "&copy; <a href=\"https://www.npolar.no\">NPI</a> Basemap"
                        .to_string(),
                    min_zoom: 5,
                    max_zoom: 13,
                },
                BaseLayer {
                    name: "ESRI Satellite (online)".to_string(),
                    url_template: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}".to_string(),
                    attribution: "&copy; <a href=\"https://www.esri.com\">ESRI</a> Satellite Basemap"
                        .to_string(),
                    min_zoom: 1,
                    max_zoom: 18,
                },
            ],
            overlays: vec![OverlayDef {
                name: SPHERES_OVERLAY.to_string(),
                kind: OverlayKind::Spheres,
                source: "/static/shapes/spheres.geojson".to_string(),
                color: None,
                legacy_alias: Some("spheres".to_string()),
            }],
            default_base_layer: DEFAULT_BASE_LAYER.to_string(),
        }
    }

    pub fn base_layers(&self) -> &[BaseLayer] {
        &self.base_layers
    }

    pub fn overlays(&self) -> &[OverlayDef] {
        &self.overlays
    }

    pub fn default_base_layer(&self) -> &str {
        &self.default_base_layer
    }

    pub fn base_layer(&self, name: &str) -> Option<&BaseLayer> {
        self.base_layers.iter().find(|l| l.name == name)
    }

    pub fn overlay(&self, name: &str) -> Option<&OverlayDef> {
        self.overlays.iter().find(|o| o.name == name)
    }

    pub fn is_base_layer(&self, name: &str) -> bool {
        self.base_layer(name).is_some()
    }

    pub fn is_overlay(&self, name: &str) -> bool {
        self.overlay(name).is_some()
    }

    /// Overlays whose legacy alias appears in `text`.
    pub fn overlays_for_legacy(&self, text: &str) -> impl Iterator<Item = &OverlayDef> + '_ {
        let text = text.to_string();
        self.overlays.iter().filter(move |o| {
            o.legacy_alias
                .as_deref()
                .is_some_and(|alias| !alias.is_empty() && text.contains(alias))
        })
    }
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
