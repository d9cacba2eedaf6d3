//! Overlay assembly.

use serde::Serialize;
use tracing::{info, warn};
use viewer_common::{FeatureCollection, Geometry, OverlayDef};

use crate::error::SourceError;
use crate::marker::{MarkerIcon, ShapeStyle};
use crate::source::FeatureSource;
use crate::styler::{styler_for, FeatureStyler};

/// One drawable feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayItem {
    pub geometry: Geometry,
    /// Set for point geometries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerIcon>,
    /// Set for line and polygon geometries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeStyle>,
    pub popup_html: String,
}

/// A fully built overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    pub name: String,
    pub items: Vec<OverlayItem>,
    /// Features left out because they had no geometry or could not be styled
    pub skipped: usize,
}

/// What the browser shell receives for an overlay.
///
/// A failed load is a value, not a missing layer, so the shell can show it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OverlayState {
    Ready(Overlay),
    Failed { name: String, error: String },
}

impl OverlayState {
    pub fn failed(name: impl Into<String>, error: &SourceError) -> Self {
        OverlayState::Failed {
            name: name.into(),
            error: error.to_string(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, OverlayState::Ready(_))
    }
}

/// Builds one overlay from a feature collection.
#[derive(Debug, Clone)]
pub struct OverlayBuilder {
    name: String,
}

impl OverlayBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn build(&self, collection: &FeatureCollection, styler: &dyn FeatureStyler) -> Overlay {
        let mut items = Vec::with_capacity(collection.features.len());
        let mut skipped = 0;

        for (index, feature) in collection.features.iter().enumerate() {
            let Some(geometry) = feature.geometry.clone() else {
                warn!(overlay = %self.name, index, "Skipping feature without geometry");
                skipped += 1;
                continue;
            };

            let style = match styler.style(feature) {
                Ok(style) => style,
                Err(e) => {
                    warn!(overlay = %self.name, index, error = %e, "Skipping unstylable feature");
                    skipped += 1;
                    continue;
                }
            };

            let (marker, shape) = if geometry.is_point() {
                (Some(MarkerIcon::pin(style.fill, style.border)), None)
            } else {
                (None, Some(ShapeStyle::outline(style.fill)))
            };

            items.push(OverlayItem {
                geometry,
                marker,
                shape,
                popup_html: style.popup_html,
            });
        }

        Overlay {
            name: self.name.clone(),
            items,
            skipped,
        }
    }
}

/// Fetch an overlay's dataset and build it with the styler for its kind.
pub async fn load_overlay(
    overlay: &OverlayDef,
    source: &dyn FeatureSource,
) -> Result<Overlay, SourceError> {
    let collection = source.fetch(&overlay.source).await?;
    let built = OverlayBuilder::new(&overlay.name).build(&collection, styler_for(overlay).as_ref());

    info!(
        overlay = %overlay.name,
        items = built.items.len(),
        skipped = built.skipped,
        "Built overlay"
    );

    Ok(built)
}
