//! Per-feature styling.

use viewer_common::{Feature, OverlayDef, OverlayKind, Rgb};

use crate::error::StyleError;
use crate::glacier::GlacierStyler;
use crate::sphere::SphereStyler;

/// How one feature is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureStyle {
    pub fill: Rgb,
    pub border: Rgb,
    pub popup_html: String,
}

/// A pure function from feature properties to a style.
pub trait FeatureStyler: Send + Sync {
    fn style(&self, feature: &Feature) -> Result<FeatureStyle, StyleError>;
}

/// The styler matching an overlay definition.
pub fn styler_for(overlay: &OverlayDef) -> Box<dyn FeatureStyler> {
    match overlay.kind {
        OverlayKind::Spheres => Box::new(SphereStyler::seasonal()),
        OverlayKind::Glaciers => Box::new(GlacierStyler::new(
            overlay.color.unwrap_or(GlacierStyler::DEFAULT_COLOR),
        )),
    }
}

pub(crate) fn required_str<'a>(
    feature: &'a Feature,
    property: &'static str,
) -> Result<&'a str, StyleError> {
    feature
        .property_str(property)
        .ok_or(StyleError::MissingProperty(property))
}

pub(crate) fn required_f64(feature: &Feature, property: &'static str) -> Result<f64, StyleError> {
    match feature.properties.get(property) {
        None => Err(StyleError::MissingProperty(property)),
        Some(value) => value.as_f64().ok_or_else(|| StyleError::InvalidProperty {
            property,
            message: format!("expected a number, got {}", value),
        }),
    }
}
