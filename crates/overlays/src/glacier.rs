//! Styling for glacier outline datasets (CryoClim inventory).
//!
//! Property names follow the inventory shapefile: `NAME`, `Shape_Area` in
//! square metres and `LENGTH` in metres.

use viewer_common::{escape_html, Feature, Rgb};

use crate::error::StyleError;
use crate::format::to_precision;
use crate::styler::{required_f64, required_str, FeatureStyle, FeatureStyler};

#[derive(Debug, Clone)]
pub struct GlacierStyler {
    color: Rgb,
}

impl GlacierStyler {
    pub const DEFAULT_COLOR: Rgb = Rgb::new(0x33, 0x88, 0xff);

    const BORDER: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub fn new(color: Rgb) -> Self {
        Self { color }
    }
}

impl FeatureStyler for GlacierStyler {
    fn style(&self, feature: &Feature) -> Result<FeatureStyle, StyleError> {
        let name = required_str(feature, "NAME")?;
        let area_m2 = required_f64(feature, "Shape_Area")?;
        let length_m = required_f64(feature, "LENGTH")?;

        Ok(FeatureStyle {
            fill: self.color,
            border: Self::BORDER,
            popup_html: popup_html(name, area_m2, length_m),
        })
    }
}

/// `Name: X, Area: 12 km², Length: 5.2 km`
pub fn popup_html(name: &str, area_m2: f64, length_m: f64) -> String {
    format!(
        "Name: {}, Area: {} km², Length: {} km",
        escape_html(name),
        to_precision(area_m2 / 1e6, 2),
        to_precision(length_m / 1e3, 2),
    )
}
