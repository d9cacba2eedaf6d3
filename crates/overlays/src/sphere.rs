//! Styling for spherical image locations.
//!
//! Markers are coloured by the season the image was captured in, using a
//! month-of-year colour ramp that wraps from December back to January.

use viewer_common::{escape_html, BreakpointTable, Feature, Rgb, SphereProperties};

use crate::error::StyleError;
use crate::styler::{required_str, FeatureStyle, FeatureStyler};

/// Month ramp: winter blue, spring teal, summer green, autumn gold/purple.
pub const SEASON_BREAKPOINTS: [(f64, &str); 7] = [
    (1.0, "#505196"),
    (5.0, "#6bbdcf"),
    (6.0, "#6bcfa5"),
    (8.0, "#7ccf6b"),
    (9.0, "#cfb26b"),
    (11.0, "#946bcf"),
    (13.0, "#505196"),
];

const BORDER: Rgb = Rgb::new(0, 0, 0);

#[derive(Debug, Clone)]
pub struct SphereStyler {
    ramp: BreakpointTable,
}

impl SphereStyler {
    pub fn new(ramp: BreakpointTable) -> Self {
        Self { ramp }
    }

    /// Styler using [`SEASON_BREAKPOINTS`].
    pub fn seasonal() -> Self {
        Self::new(season_ramp())
    }

    /// Colour for a feature, from its capture date.
    pub fn color_for(&self, props: &SphereProperties) -> Result<Rgb, StyleError> {
        let month = props
            .month_fraction()
            .map_err(|e| StyleError::InvalidProperty {
                property: "date",
                message: e.to_string(),
            })?;
        Ok(self.ramp.interpolate_rgb(month)?)
    }
}

/// The month ramp as a table; the constant entries are always valid.
pub fn season_ramp() -> BreakpointTable {
    match BreakpointTable::new(SEASON_BREAKPOINTS) {
        Ok(table) => table,
        Err(e) => unreachable!("season breakpoints are valid: {}", e),
    }
}

impl FeatureStyler for SphereStyler {
    fn style(&self, feature: &Feature) -> Result<FeatureStyle, StyleError> {
        // Report the first missing field by name rather than a serde message.
        for property in ["filename", "date", "label", "thumbnail"] {
            required_str(feature, property)?;
        }

        let props = SphereProperties::from_feature(feature).map_err(|e| {
            StyleError::InvalidProperty {
                property: "properties",
                message: e.to_string(),
            }
        })?;

        Ok(FeatureStyle {
            fill: self.color_for(&props)?,
            border: BORDER,
            popup_html: popup_html(&props),
        })
    }
}

/// Link to the panorama page with label, date and thumbnail.
pub fn popup_html(props: &SphereProperties) -> String {
    format!(
        "<a href='{href}' target=\"_blank\" rel=\"noopener noreferrer\">{label}, date: {date}<img src=\"{thumb}\" style=\"width: 100%\"></img></a>",
        href = escape_html(&props.page_path()),
        label = escape_html(&props.label),
        date = escape_html(&props.date),
        thumb = escape_html(&props.thumbnail_path()),
    )
}
