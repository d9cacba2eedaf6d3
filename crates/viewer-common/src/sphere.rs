//! Spherical (360°) image metadata as stored in `spheres.geojson`.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ViewerError, ViewerResult};
use crate::geojson::{Feature, FeatureCollection};

/// Properties carried by every sphere feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SphereProperties {
    /// Image filename inside the sphere directory, e.g. `Sph_200615_1-Aabreen.jpg`.
    pub filename: String,
    /// Capture date as `YYYY-MM-DD`.
    pub date: String,
    pub label: String,
    pub author: String,
    /// Thumbnail path relative to the site root (no leading slash).
    pub thumbnail: String,
}

impl SphereProperties {
    /// Read the sphere properties of a feature.
    pub fn from_feature(feature: &Feature) -> ViewerResult<Self> {
        serde_json::from_value(Value::Object(feature.properties.clone())).map_err(|e| {
            ViewerError::InvalidGeoJson(format!("invalid sphere properties: {}", e))
        })
    }

    /// Parsed capture date.
    pub fn capture_date(&self) -> ViewerResult<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|e| {
            ViewerError::InvalidParameter {
                param: "date".to_string(),
                message: format!("'{}' is not YYYY-MM-DD: {}", self.date, e),
            }
        })
    }

    /// Month of the year with the day as a fraction of a 30-day month.
    ///
    /// June 15th gives `6.5`; used to colour markers by season.
    pub fn month_fraction(&self) -> ViewerResult<f64> {
        let date = self.capture_date()?;
        Ok(f64::from(date.month()) + f64::from(date.day()) / 30.0)
    }

    /// Caption shown beneath the panorama.
    pub fn caption(&self) -> String {
        format!("{}, {}. Photographer: {}", self.label, self.date, self.author)
    }

    /// Route of the panorama page for this sphere.
    pub fn page_path(&self) -> String {
        format!("/spheres/{}", self.filename)
    }

    /// URL of the full-resolution panorama image.
    pub fn panorama_path(&self) -> String {
        format!("/static/spheres/{}", self.filename)
    }

    /// URL of the thumbnail image.
    pub fn thumbnail_path(&self) -> String {
        format!("/{}", self.thumbnail.trim_start_matches('/'))
    }
}

/// Look up the metadata of the sphere with the given filename.
pub fn find_sphere(collection: &FeatureCollection, filename: &str) -> ViewerResult<SphereProperties> {
    let feature = collection
        .find_by_property("filename", filename)
        .ok_or_else(|| ViewerError::SphereNotFound(filename.to_string()))?;
    SphereProperties::from_feature(feature)
}
