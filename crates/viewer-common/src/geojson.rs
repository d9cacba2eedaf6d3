//! GeoJSON types for the overlay datasets.
//!
//! Only the subset needed by the viewer is modelled: feature collections of
//! features with a geometry and a free-form properties bag.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{ViewerError, ViewerResult};

/// A GeoJSON position (`[lon, lat]` or `[lon, lat, z]`).
pub type Position = Vec<f64>;

/// A GeoJSON FeatureCollection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection {
    /// Type identifier (always "FeatureCollection").
    #[serde(rename = "type")]
    pub type_: String,

    /// Array of features.
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Create a new empty FeatureCollection.
    pub fn new() -> Self {
        Self {
            type_: "FeatureCollection".to_string(),
            features: Vec::new(),
        }
    }

    /// Add a feature to the collection.
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    /// Parse a FeatureCollection from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> ViewerResult<Self> {
        let collection: FeatureCollection = serde_json::from_slice(bytes)?;
        collection.check_type()?;
        Ok(collection)
    }

    /// Parse a FeatureCollection from a JSON string.
    pub fn from_json(json: &str) -> ViewerResult<Self> {
        Self::from_slice(json.as_bytes())
    }

    fn check_type(&self) -> ViewerResult<()> {
        if self.type_ != "FeatureCollection" {
            return Err(ViewerError::InvalidGeoJson(format!(
                "expected a FeatureCollection, got '{}'",
                self.type_
            )));
        }
        Ok(())
    }

    /// First feature whose string property `key` equals `value`.
    pub fn find_by_property(&self, key: &str, value: &str) -> Option<&Feature> {
        self.features
            .iter()
            .find(|feature| feature.property_str(key) == Some(value))
    }
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self::new()
    }
}

/// A GeoJSON Feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: String,

    /// Optional feature identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// The geometry of this feature; GeoJSON allows `null`.
    pub geometry: Option<Geometry>,

    /// Free-form properties.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Map<String, Value>,
}

impl Feature {
    /// Create a new feature with the given geometry and no properties.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            type_: "Feature".to_string(),
            id: None,
            geometry: Some(geometry),
            properties: Map::new(),
        }
    }

    /// Set a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// A string-valued property.
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    /// A numeric property.
    pub fn property_f64(&self, key: &str) -> Option<f64> {
        self.properties.get(key).and_then(Value::as_f64)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// GeoJSON geometry types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    /// Linear rings; the first is the exterior, the rest are holes.
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
}

impl Geometry {
    /// Create a point geometry.
    pub fn point(lon: f64, lat: f64) -> Self {
        Geometry::Point {
            coordinates: vec![lon, lat],
        }
    }

    /// Create a polygon geometry.
    pub fn polygon(rings: Vec<Vec<Position>>) -> Self {
        Geometry::Polygon { coordinates: rings }
    }

    /// Whether this geometry is drawn as a marker.
    pub fn is_point(&self) -> bool {
        matches!(self, Geometry::Point { .. } | Geometry::MultiPoint { .. })
    }

    /// `(lon, lat)` of a point geometry.
    pub fn as_lon_lat(&self) -> Option<(f64, f64)> {
        match self {
            Geometry::Point { coordinates } if coordinates.len() >= 2 => {
                Some((coordinates[0], coordinates[1]))
            }
            _ => None,
        }
    }
}
