//! Common types and utilities shared across the sphere viewer crates.

pub mod color;
pub mod error;
pub mod geojson;
pub mod layer;
pub mod markup;
pub mod share;
pub mod sphere;
pub mod view_state;

pub use color::{BreakpointTable, ColorError, OutOfRange, Rgb};
pub use error::{ViewerError, ViewerResult};
pub use geojson::{Feature, FeatureCollection, Geometry};
pub use layer::{
    BaseLayer, LayerRegistry, OverlayDef, OverlayKind, DEFAULT_BASE_LAYER, SPHERES_OVERLAY,
};
pub use markup::escape_html;
pub use share::{ShareController, ShareLink};
pub use sphere::{find_sphere, SphereProperties};
pub use view_state::{ViewState, ViewStateCodec};
