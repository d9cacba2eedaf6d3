//! Overlay construction for the sphere viewer.
//!
//! Turns GeoJSON feature collections into overlay descriptors the browser
//! shell can hand straight to the map widget: one marker or shape per
//! feature, each with its popup markup.
//!
//! - [`source`] fetches a feature collection from disk or HTTP
//! - [`styler`] decides colour and popup per feature ([`sphere`], [`glacier`])
//! - [`builder`] assembles the overlay and reports failures as an explicit state

pub mod builder;
pub mod error;
pub mod format;
pub mod glacier;
pub mod marker;
pub mod source;
pub mod sphere;
pub mod styler;

pub use builder::{load_overlay, Overlay, OverlayBuilder, OverlayItem, OverlayState};
pub use error::{SourceError, StyleError};
pub use glacier::GlacierStyler;
pub use marker::{MarkerIcon, ShapeStyle};
pub use source::{DatasetSource, FeatureSource, FileSource, HttpSource};
pub use sphere::SphereStyler;
pub use styler::{styler_for, FeatureStyle, FeatureStyler};
