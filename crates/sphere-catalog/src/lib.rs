//! Sphere catalog compilation.
//!
//! Scans the directory of 360° panoramas, reads each image's GPS position
//! and photographer from EXIF, derives a capture date and a readable label
//! from the filename, writes a thumbnail, and produces the
//! `spheres.geojson` feature collection the map overlays are built from.
//!
//! Filenames follow `Sph_<yymmdd>_<n>-<CamelCaseLabel>.jpg`.

pub mod compile;
pub mod error;
pub mod location;
pub mod naming;
pub mod thumbnail;

pub use compile::{compile, CatalogLayout, CompileReport};
pub use error::{CatalogError, Result};
pub use location::{ExifReader, ImageLocation, LocationReader};
pub use naming::{capture_date, label_from_stem};
