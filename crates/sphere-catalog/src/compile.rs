//! Directory scan that writes `spheres.geojson`.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use viewer_common::{Feature, FeatureCollection, Geometry, SphereProperties};
use walkdir::WalkDir;

use crate::error::{CatalogError, Result};
use crate::location::LocationReader;
use crate::naming::{capture_date, label_from_stem, SPHERE_PREFIX};
use crate::thumbnail::ensure_thumbnail;

/// Site-relative directory thumbnails are referenced from.
const THUMBNAIL_URL_DIR: &str = "static/sphere-thumbnails";

/// Where panoramas are read from and catalog output is written.
#[derive(Debug, Clone)]
pub struct CatalogLayout {
    pub sphere_dir: PathBuf,
    pub thumbnail_dir: PathBuf,
    pub output: PathBuf,
}

impl CatalogLayout {
    /// Standard layout below a static directory.
    pub fn under(static_dir: &Path) -> Self {
        Self {
            sphere_dir: static_dir.join("spheres"),
            thumbnail_dir: static_dir.join("sphere-thumbnails"),
            output: static_dir.join("shapes").join("spheres.geojson"),
        }
    }
}

/// Outcome of a compile run.
#[derive(Debug, Default)]
pub struct CompileReport {
    pub written: usize,
    pub thumbnails_created: usize,
    /// Images left out of the catalog, with the reason
    pub skipped: Vec<(PathBuf, String)>,
}

/// Whether a directory entry is a panorama to catalog.
fn is_sphere(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.starts_with(SPHERE_PREFIX) && !name.contains("_original") && !name.contains("thumbnail")
}

/// Catalog every panorama in the layout's sphere directory.
///
/// Images whose metadata cannot be read are logged and skipped. Features
/// are sorted by capture date.
pub fn compile(layout: &CatalogLayout, reader: &dyn LocationReader) -> Result<CompileReport> {
    let mut report = CompileReport::default();
    let mut entries: Vec<(NaiveDate, Feature)> = Vec::new();

    for entry in WalkDir::new(&layout.sphere_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| CatalogError::Io {
            path: layout.sphere_dir.clone(),
            source: e.into(),
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_sphere(path) {
            continue;
        }

        match catalog_entry(layout, reader, path) {
            Ok((date, feature, created)) => {
                if created {
                    report.thumbnails_created += 1;
                }
                entries.push((date, feature));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping sphere");
                report.skipped.push((path.to_path_buf(), e.to_string()));
            }
        }
    }

    entries.sort_by_key(|(date, _)| *date);
    report.written = entries.len();

    let collection = entries
        .into_iter()
        .fold(FeatureCollection::new(), |fc, (_, feature)| fc.with_feature(feature));
    write_collection(&layout.output, &collection)?;

    info!(
        output = %layout.output.display(),
        written = report.written,
        skipped = report.skipped.len(),
        thumbnails = report.thumbnails_created,
        "Compiled sphere catalog"
    );
    Ok(report)
}

fn catalog_entry(
    layout: &CatalogLayout,
    reader: &dyn LocationReader,
    path: &Path,
) -> Result<(NaiveDate, Feature, bool)> {
    let invalid = || CatalogError::InvalidFilename {
        name: path.display().to_string(),
        message: "not valid UTF-8".to_string(),
    };
    let filename = path.file_name().and_then(|n| n.to_str()).ok_or_else(invalid)?;
    let stem = path.file_stem().and_then(|s| s.to_str()).ok_or_else(invalid)?;

    let date = capture_date(stem)?;
    let label = label_from_stem(stem)?;
    let location = reader.read(path)?;

    let thumbnail_name = format!("{}.thumbnail", stem);
    let created = ensure_thumbnail(path, &layout.thumbnail_dir.join(&thumbnail_name))?;

    let props = SphereProperties {
        filename: filename.to_string(),
        date: date.format("%Y-%m-%d").to_string(),
        label,
        author: location.author,
        thumbnail: format!("{}/{}", THUMBNAIL_URL_DIR, thumbnail_name),
    };
    let properties = match serde_json::to_value(&props) {
        Ok(serde_json::Value::Object(map)) => map,
        Ok(other) => return Err(CatalogError::Write(format!("unexpected properties {}", other))),
        Err(e) => return Err(CatalogError::Write(e.to_string())),
    };

    let mut feature = Feature::new(Geometry::point(location.lon, location.lat));
    feature.properties = properties;
    Ok((date, feature, created))
}

fn write_collection(output: &Path, collection: &FeatureCollection) -> Result<()> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent, e))?;
    }
    let json = serde_json::to_vec_pretty(collection).map_err(|e| CatalogError::Write(e.to_string()))?;
    std::fs::write(output, json).map_err(|e| CatalogError::io(output, e))
}
