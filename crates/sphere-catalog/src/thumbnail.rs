//! Panorama thumbnails for map popups.

use image::{DynamicImage, ImageFormat};
use std::path::Path;
use tracing::debug;

use crate::error::{CatalogError, Result};

pub const THUMBNAIL_WIDTH: u32 = 256;
pub const THUMBNAIL_HEIGHT: u32 = 128;

/// Write a JPEG thumbnail of `source` to `target` unless one already exists.
///
/// Returns whether a thumbnail was written.
pub fn ensure_thumbnail(source: &Path, target: &Path) -> Result<bool> {
    if target.exists() {
        return Ok(false);
    }

    let thumbnail_error = |message: String| CatalogError::Thumbnail {
        path: source.to_path_buf(),
        message,
    };

    let image = image::open(source).map_err(|e| thumbnail_error(e.to_string()))?;
    let small = image.thumbnail(THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT);

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent, e))?;
    }
    DynamicImage::ImageRgb8(small.to_rgb8())
        .save_with_format(target, ImageFormat::Jpeg)
        .map_err(|e| thumbnail_error(e.to_string()))?;

    debug!(
        source = %source.display(),
        target = %target.display(),
        "Wrote thumbnail"
    );
    Ok(true)
}
