//! Position and photographer from image EXIF.

use exif::{Exif, In, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{CatalogError, Result};

/// Author used when the image carries no `Artist` tag.
pub const UNKNOWN_AUTHOR: &str = "Unspecified";

/// Where and by whom a panorama was taken.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageLocation {
    pub lat: f64,
    pub lon: f64,
    pub author: String,
}

/// Source of per-image location metadata.
pub trait LocationReader: Send + Sync {
    fn read(&self, path: &Path) -> Result<ImageLocation>;
}

/// Reads GPS and `Artist` tags from the image's EXIF block.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifReader;

impl LocationReader for ExifReader {
    fn read(&self, path: &Path) -> Result<ImageLocation> {
        let file = File::open(path).map_err(|e| CatalogError::io(path, e))?;
        let exif = exif::Reader::new()
            .read_from_container(&mut BufReader::new(file))
            .map_err(|e| CatalogError::Exif {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let lat = signed_degrees(
            &exif,
            path,
            (Tag::GPSLatitude, "GPSLatitude"),
            (Tag::GPSLatitudeRef, "GPSLatitudeRef"),
            'N',
        )?;
        let lon = signed_degrees(
            &exif,
            path,
            (Tag::GPSLongitude, "GPSLongitude"),
            (Tag::GPSLongitudeRef, "GPSLongitudeRef"),
            'E',
        )?;
        let author = ascii(&exif, Tag::Artist)
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

        Ok(ImageLocation { lat, lon, author })
    }
}

fn signed_degrees(
    exif: &Exif,
    path: &Path,
    (value_tag, value_name): (Tag, &'static str),
    (ref_tag, ref_name): (Tag, &'static str),
    positive: char,
) -> Result<f64> {
    let missing = |tag| CatalogError::MissingTag {
        path: path.to_path_buf(),
        tag,
    };

    let field = exif
        .get_field(value_tag, In::PRIMARY)
        .ok_or_else(|| missing(value_name))?;
    let dms = match &field.value {
        Value::Rational(parts) if parts.len() >= 3 => {
            [parts[0].to_f64(), parts[1].to_f64(), parts[2].to_f64()]
        }
        _ => return Err(missing(value_name)),
    };
    let reference = ascii(exif, ref_tag).ok_or_else(|| missing(ref_name))?;

    Ok(dms_to_degrees(dms, reference.starts_with(positive)))
}

fn ascii(exif: &Exif, tag: Tag) -> Option<String> {
    match &exif.get_field(tag, In::PRIMARY)?.value {
        Value::Ascii(values) => values.first().map(|v| {
            String::from_utf8_lossy(v)
                .trim_end_matches('\0')
                .trim()
                .to_string()
        }),
        _ => None,
    }
}

/// Degrees, minutes and seconds to decimal degrees, negated for S and W.
pub fn dms_to_degrees([deg, min, sec]: [f64; 3], positive: bool) -> f64 {
    let value = deg + min / 60.0 + sec / 3600.0;
    if positive {
        value
    } else {
        -value
    }
}
