//! Labels and capture dates derived from sphere filenames.

use chrono::NaiveDate;

use crate::error::{CatalogError, Result};

/// Filename prefix shared by all panoramas.
pub const SPHERE_PREFIX: &str = "Sph_";

/// Ascii spellings in filenames and the place names they stand for.
const TRANSLATIONS: &[(&str, &str)] = &[
    ("Vallakrabreen", "Vallåkrabreen"),
    ("Dronbreen", "Drønbreen"),
    ("Nordenskioldbreen", "Nordenskiöldbreen"),
    ("Midtoya", "Midtøya"),
    ("Aabreen", "Åbreen"),
    ("Konigsberg", "Königsberg"),
];

/// Capture date encoded as `yymmdd` after the `Sph_` prefix.
///
/// `Sph_200615_1-Aabreen` is 2020-06-15.
pub fn capture_date(stem: &str) -> Result<NaiveDate> {
    let digits = stem
        .replace(SPHERE_PREFIX, "")
        .split('_')
        .next()
        .unwrap_or_default()
        .to_string();

    NaiveDate::parse_from_str(&digits, "%y%m%d").map_err(|e| CatalogError::InvalidFilename {
        name: stem.to_string(),
        message: format!("'{}' is not a yymmdd date: {}", digits, e),
    })
}

/// Readable label from the part of the stem after the first `-`.
///
/// CamelCase words are split and known place names get their proper
/// spelling: `Sph_200615_1-AabreenFront` becomes `Åbreen Front`.
pub fn label_from_stem(stem: &str) -> Result<String> {
    let (_, tail) = stem.split_once('-').ok_or_else(|| CatalogError::InvalidFilename {
        name: stem.to_string(),
        message: "no '-' separating the label".to_string(),
    })?;

    let mut label = split_camel_case(tail);
    for (ascii, proper) in TRANSLATIONS {
        label = label.replace(ascii, proper);
    }
    Ok(label)
}

/// Insert a space before each capital that follows a lowercase letter or
/// starts a new lowercase word, except at the very start.
fn split_camel_case(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let after_lower = chars[i - 1].is_ascii_lowercase();
            let before_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if after_lower || before_lower {
                out.push(' ');
            }
        }
        out.push(c);
    }

    out
}
