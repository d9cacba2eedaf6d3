//! Error types for catalog compilation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while compiling the sphere catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read EXIF from '{path}': {message}")]
    Exif { path: PathBuf, message: String },

    #[error("Missing EXIF tag {tag} in '{path}'")]
    MissingTag { path: PathBuf, tag: &'static str },

    #[error("Unexpected filename '{name}': {message}")]
    InvalidFilename { name: String, message: String },

    #[error("Failed to create thumbnail for '{path}': {message}")]
    Thumbnail { path: PathBuf, message: String },

    #[error("Failed to write catalog: {0}")]
    Write(String),
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
