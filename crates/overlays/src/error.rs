//! Error types for the overlays crate.

use thiserror::Error;
use viewer_common::{ColorError, ViewerError};

/// Errors raised while fetching a GeoJSON dataset.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Dataset not found: {0}")]
    NotFound(String),

    #[error("Refusing to read '{0}': path escapes the static directory")]
    InvalidLocation(String),

    #[error("Failed to read '{location}': {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Request for '{location}' failed: {message}")]
    Http { location: String, message: String },

    #[error("'{location}' is not valid GeoJSON: {message}")]
    Parse { location: String, message: String },
}

impl SourceError {
    /// The dataset location the error refers to.
    pub fn location(&self) -> &str {
        match self {
            SourceError::NotFound(location) | SourceError::InvalidLocation(location) => location,
            SourceError::Io { location, .. }
            | SourceError::Http { location, .. }
            | SourceError::Parse { location, .. } => location,
        }
    }
}

impl From<SourceError> for ViewerError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Parse { message, .. } => ViewerError::InvalidGeoJson(message),
            other => ViewerError::FetchFailed {
                location: other.location().to_string(),
                message: other.to_string(),
            },
        }
    }
}

/// Errors raised while styling a single feature.
#[derive(Error, Debug, PartialEq)]
pub enum StyleError {
    #[error("Missing property '{0}'")]
    MissingProperty(&'static str),

    #[error("Invalid property '{property}': {message}")]
    InvalidProperty {
        property: &'static str,
        message: String,
    },

    #[error(transparent)]
    Color(#[from] ColorError),
}
