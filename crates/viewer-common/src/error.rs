//! Error types for the sphere viewer.

use thiserror::Error;

use crate::color::ColorError;

/// Result type alias using ViewerError.
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Primary error type for viewer operations.
#[derive(Debug, Error)]
pub enum ViewerError {
    // === Request Errors ===
    #[error("Overlay not found: {0}")]
    OverlayNotFound(String),

    #[error("Sphere not found: {0}")]
    SphereNotFound(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // === Data Errors ===
    #[error("Failed to fetch '{location}': {message}")]
    FetchFailed { location: String, message: String },

    #[error("Invalid GeoJSON: {0}")]
    InvalidGeoJson(String),

    #[error("Colour error: {0}")]
    Color(#[from] ColorError),

    // === Configuration Errors ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // === Infrastructure Errors ===
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ViewerError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            ViewerError::InvalidParameter { .. } => 400,

            ViewerError::OverlayNotFound(_) | ViewerError::SphereNotFound(_) => 404,

            ViewerError::FetchFailed { .. } | ViewerError::InvalidGeoJson(_) => 502,

            _ => 500,
        }
    }
}

impl From<std::io::Error> for ViewerError {
    fn from(err: std::io::Error) -> Self {
        ViewerError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for ViewerError {
    fn from(err: serde_json::Error) -> Self {
        ViewerError::InvalidGeoJson(err.to_string())
    }
}
