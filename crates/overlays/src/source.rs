//! Single-shot GeoJSON fetching.
//!
//! Overlay sources are either site paths such as
//! `/static/shapes/spheres.geojson`, read from the static directory, or
//! absolute `http(s)://` URLs. There is no retry and no caching: every call
//! fetches and parses the document once.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use viewer_common::FeatureCollection;

use crate::error::SourceError;

/// Prefix under which the static directory is served.
pub const STATIC_PREFIX: &str = "/static/";

#[async_trait]
pub trait FeatureSource: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<FeatureCollection, SourceError>;
}

fn parse(location: &str, bytes: &[u8]) -> Result<FeatureCollection, SourceError> {
    FeatureCollection::from_slice(bytes).map_err(|e| SourceError::Parse {
        location: location.to_string(),
        message: e.to_string(),
    })
}

/// Reads datasets from the static directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a site path onto the static directory.
    ///
    /// `/static/a/b.geojson` and `a/b.geojson` both resolve to
    /// `<root>/a/b.geojson`. Paths containing `..` are rejected.
    pub fn resolve(&self, location: &str) -> Result<PathBuf, SourceError> {
        let relative = location
            .strip_prefix(STATIC_PREFIX)
            .unwrap_or(location)
            .trim_start_matches('/');

        let relative = Path::new(relative);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(SourceError::InvalidLocation(location.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FeatureSource for FileSource {
    async fn fetch(&self, location: &str) -> Result<FeatureCollection, SourceError> {
        let path = self.resolve(location)?;
        debug!(location = %location, path = %path.display(), "Reading dataset");

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound(location.to_string())
            } else {
                SourceError::Io {
                    location: location.to_string(),
                    source: e,
                }
            }
        })?;

        parse(location, &bytes)
    }
}

/// Fetches datasets over HTTP.
#[derive(Debug, Clone, Default)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn get(&self, location: &str) -> Result<Bytes, reqwest::Error> {
        self.client
            .get(location)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await
    }
}

#[async_trait]
impl FeatureSource for HttpSource {
    async fn fetch(&self, location: &str) -> Result<FeatureCollection, SourceError> {
        debug!(location = %location, "Fetching dataset");

        let bytes = self.get(location).await.map_err(|e| {
            if e.status() == Some(reqwest::StatusCode::NOT_FOUND) {
                SourceError::NotFound(location.to_string())
            } else {
                SourceError::Http {
                    location: location.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        parse(location, &bytes)
    }
}

/// Dispatches to HTTP for absolute URLs and to disk for everything else.
#[derive(Debug, Clone)]
pub struct DatasetSource {
    files: FileSource,
    http: HttpSource,
}

impl DatasetSource {
    pub fn new(files: FileSource, http: HttpSource) -> Self {
        Self { files, http }
    }

    pub fn is_remote(location: &str) -> bool {
        location.starts_with("http://") || location.starts_with("https://")
    }
}

#[async_trait]
impl FeatureSource for DatasetSource {
    async fn fetch(&self, location: &str) -> Result<FeatureCollection, SourceError> {
        if Self::is_remote(location) {
            self.http.fetch(location).await
        } else {
            self.files.fetch(location).await
        }
    }
}
