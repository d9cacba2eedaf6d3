//! Application state for the viewer service.

use anyhow::{Context, Result};
use std::path::PathBuf;

use overlays::{DatasetSource, FeatureSource, FileSource, HttpSource};
use viewer_common::{
    find_sphere, LayerRegistry, OverlayKind, ShareController, SphereProperties, ViewStateCodec,
    ViewerResult,
};

use crate::config::ViewerConfig;

/// Where sphere metadata is read from when no spheres overlay is configured.
const DEFAULT_SPHERE_SOURCE: &str = "/static/shapes/spheres.geojson";

/// Shared application state.
pub struct AppState {
    /// Known base layers and overlays.
    pub registry: LayerRegistry,

    /// GeoJSON datasets, from the static directory or over HTTP.
    pub source: DatasetSource,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,

    /// Public address of the map page, if configured.
    pub public_url: Option<String>,
}

impl AppState {
    /// Create application state from loaded configuration.
    pub fn new(config: &ViewerConfig, static_dir: impl Into<PathBuf>) -> Result<Self> {
        let static_dir = static_dir.into();
        let registry = config.registry().context("Invalid layer configuration")?;

        if let Some(url) = &config.public_url {
            ShareController::new(ViewStateCodec::new(&registry), url)
                .context("Invalid public_url")?;
        }

        let source = DatasetSource::new(FileSource::new(&static_dir), HttpSource::default());

        Ok(Self {
            registry,
            source,
            static_dir,
            public_url: config.public_url.clone(),
        })
    }

    pub fn codec(&self) -> ViewStateCodec<'_> {
        ViewStateCodec::new(&self.registry)
    }

    /// Share controller building links on `page_url`.
    pub fn share_controller(&self, page_url: &str) -> ViewerResult<ShareController<'_>> {
        ShareController::new(self.codec(), page_url)
    }

    /// Location of the sphere metadata collection.
    pub fn sphere_source(&self) -> &str {
        self.registry
            .overlays()
            .iter()
            .find(|o| o.kind == OverlayKind::Spheres)
            .map(|o| o.source.as_str())
            .unwrap_or(DEFAULT_SPHERE_SOURCE)
    }

    /// Metadata of one sphere, fetched fresh from its collection.
    pub async fn sphere(&self, filename: &str) -> ViewerResult<SphereProperties> {
        let collection = self.source.fetch(self.sphere_source()).await?;
        find_sphere(&collection, filename)
    }
}
