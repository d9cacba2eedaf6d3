//! Viewer configuration loading and types.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use viewer_common::{BaseLayer, LayerRegistry, OverlayDef, ViewerResult, DEFAULT_BASE_LAYER};

/// Layer configuration loaded from YAML.
///
/// Sections left out of the file fall back to the built-in layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default = "builtin_base_layers")]
    pub base_layers: Vec<BaseLayer>,

    #[serde(default = "builtin_overlays")]
    pub overlays: Vec<OverlayDef>,

    #[serde(default = "default_base_layer")]
    pub default_base_layer: String,

    /// Public address of the map page, used to build share links.
    /// When unset, links are built from the request's `Host` header.
    #[serde(default)]
    pub public_url: Option<String>,
}

fn builtin_base_layers() -> Vec<BaseLayer> {
    LayerRegistry::builtin().base_layers().to_vec()
}

fn builtin_overlays() -> Vec<OverlayDef> {
    LayerRegistry::builtin().overlays().to_vec()
}

fn default_base_layer() -> String {
    DEFAULT_BASE_LAYER.to_string()
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            base_layers: builtin_base_layers(),
            overlays: builtin_overlays(),
            default_base_layer: default_base_layer(),
            public_url: None,
        }
    }
}

impl ViewerConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        // If the file doesn't exist, return default config
        if !path.exists() {
            tracing::warn!(
                "Viewer config {} does not exist, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {:?}", path))?;
        let config: ViewerConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse: {:?}", path))?;

        tracing::info!(
            base_layers = config.base_layers.len(),
            overlays = config.overlays.len(),
            "Loaded viewer config from {:?}",
            path
        );

        Ok(config)
    }

    /// Validated layer registry.
    pub fn registry(&self) -> ViewerResult<LayerRegistry> {
        LayerRegistry::new(
            self.base_layers.clone(),
            self.overlays.clone(),
            self.default_base_layer.clone(),
        )
    }
}
