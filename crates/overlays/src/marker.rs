//! Marker icon and shape style descriptors.
//!
//! These mirror the options of the map widget's `divIcon` and path style so
//! the browser shell can pass them through unchanged.

use serde::{Deserialize, Serialize};
use viewer_common::Rgb;

/// A CSS pin: a rotated square with one sharp corner pointing at the location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerIcon {
    pub class_name: String,
    pub icon_anchor: [i32; 2],
    pub label_anchor: [i32; 2],
    pub popup_anchor: [i32; 2],
    pub html: String,
}

impl MarkerIcon {
    /// Pin filled with `fill` and outlined with `border`.
    pub fn pin(fill: Rgb, border: Rgb) -> Self {
        let fill = fill.to_hex();
        Self {
            class_name: format!("pin-{}", fill),
            icon_anchor: [0, 0],
            label_anchor: [-6, 0],
            popup_anchor: [0, -10],
            html: format!("<span style=\"{}\" />", pin_style(&fill, &border.to_hex())),
        }
    }
}

fn pin_style(fill: &str, border: &str) -> String {
    [
        format!("background-color: {}", fill),
        "width: 1rem".to_string(),
        "height: 1rem".to_string(),
        "display: block".to_string(),
        "left: -0.5rem".to_string(),
        "top: -0.5rem".to_string(),
        "position: relative".to_string(),
        "border-radius: 1rem 1rem 0".to_string(),
        "transform: rotate(45deg)".to_string(),
        format!("border: 1px solid {}", border),
    ]
    .join("; ")
}

/// Stroke and fill of a line or polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub color: Rgb,
    pub weight: f32,
    pub fill_color: Rgb,
    pub fill_opacity: f32,
}

impl ShapeStyle {
    /// Outline in `color` with a faint fill of the same colour.
    pub fn outline(color: Rgb) -> Self {
        Self {
            color,
            weight: 2.0,
            fill_color: color,
            fill_opacity: 0.2,
        }
    }
}
