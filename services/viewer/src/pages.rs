//! Server-rendered HTML pages.
//!
//! Pages are thin: they load the map or panorama widget from a CDN and
//! embed the data the browser shell needs as JSON, so the shell never
//! re-derives defaults or styling.

use serde::Serialize;
use viewer_common::{escape_html, LayerRegistry, SphereProperties, ViewState};

const LEAFLET_VERSION: &str = "1.9.4";
const PHOTO_SPHERE_VIEWER_VERSION: &str = "4.8.1";

/// Data embedded in the map page.
#[derive(Debug, Serialize)]
pub struct MapBootstrap<'a> {
    pub state: &'a ViewState,
    pub layers: &'a LayerRegistry,
}

/// JSON safe to place inside a `<script>` element.
fn script_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// The map page.
pub fn map_page(state: &ViewState, layers: &LayerRegistry) -> serde_json::Result<String> {
    let bootstrap = script_json(&MapBootstrap { state, layers })?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Svalbard spheres</title>
  <link rel="icon" href="/favicon.ico">
  <link rel="stylesheet" href="https://unpkg.com/leaflet@{leaflet}/dist/leaflet.css">
  <style>
    html, body, #map {{ height: 100%; margin: 0; }}
    .overlay-error {{ position: fixed; bottom: 1em; left: 1em; z-index: 1000; background: #fff3f3; border: 1px solid #c00; padding: 0.5em; }}
  </style>
</head>
<body>
  <div id="map"></div>
  <script id="viewer-bootstrap" type="application/json">{bootstrap}</script>
  <script src="https://unpkg.com/leaflet@{leaflet}/dist/leaflet.js"></script>
  <script src="/static/js/viewer.js"></script>
</body>
</html>
"#,
        leaflet = LEAFLET_VERSION,
        bootstrap = bootstrap,
    ))
}

/// The panorama page for one sphere.
pub fn sphere_page(sphere: &SphereProperties) -> String {
    let panorama = escape_html(&sphere.panorama_path());
    let caption = escape_html(&sphere.caption());
    let title = escape_html(&sphere.label);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="icon" href="/favicon.ico">
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/photo-sphere-viewer@{psv}/dist/photo-sphere-viewer.min.css">
  <style>html, body, #viewer {{ height: 100%; margin: 0; }}</style>
</head>
<body>
  <div id="viewer" data-panorama="{panorama}" data-caption="{caption}"></div>
  <script src="https://cdn.jsdelivr.net/npm/three/build/three.min.js"></script>
  <script src="https://cdn.jsdelivr.net/npm/photo-sphere-viewer@{psv}/dist/photo-sphere-viewer.min.js"></script>
  <script>
    const el = document.getElementById("viewer");
    new PhotoSphereViewer.Viewer({{
      container: el,
      panorama: el.dataset.panorama,
      caption: el.dataset.caption,
      navbar: ["autorotate", "zoom", "caption", "fullscreen"],
    }});
  </script>
</body>
</html>
"#,
        title = title,
        psv = PHOTO_SPHERE_VIEWER_VERSION,
        panorama = panorama,
        caption = caption,
    )
}

/// Page shown for an unknown sphere.
pub fn not_found_page(filename: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Not found</title></head>
<body>
  <h1>Not found</h1>
  <p>No spherical image named <code>{}</code>. <a href="/">Back to the map</a></p>
</body>
</html>
"#,
        escape_html(filename)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere() -> SphereProperties {
        SphereProperties {
            filename: "Sph_200615_1-Aabreen.jpg".to_string(),
            date: "2020-06-15".to_string(),
            label: "Åbreen".to_string(),
            author: "Kari & Ola".to_string(),
            thumbnail: "static/sphere-thumbnails/Sph_200615_1-Aabreen.thumbnail".to_string(),
        }
    }

    #[test]
    fn test_sphere_page_caption() {
        let html = sphere_page(&sphere());
        assert!(html.contains("data-panorama=\"/static/spheres/Sph_200615_1-Aabreen.jpg\""));
        assert!(html.contains("data-caption=\"Åbreen, 2020-06-15. Photographer: Kari &amp; Ola\""));
    }

    #[test]
    fn test_map_page_embeds_escaped_json() {
        let registry = LayerRegistry::builtin();
        let state = ViewState::default_for(&registry).with_overlay("</script><b>");
        let html = map_page(&state, &registry).unwrap();

        assert!(html.contains("\"lat\":78.0"));
        assert!(!html.contains("</script><b>"));
        assert!(html.contains("<\\/script><b>"));
    }

    #[test]
    fn test_not_found_page_escapes_name() {
        assert!(not_found_page("<x>.jpg").contains("&lt;x&gt;.jpg"));
    }
}
