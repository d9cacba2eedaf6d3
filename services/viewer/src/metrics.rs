//! Prometheus counters for the viewer.

use metrics::counter;

pub fn record_page_view(page: &'static str) {
    counter!("viewer_page_views_total", "page" => page).increment(1);
}

pub fn record_overlay_build(overlay: &str) {
    counter!("viewer_overlay_builds_total", "overlay" => overlay.to_string()).increment(1);
}

pub fn record_overlay_failure(overlay: &str) {
    counter!("viewer_overlay_failures_total", "overlay" => overlay.to_string()).increment(1);
}

pub fn record_share_link() {
    counter!("viewer_share_links_total").increment(1);
}
