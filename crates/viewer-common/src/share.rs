//! Shareable links for the current map view.

use serde::Serialize;
use url::Url;

use crate::error::{ViewerError, ViewerResult};
use crate::markup::escape_html;
use crate::view_state::{ViewState, ViewStateCodec};

/// A link that reproduces a view, plus the panel that presents it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareLink {
    /// Full URL: origin + path + `?` + query
    pub url: String,
    /// The encoded query string alone
    pub query: String,
    /// Dismissible panel markup (close button and the link)
    pub panel_html: String,
}

/// Builds share links relative to the page the map is served from.
#[derive(Debug, Clone)]
pub struct ShareController<'a> {
    codec: ViewStateCodec<'a>,
    page_url: String,
}

impl<'a> ShareController<'a> {
    /// `page_url` is the public address of the map page; any query or
    /// fragment on it is discarded.
    pub fn new(codec: ViewStateCodec<'a>, page_url: &str) -> ViewerResult<Self> {
        let url = Url::parse(page_url).map_err(|e| ViewerError::InvalidParameter {
            param: "public_url".to_string(),
            message: format!("'{}': {}", page_url, e),
        })?;

        if !url.has_host() {
            return Err(ViewerError::InvalidParameter {
                param: "public_url".to_string(),
                message: format!("'{}' has no host", page_url),
            });
        }

        Ok(Self {
            codec,
            page_url: format!("{}{}", url.origin().ascii_serialization(), url.path()),
        })
    }

    /// Origin and path that links are built on.
    pub fn page_url(&self) -> &str {
        &self.page_url
    }

    pub fn share(&self, state: &ViewState) -> ShareLink {
        let query = self.codec.encode(state);
        let url = format!("{}?{}", self.page_url, query);
        let panel_html = share_panel_html(&url);
        ShareLink {
            url,
            query,
            panel_html,
        }
    }
}

/// Markup for the share panel. The browser shell wires the close button.
pub fn share_panel_html(url: &str) -> String {
    let url = escape_html(url);
    format!(
        concat!(
            "<div id=\"share-popup\" style=\"background-color: white; position: fixed; left: 50%; top: 50%; ",
            "transform: translate(-60%, -50%); padding: 8px; z-index: 50000; border: 2px solid black; ",
            "border-radius: 2%; max-width: 80%;\">",
            "<button id=\"share-popup-close\">Close</button><br>",
            "<a id=\"share-popup-text\" style=\"font-size: 0.7em; color: black; word-break: break-all;\" ",
            "href=\"{url}\">{url}</a>",
            "</div>"
        ),
        url = url
    )
}
