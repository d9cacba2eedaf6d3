//! Sphere Viewer Service Library
//!
//! HTTP service for the Svalbard map: the map and panorama pages, the JSON
//! API the browser shell talks to, and the static files.

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod pages;
pub mod routes;
pub mod state;
