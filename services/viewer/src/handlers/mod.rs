//! HTTP request handlers for the viewer service.

pub mod api;
pub mod health;
pub mod pages;
