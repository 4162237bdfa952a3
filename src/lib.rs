//! Pixelsmith - pixel-art sprites from photographs
//!
//! HTTP editing session and CLI around the `grid-resample` core.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
