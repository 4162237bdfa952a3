//! grid-resample: photographs to fixed-resolution pixel-art grids
//!
//! This library maps a source photograph, a square pan/zoom viewport and a
//! pair of color adjustments onto a small `n x n` color buffer, and maps
//! that buffer back up to screen or export resolution without smoothing.
//!
//! # Quick Start
//!
//! ```
//! use grid_resample::{resample, ColorAdjust, SourceImage, Transform};
//!
//! let source = SourceImage::filled(640, 480, [30, 140, 90, 255]).unwrap();
//! let buffer = resample(&source, &Transform::IDENTITY, 32, &ColorAdjust::new(10, 20)).unwrap();
//!
//! assert_eq!(buffer.grid_size(), 32);
//! let export = buffer.export_raster(16).unwrap();
//! assert_eq!(export.width(), 512);
//! ```
//!
//! # Viewport
//!
//! The sampled region is a square of side `min(width, height) / scale`,
//! centered on the image and shifted by the transform offsets:
//!
//! ```text
//! side = min(w, h) / scale
//! sx   = w / 2 - side / 2 - x
//! sy   = h / 2 - side / 2 - y
//! ```
//!
//! At `scale = 1` the square exactly covers the shorter axis; the longer
//! axis is cropped, never padded or stretched.
//!
//! # Pipeline
//!
//! ```text
//! SourceImage + Transform
//!     |
//!     v
//! CropRegion               (square, may exceed the image bounds)
//!     |
//!     v
//! Box filter               (area-weighted mean per cell, alpha-weighted)
//!     |
//!     v
//! ColorAdjust              (contrast, then saturation, once per cell)
//!     |
//!     v
//! PixelBuffer              (n x n straight RGBA8)
//!     |
//!     v
//! Nearest-neighbor magnify (preview / export)
//! ```
//!
//! # Input
//!
//! [`TransformController`] turns wheel and pointer events into transform
//! updates; [`reduce`] is the underlying pure reducer.

pub mod adjust;
pub mod buffer;
pub mod controller;
pub mod error;
pub mod resample;
pub mod settings;
pub mod source;
pub mod transform;


pub use adjust::ColorAdjust;
pub use buffer::{PixelBuffer, Raster, MAX_SURFACE_DIM};
pub use controller::{reduce, DragState, TransformController, TransformEvent};
pub use error::ResampleError;
pub use resample::{resample, resample_region};
pub use settings::{PixelSettings, MAX_GRID_SIZE, MIN_GRID_SIZE};
pub use source::SourceImage;
pub use transform::{CropRegion, Transform, MAX_SCALE, MIN_SCALE};
