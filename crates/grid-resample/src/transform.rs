//! Pan/zoom viewport over the source image.
//!
//! A [`Transform`] is expressed in source-space pixels: `x`/`y` are offsets
//! of the viewport center from the image center and `scale` is a uniform
//! zoom. The visible region is always a square whose side is derived from
//! the smaller image dimension, so a non-square photo is cropped along its
//! longer axis and never stretched.

/// Lower bound of [`Transform::scale`].
pub const MIN_SCALE: f64 = 0.1;

/// Upper bound of [`Transform::scale`].
pub const MAX_SCALE: f64 = 20.0;

/// Source-space pan offsets plus uniform zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Transform {
    /// No pan, no zoom. Every new source image starts here.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };

    /// Build a transform, clamping `scale` into `[MIN_SCALE, MAX_SCALE]`.
    ///
    /// A non-finite scale falls back to `1.0`; non-finite offsets fall back
    /// to `0.0`.
    pub fn new(x: f64, y: f64, scale: f64) -> Self {
        let finite_or = |v: f64, d: f64| if v.is_finite() { v } else { d };
        Self {
            x: finite_or(x, 0.0),
            y: finite_or(y, 0.0),
            scale: clamp_scale(finite_or(scale, 1.0)),
        }
    }

    /// Square region of a `width x height` source sampled under this transform.
    ///
    /// ```
    /// use grid_resample::Transform;
    ///
    /// let crop = Transform::IDENTITY.crop_region(400, 300);
    /// assert_eq!(crop.side, 300.0);
    /// assert_eq!((crop.x, crop.y), (50.0, 0.0));
    /// ```
    pub fn crop_region(&self, width: u32, height: u32) -> CropRegion {
        let side = f64::from(width.min(height)) / self.scale;
        // Offsets are subtracted: increasing x moves the window left, which
        // moves the visible content right under a drag.
        CropRegion {
            x: f64::from(width) / 2.0 - side / 2.0 - self.x,
            y: f64::from(height) / 2.0 - side / 2.0 - self.y,
            side,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Clamp a zoom factor into the supported range.
#[inline]
pub fn clamp_scale(scale: f64) -> f64 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Top-left corner and side length of the sampled square, in source pixels.
///
/// The region may extend past the image bounds when zoomed out or panned far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub side: f64,
}
