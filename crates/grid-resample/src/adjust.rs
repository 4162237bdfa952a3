//! Contrast and saturation adjustment.
//!
//! Both controls are integer percentage deltas from neutral (100%) in
//! `[-50, 50]`. Contrast scales each channel around the 0.5 midpoint;
//! saturation uses the luminance-preserving saturate matrix. Channels are
//! clamped to `[0, 1]` after each step. Everything operates on
//! unpremultiplied sRGB values in `[0, 1]`.

/// Lower bound of contrast and saturation deltas.
pub const MIN_ADJUST: i32 = -50;

/// Upper bound of contrast and saturation deltas.
pub const MAX_ADJUST: i32 = 50;

/// Clamp an adjustment delta into `[MIN_ADJUST, MAX_ADJUST]`.
#[inline]
pub fn clamp_adjust(value: i32) -> i32 {
    value.clamp(MIN_ADJUST, MAX_ADJUST)
}

// Rec. 709 luma weights used by the saturate matrix.
const LUMA_R: f64 = 0.213;
const LUMA_G: f64 = 0.715;
const LUMA_B: f64 = 0.072;

/// Contrast and saturation deltas, clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorAdjust {
    contrast: i32,
    saturation: i32,
}

impl ColorAdjust {
    /// Build from raw deltas; out-of-range values are clamped, not rejected.
    pub fn new(contrast: i32, saturation: i32) -> Self {
        Self {
            contrast: clamp_adjust(contrast),
            saturation: clamp_adjust(saturation),
        }
    }

    #[inline]
    pub fn contrast(&self) -> i32 {
        self.contrast
    }

    #[inline]
    pub fn saturation(&self) -> i32 {
        self.saturation
    }

    /// True when both deltas are zero and [`apply`](Self::apply) is the identity.
    #[inline]
    pub fn is_neutral(&self) -> bool {
        self.contrast == 0 && self.saturation == 0
    }

    #[inline]
    fn contrast_factor(&self) -> f64 {
        f64::from(100 + self.contrast) / 100.0
    }

    #[inline]
    fn saturation_factor(&self) -> f64 {
        f64::from(100 + self.saturation) / 100.0
    }

    /// Adjust one unpremultiplied color with channels in `[0, 1]`.
    ///
    /// ```
    /// use grid_resample::ColorAdjust;
    ///
    /// // Black stays black under any contrast boost.
    /// let black = [0.0, 0.0, 0.0];
    /// assert_eq!(ColorAdjust::new(40, -30).apply(black), black);
    /// ```
    pub fn apply(&self, rgb: [f64; 3]) -> [f64; 3] {
        if self.is_neutral() {
            return rgb;
        }

        let c = self.contrast_factor();
        let [r, g, b] = rgb.map(|v| ((v - 0.5) * c + 0.5).clamp(0.0, 1.0));

        let s = self.saturation_factor();
        [
            (LUMA_R + (1.0 - LUMA_R) * s) * r + (LUMA_G - LUMA_G * s) * g + (LUMA_B - LUMA_B * s) * b,
            (LUMA_R - LUMA_R * s) * r + (LUMA_G + (1.0 - LUMA_G) * s) * g + (LUMA_B - LUMA_B * s) * b,
            (LUMA_R - LUMA_R * s) * r + (LUMA_G - LUMA_G * s) * g + (LUMA_B + (1.0 - LUMA_B) * s) * b,
        ]
        .map(|v| v.clamp(0.0, 1.0))
    }
}
