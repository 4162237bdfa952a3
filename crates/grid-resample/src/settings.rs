//! User-facing pixelation settings.

use crate::adjust::{clamp_adjust, ColorAdjust};

/// Smallest supported grid.
pub const MIN_GRID_SIZE: u32 = 8;

/// Largest supported grid.
pub const MAX_GRID_SIZE: u32 = 64;

/// Clamp a grid size into `[MIN_GRID_SIZE, MAX_GRID_SIZE]`.
///
/// Odd values are accepted; the even step is a UI convention only.
#[inline]
pub fn clamp_grid_size(grid_size: u32) -> u32 {
    grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE)
}

/// Grid size, color deltas and grid overlay toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSettings {
    pub grid_size: u32,
    pub contrast: i32,
    pub saturation: i32,
    pub show_grid: bool,
}

impl Default for PixelSettings {
    fn default() -> Self {
        Self {
            grid_size: 32,
            contrast: 0,
            saturation: 0,
            show_grid: true,
        }
    }
}

impl PixelSettings {
    /// Copy with every numeric field clamped into range.
    pub fn clamped(self) -> Self {
        Self {
            grid_size: clamp_grid_size(self.grid_size),
            contrast: clamp_adjust(self.contrast),
            saturation: clamp_adjust(self.saturation),
            show_grid: self.show_grid,
        }
    }

    /// The color adjustment these settings describe.
    #[inline]
    pub fn color_adjust(&self) -> ColorAdjust {
        ColorAdjust::new(self.contrast, self.saturation)
    }
}
