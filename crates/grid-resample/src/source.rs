//! Decoded source raster.

use crate::ResampleError;

/// An uploaded or generated photograph as straight (non-premultiplied) RGBA8.
///
/// Immutable once built. Callers own it and lend it to the resampler for the
/// duration of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl SourceImage {
    /// Wrap an RGBA8 buffer of exactly `width * height * 4` bytes.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ResampleError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4));
        if width == 0 || height == 0 || expected != Some(data.len()) {
            return Err(ResampleError::InvalidSource {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a single-color image. Mostly useful in tests.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, ResampleError> {
        let count = (width as usize) * (height as usize);
        let data = rgba.iter().copied().cycle().take(count * 4).collect();
        Self::from_rgba(width, height, data)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The smaller of the two dimensions; the crop side at `scale = 1`.
    #[inline]
    pub fn min_side(&self) -> u32 {
        self.width.min(self.height)
    }

    /// Pixel at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}
