//! Output rasters and nearest-neighbor magnification.

use crate::ResampleError;

/// Largest width or height any surface may have.
pub const MAX_SURFACE_DIM: u32 = 16384;

/// A straight (non-premultiplied) RGBA8 raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Allocate a transparent-black surface.
    ///
    /// Fails with [`ResampleError::Surface`] for zero or oversized dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, ResampleError> {
        if width == 0 || height == 0 || width > MAX_SURFACE_DIM || height > MAX_SURFACE_DIM {
            return Err(ResampleError::Surface { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Pixel at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    #[inline]
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Nearest-neighbor resize to `width x height`. No smoothing ever.
    ///
    /// Destination pixel `d` reads source pixel `floor(d * src / dst)`, so an
    /// integer upscale turns each source pixel into a solid block.
    pub fn scale_nearest(&self, width: u32, height: u32) -> Result<Raster, ResampleError> {
        let mut out = Raster::new(width, height)?;
        let src_x: Vec<u32> = (0..width)
            .map(|dx| (u64::from(dx) * u64::from(self.width) / u64::from(width)) as u32)
            .collect();

        for dy in 0..height {
            let sy = (u64::from(dy) * u64::from(self.height) / u64::from(height)) as u32;
            for (dx, &sx) in src_x.iter().enumerate() {
                out.put_pixel(dx as u32, dy, self.pixel(sx, sy));
            }
        }

        Ok(out)
    }
}

/// The `grid_size x grid_size` result of one resample pass.
///
/// Immutable once produced; a new pass produces a new buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    raster: Raster,
}

impl PixelBuffer {
    pub(crate) fn from_raster(raster: Raster) -> Self {
        debug_assert_eq!(raster.width(), raster.height());
        Self { raster }
    }

    /// Side length in cells.
    #[inline]
    pub fn grid_size(&self) -> u32 {
        self.raster.width()
    }

    /// Color of cell `(x, y)`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        self.raster.pixel(x, y)
    }

    #[inline]
    pub fn as_raster(&self) -> &Raster {
        &self.raster
    }

    /// Nearest-neighbor magnification to an `out_size` square.
    pub fn magnify(&self, out_size: u32) -> Result<Raster, ResampleError> {
        self.raster.scale_nearest(out_size, out_size)
    }

    /// Export surface of `grid_size * multiplier` pixels per side.
    ///
    /// ```
    /// use grid_resample::{resample, ColorAdjust, SourceImage, Transform};
    ///
    /// let src = SourceImage::filled(64, 64, [200, 10, 10, 255]).unwrap();
    /// let buf = resample(&src, &Transform::IDENTITY, 16, &ColorAdjust::default()).unwrap();
    /// let out = buf.export_raster(32).unwrap();
    /// assert_eq!((out.width(), out.height()), (512, 512));
    /// ```
    pub fn export_raster(&self, multiplier: u32) -> Result<Raster, ResampleError> {
        let side = self
            .grid_size()
            .checked_mul(multiplier)
            .filter(|&s| s > 0)
            .ok_or(ResampleError::Surface {
                width: self.grid_size().saturating_mul(multiplier),
                height: self.grid_size().saturating_mul(multiplier),
            })?;
        self.magnify(side)
    }
}
