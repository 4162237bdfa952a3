//! Box-filter resampling of a square crop into a small grid.
//!
//! Each output cell covers a `side / n` square of source space. The cell
//! color is the area-weighted mean of every source pixel it overlaps,
//! including fractional coverage at cell edges. Color is accumulated
//! alpha-weighted so transparent pixels do not darken their neighbors.
//!
//! # Outside the source
//!
//! When zoomed out or panned past an edge the crop extends beyond the image.
//! Area outside the source contributes transparent black: it lowers cell
//! alpha but never changes cell color.
//!
//! # Color adjustment
//!
//! Contrast and saturation are applied once per cell to the filtered mean,
//! inside the same pass, so they are never applied twice.

use crate::adjust::ColorAdjust;
use crate::buffer::{PixelBuffer, Raster};
use crate::settings::clamp_grid_size;
use crate::source::SourceImage;
use crate::transform::{CropRegion, Transform};
use crate::ResampleError;

// Coverage below this is floating-point noise from exact cell boundaries.
const MIN_COVERAGE: f64 = 1e-9;

/// Resample `source` under `transform` into a `grid_size x grid_size` buffer.
///
/// `grid_size` is clamped into `[8, 64]` and the transform's scale into
/// `[MIN_SCALE, MAX_SCALE]`. The result is a pure function of the arguments.
///
/// ```
/// use grid_resample::{resample, ColorAdjust, SourceImage, Transform};
///
/// let src = SourceImage::filled(300, 200, [10, 120, 200, 255]).unwrap();
/// let buf = resample(&src, &Transform::IDENTITY, 16, &ColorAdjust::default()).unwrap();
/// assert_eq!(buf.grid_size(), 16);
/// assert_eq!(buf.get(3, 9), [10, 120, 200, 255]);
/// ```
pub fn resample(
    source: &SourceImage,
    transform: &Transform,
    grid_size: u32,
    adjust: &ColorAdjust,
) -> Result<PixelBuffer, ResampleError> {
    let grid_size = clamp_grid_size(grid_size);
    let transform = Transform::new(transform.x, transform.y, transform.scale);
    let crop = transform.crop_region(source.width(), source.height());
    let raster = resample_region(source, &crop, grid_size, Some(adjust))?;
    Ok(PixelBuffer::from_raster(raster))
}

/// Resample an explicit crop region into an `out_size x out_size` raster.
///
/// `adjust = None` disables color adjustment entirely. Fails with
/// [`ResampleError::Surface`] when `out_size` cannot be allocated.
pub fn resample_region(
    source: &SourceImage,
    crop: &CropRegion,
    out_size: u32,
    adjust: Option<&ColorAdjust>,
) -> Result<Raster, ResampleError> {
    let mut out = Raster::new(out_size, out_size)?;
    if !(crop.side.is_finite() && crop.side > 0.0 && crop.x.is_finite() && crop.y.is_finite()) {
        return Ok(out);
    }

    let cell = crop.side / f64::from(out_size);
    let cols = axis_coverage(crop.x, cell, out_size, source.width());
    let rows = axis_coverage(crop.y, cell, out_size, source.height());
    let area = cell * cell;
    let adjust = adjust.filter(|a| !a.is_neutral());

    for (dy, row) in rows.iter().enumerate() {
        for (dx, col) in cols.iter().enumerate() {
            let rgba = box_average(source, row, col, area, adjust);
            out.put_pixel(dx as u32, dy as u32, rgba);
        }
    }

    Ok(out)
}

/// Source pixel indices and coverage lengths for each output cell on one axis.
fn axis_coverage(start: f64, cell: f64, cells: u32, len: u32) -> Vec<Vec<(u32, f64)>> {
    let len_f = f64::from(len);
    (0..cells)
        .map(|i| {
            let lo = start + cell * f64::from(i);
            let hi = lo + cell;
            let first = lo.floor().clamp(0.0, len_f) as u32;
            let last = hi.ceil().clamp(0.0, len_f) as u32;
            (first..last)
                .filter_map(|p| {
                    let p_lo = f64::from(p);
                    let w = hi.min(p_lo + 1.0) - lo.max(p_lo);
                    (w > MIN_COVERAGE).then_some((p, w))
                })
                .collect()
        })
        .collect()
}

fn box_average(
    source: &SourceImage,
    rows: &[(u32, f64)],
    cols: &[(u32, f64)],
    area: f64,
    adjust: Option<&ColorAdjust>,
) -> [u8; 4] {
    let mut rgb = [0.0f64; 3];
    let mut alpha = 0.0f64;

    for &(py, wy) in rows {
        for &(px, wx) in cols {
            let p = source.pixel(px, py);
            let a = wy * wx * f64::from(p[3]) / 255.0;
            rgb[0] += f64::from(p[0]) * a;
            rgb[1] += f64::from(p[1]) * a;
            rgb[2] += f64::from(p[2]) * a;
            alpha += a;
        }
    }

    if alpha <= 0.0 {
        return [0, 0, 0, 0];
    }

    let mean = rgb.map(|c| c / alpha / 255.0);
    let [r, g, b] = match adjust {
        Some(adj) => adj.apply(mean),
        None => mean,
    };
    let coverage = (alpha / area).min(1.0);

    [to_u8(r), to_u8(g), to_u8(b), to_u8(coverage)]
}

#[inline]
fn to_u8(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
