use grid_resample::{ColorAdjust, PixelBuffer, Raster, SourceImage, Transform};
use tiny_skia::{ColorU8, Paint, PathBuilder, Pixmap, Stroke};

use crate::error::PipelineError;
use crate::models::{AppConfig, ExportSpec};
use crate::rendering::png_encode::encode_png;

/// What a preview is rendered from.
#[derive(Debug, Clone, Copy)]
pub enum RenderInput<'a> {
    /// Magnify an already resampled buffer.
    Buffer(&'a PixelBuffer),
    /// Re-read the source through the viewport at display resolution.
    Source {
        source: &'a SourceImage,
        transform: Transform,
        adjust: ColorAdjust,
        grid_size: u32,
    },
}

impl RenderInput<'_> {
    fn grid_size(&self) -> u32 {
        match self {
            RenderInput::Buffer(buffer) => buffer.grid_size(),
            RenderInput::Source { grid_size, .. } => *grid_size,
        }
    }
}

/// A finished export ready for the download collaborator.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

/// Renders pixel buffers for on-screen preview and file export.
///
/// All magnification is nearest-neighbor. The grid overlay is drawn on a
/// copy and never touches the buffer it was rendered from.
#[derive(Debug, Clone)]
pub struct Presenter {
    grid_rgba: [u8; 4],
    preview_cap: u32,
    optimize_png: bool,
}

impl Presenter {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            grid_rgba: config.grid.rgba(),
            preview_cap: config.preview_size,
            optimize_png: config.optimize_png,
        }
    }

    /// Largest preview side this presenter renders.
    pub fn preview_cap(&self) -> u32 {
        self.preview_cap
    }

    /// Render a square preview of side `min(size, preview cap)`.
    pub fn render_preview(
        &self,
        input: RenderInput<'_>,
        size: u32,
        show_grid: bool,
    ) -> Result<Raster, PipelineError> {
        let size = size.min(self.preview_cap);
        let raster = match input {
            RenderInput::Buffer(buffer) => buffer.magnify(size)?,
            RenderInput::Source {
                source,
                transform,
                adjust,
                ..
            } => {
                let crop = transform.crop_region(source.width(), source.height());
                grid_resample::resample_region(source, &crop, size, Some(&adjust))?
            }
        };

        if show_grid {
            self.overlay_grid(&raster, input.grid_size())
        } else {
            Ok(raster)
        }
    }

    /// Render a preview and encode it as PNG (fast settings, no optimization).
    pub fn render_preview_png(
        &self,
        input: RenderInput<'_>,
        size: u32,
        show_grid: bool,
    ) -> Result<Vec<u8>, PipelineError> {
        let raster = self.render_preview(input, size, show_grid)?;
        encode_png(&raster, false)
    }

    /// Magnify `buffer` by `multiplier` and encode it for download.
    pub fn export(
        &self,
        buffer: &PixelBuffer,
        multiplier: u32,
    ) -> Result<ExportedImage, PipelineError> {
        let spec = ExportSpec {
            grid_size: buffer.grid_size(),
            multiplier,
        };
        let raster = buffer.export_raster(multiplier)?;
        let bytes = encode_png(&raster, self.optimize_png)?;

        tracing::info!(
            grid_size = spec.grid_size,
            multiplier,
            bytes = bytes.len(),
            "Exported pixel art"
        );

        Ok(ExportedImage {
            filename: spec.filename(),
            width: raster.width(),
            height: raster.height(),
            bytes,
        })
    }

    /// Draw `cells + 1` semi-transparent lines per axis over a copy of `raster`.
    fn overlay_grid(&self, raster: &Raster, cells: u32) -> Result<Raster, PipelineError> {
        let (width, height) = (raster.width(), raster.height());
        let mut pixmap = Pixmap::new(width, height).ok_or(PipelineError::Surface { width, height })?;

        for (dst, src) in pixmap
            .pixels_mut()
            .iter_mut()
            .zip(raster.as_bytes().chunks_exact(4))
        {
            *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
        }

        let [r, g, b, a] = self.grid_rgba;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = false;
        let stroke = Stroke {
            width: 1.0,
            ..Default::default()
        };

        let mut builder = PathBuilder::new();
        for i in 0..=cells {
            let x = line_position(i, cells, width);
            builder.move_to(x, 0.0);
            builder.line_to(x, height as f32);
            let y = line_position(i, cells, height);
            builder.move_to(0.0, y);
            builder.line_to(width as f32, y);
        }
        if let Some(path) = builder.finish() {
            pixmap.stroke_path(&path, &paint, &stroke, tiny_skia::Transform::identity(), None);
        }

        let mut out = Raster::new(width, height)?;
        for (i, px) in pixmap.pixels().iter().enumerate() {
            let c = px.demultiply();
            let (x, y) = (i as u32 % width, i as u32 / width);
            out.put_pixel(x, y, [c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Ok(out)
    }
}

/// Pixel-center coordinate of grid line `i`, kept inside the surface.
///
/// Lines sit on the first pixel of each cell as nearest-neighbor
/// magnification lays them out, which is `ceil(i * extent / cells)`.
fn line_position(i: u32, cells: u32, extent: u32) -> f32 {
    let px = (u64::from(i) * u64::from(extent)).div_ceil(u64::from(cells.max(1))) as u32;
    px.min(extent.saturating_sub(1)) as f32 + 0.5
}
