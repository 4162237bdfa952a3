//! Lossless PNG encoding of output rasters.

use grid_resample::Raster;
use std::io::Cursor;

use crate::error::PipelineError;

/// Encode a straight RGBA raster as PNG.
///
/// Encoding uses fast settings; when `optimize` is set the result is
/// re-compressed with oxipng. Optimization failures fall back to the fast
/// encoding.
pub fn encode_png(raster: &Raster, optimize: bool) -> Result<Vec<u8>, PipelineError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, raster.width(), raster.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| PipelineError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(raster.as_bytes())
            .map_err(|e| PipelineError::PngEncode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    if !optimize {
        return Ok(png_bytes);
    }

    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => Ok(optimized),
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, using fast encoding");
            Ok(png_bytes)
        }
    }
}
