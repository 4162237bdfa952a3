//! Source image decoding.

use grid_resample::SourceImage;

use crate::error::PipelineError;

/// Decode PNG, JPEG or WEBP bytes into a [`SourceImage`].
///
/// Any format the `image` crate cannot read, including empty input, is a
/// [`PipelineError::Decode`].
pub fn decode_source(bytes: &[u8]) -> Result<SourceImage, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::Decode("empty image data".to_string()));
    }

    let format = image::guess_format(bytes).map_err(|e| PipelineError::Decode(e.to_string()))?;
    let decoded = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| PipelineError::Decode(e.to_string()))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();

    tracing::debug!(?format, width, height, "Decoded source image");

    Ok(SourceImage::from_rgba(width, height, rgba.into_raw())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::png_encode::encode_png;
    use grid_resample::Raster;

    fn red_green_raster() -> Raster {
        let mut raster = Raster::new(3, 2).unwrap();
        for y in 0..2 {
            for x in 0..3 {
                let px = if x == 0 { [255, 0, 0, 255] } else { [0, 255, 0, 128] };
                raster.put_pixel(x, y, px);
            }
        }
        raster
    }

    #[test]
    fn test_decode_png() {
        let raster = red_green_raster();
        let png = encode_png(&raster, false).unwrap();
        let source = decode_source(&png).unwrap();

        assert_eq!((source.width(), source.height()), (3, 2));
        assert_eq!(source.pixel(0, 1), [255, 0, 0, 255]);
        assert_eq!(source.pixel(2, 0), [0, 255, 0, 128]);
    }

    #[test]
    fn test_decode_jpeg() {
        let pixels = vec![200u8; 8 * 8 * 3];
        let mut jpeg = Vec::new();
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, 95)
            .encode(&pixels, 8, 8, image::ColorType::Rgb8)
            .unwrap();

        let source = decode_source(&jpeg).unwrap();
        assert_eq!((source.width(), source.height()), (8, 8));
        assert_eq!(source.pixel(4, 4)[3], 255);
    }

    #[test]
    fn test_decode_empty_is_error() {
        assert!(matches!(decode_source(&[]), Err(PipelineError::Decode(_))));
    }

    #[test]
    fn test_decode_garbage_is_error() {
        let err = decode_source(b"definitely not an image").unwrap_err();
        assert!(matches!(err, PipelineError::Decode(_)));
    }

    #[test]
    fn test_decode_truncated_png_is_error() {
        let png = encode_png(&red_green_raster(), false).unwrap();
        let err = decode_source(&png[..png.len() / 2]).unwrap_err();
        assert!(matches!(err, PipelineError::Decode(_)));
    }
}
