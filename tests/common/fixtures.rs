//! Test fixtures: synthetic source images encoded as PNG.

use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
use std::io::Cursor;

pub const RED: [u8; 4] = [255, 0, 0, 255];
pub const BLUE: [u8; 4] = [0, 0, 255, 255];
pub const WHITE: [u8; 4] = [255, 255, 255, 255];

/// Encode an image as PNG bytes
pub fn encode(img: &RgbaImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut out, ImageOutputFormat::Png)
        .expect("PNG encoding should succeed");
    out.into_inner()
}

/// Solid image of one color
pub fn solid_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    encode(&RgbaImage::from_pixel(width, height, Rgba(rgba)))
}

/// Left half red, right half blue
pub fn halves_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba(RED)
        } else {
            Rgba(BLUE)
        }
    });
    encode(&img)
}

/// Red/white checkerboard with `cell` pixel squares
pub fn checker_png(side: u32, cell: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(side, side, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgba(RED)
        } else {
            Rgba(WHITE)
        }
    });
    encode(&img)
}
