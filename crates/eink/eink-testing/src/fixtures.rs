//! PNG fixture builders
//!
//! Encode small in-memory images to PNG bytes, the way a remote controller
//! would send them.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

/// Encode any image as PNG
pub fn encode_png(image: &DynamicImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .expect("PNG encode into memory");
    out.into_inner()
}

/// Solid RGB image
pub fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    encode_png(&DynamicImage::ImageRgb8(RgbImage::from_pixel(
        width,
        height,
        Rgb(rgb),
    )))
}

/// Solid RGBA image (exercises the RGB conversion path)
pub fn solid_rgba_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    encode_png(&DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba(rgba),
    )))
}

/// `rgb` with a few levels of deterministic noise per channel
///
/// Solid images compress to a handful of bytes, below the bridge's minimum
/// frame size. The noise keeps the encoded PNG large while every pixel still
/// quantizes to `rgb` on any palette that contains it.
pub fn textured_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let mut state: u32 = 0x9E37_79B9;
    let img = RgbImage::from_fn(width, height, |_, _| {
        Rgb(rgb.map(|c| {
            // xorshift32
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let jitter = state.to_le_bytes()[0] % 7;
            if c > 127 {
                c.saturating_sub(jitter)
            } else {
                c.saturating_add(jitter)
            }
        }))
    });
    encode_png(&DynamicImage::ImageRgb8(img))
}

/// Horizontal red→blue gradient with a vertical green ramp
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        let r = scale(x, width);
        let g = scale(y, height);
        Rgb([r, g, 255 - r])
    });
    encode_png(&DynamicImage::ImageRgb8(img))
}

/// PNG signature followed by garbage; passes sniffing, fails decode
pub fn corrupt_png(len: usize) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.resize(len.max(8), 0xEE);
    bytes
}

fn scale(v: u32, max: u32) -> u8 {
    let max = max.saturating_sub(1).max(1);
    u8::try_from(v.min(max) * 255 / max).unwrap_or(u8::MAX)
}
