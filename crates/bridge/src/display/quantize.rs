//! Palette quantization
//!
//! Maps every pixel to the nearest palette color (squared RGB distance, ties
//! to the lowest palette index). No dithering: e-paper pigments are few and
//! the remote controller is expected to pre-render for the palette.

use std::collections::HashMap;

use eink_specs::{palette, PaletteColor};
use image::RgbImage;

/// Restrict `image` to `palette` colors; an empty palette returns it unchanged
pub fn quantize(mut image: RgbImage, palette: &[PaletteColor]) -> RgbImage {
    if palette.is_empty() {
        return image;
    }

    // Frames usually hold few distinct colors; memoize per call
    let mut nearest: HashMap<[u8; 3], [u8; 3]> = HashMap::new();
    for px in image.pixels_mut() {
        px.0 = *nearest
            .entry(px.0)
            .or_insert_with(|| palette::nearest_rgb(palette, px.0));
    }

    tracing::trace!(distinct = nearest.len(), "quantized frame");
    image
}
