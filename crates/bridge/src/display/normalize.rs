//! PNG → panel frame normalization

use eink_specs::PaletteColor;
use image::imageops::FilterType;
use image::ImageFormat;
use platform::PanelFrame;
use protocol::{has_png_signature, FrameError};

use super::quantize::quantize;

/// Decode `png`, fit it to `width`×`height`, convert to RGB8 and quantize
///
/// Frames that already match the panel are not resampled. Aspect ratio is not
/// preserved; the controller is expected to send panel-shaped frames.
pub fn normalize(
    png: &[u8],
    width: u32,
    height: u32,
    palette: &[PaletteColor],
) -> Result<PanelFrame, FrameError> {
    if !has_png_signature(png) {
        return Err(FrameError::InvalidContainer("missing PNG signature".into()));
    }

    let decoded = image::load_from_memory_with_format(png, ImageFormat::Png)
        .map_err(|e| FrameError::InvalidContainer(e.to_string()))?;
    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(FrameError::UnresolvableDimensions);
    }

    let resized = if (decoded.width(), decoded.height()) == (width, height) {
        decoded
    } else {
        tracing::debug!(
            from_width = decoded.width(),
            from_height = decoded.height(),
            width,
            height,
            "resizing frame"
        );
        decoded.resize_exact(width, height, FilterType::Lanczos3)
    };

    let rgb = quantize(resized.to_rgb8(), palette);
    PanelFrame::new(width, height, rgb.into_raw())
        .map_err(|e| FrameError::InvalidContainer(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eink_specs::palette::BWRY;
    use eink_testing::fixtures;

    #[test]
    fn test_matching_size_passes_through() {
        let png = fixtures::solid_png(8, 4, [255, 0, 0]);
        let frame = normalize(&png, 8, 4, &[]).unwrap();
        eink_testing::assert_frame_solid(&frame, [255, 0, 0]).unwrap();
    }

    #[test]
    fn test_mismatched_size_is_resized() {
        let png = fixtures::gradient_png(100, 50);
        let frame = normalize(&png, 40, 30, &[]).unwrap();
        assert_eq!(frame.dimensions(), (40, 30));
        assert_eq!(frame.as_bytes().len(), 40 * 30 * 3);
    }

    #[test]
    fn test_rgba_is_converted() {
        let png = fixtures::solid_rgba_png(10, 10, [0, 0, 0, 255]);
        let frame = normalize(&png, 10, 10, BWRY).unwrap();
        eink_testing::assert_frame_solid(&frame, [0, 0, 0]).unwrap();
    }

    #[test]
    fn test_output_in_palette() {
        let png = fixtures::gradient_png(64, 64);
        let frame = normalize(&png, 32, 32, BWRY).unwrap();
        eink_testing::assert_frame_in_palette(&frame, BWRY).unwrap();
    }

    #[test]
    fn test_corrupt_png() {
        let err = normalize(&fixtures::corrupt_png(300), 10, 10, &[]).unwrap_err();
        assert!(matches!(err, FrameError::InvalidContainer(_)));
    }
}
