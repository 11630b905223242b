//! CPU-based RGB framebuffer for panel simulation

use image::RgbImage;
use platform::PanelFrame;

/// Last content "shown" on the simulated panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// Create new framebuffer filled with white
    pub fn new(width: u32, height: u32) -> Self {
        let frame = PanelFrame::white(width, height);
        Self {
            width,
            height,
            pixels: frame.into_bytes(),
        }
    }

    /// Copy a frame in; the caller has already checked dimensions
    pub fn load(&mut self, frame: &PanelFrame) {
        self.pixels.clear();
        self.pixels.extend_from_slice(frame.as_bytes());
    }

    /// Reset to white
    pub fn clear(&mut self) {
        self.pixels.fill(255);
    }

    /// Raw RGB8 bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// RGB at `(x, y)`, or `None` out of bounds
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        let px = self.pixels.get(idx..idx + 3)?;
        Some([px[0], px[1], px[2]])
    }

    /// True when every pixel is white
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&b| b == 255)
    }

    /// Copy out as an `image` buffer
    pub fn to_image(&self) -> Option<RgbImage> {
        RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }
}
