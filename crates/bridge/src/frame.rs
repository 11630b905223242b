//! Frame validation on the calling path
//!
//! A [`ValidatedFrame`] is a PNG that decoded completely and has non-zero
//! dimensions. A frame that would fail on the render worker is refused here,
//! so it can never replace a good pending frame in the slot.
//!
//! The decoded pixels are dropped; the render worker decodes again before
//! resizing.

use std::sync::Arc;

use image::{GenericImageView, ImageFormat};
use protocol::{has_png_signature, FrameError, MIN_FRAME_LEN};

/// PNG bytes whose container and dimensions have been checked
#[derive(Clone, PartialEq, Eq)]
pub struct ValidatedFrame {
    bytes: Arc<[u8]>,
    width: u32,
    height: u32,
}

impl ValidatedFrame {
    /// Check the signature and decode the whole image
    pub fn validate(bytes: Vec<u8>) -> Result<Self, FrameError> {
        if bytes.is_empty() {
            return Err(FrameError::Empty);
        }
        if bytes.len() < MIN_FRAME_LEN {
            return Err(FrameError::TooSmall(bytes.len()));
        }
        if !has_png_signature(&bytes) {
            return Err(FrameError::InvalidContainer("missing PNG signature".into()));
        }

        let (width, height) = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .map_err(|e| FrameError::InvalidContainer(e.to_string()))?
            .dimensions();
        if width == 0 || height == 0 {
            return Err(FrameError::UnresolvableDimensions);
        }

        Ok(Self {
            bytes: bytes.into(),
            width,
            height,
        })
    }

    /// Width from the PNG header
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height from the PNG header
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The PNG bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the PNG in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; empty frames never validate
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for ValidatedFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatedFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}
