//! Panel driver abstraction

use thiserror::Error;

/// Blocking driver for one physical (or simulated) e-paper panel
///
/// Calls block for the full refresh time of the panel, often tens of seconds.
/// Implementations are owned by a single render thread; they never see two
/// calls at once.
pub trait PanelDriver: Send {
    /// Bring the panel out of reset and load its waveform
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Native panel dimensions `(width, height)`
    ///
    /// Valid after a successful [`init`](Self::init) and constant afterwards.
    fn dimensions(&self) -> (u32, u32);

    /// Push a full frame and refresh
    fn display(&mut self, frame: &PanelFrame) -> Result<(), DisplayError>;

    /// Blank the panel to white
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Enter deep sleep
    fn sleep(&mut self) -> Result<(), DisplayError>;
}

impl<D: PanelDriver + ?Sized> PanelDriver for Box<D> {
    fn init(&mut self) -> Result<(), DisplayError> {
        (**self).init()
    }

    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }

    fn display(&mut self, frame: &PanelFrame) -> Result<(), DisplayError> {
        (**self).display(frame)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }

    fn sleep(&mut self) -> Result<(), DisplayError> {
        (**self).sleep()
    }
}

/// RGB8 frame sized for a panel
///
/// The buffer length is checked against `width * height * 3` at
/// construction, so a driver never receives a short or oversized buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct PanelFrame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PanelFrame {
    /// Bytes per pixel (packed RGB8)
    pub const BYTES_PER_PIXEL: usize = 3;

    /// Wrap an RGB8 buffer
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, DisplayError> {
        let expected = Self::buffer_len(width, height);
        if data.len() != expected {
            return Err(DisplayError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Solid white frame
    pub fn white(width: u32, height: u32) -> Self {
        Self::filled(width, height, [255, 255, 255])
    }

    /// Solid single-color frame
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let pixels = Self::buffer_len(width, height) / Self::BYTES_PER_PIXEL;
        let data = rgb.iter().copied().cycle().take(pixels * 3).collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGB8 bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Take the buffer back
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// RGB at `(x, y)`, or `None` out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * Self::BYTES_PER_PIXEL;
        let px = self.data.get(idx..idx + Self::BYTES_PER_PIXEL)?;
        Some([px[0], px[1], px[2]])
    }

    /// Iterate over pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.data
            .chunks_exact(Self::BYTES_PER_PIXEL)
            .map(|px| [px[0], px[1], px[2]])
    }

    fn buffer_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * Self::BYTES_PER_PIXEL
    }
}

impl core::fmt::Debug for PanelFrame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PanelFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Driver-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayError {
    /// SPI/GPIO communication failed
    #[error("display communication error: {0}")]
    Communication(String),

    /// Busy line never released
    #[error("display is busy")]
    Busy,

    /// Operation not valid in the current state (e.g. display before init)
    #[error("display in invalid state: {0}")]
    InvalidState(&'static str),

    /// Frame does not match the panel
    #[error("frame is {actual:?}, panel is {expected:?}")]
    DimensionMismatch {
        /// Panel dimensions
        expected: (u32, u32),
        /// Frame dimensions
        actual: (u32, u32),
    },

    /// Buffer length does not match `width * height * 3`
    #[error("frame buffer is {actual} bytes, expected {expected}")]
    BufferSize {
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },

    /// Writing a simulation snapshot failed
    #[error("simulation output error: {0}")]
    Output(String),
}
