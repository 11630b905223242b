//! Frame Bridge Testing Utilities
//!
//! Test doubles for everything below the render scheduler.
//!
//! # Quick start
//!
//! ```
//! use eink_testing::{fixtures, FakePanel};
//! use platform::{PanelDriver, PanelFrame};
//!
//! let (mut panel, probe) = FakePanel::new(4, 2);
//! panel.init().unwrap();
//! panel.display(&PanelFrame::filled(4, 2, [255, 0, 0])).unwrap();
//!
//! assert_eq!(probe.frames().len(), 1);
//! eink_testing::assert_frame_solid(&probe.frames()[0], [255, 0, 0]).unwrap();
//!
//! let png = fixtures::solid_png(16, 16, [0, 0, 0]);
//! assert!(png.starts_with(b"\x89PNG"));
//! ```
//!
//! # Blocking a render mid-flight
//!
//! [`FakePanel::gated`] returns a [`ReleaseGate`]: every `display` call
//! signals that it has started and then waits for [`ReleaseGate::release`].
//! Tests use this to hold the render worker busy while submitting more
//! frames.

#![warn(clippy::all)]
#![warn(clippy::dbg_macro)]
// Testing lib — println is allowed (clippy.toml has allow-print-in-tests = true)
// but we still warn on it in lib code (not test code)
#![warn(clippy::print_stdout)]
#![allow(clippy::module_name_repetitions)]
// Test doubles fail loudly; a poisoned probe means the test already failed.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod fixtures;
mod panel;

pub use panel::{DriverCall, FakeFactory, FakePanel, InitBehaviour, PanelProbe, ReleaseGate};

use eink_specs::PaletteColor;
use platform::PanelFrame;

/// Install a `tracing` subscriber that writes through the test harness
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

// ─────────────────────────────────────────────────────────────────────────────
// Frame assertions
// ─────────────────────────────────────────────────────────────────────────────

/// Assert every pixel of `frame` is `rgb`.
///
/// Returns `Err` with the first mismatching coordinate.
pub fn assert_frame_solid(frame: &PanelFrame, rgb: [u8; 3]) -> Result<(), String> {
    let width = frame.width().max(1);
    for (i, px) in frame.pixels().enumerate() {
        if px != rgb {
            let i = u32::try_from(i).unwrap_or(u32::MAX);
            return Err(format!(
                "pixel ({}, {}) is {px:?}, expected {rgb:?}",
                i % width,
                i / width
            ));
        }
    }
    Ok(())
}

/// Assert every pixel of `frame` is one of the palette colors.
pub fn assert_frame_in_palette(frame: &PanelFrame, palette: &[PaletteColor]) -> Result<(), String> {
    match frame
        .pixels()
        .find(|px| !palette.iter().any(|c| c.rgb == *px))
    {
        Some(px) => Err(format!("color {px:?} is not in the palette")),
        None => Ok(()),
    }
}

/// Number of pixels that differ between two frames of equal size.
///
/// Frames of different size count every pixel of the larger one.
pub fn frame_diff_count(a: &PanelFrame, b: &PanelFrame) -> usize {
    if a.dimensions() != b.dimensions() {
        return a.pixels().count().max(b.pixels().count());
    }
    a.pixels().zip(b.pixels()).filter(|(x, y)| x != y).count()
}
