//! Frame normalization through the display adapter.

mod common;

use bridge::{AdapterOptions, BridgeError, DisplayAdapter, Phase, StatusBoard};
use common::*;
use eink_specs::{palette, PanelRegistry};
use eink_testing::{assert_frame_in_palette, assert_frame_solid, fixtures, DriverCall, FakePanel};
use platform::{HardwareProbe, NoVendorDriver};
use protocol::FrameError;

/// Any source size is resampled to exactly the panel's size.
#[test]
fn frames_are_resized_to_panel() {
    let (panel, probe) = FakePanel::new(40, 24);
    let mut adapter = hardware_adapter(panel, "5in79g");

    for (w, h) in [(100, 60), (7, 3), (40, 24), (24, 40)] {
        adapter.render(&fixtures::gradient_png(w, h)).unwrap();
    }

    let frames = probe.frames();
    assert_eq!(frames.len(), 4);
    for frame in &frames {
        assert_eq!(frame.dimensions(), (40, 24));
        assert_frame_in_palette(frame, palette::BWRY).unwrap();
    }
}

/// Transparent pixels lose their alpha without turning black.
#[test]
fn rgba_frames_drop_alpha() {
    let mut adapter = simulated_adapter("2in13v4");
    adapter
        .render(&fixtures::solid_rgba_png(10, 10, [255, 255, 255, 0]))
        .unwrap();
    assert_frame_solid(adapter.current_frame().unwrap(), [255, 255, 255]).unwrap();
}

/// Full-RGB models keep colors the palettes would map away.
#[test]
fn full_rgb_model_is_not_quantized() {
    let mut adapter = simulated_adapter("virtual-rgb");
    adapter
        .render(&fixtures::solid_png(32, 32, [12, 200, 99]))
        .unwrap();
    let frame = adapter.current_frame().unwrap();
    assert_eq!(frame.dimensions(), (800, 480));
    assert_frame_solid(frame, [12, 200, 99]).unwrap();
}

/// A corrupt payload never reaches the driver.
#[test]
fn corrupt_png_is_rejected_before_driver() {
    let (panel, probe) = FakePanel::new(40, 24);
    let mut adapter = hardware_adapter(panel, "5in79g");

    let err = adapter.render(&fixtures::corrupt_png(256)).unwrap_err();
    assert!(matches!(err, BridgeError::Frame(FrameError::InvalidContainer(_))));
    assert!(err.is_client_error());
    assert_eq!(probe.count(DriverCall::Display), 0);
    assert_eq!(adapter.phase(), Phase::Ready);
}

/// A refused frame leaves the last accepted one in place.
#[test]
fn driver_failure_keeps_previous_frame() {
    let (panel, probe) = FakePanel::new(40, 24);
    let mut adapter = hardware_adapter(panel, "7in3sce");

    adapter.render(&fixtures::solid_png(8, 8, GREEN)).unwrap();
    probe.set_fail_display(true);
    let err = adapter.render(&fixtures::solid_png(8, 8, RED)).unwrap_err();

    assert!(matches!(err, BridgeError::Hardware(_)));
    assert_eq!(adapter.phase(), Phase::Ready);
    assert_frame_solid(adapter.current_frame().unwrap(), GREEN).unwrap();
}

/// Simulation keeps a single snapshot holding the latest frame.
#[test]
fn simulation_writes_png_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let mut adapter = DisplayAdapter::new(
        HardwareProbe::unavailable("tests"),
        Box::new(NoVendorDriver),
        AdapterOptions {
            simulation_dir: Some(dir.path().to_path_buf()),
            ..AdapterOptions::default()
        },
        StatusBoard::new(),
    );
    adapter.initialize("5in79g").unwrap();

    adapter.render(&fixtures::solid_png(400, 100, YELLOW)).unwrap();
    adapter.render(&fixtures::gradient_png(50, 50)).unwrap();

    let written: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(written, vec![dir.path().join("epaper_frame_latest.png")]);

    let model = PanelRegistry::lookup("5in79g").unwrap();
    let image = image::open(&written[0]).unwrap();
    assert_eq!((image.width(), image.height()), (model.width, model.height));

    let emulator = adapter.backend().unwrap().emulator().unwrap();
    assert_eq!(emulator.stats().snapshots_written, 2);
}

/// An unwritable snapshot directory does not fail the render.
#[test]
fn snapshot_failure_is_not_a_render_failure() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut adapter = DisplayAdapter::new(
        HardwareProbe::unavailable("tests"),
        Box::new(NoVendorDriver),
        AdapterOptions {
            // A regular file cannot be used as a directory
            simulation_dir: Some(file.path().join("frames")),
            ..AdapterOptions::default()
        },
        StatusBoard::new(),
    );
    adapter.initialize("2in13v4").unwrap();

    adapter.render(&fixtures::solid_png(16, 16, [0, 0, 0])).unwrap();
    let emulator = adapter.backend().unwrap().emulator().unwrap();
    assert_eq!(emulator.stats().frames_displayed, 1);
    assert_eq!(emulator.stats().snapshot_failures, 1);
}
