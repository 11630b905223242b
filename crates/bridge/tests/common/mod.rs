//! Shared builders for bridge integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use bridge::{AdapterOptions, DisplayAdapter, RenderScheduler, StatusBoard, ValidatedFrame};
use eink_testing::{fixtures, FakeFactory, FakePanel, PanelProbe, ReleaseGate};
use platform::{HardwareProbe, NoVendorDriver};

pub const WAIT: Duration = Duration::from_secs(10);

pub const RED: [u8; 3] = [255, 0, 0];
pub const GREEN: [u8; 3] = [0, 255, 0];
pub const BLUE: [u8; 3] = [0, 0, 255];
pub const YELLOW: [u8; 3] = [255, 255, 0];

/// Adapter driving a fake hardware panel of `width`×`height`
pub fn hardware_adapter(panel: FakePanel, model: &str) -> DisplayAdapter {
    let mut adapter = DisplayAdapter::new(
        HardwareProbe::available(),
        Box::new(FakeFactory::new(panel)),
        AdapterOptions::default(),
        StatusBoard::new(),
    );
    adapter.initialize(model).unwrap();
    adapter
}

/// Adapter running in simulation without snapshots
pub fn simulated_adapter(model: &str) -> DisplayAdapter {
    let mut adapter = DisplayAdapter::new(
        HardwareProbe::unavailable("tests"),
        Box::new(NoVendorDriver),
        AdapterOptions::default(),
        StatusBoard::new(),
    );
    adapter.initialize(model).unwrap();
    adapter
}

/// Scheduler over a gated 40×24 fake Spectra 6 panel
pub fn gated_scheduler() -> (Arc<RenderScheduler>, PanelProbe, ReleaseGate) {
    let (panel, probe, gate) = FakePanel::gated(40, 24);
    let adapter = hardware_adapter(panel, "7in3sce");
    (Arc::new(RenderScheduler::spawn(adapter).unwrap()), probe, gate)
}

/// Scheduler over an ungated 40×24 fake Spectra 6 panel
pub fn fake_scheduler() -> (Arc<RenderScheduler>, PanelProbe) {
    let (panel, probe) = FakePanel::new(40, 24);
    let adapter = hardware_adapter(panel, "7in3sce");
    (Arc::new(RenderScheduler::spawn(adapter).unwrap()), probe)
}

/// Small solid PNG, validated
pub fn solid_frame(rgb: [u8; 3]) -> ValidatedFrame {
    ValidatedFrame::validate(fixtures::textured_png(16, 16, rgb)).unwrap()
}
