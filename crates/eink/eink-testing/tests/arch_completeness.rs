//! Architecture-enforcement tests for the eink-testing API surface.
//!
//! Compilation of this file is itself an enforcement: if a method the bridge
//! tests rely on is removed or signature-changed, this test binary fails to
//! build.

use std::time::Duration;

use eink_testing::{fixtures, DriverCall, FakeFactory, FakePanel, InitBehaviour};
use platform::{DriverFactory, PanelDriver, PanelFrame};

/// Verify the probe observes calls made after the panel moved to another thread.
#[test]
fn probe_survives_move_into_thread() {
    let (mut panel, probe) = FakePanel::new(3, 3);
    std::thread::spawn(move || {
        panel.init().unwrap();
        panel.display(&PanelFrame::white(3, 3)).unwrap();
        panel.clear().unwrap();
        panel.sleep().unwrap();
    })
    .join()
    .unwrap();

    assert_eq!(
        probe.calls(),
        [
            DriverCall::Init,
            DriverCall::Display,
            DriverCall::Clear,
            DriverCall::Sleep
        ]
    );
}

/// Verify `InitBehaviour::Fail` surfaces as an error.
#[test]
fn failing_init_returns_error() {
    let (panel, _probe) = FakePanel::new(1, 1);
    let mut panel = panel.with_init(InitBehaviour::Fail);
    assert!(panel.init().is_err());
}

/// Verify a hanging init really does not return within a short window.
#[test]
fn hanging_init_does_not_return() {
    let (panel, probe) = FakePanel::new(1, 1);
    let mut panel = panel.with_init(InitBehaviour::Hang);
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let _ = panel.init();
        let _ = tx.send(());
    });
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    assert_eq!(probe.count(DriverCall::Init), 1);
}

/// Verify a factory-built driver still reports into the probe.
#[test]
fn factory_driver_reports_into_probe() {
    let (panel, probe) = FakePanel::new(4, 4);
    let factory = FakeFactory::new(panel);
    let mut driver = factory
        .open(eink_specs::DriverBinding::Waveshare7in3e)
        .unwrap();
    driver.init().unwrap();
    driver.display(&PanelFrame::white(4, 4)).unwrap();
    assert_eq!(probe.frames().len(), 1);
}

/// Verify fixtures decode back to the requested geometry.
#[test]
fn fixtures_have_requested_dimensions() {
    for png in [
        fixtures::solid_png(40, 20, [9, 9, 9]),
        fixtures::solid_rgba_png(40, 20, [9, 9, 9, 128]),
        fixtures::gradient_png(40, 20),
        fixtures::textured_png(40, 20, [9, 9, 9]),
    ] {
        let img = image::load_from_memory(&png).unwrap();
        assert_eq!((img.width(), img.height()), (40, 20));
    }
}
