//! Instrumented fake panel drivers

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use eink_specs::DriverBinding;
use platform::{DisplayError, DriverFactory, HardwareError, PanelDriver, PanelFrame};

/// What `init` does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitBehaviour {
    /// Return `Ok(())`
    #[default]
    Succeed,
    /// Return `Err(DisplayError::Busy)`
    Fail,
    /// Never return
    Hang,
}

/// One recorded driver call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCall {
    /// `init`
    Init,
    /// `display` (successful or not)
    Display,
    /// `clear`
    Clear,
    /// `sleep`
    Sleep,
}

#[derive(Default)]
struct ProbeState {
    calls: Mutex<Vec<DriverCall>>,
    frames: Mutex<Vec<PanelFrame>>,
    in_display: AtomicBool,
    overlaps: AtomicUsize,
    fail_display: AtomicBool,
    panic_display: AtomicBool,
}

/// Test-side handle onto a [`FakePanel`]
///
/// Stays valid after the panel has moved into the render worker.
#[derive(Clone, Default)]
pub struct PanelProbe {
    state: Arc<ProbeState>,
}

impl PanelProbe {
    /// Frames that reached `display` successfully, in order
    pub fn frames(&self) -> Vec<PanelFrame> {
        self.state.frames.lock().unwrap().clone()
    }

    /// Every call made on the panel, in order
    pub fn calls(&self) -> Vec<DriverCall> {
        self.state.calls.lock().unwrap().clone()
    }

    /// Number of times of a given call
    pub fn count(&self, call: DriverCall) -> usize {
        self.state
            .calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == call)
            .count()
    }

    /// Times a `display` started while another was still running
    pub fn overlaps(&self) -> usize {
        self.state.overlaps.load(Ordering::SeqCst)
    }

    /// Make subsequent `display` calls fail
    pub fn set_fail_display(&self, fail: bool) {
        self.state.fail_display.store(fail, Ordering::SeqCst);
    }

    /// Make the next `display` call panic instead of returning
    pub fn panic_next_display(&self) {
        self.state.panic_display.store(true, Ordering::SeqCst);
    }
}

/// Hand-off between a gated [`FakePanel`] and the test
pub struct ReleaseGate {
    release: Sender<()>,
    entered: Receiver<()>,
}

impl ReleaseGate {
    /// Wait until a `display` call has started; `false` on timeout
    pub fn wait_entered(&self, timeout: Duration) -> bool {
        match self.entered.recv_timeout(timeout) {
            Ok(()) => true,
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Let one blocked `display` call finish
    pub fn release(&self) {
        let _ = self.release.send(());
    }
}

/// Fake panel that records frames and detects overlapping `display` calls
pub struct FakePanel {
    width: u32,
    height: u32,
    init: InitBehaviour,
    probe: PanelProbe,
    gate: Option<(Receiver<()>, Sender<()>)>,
}

impl FakePanel {
    /// Fake panel of the given native size
    pub fn new(width: u32, height: u32) -> (Self, PanelProbe) {
        let probe = PanelProbe::default();
        let panel = Self {
            width,
            height,
            init: InitBehaviour::Succeed,
            probe: probe.clone(),
            gate: None,
        };
        (panel, probe)
    }

    /// Fake panel whose `display` blocks until released
    pub fn gated(width: u32, height: u32) -> (Self, PanelProbe, ReleaseGate) {
        let (mut panel, probe) = Self::new(width, height);
        let (release_tx, release_rx) = mpsc::channel();
        let (entered_tx, entered_rx) = mpsc::channel();
        panel.gate = Some((release_rx, entered_tx));
        let gate = ReleaseGate {
            release: release_tx,
            entered: entered_rx,
        };
        (panel, probe, gate)
    }

    /// Change what `init` does
    #[must_use]
    pub fn with_init(mut self, init: InitBehaviour) -> Self {
        self.init = init;
        self
    }

    fn record(&self, call: DriverCall) {
        self.probe.state.calls.lock().unwrap().push(call);
    }
}

impl PanelDriver for FakePanel {
    fn init(&mut self) -> Result<(), DisplayError> {
        self.record(DriverCall::Init);
        match self.init {
            InitBehaviour::Succeed => Ok(()),
            InitBehaviour::Fail => Err(DisplayError::Busy),
            InitBehaviour::Hang => loop {
                std::thread::park();
            },
        }
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn display(&mut self, frame: &PanelFrame) -> Result<(), DisplayError> {
        self.record(DriverCall::Display);
        let state = &self.probe.state;
        if state.panic_display.swap(false, Ordering::SeqCst) {
            panic!("fake panel: injected display panic");
        }
        if state.in_display.swap(true, Ordering::SeqCst) {
            state.overlaps.fetch_add(1, Ordering::SeqCst);
        }

        if let Some((release, entered)) = &self.gate {
            let _ = entered.send(());
            // A dropped gate lets everything through
            let _ = release.recv();
        }

        let result = if state.fail_display.load(Ordering::SeqCst) {
            Err(DisplayError::Communication("injected failure".into()))
        } else if frame.dimensions() != (self.width, self.height) {
            Err(DisplayError::DimensionMismatch {
                expected: (self.width, self.height),
                actual: frame.dimensions(),
            })
        } else {
            state.frames.lock().unwrap().push(frame.clone());
            Ok(())
        };

        state.in_display.store(false, Ordering::SeqCst);
        result
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.record(DriverCall::Clear);
        Ok(())
    }

    fn sleep(&mut self) -> Result<(), DisplayError> {
        self.record(DriverCall::Sleep);
        Ok(())
    }
}

/// [`DriverFactory`] that hands out one prepared driver
pub struct FakeFactory {
    driver: Mutex<Option<Box<dyn PanelDriver>>>,
    requested: Mutex<Vec<DriverBinding>>,
}

impl FakeFactory {
    /// Factory that returns `driver` on the first `open`
    pub fn new(driver: impl PanelDriver + 'static) -> Self {
        Self {
            driver: Mutex::new(Some(Box::new(driver))),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Factory that never has a driver
    pub fn empty() -> Self {
        Self {
            driver: Mutex::new(None),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Bindings passed to `open`, in order
    pub fn requested(&self) -> Vec<DriverBinding> {
        self.requested.lock().unwrap().clone()
    }
}

impl DriverFactory for FakeFactory {
    fn open(&self, binding: DriverBinding) -> Result<Box<dyn PanelDriver>, HardwareError> {
        self.requested.lock().unwrap().push(binding);
        self.driver
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| HardwareError::DriverUnavailable {
                binding: binding.as_str(),
                reason: "fake factory is empty".into(),
            })
    }
}
