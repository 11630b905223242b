//! Render scheduler
//!
//! One worker thread owns the [`DisplayAdapter`]. Producers hand frames over
//! through a depth-1 slot:
//!
//! | Worker | Slot | `submit` outcome |
//! |--------|------|------------------|
//! | idle | — | [`SubmitOutcome::Started`] |
//! | busy | empty | [`SubmitOutcome::Queued`] |
//! | busy | occupied | [`SubmitOutcome::Coalesced`] (old pending frame dropped) |
//!
//! `submit` only takes a mutex; it never waits for a render. Renders are
//! never cancelled once started. A render that panics counts as a failed
//! render and the worker moves on to the next frame.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant, SystemTime};

use serde::Serialize;

use crate::display::DisplayAdapter;
use crate::error::SchedulerError;
use crate::frame::ValidatedFrame;
use crate::status::StatusBoard;

/// One accepted frame waiting for, or undergoing, a render
#[derive(Debug)]
pub struct RenderJob {
    /// Validated PNG
    pub frame: ValidatedFrame,
    /// When `submit` accepted it
    pub enqueued_at: Instant,
    /// Submission order, starting at 1
    pub sequence: u64,
}

/// What happened to a submitted frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Worker was idle and picks the frame up immediately
    Started,
    /// Worker is busy; the frame renders next
    Queued,
    /// Worker is busy; the frame replaced an older pending one
    Coalesced,
}

/// Receipt for a submitted frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Submission {
    /// Sequence number assigned to the frame
    pub sequence: u64,
    /// How it entered the slot
    pub outcome: SubmitOutcome,
}

#[derive(Default)]
struct Slot {
    pending: Option<RenderJob>,
    busy: bool,
    closed: bool,
    next_sequence: u64,
}

struct Shared {
    slot: Mutex<Slot>,
    work: Condvar,
    idle: Condvar,
    status: StatusBoard,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Serializes all access to the panel through one worker thread
pub struct RenderScheduler {
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<DisplayAdapter>>>,
}

impl RenderScheduler {
    /// Move `adapter` onto a new render worker
    pub fn spawn(adapter: DisplayAdapter) -> std::io::Result<Self> {
        let shared = Arc::new(Shared {
            slot: Mutex::new(Slot {
                next_sequence: 1,
                ..Slot::default()
            }),
            work: Condvar::new(),
            idle: Condvar::new(),
            status: adapter.status().clone(),
        });

        let worker_shared = Arc::clone(&shared);
        let handle = std::thread::Builder::new()
            .name("render-worker".into())
            .spawn(move || worker_loop(&worker_shared, adapter))?;

        Ok(Self {
            shared,
            worker: Mutex::new(Some(handle)),
        })
    }

    /// Hand a frame to the worker
    pub fn submit(&self, frame: ValidatedFrame) -> Result<Submission, SchedulerError> {
        let mut slot = self.shared.lock();
        if slot.closed {
            return Err(SchedulerError::ShutDown);
        }

        let sequence = slot.next_sequence;
        slot.next_sequence += 1;
        let job = RenderJob {
            frame,
            enqueued_at: Instant::now(),
            sequence,
        };

        let outcome = if !slot.busy {
            slot.busy = true;
            slot.pending = Some(job);
            self.shared.work.notify_one();
            SubmitOutcome::Started
        } else if let Some(replaced) = slot.pending.replace(job) {
            tracing::warn!(
                dropped = replaced.sequence,
                sequence,
                "panel busy; replacing pending frame"
            );
            self.shared.status.update(|s| s.coalesced_frames += 1);
            SubmitOutcome::Coalesced
        } else {
            SubmitOutcome::Queued
        };
        drop(slot);

        tracing::info!(sequence, ?outcome, "frame accepted");
        Ok(Submission { sequence, outcome })
    }

    /// Block until nothing is rendering or pending; `false` on timeout
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let slot = self.shared.lock();
        let (slot, result) = self
            .shared
            .idle
            .wait_timeout_while(slot, timeout, |s| s.busy || s.pending.is_some())
            .unwrap_or_else(PoisonError::into_inner);
        drop(slot);
        !result.timed_out()
    }

    /// True while a render is running or pending
    pub fn is_busy(&self) -> bool {
        let slot = self.shared.lock();
        slot.busy || slot.pending.is_some()
    }

    /// True once [`shutdown`](Self::shutdown) has been called
    pub fn is_closed(&self) -> bool {
        self.shared.lock().closed
    }

    /// Stop accepting frames, finish the running render and return the adapter
    ///
    /// A pending frame is discarded. The caller decides whether to clear or
    /// sleep the panel.
    pub fn shutdown(&self) -> Result<DisplayAdapter, SchedulerError> {
        {
            let mut slot = self.shared.lock();
            slot.closed = true;
            if let Some(dropped) = slot.pending.take() {
                tracing::info!(sequence = dropped.sequence, "discarding pending frame on shutdown");
            }
            self.shared.work.notify_all();
        }

        let handle = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or(SchedulerError::ShutDown)?;
        handle.join().map_err(|_| SchedulerError::WorkerPanicked)
    }
}

fn worker_loop(shared: &Shared, mut adapter: DisplayAdapter) -> DisplayAdapter {
    tracing::debug!("render worker started");
    loop {
        let job = {
            let mut slot = shared.lock();
            loop {
                // Finishing a job and taking the next happen under one lock
                if let Some(job) = slot.pending.take() {
                    slot.busy = true;
                    break job;
                }
                slot.busy = false;
                shared.idle.notify_all();
                if slot.closed {
                    tracing::debug!("render worker stopping");
                    return adapter;
                }
                slot = shared
                    .work
                    .wait(slot)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        };
        let sequence = job.sequence;
        if let Err(payload) = catch_unwind(AssertUnwindSafe(|| {
            render_job(&mut adapter, &shared.status, job);
        })) {
            let reason = panic_message(payload.as_ref());
            tracing::error!(sequence, reason, "render panicked");
            shared
                .status
                .update(|s| s.record_failure(format!("render panicked: {reason}")));
        }
    }
}

/// Text of a panic payload, when it carries one
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

fn render_job(adapter: &mut DisplayAdapter, status: &StatusBoard, job: RenderJob) {
    let waited = job.enqueued_at.elapsed();
    let started = Instant::now();
    match adapter.render(job.frame.as_bytes()) {
        Ok(()) => {
            status.update(|s| s.record_render(SystemTime::now()));
            tracing::info!(
                sequence = job.sequence,
                waited_ms = waited.as_millis(),
                render_ms = started.elapsed().as_millis(),
                "frame rendered"
            );
        }
        Err(e) => {
            tracing::error!(sequence = job.sequence, error = %e, "render failed");
            status.update(|s| s.record_failure(&e));
        }
    }
}
