//! Frame driver: one simulation step and one render per display refresh
//!
//! The platform owns the actual animation-frame primitive; the driver only
//! tracks whether a request is outstanding so that overlapping triggers
//! (a resize redraw during a running loop) never schedule twice.

use crate::renderer::{Surface, render};
use crate::sim::{World, tick};

/// Periodic "still alive" signal measured in frame time
#[derive(Debug, Clone, PartialEq)]
pub struct Heartbeat {
    interval: f64,
    next: Option<f64>,
}

impl Heartbeat {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval: interval_ms,
            next: None,
        }
    }

    /// True once per elapsed interval; the first call only arms it
    pub fn poll(&mut self, now: f64) -> bool {
        match self.next {
            Some(next) if now >= next => {
                self.next = Some(now + self.interval);
                true
            }
            Some(_) => false,
            None => {
                self.next = Some(now + self.interval);
                false
            }
        }
    }
}

/// Animation-frame bookkeeping
#[derive(Debug, Clone)]
pub struct FrameDriver {
    pending: Option<i32>,
    heartbeat: Heartbeat,
    frames: u64,
}

impl FrameDriver {
    pub fn new(heartbeat_ms: f64) -> Self {
        Self {
            pending: None,
            heartbeat: Heartbeat::new(heartbeat_ms),
            frames: 0,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Ask for a frame unless one is already on the way.
    ///
    /// `schedule` performs the platform request and returns its handle, or
    /// `None` if the request failed.
    pub fn request(&mut self, schedule: impl FnOnce() -> Option<i32>) {
        if self.pending.is_none() {
            self.pending = schedule();
        }
    }

    /// Withdraw the outstanding request, if any
    pub fn cancel(&mut self, cancel: impl FnOnce(i32)) {
        if let Some(handle) = self.pending.take() {
            cancel(handle);
        }
    }

    /// Run the frame the platform called back for
    pub fn frame(&mut self, world: &mut World, surface: &mut dyn Surface, now: f64) {
        self.pending = None;
        tick(world, now);
        render(surface, world, now);
        self.frames += 1;

        if self.heartbeat.poll(now) {
            log::debug!("Thunk ({} frames)", self.frames);
        }
    }
}
