//! Frame clock and scheduling
//!
//! The host calls back once per display refresh with a timestamp in
//! milliseconds. [`FrameClock`] turns those into bounded frame deltas and
//! [`drive`] keeps re-requesting frames until the step asks to stop.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::consts::MAX_FRAME_DT;

/// Delta reported for the very first frame
pub const NOMINAL_DT: f32 = 1.0 / 60.0;

/// Converts host timestamps into clamped frame deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous frame, clamped to `[0, MAX_FRAME_DT]`
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => NOMINAL_DT,
        };
        self.last_ms = Some(now_ms);
        dt.clamp(0.0, MAX_FRAME_DT)
    }
}

/// Whether the frame chain should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Something that can call back on the next display refresh
pub trait FrameScheduler {
    fn request_frame(&self, on_frame: Box<dyn FnOnce(f64)>);
}

/// Run `step` once per scheduled frame until it returns [`LoopControl::Stop`]
pub fn drive<S>(scheduler: Rc<S>, mut step: Box<dyn FnMut(f64) -> LoopControl>)
where
    S: FrameScheduler + 'static,
{
    let next = Rc::clone(&scheduler);
    scheduler.request_frame(Box::new(move |now| {
        if step(now) == LoopControl::Continue {
            drive(next, step);
        }
    }));
}

/// Scheduler fired by hand, used headless and in tests
#[derive(Default)]
pub struct ManualScheduler {
    pending: RefCell<VecDeque<Box<dyn FnOnce(f64)>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for a frame
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Deliver one frame at `now_ms`. Returns false if nothing was waiting.
    pub fn fire(&self, now_ms: f64) -> bool {
        // Release the borrow before running; the callback re-schedules
        let next = self.pending.borrow_mut().pop_front();
        match next {
            Some(callback) => {
                callback(now_ms);
                true
            }
            None => false,
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, on_frame: Box<dyn FnOnce(f64)>) {
        self.pending.borrow_mut().push_back(on_frame);
    }
}
