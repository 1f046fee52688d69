//! Tells a horizontal drag apart from a tap.
//!
//! A press starts in `Tracking`. Once the pointer has travelled more than the
//! threshold horizontally, and more horizontally than vertically, the gesture
//! becomes a drag and stays one until release. A click that follows a drag is
//! suppressed; the suppression clears shortly after release, or on the next
//! press, so later taps go through.

use std::cell::Cell;
use std::rc::Rc;

use urano_core::{RuntimeHandle, Timer};
use urano_ui_graphics::Point;

use crate::gesture_constants::{CLICK_SUPPRESS_RESET_MILLIS, DRAG_THRESHOLD};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragIntentPhase {
    Idle,
    Tracking,
    Dragging,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickDecision {
    Allow,
    Suppress,
}

/// Outcome of feeding a pointer move to the tracker. Deltas are measured from
/// the press position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragMove {
    /// No press in progress.
    Ignored,
    /// Still below the threshold or not horizontal enough.
    Pending,
    /// This move turned the press into a drag.
    Started { delta: Point },
    Continued { delta: Point },
}

impl DragMove {
    /// The delta for moves that belong to a drag.
    pub fn drag_delta(&self) -> Option<Point> {
        match self {
            DragMove::Started { delta } | DragMove::Continued { delta } => Some(*delta),
            DragMove::Ignored | DragMove::Pending => None,
        }
    }
}

pub struct DragIntentTracker {
    threshold: f32,
    reset_delay_millis: u64,
    phase: DragIntentPhase,
    start: Point,
    suppress_click: Rc<Cell<bool>>,
    reset_timer: Timer,
}

impl DragIntentTracker {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self::with_threshold(runtime, DRAG_THRESHOLD, CLICK_SUPPRESS_RESET_MILLIS)
    }

    pub fn with_threshold(runtime: RuntimeHandle, threshold: f32, reset_delay_millis: u64) -> Self {
        Self {
            threshold: threshold.max(0.0),
            reset_delay_millis,
            phase: DragIntentPhase::Idle,
            start: Point::ZERO,
            suppress_click: Rc::new(Cell::new(false)),
            reset_timer: Timer::new(runtime),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn phase(&self) -> DragIntentPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragIntentPhase::Dragging
    }

    /// Where the current press started, if one is in progress.
    pub fn press_origin(&self) -> Option<Point> {
        match self.phase {
            DragIntentPhase::Idle => None,
            DragIntentPhase::Tracking | DragIntentPhase::Dragging => Some(self.start),
        }
    }

    pub fn on_pointer_down(&mut self, position: Point) {
        // A new press always starts clean, even if the previous reset is
        // still pending.
        self.reset_timer.cancel();
        self.suppress_click.set(false);
        self.start = position;
        self.phase = DragIntentPhase::Tracking;
    }

    pub fn on_pointer_move(&mut self, position: Point) -> DragMove {
        let delta = position.delta_from(self.start);
        match self.phase {
            DragIntentPhase::Idle => DragMove::Ignored,
            DragIntentPhase::Tracking => {
                let dx = delta.x.abs();
                let dy = delta.y.abs();
                if dx > self.threshold && dx > dy {
                    log::trace!("drag intent confirmed after dx={dx:.1} dy={dy:.1}");
                    self.phase = DragIntentPhase::Dragging;
                    self.suppress_click.set(true);
                    DragMove::Started { delta }
                } else {
                    DragMove::Pending
                }
            }
            DragIntentPhase::Dragging => DragMove::Continued { delta },
        }
    }

    /// Ends the press. The returned decision applies to a click dispatched
    /// for this release.
    pub fn on_pointer_up(&mut self) -> ClickDecision {
        self.finish_press();
        self.click_decision()
    }

    /// The host took the pointer away (touch cancelled, capture lost).
    pub fn on_pointer_cancel(&mut self) {
        self.finish_press();
    }

    /// Forgets the press entirely. Unlike a cancel, no click suppression
    /// survives: the interaction is gone and its click will never arrive.
    pub fn reset(&mut self) {
        self.reset_timer.cancel();
        self.suppress_click.set(false);
        self.phase = DragIntentPhase::Idle;
    }

    pub fn click_decision(&self) -> ClickDecision {
        if self.suppress_click.get() {
            ClickDecision::Suppress
        } else {
            ClickDecision::Allow
        }
    }

    pub fn should_suppress_click(&self) -> bool {
        self.click_decision() == ClickDecision::Suppress
    }

    fn finish_press(&mut self) {
        self.phase = DragIntentPhase::Idle;
        if self.suppress_click.get() {
            let flag = Rc::downgrade(&self.suppress_click);
            self.reset_timer.start(self.reset_delay_millis, move || {
                if let Some(flag) = flag.upgrade() {
                    flag.set(false);
                }
            });
        }
    }
}

impl std::fmt::Debug for DragIntentTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragIntentTracker")
            .field("phase", &self.phase)
            .field("threshold", &self.threshold)
            .field("suppress_click", &self.suppress_click.get())
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/drag_intent_tests.rs"]
mod tests;
