use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::frame_clock::FrameClock;
use crate::millis_to_nanos;

pub type FrameCallbackId = u64;
pub type TimerId = u64;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct TimerEntry {
    id: TimerId,
    due_nanos: u64,
    callback: Option<Box<dyn FnOnce() + 'static>>,
}

struct RuntimeInner {
    now_nanos: Cell<u64>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    // Kept sorted by (due_nanos, id) so timers with equal deadlines fire in
    // scheduling order.
    timers: RefCell<Vec<TimerEntry>>,
    next_timer_id: Cell<u64>,
}

impl RuntimeInner {
    fn new() -> Self {
        Self {
            now_nanos: Cell::new(0),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            timers: RefCell::new(Vec::new()),
            next_timer_id: Cell::new(1),
        }
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks.borrow_mut().push_back(FrameCallbackEntry {
            id,
            callback: Some(callback),
        });
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if frame_time_nanos > self.now_nanos.get() {
            self.now_nanos.set(frame_time_nanos);
        }
        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        // Callbacks registered while draining run on the next frame.
        for callback in pending {
            callback(frame_time_nanos);
        }
    }

    fn schedule_timer(&self, delay_nanos: u64, callback: Box<dyn FnOnce() + 'static>) -> TimerId {
        let id = self.next_timer_id.get();
        self.next_timer_id.set(id + 1);
        let due_nanos = self.now_nanos.get().saturating_add(delay_nanos);
        let mut timers = self.timers.borrow_mut();
        let index = timers
            .iter()
            .position(|entry| entry.due_nanos > due_nanos)
            .unwrap_or(timers.len());
        timers.insert(
            index,
            TimerEntry {
                id,
                due_nanos,
                callback: Some(callback),
            },
        );
        id
    }

    fn cancel_timer(&self, id: TimerId) {
        let mut timers = self.timers.borrow_mut();
        if let Some(index) = timers.iter().position(|entry| entry.id == id) {
            timers.remove(index);
        }
    }

    fn pop_due_timer(&self, until_nanos: u64) -> Option<(u64, Box<dyn FnOnce() + 'static>)> {
        let mut timers = self.timers.borrow_mut();
        match timers.first() {
            Some(entry) if entry.due_nanos <= until_nanos => {
                let mut entry = timers.remove(0);
                entry.callback.take().map(|callback| (entry.due_nanos, callback))
            }
            _ => None,
        }
    }

    fn advance_to(&self, time_nanos: u64) -> usize {
        let mut fired = 0;
        // A timer may schedule another timer that is already due; keep popping
        // until nothing at or before `time_nanos` remains.
        while let Some((due, callback)) = self.pop_due_timer(time_nanos) {
            if due > self.now_nanos.get() {
                self.now_nanos.set(due);
            }
            callback();
            fired += 1;
        }
        if time_nanos > self.now_nanos.get() {
            self.now_nanos.set(time_nanos);
        }
        fired
    }

    fn next_timer_due(&self) -> Option<u64> {
        self.timers.borrow().first().map(|entry| entry.due_nanos)
    }

    fn timer_count(&self) -> usize {
        self.timers.borrow().len()
    }
}

/// Owner of the UI clock, frame callbacks and timers.
///
/// The runtime never reads the wall clock. Hosts advance it with
/// [`Runtime::advance_to`] and [`Runtime::run_frame`]; tests do the same with
/// synthetic timestamps.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new()),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }

    pub fn now_nanos(&self) -> u64 {
        self.inner.now_nanos.get()
    }

    /// Whether anything is waiting for the next frame.
    pub fn needs_frame(&self) -> bool {
        self.inner.has_frame_callbacks()
    }

    pub fn has_pending_timers(&self) -> bool {
        self.inner.next_timer_due().is_some()
    }

    pub fn next_timer_due(&self) -> Option<u64> {
        self.inner.next_timer_due()
    }

    pub fn pending_timer_count(&self) -> usize {
        self.inner.timer_count()
    }

    /// Moves the clock forward, firing every timer due at or before `time_nanos`.
    ///
    /// Returns the number of timers fired. Moving backwards is a no-op for the
    /// clock.
    pub fn advance_to(&self, time_nanos: u64) -> usize {
        self.inner.advance_to(time_nanos)
    }

    /// Advances timers to `frame_time_nanos`, then runs the frame callbacks
    /// that were pending before this call.
    pub fn run_frame(&self, frame_time_nanos: u64) {
        self.inner.advance_to(frame_time_nanos);
        self.inner.drain_frame_callbacks(frame_time_nanos);
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.inner.drain_frame_callbacks(frame_time_nanos);
    }
}

/// Weak handle to a [`Runtime`].
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn now_nanos(&self) -> u64 {
        self.inner
            .upgrade()
            .map(|inner| inner.now_nanos.get())
            .unwrap_or(0)
    }

    pub fn now_millis(&self) -> u64 {
        self.now_nanos() / crate::NANOS_PER_MILLI
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn schedule_timer(
        &self,
        delay_millis: u64,
        callback: impl FnOnce() + 'static,
    ) -> Option<TimerId> {
        self.inner
            .upgrade()
            .map(|inner| inner.schedule_timer(millis_to_nanos(delay_millis), Box::new(callback)))
    }

    pub fn cancel_timer(&self, id: TimerId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_timer(id);
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
