//! One-shot timers on the runtime's virtual clock.

use std::cell::RefCell;
use std::rc::Rc;

use crate::runtime::{RuntimeHandle, TimerId};

/// A scheduled timer. Dropping it cancels the callback.
pub struct TimerRegistration {
    runtime: RuntimeHandle,
    id: Option<TimerId>,
}

impl TimerRegistration {
    pub fn schedule(
        runtime: &RuntimeHandle,
        delay_millis: u64,
        callback: impl FnOnce() + 'static,
    ) -> Self {
        Self {
            runtime: runtime.clone(),
            id: runtime.schedule_timer(delay_millis, callback),
        }
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_timer(id);
        }
    }
}

impl Drop for TimerRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_timer(id);
        }
    }
}

/// A single owned timer slot.
///
/// Starting the timer again replaces the pending callback, so a component
/// never has more than one callback in flight and a stale callback can never
/// fire after a restart or after the owner is dropped.
pub struct Timer {
    runtime: RuntimeHandle,
    slot: Rc<RefCell<Option<TimerRegistration>>>,
}

impl Timer {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            runtime,
            slot: Rc::new(RefCell::new(None)),
        }
    }

    pub fn start(&self, delay_millis: u64, callback: impl FnOnce() + 'static) {
        self.cancel();
        let slot = Rc::downgrade(&self.slot);
        let registration = TimerRegistration::schedule(&self.runtime, delay_millis, move || {
            if let Some(slot) = slot.upgrade() {
                // Forget the fired registration without cancelling anything.
                if let Some(mut fired) = slot.borrow_mut().take() {
                    fired.id = None;
                }
            }
            callback();
        });
        *self.slot.borrow_mut() = Some(registration);
    }

    pub fn cancel(&self) {
        let pending = self.slot.borrow_mut().take();
        if let Some(registration) = pending {
            registration.cancel();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.slot.borrow().is_some()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.cancel();
    }
}
