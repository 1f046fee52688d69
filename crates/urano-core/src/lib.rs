//! Core runtime for the Urano UI primitives.
//!
//! Everything runs on one UI thread. The [`Runtime`] owns a virtual clock,
//! the pending frame callbacks and the pending timers; hosts drive it by
//! advancing time and draining frames. Components hold a [`RuntimeHandle`]
//! (a weak reference) so a dropped runtime silently stops scheduling.

mod disposable;
mod frame_clock;
mod host_clock;
mod runtime;
mod state;
mod timer;

pub use disposable::Disposables;
pub use frame_clock::{FrameClock, FrameCallbackRegistration};
pub use host_clock::HostClock;
pub use runtime::{FrameCallbackId, Runtime, RuntimeHandle, TimerId};
pub use state::{MutableState, State, Subscription};
pub use timer::{Timer, TimerRegistration};

pub const NANOS_PER_MILLI: u64 = 1_000_000;

/// Converts milliseconds to the nanosecond timeline used by the runtime.
pub fn millis_to_nanos(millis: u64) -> u64 {
    millis.saturating_mul(NANOS_PER_MILLI)
}
