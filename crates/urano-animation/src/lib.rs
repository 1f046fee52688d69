//! Animation system for the Urano UI primitives.
//!
//! Provides frame-driven animations with easing curves, spring physics and an
//! exponential decay used to project momentum.

mod animation;
mod decay_spec;

pub use animation::*;
pub use decay_spec::{ExponentialDecaySpec, FloatDecayAnimationSpec};
