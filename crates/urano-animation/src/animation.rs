//! Frame-driven animatable values.
//!
//! An [`Animatable`] owns one `f32` and moves it toward a target on every frame
//! of the runtime's [`FrameClock`](urano_core::FrameClock). Starting a new
//! animation always supersedes the one in flight.

use std::cell::RefCell;
use std::rc::Rc;

use urano_core::{FrameCallbackRegistration, MutableState, RuntimeHandle, State};

/// Largest integration step for spring physics, in seconds.
const MAX_SPRING_STEP_SECONDS: f32 = 1.0 / 240.0;

/// Springs that have not settled after this long are snapped to their target.
const MAX_SPRING_DURATION_NANOS: u64 = 10_000_000_000;

/// A cubic bezier timing curve through (0, 0), (x1, y1), (x2, y2), (1, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn coordinate(p1: f32, p2: f32, t: f32) -> f32 {
        let inv = 1.0 - t;
        3.0 * inv * inv * t * p1 + 3.0 * inv * t * t * p2 + t * t * t
    }

    fn slope(p1: f32, p2: f32, t: f32) -> f32 {
        let inv = 1.0 - t;
        3.0 * inv * inv * p1 + 6.0 * inv * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    }

    /// Finds the curve parameter whose x coordinate equals `x`.
    fn solve_t(&self, x: f32) -> f32 {
        let mut t = x;
        for _ in 0..8 {
            let error = Self::coordinate(self.x1, self.x2, t) - x;
            if error.abs() < 1e-6 {
                return t;
            }
            let slope = Self::slope(self.x1, self.x2, t);
            if slope.abs() < 1e-6 {
                break;
            }
            t = (t - error / slope).clamp(0.0, 1.0);
        }

        // Newton stalled on a flat segment; bisect instead.
        let (mut low, mut high) = (0.0f32, 1.0f32);
        t = x;
        for _ in 0..24 {
            let sample = Self::coordinate(self.x1, self.x2, t);
            if (sample - x).abs() < 1e-6 {
                break;
            }
            if sample < x {
                low = t;
            } else {
                high = t;
            }
            t = 0.5 * (low + high);
        }
        t
    }

    pub fn transform(&self, fraction: f32) -> f32 {
        if fraction <= 0.0 {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }
        Self::coordinate(self.y1, self.y2, self.solve_t(fraction))
    }
}

/// Easing curves for tween animations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    EaseOut,
    EaseInOut,
    FastOutSlowIn,
    /// Arbitrary CSS-style `cubic-bezier(x1, y1, x2, y2)`.
    Bezier(CubicBezier),
}

impl Easing {
    /// The strong ease-out used for section reveal masks.
    pub const REVEAL: Easing = Easing::Bezier(CubicBezier::new(0.22, 1.0, 0.36, 1.0));

    /// Apply the easing function to a linear fraction in `[0, 1]`.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::EaseOut => CubicBezier::new(0.0, 0.0, 0.58, 1.0).transform(fraction),
            Easing::EaseInOut => CubicBezier::new(0.42, 0.0, 0.58, 1.0).transform(fraction),
            Easing::FastOutSlowIn => CubicBezier::new(0.4, 0.0, 0.2, 1.0).transform(fraction),
            Easing::Bezier(curve) => curve.transform(fraction),
        }
    }
}

/// Time-based animation: duration, easing and an optional start delay.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TweenSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl TweenSpec {
    pub fn new(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::new(duration_millis, Easing::Linear)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self::new(300, Easing::FastOutSlowIn)
    }
}

/// Damped harmonic oscillator with unit mass.
///
/// `damping_ratio` 1.0 is critically damped, below is bouncy, above is sluggish.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringSpec {
    pub stiffness: f32,
    pub damping_ratio: f32,
    /// Below this speed (units per second) the spring may come to rest.
    pub rest_speed: f32,
    /// Within this distance of the target the spring may come to rest.
    pub rest_delta: f32,
}

impl SpringSpec {
    pub const DEFAULT_REST_SPEED: f32 = 2.0;
    pub const DEFAULT_REST_DELTA: f32 = 0.5;

    pub fn new(stiffness: f32, damping_ratio: f32) -> Self {
        Self {
            stiffness,
            damping_ratio,
            rest_speed: Self::DEFAULT_REST_SPEED,
            rest_delta: Self::DEFAULT_REST_DELTA,
        }
    }

    /// Builds a spring from a stiffness and an absolute damping coefficient,
    /// the way web animation libraries parameterize springs.
    pub fn from_stiffness_damping(stiffness: f32, damping: f32) -> Self {
        let ratio = if stiffness > 0.0 {
            damping / (2.0 * stiffness.sqrt())
        } else {
            1.0
        };
        Self::new(stiffness, ratio)
    }

    /// Absolute damping coefficient `c` in `a = -k x - c v`.
    pub fn damping_coefficient(&self) -> f32 {
        2.0 * self.damping_ratio * self.stiffness.max(0.0).sqrt()
    }

    pub fn with_rest_thresholds(mut self, rest_speed: f32, rest_delta: f32) -> Self {
        self.rest_speed = rest_speed;
        self.rest_delta = rest_delta;
        self
    }

    pub fn is_at_rest(&self, displacement: f32, velocity: f32) -> bool {
        displacement.abs() < self.rest_delta && velocity.abs() < self.rest_speed
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::new(1500.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    Tween(TweenSpec),
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(TweenSpec::default())
    }
}

impl From<SpringSpec> for AnimationType {
    fn from(spec: SpringSpec) -> Self {
        AnimationType::Spring(spec)
    }
}

impl From<TweenSpec> for AnimationType {
    fn from(spec: TweenSpec) -> Self {
        AnimationType::Tween(spec)
    }
}

/// Animatable `f32` driven by the runtime frame clock.
pub struct Animatable {
    inner: Rc<RefCell<AnimatableInner>>,
}

struct AnimatableInner {
    state: MutableState<f32>,
    running: MutableState<bool>,
    runtime: RuntimeHandle,
    current: f32,
    velocity: f32,
    start: f32,
    target: f32,
    animation_type: AnimationType,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
}

impl AnimatableInner {
    fn cancel_frame(&mut self) {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
    }

    fn settle(&mut self) {
        self.current = self.target;
        self.start = self.target;
        self.velocity = 0.0;
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
    }
}

impl Animatable {
    pub fn new(initial: f32, runtime: RuntimeHandle) -> Self {
        let inner = AnimatableInner {
            state: MutableState::new(initial),
            running: MutableState::new(false),
            runtime,
            current: initial,
            velocity: 0.0,
            start: initial,
            target: initial,
            animation_type: AnimationType::default(),
            start_time_nanos: None,
            last_frame_nanos: None,
            registration: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    pub fn value(&self) -> f32 {
        self.inner.borrow().current
    }

    pub fn velocity(&self) -> f32 {
        self.inner.borrow().velocity
    }

    /// Current animation target; equal to [`Animatable::value`] at rest.
    pub fn target(&self) -> f32 {
        self.inner.borrow().target
    }

    pub fn animation_type(&self) -> AnimationType {
        self.inner.borrow().animation_type
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running.get()
    }

    /// Observable value, updated once per frame while animating.
    pub fn state(&self) -> State<f32> {
        self.inner.borrow().state.as_state()
    }

    /// Observable running flag.
    pub fn running_state(&self) -> State<bool> {
        self.inner.borrow().running.as_state()
    }

    pub fn animate_to(&self, target: f32, animation: impl Into<AnimationType>) {
        let velocity = self.velocity();
        self.animate_to_with_velocity(target, animation, velocity);
    }

    /// Starts an animation from the current value carrying `initial_velocity`
    /// (units per second). Tweens ignore the velocity.
    pub fn animate_to_with_velocity(
        &self,
        target: f32,
        animation: impl Into<AnimationType>,
        initial_velocity: f32,
    ) {
        let running = {
            let mut inner = self.inner.borrow_mut();
            inner.cancel_frame();
            inner.start = inner.current;
            inner.target = target;
            inner.animation_type = animation.into();
            inner.velocity = if initial_velocity.is_finite() {
                initial_velocity
            } else {
                0.0
            };
            inner.start_time_nanos = None;
            inner.last_frame_nanos = None;
            inner.running.clone()
        };
        log::trace!("animate_to target={target:.2}");
        // Notify outside the borrow; listeners are free to read the animatable.
        running.set_value(true);
        Self::schedule_frame(&self.inner);
    }

    /// Jumps to `value`, cancelling any running animation.
    pub fn snap_to(&self, value: f32) {
        let (state, running) = {
            let mut inner = self.inner.borrow_mut();
            inner.cancel_frame();
            inner.target = value;
            inner.settle();
            (inner.state.clone(), inner.running.clone())
        };
        state.set_value(value);
        running.set_value(false);
    }

    /// Stops the running animation where it currently is.
    pub fn stop(&self) {
        let running = {
            let mut inner = self.inner.borrow_mut();
            inner.cancel_frame();
            inner.target = inner.current;
            inner.settle();
            inner.running.clone()
        };
        running.set_value(false);
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner>>) {
        let runtime = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.runtime.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = runtime.frame_clock().with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        if registration.is_active() {
            this.borrow_mut().registration = Some(registration);
        } else {
            // Runtime is gone: nothing will ever drive this animation.
            let (state, running, target) = {
                let mut inner = this.borrow_mut();
                inner.settle();
                (inner.state.clone(), inner.running.clone(), inner.target)
            };
            state.set_value(target);
            running.set_value(false);
        }
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner>>, frame_time_nanos: u64) {
        let (state, running, value, finished) = {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            let finished = match inner.animation_type {
                AnimationType::Tween(spec) => Self::step_tween(&mut inner, spec, frame_time_nanos),
                AnimationType::Spring(spec) => {
                    Self::step_spring(&mut inner, spec, frame_time_nanos)
                }
            };
            if finished {
                inner.settle();
            }
            (
                inner.state.clone(),
                inner.running.clone(),
                inner.current,
                finished,
            )
        };

        state.set_value(value);
        if finished {
            running.set_value(false);
        } else {
            Self::schedule_frame(this);
        }
    }

    fn step_tween(inner: &mut AnimatableInner, spec: TweenSpec, frame_time_nanos: u64) -> bool {
        let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed = frame_time_nanos.saturating_sub(start_time);
        let delay = spec.delay_millis * urano_core::NANOS_PER_MILLI;
        if elapsed < delay {
            return false;
        }
        let duration = (spec.duration_millis * urano_core::NANOS_PER_MILLI).max(1);
        let linear = ((elapsed - delay) as f32 / duration as f32).clamp(0.0, 1.0);
        let progress = spec.easing.transform(linear);
        inner.current = inner.start + (inner.target - inner.start) * progress;
        linear >= 1.0
    }

    fn step_spring(inner: &mut AnimatableInner, spec: SpringSpec, frame_time_nanos: u64) -> bool {
        let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
        let last = inner.last_frame_nanos.replace(frame_time_nanos);
        let Some(last) = last else {
            // First frame only establishes the time base.
            return false;
        };

        let dt = frame_time_nanos.saturating_sub(last) as f32 / 1_000_000_000.0;
        let stiffness = spec.stiffness.max(0.0);
        let damping = spec.damping_coefficient();

        // Semi-implicit Euler in small fixed steps keeps stiff springs stable
        // regardless of the host frame rate.
        let mut remaining = dt;
        while remaining > 0.0 {
            let step = remaining.min(MAX_SPRING_STEP_SECONDS);
            let displacement = inner.current - inner.target;
            let acceleration = -stiffness * displacement - damping * inner.velocity;
            inner.velocity += acceleration * step;
            inner.current += inner.velocity * step;
            remaining -= step;
        }

        let timed_out = frame_time_nanos.saturating_sub(start_time) > MAX_SPRING_DURATION_NANOS;
        if timed_out {
            log::warn!(
                "spring did not settle within {}s; snapping to target",
                MAX_SPRING_DURATION_NANOS / 1_000_000_000
            );
        }
        timed_out || spec.is_at_rest(inner.current - inner.target, inner.velocity)
    }
}

impl Clone for Animatable {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
