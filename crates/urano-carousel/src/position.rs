//! The single writer of the track offset.

use urano_animation::{Animatable, ExponentialDecaySpec, FloatDecayAnimationSpec, SpringSpec};
use urano_core::{RuntimeHandle, State};
use urano_ui_graphics::sanitize_extent;

use crate::config::CarouselConfig;
use crate::geometry::DragBounds;

/// Owns the horizontal offset, keeps it inside the drag bounds at rest and
/// animates programmatic moves with a spring.
pub struct PositionController {
    offset: Animatable,
    bounds: DragBounds,
    viewport_width: f32,
    elasticity: f32,
    page_fraction: f32,
    fallback_page_step: f32,
    spring: SpringSpec,
    decay: ExponentialDecaySpec,
}

impl PositionController {
    pub fn new(runtime: RuntimeHandle, config: &CarouselConfig) -> Self {
        Self {
            offset: Animatable::new(0.0, runtime),
            bounds: DragBounds::ZERO,
            viewport_width: 0.0,
            elasticity: config.elasticity.clamp(0.0, 1.0),
            page_fraction: config.page_fraction,
            fallback_page_step: config.fallback_page_step,
            spring: config.spring(),
            decay: config.decay(),
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset.value()
    }

    /// Where the offset is heading; the offset itself when idle.
    pub fn target(&self) -> f32 {
        self.offset.target()
    }

    pub fn velocity(&self) -> f32 {
        self.offset.velocity()
    }

    pub fn offset_state(&self) -> State<f32> {
        self.offset.state()
    }

    pub fn running_state(&self) -> State<bool> {
        self.offset.running_state()
    }

    pub fn is_animating(&self) -> bool {
        self.offset.is_running()
    }

    pub fn bounds(&self) -> DragBounds {
        self.bounds
    }

    pub fn spring(&self) -> SpringSpec {
        self.spring
    }

    pub fn clamp(&self, value: f32) -> f32 {
        self.bounds.clamp(value)
    }

    /// Installs new bounds and pulls the offset back inside them.
    ///
    /// An idle offset jumps; a running animation is retargeted so it still
    /// settles in range.
    pub fn set_bounds(&mut self, bounds: DragBounds) {
        self.bounds = bounds;
        if self.offset.is_running() {
            let target = self.offset.target();
            let clamped = bounds.clamp(target);
            if clamped != target {
                log::debug!("retargeting offset animation {target:.1} -> {clamped:.1}");
                self.offset.animate_to(clamped, self.spring);
            }
        } else {
            let current = self.offset.value();
            let clamped = bounds.clamp(current);
            if clamped != current {
                log::debug!("re-clamping offset {current:.1} -> {clamped:.1}");
                self.offset.snap_to(clamped);
            }
        }
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = sanitize_extent(width);
    }

    /// Maps a raw drag position to the offset shown, damping movement past
    /// either bound by the elasticity factor.
    pub fn rubber_band(&self, raw: f32) -> f32 {
        if !raw.is_finite() {
            return self.bounds.clamp(raw);
        }
        if raw > self.bounds.max {
            self.bounds.max + (raw - self.bounds.max) * self.elasticity
        } else if raw < self.bounds.min {
            self.bounds.min + (raw - self.bounds.min) * self.elasticity
        } else {
            raw
        }
    }

    /// Inverse of [`Self::rubber_band`]: the raw drag position that shows
    /// as `shown`.
    pub fn unband(&self, shown: f32) -> f32 {
        if !shown.is_finite() {
            return self.bounds.clamp(shown);
        }
        let outside = if shown > self.bounds.max {
            Some(self.bounds.max)
        } else if shown < self.bounds.min {
            Some(self.bounds.min)
        } else {
            None
        };
        match outside {
            Some(bound) if self.elasticity > 0.0 => bound + (shown - bound) / self.elasticity,
            Some(bound) => bound,
            None => shown,
        }
    }

    /// Sets the offset during a live drag. Cancels any running animation.
    pub fn set_offset(&mut self, raw: f32) {
        let value = self.rubber_band(raw);
        log::trace!("drag offset raw={raw:.1} shown={value:.1}");
        self.offset.snap_to(value);
    }

    /// Springs to `target`, clamped into bounds.
    pub fn animate_to(&mut self, target: f32) {
        let target = self.clamp(target);
        self.offset.animate_to(target, self.spring);
    }

    /// Springs to `target` (clamped) starting with `velocity` px/s.
    pub fn animate_to_with_velocity(&mut self, target: f32, velocity: f32) {
        let target = self.clamp(target);
        self.offset.animate_to_with_velocity(target, self.spring, velocity);
    }

    /// Ends a drag. With momentum the offset glides toward where the throw
    /// would stop; otherwise it only springs back from any overshoot.
    pub fn release(&mut self, velocity: f32, momentum: bool) {
        let current = self.offset.value();
        if momentum && velocity.abs() > self.decay.abs_velocity_threshold() {
            let projected = self.decay.get_target_value(current, velocity);
            let target = self.clamp(projected);
            log::debug!(
                "release with velocity {velocity:.0}px/s: projected {projected:.1}, settling at {target:.1}"
            );
            self.offset
                .animate_to_with_velocity(target, self.spring, velocity);
        } else {
            let target = self.clamp(current);
            if target != current {
                self.offset.animate_to_with_velocity(target, self.spring, 0.0);
            }
        }
    }

    /// Arrow step: a fraction of the viewport width, or the fallback before
    /// the viewport is measured.
    pub fn page_step(&self) -> f32 {
        if self.viewport_width > 0.0 {
            self.viewport_width * self.page_fraction
        } else {
            self.fallback_page_step
        }
    }

    pub fn stop(&mut self) {
        self.offset.stop();
    }

    /// Shared handle to the offset animation, for teardown hooks.
    pub(crate) fn animation(&self) -> Animatable {
        self.offset.clone()
    }
}

#[cfg(test)]
#[path = "tests/position_tests.rs"]
mod tests;
