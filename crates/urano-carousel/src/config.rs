use urano_animation::{ExponentialDecaySpec, SpringSpec};
use urano_foundation::gesture_constants::{
    CLICK_SUPPRESS_RESET_MILLIS, DRAG_THRESHOLD, MAX_FLING_VELOCITY,
};

use crate::breakpoint::TrackLayout;
use crate::error::ConfigError;

/// Tuning for one carousel instance.
///
/// The desktop and mobile variants of the site differ only in elasticity and
/// card metrics; both are presets of this one config.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselConfig {
    /// Horizontal travel (px) before a press becomes a drag.
    pub drag_threshold: f32,
    pub click_suppress_reset_millis: u64,
    /// Fraction of overshoot applied past a bound while dragging. `0` is a
    /// hard stop.
    pub elasticity: f32,
    /// Arrow step as a fraction of the viewport width.
    pub page_fraction: f32,
    /// Arrow step used before the viewport is measured.
    pub fallback_page_step: f32,
    /// Tolerance for overflow and edge checks, in px.
    pub edge_epsilon: f32,
    pub spring_stiffness: f32,
    /// Absolute damping coefficient.
    pub spring_damping: f32,
    /// Keep travelling after a fast release.
    pub momentum: bool,
    pub decay_power: f32,
    pub decay_time_constant_millis: f32,
    pub max_fling_velocity: f32,
    pub layout: TrackLayout,
}

impl CarouselConfig {
    pub fn desktop() -> Self {
        Self {
            drag_threshold: DRAG_THRESHOLD,
            click_suppress_reset_millis: CLICK_SUPPRESS_RESET_MILLIS,
            elasticity: 0.1,
            page_fraction: 0.85,
            fallback_page_step: 320.0,
            edge_epsilon: 1.0,
            spring_stiffness: 260.0,
            spring_damping: 34.0,
            momentum: true,
            decay_power: 0.8,
            decay_time_constant_millis: 325.0,
            max_fling_velocity: MAX_FLING_VELOCITY,
            layout: TrackLayout::desktop(),
        }
    }

    pub fn mobile() -> Self {
        Self {
            elasticity: 0.06,
            layout: TrackLayout::mobile(),
            ..Self::desktop()
        }
    }

    pub fn with_drag_threshold(mut self, threshold: f32) -> Self {
        self.drag_threshold = threshold;
        self
    }

    pub fn with_elasticity(mut self, elasticity: f32) -> Self {
        self.elasticity = elasticity;
        self
    }

    pub fn with_page_fraction(mut self, fraction: f32) -> Self {
        self.page_fraction = fraction;
        self
    }

    pub fn with_spring(mut self, stiffness: f32, damping: f32) -> Self {
        self.spring_stiffness = stiffness;
        self.spring_damping = damping;
        self
    }

    pub fn with_momentum(mut self, momentum: bool) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn with_layout(mut self, layout: TrackLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.drag_threshold));
        }
        if !(0.0..=1.0).contains(&self.elasticity) {
            return Err(ConfigError::ElasticityOutOfRange(self.elasticity));
        }
        if !(self.page_fraction > 0.0 && self.page_fraction <= 1.0) {
            return Err(ConfigError::PageFractionOutOfRange(self.page_fraction));
        }
        if !self.fallback_page_step.is_finite() || self.fallback_page_step <= 0.0 {
            return Err(ConfigError::InvalidFallbackStep(self.fallback_page_step));
        }
        if !self.edge_epsilon.is_finite() || self.edge_epsilon < 0.0 {
            return Err(ConfigError::InvalidEpsilon(self.edge_epsilon));
        }
        if !self.spring_stiffness.is_finite() || self.spring_stiffness <= 0.0 {
            return Err(ConfigError::NonPositiveStiffness(self.spring_stiffness));
        }
        if !self.spring_damping.is_finite() || self.spring_damping < 0.0 {
            return Err(ConfigError::NegativeDamping(self.spring_damping));
        }
        if !self.max_fling_velocity.is_finite() || self.max_fling_velocity <= 0.0 {
            return Err(ConfigError::InvalidFlingVelocity(self.max_fling_velocity));
        }
        Ok(())
    }

    pub fn spring(&self) -> SpringSpec {
        SpringSpec::from_stiffness_damping(self.spring_stiffness, self.spring_damping)
    }

    pub fn decay(&self) -> ExponentialDecaySpec {
        ExponentialDecaySpec::new(self.decay_power, self.decay_time_constant_millis)
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::desktop()
    }
}
