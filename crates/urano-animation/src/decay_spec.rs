//! Decay animation specification used to project momentum.
//!
//! A decay has no fixed target: it starts with a velocity and slows to rest.
//! Drag release uses [`FloatDecayAnimationSpec::get_target_value`] to find
//! where a throw would naturally stop before clamping it into bounds.

/// Trait for decay animation specifications.
pub trait FloatDecayAnimationSpec {
    /// Velocity below which the decay is considered finished.
    fn abs_velocity_threshold(&self) -> f32;

    fn get_value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32;

    fn get_velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32;

    fn get_duration_nanos(&self, initial_value: f32, initial_velocity: f32) -> i64;

    /// Final resting value of the decay.
    fn get_target_value(&self, initial_value: f32, initial_velocity: f32) -> f32;
}

/// Exponential friction: `v(t) = v0 * power * e^(-t / tau)`.
///
/// The distance travelled converges to `v0 * power * tau`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExponentialDecaySpec {
    /// Scales the release velocity; lower values make throws travel less.
    pub power: f32,
    /// Time constant in milliseconds.
    pub time_constant_millis: f32,
    /// Speed (units per second) at which the decay stops.
    pub rest_speed: f32,
}

impl ExponentialDecaySpec {
    pub fn new(power: f32, time_constant_millis: f32) -> Self {
        Self {
            power,
            time_constant_millis,
            rest_speed: 2.0,
        }
    }

    fn tau_seconds(&self) -> f32 {
        (self.time_constant_millis / 1000.0).max(f32::EPSILON)
    }

    fn scaled_velocity(&self, initial_velocity: f32) -> f32 {
        if initial_velocity.is_finite() {
            initial_velocity * self.power
        } else {
            0.0
        }
    }

    fn decay_factor(&self, play_time_nanos: i64) -> f32 {
        let t = play_time_nanos.max(0) as f32 / 1_000_000_000.0;
        (-t / self.tau_seconds()).exp()
    }
}

impl Default for ExponentialDecaySpec {
    fn default() -> Self {
        Self::new(0.8, 325.0)
    }
}

impl FloatDecayAnimationSpec for ExponentialDecaySpec {
    fn abs_velocity_threshold(&self) -> f32 {
        self.rest_speed
    }

    fn get_value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let amplitude = self.scaled_velocity(initial_velocity) * self.tau_seconds();
        initial_value + amplitude * (1.0 - self.decay_factor(play_time_nanos))
    }

    fn get_velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        _initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        self.scaled_velocity(initial_velocity) * self.decay_factor(play_time_nanos)
    }

    fn get_duration_nanos(&self, _initial_value: f32, initial_velocity: f32) -> i64 {
        let speed = self.scaled_velocity(initial_velocity).abs();
        if speed <= self.rest_speed {
            return 0;
        }
        let seconds = self.tau_seconds() * (speed / self.rest_speed).ln();
        (seconds * 1_000_000_000.0) as i64
    }

    fn get_target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        initial_value + self.scaled_velocity(initial_velocity) * self.tau_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_velocity_stays_put() {
        let spec = ExponentialDecaySpec::default();
        assert_eq!(spec.get_target_value(-120.0, 0.0), -120.0);
        assert_eq!(spec.get_duration_nanos(-120.0, 0.0), 0);
    }

    #[test]
    fn target_follows_velocity_direction() {
        let spec = ExponentialDecaySpec::default();
        // 0.8 * 1000 px/s * 0.325 s
        assert!((spec.get_target_value(0.0, 1000.0) - 260.0).abs() < 0.01);
        assert!((spec.get_target_value(0.0, -1000.0) + 260.0).abs() < 0.01);
    }

    #[test]
    fn value_converges_to_target() {
        let spec = ExponentialDecaySpec::default();
        let target = spec.get_target_value(50.0, -2000.0);
        let duration = spec.get_duration_nanos(50.0, -2000.0);
        assert!(duration > 0);
        let end = spec.get_value_from_nanos(duration, 50.0, -2000.0);
        assert!((end - target).abs() < 1.0, "end {end} should be near {target}");
        let rest = spec.get_velocity_from_nanos(duration, 50.0, -2000.0);
        assert!(rest.abs() <= spec.abs_velocity_threshold() + 0.01);
    }

    #[test]
    fn non_finite_velocity_is_ignored() {
        let spec = ExponentialDecaySpec::default();
        assert_eq!(spec.get_target_value(10.0, f32::NAN), 10.0);
    }
}
