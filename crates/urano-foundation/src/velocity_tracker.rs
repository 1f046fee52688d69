//! Release velocity estimation for drag gestures.
//!
//! Fits a least-squares line through the recent samples of a single axis and
//! reports its slope.

use smallvec::SmallVec;

const HISTORY_SIZE: usize = 20;

/// Only samples within this window before the newest one count.
const HORIZON_MILLIS: u64 = 100;

/// A gap this long between samples, or between the newest sample and the
/// release, means the pointer stopped.
pub const ASSUME_STOPPED_MILLIS: u64 = 40;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time_millis: u64,
    position: f32,
}

#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: SmallVec<[Sample; HISTORY_SIZE]>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an absolute position. Samples must arrive in time order; an
    /// older timestamp restarts the history.
    pub fn add_sample(&mut self, time_millis: u64, position: f32) {
        if !position.is_finite() {
            return;
        }
        if let Some(last) = self.samples.last() {
            if time_millis < last.time_millis {
                self.samples.clear();
            }
        }
        if self.samples.len() == HISTORY_SIZE {
            self.samples.remove(0);
        }
        self.samples.push(Sample {
            time_millis,
            position,
        });
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Velocity in units per second, measured at the newest sample.
    pub fn velocity(&self) -> f32 {
        match self.samples.last() {
            Some(newest) => self.velocity_at(newest.time_millis),
            None => 0.0,
        }
    }

    /// Velocity in units per second for a release happening at `time_millis`.
    ///
    /// Returns zero when the pointer rested longer than
    /// [`ASSUME_STOPPED_MILLIS`] before the release.
    pub fn velocity_at(&self, time_millis: u64) -> f32 {
        let Some(newest) = self.samples.last() else {
            return 0.0;
        };
        if time_millis.saturating_sub(newest.time_millis) > ASSUME_STOPPED_MILLIS {
            return 0.0;
        }

        let mut window: SmallVec<[Sample; HISTORY_SIZE]> = SmallVec::new();
        let mut previous_time = newest.time_millis;
        for sample in self.samples.iter().rev() {
            let age = newest.time_millis - sample.time_millis;
            let gap = previous_time - sample.time_millis;
            if age > HORIZON_MILLIS || gap > ASSUME_STOPPED_MILLIS {
                break;
            }
            window.push(*sample);
            previous_time = sample.time_millis;
        }
        if window.len() < 2 {
            return 0.0;
        }

        let count = window.len() as f32;
        let origin = newest.time_millis;
        let time_of = |sample: &Sample| -((origin - sample.time_millis) as f32);
        let mean_time = window.iter().map(time_of).sum::<f32>() / count;
        let mean_position = window.iter().map(|s| s.position).sum::<f32>() / count;

        let mut covariance = 0.0f32;
        let mut variance = 0.0f32;
        for sample in &window {
            let dt = time_of(sample) - mean_time;
            covariance += dt * (sample.position - mean_position);
            variance += dt * dt;
        }
        if variance <= f32::EPSILON {
            return 0.0;
        }
        let per_milli = covariance / variance;
        if per_milli.is_finite() {
            per_milli * 1000.0
        } else {
            0.0
        }
    }

    /// Like [`VelocityTracker::velocity_at`], clamped to `±max_velocity`.
    pub fn velocity_at_with_max(&self, time_millis: u64, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        self.velocity_at(time_millis)
            .clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }
}
