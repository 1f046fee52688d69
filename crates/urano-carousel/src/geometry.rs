//! Viewport and track measurement, and the drag bounds derived from them.

use urano_core::{MutableState, State};
use urano_foundation::SizeObserver;
use urano_ui_graphics::{sanitize_extent, Size};

/// Widths of the clipping viewport and of the natural (unclipped) track.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportMetrics {
    pub viewport_width: f32,
    pub content_width: f32,
}

impl ViewportMetrics {
    /// Negative or non-finite widths become zero.
    pub fn new(viewport_width: f32, content_width: f32) -> Self {
        Self {
            viewport_width: sanitize_extent(viewport_width),
            content_width: sanitize_extent(content_width),
        }
    }

    pub fn max_drag_distance(&self) -> f32 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    pub fn bounds(&self) -> DragBounds {
        DragBounds {
            min: -self.max_drag_distance(),
            max: 0.0,
        }
    }
}

/// Inclusive range of resting offsets. `max` is always `0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragBounds {
    pub min: f32,
    pub max: f32,
}

impl DragBounds {
    pub const ZERO: DragBounds = DragBounds { min: 0.0, max: 0.0 };

    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.max;
        }
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn has_overflow(&self, epsilon: f32) -> bool {
        self.min < -epsilon
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}

impl Default for DragBounds {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Tracks viewport and track sizes and publishes the resulting bounds.
pub struct GeometryTracker {
    viewport: SizeObserver,
    track: SizeObserver,
    metrics: ViewportMetrics,
    bounds: MutableState<DragBounds>,
}

impl Default for GeometryTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryTracker {
    pub fn new() -> Self {
        Self {
            viewport: SizeObserver::new(),
            track: SizeObserver::new(),
            metrics: ViewportMetrics::default(),
            bounds: MutableState::new(DragBounds::ZERO),
        }
    }

    /// Records a viewport size. Returns `true` when it differs from the last
    /// one, meaning a recompute is due.
    pub fn set_viewport_size(&mut self, size: Size) -> bool {
        warn_if_degenerate("viewport", size);
        self.viewport.observe(size).is_some()
    }

    /// Records the natural track size. Returns `true` on a real change.
    pub fn set_track_size(&mut self, size: Size) -> bool {
        warn_if_degenerate("track", size);
        self.track.observe(size).is_some()
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport.current()
    }

    pub fn track_size(&self) -> Size {
        self.track.current()
    }

    /// Rederives metrics and bounds from the last recorded sizes.
    ///
    /// Calling it again without new sizes yields the same bounds and does not
    /// notify bounds observers.
    pub fn recompute(&mut self) -> DragBounds {
        let metrics = ViewportMetrics::new(self.viewport.current().width, self.track.current().width);
        let bounds = metrics.bounds();
        if metrics != self.metrics {
            log::debug!(
                "carousel geometry: viewport={:.1} content={:.1} min={:.1}",
                metrics.viewport_width,
                metrics.content_width,
                bounds.min
            );
        }
        self.metrics = metrics;
        self.bounds.set_value(bounds);
        bounds
    }

    pub fn metrics(&self) -> ViewportMetrics {
        self.metrics
    }

    pub fn bounds(&self) -> DragBounds {
        self.bounds.get()
    }

    pub fn bounds_state(&self) -> State<DragBounds> {
        self.bounds.as_state()
    }
}

fn warn_if_degenerate(what: &str, size: Size) {
    if !size.width.is_finite() || size.width < 0.0 {
        log::warn!("ignoring invalid {what} width {}; treating it as 0", size.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn bounds_follow_overflow() {
        let metrics = ViewportMetrics::new(1000.0, 2500.0);
        assert_eq!(metrics.max_drag_distance(), 1500.0);
        assert_eq!(metrics.bounds(), DragBounds { min: -1500.0, max: 0.0 });
    }

    #[test]
    fn content_narrower_than_viewport_has_zero_bounds() {
        assert_eq!(ViewportMetrics::new(1000.0, 600.0).bounds(), DragBounds::ZERO);
        assert_eq!(ViewportMetrics::new(0.0, 0.0).bounds(), DragBounds::ZERO);
    }

    #[test]
    fn degenerate_measurements_are_sanitized() {
        let metrics = ViewportMetrics::new(f32::NAN, -20.0);
        assert_eq!(metrics, ViewportMetrics::new(0.0, 0.0));
        let metrics = ViewportMetrics::new(-5.0, 400.0);
        assert_eq!(metrics.bounds().min, -400.0);
    }

    #[test]
    fn clamp_handles_nan_and_overshoot() {
        let bounds = DragBounds { min: -300.0, max: 0.0 };
        assert_eq!(bounds.clamp(25.0), 0.0);
        assert_eq!(bounds.clamp(-301.0), -300.0);
        assert_eq!(bounds.clamp(-120.0), -120.0);
        assert_eq!(bounds.clamp(f32::NAN), 0.0);
        assert!(bounds.contains(-300.0));
        assert!(!bounds.contains(0.5));
        assert!(bounds.has_overflow(1.0));
        assert!(!DragBounds { min: -0.5, max: 0.0 }.has_overflow(1.0));
    }

    #[test]
    fn recompute_is_idempotent_and_notifies_once() {
        let mut tracker = GeometryTracker::new();
        let notified = Rc::new(Cell::new(0));
        let counter = notified.clone();
        let _sub = tracker
            .bounds_state()
            .subscribe(move |_| counter.set(counter.get() + 1));

        assert!(tracker.set_viewport_size(Size::new(1000.0, 300.0)));
        assert!(tracker.set_track_size(Size::new(2500.0, 300.0)));
        let first = tracker.recompute();
        let second = tracker.recompute();
        assert_eq!(first, second);
        assert_eq!(notified.get(), 1);

        assert!(!tracker.set_viewport_size(Size::new(1000.0, 300.0)));
    }
}
