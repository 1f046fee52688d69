use super::*;
use urano_core::{millis_to_nanos, Runtime};

const FRAME_MILLIS: u64 = 16;

struct Harness {
    runtime: Runtime,
    now_millis: u64,
}

impl Harness {
    fn new() -> Self {
        Self {
            runtime: Runtime::new(),
            now_millis: 0,
        }
    }

    fn controller(&self, config: &CarouselConfig) -> PositionController {
        let mut controller = PositionController::new(self.runtime.handle(), config);
        controller.set_viewport_width(1000.0);
        controller.set_bounds(DragBounds {
            min: -1500.0,
            max: 0.0,
        });
        controller
    }

    fn frame(&mut self) {
        self.now_millis += FRAME_MILLIS;
        self.runtime.run_frame(millis_to_nanos(self.now_millis));
    }

    fn settle(&mut self) {
        for _ in 0..1000 {
            if !self.runtime.needs_frame() {
                return;
            }
            self.frame();
        }
        panic!("animation never settled");
    }
}

#[test]
fn rubber_band_damps_overshoot_on_both_sides() {
    let harness = Harness::new();
    let controller = harness.controller(&CarouselConfig::desktop());
    assert_eq!(controller.rubber_band(100.0), 10.0);
    assert_eq!(controller.rubber_band(-1600.0), -1510.0);
    assert_eq!(controller.rubber_band(-700.0), -700.0);

    let stiff = harness.controller(&CarouselConfig::desktop().with_elasticity(0.0));
    assert_eq!(stiff.rubber_band(100.0), 0.0);
    assert_eq!(stiff.rubber_band(-1600.0), -1500.0);
}

#[test]
fn unband_inverts_the_elastic_mapping() {
    let harness = Harness::new();
    let controller = harness.controller(&CarouselConfig::desktop());
    assert!((controller.unband(10.0) - 100.0).abs() < 1e-3);
    assert!((controller.unband(-1510.0) + 1600.0).abs() < 1e-3);
    assert_eq!(controller.unband(-700.0), -700.0);
    for shown in [2.0, 20.0, -1503.0] {
        let back = controller.rubber_band(controller.unband(shown));
        assert!((back - shown).abs() < 1e-3, "{shown} came back as {back}");
    }

    let stiff = harness.controller(&CarouselConfig::desktop().with_elasticity(0.0));
    assert_eq!(stiff.unband(5.0), 0.0);
}

#[test]
fn mobile_preset_is_stiffer_past_the_edge() {
    let harness = Harness::new();
    let controller = harness.controller(&CarouselConfig::mobile());
    assert!((controller.rubber_band(100.0) - 6.0).abs() < 1e-4);
}

#[test]
fn set_offset_applies_elasticity_and_stops_animation() {
    let mut harness = Harness::new();
    let mut controller = harness.controller(&CarouselConfig::desktop());
    controller.animate_to(-800.0);
    harness.frame();
    controller.set_offset(50.0);
    assert!(!controller.is_animating());
    assert_eq!(controller.offset(), 5.0);
}

#[test]
fn animate_to_clamps_target_and_settles_exactly() {
    let mut harness = Harness::new();
    let mut controller = harness.controller(&CarouselConfig::desktop());
    controller.animate_to(-5000.0);
    assert_eq!(controller.target(), -1500.0);
    harness.settle();
    assert_eq!(controller.offset(), -1500.0);
    assert!(!controller.is_animating());
}

#[test]
fn page_step_uses_viewport_or_fallback() {
    let harness = Harness::new();
    let mut controller = harness.controller(&CarouselConfig::desktop());
    assert_eq!(controller.page_step(), 850.0);
    controller.set_viewport_width(0.0);
    assert_eq!(controller.page_step(), 320.0);
    controller.set_viewport_width(f32::NAN);
    assert_eq!(controller.page_step(), 320.0);
}

#[test]
fn shrinking_bounds_reclamps_idle_offset() {
    let mut harness = Harness::new();
    let mut controller = harness.controller(&CarouselConfig::desktop());
    controller.animate_to(-1500.0);
    harness.settle();

    controller.set_bounds(DragBounds { min: -400.0, max: 0.0 });
    assert_eq!(controller.offset(), -400.0);
    assert!(!controller.is_animating());

    controller.set_bounds(DragBounds::ZERO);
    assert_eq!(controller.offset(), 0.0);
}

#[test]
fn shrinking_bounds_retargets_running_animation() {
    let mut harness = Harness::new();
    let mut controller = harness.controller(&CarouselConfig::desktop());
    controller.animate_to(-1500.0);
    harness.frame();
    harness.frame();
    controller.set_bounds(DragBounds { min: -600.0, max: 0.0 });
    assert_eq!(controller.target(), -600.0);
    harness.settle();
    assert_eq!(controller.offset(), -600.0);
}

#[test]
fn release_without_momentum_springs_back_from_overshoot() {
    let mut harness = Harness::new();
    let mut controller = harness.controller(&CarouselConfig::desktop());
    controller.set_offset(120.0);
    assert_eq!(controller.offset(), 12.0);
    controller.release(900.0, false);
    assert!(controller.is_animating());
    harness.settle();
    assert_eq!(controller.offset(), 0.0);
}

#[test]
fn release_inside_bounds_without_velocity_stays_put() {
    let mut harness = Harness::new();
    let mut controller = harness.controller(&CarouselConfig::desktop());
    controller.set_offset(-640.0);
    controller.release(0.0, true);
    assert!(!controller.is_animating());
    harness.settle();
    assert_eq!(controller.offset(), -640.0);
}

#[test]
fn momentum_glides_to_projected_target() {
    let mut harness = Harness::new();
    let config = CarouselConfig::desktop();
    let mut controller = harness.controller(&config);
    controller.set_offset(-200.0);
    controller.release(-1000.0, true);
    let expected = config.decay().get_target_value(-200.0, -1000.0);
    assert!((expected + 460.0).abs() < 1e-3);
    assert_eq!(controller.target(), expected);
    harness.settle();
    assert_eq!(controller.offset(), expected);
}

#[test]
fn momentum_target_is_clamped_into_bounds() {
    let mut harness = Harness::new();
    let mut controller = harness.controller(&CarouselConfig::desktop());
    controller.set_offset(-1200.0);
    controller.release(-8000.0, true);
    assert_eq!(controller.target(), -1500.0);
    harness.settle();
    assert_eq!(controller.offset(), -1500.0);
}

#[test]
fn stop_freezes_in_flight_offset() {
    let mut harness = Harness::new();
    let mut controller = harness.controller(&CarouselConfig::desktop());
    controller.animate_to(-850.0);
    for _ in 0..5 {
        harness.frame();
    }
    controller.stop();
    let frozen = controller.offset();
    assert!(frozen < 0.0 && frozen > -850.0);
    assert_eq!(controller.target(), frozen);
    assert!(!harness.runtime.needs_frame());
}
