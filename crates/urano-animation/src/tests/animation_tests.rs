use super::*;

use std::cell::RefCell;
use std::rc::Rc;
use urano_core::Runtime;

const FRAME_NANOS: u64 = 16_666_667;

/// Pumps frames until the animatable settles, returning the sampled values.
fn run_until_idle(runtime: &Runtime, animatable: &Animatable, max_frames: usize) -> Vec<f32> {
    let mut samples = Vec::new();
    let mut frame_time = runtime.now_nanos();
    for _ in 0..max_frames {
        if !animatable.is_running() {
            break;
        }
        frame_time += FRAME_NANOS;
        runtime.run_frame(frame_time);
        samples.push(animatable.value());
    }
    samples
}

#[test]
fn tween_interpolates_and_lands_on_target() {
    let runtime = Runtime::new();
    let animatable = Animatable::new(0.0, runtime.handle());
    animatable.animate_to(1.0, TweenSpec::linear(100));
    assert!(animatable.is_running());
    assert_eq!(animatable.value(), 0.0);

    let samples = run_until_idle(&runtime, &animatable, 32);
    assert!(samples.iter().any(|value| *value > 0.0 && *value < 1.0));
    assert_eq!(*samples.last().expect("frames ran"), 1.0);
    assert!(!animatable.is_running());
    assert!(!runtime.needs_frame());
}

#[test]
fn tween_delay_holds_the_start_value() {
    let runtime = Runtime::new();
    let animatable = Animatable::new(5.0, runtime.handle());
    animatable.animate_to(10.0, TweenSpec::linear(50).with_delay(100));

    runtime.run_frame(FRAME_NANOS);
    runtime.run_frame(FRAME_NANOS * 3);
    assert_eq!(animatable.value(), 5.0);
    let samples = run_until_idle(&runtime, &animatable, 64);
    assert_eq!(*samples.last().expect("frames ran"), 10.0);
}

#[test]
fn spring_settles_exactly_on_target() {
    let runtime = Runtime::new();
    let animatable = Animatable::new(0.0, runtime.handle());
    let spec = SpringSpec::from_stiffness_damping(260.0, 34.0);
    animatable.animate_to(-850.0, spec);

    let samples = run_until_idle(&runtime, &animatable, 600);
    assert!(!animatable.is_running(), "spring must settle in finite time");
    assert_eq!(animatable.value(), -850.0);
    assert_eq!(animatable.velocity(), 0.0);
    // Near-critical damping: no meaningful overshoot past the target.
    let min = samples.iter().cloned().fold(f32::INFINITY, f32::min);
    assert!(min > -851.0, "overshoot to {min}");
}

#[test]
fn new_animation_supersedes_running_one() {
    let runtime = Runtime::new();
    let animatable = Animatable::new(0.0, runtime.handle());
    let spec = SpringSpec::from_stiffness_damping(260.0, 34.0);
    animatable.animate_to(-1000.0, spec);
    runtime.run_frame(FRAME_NANOS);
    runtime.run_frame(FRAME_NANOS * 2);
    runtime.run_frame(FRAME_NANOS * 3);

    animatable.animate_to(0.0, spec);
    assert_eq!(animatable.target(), 0.0);
    run_until_idle(&runtime, &animatable, 600);
    assert_eq!(animatable.value(), 0.0);
}

#[test]
fn snap_to_cancels_animation() {
    let runtime = Runtime::new();
    let animatable = Animatable::new(0.0, runtime.handle());
    animatable.animate_to(100.0, TweenSpec::linear(1000));
    runtime.run_frame(FRAME_NANOS);
    animatable.snap_to(-3.0);
    assert!(!animatable.is_running());
    assert!(!runtime.needs_frame());
    assert_eq!(animatable.value(), -3.0);
    assert_eq!(animatable.state().get(), -3.0);
}

#[test]
fn state_listeners_observe_every_frame_value() {
    let runtime = Runtime::new();
    let animatable = Animatable::new(0.0, runtime.handle());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _subscription = animatable
        .state()
        .subscribe(move |value| sink.borrow_mut().push(*value));

    animatable.animate_to(10.0, TweenSpec::linear(64));
    run_until_idle(&runtime, &animatable, 16);
    let seen = seen.borrow();
    assert!(seen.len() >= 2);
    assert_eq!(*seen.last().expect("values observed"), 10.0);
}

#[test]
fn animation_without_runtime_jumps_to_target() {
    let handle = {
        let runtime = Runtime::new();
        runtime.handle()
    };
    let animatable = Animatable::new(0.0, handle);
    animatable.animate_to(42.0, SpringSpec::default());
    assert!(!animatable.is_running());
    assert_eq!(animatable.value(), 42.0);
}

#[test]
fn linear_easing_is_identity() {
    assert_eq!(Easing::Linear.transform(0.0), 0.0);
    assert_eq!(Easing::Linear.transform(0.5), 0.5);
    assert_eq!(Easing::Linear.transform(1.0), 1.0);
}

#[test]
fn easing_endpoints_are_fixed() {
    for easing in [
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::FastOutSlowIn,
        Easing::REVEAL,
    ] {
        assert!(easing.transform(0.0).abs() < 0.01, "{easing:?}");
        assert!((easing.transform(1.0) - 1.0).abs() < 0.01, "{easing:?}");
        let mid = easing.transform(0.5);
        assert!(mid > 0.0 && mid < 1.01, "{easing:?} mid {mid}");
    }
}

#[test]
fn reveal_easing_front_loads_progress() {
    assert!(Easing::REVEAL.transform(0.3) > 0.6);
}

#[test]
fn spring_from_web_parameters_is_near_critical() {
    let spec = SpringSpec::from_stiffness_damping(260.0, 34.0);
    assert!((spec.damping_coefficient() - 34.0).abs() < 0.01);
    assert!(spec.damping_ratio > 0.95 && spec.damping_ratio < 1.15);
}
