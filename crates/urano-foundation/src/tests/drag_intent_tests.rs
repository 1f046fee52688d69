use super::*;
use urano_core::{millis_to_nanos, Runtime};

fn tracker(runtime: &Runtime) -> DragIntentTracker {
    DragIntentTracker::new(runtime.handle())
}

#[test]
fn tap_without_movement_allows_click() {
    let runtime = Runtime::new();
    let mut intent = tracker(&runtime);
    intent.on_pointer_down(Point::new(100.0, 50.0));
    assert_eq!(intent.phase(), DragIntentPhase::Tracking);
    assert_eq!(intent.on_pointer_move(Point::new(102.0, 51.0)), DragMove::Pending);
    assert_eq!(intent.on_pointer_up(), ClickDecision::Allow);
    assert_eq!(intent.phase(), DragIntentPhase::Idle);
}

#[test]
fn movement_at_threshold_is_still_a_tap() {
    let runtime = Runtime::new();
    let mut intent = tracker(&runtime);
    intent.on_pointer_down(Point::ZERO);
    assert_eq!(intent.on_pointer_move(Point::new(6.0, 0.0)), DragMove::Pending);
    assert_eq!(intent.on_pointer_up(), ClickDecision::Allow);
}

#[test]
fn horizontal_drag_suppresses_click() {
    let runtime = Runtime::new();
    let mut intent = tracker(&runtime);
    intent.on_pointer_down(Point::new(500.0, 200.0));
    let started = intent.on_pointer_move(Point::new(480.0, 202.0));
    assert_eq!(
        started,
        DragMove::Started {
            delta: Point::new(-20.0, 2.0)
        }
    );
    assert!(intent.is_dragging());
    assert_eq!(
        intent.on_pointer_move(Point::new(300.0, 260.0)).drag_delta(),
        Some(Point::new(-200.0, 60.0))
    );
    assert_eq!(intent.on_pointer_up(), ClickDecision::Suppress);
    assert!(intent.should_suppress_click());
}

#[test]
fn vertical_swipe_never_becomes_a_drag() {
    let runtime = Runtime::new();
    let mut intent = tracker(&runtime);
    intent.on_pointer_down(Point::ZERO);
    assert_eq!(intent.on_pointer_move(Point::new(10.0, 40.0)), DragMove::Pending);
    assert_eq!(intent.on_pointer_move(Point::new(20.0, 20.0)), DragMove::Pending);
    assert!(!intent.is_dragging());
    assert_eq!(intent.on_pointer_up(), ClickDecision::Allow);
}

#[test]
fn suppression_clears_after_reset_delay() {
    let runtime = Runtime::new();
    let mut intent = tracker(&runtime);
    intent.on_pointer_down(Point::ZERO);
    intent.on_pointer_move(Point::new(-50.0, 0.0));
    assert_eq!(intent.on_pointer_up(), ClickDecision::Suppress);

    runtime.advance_to(millis_to_nanos(CLICK_SUPPRESS_RESET_MILLIS - 1));
    assert!(intent.should_suppress_click());
    runtime.advance_to(millis_to_nanos(CLICK_SUPPRESS_RESET_MILLIS));
    assert_eq!(intent.click_decision(), ClickDecision::Allow);
}

#[test]
fn new_press_clears_suppression_immediately() {
    let runtime = Runtime::new();
    let mut intent = tracker(&runtime);
    intent.on_pointer_down(Point::ZERO);
    intent.on_pointer_move(Point::new(40.0, 0.0));
    intent.on_pointer_up();
    assert!(intent.should_suppress_click());

    intent.on_pointer_down(Point::new(10.0, 10.0));
    assert!(!intent.should_suppress_click());
    assert_eq!(runtime.pending_timer_count(), 0);
    assert_eq!(intent.on_pointer_up(), ClickDecision::Allow);
}

#[test]
fn cancelled_drag_still_suppresses_until_reset() {
    let runtime = Runtime::new();
    let mut intent = tracker(&runtime);
    intent.on_pointer_down(Point::ZERO);
    intent.on_pointer_move(Point::new(30.0, 0.0));
    intent.on_pointer_cancel();
    assert_eq!(intent.phase(), DragIntentPhase::Idle);
    assert!(intent.should_suppress_click());
    runtime.advance_to(millis_to_nanos(500));
    assert!(!intent.should_suppress_click());
}

#[test]
fn move_without_press_is_ignored() {
    let runtime = Runtime::new();
    let mut intent = tracker(&runtime);
    assert_eq!(intent.on_pointer_move(Point::new(100.0, 0.0)), DragMove::Ignored);
    assert_eq!(intent.press_origin(), None);
}

#[test]
fn custom_threshold_is_respected() {
    let runtime = Runtime::new();
    let mut intent = DragIntentTracker::with_threshold(runtime.handle(), 20.0, 50);
    intent.on_pointer_down(Point::ZERO);
    assert_eq!(intent.on_pointer_move(Point::new(15.0, 0.0)), DragMove::Pending);
    assert!(matches!(
        intent.on_pointer_move(Point::new(21.0, 0.0)),
        DragMove::Started { .. }
    ));
}

#[test]
fn dropping_tracker_cancels_pending_reset() {
    let runtime = Runtime::new();
    let mut intent = tracker(&runtime);
    intent.on_pointer_down(Point::ZERO);
    intent.on_pointer_move(Point::new(30.0, 0.0));
    intent.on_pointer_up();
    assert_eq!(runtime.pending_timer_count(), 1);
    drop(intent);
    assert_eq!(runtime.pending_timer_count(), 0);
}

#[test]
fn reset_mid_drag_clears_suppression_at_once() {
    let runtime = Runtime::new();
    let mut intent = tracker(&runtime);
    intent.on_pointer_down(Point::ZERO);
    intent.on_pointer_move(Point::new(30.0, 0.0));
    assert!(intent.is_dragging());

    intent.reset();
    assert_eq!(intent.phase(), DragIntentPhase::Idle);
    assert!(!intent.should_suppress_click());
    assert_eq!(runtime.pending_timer_count(), 0);
    assert_eq!(intent.on_pointer_move(Point::new(60.0, 0.0)), DragMove::Ignored);
}
