//! Assertion helpers for carousel robot tests.

use urano_carousel::{ArrowVisibility, CarouselFrame, DragBounds};
use urano_ui_graphics::Rect;

/// Assert that a value is within `tolerance` of the expected one.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

pub fn assert_rect_approx_eq(actual: Rect, expected: Rect, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
    assert_approx_eq(
        actual.width,
        expected.width,
        tolerance,
        &format!("{} - width", msg),
    );
    assert_approx_eq(
        actual.height,
        expected.height,
        tolerance,
        &format!("{} - height", msg),
    );
}

/// Assert that a resting offset sits inside the drag bounds.
pub fn assert_offset_in_bounds(offset: f32, bounds: DragBounds, msg: &str) {
    assert!(
        bounds.contains(offset),
        "{}: offset {} outside bounds [{}, {}]",
        msg,
        offset,
        bounds.min,
        bounds.max
    );
}

pub fn assert_arrows(actual: ArrowVisibility, can_go_left: bool, can_go_right: bool, msg: &str) {
    assert_eq!(
        (actual.can_go_left, actual.can_go_right),
        (can_go_left, can_go_right),
        "{}: arrow visibility (left, right)",
        msg
    );
}

/// Assert that a frame's arrow buttons match its arrow visibility.
pub fn assert_frame_consistent(frame: &CarouselFrame, msg: &str) {
    assert_eq!(
        frame.left_arrow.is_some(),
        frame.arrows.can_go_left,
        "{}: left arrow button vs visibility",
        msg
    );
    assert_eq!(
        frame.right_arrow.is_some(),
        frame.arrows.can_go_right,
        "{}: right arrow button vs visibility",
        msg
    );
}
