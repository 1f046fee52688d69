//! Shared gesture constants for pointer handling.
//!
//! Values are in logical pixels and milliseconds.

/// Horizontal travel, in logical pixels, after which a press becomes a drag.
///
/// The horizontal component must also dominate the vertical one, so a mostly
/// vertical swipe keeps scrolling the page instead of the track.
pub const DRAG_THRESHOLD: f32 = 6.0;

/// How long click suppression survives after the pointer is released.
///
/// Browsers and most toolkits dispatch the click for a release within the
/// same task, so a short window is enough to swallow it.
pub const CLICK_SUPPRESS_RESET_MILLIS: u64 = 100;

/// Maximum fling velocity in logical pixels per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;
