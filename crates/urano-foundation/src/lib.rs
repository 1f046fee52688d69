//! Input foundation for the Urano UI primitives: pointer events, velocity
//! tracking, size observation and horizontal drag intent.

pub mod gesture_constants;
pub mod gestures;
pub mod input;
mod size_observer;
mod velocity_tracker;

pub use gestures::drag_intent::{ClickDecision, DragIntentPhase, DragIntentTracker, DragMove};
pub use input::{
    PointerButton, PointerButtons, PointerEvent, PointerEventKind, PointerId, PointerType,
    TouchAction,
};
pub use size_observer::SizeObserver;
pub use velocity_tracker::VelocityTracker;

pub mod prelude {
    pub use crate::gesture_constants::*;
    pub use crate::gestures::drag_intent::*;
    pub use crate::input::*;
    pub use crate::{SizeObserver, VelocityTracker};
}
