//! Edge affordances: which arrows to show and where a page step lands.

use urano_core::{MutableState, State, Subscription};

use crate::geometry::DragBounds;
use crate::position::PositionController;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArrowDirection {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArrowVisibility {
    pub can_go_left: bool,
    pub can_go_right: bool,
}

impl ArrowVisibility {
    pub const NONE: ArrowVisibility = ArrowVisibility {
        can_go_left: false,
        can_go_right: false,
    };

    /// Pure projection of `(offset, bounds)`.
    pub fn compute(offset: f32, bounds: DragBounds, epsilon: f32) -> Self {
        if !bounds.has_overflow(epsilon) || !offset.is_finite() {
            return Self::NONE;
        }
        Self {
            can_go_left: offset < bounds.max - epsilon,
            can_go_right: offset > bounds.min + epsilon,
        }
    }

    pub fn can_go(&self, direction: ArrowDirection) -> bool {
        match direction {
            ArrowDirection::Left => self.can_go_left,
            ArrowDirection::Right => self.can_go_right,
        }
    }
}

/// Publishes [`ArrowVisibility`] and turns arrow presses into offset targets.
pub struct EdgeAffordance {
    visibility: MutableState<ArrowVisibility>,
    epsilon: f32,
}

impl EdgeAffordance {
    pub fn new(epsilon: f32) -> Self {
        Self {
            visibility: MutableState::new(ArrowVisibility::NONE),
            epsilon: epsilon.max(0.0),
        }
    }

    pub fn visibility(&self) -> ArrowVisibility {
        self.visibility.get()
    }

    /// Observable flags. Observers run only when a flag flips.
    pub fn state(&self) -> State<ArrowVisibility> {
        self.visibility.as_state()
    }

    /// Recomputes the flags; returns `true` if either flipped.
    pub fn update(&self, offset: f32, bounds: DragBounds) -> bool {
        self.visibility
            .set_value(ArrowVisibility::compute(offset, bounds, self.epsilon))
    }

    /// Keeps the flags in sync with every offset the controller publishes.
    pub fn follow(&self, offsets: &State<f32>, bounds: State<DragBounds>) -> Subscription {
        let visibility = self.visibility.clone();
        let epsilon = self.epsilon;
        offsets.subscribe(move |offset| {
            visibility.set_value(ArrowVisibility::compute(*offset, bounds.get(), epsilon));
        })
    }

    /// Target for one arrow press.
    ///
    /// Stepping starts from the in-flight target when an animation is
    /// running, so repeated presses accumulate instead of restarting from
    /// wherever the animation happens to be.
    pub fn page_target(direction: ArrowDirection, position: &PositionController) -> f32 {
        let from = if position.is_animating() {
            position.target()
        } else {
            position.offset()
        };
        let step = position.page_step();
        let raw = match direction {
            ArrowDirection::Left => from + step,
            ArrowDirection::Right => from - step,
        };
        position.clamp(raw)
    }

    /// Animates one page in `direction`. Returns the target.
    pub fn go(&self, direction: ArrowDirection, position: &mut PositionController) -> f32 {
        let target = Self::page_target(direction, position);
        log::debug!("page {direction:?} -> {target:.1}");
        position.animate_to(target);
        target
    }

    pub fn go_left(&self, position: &mut PositionController) -> f32 {
        self.go(ArrowDirection::Left, position)
    }

    pub fn go_right(&self, position: &mut PositionController) -> f32 {
        self.go(ArrowDirection::Right, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CarouselConfig;
    use std::cell::Cell;
    use std::rc::Rc;
    use urano_core::{millis_to_nanos, Runtime};

    const BOUNDS: DragBounds = DragBounds {
        min: -1500.0,
        max: 0.0,
    };

    #[test]
    fn no_overflow_means_no_arrows() {
        for offset in [-50.0, 0.0, 30.0] {
            assert_eq!(
                ArrowVisibility::compute(offset, DragBounds::ZERO, 1.0),
                ArrowVisibility::NONE
            );
        }
        let tiny = DragBounds { min: -1.0, max: 0.0 };
        assert_eq!(ArrowVisibility::compute(-1.0, tiny, 1.0), ArrowVisibility::NONE);
    }

    #[test]
    fn arrows_track_edges_with_epsilon() {
        let start = ArrowVisibility::compute(0.0, BOUNDS, 1.0);
        assert_eq!((start.can_go_left, start.can_go_right), (false, true));
        let near_start = ArrowVisibility::compute(-0.9, BOUNDS, 1.0);
        assert!(!near_start.can_go_left);
        let middle = ArrowVisibility::compute(-700.0, BOUNDS, 1.0);
        assert_eq!((middle.can_go_left, middle.can_go_right), (true, true));
        let end = ArrowVisibility::compute(-1500.0, BOUNDS, 1.0);
        assert_eq!((end.can_go_left, end.can_go_right), (true, false));
        assert!(end.can_go(ArrowDirection::Left));
    }

    #[test]
    fn update_reports_flips_only() {
        let affordance = EdgeAffordance::new(1.0);
        let flips = Rc::new(Cell::new(0));
        let counter = flips.clone();
        let _sub = affordance
            .state()
            .subscribe(move |_| counter.set(counter.get() + 1));

        assert!(affordance.update(0.0, BOUNDS));
        assert!(!affordance.update(-0.5, BOUNDS));
        assert!(affordance.update(-300.0, BOUNDS));
        assert!(!affordance.update(-900.0, BOUNDS));
        assert_eq!(flips.get(), 2);
    }

    #[test]
    fn rapid_presses_accumulate_from_in_flight_target() {
        let runtime = Runtime::new();
        let mut position = PositionController::new(runtime.handle(), &CarouselConfig::desktop());
        position.set_viewport_width(1000.0);
        position.set_bounds(BOUNDS);
        let affordance = EdgeAffordance::new(1.0);

        assert_eq!(affordance.go_right(&mut position), -850.0);
        runtime.run_frame(millis_to_nanos(16));
        runtime.run_frame(millis_to_nanos(32));
        assert!(position.offset() > -850.0);
        assert_eq!(affordance.go_right(&mut position), -1500.0);
        assert_eq!(affordance.go_left(&mut position), -650.0);
    }
}
