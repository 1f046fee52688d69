//! The carousel surface: composes geometry, position, drag intent and edge
//! affordances behind one pointer/resize/click API and renders a headless
//! [`CarouselFrame`].

use std::cell::Cell;
use std::rc::Rc;

use urano_core::{Disposables, RuntimeHandle, State};
use urano_foundation::{
    DragIntentTracker, DragMove, PointerEvent, PointerEventKind, PointerId, SizeObserver,
    TouchAction, VelocityTracker,
};
use urano_ui_graphics::{Point, Rect, Size};

use crate::affordance::{ArrowDirection, ArrowVisibility, EdgeAffordance};
use crate::breakpoint::{Breakpoint, Responsive};
use crate::config::CarouselConfig;
use crate::error::{CarouselError, ItemError};
use crate::geometry::{DragBounds, GeometryTracker, ViewportMetrics};
use crate::item::{CarouselItem, CarouselItems, ImageRef, LinkTarget, NavigationRequest, Navigator};
use crate::position::PositionController;

pub const ARROW_BUTTON_SIZE: f32 = 44.0;
const ARROW_INSET: Responsive<f32> = Responsive::xs_md(10.0, 18.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    Grab,
    Grabbing,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: Option<ImageRef>,
    pub link: Option<LinkTarget>,
    /// Viewport-local bounds; `None` when the host lays out the track.
    pub rect: Option<Rect>,
    /// Media inside the card never captures the pointer.
    pub pointer_passthrough_media: bool,
    /// No native image drag or text selection inside the card.
    pub suppress_native_drag: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowView {
    pub direction: ArrowDirection,
    pub rect: Rect,
}

/// Everything a renderer needs to draw one frame of the carousel.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselFrame {
    pub offset: f32,
    pub bounds: DragBounds,
    pub arrows: ArrowVisibility,
    pub left_arrow: Option<ArrowView>,
    pub right_arrow: Option<ArrowView>,
    pub cursor: Cursor,
    pub touch_action: TouchAction,
    pub breakpoint: Breakpoint,
    pub is_dragging: bool,
    pub is_animating: bool,
    pub cards: Vec<CardView>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    Paged { direction: ArrowDirection, target: f32 },
    Navigate(NavigationRequest),
    /// The click ended a drag.
    Suppressed,
    /// Nothing clickable there, or the carousel is not mounted.
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TrackSizing {
    /// Track width derived from the configured [`crate::TrackLayout`].
    Layout,
    /// Track width reported by the host.
    Measured,
}

#[derive(Clone, Copy, Debug)]
struct DragAnchor {
    pointer_x: f32,
    offset: f32,
}

#[derive(Clone, Copy, Debug)]
enum Press {
    Track {
        pointer: PointerId,
        anchor: Option<DragAnchor>,
    },
    Arrow {
        pointer: PointerId,
    },
}

impl Press {
    fn pointer(&self) -> PointerId {
        match self {
            Press::Track { pointer, .. } | Press::Arrow { pointer } => *pointer,
        }
    }
}

/// Keeps the carousel's observers alive. Dropping it unmounts the carousel.
#[must_use = "dropping the mount handle unmounts the carousel"]
pub struct CarouselMount {
    disposables: Disposables,
}

impl CarouselMount {
    pub fn unmount(mut self) {
        self.disposables.dispose();
    }
}

pub struct Carousel {
    config: CarouselConfig,
    items: CarouselItems,
    geometry: GeometryTracker,
    position: PositionController,
    intent: DragIntentTracker,
    affordance: EdgeAffordance,
    velocity: VelocityTracker,
    window: SizeObserver,
    breakpoint: Breakpoint,
    track_sizing: TrackSizing,
    press: Option<Press>,
    navigator: Option<Box<dyn Navigator>>,
    mounted: Rc<Cell<bool>>,
}

impl Carousel {
    pub fn new(
        runtime: RuntimeHandle,
        items: Vec<CarouselItem>,
        config: CarouselConfig,
    ) -> Result<Self, CarouselError> {
        config.validate()?;
        let items = CarouselItems::new(items)?;
        Ok(Self {
            position: PositionController::new(runtime.clone(), &config),
            intent: DragIntentTracker::with_threshold(
                runtime,
                config.drag_threshold,
                config.click_suppress_reset_millis,
            ),
            affordance: EdgeAffordance::new(config.edge_epsilon),
            geometry: GeometryTracker::new(),
            velocity: VelocityTracker::new(),
            window: SizeObserver::new(),
            breakpoint: Breakpoint::Xs,
            track_sizing: TrackSizing::Layout,
            press: None,
            navigator: None,
            mounted: Rc::new(Cell::new(false)),
            items,
            config,
        })
    }

    pub fn set_navigator(&mut self, navigator: impl Navigator + 'static) {
        self.navigator = Some(Box::new(navigator));
    }

    /// Starts observing offsets and computes the initial geometry.
    pub fn mount(&mut self) -> CarouselMount {
        if self.mounted.get() {
            log::warn!("carousel mounted twice; the previous mount handle stays in charge");
        } else {
            // A press cut short by the last unmount never saw its release.
            self.abandon_press();
        }
        self.mounted.set(true);

        let mut disposables = Disposables::new();
        disposables.hold(
            self.affordance
                .follow(&self.position.offset_state(), self.geometry.bounds_state()),
        );
        let mounted = self.mounted.clone();
        let animation = self.position.animation();
        disposables.on_dispose(move || {
            log::debug!("carousel unmounted");
            animation.stop();
            mounted.set(false);
        });

        self.recompute();
        log::debug!("carousel mounted with {} items", self.items.len());
        CarouselMount { disposables }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn items(&self) -> &CarouselItems {
        &self.items
    }

    /// Replaces the cards. Ids must stay unique; on error the old list is
    /// kept.
    pub fn set_items(&mut self, items: Vec<CarouselItem>) -> Result<(), ItemError> {
        self.items = CarouselItems::new(items)?;
        self.abandon_press();
        if self.is_mounted() {
            self.recompute();
        }
        Ok(())
    }

    pub fn on_viewport_resized(&mut self, size: Size) {
        if self.geometry.set_viewport_size(size) {
            self.refresh_breakpoint();
            if self.is_mounted() {
                self.recompute();
            }
        }
    }

    /// Switches the track to host-measured sizing from now on.
    pub fn on_track_resized(&mut self, size: Size) {
        self.track_sizing = TrackSizing::Measured;
        if self.geometry.set_track_size(size) && self.is_mounted() {
            self.recompute();
        }
    }

    pub fn on_window_resized(&mut self, size: Size) {
        if self.window.observe(size).is_none() {
            return;
        }
        self.refresh_breakpoint();
        if self.is_mounted() {
            self.recompute();
        }
    }

    /// Rederives bounds from the current sizes, re-clamps the offset and
    /// refreshes the arrows.
    pub fn recompute(&mut self) -> DragBounds {
        if self.track_sizing == TrackSizing::Layout {
            let layout = &self.config.layout;
            let width = layout.content_width(self.breakpoint, self.items.len());
            let height = if self.items.is_empty() {
                0.0
            } else {
                layout.card_size(self.breakpoint).height
            };
            self.geometry.set_track_size(Size::new(width, height));
        }
        let bounds = self.geometry.recompute();
        self.position
            .set_viewport_width(self.geometry.metrics().viewport_width);
        self.position.set_bounds(bounds);
        if self.is_mounted() {
            self.affordance.update(self.position.offset(), bounds);
        }
        bounds
    }

    /// Feeds a pointer event in viewport-local coordinates. Returns `true`
    /// when the carousel handled it.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> bool {
        if !self.is_mounted() || event.is_consumed() {
            return false;
        }
        if !event.position.x.is_finite() || !event.position.y.is_finite() {
            log::warn!("dropping pointer event with invalid position {:?}", event.position);
            return false;
        }
        match event.kind {
            PointerEventKind::Down => self.pointer_down(event),
            PointerEventKind::Move => self.pointer_move(event),
            PointerEventKind::Up => self.pointer_up(event),
            PointerEventKind::Cancel => self.pointer_cancel(event),
        }
    }

    fn pointer_down(&mut self, event: &PointerEvent) -> bool {
        if event.is_secondary_press() {
            log::trace!("ignoring non-primary press");
            return false;
        }
        if self.press.is_some() {
            return false;
        }
        if self.arrow_at(event.position).is_some() {
            // Arrow buttons keep their press; the track never sees it.
            event.consume();
            self.press = Some(Press::Arrow { pointer: event.id });
            return true;
        }
        self.intent.on_pointer_down(event.position);
        self.velocity.reset();
        self.velocity
            .add_sample(event.uptime_millis, event.position.x);
        self.press = Some(Press::Track {
            pointer: event.id,
            anchor: None,
        });
        true
    }

    fn pointer_move(&mut self, event: &PointerEvent) -> bool {
        let Some(press) = self.press else {
            return false;
        };
        if press.pointer() != event.id {
            return false;
        }
        let Press::Track { pointer, anchor } = press else {
            return true;
        };
        self.velocity
            .add_sample(event.uptime_millis, event.position.x);
        match self.intent.on_pointer_move(event.position) {
            DragMove::Started { .. } => {
                // A new drag supersedes any paging or release animation.
                self.position.stop();
                // Anchor on the undamped position so a drag caught mid
                // spring-back continues from what is on screen.
                let anchor = DragAnchor {
                    pointer_x: event.position.x,
                    offset: self.position.unband(self.position.offset()),
                };
                log::debug!("carousel drag started at offset {:.1}", anchor.offset);
                self.press = Some(Press::Track {
                    pointer,
                    anchor: Some(anchor),
                });
                event.consume();
            }
            DragMove::Continued { .. } => {
                // Without overflow there is nothing to drag.
                let draggable = self.geometry.bounds().has_overflow(self.config.edge_epsilon);
                if let (Some(anchor), true) = (anchor, draggable) {
                    self.position
                        .set_offset(anchor.offset + (event.position.x - anchor.pointer_x));
                }
                event.consume();
            }
            DragMove::Pending | DragMove::Ignored => {}
        }
        true
    }

    fn pointer_up(&mut self, event: &PointerEvent) -> bool {
        let Some(press) = self.press else {
            return false;
        };
        if press.pointer() != event.id {
            return false;
        }
        self.press = None;
        if let Press::Track { .. } = press {
            let was_dragging = self.intent.is_dragging();
            self.velocity
                .add_sample(event.uptime_millis, event.position.x);
            self.intent.on_pointer_up();
            if was_dragging {
                let velocity = self
                    .velocity
                    .velocity_at_with_max(event.uptime_millis, self.config.max_fling_velocity);
                log::debug!("carousel drag released, velocity {velocity:.0}px/s");
                self.position.release(velocity, self.config.momentum);
                event.consume();
            }
        }
        true
    }

    fn pointer_cancel(&mut self, event: &PointerEvent) -> bool {
        let Some(press) = self.press else {
            return false;
        };
        if press.pointer() != event.id {
            return false;
        }
        self.press = None;
        if let Press::Track { .. } = press {
            let was_dragging = self.intent.is_dragging();
            self.intent.on_pointer_cancel();
            if was_dragging {
                self.position.release(0.0, false);
            }
        }
        true
    }

    /// Drops the current press without a release: no click suppression
    /// survives and any overshoot springs back.
    fn abandon_press(&mut self) {
        let Some(press) = self.press.take() else {
            return;
        };
        self.velocity.reset();
        if let Press::Track { .. } = press {
            let was_dragging = self.intent.is_dragging();
            self.intent.reset();
            if was_dragging {
                log::debug!("abandoning carousel drag at offset {:.1}", self.position.offset());
                self.position.release(0.0, false);
            }
        }
    }

    pub fn go_left(&mut self) -> f32 {
        self.affordance.go_left(&mut self.position)
    }

    pub fn go_right(&mut self) -> f32 {
        self.affordance.go_right(&mut self.position)
    }

    pub fn go(&mut self, direction: ArrowDirection) -> f32 {
        self.affordance.go(direction, &mut self.position)
    }

    /// Handles a click the host dispatched for a card.
    pub fn click_card(&mut self, id: &str) -> ClickOutcome {
        if !self.is_mounted() {
            return ClickOutcome::Ignored;
        }
        if self.intent.should_suppress_click() {
            log::debug!("suppressing click on `{id}` after drag");
            return ClickOutcome::Suppressed;
        }
        let Some(request) = self
            .items
            .get(id)
            .and_then(|item| item.link.as_ref())
            .map(LinkTarget::navigation_request)
        else {
            return ClickOutcome::Ignored;
        };
        log::debug!("card `{id}` requested {request:?}");
        if let Some(navigator) = self.navigator.as_mut() {
            navigator.navigate(&request);
        }
        ClickOutcome::Navigate(request)
    }

    /// Handles a click at a viewport-local position: arrows first, then
    /// cards.
    pub fn click_at(&mut self, position: Point) -> ClickOutcome {
        if !self.is_mounted() {
            return ClickOutcome::Ignored;
        }
        if let Some(direction) = self.arrow_at(position) {
            let target = self.go(direction);
            return ClickOutcome::Paged { direction, target };
        }
        match self.card_at(position) {
            Some(id) => self.click_card(&id),
            None => ClickOutcome::Ignored,
        }
    }

    /// Id of the card under a viewport-local position, when the built-in
    /// layout is in use.
    pub fn card_at(&self, position: Point) -> Option<String> {
        if self.track_sizing != TrackSizing::Layout {
            return None;
        }
        let offset = self.position.offset();
        let track_point = Point::new(position.x - offset, position.y);
        (0..self.items.len())
            .find(|&index| {
                self.config
                    .layout
                    .card_rect(self.breakpoint, index)
                    .contains(track_point.x, track_point.y)
            })
            .and_then(|index| self.items.get_index(index))
            .map(|item| item.id.clone())
    }

    fn arrow_at(&self, position: Point) -> Option<ArrowDirection> {
        [ArrowDirection::Left, ArrowDirection::Right]
            .into_iter()
            .find(|&direction| {
                self.arrow_rect(direction)
                    .is_some_and(|rect| rect.contains(position.x, position.y))
            })
    }

    fn arrow_rect(&self, direction: ArrowDirection) -> Option<Rect> {
        if !self.is_mounted() || !self.affordance.visibility().can_go(direction) {
            return None;
        }
        let viewport = self.geometry.viewport_size();
        let inset = ARROW_INSET.resolve(self.breakpoint);
        let x = match direction {
            ArrowDirection::Left => inset,
            ArrowDirection::Right => viewport.width - inset - ARROW_BUTTON_SIZE,
        };
        Some(Rect {
            x,
            y: ((viewport.height - ARROW_BUTTON_SIZE) / 2.0).max(0.0),
            width: ARROW_BUTTON_SIZE,
            height: ARROW_BUTTON_SIZE,
        })
    }

    fn refresh_breakpoint(&mut self) {
        let width = self
            .window
            .last()
            .map(|size| size.width)
            .unwrap_or_else(|| self.geometry.viewport_size().width);
        let breakpoint = Breakpoint::from_width(width);
        if breakpoint != self.breakpoint {
            log::debug!("carousel breakpoint {:?} -> {breakpoint:?}", self.breakpoint);
            self.breakpoint = breakpoint;
        }
    }

    pub fn offset(&self) -> f32 {
        self.position.offset()
    }

    pub fn offset_state(&self) -> State<f32> {
        self.position.offset_state()
    }

    pub fn bounds(&self) -> DragBounds {
        self.geometry.bounds()
    }

    pub fn bounds_state(&self) -> State<DragBounds> {
        self.geometry.bounds_state()
    }

    pub fn metrics(&self) -> ViewportMetrics {
        self.geometry.metrics()
    }

    pub fn arrows(&self) -> ArrowVisibility {
        self.affordance.visibility()
    }

    pub fn arrow_state(&self) -> State<ArrowVisibility> {
        self.affordance.state()
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    pub fn page_step(&self) -> f32 {
        self.position.page_step()
    }

    pub fn is_dragging(&self) -> bool {
        self.is_mounted() && self.intent.is_dragging()
    }

    pub fn is_pressed(&self) -> bool {
        self.is_mounted() && matches!(self.press, Some(Press::Track { .. }))
    }

    pub fn is_animating(&self) -> bool {
        self.position.is_animating()
    }

    pub fn should_suppress_click(&self) -> bool {
        self.intent.should_suppress_click()
    }

    pub fn frame(&self) -> CarouselFrame {
        let offset = self.position.offset();
        let uses_layout = self.track_sizing == TrackSizing::Layout;
        let cards = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| CardView {
                id: item.id.clone(),
                title: item.title.clone(),
                description: item.description.clone(),
                image: item.image.clone(),
                link: item.link.clone(),
                rect: uses_layout.then(|| {
                    self.config
                        .layout
                        .card_rect(self.breakpoint, index)
                        .translate(offset, 0.0)
                }),
                pointer_passthrough_media: true,
                suppress_native_drag: true,
            })
            .collect();

        CarouselFrame {
            offset,
            bounds: self.geometry.bounds(),
            arrows: self.affordance.visibility(),
            left_arrow: self.arrow_rect(ArrowDirection::Left).map(|rect| ArrowView {
                direction: ArrowDirection::Left,
                rect,
            }),
            right_arrow: self
                .arrow_rect(ArrowDirection::Right)
                .map(|rect| ArrowView {
                    direction: ArrowDirection::Right,
                    rect,
                }),
            cursor: if self.is_pressed() {
                Cursor::Grabbing
            } else {
                Cursor::Grab
            },
            touch_action: TouchAction::PanY,
            breakpoint: self.breakpoint,
            is_dragging: self.is_dragging(),
            is_animating: self.is_animating(),
            cards,
        }
    }
}

#[cfg(test)]
#[path = "tests/surface_tests.rs"]
mod tests;
