//! Robot testing for the carousel.
//!
//! A [`CarouselRobot`] owns a runtime on a virtual clock, a mounted
//! [`Carousel`] and a recording navigator, and drives them the way a browser
//! host would: pointer sequences with realistic timestamps, clicks dispatched
//! after pointer-up, and one frame every 16ms.
//!
//! ```
//! use urano_carousel::CarouselConfig;
//! use urano_testing::{sample_items, CarouselRobot};
//!
//! let mut robot = CarouselRobot::new(sample_items(6), CarouselConfig::desktop()).unwrap();
//! robot.set_viewport(1280.0, 360.0);
//! robot.drag(600.0, 200.0, 150.0);
//! robot.wait_for_idle();
//! assert!(robot.carousel().offset() < 0.0);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use urano_carousel::{
    ArrowDirection, Carousel, CarouselConfig, CarouselError, CarouselFrame, CarouselItem,
    CarouselMount, ClickOutcome, LinkTarget, NavigationRequest, Navigator,
};
use urano_core::{millis_to_nanos, Runtime};
use urano_foundation::PointerEvent;
use urano_ui_graphics::{Point, Size};

pub const FRAME_MILLIS: u64 = 16;
const DRAG_STEPS: usize = 10;
const MAX_IDLE_FRAMES: usize = 2_000;

/// Navigator that remembers every request it receives.
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    requests: Rc<RefCell<Vec<NavigationRequest>>>,
}

impl RecordingNavigator {
    pub fn requests(&self) -> Vec<NavigationRequest> {
        self.requests.borrow().clone()
    }

    pub fn clear(&self) {
        self.requests.borrow_mut().clear();
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, request: &NavigationRequest) {
        self.requests.borrow_mut().push(request.clone());
    }
}

/// Cards cycling through an internal route, an external link and a
/// coming-soon placeholder.
pub fn sample_items(count: usize) -> Vec<CarouselItem> {
    (0..count)
        .map(|index| {
            let link = match index % 3 {
                0 => LinkTarget::Route(format!("/product/{index}")),
                1 => LinkTarget::External(format!("https://example.com/{index}")),
                _ => LinkTarget::ComingSoon,
            };
            CarouselItem::new(
                format!("card-{index}"),
                format!("Card {index}"),
                format!("Description for card {index}"),
            )
            .with_link(link)
        })
        .collect()
}

pub struct CarouselRobot {
    runtime: Runtime,
    carousel: Carousel,
    navigator: RecordingNavigator,
    mount: Option<CarouselMount>,
    viewport: Size,
    now_millis: u64,
}

impl CarouselRobot {
    /// Builds and mounts a carousel. Nothing is measured until
    /// [`CarouselRobot::set_viewport`] is called.
    pub fn new(items: Vec<CarouselItem>, config: CarouselConfig) -> Result<Self, CarouselError> {
        let runtime = Runtime::new();
        let mut carousel = Carousel::new(runtime.handle(), items, config)?;
        let navigator = RecordingNavigator::default();
        carousel.set_navigator(navigator.clone());
        let mount = Some(carousel.mount());
        Ok(Self {
            runtime,
            carousel,
            navigator,
            mount,
            viewport: Size::ZERO,
            now_millis: 0,
        })
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn now_millis(&self) -> u64 {
        self.now_millis
    }

    pub fn frame(&self) -> CarouselFrame {
        self.carousel.frame()
    }

    pub fn navigations(&self) -> Vec<NavigationRequest> {
        self.navigator.requests()
    }

    /// Resizes the window and a full-width viewport together.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Size::new(width, height);
        self.carousel.on_window_resized(Size::new(width, height));
        self.carousel.on_viewport_resized(Size::new(width, height));
    }

    /// Reports a host-measured track width, replacing the built-in layout.
    pub fn set_track_width(&mut self, width: f32) {
        let height = self.viewport.height;
        self.carousel.on_track_resized(Size::new(width, height));
    }

    /// Advances the clock by `millis` and runs one frame.
    pub fn advance_time(&mut self, millis: u64) {
        self.now_millis += millis;
        self.runtime.run_frame(millis_to_nanos(self.now_millis));
    }

    pub fn advance_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.advance_time(FRAME_MILLIS);
        }
    }

    /// Runs frames until no animation is waiting for one.
    ///
    /// Returns false if the carousel is still animating after a generous
    /// number of frames.
    pub fn wait_for_idle(&mut self) -> bool {
        for _ in 0..MAX_IDLE_FRAMES {
            if !self.runtime.needs_frame() {
                return true;
            }
            self.advance_time(FRAME_MILLIS);
        }
        log::warn!("carousel still animating after {MAX_IDLE_FRAMES} frames");
        false
    }

    pub fn press(&mut self, x: f32, y: f32) -> bool {
        let event = PointerEvent::down(Point::new(x, y), self.now_millis);
        self.carousel.on_pointer_event(&event)
    }

    /// Moves the pointer one frame later.
    pub fn move_to(&mut self, x: f32, y: f32) -> bool {
        self.advance_time(FRAME_MILLIS);
        let event = PointerEvent::moved(Point::new(x, y), self.now_millis);
        self.carousel.on_pointer_event(&event)
    }

    pub fn release(&mut self, x: f32, y: f32) -> bool {
        let event = PointerEvent::up(Point::new(x, y), self.now_millis);
        self.carousel.on_pointer_event(&event)
    }

    pub fn cancel(&mut self, x: f32, y: f32) -> bool {
        let event = PointerEvent::cancel(Point::new(x, y), self.now_millis);
        self.carousel.on_pointer_event(&event)
    }

    /// Horizontal drag that comes to rest before release, so it carries no
    /// momentum.
    pub fn drag(&mut self, from_x: f32, y: f32, to_x: f32) {
        self.drag_path(from_x, y, to_x, y);
        self.advance_time(100);
        self.release(to_x, y);
    }

    /// Fast horizontal swipe released while still moving.
    pub fn fling(&mut self, from_x: f32, y: f32, to_x: f32) {
        self.drag_path(from_x, y, to_x, y);
        self.release(to_x, y);
    }

    /// Pointer down, intermediate moves, no release.
    pub fn drag_path(&mut self, from_x: f32, from_y: f32, to_x: f32, to_y: f32) {
        self.press(from_x, from_y);
        for step in 1..=DRAG_STEPS {
            let t = step as f32 / DRAG_STEPS as f32;
            self.move_to(from_x + (to_x - from_x) * t, from_y + (to_y - from_y) * t);
        }
    }

    /// Press and release in place, then dispatch the click the host would
    /// send after pointer-up.
    pub fn tap(&mut self, x: f32, y: f32) -> ClickOutcome {
        self.press(x, y);
        self.release(x, y);
        self.click_at(x, y)
    }

    pub fn click_at(&mut self, x: f32, y: f32) -> ClickOutcome {
        self.carousel.click_at(Point::new(x, y))
    }

    /// Taps the centre of an arrow button. Ignored when the arrow is hidden.
    pub fn tap_arrow(&mut self, direction: ArrowDirection) -> ClickOutcome {
        let frame = self.carousel.frame();
        let arrow = match direction {
            ArrowDirection::Left => frame.left_arrow,
            ArrowDirection::Right => frame.right_arrow,
        };
        match arrow {
            Some(arrow) => {
                let x = arrow.rect.x + arrow.rect.width / 2.0;
                let y = arrow.rect.y + arrow.rect.height / 2.0;
                self.tap(x, y)
            }
            None => ClickOutcome::Ignored,
        }
    }

    pub fn unmount(&mut self) {
        if let Some(mount) = self.mount.take() {
            mount.unmount();
        }
    }
}
