//! Draggable bounded carousel.
//!
//! A horizontal row of cards that can be dragged within elastic bounds,
//! paged with edge arrows, and clicked through without a drag turning into
//! an accidental click. The crate is headless: hosts feed sizes, pointer
//! events and frame time, and draw the [`CarouselFrame`] it produces.
//!
//! ```ignore
//! let runtime = Runtime::new();
//! let mut carousel = Carousel::new(runtime.handle(), items, CarouselConfig::desktop())?;
//! let _mount = carousel.mount();
//! carousel.on_viewport_resized(Size::new(1000.0, 360.0));
//! carousel.go_right();
//! runtime.run_frame(frame_time_nanos);
//! ```

pub mod affordance;
pub mod breakpoint;
pub mod config;
pub mod error;
pub mod geometry;
pub mod item;
pub mod position;
pub mod surface;

pub use affordance::{ArrowDirection, ArrowVisibility, EdgeAffordance};
pub use breakpoint::{Breakpoint, Responsive, TrackLayout};
pub use config::CarouselConfig;
pub use error::{CarouselError, ConfigError, ItemError, LinkError};
pub use geometry::{DragBounds, GeometryTracker, ViewportMetrics};
pub use item::{
    CarouselItem, CarouselItems, ImageRef, LinkTarget, NavigationRequest, Navigator,
};
pub use position::PositionController;
pub use surface::{
    ArrowView, CardView, Carousel, CarouselFrame, CarouselMount, ClickOutcome, Cursor,
    ARROW_BUTTON_SIZE,
};

pub mod prelude {
    pub use crate::{
        ArrowDirection, ArrowVisibility, Breakpoint, Carousel, CarouselConfig, CarouselFrame,
        CarouselItem, ClickOutcome, DragBounds, LinkTarget, NavigationRequest, Navigator,
    };
}
