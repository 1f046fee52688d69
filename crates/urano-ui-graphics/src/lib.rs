//! Pure geometry data for the Urano UI primitives.
//!
//! Points, sizes and rectangles in logical pixels. Nothing here knows about
//! pointers, animation or carousels.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
}
