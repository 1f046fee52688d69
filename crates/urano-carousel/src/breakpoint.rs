//! Responsive presets selected by viewport width.

use urano_ui_graphics::{Rect, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
}

impl Breakpoint {
    pub const SM_MIN_WIDTH: f32 = 600.0;
    pub const MD_MIN_WIDTH: f32 = 900.0;
    pub const LG_MIN_WIDTH: f32 = 1200.0;

    /// Classifies a window width. Unmeasured or invalid widths count as `Xs`.
    pub fn from_width(width: f32) -> Self {
        if !width.is_finite() || width < Self::SM_MIN_WIDTH {
            Breakpoint::Xs
        } else if width < Self::MD_MIN_WIDTH {
            Breakpoint::Sm
        } else if width < Self::LG_MIN_WIDTH {
            Breakpoint::Md
        } else {
            Breakpoint::Lg
        }
    }

    pub fn min_width(self) -> f32 {
        match self {
            Breakpoint::Xs => 0.0,
            Breakpoint::Sm => Self::SM_MIN_WIDTH,
            Breakpoint::Md => Self::MD_MIN_WIDTH,
            Breakpoint::Lg => Self::LG_MIN_WIDTH,
        }
    }
}

/// A value that changes at the `sm` and `md` breakpoints. `Lg` uses the `md`
/// value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Responsive<T> {
    pub xs: T,
    pub sm: T,
    pub md: T,
}

impl<T: Copy> Responsive<T> {
    pub const fn new(xs: T, sm: T, md: T) -> Self {
        Self { xs, sm, md }
    }

    /// Same value at `xs` and `sm`.
    pub const fn xs_md(xs: T, md: T) -> Self {
        Self { xs, sm: xs, md }
    }

    pub const fn fixed(value: T) -> Self {
        Self {
            xs: value,
            sm: value,
            md: value,
        }
    }

    pub fn resolve(&self, breakpoint: Breakpoint) -> T {
        match breakpoint {
            Breakpoint::Xs => self.xs,
            Breakpoint::Sm => self.sm,
            Breakpoint::Md | Breakpoint::Lg => self.md,
        }
    }
}

/// Built-in layout of the card row, for hosts that do not measure the track
/// themselves.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackLayout {
    pub card_width: Responsive<f32>,
    pub card_height: Responsive<f32>,
    pub gap: Responsive<f32>,
    pub padding_left: Responsive<f32>,
    pub padding_right: Responsive<f32>,
    /// Empty flex child after the last card; zero disables it.
    pub trailing_spacer: Responsive<f32>,
}

impl TrackLayout {
    pub fn desktop() -> Self {
        Self {
            card_width: Responsive::new(270.0, 310.0, 360.0),
            card_height: Responsive::new(320.0, 340.0, 300.0),
            gap: Responsive::xs_md(16.0, 24.0),
            padding_left: Responsive::xs_md(20.0, 112.0),
            padding_right: Responsive::xs_md(12.0, 16.0),
            trailing_spacer: Responsive::fixed(0.0),
        }
    }

    pub fn mobile() -> Self {
        Self {
            card_width: Responsive::new(300.0, 340.0, 420.0),
            card_height: Responsive::new(445.0, 480.0, 535.0),
            gap: Responsive::xs_md(20.0, 32.0),
            padding_left: Responsive::xs_md(20.0, 112.0),
            padding_right: Responsive::xs_md(12.0, 16.0),
            trailing_spacer: Responsive::xs_md(16.0, 48.0),
        }
    }

    pub fn card_size(&self, breakpoint: Breakpoint) -> Size {
        Size::new(
            self.card_width.resolve(breakpoint),
            self.card_height.resolve(breakpoint),
        )
    }

    /// Natural width of a track holding `card_count` cards.
    ///
    /// A track without cards has nothing to scroll and measures zero, even
    /// when padding or a spacer is configured.
    pub fn content_width(&self, breakpoint: Breakpoint, card_count: usize) -> f32 {
        if card_count == 0 {
            return 0.0;
        }
        let spacer = self.trailing_spacer.resolve(breakpoint).max(0.0);
        let children = card_count + usize::from(spacer > 0.0);
        let gaps = children.saturating_sub(1) as f32 * self.gap.resolve(breakpoint).max(0.0);
        self.padding_left.resolve(breakpoint).max(0.0)
            + card_count as f32 * self.card_width.resolve(breakpoint).max(0.0)
            + spacer
            + gaps
            + self.padding_right.resolve(breakpoint).max(0.0)
    }

    /// Track-local rectangle of the card at `index`.
    pub fn card_rect(&self, breakpoint: Breakpoint, index: usize) -> Rect {
        let size = self.card_size(breakpoint);
        let stride = size.width + self.gap.resolve(breakpoint).max(0.0);
        Rect {
            x: self.padding_left.resolve(breakpoint).max(0.0) + index as f32 * stride,
            y: 0.0,
            width: size.width,
            height: size.height,
        }
    }
}

impl Default for TrackLayout {
    fn default() -> Self {
        Self::desktop()
    }
}
