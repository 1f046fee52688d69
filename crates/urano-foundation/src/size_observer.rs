use urano_ui_graphics::Size;

/// Differences below this are layout jitter, not a resize.
const SIZE_TOLERANCE: f32 = 0.01;

/// Remembers the last reported size of an element and filters out repeats.
///
/// Hosts forward every resize notification they get (resize observers,
/// window resizes, font loads); only real changes come out the other side.
#[derive(Clone, Debug, Default)]
pub struct SizeObserver {
    last: Option<Size>,
}

impl SizeObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitizes `size` and returns it if it differs from the last one seen.
    pub fn observe(&mut self, size: Size) -> Option<Size> {
        let size = size.sanitized();
        let changed = match self.last {
            Some(last) => {
                (last.width - size.width).abs() > SIZE_TOLERANCE
                    || (last.height - size.height).abs() > SIZE_TOLERANCE
            }
            None => true,
        };
        if changed {
            self.last = Some(size);
            Some(size)
        } else {
            None
        }
    }

    pub fn last(&self) -> Option<Size> {
        self.last
    }

    /// The last size, or [`Size::ZERO`] for an element that never reported.
    pub fn current(&self) -> Size {
        self.last.unwrap_or(Size::ZERO)
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_report_always_passes() {
        let mut observer = SizeObserver::new();
        assert_eq!(observer.current(), Size::ZERO);
        assert_eq!(observer.observe(Size::ZERO), Some(Size::ZERO));
    }

    #[test]
    fn repeats_and_jitter_are_filtered() {
        let mut observer = SizeObserver::new();
        assert!(observer.observe(Size::new(1000.0, 400.0)).is_some());
        assert!(observer.observe(Size::new(1000.0, 400.0)).is_none());
        assert!(observer.observe(Size::new(1000.001, 400.0)).is_none());
        assert_eq!(
            observer.observe(Size::new(800.0, 400.0)),
            Some(Size::new(800.0, 400.0))
        );
    }

    #[test]
    fn invalid_sizes_are_sanitized() {
        let mut observer = SizeObserver::new();
        observer.observe(Size::new(500.0, 10.0));
        assert_eq!(
            observer.observe(Size::new(f32::NAN, -3.0)),
            Some(Size::ZERO)
        );
        assert!(observer.observe(Size::new(-1.0, 0.0)).is_none());
    }
}
