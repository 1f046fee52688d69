use std::cell::Cell;
use std::rc::Rc;

use urano_ui_graphics::Point;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerType {
    Mouse,
    Touch,
    Pen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary = 0,
    Secondary = 1,
    Middle = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerButtons(u8);

impl PointerButtons {
    pub const NONE: Self = Self(0);
    pub const PRIMARY: Self = Self(1 << (PointerButton::Primary as u8));

    pub fn new() -> Self {
        Self::NONE
    }

    pub fn with(mut self, button: PointerButton) -> Self {
        self.insert(button);
        self
    }

    pub fn insert(&mut self, button: PointerButton) {
        self.0 |= 1 << (button as u8);
    }

    pub fn remove(&mut self, button: PointerButton) {
        self.0 &= !(1 << (button as u8));
    }

    pub fn contains(&self, button: PointerButton) -> bool {
        (self.0 & (1 << (button as u8))) != 0
    }
}

impl Default for PointerButtons {
    fn default() -> Self {
        Self::NONE
    }
}

/// Which native panning the host should keep for touches on an element.
///
/// `PanY` lets vertical swipes scroll the page while horizontal motion is
/// delivered to the element as pointer events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TouchAction {
    #[default]
    Auto,
    PanY,
    PanX,
    None,
}

/// Pointer event with consumption tracking.
///
/// A handler that claims an event (an arrow button taking its press, for
/// instance) consumes it so handlers further along do not react to it.
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub pointer_type: PointerType,
    pub position: Point,
    pub buttons: PointerButtons,
    /// Milliseconds on the host's input clock.
    pub uptime_millis: u64,
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, uptime_millis: u64) -> Self {
        Self {
            id: 0,
            kind,
            pointer_type: PointerType::Mouse,
            position,
            buttons: match kind {
                PointerEventKind::Down | PointerEventKind::Move => PointerButtons::PRIMARY,
                PointerEventKind::Up | PointerEventKind::Cancel => PointerButtons::NONE,
            },
            uptime_millis,
            consumed: Rc::new(Cell::new(false)),
        }
    }

    pub fn down(position: Point, uptime_millis: u64) -> Self {
        Self::new(PointerEventKind::Down, position, uptime_millis)
    }

    pub fn moved(position: Point, uptime_millis: u64) -> Self {
        Self::new(PointerEventKind::Move, position, uptime_millis)
    }

    pub fn up(position: Point, uptime_millis: u64) -> Self {
        Self::new(PointerEventKind::Up, position, uptime_millis)
    }

    pub fn cancel(position: Point, uptime_millis: u64) -> Self {
        Self::new(PointerEventKind::Cancel, position, uptime_millis)
    }

    pub fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_pointer_type(mut self, pointer_type: PointerType) -> Self {
        self.pointer_type = pointer_type;
        self
    }

    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }

    /// A press that does not involve the primary button (right click, middle
    /// click). Touch and pen contacts always count as primary.
    pub fn is_secondary_press(&self) -> bool {
        self.kind == PointerEventKind::Down
            && self.pointer_type == PointerType::Mouse
            && !self.buttons.contains(PointerButton::Primary)
    }

    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }

    /// Copy with a new local position, sharing the consumption state.
    pub fn copy_with_local_position(&self, position: Point) -> Self {
        Self {
            position,
            consumed: self.consumed.clone(),
            ..self.clone()
        }
    }
}
