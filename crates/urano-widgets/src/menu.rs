//! Header navigation menu: one hover menu open at a time, closed after a
//! short delay so the pointer can travel from trigger to panel, plus an
//! independent mobile drawer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use urano_core::{MutableState, RuntimeHandle, State, Subscription, Timer};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MenuKey {
    Products,
    Learn,
    Community,
}

impl MenuKey {
    pub const ALL: [MenuKey; 3] = [MenuKey::Products, MenuKey::Learn, MenuKey::Community];

    pub fn label(self) -> &'static str {
        match self {
            MenuKey::Products => "PRODUCTS",
            MenuKey::Learn => "LEARN",
            MenuKey::Community => "COMMUNITY",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MenuConfig {
    pub close_delay_millis: u64,
}

impl MenuConfig {
    pub fn with_close_delay(mut self, millis: u64) -> Self {
        self.close_delay_millis = millis;
        self
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            close_delay_millis: 320,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    Opened(MenuKey),
    Switched { from: MenuKey, to: MenuKey },
    Closed(MenuKey),
    MobileDrawerOpened,
    MobileDrawerClosed,
}

type Listener = Rc<dyn Fn(&MenuEvent)>;

#[derive(Clone, Default)]
struct MenuEvents {
    listeners: Rc<RefCell<Vec<(u64, Listener)>>>,
    next_id: Rc<Cell<u64>>,
}

impl MenuEvents {
    fn subscribe(&self, listener: impl Fn(&MenuEvent) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        let listeners = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.borrow_mut().retain(|(entry, _)| *entry != id);
            }
        })
    }

    fn publish(&self, event: MenuEvent) {
        log::debug!("menu event {event:?}");
        let snapshot: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in snapshot {
            listener(&event);
        }
    }
}

fn set_open(open: &MutableState<Option<MenuKey>>, events: &MenuEvents, next: Option<MenuKey>) {
    let previous = open.get();
    if !open.set_value(next) {
        return;
    }
    let event = match (previous, next) {
        (None, Some(key)) => MenuEvent::Opened(key),
        (Some(from), Some(to)) => MenuEvent::Switched { from, to },
        (Some(key), None) => MenuEvent::Closed(key),
        (None, None) => return,
    };
    events.publish(event);
}

pub struct MenuController {
    config: MenuConfig,
    open: MutableState<Option<MenuKey>>,
    mobile_open: MutableState<bool>,
    events: MenuEvents,
    close_timer: Timer,
}

impl MenuController {
    pub fn new(runtime: RuntimeHandle, config: MenuConfig) -> Self {
        Self {
            config,
            open: MutableState::new(None),
            mobile_open: MutableState::new(false),
            events: MenuEvents::default(),
            close_timer: Timer::new(runtime),
        }
    }

    pub fn open_key(&self) -> Option<MenuKey> {
        self.open.get()
    }

    pub fn is_open(&self, key: MenuKey) -> bool {
        self.open.get() == Some(key)
    }

    pub fn open_state(&self) -> State<Option<MenuKey>> {
        self.open.as_state()
    }

    pub fn is_close_pending(&self) -> bool {
        self.close_timer.is_pending()
    }

    pub fn subscribe(&self, listener: impl Fn(&MenuEvent) + 'static) -> Subscription {
        self.events.subscribe(listener)
    }

    /// Pointer entered a trigger: that menu opens at once, replacing any other.
    pub fn on_trigger_enter(&self, key: MenuKey) {
        self.close_timer.cancel();
        set_open(&self.open, &self.events, Some(key));
    }

    pub fn on_trigger_leave(&self) {
        self.schedule_close();
    }

    /// Pointer reached the open panel; keep it open.
    pub fn on_panel_enter(&self) {
        self.close_timer.cancel();
    }

    pub fn on_panel_leave(&self) {
        self.schedule_close();
    }

    pub fn close_now(&self) {
        self.close_timer.cancel();
        set_open(&self.open, &self.events, None);
    }

    fn schedule_close(&self) {
        if self.open.get().is_none() {
            return;
        }
        let open = self.open.clone();
        let events = self.events.clone();
        self.close_timer
            .start(self.config.close_delay_millis, move || set_open(&open, &events, None));
    }

    pub fn is_mobile_drawer_open(&self) -> bool {
        self.mobile_open.get()
    }

    pub fn open_mobile_drawer(&self) {
        if self.mobile_open.set_value(true) {
            self.events.publish(MenuEvent::MobileDrawerOpened);
        }
    }

    pub fn close_mobile_drawer(&self) {
        if self.mobile_open.set_value(false) {
            self.events.publish(MenuEvent::MobileDrawerClosed);
        }
    }
}

#[cfg(test)]
#[path = "tests/menu_tests.rs"]
mod tests;
