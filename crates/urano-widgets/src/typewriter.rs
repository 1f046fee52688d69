//! Typed-text overlay: reveals phrases one character at a time, holds each
//! finished phrase, then moves on to the next.
//!
//! `Typing -> Pausing -> Typing (next phrase) -> ...`, driven by a single
//! owned timer.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use urano_core::{MutableState, RuntimeHandle, State, Timer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TypewriterConfig {
    pub char_interval_millis: u64,
    /// How long a fully typed phrase stays before the next one starts.
    pub pause_millis: u64,
    pub start_delay_millis: u64,
    /// Start over after the last phrase instead of stopping on it.
    pub repeat: bool,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            char_interval_millis: 45,
            pause_millis: 1_600,
            start_delay_millis: 0,
            repeat: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypewriterPhase {
    Idle,
    Typing,
    Pausing,
    Finished,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypewriterSnapshot {
    pub phase: TypewriterPhase,
    pub phrase_index: usize,
    /// The visible prefix of the current phrase.
    pub text: String,
}

impl TypewriterSnapshot {
    fn idle() -> Self {
        Self {
            phase: TypewriterPhase::Idle,
            phrase_index: 0,
            text: String::new(),
        }
    }
}

struct TypewriterInner {
    phrases: Vec<String>,
    config: TypewriterConfig,
    phase: TypewriterPhase,
    phrase_index: usize,
    visible_chars: usize,
    snapshot: MutableState<TypewriterSnapshot>,
    timer: Timer,
}

impl TypewriterInner {
    fn phrase_len(&self) -> usize {
        self.phrases
            .get(self.phrase_index)
            .map(|phrase| phrase.chars().count())
            .unwrap_or(0)
    }

    fn snapshot(&self) -> TypewriterSnapshot {
        let text = self
            .phrases
            .get(self.phrase_index)
            .map(|phrase| phrase.chars().take(self.visible_chars).collect())
            .unwrap_or_default();
        TypewriterSnapshot {
            phase: self.phase,
            phrase_index: self.phrase_index,
            text,
        }
    }

    /// Advances one step and returns the delay until the next one, if any.
    fn step(&mut self) -> Option<u64> {
        match self.phase {
            TypewriterPhase::Typing => {
                self.visible_chars = (self.visible_chars + 1).min(self.phrase_len());
                Some(self.after_typing_step())
            }
            TypewriterPhase::Pausing => {
                let next = self.phrase_index + 1;
                if next < self.phrases.len() {
                    self.phrase_index = next;
                } else if self.config.repeat {
                    self.phrase_index = 0;
                } else {
                    self.phase = TypewriterPhase::Finished;
                    return None;
                }
                self.visible_chars = 0;
                self.phase = TypewriterPhase::Typing;
                Some(self.after_typing_step())
            }
            TypewriterPhase::Idle | TypewriterPhase::Finished => None,
        }
    }

    fn after_typing_step(&mut self) -> u64 {
        if self.visible_chars >= self.phrase_len() {
            self.phase = TypewriterPhase::Pausing;
            self.config.pause_millis
        } else {
            self.config.char_interval_millis
        }
    }
}

pub struct Typewriter {
    inner: Rc<RefCell<TypewriterInner>>,
}

impl Typewriter {
    pub fn new(runtime: RuntimeHandle, phrases: Vec<String>, config: TypewriterConfig) -> Self {
        let inner = TypewriterInner {
            phrases,
            config,
            phase: TypewriterPhase::Idle,
            phrase_index: 0,
            visible_chars: 0,
            snapshot: MutableState::new(TypewriterSnapshot::idle()),
            timer: Timer::new(runtime),
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Starts typing the first phrase, discarding any run in progress.
    pub fn start(&self) {
        let (snapshot, state) = {
            let mut inner = self.inner.borrow_mut();
            inner.timer.cancel();
            inner.phrase_index = 0;
            inner.visible_chars = 0;
            if inner.phrases.is_empty() {
                log::debug!("typewriter has no phrases; staying idle");
                inner.phase = TypewriterPhase::Idle;
            } else {
                inner.phase = TypewriterPhase::Typing;
                let delay = inner.config.start_delay_millis + inner.config.char_interval_millis;
                Self::schedule(&self.inner, &inner, delay);
            }
            (inner.snapshot(), inner.snapshot.clone())
        };
        state.set_value(snapshot);
    }

    /// Freezes the current text and cancels the timer.
    pub fn stop(&self) {
        let (snapshot, state) = {
            let mut inner = self.inner.borrow_mut();
            inner.timer.cancel();
            inner.phase = TypewriterPhase::Idle;
            (inner.snapshot(), inner.snapshot.clone())
        };
        state.set_value(snapshot);
    }

    pub fn phase(&self) -> TypewriterPhase {
        self.inner.borrow().phase
    }

    pub fn text(&self) -> String {
        self.inner.borrow().snapshot().text
    }

    pub fn phrase_index(&self) -> usize {
        self.inner.borrow().phrase_index
    }

    pub fn state(&self) -> State<TypewriterSnapshot> {
        self.inner.borrow().snapshot.as_state()
    }

    fn schedule(this: &Rc<RefCell<TypewriterInner>>, inner: &TypewriterInner, delay: u64) {
        let weak = Rc::downgrade(this);
        inner.timer.start(delay, move || Self::tick(&weak));
    }

    fn tick(weak: &Weak<RefCell<TypewriterInner>>) {
        let Some(this) = weak.upgrade() else {
            return;
        };
        let (snapshot, state) = {
            let mut inner = this.borrow_mut();
            if let Some(delay) = inner.step() {
                Self::schedule(&this, &inner, delay);
            }
            (inner.snapshot(), inner.snapshot.clone())
        };
        log::trace!("typewriter {:?} `{}`", snapshot.phase, snapshot.text);
        state.set_value(snapshot);
    }
}

#[cfg(test)]
#[path = "tests/typewriter_tests.rs"]
mod tests;
