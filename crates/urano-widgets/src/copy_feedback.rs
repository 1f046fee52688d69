//! "Copied!" feedback for copy buttons.

use urano_core::{MutableState, RuntimeHandle, State, Timer};

use crate::error::ClipboardError;

/// How long the copied indicator stays on after a successful copy.
pub const COPIED_DURATION_MILLIS: u64 = 2_000;

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// In-process clipboard for hosts without a system one, and for tests.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    reject_writes: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose writes always fail.
    pub fn rejecting() -> Self {
        Self {
            contents: None,
            reject_writes: true,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.reject_writes {
            return Err(ClipboardError::Rejected("writes are disabled".into()));
        }
        self.contents = Some(text.to_owned());
        Ok(())
    }
}

#[cfg(all(feature = "clipboard", not(target_arch = "wasm32")))]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(all(feature = "clipboard", not(target_arch = "wasm32")))]
impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        arboard::Clipboard::new()
            .map(|inner| Self { inner })
            .map_err(|err| ClipboardError::Unavailable(err.to_string()))
    }
}

#[cfg(all(feature = "clipboard", not(target_arch = "wasm32")))]
impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text.to_owned())
            .map_err(|err| ClipboardError::Rejected(err.to_string()))
    }
}

/// Tracks the copied indicator. Copying again while it is shown restarts
/// the countdown.
pub struct CopyFeedback {
    copied: MutableState<bool>,
    timer: Timer,
    duration_millis: u64,
}

impl CopyFeedback {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            copied: MutableState::new(false),
            timer: Timer::new(runtime),
            duration_millis: COPIED_DURATION_MILLIS,
        }
    }

    pub fn with_duration(mut self, duration_millis: u64) -> Self {
        self.duration_millis = duration_millis;
        self
    }

    /// Writes `text` to `clipboard` and shows the indicator on success.
    /// A failed write leaves the indicator untouched.
    pub fn copy(&self, clipboard: &mut dyn Clipboard, text: &str) -> Result<(), ClipboardError> {
        if let Err(err) = clipboard.set_text(text) {
            log::warn!("copy failed: {err}");
            return Err(err);
        }
        self.copied.set_value(true);
        let copied = self.copied.clone();
        self.timer.start(self.duration_millis, move || {
            copied.set_value(false);
        });
        Ok(())
    }

    pub fn is_copied(&self) -> bool {
        self.copied.get()
    }

    pub fn state(&self) -> State<bool> {
        self.copied.as_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use urano_core::{millis_to_nanos, Runtime};

    #[test]
    fn copy_shows_indicator_for_two_seconds() {
        let runtime = Runtime::new();
        let feedback = CopyFeedback::new(runtime.handle());
        let mut clipboard = MemoryClipboard::new();

        feedback.copy(&mut clipboard, "0xabc").unwrap();
        assert_eq!(clipboard.contents(), Some("0xabc"));
        assert!(feedback.is_copied());

        runtime.advance_to(millis_to_nanos(1_999));
        assert!(feedback.is_copied());
        runtime.advance_to(millis_to_nanos(2_000));
        assert!(!feedback.is_copied());
    }

    #[test]
    fn copying_again_restarts_the_countdown() {
        let runtime = Runtime::new();
        let feedback = CopyFeedback::new(runtime.handle());
        let mut clipboard = MemoryClipboard::new();

        feedback.copy(&mut clipboard, "a").unwrap();
        runtime.advance_to(millis_to_nanos(1_500));
        feedback.copy(&mut clipboard, "b").unwrap();
        runtime.advance_to(millis_to_nanos(3_000));
        assert!(feedback.is_copied());
        assert_eq!(runtime.pending_timer_count(), 1);
        runtime.advance_to(millis_to_nanos(3_500));
        assert!(!feedback.is_copied());
    }

    #[test]
    fn failed_copy_reports_error_and_stays_hidden() {
        let runtime = Runtime::new();
        let feedback = CopyFeedback::new(runtime.handle()).with_duration(50);
        let mut clipboard = MemoryClipboard::rejecting();

        let err = feedback.copy(&mut clipboard, "a").unwrap_err();
        assert!(matches!(err, ClipboardError::Rejected(_)));
        assert!(!feedback.is_copied());
        assert_eq!(runtime.pending_timer_count(), 0);
    }

    #[test]
    fn dropping_feedback_cancels_the_reset() {
        let runtime = Runtime::new();
        let feedback = CopyFeedback::new(runtime.handle());
        feedback.copy(&mut MemoryClipboard::new(), "a").unwrap();
        drop(feedback);
        assert_eq!(runtime.pending_timer_count(), 0);
    }
}
