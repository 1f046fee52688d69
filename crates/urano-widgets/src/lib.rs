//! Small interactive state machines that sit next to the carousel on the
//! site: the header menu, the FAQ accordion, the typed-text overlay and the
//! copy-to-clipboard feedback.
//!
//! Each owns at most one timer on the [`urano_core::Runtime`] and cancels it
//! when retriggered or dropped.

mod copy_feedback;
mod error;
mod faq;
mod menu;
mod typewriter;

pub use copy_feedback::{Clipboard, CopyFeedback, MemoryClipboard, COPIED_DURATION_MILLIS};
#[cfg(all(feature = "clipboard", not(target_arch = "wasm32")))]
pub use copy_feedback::SystemClipboard;
pub use error::{ClipboardError, WidgetError};
pub use faq::FaqAccordion;
pub use menu::{MenuConfig, MenuController, MenuEvent, MenuKey};
pub use typewriter::{Typewriter, TypewriterConfig, TypewriterPhase, TypewriterSnapshot};
