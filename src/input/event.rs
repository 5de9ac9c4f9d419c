//! Per-frame input bundle.

use crate::input::keyboard::{KeyEvent, Keystroke};
use crate::input::pointer::PointerSample;
use crate::input::typing::KeystrokeSource;

/// A single input dispatched to the widget tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Pointer(PointerSample),
}

/// Everything the outer loop polled for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub pointer: Option<PointerSample>,
    pub keystroke: Option<Keystroke>,
}

impl FrameInput {
    /// No input this frame.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            pointer: None,
            keystroke: None,
        }
    }

    #[must_use]
    pub const fn key(keystroke: Keystroke) -> Self {
        Self {
            pointer: None,
            keystroke: Some(keystroke),
        }
    }

    #[must_use]
    pub const fn pointer(sample: PointerSample) -> Self {
        Self {
            pointer: Some(sample),
            keystroke: None,
        }
    }

    /// Poll one keystroke from `source` alongside an optional pointer sample.
    pub fn poll(source: &mut dyn KeystrokeSource, pointer: Option<PointerSample>) -> Self {
        Self {
            pointer,
            keystroke: Some(source.next_keystroke()),
        }
    }

    /// The event to dispatch this frame. A mapped key takes precedence over
    /// the pointer.
    #[must_use]
    pub fn event(&self) -> Option<InputEvent> {
        if let Some(key) = self.keystroke.and_then(|k| k.picker_key()) {
            return Some(InputEvent::Key(key));
        }
        self.pointer.map(InputEvent::Pointer)
    }
}
