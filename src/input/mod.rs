//! Keyboard and pointer input.
//!
//! Raw keyboard events are queued in a [`TypingBuffer`] and decoded into
//! [`Keystroke`]s, which map onto the handful of [`PickerKey`]s the picker
//! reacts to. Pointer samples are classified into down/hold/up phases by a
//! [`PointerTracker`].

mod event;
mod keyboard;
mod pointer;
mod typing;

pub use event::{FrameInput, InputEvent};
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers, Keystroke, PickerKey};
pub use pointer::{PointerPhase, PointerSample, PointerTracker};
pub use typing::{KeyEventKind, KeystrokeSource, TYPING_BUFFER_SIZE, TypingBuffer};
