//! Keystroke ring buffer fed by raw keyboard events.
//!
//! The keyboard stack pushes events as they happen; the picker drains at most
//! one keystroke per frame with [`KeystrokeSource::next_keystroke`], which
//! never blocks.

use bitflags::bitflags;

use crate::input::keyboard::{KeyCode, KeyModifiers, Keystroke};

/// Ring slots. One slot separates head from tail, so 20 events fit.
pub const TYPING_BUFFER_SIZE: usize = 21;

bitflags! {
    /// Kind of raw keyboard event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyEventKind: u32 {
        const KEY_DOWN = 1 << 8;
        const KEY_UP = 1 << 9;
        const MODIFIER_DOWN = 1 << 10;
        const MODIFIER_UP = 1 << 11;
    }
}

/// Something that yields decoded keystrokes without blocking.
pub trait KeystrokeSource {
    /// Current modifiers plus the next key, if any key press is pending.
    fn next_keystroke(&mut self) -> Keystroke;
}

#[derive(Clone, Copy, Debug, Default)]
struct TypingEntry {
    kind: KeyEventKind,
    modifiers: KeyModifiers,
    code: Option<KeyCode>,
}

/// Fixed-size keystroke queue.
///
/// Pushing into a full queue overwrites the most recent entry rather than
/// dropping the new event.
#[derive(Clone, Debug)]
pub struct TypingBuffer {
    entries: [TypingEntry; TYPING_BUFFER_SIZE],
    head: usize,
    tail: usize,
    modifiers: KeyModifiers,
}

impl TypingBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: [TypingEntry::default(); TYPING_BUFFER_SIZE],
            head: 0,
            tail: 0,
            modifiers: KeyModifiers::empty(),
        }
    }

    /// Number of queued events.
    #[must_use]
    pub fn len(&self) -> usize {
        (self.head + TYPING_BUFFER_SIZE - self.tail) % TYPING_BUFFER_SIZE
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Modifier state after the last consumed event.
    #[must_use]
    pub fn modifiers(&self) -> KeyModifiers {
        self.modifiers
    }

    /// Record a raw keyboard event.
    pub fn push(&mut self, kind: KeyEventKind, modifiers: KeyModifiers, code: Option<KeyCode>) {
        let next = (self.head + 1) % TYPING_BUFFER_SIZE;
        if next != self.tail {
            self.head = next;
        }
        self.entries[self.head] = TypingEntry {
            kind,
            modifiers,
            code,
        };
    }

    /// Drop every queued event and reset modifiers.
    pub fn flush(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.modifiers = KeyModifiers::empty();
    }
}

impl Default for TypingBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl KeystrokeSource for TypingBuffer {
    fn next_keystroke(&mut self) -> Keystroke {
        if self.tail == self.head {
            return Keystroke::new(self.modifiers, None);
        }
        self.tail = (self.tail + 1) % TYPING_BUFFER_SIZE;
        let entry = self.entries[self.tail];

        let code = if entry.kind.contains(KeyEventKind::KEY_DOWN) {
            entry.code
        } else {
            None
        };
        if entry.kind.contains(KeyEventKind::MODIFIER_UP) {
            self.modifiers.remove(entry.modifiers);
        } else {
            self.modifiers = entry.modifiers;
        }
        Keystroke::new(self.modifiers, code)
    }
}
