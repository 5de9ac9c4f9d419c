//! Keyboard input types and the picker key map.

use bitflags::bitflags;

bitflags! {
    /// Keyboard modifier map as reported by the firmware keyboard stack.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u16 {
        const LEFT_CONTROL = 0x0001;
        const LEFT_SHIFT = 0x0002;
        const LEFT_OPTION = 0x0004;
        const LEFT_COMMAND = 0x0008;
        const RIGHT_CONTROL = 0x0010;
        const RIGHT_SHIFT = 0x0020;
        const RIGHT_OPTION = 0x0040;
        const RIGHT_COMMAND = 0x0080;

        const CONTROL = Self::LEFT_CONTROL.bits() | Self::RIGHT_CONTROL.bits();
        const SHIFT = Self::LEFT_SHIFT.bits() | Self::RIGHT_SHIFT.bits();
        const OPTION = Self::LEFT_OPTION.bits() | Self::RIGHT_OPTION.bits();
        const COMMAND = Self::LEFT_COMMAND.bits() | Self::RIGHT_COMMAND.bits();
    }
}

/// A USB HID keyboard usage tagged with the keyboard usage page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const ENTER: Self = Self(0x7028);
    pub const ESCAPE: Self = Self(0x7029);
    pub const SPACE: Self = Self(0x702C);
    pub const F5: Self = Self(0x703E);
    pub const RIGHT_ARROW: Self = Self(0x704F);
    pub const LEFT_ARROW: Self = Self(0x7050);
    pub const KEYPAD_ENTER: Self = Self(0x7058);
}

/// Semantic keys understood by the boot picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickerKey {
    /// Select the previous entry.
    Left,
    /// Select the next entry.
    Right,
    /// Boot the selected entry.
    Continue,
    /// Show auxiliary entries.
    More,
    /// Rebuild the picker.
    Aborted,
    /// Toggle spoken narration.
    VoiceOver,
}

/// A picker key together with the "set as default" modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: PickerKey,
    pub modifier: bool,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(key: PickerKey) -> Self {
        Self {
            key,
            modifier: false,
        }
    }

    #[must_use]
    pub const fn with_modifier(key: PickerKey) -> Self {
        Self {
            key,
            modifier: true,
        }
    }
}

/// One decoded keystroke: the modifier state and an optional new key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub modifiers: KeyModifiers,
    pub code: Option<KeyCode>,
}

impl Keystroke {
    #[must_use]
    pub const fn new(modifiers: KeyModifiers, code: Option<KeyCode>) -> Self {
        Self { modifiers, code }
    }

    /// A key press without modifiers.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::new(KeyModifiers::empty(), Some(code))
    }

    /// Translate into a picker key, if the keystroke maps to one.
    ///
    /// Holding Control while pressing Enter requests "boot and set as
    /// default". Narration toggles on Command+F5.
    #[must_use]
    pub fn picker_key(&self) -> Option<KeyEvent> {
        let code = self.code?;
        let key = match code {
            KeyCode::LEFT_ARROW => PickerKey::Left,
            KeyCode::RIGHT_ARROW => PickerKey::Right,
            KeyCode::ENTER | KeyCode::KEYPAD_ENTER => PickerKey::Continue,
            KeyCode::SPACE => PickerKey::More,
            KeyCode::ESCAPE => PickerKey::Aborted,
            KeyCode::F5 if self.modifiers.intersects(KeyModifiers::COMMAND) => {
                PickerKey::VoiceOver
            }
            _ => return None,
        };
        Some(KeyEvent {
            key,
            modifier: key == PickerKey::Continue
                && self.modifiers.intersects(KeyModifiers::CONTROL),
        })
    }
}
