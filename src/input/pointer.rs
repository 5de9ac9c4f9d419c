//! Pointer samples and primary-button gesture tracking.

/// Phase of a primary-button gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// The button went down this frame.
    Down,
    /// The button stayed down.
    Hold,
    /// The button was released.
    Up,
}

/// Absolute pointer position and primary button state for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PointerSample {
    pub x: u32,
    pub y: u32,
    pub primary: bool,
}

impl PointerSample {
    /// Button pressed at `(x, y)`.
    #[must_use]
    pub const fn press(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            primary: true,
        }
    }

    /// Button released at `(x, y)`.
    #[must_use]
    pub const fn release(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            primary: false,
        }
    }
}

/// Turns per-frame button state into gesture phases.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerTracker {
    pressed: bool,
}

impl PointerTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self { pressed: false }
    }

    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Classify a sample. Returns `None` while the button stays up.
    pub fn classify(&mut self, sample: PointerSample) -> Option<PointerPhase> {
        let phase = match (self.pressed, sample.primary) {
            (false, true) => Some(PointerPhase::Down),
            (true, true) => Some(PointerPhase::Hold),
            (true, false) => Some(PointerPhase::Up),
            (false, false) => None,
        };
        self.pressed = sample.primary;
        phase
    }
}
