//! Framebuffer pixel type and premultiplied alpha blending.
//!
//! Pixels use the firmware graphics output channel order (blue, green, red,
//! reserved). Image pixels carry coverage in the reserved byte and are
//! premultiplied, so compositing is a single "over" operation per channel:
//!
//! ```text
//! out = src * opacity + dst * (1 - src.alpha * opacity)
//! ```
//!
//! # Examples
//!
//! ```
//! use canopy_rust::Pixel;
//!
//! let backdrop = Pixel::BLACK;
//! let half_white = Pixel::new(128, 128, 128, 128);
//! let out = half_white.blend_over(backdrop, 0xFF);
//! assert_eq!(out.red, 128);
//! assert_eq!(out.alpha, 0xFF);
//! ```

use std::fmt;

/// A premultiplied BGRA pixel.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub alpha: u8,
}

/// Multiply two 8-bit fractions with rounding (`a * b / 255`).
#[inline]
#[must_use]
pub fn mul_u8(a: u8, b: u8) -> u8 {
    let t = u32::from(a) * u32::from(b) + 128;
    ((t + (t >> 8)) >> 8) as u8
}

impl Pixel {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 0xFF);
    /// Opaque white.
    pub const WHITE: Self = Self::new(0xFF, 0xFF, 0xFF, 0xFF);

    /// Create a pixel from premultiplied RGBA components.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            blue,
            green,
            red,
            alpha,
        }
    }

    /// Create an opaque pixel.
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 0xFF)
    }

    /// Create a premultiplied pixel from straight (non-premultiplied) RGBA.
    #[must_use]
    pub fn from_straight(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self::new(
            mul_u8(red, alpha),
            mul_u8(green, alpha),
            mul_u8(blue, alpha),
            alpha,
        )
    }

    /// Parse a `#RRGGBB` hex string into an opaque pixel.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::rgb(r, g, b))
    }

    /// Check if the pixel contributes nothing when composited.
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.alpha == 0
    }

    /// Check if the pixel fully covers what is below it.
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.alpha == 0xFF
    }

    /// Scale every channel by `opacity` (0-255).
    #[must_use]
    pub fn scale(self, opacity: u8) -> Self {
        if opacity == 0xFF {
            return self;
        }
        Self::new(
            mul_u8(self.red, opacity),
            mul_u8(self.green, opacity),
            mul_u8(self.blue, opacity),
            mul_u8(self.alpha, opacity),
        )
    }

    /// Composite this pixel over `dst` with an additional global opacity.
    #[must_use]
    pub fn blend_over(self, dst: Self, opacity: u8) -> Self {
        let src = self.scale(opacity);
        if src.is_transparent() {
            return dst;
        }
        if src.is_opaque() {
            return src;
        }
        let inv = 0xFF - src.alpha;
        Self::new(
            src.red.saturating_add(mul_u8(dst.red, inv)),
            src.green.saturating_add(mul_u8(dst.green, inv)),
            src.blue.saturating_add(mul_u8(dst.blue, inv)),
            src.alpha.saturating_add(mul_u8(dst.alpha, inv)),
        )
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}/{:02x}",
            self.red, self.green, self.blue, self.alpha
        )
    }
}
