//! Error types for the boot picker compositor.

use std::fmt;

/// Result type alias for picker operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for picker operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A bitmap copy could not be allocated.
    OutOfResources,
    /// The requested resolution tier or operation does not apply.
    Unsupported {
        what: &'static str,
        detail: String,
    },
    /// The image decode service or text rasterizer failed.
    DecodeFailed(String),
    /// Pixel data does not match its declared dimensions.
    InvalidDimensions { width: u32, height: u32 },
    /// The theme lacks a mandatory control image.
    MissingThemeImage(String),
}

impl Error {
    /// Shorthand for an [`Error::Unsupported`] value.
    #[must_use]
    pub fn unsupported(what: &'static str, detail: impl Into<String>) -> Self {
        Self::Unsupported {
            what,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfResources => write!(f, "out of resources"),
            Self::Unsupported { what, detail } => write!(f, "unsupported {what}: {detail}"),
            Self::DecodeFailed(s) => write!(f, "decode failed: {s}"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions: {width}x{height}")
            }
            Self::MissingThemeImage(s) => write!(f, "theme is missing image: {s}"),
        }
    }
}

impl std::error::Error for Error {}
