//! Decoded bitmaps drawn by widgets.

use crate::color::Pixel;
use crate::error::{Error, Result};

/// A decoded, premultiplied BGRA bitmap.
///
/// Themes hand out shared images (`Rc<Image>`); a widget that needs a bitmap
/// whose lifetime it controls takes a copy with [`Image::try_clone`].
#[derive(Debug, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Image {
    /// Create an image filled with transparent pixels.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Pixel::TRANSPARENT)
    }

    /// Create an image where every pixel has the same value.
    #[must_use]
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Self {
        let size = (width as usize).saturating_mul(height as usize);
        Self {
            width,
            height,
            pixels: vec![pixel; size],
        }
    }

    /// Wrap row-major pixel data.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        let expected = (width as usize).checked_mul(height as usize);
        if expected != Some(pixels.len()) {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Row-major pixel data.
    #[must_use]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        (y as usize)
            .checked_mul(self.width as usize)?
            .checked_add(x as usize)
    }

    /// Get the pixel at `(x, y)`, or `None` outside the image.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set the pixel at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = pixel;
        }
    }

    /// Fill a rectangle, clipped to the image.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, pixel: Pixel) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for row in y..y_end {
            for col in x..x_end {
                self.set(col, row, pixel);
            }
        }
    }

    /// Copy the bitmap, reporting allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<Self> {
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(self.pixels.len())
            .map_err(|_| Error::OutOfResources)?;
        pixels.extend_from_slice(&self.pixels);
        Ok(Self {
            width: self.width,
            height: self.height,
            pixels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pixels_checks_length() {
        assert!(Image::from_pixels(2, 2, vec![Pixel::BLACK; 4]).is_ok());
        assert_eq!(
            Image::from_pixels(2, 2, vec![Pixel::BLACK; 3]),
            Err(Error::InvalidDimensions {
                width: 2,
                height: 2
            })
        );
    }

    #[test]
    fn test_get_and_set_bounds() {
        let mut img = Image::new(3, 2);
        img.set(2, 1, Pixel::WHITE);
        img.set(3, 0, Pixel::WHITE);
        assert_eq!(img.get(2, 1), Some(Pixel::WHITE));
        assert_eq!(img.get(0, 0), Some(Pixel::TRANSPARENT));
        assert_eq!(img.get(3, 0), None);
        assert_eq!(img.get(0, 2), None);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut img = Image::new(4, 4);
        img.fill_rect(2, 2, 10, 10, Pixel::BLACK);
        assert_eq!(img.get(3, 3), Some(Pixel::BLACK));
        assert_eq!(img.get(1, 1), Some(Pixel::TRANSPARENT));
    }

    #[test]
    fn test_try_clone_is_independent() {
        let original = Image::filled(2, 1, Pixel::WHITE);
        let mut copy = original.try_clone().unwrap();
        copy.set(0, 0, Pixel::BLACK);
        assert_eq!(original.get(0, 0), Some(Pixel::WHITE));
        assert_eq!(copy.size(), (2, 1));
    }

    #[test]
    fn test_zero_sized_image() {
        let img = Image::new(0, 10);
        assert!(img.is_empty());
        assert_eq!(img.get(0, 0), None);
    }
}
