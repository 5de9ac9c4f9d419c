//! Target pixel buffer and image compositing.
//!
//! [`FrameBuffer`] is the surface the picker composites into. It supports:
//!
//! - **Fills**: Solid rectangles clipped to the screen
//! - **Image blits**: Premultiplied "over" with a global opacity
//! - **Child clipping**: Drawing an image placed inside a parent's draw window
//!
//! # Examples
//!
//! ```
//! use canopy_rust::{FrameBuffer, Image, Pixel};
//! use canopy_rust::buffer::ClipRect;
//!
//! let mut screen = FrameBuffer::new(64, 32);
//! screen.clear(Pixel::BLACK);
//!
//! // A 16x16 image placed at (8, 4) inside a parent drawn at (10, 10).
//! let icon = Image::filled(16, 16, Pixel::WHITE);
//! let window = ClipRect::new(0, 0, 64, 32);
//! screen.draw_child_image(&icon, 0xFF, 10, 10, 8, 4, window);
//! assert_eq!(screen.get(18, 14), Some(Pixel::WHITE));
//! ```

// Compositing entry points mirror the firmware blit signature.
#![allow(clippy::too_many_arguments)]

mod image;
mod scissor;

pub use image::Image;
pub use scissor::{ClipRect, clip_child_bounds};

use crate::color::Pixel;

/// Screen-sized pixel buffer.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl FrameBuffer {
    /// Create a buffer filled with transparent black.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize).saturating_mul(height as usize);
        Self {
            width,
            height,
            pixels: vec![Pixel::TRANSPARENT; size],
        }
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

    /// Row-major pixel data.
    #[must_use]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Get the pixel at screen position `(x, y)`.
    #[must_use]
    pub fn get(&self, x: i64, y: i64) -> Option<Pixel> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Fill the whole buffer.
    pub fn clear(&mut self, pixel: Pixel) {
        self.pixels.fill(pixel);
    }

    /// Fill a screen rectangle, clipped to the buffer.
    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, pixel: Pixel) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(width)).min(i64::from(self.width));
        let y1 = (y + i64::from(height)).min(i64::from(self.height));
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        let stride = self.width as usize;
        for row in y0..y1 {
            let start = row as usize * stride;
            self.pixels[start + x0 as usize..start + x1 as usize].fill(pixel);
        }
    }

    /// Composite the `window` of `image` (image-local coordinates) onto the
    /// screen with the image origin at `(base_x, base_y)`.
    ///
    /// Parts of the window outside the image or the screen are skipped. An
    /// opacity of `0xFF` with opaque source pixels is a plain copy.
    pub fn draw_image(
        &mut self,
        image: &Image,
        opacity: u8,
        base_x: i64,
        base_y: i64,
        window: ClipRect,
    ) {
        if opacity == 0 {
            return;
        }
        let Some(window) = window.intersect(&ClipRect::new(0, 0, image.width(), image.height()))
        else {
            return;
        };

        // Trim to the screen in image space.
        let x0 = i64::from(window.x).max(-base_x);
        let y0 = i64::from(window.y).max(-base_y);
        let x1 = i64::from(window.x + window.width).min(i64::from(self.width) - base_x);
        let y1 = i64::from(window.y + window.height).min(i64::from(self.height) - base_y);
        if x1 <= x0 || y1 <= y0 {
            return;
        }

        let src = image.pixels();
        let src_stride = image.width() as usize;
        let dst_stride = self.width as usize;
        for iy in y0..y1 {
            let src_row = iy as usize * src_stride;
            let dst_row = (base_y + iy) as usize * dst_stride;
            for ix in x0..x1 {
                let s = src[src_row + ix as usize];
                let d = &mut self.pixels[dst_row + (base_x + ix) as usize];
                *d = s.blend_over(*d, opacity);
            }
        }
    }

    /// Draw an image that is a child placed at `(child_x, child_y)` inside a
    /// parent whose origin is at `(parent_x, parent_y)` on screen.
    ///
    /// `window` is the parent's draw window in parent-local coordinates. The
    /// image is clipped against it and nothing is drawn when they do not
    /// overlap.
    pub fn draw_child_image(
        &mut self,
        image: &Image,
        opacity: u8,
        parent_x: i64,
        parent_y: i64,
        child_x: i64,
        child_y: i64,
        window: ClipRect,
    ) {
        if let Some(local) = window.clip_child(child_x, child_y, image.width(), image.height()) {
            self.draw_image(image, opacity, parent_x + child_x, parent_y + child_y, local);
        }
    }
}
