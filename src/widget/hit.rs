//! Alpha-based hit-testing for clickable images.

use crate::buffer::Image;

/// Check whether a point in image-local coordinates lands on a visible
/// pixel. Points outside the image and fully transparent pixels miss.
#[must_use]
pub fn is_hit(image: &Image, x: i64, y: i64) -> bool {
    if x < 0 || y < 0 || x >= i64::from(image.width()) || y >= i64::from(image.height()) {
        return false;
    }
    image
        .get(x as u32, y as u32)
        .is_some_and(|pixel| !pixel.is_transparent())
}
