//! Screen rectangles that need to be recomposited.

use crate::buffer::ClipRect;

/// A screen rectangle scheduled for redraw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DirtyRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl DirtyRegion {
    /// Create a new dirty region.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Bounding box of both regions.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = (self.x + self.width).max(other.x + other.width);
        let y2 = (self.y + self.height).max(other.y + other.height);

        Self::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Check if `other` lies entirely inside this region.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }

    /// The region as a draw window for the root widget.
    #[must_use]
    pub const fn to_clip_rect(&self) -> ClipRect {
        ClipRect::new(self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_is_bounding_box() {
        let a = DirtyRegion::new(0, 0, 10, 10);
        let b = DirtyRegion::new(20, 5, 10, 10);
        assert_eq!(a.merge(&b), DirtyRegion::new(0, 0, 30, 15));
    }

    #[test]
    fn test_contains() {
        let outer = DirtyRegion::new(0, 0, 100, 50);
        assert!(outer.contains(&DirtyRegion::new(10, 10, 90, 40)));
        assert!(!outer.contains(&DirtyRegion::new(10, 10, 91, 40)));
    }

    #[test]
    fn test_area_and_empty() {
        assert_eq!(DirtyRegion::new(0, 0, 3, 4).area(), 12);
        assert!(DirtyRegion::new(5, 5, 0, 4).is_empty());
    }
}
