//! Draw windows and parent-to-child clipping.
//!
//! A [`ClipRect`] is the window a draw request covers, expressed in the local
//! coordinates of the widget being drawn. Before a composite hands the request
//! to a child, it translates the window into the child's space and trims it to
//! the child's extent with [`ClipRect::clip_child`].

/// A draw window in widget-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClipRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ClipRect {
    /// Create a new draw window.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if a point is inside this window.
    #[must_use]
    pub fn contains(&self, px: i64, py: i64) -> bool {
        let x = i64::from(self.x);
        let y = i64::from(self.y);
        px >= x && py >= y && px < x + i64::from(self.width) && py < y + i64::from(self.height)
    }

    /// Compute intersection with another window in the same space.
    #[must_use]
    pub fn intersect(&self, other: &ClipRect) -> Option<ClipRect> {
        let (x, width) = overlap(
            i64::from(self.x),
            self.width,
            i64::from(other.x),
            other.width,
        )?;
        let (y, height) = overlap(
            i64::from(self.y),
            self.height,
            i64::from(other.y),
            other.height,
        )?;
        Some(ClipRect::new(x as u32, y as u32, width, height))
    }

    /// Check if this window is empty (zero area).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Translate this parent-space window into the space of a child placed at
    /// `(child_x, child_y)` with the given extent.
    ///
    /// The horizontal axis is clipped first; the vertical axis is only
    /// examined when the horizontal overlap is non-empty. Returns `None` when
    /// the child is not touched by the window at all.
    #[must_use]
    pub fn clip_child(
        &self,
        child_x: i64,
        child_y: i64,
        child_width: u32,
        child_height: u32,
    ) -> Option<ClipRect> {
        let (x, width) = clip_child_bounds(child_x, child_width, self.x, self.width)?;
        let (y, height) = clip_child_bounds(child_y, child_height, self.y, self.height)?;
        Some(ClipRect::new(x, y, width, height))
    }
}

/// Intersect `[a, a + a_len)` with `[b, b + b_len)` on one axis.
fn overlap(a: i64, a_len: u32, b: i64, b_len: u32) -> Option<(i64, u32)> {
    let start = a.max(b);
    let end = (a + i64::from(a_len)).min(b + i64::from(b_len));
    if end <= start {
        return None;
    }
    Some((start, (end - start) as u32))
}

/// Clip a parent-space request `[request_offset, request_offset + request_length)`
/// against a child spanning `[child_offset, child_offset + child_length)`.
///
/// On success returns the overlap as `(offset, length)` where the offset is
/// relative to the child origin. Returns `None` when the two spans do not
/// overlap.
#[must_use]
pub fn clip_child_bounds(
    child_offset: i64,
    child_length: u32,
    request_offset: u32,
    request_length: u32,
) -> Option<(u32, u32)> {
    let (start, length) = overlap(
        child_offset,
        child_length,
        i64::from(request_offset),
        request_length,
    )?;
    Some(((start - child_offset) as u32, length))
}
