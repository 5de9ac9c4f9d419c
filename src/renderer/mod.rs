//! Dirty-rectangle bookkeeping.
//!
//! Widgets never draw to the screen directly in response to input. They call
//! [`DrawQueue::request_draw`] (or [`DrawQueue::request_draw_crop`] when the
//! rectangle may extend past the screen) and the view recomposites every
//! pending region once per tick.
//!
//! The queue keeps at most [`MAX_DRAW_REQUESTS`] regions. A new request that
//! is covered by a pending one is dropped, pending regions it covers are
//! replaced, and overlapping regions whose bounding box costs no more than
//! drawing both are merged. When the queue is full the request is merged into
//! the region that grows the least.

mod region;

pub use region::DirtyRegion;

/// Pending regions kept before requests are coalesced.
pub const MAX_DRAW_REQUESTS: usize = 4;

/// Cumulative compositing counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames: u64,
    pub regions: u64,
    pub pixels: u64,
}

impl RenderStats {
    /// Account for one flushed frame.
    pub fn record(&mut self, regions: &[DirtyRegion]) {
        self.frames += 1;
        self.regions += regions.len() as u64;
        self.pixels += regions.iter().map(DirtyRegion::area).sum::<u64>();
    }
}

/// Queue of screen regions awaiting recomposition.
#[derive(Clone, Debug)]
pub struct DrawQueue {
    width: u32,
    height: u32,
    pending: Vec<DirtyRegion>,
}

impl DrawQueue {
    /// Create a queue for a screen of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pending: Vec::with_capacity(MAX_DRAW_REQUESTS),
        }
    }

    /// Regions requested since the last [`drain`](Self::drain).
    #[must_use]
    pub fn pending(&self) -> &[DirtyRegion] {
        &self.pending
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Request a redraw of a rectangle that lies on screen.
    pub fn request_draw(&mut self, x: u32, y: u32, width: u32, height: u32) {
        debug_assert!(
            u64::from(x) + u64::from(width) <= u64::from(self.width)
                && u64::from(y) + u64::from(height) <= u64::from(self.height),
            "draw request ({x}, {y}, {width}x{height}) exceeds {}x{} screen",
            self.width,
            self.height
        );
        self.request_draw_crop(i64::from(x), i64::from(y), width, height);
    }

    /// Request a redraw of a rectangle, cropping it to the screen first.
    pub fn request_draw_crop(&mut self, x: i64, y: i64, width: u32, height: u32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(width)).min(i64::from(self.width));
        let y1 = (y + i64::from(height)).min(i64::from(self.height));
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        self.push(DirtyRegion::new(
            x0 as u32,
            y0 as u32,
            (x1 - x0) as u32,
            (y1 - y0) as u32,
        ));
    }

    fn push(&mut self, region: DirtyRegion) {
        if self.pending.iter().any(|r| r.contains(&region)) {
            return;
        }
        self.pending.retain(|r| !region.contains(r));

        for pending in &mut self.pending {
            let merged = pending.merge(&region);
            if merged.area() <= pending.area() + region.area() {
                *pending = merged;
                return;
            }
        }

        if self.pending.len() < MAX_DRAW_REQUESTS {
            self.pending.push(region);
            return;
        }

        let cheapest = self
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, r)| r.merge(&region).area() - r.area())
            .map(|(i, _)| i);
        if let Some(i) = cheapest {
            self.pending[i] = self.pending[i].merge(&region);
        }
    }

    /// Take every pending region, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<DirtyRegion> {
        std::mem::take(&mut self.pending)
    }
}
