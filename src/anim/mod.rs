//! Time-based interpolation and the set of running animations.
//!
//! Time is an opaque monotonically increasing tick count supplied by the
//! caller; the picker advances it once per frame.
//!
//! # Examples
//!
//! ```
//! use canopy_rust::anim::{Easing, Interpolation};
//!
//! let fade = Interpolation::new(Easing::Linear, 0, 10, 0, 100);
//! assert_eq!(fade.value_at(5), 50);
//! assert_eq!(fade.value_at(10), 100);
//! assert_eq!(fade.value_at(99), 100);
//! ```

use std::f32::consts::PI;

/// Interpolation curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    /// Constant rate.
    #[default]
    Linear,
    /// Slow start and finish (half-cosine).
    Smooth,
}

impl Easing {
    /// Map normalized progress `t` in `[0, 1]` through the curve.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smooth => (1.0 - (PI * t).cos()) / 2.0,
        }
    }
}

/// A value that moves from `start_value` to `end_value` over `duration`
/// ticks beginning at `start_time`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interpolation {
    pub easing: Easing,
    pub start_time: u64,
    pub duration: u64,
    pub start_value: u32,
    pub end_value: u32,
}

impl Interpolation {
    #[must_use]
    pub const fn new(
        easing: Easing,
        start_time: u64,
        duration: u64,
        start_value: u32,
        end_value: u32,
    ) -> Self {
        Self {
            easing,
            start_time,
            duration,
            start_value,
            end_value,
        }
    }

    /// Ticks elapsed since the start, or zero before it.
    #[must_use]
    pub const fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.start_time)
    }

    /// True once the full duration has elapsed.
    #[must_use]
    pub const fn is_finished(&self, now: u64) -> bool {
        self.elapsed(now) >= self.duration
    }

    /// Value at `now`. Zero-length and expired interpolations yield the end
    /// value.
    #[must_use]
    pub fn value_at(&self, now: u64) -> u32 {
        let elapsed = self.elapsed(now);
        if self.duration == 0 || elapsed >= self.duration {
            return self.end_value;
        }
        let progress = self.easing.apply(elapsed as f32 / self.duration as f32);
        let start = f64::from(self.start_value);
        let span = f64::from(self.end_value) - start;
        let value = (start + span * f64::from(progress)).round();
        let (lo, hi) = if self.start_value <= self.end_value {
            (self.start_value, self.end_value)
        } else {
            (self.end_value, self.start_value)
        };
        (value as u32).clamp(lo, hi)
    }
}

/// One running animation over a mutable context `C`.
pub trait Animation<C: ?Sized> {
    /// Advance to `now`. Returns `true` when the animation has completed and
    /// must be removed from the active set.
    fn step(&mut self, cx: &mut C, now: u64) -> bool;
}

/// Ordered collection of running animations.
pub struct AnimationSet<C: ?Sized> {
    active: Vec<Box<dyn Animation<C>>>,
}

impl<C: ?Sized> AnimationSet<C> {
    #[must_use]
    pub fn new() -> Self {
        Self { active: Vec::new() }
    }

    /// Start an animation. It is stepped from the next [`advance`](Self::advance).
    pub fn start(&mut self, animation: Box<dyn Animation<C>>) {
        self.active.push(animation);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Step every animation in start order and drop the completed ones.
    pub fn advance(&mut self, cx: &mut C, now: u64) {
        self.active.retain_mut(|animation| !animation.step(cx, now));
    }

    /// Stop all animations without stepping them.
    pub fn clear(&mut self) {
        self.active.clear();
    }
}

impl<C: ?Sized> Default for AnimationSet<C> {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn value_stays_between_endpoints(
            start in 0u32..1000,
            end in 0u32..1000,
            duration in 0u64..100,
            now in 0u64..200,
            smooth in any::<bool>(),
        ) {
            let easing = if smooth { Easing::Smooth } else { Easing::Linear };
            let v = Interpolation::new(easing, 0, duration, start, end).value_at(now);
            prop_assert!(v >= start.min(end) && v <= start.max(end));
        }

        #[test]
        fn finishes_at_duration(duration in 0u64..500, start_time in 0u64..500) {
            let i = Interpolation::new(Easing::Smooth, start_time, duration, 0, 35);
            prop_assert!(i.is_finished(start_time + duration));
            prop_assert_eq!(i.value_at(start_time + duration), 35);
        }
    }
}
