//! Intro fade and slide of the entry row.

use crate::anim::{Animation, Easing, Interpolation};

use super::Scene;

/// Fades the picker in while sliding the entry container to its resting
/// place.
#[derive(Clone, Copy, Debug)]
pub struct IntroAnimation {
    opacity: Interpolation,
    slide: Interpolation,
    slid: u32,
}

impl IntroAnimation {
    #[must_use]
    pub fn new(start_time: u64, duration: u64, slide: u32) -> Self {
        Self {
            opacity: Interpolation::new(Easing::Smooth, start_time, duration, 0, 0xFF),
            slide: Interpolation::new(Easing::Smooth, start_time, duration, 0, slide),
            slid: 0,
        }
    }
}

impl Animation<Scene> for IntroAnimation {
    fn step(&mut self, scene: &mut Scene, now: u64) -> bool {
        scene.opacity = self.opacity.value_at(now).min(0xFF) as u8;

        let slid = self.slide.value_at(now).max(self.slid);
        let delta = slid - self.slid;
        self.slid = slid;
        let controls = scene.controls;
        scene
            .tree
            .update_bounds(controls.container, |b| b.x -= i64::from(delta));

        // Full-width band: the scroll arrows fade with the row.
        let (_, y) = scene.tree.origin(controls.picker);
        let height = scene.tree.bounds(controls.picker).height;
        let width = scene.view_width();
        scene.request_draw(0, y, width, height);

        let (ax, ay) = scene.tree.origin(controls.actions);
        let actions = scene.tree.bounds(controls.actions);
        scene.request_draw(ax, ay, actions.width, actions.height);

        self.opacity.is_finished(now)
    }
}
