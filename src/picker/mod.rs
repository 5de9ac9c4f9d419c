//! Boot entry row: selection, scrolling, and the widgets that live in it.
//!
//! The picker is a horizontal row of [`BootEntryWidget`]s followed by the
//! [`SelectorWidget`], all children of one picker node inside a clipping
//! container. The picker node's x offset is the scroll position; the
//! container never moves except during the intro slide.
//!
//! Selection and scrolling keep one invariant: after any operation the
//! selected entry lies completely inside the container.

mod controls;
mod entry;
mod theme;

pub use controls::{ActionButton, ResetAction, ScrollButton, ScrollDirection, SelectorWidget};
pub use entry::{BootEntryWidget, EntryIcon};
pub use theme::{ButtonImages, ControlImages, IconKind, IconVariant, LabelKind, Theme};

use std::rc::Rc;

use crate::input::{KeyEvent, PickerKey};
use crate::platform::{AudioFile, BootEntryInfo};
use crate::view::{EventContext, Scene};
use crate::widget::{Widget, WidgetId};

/// The picker node. Draws and routes pointers like a plain container and
/// owns keyboard navigation.
#[derive(Clone, Copy, Debug, Default)]
pub struct PickerWidget;

impl Widget for PickerWidget {
    fn key_event(&mut self, _this: WidgetId, cx: &mut EventContext<'_>, key: KeyEvent) {
        let scene = &mut *cx.scene;
        match key.key {
            // Navigation and boot wait for the intro to finish.
            PickerKey::Left | PickerKey::Right | PickerKey::Continue if !scene.is_opaque() => {}
            PickerKey::Right => {
                if let Some(next) = scene.selected.and_then(|s| scene.next_entry(s)) {
                    scene.change_entry(next);
                }
            }
            PickerKey::Left => {
                if let Some(prev) = scene.selected.and_then(|s| scene.prev_entry(s)) {
                    scene.change_entry(prev);
                }
            }
            PickerKey::Continue => scene.commit_boot(key.modifier),
            PickerKey::More => {
                scene.session.hide_auxiliary = false;
                scene.session.refresh = true;
                cx.platform.play_audio(AudioFile::ShowAuxiliary);
            }
            PickerKey::Aborted => {
                scene.session.refresh = true;
                cx.platform.play_audio(AudioFile::Reloading);
            }
            PickerKey::VoiceOver => {
                // A countdown armed while narration was off is stale.
                scene.session.audio_playback_timeout = None;
                cx.platform.toggle_voice_over();
            }
        }
    }
}

impl Scene {
    /// Entry widgets in display order.
    #[must_use]
    pub fn entries(&self) -> &[WidgetId] {
        let children = self.tree.children(self.controls.picker);
        debug_assert_eq!(
            children.last(),
            Some(&self.controls.selector),
            "the selector must stay the last picker child"
        );
        match children.split_last() {
            Some((_, entries)) => entries,
            None => &[],
        }
    }

    #[must_use]
    pub const fn selected_entry(&self) -> Option<WidgetId> {
        self.selected
    }

    /// Descriptor behind an entry widget.
    #[must_use]
    pub fn entry_info(&self, entry: WidgetId) -> Option<&Rc<BootEntryInfo>> {
        self.targets.get(entry)
    }

    #[must_use]
    pub fn next_entry(&self, entry: WidgetId) -> Option<WidgetId> {
        self.tree
            .next_sibling(entry)
            .filter(|&next| next != self.controls.selector)
    }

    #[must_use]
    pub fn prev_entry(&self, entry: WidgetId) -> Option<WidgetId> {
        self.tree.prev_sibling(entry)
    }

    /// Horizontal distance from one entry to the next, scaled.
    #[must_use]
    pub fn slot_width(&self) -> i64 {
        i64::from(self.scaled(self.metrics().slot()))
    }

    /// Make `entry` the selection and centre the selector under it.
    ///
    /// Interactive selections also re-arm the narration idle timer.
    pub fn select_entry(&mut self, entry: WidgetId, interactive: bool) {
        debug_assert!(self.targets.contains_key(entry), "not a boot entry");
        let entry_bounds = self.tree.bounds(entry);
        let selector = self.tree.bounds(self.controls.selector);
        debug_assert!(selector.width <= entry_bounds.width);
        debug_assert_eq!(
            i64::from(self.tree.bounds(self.controls.picker).height),
            selector.bottom()
        );

        self.selected = Some(entry);
        let x = entry_bounds.x + i64::from(entry_bounds.width.saturating_sub(selector.width) / 2);
        self.tree.update_bounds(self.controls.selector, |b| b.x = x);
        self.session.boot_entry = self.targets.get(entry).cloned();
        if interactive {
            self.session.audio_playback_timeout = Some(self.config.voice_over_idle_ticks);
        }
    }

    /// Scroll delta that would bring the selection fully into view, or 0 if
    /// it already is.
    #[must_use]
    pub fn scroll_selected(&self) -> i64 {
        let Some(selected) = self.selected else {
            return 0;
        };
        let picker = self.tree.bounds(self.controls.picker);
        let container = self.tree.bounds(self.controls.container);
        let entry = self.tree.bounds(selected);

        let x = picker.x + entry.x;
        if x < 0 {
            return -x;
        }
        let overflow = x + i64::from(entry.width) - i64::from(container.width);
        if overflow > 0 {
            return -overflow;
        }
        0
    }

    /// Shift the entry row and redraw the band it occupies.
    pub fn scroll(&mut self, delta: i64) {
        let picker = self.controls.picker;
        self.tree.update_bounds(picker, |b| b.x += delta);

        let (_, base_y) = self.tree.origin(picker);
        let height = self.tree.bounds(picker).height;
        debug_assert!(
            [self.controls.left_scroll, self.controls.right_scroll]
                .iter()
                .map(|&id| self.tree.bounds(id))
                .all(|b| b.y >= base_y && b.bottom() <= base_y + i64::from(height)),
            "scroll buttons must lie inside the picker band"
        );
        let width = self.view_width();
        self.request_draw(0, base_y, width, height);
    }

    /// Move the selection to `entry`, scrolling if it is not fully visible.
    /// Without a scroll only the old and new entries are redrawn.
    pub fn change_entry(&mut self, entry: WidgetId) {
        let previous = self.selected;
        debug_assert_ne!(previous, Some(entry));
        self.select_entry(entry, true);

        let delta = self.scroll_selected();
        if delta != 0 {
            self.scroll(delta);
            return;
        }
        let (base_x, base_y) = self.tree.origin(self.controls.picker);
        let height = self.tree.bounds(self.controls.picker).height;
        for id in [Some(entry), previous].into_iter().flatten() {
            let b = self.tree.bounds(id);
            self.request_draw_crop(base_x + b.x, base_y + b.y, b.width, height);
        }
    }

    /// Scroll one slot in `direction`, moving the selection along when it
    /// would otherwise leave the visible area.
    pub fn scroll_page(&mut self, direction: ScrollDirection) {
        let slot = self.slot_width();
        let picker = self.tree.bounds(self.controls.picker);
        let container_width = i64::from(self.tree.bounds(self.controls.container).width);

        if let Some(selected) = self.selected {
            let entry = self.tree.bounds(selected);
            let neighbour = match direction {
                ScrollDirection::Left if picker.x + slot + entry.right() > container_width => {
                    self.prev_entry(selected)
                }
                ScrollDirection::Right if picker.x + entry.x < slot => self.next_entry(selected),
                _ => None,
            };
            if let Some(neighbour) = neighbour {
                self.select_entry(neighbour, true);
            }
        }

        self.scroll(match direction {
            ScrollDirection::Left => slot,
            ScrollDirection::Right => -slot,
        });
    }

    /// Entries hidden left of the container.
    #[must_use]
    pub fn overflows_left(&self) -> bool {
        self.tree.bounds(self.controls.picker).x < 0
    }

    /// Entries hidden right of the container.
    #[must_use]
    pub fn overflows_right(&self) -> bool {
        self.tree.bounds(self.controls.picker).right()
            > i64::from(self.tree.bounds(self.controls.container).width)
    }

    /// Record the decision to boot the current selection.
    pub fn commit_boot(&mut self, set_default: bool) {
        if self.selected.is_none() {
            return;
        }
        self.session.set_default = set_default;
        self.session.ready_to_boot = true;
    }

    /// Initial scroll: bring the default entry into view, or failing that,
    /// line up a partially visible leading entry with the container edge.
    pub(crate) fn settle_initial_scroll(&mut self) {
        let mut delta = self.scroll_selected();
        if delta == 0 {
            let picker_x = self.tree.bounds(self.controls.picker).x;
            let mut previous: Option<(i64, u32)> = None;
            for &entry in self.entries() {
                let b = self.tree.bounds(entry);
                let x = picker_x + b.x;
                if x >= 0 {
                    if let Some((prev_x, prev_width)) = previous {
                        if prev_x + i64::from(prev_width) > 0 {
                            delta = -prev_x;
                        }
                    }
                    break;
                }
                previous = Some((x, b.width));
            }
        }
        self.tree
            .update_bounds(self.controls.picker, |b| b.x += delta);

        // Aligning the leading entry may push a right-hand selection out.
        let correction = self.scroll_selected();
        self.tree
            .update_bounds(self.controls.picker, |b| b.x += correction);
    }
}
