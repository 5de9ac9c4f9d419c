//! Shared state reachable from every widget capability.

use std::rc::Rc;

use slotmap::SecondaryMap;

use crate::buffer::{ClipRect, FrameBuffer};
use crate::config::{Metrics, ViewConfig};
use crate::input::KeyEvent;
use crate::picker::{ControlImages, Theme};
use crate::platform::{BootEntryInfo, Platform};
use crate::renderer::DrawQueue;
use crate::widget::{PointerEvent, WidgetId, WidgetTree};

/// Handles of the fixed widgets of a picker view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Controls {
    pub view: WidgetId,
    pub actions: WidgetId,
    pub restart: WidgetId,
    pub shut_down: WidgetId,
    pub right_scroll: WidgetId,
    pub container: WidgetId,
    pub picker: WidgetId,
    pub selector: WidgetId,
    pub left_scroll: WidgetId,
}

/// Decisions the picker reports back to its host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub ready_to_boot: bool,
    pub refresh: bool,
    /// Boot the selection and make it the default.
    pub set_default: bool,
    pub hide_auxiliary: bool,
    /// Descriptor of the current selection.
    pub boot_entry: Option<Rc<BootEntryInfo>>,
    /// Ticks left before the selection is narrated.
    pub audio_playback_timeout: Option<u32>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            ready_to_boot: false,
            refresh: false,
            set_default: false,
            hide_auxiliary: true,
            boot_entry: None,
            audio_playback_timeout: None,
        }
    }
}

impl Session {
    /// The view loop stops once either flag is raised.
    #[must_use]
    pub const fn should_exit(&self) -> bool {
        self.ready_to_boot || self.refresh
    }
}

/// Everything a widget may read or change while handling a capability.
pub struct Scene {
    pub(crate) tree: WidgetTree,
    pub(crate) controls: Controls,
    pub(crate) selected: Option<WidgetId>,
    pub(crate) targets: SecondaryMap<WidgetId, Rc<BootEntryInfo>>,
    pub(crate) session: Session,
    pub(crate) requests: DrawQueue,
    pub(crate) theme: Theme,
    pub(crate) images: ControlImages,
    pub(crate) config: ViewConfig,
    pub(crate) opacity: u8,
}

impl Scene {
    #[must_use]
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    #[must_use]
    pub const fn controls(&self) -> &Controls {
        &self.controls
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    #[must_use]
    pub const fn images(&self) -> &ControlImages {
        &self.images
    }

    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.config.scale
    }

    #[must_use]
    pub const fn metrics(&self) -> &Metrics {
        &self.config.metrics
    }

    /// Scale an unscaled dimension.
    #[must_use]
    pub const fn scaled(&self, value: u32) -> u32 {
        self.config.scaled(value)
    }

    /// Global opacity of the picker widgets.
    #[must_use]
    pub const fn opacity(&self) -> u8 {
        self.opacity
    }

    /// Input to anything but the selector is ignored until the intro fade
    /// completes.
    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        self.opacity == 0xFF
    }

    #[must_use]
    pub const fn view_width(&self) -> u32 {
        self.config.width
    }

    #[must_use]
    pub const fn view_height(&self) -> u32 {
        self.config.height
    }

    /// Schedule a redraw of a screen rectangle that must lie on screen.
    pub fn request_draw(&mut self, x: i64, y: i64, width: u32, height: u32) {
        debug_assert!(
            x >= 0
                && y >= 0
                && x + i64::from(width) <= i64::from(self.view_width())
                && y + i64::from(height) <= i64::from(self.view_height()),
            "redraw of ({x}, {y}, {width}x{height}) leaves the screen"
        );
        self.requests.request_draw_crop(x, y, width, height);
    }

    /// Schedule a redraw of a screen rectangle, cropped to the screen.
    pub fn request_draw_crop(&mut self, x: i64, y: i64, width: u32, height: u32) {
        self.requests.request_draw_crop(x, y, width, height);
    }

    /// Draw one widget if it is attached.
    pub fn draw_widget(
        &self,
        id: WidgetId,
        screen: &mut FrameBuffer,
        base_x: i64,
        base_y: i64,
        window: ClipRect,
    ) {
        if let Some(widget) = self.tree.widget(id) {
            widget.draw(id, self, screen, base_x, base_y, window);
        }
    }

    /// Draw every child of `this` that intersects `window`, in order.
    pub fn draw_children(
        &self,
        this: WidgetId,
        screen: &mut FrameBuffer,
        base_x: i64,
        base_y: i64,
        window: ClipRect,
    ) {
        for &child in self.tree.children(this) {
            let b = self.tree.bounds(child);
            if let Some(local) = window.clip_child(b.x, b.y, b.width, b.height) {
                self.draw_widget(child, screen, base_x + b.x, base_y + b.y, local);
            }
        }
    }
}

/// Mutable access handed to pointer and key handlers.
pub struct EventContext<'a> {
    pub scene: &'a mut Scene,
    pub platform: &'a mut dyn Platform,
}

impl<'a> EventContext<'a> {
    pub fn new(scene: &'a mut Scene, platform: &'a mut dyn Platform) -> Self {
        Self { scene, platform }
    }

    /// Deliver a pointer phase to one widget.
    pub fn dispatch_pointer(&mut self, id: WidgetId, event: PointerEvent) -> Option<WidgetId> {
        let mut widget = self.scene.tree.take_widget(id)?;
        let consumer = widget.pointer_event(id, self, event);
        self.scene.tree.restore_widget(id, widget);
        consumer
    }

    /// Offer a pointer phase to the children of `this`, top-most first.
    /// Returns the first widget that consumes it.
    pub fn delegate_pointer_event(
        &mut self,
        this: WidgetId,
        event: PointerEvent,
    ) -> Option<WidgetId> {
        let children = self.scene.tree.children(this).to_vec();
        for &child in children.iter().rev() {
            let b = self.scene.tree.bounds(child);
            if !b.contains(event.offset_x, event.offset_y) {
                continue;
            }
            if let Some(consumer) = self.dispatch_pointer(child, event.for_child(b)) {
                return Some(consumer);
            }
        }
        None
    }

    /// Deliver a key to one widget.
    pub fn dispatch_key(&mut self, id: WidgetId, key: KeyEvent) {
        if let Some(mut widget) = self.scene.tree.take_widget(id) {
            widget.key_event(id, self, key);
            self.scene.tree.restore_widget(id, widget);
        }
    }
}
