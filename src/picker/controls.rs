//! Selector, scroll arrows, and the shutdown and restart buttons.

use std::rc::Rc;

use crate::buffer::{ClipRect, FrameBuffer, Image};
use crate::event::{EVENT_RESET, emit_event};
use crate::input::PointerPhase;
use crate::view::{EventContext, Scene};
use crate::widget::{PointerEvent, Widget, WidgetId, is_hit};

/// Request a redraw of the widget at `event`'s base when its pressed state
/// changes.
fn update_held(
    held: &mut bool,
    now_held: bool,
    this: WidgetId,
    cx: &mut EventContext<'_>,
    event: PointerEvent,
) {
    if *held == now_held {
        return;
    }
    *held = now_held;
    let b = cx.scene.tree().bounds(this);
    cx.scene
        .request_draw_crop(event.base_x, event.base_y, b.width, b.height);
}

// ============================================================================
// Selector
// ============================================================================

/// Highlight behind the selected entry plus the button beneath it.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectorWidget {
    held: bool,
}

impl SelectorWidget {
    #[must_use]
    pub const fn is_held(&self) -> bool {
        self.held
    }

    fn button_origin(scene: &Scene, button: &Image) -> (i64, i64) {
        let m = scene.metrics();
        let background = i64::from(scene.scaled(m.selector_background_dimension));
        let x = (background - i64::from(button.width())) / 2;
        let y = i64::from(scene.scaled(
            m.selector_background_dimension + m.selector_button_space(),
        ));
        (x, y)
    }
}

impl Widget for SelectorWidget {
    fn draw(
        &self,
        _this: WidgetId,
        scene: &Scene,
        screen: &mut FrameBuffer,
        base_x: i64,
        base_y: i64,
        window: ClipRect,
    ) {
        let opacity = scene.opacity();
        let images = scene.images();
        let background = scene.scaled(scene.metrics().selector_background_dimension);
        if window.y < background {
            screen.draw_child_image(&images.selected, opacity, base_x, base_y, 0, 0, window);
        }

        let button = images.selector.get(self.held);
        let (x, y) = Self::button_origin(scene, button);
        screen.draw_child_image(button, opacity, base_x, base_y, x, y, window);
    }

    // Pointer input reaches the selector during the intro as well.
    fn pointer_event(
        &mut self,
        this: WidgetId,
        cx: &mut EventContext<'_>,
        event: PointerEvent,
    ) -> Option<WidgetId> {
        let button = Rc::clone(&cx.scene.images().selector.base);
        let (x, y) = Self::button_origin(cx.scene, &button);
        let hit = is_hit(&button, event.offset_x - x, event.offset_y - y);

        let mut held = false;
        if hit {
            if event.phase == PointerPhase::Up {
                cx.scene.commit_boot(false);
            } else {
                held = true;
            }
        }
        update_held(&mut self.held, held, this, cx, event);

        // A press outside the button belongs to the entry underneath.
        if hit || event.phase != PointerPhase::Down {
            Some(this)
        } else {
            None
        }
    }
}

// ============================================================================
// Scroll arrows
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

/// Arrow that pages the entry row. Hidden while there is nothing to scroll
/// towards.
#[derive(Clone, Copy, Debug)]
pub struct ScrollButton {
    direction: ScrollDirection,
    held: bool,
}

impl ScrollButton {
    #[must_use]
    pub const fn new(direction: ScrollDirection) -> Self {
        Self {
            direction,
            held: false,
        }
    }

    #[must_use]
    pub const fn direction(&self) -> ScrollDirection {
        self.direction
    }

    fn can_scroll(&self, scene: &Scene) -> bool {
        match self.direction {
            ScrollDirection::Left => scene.overflows_left(),
            ScrollDirection::Right => scene.overflows_right(),
        }
    }

    fn image<'a>(&self, scene: &'a Scene, held: bool) -> &'a Image {
        let images = scene.images();
        let button = match self.direction {
            ScrollDirection::Left => &images.left_scroll,
            ScrollDirection::Right => &images.right_scroll,
        };
        button.get(held)
    }
}

impl Widget for ScrollButton {
    fn draw(
        &self,
        _this: WidgetId,
        scene: &Scene,
        screen: &mut FrameBuffer,
        base_x: i64,
        base_y: i64,
        window: ClipRect,
    ) {
        if self.can_scroll(scene) {
            let image = self.image(scene, self.held);
            screen.draw_image(image, scene.opacity(), base_x, base_y, window);
        }
    }

    fn pointer_event(
        &mut self,
        this: WidgetId,
        cx: &mut EventContext<'_>,
        event: PointerEvent,
    ) -> Option<WidgetId> {
        if !cx.scene.is_opaque() {
            return Some(this);
        }

        let active = self.can_scroll(cx.scene)
            && is_hit(self.image(cx.scene, false), event.offset_x, event.offset_y);
        let mut held = false;
        if active {
            if event.phase == PointerPhase::Up {
                cx.scene.scroll_page(self.direction);
            } else {
                held = true;
            }
        }
        update_held(&mut self.held, held, this, cx, event);
        Some(this)
    }
}

// ============================================================================
// Action buttons
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetAction {
    ShutDown,
    Restart,
}

impl ResetAction {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ShutDown => "shutdown",
            Self::Restart => "restart",
        }
    }
}

/// Button that resets the platform when released over its image.
#[derive(Clone, Copy, Debug)]
pub struct ActionButton {
    action: ResetAction,
    held: bool,
}

impl ActionButton {
    #[must_use]
    pub const fn new(action: ResetAction) -> Self {
        Self {
            action,
            held: false,
        }
    }

    #[must_use]
    pub const fn action(&self) -> ResetAction {
        self.action
    }

    fn image<'a>(&self, scene: &'a Scene, held: bool) -> &'a Image {
        let images = scene.images();
        let button = match self.action {
            ResetAction::ShutDown => &images.shut_down,
            ResetAction::Restart => &images.restart,
        };
        button.get(held)
    }
}

impl Widget for ActionButton {
    fn draw(
        &self,
        _this: WidgetId,
        scene: &Scene,
        screen: &mut FrameBuffer,
        base_x: i64,
        base_y: i64,
        window: ClipRect,
    ) {
        let image = self.image(scene, self.held);
        screen.draw_image(image, scene.opacity(), base_x, base_y, window);
    }

    fn pointer_event(
        &mut self,
        this: WidgetId,
        cx: &mut EventContext<'_>,
        event: PointerEvent,
    ) -> Option<WidgetId> {
        if !cx.scene.is_opaque() {
            return Some(this);
        }

        let hit = is_hit(self.image(cx.scene, false), event.offset_x, event.offset_y);
        let mut held = false;
        if hit {
            if event.phase == PointerPhase::Up {
                emit_event(EVENT_RESET, self.action.name());
                match self.action {
                    ResetAction::ShutDown => cx.platform.shutdown(),
                    ResetAction::Restart => cx.platform.warm_reset(),
                }
            } else {
                held = true;
            }
        }
        update_held(&mut self.held, held, this, cx, event);
        Some(this)
    }
}
