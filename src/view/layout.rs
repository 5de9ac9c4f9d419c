//! Initial placement of the fixed widgets.

use slotmap::SecondaryMap;

use crate::buffer::{ClipRect, FrameBuffer};
use crate::config::{Metrics, ViewConfig};
use crate::error::{Error, Result};
use crate::input::KeyEvent;
use crate::picker::{
    ActionButton, ButtonImages, ControlImages, PickerWidget, ResetAction, ScrollButton, ScrollDirection,
    SelectorWidget, Theme,
};
use crate::renderer::DrawQueue;
use crate::widget::{Bounds, Group, Widget, WidgetId, WidgetTree};

use super::scene::{Controls, Scene, Session};
use super::EventContext;

/// Width of the entry container: the room between the scroll arrows,
/// rounded down to a whole number of entry slots.
#[must_use]
pub fn container_width(view_width: u32, scale: u32, metrics: &Metrics) -> u32 {
    let scroll = i64::from(metrics.scroll_button_dimension * scale);
    let space = i64::from(metrics.scroll_button_space * scale);
    let slot = i64::from(metrics.slot() * scale);
    let available = i64::from(view_width) - 2 * scroll - 4 * space;
    if available <= 0 || slot == 0 {
        return 0;
    }
    (available - available % slot) as u32
}

/// Root of the widget tree: background and keyboard entry point.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewRoot;

impl Widget for ViewRoot {
    fn draw(
        &self,
        this: WidgetId,
        scene: &Scene,
        screen: &mut FrameBuffer,
        base_x: i64,
        base_y: i64,
        window: ClipRect,
    ) {
        let theme = scene.theme();
        screen.fill_rect(
            base_x + i64::from(window.x),
            base_y + i64::from(window.y),
            window.width,
            window.height,
            theme.background_color(),
        );
        if let Some(background) = theme.background_image() {
            let x = (i64::from(scene.view_width()) - i64::from(background.width())) / 2;
            let y = (i64::from(scene.view_height()) - i64::from(background.height())) / 2;
            screen.draw_child_image(background, 0xFF, base_x, base_y, x, y, window);
        }
        scene.draw_children(this, screen, base_x, base_y, window);
    }

    fn key_event(&mut self, _this: WidgetId, cx: &mut EventContext<'_>, key: KeyEvent) {
        let picker = cx.scene.controls().picker;
        cx.dispatch_key(picker, key);
    }
}

fn square_button(images: &ButtonImages, dimension: u32) -> Result<()> {
    let (width, height) = images.base.size();
    if (width, height) == (dimension, dimension) {
        Ok(())
    } else {
        Err(Error::InvalidDimensions { width, height })
    }
}

impl Scene {
    /// Lay out an empty picker for `config` using `theme`.
    pub(crate) fn build(config: ViewConfig, theme: Theme) -> Result<Self> {
        let images = ControlImages::resolve(&theme)?;
        let m = config.metrics;
        let s = |value: u32| config.scaled(value);
        let view_w = i64::from(config.width);
        let view_h = i64::from(config.height);

        let mut tree = WidgetTree::new();
        let view = tree.insert_root(
            Bounds::new(0, 0, config.width, config.height),
            Box::new(ViewRoot),
        );

        // Shutdown and restart, centred along the bottom edge.
        let (sd_w, sd_h) = images.shut_down.base.size();
        let (rs_w, rs_h) = images.restart.base.size();
        let action_space = s(m.action_button_space);
        let actions_w = sd_w + action_space + rs_w;
        let actions_h = sd_h.max(rs_h);
        let actions = tree.push_child(
            view,
            Bounds::new(
                (view_w - i64::from(actions_w)) / 2,
                view_h - i64::from(actions_h) - i64::from(action_space),
                actions_w,
                actions_h,
            ),
            Box::new(Group),
        );
        let restart = tree.push_child(
            actions,
            Bounds::new(i64::from(sd_w + action_space), 0, rs_w, rs_h),
            Box::new(ActionButton::new(ResetAction::Restart)),
        );
        let shut_down = tree.push_child(
            actions,
            Bounds::new(0, 0, sd_w, sd_h),
            Box::new(ActionButton::new(ResetAction::ShutDown)),
        );

        let scroll_dim = s(m.scroll_button_dimension);
        square_button(&images.left_scroll, scroll_dim)?;
        square_button(&images.right_scroll, scroll_dim)?;
        let scroll_space = i64::from(s(m.scroll_button_space));
        let scroll_y = (view_h - i64::from(scroll_dim)) / 2;
        let right_scroll = tree.push_child(
            view,
            Bounds::new(
                view_w - i64::from(scroll_dim) - scroll_space,
                scroll_y,
                scroll_dim,
                scroll_dim,
            ),
            Box::new(ScrollButton::new(ScrollDirection::Right)),
        );

        let cw = container_width(config.width, config.scale, &m);
        let ch = s(m.selector_height());
        let mut container_x = (view_w - i64::from(cw)) / 2;
        if config.play_intro {
            container_x += i64::from(m.intro_slide);
        }
        let container_y = (view_h - i64::from(s(m.entry_height() + m.entry_icon_space()))) / 2;
        let container = tree.push_child(
            view,
            Bounds::new(container_x, container_y, cw, ch),
            Box::new(Group),
        );
        let picker = tree.push_child(
            container,
            Bounds::new(i64::from(cw / 2 + s(m.entry_space) / 2), 0, 0, ch),
            Box::new(PickerWidget),
        );
        let selector = tree.push_child(
            picker,
            Bounds::new(0, 0, s(m.selector_width), ch),
            Box::new(SelectorWidget::default()),
        );

        let left_scroll = tree.push_child(
            view,
            Bounds::new(scroll_space, scroll_y, scroll_dim, scroll_dim),
            Box::new(ScrollButton::new(ScrollDirection::Left)),
        );

        Ok(Self {
            tree,
            controls: Controls {
                view,
                actions,
                restart,
                shut_down,
                right_scroll,
                container,
                picker,
                selector,
                left_scroll,
            },
            selected: None,
            targets: SecondaryMap::new(),
            session: Session::default(),
            requests: DrawQueue::new(config.width, config.height),
            theme,
            images,
            config,
            opacity: if config.play_intro { 0 } else { 0xFF },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_metrics() -> Metrics {
        Metrics {
            entry_dimension: 90,
            entry_icon_dimension: 74,
            entry_space: 10,
            selector_width: 90,
            selector_background_dimension: 90,
            ..Metrics::default()
        }
    }

    #[test]
    fn test_container_width_scenario() {
        assert_eq!(container_width(640, 1, &scenario_metrics()), 400);
    }

    #[test]
    fn test_container_width_is_whole_slots() {
        let m = Metrics::default();
        for width in [800, 1024, 1280, 1920] {
            for scale in [1, 2] {
                let cw = container_width(width, scale, &m);
                assert_eq!(cw % (m.slot() * scale), 0, "{width}@{scale}x");
            }
        }
    }

    #[test]
    fn test_container_width_too_narrow() {
        assert_eq!(container_width(200, 1, &Metrics::default()), 0);
        assert_eq!(container_width(0, 2, &Metrics::default()), 0);
    }
}
