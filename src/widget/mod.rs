//! Retained widget tree.
//!
//! Every on-screen element is a node in a [`WidgetTree`] with a placement
//! relative to its parent. Behaviour lives behind the [`Widget`] trait, whose
//! three capabilities (draw, pointer event, key event) default to delegating
//! to the node's children, so pure containers need no code at all.
//!
//! Coordinates passed to a capability follow one convention:
//!
//! - `base_x`/`base_y` are the absolute screen position of the widget origin.
//! - Draw windows and pointer offsets are local to the widget.

mod hit;
mod tree;

pub use hit::is_hit;
pub use tree::{Bounds, WidgetId, WidgetTree};

use std::any::Any;

use crate::buffer::{ClipRect, FrameBuffer};
use crate::input::{KeyEvent, PointerPhase};
use crate::view::{EventContext, Scene};

/// A pointer gesture phase delivered to one widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    /// Absolute screen position of the receiving widget's origin.
    pub base_x: i64,
    pub base_y: i64,
    /// Pointer position relative to the receiving widget.
    pub offset_x: i64,
    pub offset_y: i64,
}

impl PointerEvent {
    /// The same event re-expressed for a child placed at `bounds`.
    #[must_use]
    pub const fn for_child(&self, bounds: Bounds) -> Self {
        Self {
            phase: self.phase,
            base_x: self.base_x + bounds.x,
            base_y: self.base_y + bounds.y,
            offset_x: self.offset_x - bounds.x,
            offset_y: self.offset_y - bounds.y,
        }
    }
}

/// Upcast helper so trait objects can be downcast to concrete widgets.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Behaviour attached to a node of the widget tree.
pub trait Widget: AsAny {
    /// Paint the `window` (widget-local) of this widget whose origin is at
    /// `(base_x, base_y)` on screen.
    fn draw(
        &self,
        this: WidgetId,
        scene: &Scene,
        screen: &mut FrameBuffer,
        base_x: i64,
        base_y: i64,
        window: ClipRect,
    ) {
        scene.draw_children(this, screen, base_x, base_y, window);
    }

    /// React to a pointer phase. Returns the widget that consumed it, which
    /// receives the hold and release phases of the same gesture.
    fn pointer_event(
        &mut self,
        this: WidgetId,
        cx: &mut EventContext<'_>,
        event: PointerEvent,
    ) -> Option<WidgetId> {
        cx.delegate_pointer_event(this, event)
    }

    /// React to a key.
    fn key_event(&mut self, _this: WidgetId, _cx: &mut EventContext<'_>, _key: KeyEvent) {}
}

/// A container with no behaviour of its own.
#[derive(Clone, Copy, Debug, Default)]
pub struct Group;

impl Widget for Group {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_event_for_child() {
        let event = PointerEvent {
            phase: PointerPhase::Down,
            base_x: 100,
            base_y: 50,
            offset_x: 30,
            offset_y: 20,
        };
        let child = event.for_child(Bounds::new(10, -5, 40, 40));
        assert_eq!((child.base_x, child.base_y), (110, 45));
        assert_eq!((child.offset_x, child.offset_y), (20, 25));
    }

    #[test]
    fn test_bounds_contains() {
        let b = Bounds::new(-10, 0, 20, 5);
        assert!(b.contains(-10, 0));
        assert!(b.contains(9, 4));
        assert!(!b.contains(10, 0));
        assert!(!b.contains(0, 5));
        assert_eq!(b.right(), 10);
    }

    // =========================================================================
    // Tree structure
    // =========================================================================

    #[derive(Debug)]
    struct Tag(u32);

    impl Widget for Tag {}

    #[test]
    fn test_children_order_and_siblings() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Bounds::new(0, 0, 100, 100), Box::new(Group));
        let a = tree.push_child(root, Bounds::new(0, 0, 10, 10), Box::new(Tag(1)));
        let c = tree.push_child(root, Bounds::new(20, 0, 10, 10), Box::new(Tag(3)));
        let b = tree
            .insert_before(c, Bounds::new(10, 0, 10, 10), Box::new(Tag(2)))
            .unwrap();

        assert_eq!(tree.children(root), &[a, b, c]);
        assert_eq!(tree.next_sibling(a), Some(b));
        assert_eq!(tree.prev_sibling(a), None);
        assert_eq!(tree.prev_sibling(c), Some(b));
        assert_eq!(tree.next_sibling(c), None);
        assert_eq!(tree.parent(b), Some(root));
        assert_eq!(tree.widget_as::<Tag>(b).map(|t| t.0), Some(2));
        assert!(tree.widget_as::<Group>(b).is_none());
    }

    #[test]
    fn test_origin_walks_parents() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Bounds::new(0, 0, 100, 100), Box::new(Group));
        let mid = tree.push_child(root, Bounds::new(30, 40, 50, 50), Box::new(Group));
        let leaf = tree.push_child(mid, Bounds::new(-5, 2, 10, 10), Box::new(Group));
        assert_eq!(tree.origin(leaf), (25, 42));

        tree.update_bounds(mid, |b| b.x += 10);
        assert_eq!(tree.origin(leaf), (35, 42));
    }

    #[test]
    fn test_remove_detaches_from_parent() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Bounds::default(), Box::new(Group));
        let a = tree.push_child(root, Bounds::default(), Box::new(Tag(1)));
        let b = tree.push_child(root, Bounds::default(), Box::new(Tag(2)));
        assert!(tree.remove(a).is_some());
        assert_eq!(tree.children(root), &[b]);
        assert!(!tree.contains(a));
        assert!(tree.remove(a).is_none());
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_take_and_restore_widget() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Bounds::default(), Box::new(Tag(7)));
        let w = tree.take_widget(root).unwrap();
        assert!(tree.widget(root).is_none());
        tree.restore_widget(root, w);
        assert_eq!(tree.widget_as::<Tag>(root).map(|t| t.0), Some(7));
    }
}
