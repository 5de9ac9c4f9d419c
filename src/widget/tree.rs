//! Arena of widget nodes.

use slotmap::{SlotMap, new_key_type};

use crate::widget::Widget;

new_key_type! {
    /// Handle of a node in a [`WidgetTree`].
    pub struct WidgetId;
}

/// Placement of a widget relative to its parent's origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    #[must_use]
    pub const fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge in parent coordinates.
    #[must_use]
    pub const fn right(&self) -> i64 {
        self.x + self.width as i64
    }

    /// Bottom edge in parent coordinates.
    #[must_use]
    pub const fn bottom(&self) -> i64 {
        self.y + self.height as i64
    }

    /// Check if a parent-space point falls inside.
    #[must_use]
    pub const fn contains(&self, px: i64, py: i64) -> bool {
        px >= self.x && py >= self.y && px < self.right() && py < self.bottom()
    }
}

struct Node {
    bounds: Bounds,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    widget: Option<Box<dyn Widget>>,
}

/// Owns every widget and its placement.
///
/// Composites own an ordered list of child handles; the first child is drawn
/// first and is therefore bottom-most. Each node records its parent so
/// absolute coordinates can be recovered from any handle.
#[derive(Default)]
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, Node>,
}

impl WidgetTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Insert a parentless node.
    pub fn insert_root(&mut self, bounds: Bounds, widget: Box<dyn Widget>) -> WidgetId {
        self.nodes.insert(Node {
            bounds,
            parent: None,
            children: Vec::new(),
            widget: Some(widget),
        })
    }

    /// Append a node as the last (top-most) child of `parent`.
    pub fn push_child(
        &mut self,
        parent: WidgetId,
        bounds: Bounds,
        widget: Box<dyn Widget>,
    ) -> WidgetId {
        let len = self.children(parent).len();
        self.insert_child(parent, len, bounds, widget)
    }

    /// Insert a node as a child of `parent` immediately before `sibling`.
    pub fn insert_before(
        &mut self,
        sibling: WidgetId,
        bounds: Bounds,
        widget: Box<dyn Widget>,
    ) -> Option<WidgetId> {
        let parent = self.parent(sibling)?;
        let index = self.index_in_parent(sibling)?;
        Some(self.insert_child(parent, index, bounds, widget))
    }

    fn insert_child(
        &mut self,
        parent: WidgetId,
        index: usize,
        bounds: Bounds,
        widget: Box<dyn Widget>,
    ) -> WidgetId {
        debug_assert!(self.nodes.contains_key(parent), "unknown parent widget");
        let id = self.nodes.insert(Node {
            bounds,
            parent: Some(parent),
            children: Vec::new(),
            widget: Some(widget),
        });
        if let Some(node) = self.nodes.get_mut(parent) {
            let index = index.min(node.children.len());
            node.children.insert(index, id);
        }
        id
    }

    /// Detach and drop a leaf node. Returns its widget.
    pub fn remove(&mut self, id: WidgetId) -> Option<Box<dyn Widget>> {
        debug_assert!(
            self.children(id).is_empty(),
            "removing a widget that still has children"
        );
        let node = self.nodes.remove(id)?;
        if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|&child| child != id);
        }
        node.widget
    }

    #[must_use]
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id)?.parent
    }

    /// Children in draw order.
    #[must_use]
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        match self.nodes.get(id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    #[must_use]
    pub fn index_in_parent(&self, id: WidgetId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    #[must_use]
    pub fn next_sibling(&self, id: WidgetId) -> Option<WidgetId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        self.children(parent).get(index + 1).copied()
    }

    #[must_use]
    pub fn prev_sibling(&self, id: WidgetId) -> Option<WidgetId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        index
            .checked_sub(1)
            .and_then(|i| self.children(parent).get(i).copied())
    }

    #[must_use]
    pub fn bounds(&self, id: WidgetId) -> Bounds {
        self.nodes.get(id).map(|n| n.bounds).unwrap_or_default()
    }

    /// Modify the placement of a node. Unknown handles are ignored.
    pub fn update_bounds(&mut self, id: WidgetId, f: impl FnOnce(&mut Bounds)) {
        if let Some(node) = self.nodes.get_mut(id) {
            f(&mut node.bounds);
        }
    }

    /// Absolute screen position of a node's origin.
    #[must_use]
    pub fn origin(&self, id: WidgetId) -> (i64, i64) {
        let mut x = 0;
        let mut y = 0;
        let mut cursor = Some(id);
        while let Some(node) = cursor.and_then(|c| self.nodes.get(c)) {
            x += node.bounds.x;
            y += node.bounds.y;
            cursor = node.parent;
        }
        (x, y)
    }

    #[must_use]
    pub fn widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.nodes.get(id)?.widget.as_deref()
    }

    /// Typed access to a widget.
    #[must_use]
    pub fn widget_as<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        self.widget(id)?.as_any().downcast_ref::<T>()
    }

    /// Temporarily detach a widget so it can be called with mutable access
    /// to the rest of the tree. Pair with [`restore_widget`](Self::restore_widget).
    pub(crate) fn take_widget(&mut self, id: WidgetId) -> Option<Box<dyn Widget>> {
        self.nodes.get_mut(id)?.widget.take()
    }

    pub(crate) fn restore_widget(&mut self, id: WidgetId, widget: Box<dyn Widget>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.widget = Some(widget);
        }
    }
}
