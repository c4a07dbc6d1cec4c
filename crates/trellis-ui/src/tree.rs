//! The widget tree.
//!
//! Widgets live in an arena owned by [`WidgetTree`] and are addressed by
//! [`WidgetId`]. A parent owns the ordered list of its children; the child
//! keeps a plain id back to its parent. Only root widgets hold a window
//! backend; everything below a root reaches the window by walking up.
//!
//! Operations on an id that is not (or no longer) in the tree are no-ops and
//! queries on it return defaults.

use crate::border::Border;
use crate::event::{Event, EventHandler, EventType, HandlerId, Handlers};
use crate::flags::WidgetFlags;
use crate::graphics::Graphics;
use crate::layout::{DEFAULT_MAX, Layout, Sizer, Sizes};
use crate::window::WindowBackend;
use indexmap::IndexMap;
use std::any::Any;
use std::fmt;
use std::rc::Rc;
use trellis_core::Color;
use trellis_core::geometry::{Insets, Point, Rect, Size};
use trellis_core::profiling::profile_function;

/// Widget identifier in a [`WidgetTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(usize);

impl WidgetId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the widget tree.
pub struct WidgetNode {
    pub(crate) parent: Option<WidgetId>,
    pub(crate) children: Vec<WidgetId>,
    pub(crate) bounds: Rect,
    pub(crate) flags: WidgetFlags,
    pub(crate) background: Color,
    pub(crate) border: Option<Rc<dyn Border>>,
    pub(crate) sizer: Option<Rc<dyn Sizer>>,
    pub(crate) layout: Option<Rc<dyn Layout>>,
    pub(crate) layout_data: Option<Box<dyn Any>>,
    pub(crate) handlers: Handlers,
    pub(crate) window: Option<Rc<dyn WindowBackend>>,
    pub(crate) sequence: u64,
    pub(crate) name: Option<String>,
}

impl WidgetNode {
    fn new() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            bounds: Rect::ZERO,
            flags: WidgetFlags::default(),
            background: Color::TRANSPARENT,
            border: None,
            sizer: None,
            layout: None,
            layout_data: None,
            handlers: Handlers::new(),
            window: None,
            sequence: 0,
            name: None,
        }
    }

    fn insets(&self) -> Insets {
        self.border.as_ref().map_or(Insets::ZERO, |border| border.insets())
    }

    fn local_bounds(&self) -> Rect {
        Rect::from_size(self.bounds.size())
    }
}

impl fmt::Debug for WidgetNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetNode")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("bounds", &self.bounds)
            .field("flags", &self.flags)
            .field("handlers", &self.handlers)
            .finish_non_exhaustive()
    }
}

/// Arena of widget nodes.
#[derive(Debug, Default)]
pub struct WidgetTree {
    nodes: IndexMap<WidgetId, WidgetNode>,
    next_id: usize,
    next_handler: u64,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached widget.
    pub fn create(&mut self) -> WidgetId {
        let id = WidgetId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, WidgetNode::new());
        id
    }

    /// Create a detached widget with a debug name.
    pub fn create_named(&mut self, name: impl Into<String>) -> WidgetId {
        let id = self.create();
        self.set_name(id, name);
        id
    }

    /// Detach `id` from its parent and drop it together with its subtree.
    pub fn remove(&mut self, id: WidgetId) {
        if !self.contains(id) {
            return;
        }
        self.remove_from_parent(id);
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.swap_remove(&current) {
                stack.extend(node.children);
            }
        }
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.nodes.get(&id)
    }

    pub fn set_name(&mut self, id: WidgetId, name: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.name = Some(name.into());
        }
    }

    /// The debug name, or the id when unnamed.
    pub fn describe(&self, id: WidgetId) -> String {
        match self.nodes.get(&id).and_then(|node| node.name.as_deref()) {
            Some(name) => format!("{} {}", name, id),
            None => format!("widget {}", id),
        }
    }

    // Hierarchy

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes
            .get(&id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    pub fn index_of_child(&self, parent: WidgetId, child: WidgetId) -> Option<usize> {
        self.children(parent).iter().position(|c| *c == child)
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) {
        let index = self.children(parent).len();
        self.insert_child(parent, child, index);
    }

    /// Insert `child` at `index` (clamped to the child count), detaching it
    /// from any previous parent. Refuses to create a cycle.
    pub fn insert_child(&mut self, parent: WidgetId, child: WidgetId, index: usize) {
        if parent == child || !self.contains(parent) || !self.contains(child) {
            return;
        }
        if self.is_ancestor(child, parent) {
            tracing::warn!(
                "refusing to add {} beneath its own descendant {}",
                self.describe(child),
                self.describe(parent)
            );
            return;
        }
        self.remove_from_parent(child);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
            node.window = None;
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            let index = index.min(node.children.len());
            node.children.insert(index, child);
            node.flags.insert(WidgetFlags::NEED_LAYOUT);
        }
        self.repaint(child);
    }

    /// Detach `child` from `parent`; no-op if it is not a child of `parent`.
    pub fn remove_child(&mut self, parent: WidgetId, child: WidgetId) {
        if let Some(index) = self.index_of_child(parent, child) {
            self.remove_child_at(parent, index);
        }
    }

    /// Detach the child at `index`; no-op when out of range.
    pub fn remove_child_at(&mut self, parent: WidgetId, index: usize) {
        let Some(&child) = self.children(parent).get(index) else {
            return;
        };
        self.repaint(child);
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.remove(index);
            node.flags.insert(WidgetFlags::NEED_LAYOUT);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = None;
        }
    }

    pub fn remove_from_parent(&mut self, child: WidgetId) {
        if let Some(parent) = self.parent(child) {
            self.remove_child(parent, child);
        }
    }

    /// Reparent `child` under `parent`, or detach it when `parent` is `None`.
    pub fn set_parent(&mut self, child: WidgetId, parent: Option<WidgetId>) {
        match parent {
            Some(parent) => self.add_child(parent, child),
            None => self.remove_from_parent(child),
        }
    }

    /// Whether `ancestor` is `id` or lies on its parent chain.
    pub fn is_ancestor(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(widget) = current {
            if widget == ancestor {
                return true;
            }
            current = self.parent(widget);
        }
        false
    }

    /// The top of the parent chain containing `id`.
    pub fn root_of(&self, id: WidgetId) -> WidgetId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    // Window

    /// Attach a window backend to a root widget. Ignored for widgets that
    /// have a parent.
    pub fn set_window(&mut self, root: WidgetId, window: Option<Rc<dyn WindowBackend>>) {
        let Some(node) = self.nodes.get_mut(&root) else {
            return;
        };
        if node.parent.is_some() {
            tracing::warn!("ignoring window assignment on non-root widget {}", root);
            return;
        }
        node.window = window;
    }

    /// The window backend reached by walking up from `id`.
    pub fn window_of(&self, id: WidgetId) -> Option<Rc<dyn WindowBackend>> {
        self.nodes.get(&self.root_of(id)).and_then(|node| node.window.clone())
    }

    // Geometry

    /// Bounds in the parent's coordinate space.
    pub fn bounds(&self, id: WidgetId) -> Rect {
        self.nodes.get(&id).map_or(Rect::ZERO, |node| node.bounds)
    }

    /// Bounds at the origin, in the widget's own coordinate space.
    pub fn local_bounds(&self, id: WidgetId) -> Rect {
        self.nodes.get(&id).map_or(Rect::ZERO, WidgetNode::local_bounds)
    }

    /// Local bounds inset by the border.
    pub fn local_inset_bounds(&self, id: WidgetId) -> Rect {
        self.nodes
            .get(&id)
            .map_or(Rect::ZERO, |node| node.local_bounds().inset(node.insets()))
    }

    pub fn location(&self, id: WidgetId) -> Point {
        self.bounds(id).origin()
    }

    pub fn size(&self, id: WidgetId) -> Size {
        self.bounds(id).size()
    }

    /// Set the bounds, repainting the old and new areas. A size change marks
    /// the widget for layout and dispatches a `Resized` event to it.
    pub fn set_bounds(&mut self, id: WidgetId, bounds: Rect) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        let old = node.bounds;
        if old == bounds {
            return;
        }
        let resized = old.size() != bounds.size();
        self.repaint(id);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.bounds = bounds;
            if resized {
                node.flags.insert(WidgetFlags::NEED_LAYOUT);
            }
        }
        if resized {
            self.dispatch(&mut Event::simple(EventType::Resized, id));
        }
        self.repaint(id);
    }

    pub fn set_location(&mut self, id: WidgetId, location: Point) {
        let bounds = self.bounds(id).with_origin(location);
        self.set_bounds(id, bounds);
    }

    pub fn set_size(&mut self, id: WidgetId, size: Size) {
        let bounds = self.bounds(id).with_size(size);
        self.set_bounds(id, bounds);
    }

    /// Convert a point in `id`'s coordinates to window coordinates.
    pub fn to_window(&self, id: WidgetId, point: Point) -> Point {
        let mut point = point;
        let mut current = Some(id);
        while let Some(widget) = current {
            point += self.location(widget);
            current = self.parent(widget);
        }
        point
    }

    /// Convert a point in window coordinates to `id`'s coordinates.
    pub fn from_window(&self, id: WidgetId, point: Point) -> Point {
        point - self.to_window(id, Point::ZERO)
    }

    /// The deepest widget under `point` (in `id`'s coordinates), else `id`.
    /// Later children sit on top of earlier ones and are tested first.
    pub fn widget_at(&self, id: WidgetId, point: Point) -> WidgetId {
        let mut current = id;
        let mut point = point;
        'descend: loop {
            for &child in self.children(current).iter().rev() {
                let bounds = self.bounds(child);
                if bounds.contains(point) {
                    point -= bounds.origin();
                    current = child;
                    continue 'descend;
                }
            }
            return current;
        }
    }

    // Appearance and state

    pub fn border(&self, id: WidgetId) -> Option<Rc<dyn Border>> {
        self.nodes.get(&id).and_then(|node| node.border.clone())
    }

    pub fn set_border(&mut self, id: WidgetId, border: Option<Rc<dyn Border>>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            let unchanged = match (&node.border, &border) {
                (None, None) => true,
                (Some(current), Some(new)) => Rc::ptr_eq(current, new),
                _ => false,
            };
            if unchanged {
                return;
            }
            node.border = border;
            node.flags.insert(WidgetFlags::NEED_LAYOUT);
            self.repaint(id);
        }
    }

    /// The border's insets, or zero without a border.
    pub fn insets(&self, id: WidgetId) -> Insets {
        self.nodes.get(&id).map_or(Insets::ZERO, WidgetNode::insets)
    }

    pub fn background(&self, id: WidgetId) -> Color {
        self.nodes.get(&id).map_or(Color::TRANSPARENT, |node| node.background)
    }

    pub fn set_background(&mut self, id: WidgetId, color: Color) {
        if let Some(node) = self.nodes.get_mut(&id) {
            if node.background != color {
                node.background = color;
                self.repaint(id);
            }
        }
    }

    pub fn flags(&self, id: WidgetId) -> WidgetFlags {
        self.nodes.get(&id).map_or(WidgetFlags::empty(), |node| node.flags)
    }

    fn set_flag(&mut self, id: WidgetId, flag: WidgetFlags, value: bool) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        if node.flags.contains(flag) == value {
            return false;
        }
        node.flags.set(flag, value);
        true
    }

    pub fn is_enabled(&self, id: WidgetId) -> bool {
        !self.flags(id).contains(WidgetFlags::DISABLED)
    }

    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) {
        if self.set_flag(id, WidgetFlags::DISABLED, !enabled) {
            self.repaint(id);
        }
    }

    pub fn is_focused(&self, id: WidgetId) -> bool {
        self.flags(id).contains(WidgetFlags::FOCUSED)
    }

    /// Set the focused flag. Moving focus between widgets, with the
    /// accompanying events, is the window's job; see
    /// [`Window::set_focus`](crate::window::Window::set_focus).
    pub fn set_focused(&mut self, id: WidgetId, focused: bool) {
        if self.set_flag(id, WidgetFlags::FOCUSED, focused) {
            self.repaint(id);
        }
    }

    pub fn is_focusable(&self, id: WidgetId) -> bool {
        self.flags(id).contains(WidgetFlags::FOCUSABLE)
    }

    pub fn set_focusable(&mut self, id: WidgetId, focusable: bool) {
        self.set_flag(id, WidgetFlags::FOCUSABLE, focusable);
    }

    // Layout

    pub fn needs_layout(&self, id: WidgetId) -> bool {
        self.flags(id).contains(WidgetFlags::NEED_LAYOUT)
    }

    pub fn set_needs_layout(&mut self, id: WidgetId, needs_layout: bool) {
        self.set_flag(id, WidgetFlags::NEED_LAYOUT, needs_layout);
    }

    pub fn sizer(&self, id: WidgetId) -> Option<Rc<dyn Sizer>> {
        self.nodes.get(&id).and_then(|node| node.sizer.clone())
    }

    pub fn set_sizer(&mut self, id: WidgetId, sizer: Option<Rc<dyn Sizer>>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.sizer = sizer;
        }
        self.mark_parent_for_layout(id);
    }

    pub fn layout(&self, id: WidgetId) -> Option<Rc<dyn Layout>> {
        self.nodes.get(&id).and_then(|node| node.layout.clone())
    }

    pub fn set_layout(&mut self, id: WidgetId, layout: impl Layout + 'static) {
        self.set_layout_rc(id, Some(Rc::new(layout)));
    }

    pub fn set_layout_rc(&mut self, id: WidgetId, layout: Option<Rc<dyn Layout>>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.layout = layout;
            node.flags.insert(WidgetFlags::NEED_LAYOUT);
        }
    }

    /// The widget's layout data, if present and of type `T`.
    pub fn layout_data<T: Any>(&self, id: WidgetId) -> Option<&T> {
        self.nodes
            .get(&id)
            .and_then(|node| node.layout_data.as_ref())
            .and_then(|data| data.downcast_ref())
    }

    /// Replace the widget's layout data, marking it and its parent for layout.
    pub fn set_layout_data<T: Any>(&mut self, id: WidgetId, data: T) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.layout_data = Some(Box::new(data));
            node.flags.insert(WidgetFlags::NEED_LAYOUT);
        }
        self.mark_parent_for_layout(id);
    }

    /// Mutate the widget's layout data in place, creating a default record
    /// first if it has none of type `T`. Marks the parent for layout.
    pub fn update_layout_data<T: Any + Default>(&mut self, id: WidgetId, update: impl FnOnce(&mut T)) {
        if let Some(data) = self.ensure_layout_data::<T>(id) {
            update(data);
            self.mark_parent_for_layout(id);
        }
    }

    pub fn clear_layout_data(&mut self, id: WidgetId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.layout_data = None;
        }
        self.mark_parent_for_layout(id);
    }

    /// The widget's layout data of type `T`, replacing any missing or
    /// foreign record with `T::default()`. Does not mark anything for layout.
    pub fn ensure_layout_data<T: Any + Default>(&mut self, id: WidgetId) -> Option<&mut T> {
        let node = self.nodes.get_mut(&id)?;
        if !node.layout_data.as_ref().is_some_and(|data| data.is::<T>()) {
            node.layout_data = Some(Box::new(T::default()));
        }
        node.layout_data.as_mut().and_then(|data| data.downcast_mut())
    }

    fn mark_parent_for_layout(&mut self, id: WidgetId) {
        if let Some(parent) = self.parent(id) {
            self.set_needs_layout(parent, true);
        }
    }

    /// Minimum, preferred and maximum size of `id` for the given hint: from
    /// its layout, else its sizer, else zero with the default maximum.
    pub fn sizes(&self, id: WidgetId, hint: Size) -> Sizes {
        let Some(node) = self.nodes.get(&id) else {
            return Sizes::default();
        };
        if let Some(layout) = &node.layout {
            return layout.sizes(self, id, hint);
        }
        if let Some(sizer) = &node.sizer {
            return sizer.sizes(self, id, hint);
        }
        Sizes::new(Size::ZERO, Size::ZERO, Size::new(DEFAULT_MAX, DEFAULT_MAX))
    }

    /// Lay out `id` if it is marked, then recurse into every child.
    pub fn validate_layout(&mut self, id: WidgetId) {
        profile_function!();
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if node.flags.contains(WidgetFlags::NEED_LAYOUT) {
            if let Some(layout) = node.layout.clone() {
                tracing::trace!("laying out {}", self.describe(id));
                layout.layout(self, id);
                self.repaint(id);
            }
            self.set_needs_layout(id, false);
        }
        for child in self.children(id).to_vec() {
            self.validate_layout(child);
        }
    }

    // Painting

    pub fn repaint(&self, id: WidgetId) {
        self.repaint_bounds(id, self.local_bounds(id));
    }

    /// Request a repaint of `rect` (in `id`'s coordinates), clipped at every
    /// level to the widget's bounds and delivered to the window at the root.
    pub fn repaint_bounds(&self, id: WidgetId, rect: Rect) {
        let mut rect = rect;
        let mut current = id;
        loop {
            let Some(node) = self.nodes.get(&current) else {
                return;
            };
            rect = rect.intersect(node.local_bounds());
            if rect.is_empty() {
                return;
            }
            match node.parent {
                Some(parent) => {
                    rect = rect.translated(node.bounds.x, node.bounds.y);
                    current = parent;
                }
                None => {
                    if let Some(window) = &node.window {
                        window.request_repaint(rect);
                    }
                    return;
                }
            }
        }
    }

    /// Paint `id` and its subtree. `dirty` is in `id`'s coordinates.
    pub fn paint(&mut self, id: WidgetId, gc: &mut dyn Graphics, dirty: Rect) {
        profile_function!();
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        let local = node.local_bounds();
        let dirty = dirty.intersect(local);
        if dirty.is_empty() {
            return;
        }
        let background = node.background;
        let border = node.border.clone();

        gc.save();
        gc.clip_rect(dirty);
        if background.is_visible() {
            gc.set_fill_color(background);
            gc.fill_rect(dirty);
        }
        if let Some(border) = border {
            gc.save();
            border.paint(gc, local);
            gc.restore();
        }
        gc.save();
        self.dispatch(&mut Event::paint(id, &mut *gc, dirty));
        gc.restore();
        for child in self.children(id).to_vec() {
            let bounds = self.bounds(child);
            let overlap = dirty.intersect(bounds);
            if overlap.is_empty() {
                continue;
            }
            gc.save();
            gc.translate(bounds.x, bounds.y);
            self.paint(child, gc, overlap.translated(-bounds.x, -bounds.y));
            gc.restore();
        }
        gc.restore();
    }

    // Events

    pub fn add_handler(
        &mut self,
        id: WidgetId,
        event_type: EventType,
        handler: impl Fn(&mut WidgetTree, &mut Event<'_>) + 'static,
    ) -> Option<HandlerId> {
        self.add_handler_rc(id, event_type, Rc::new(handler))
    }

    /// Handler ids are unique across the whole tree.
    pub fn add_handler_rc(&mut self, id: WidgetId, event_type: EventType, handler: EventHandler) -> Option<HandlerId> {
        let node = self.nodes.get_mut(&id)?;
        let handler_id = HandlerId::new(self.next_handler);
        self.next_handler += 1;
        node.handlers.add(event_type, handler_id, handler);
        Some(handler_id)
    }

    pub fn remove_handler(&mut self, id: WidgetId, event_type: EventType, handler: HandlerId) -> bool {
        self.nodes
            .get_mut(&id)
            .is_some_and(|node| node.handlers.remove(event_type, handler))
    }

    pub fn handler_count(&self, id: WidgetId, event_type: EventType) -> usize {
        self.nodes.get(&id).map_or(0, |node| node.handlers.count(event_type))
    }

    /// Deliver `event` to its target and, while it cascades unfinished, to
    /// each ancestor in turn.
    pub fn dispatch(&mut self, event: &mut Event<'_>) {
        let event_type = event.event_type();
        if event_type != EventType::Paint {
            tracing::debug!("dispatch {}", event);
        }
        let mut current = Some(event.target());
        while let Some(id) = current {
            let Some(node) = self.nodes.get(&id) else {
                return;
            };
            let parent = node.parent;
            for handler in node.handlers.snapshot(event_type) {
                handler(self, event);
                if event.is_done() {
                    return;
                }
            }
            if !event.cascades() {
                return;
            }
            current = parent;
        }
    }

    // Timers

    /// Bump and return the widget's sequence number. Deferred work keyed on
    /// the returned value can detect that it has been superseded.
    pub fn next_sequence(&mut self, id: WidgetId) -> u64 {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.sequence += 1;
                node.sequence
            }
            None => 0,
        }
    }

    pub fn sequence(&self, id: WidgetId) -> u64 {
        self.nodes.get(&id).map_or(0, |node| node.sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_child_reparents() {
        let mut tree = WidgetTree::new();
        let a = tree.create();
        let b = tree.create();
        let child = tree.create();
        tree.add_child(a, child);
        tree.add_child(b, child);
        assert!(tree.children(a).is_empty());
        assert_eq!(tree.children(b), &[child]);
        assert_eq!(tree.parent(child), Some(b));
    }

    #[test]
    fn insert_refuses_cycles() {
        let mut tree = WidgetTree::new();
        let a = tree.create();
        let b = tree.create();
        tree.add_child(a, b);
        tree.add_child(b, a);
        assert_eq!(tree.parent(a), None);
        assert_eq!(tree.children(b), &[] as &[WidgetId]);
    }

    #[test]
    fn remove_child_at_out_of_range_is_noop() {
        let mut tree = WidgetTree::new();
        let parent = tree.create();
        let child = tree.create();
        tree.add_child(parent, child);
        tree.remove_child_at(parent, 5);
        assert_eq!(tree.children(parent), &[child]);
    }

    #[test]
    fn remove_drops_subtree() {
        let mut tree = WidgetTree::new();
        let root = tree.create();
        let mid = tree.create();
        let leaf = tree.create();
        tree.add_child(root, mid);
        tree.add_child(mid, leaf);
        tree.remove(mid);
        assert!(!tree.contains(mid));
        assert!(!tree.contains(leaf));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn unknown_ids_are_tolerated() {
        let mut tree = WidgetTree::new();
        let ghost = tree.create();
        tree.remove(ghost);
        tree.set_bounds(ghost, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(tree.bounds(ghost), Rect::ZERO);
        assert!(tree.children(ghost).is_empty());
        assert_eq!(tree.next_sequence(ghost), 0);
    }

    #[test]
    fn set_bounds_marks_layout_only_on_resize() {
        let mut tree = WidgetTree::new();
        let id = tree.create();
        tree.set_needs_layout(id, false);
        tree.set_location(id, Point::new(5.0, 5.0));
        assert!(!tree.needs_layout(id));
        tree.set_size(id, Size::new(10.0, 10.0));
        assert!(tree.needs_layout(id));
    }

    #[test]
    fn layout_data_changes_mark_parent() {
        let mut tree = WidgetTree::new();
        let parent = tree.create();
        let child = tree.create();
        tree.add_child(parent, child);
        tree.set_needs_layout(parent, false);
        tree.update_layout_data::<u32>(child, |value| *value = 3);
        assert_eq!(tree.layout_data::<u32>(child), Some(&3));
        assert!(tree.needs_layout(parent));
    }

    #[test]
    fn ensure_layout_data_replaces_foreign_type() {
        let mut tree = WidgetTree::new();
        let id = tree.create();
        tree.set_layout_data(id, "text");
        assert_eq!(tree.ensure_layout_data::<u8>(id).copied(), Some(0));
        assert!(tree.layout_data::<&str>(id).is_none());
    }

    #[test]
    fn window_coordinates_accumulate_offsets() {
        let mut tree = WidgetTree::new();
        let root = tree.create();
        let mid = tree.create();
        let leaf = tree.create();
        tree.add_child(root, mid);
        tree.add_child(mid, leaf);
        tree.set_bounds(root, Rect::new(0.0, 0.0, 100.0, 100.0));
        tree.set_bounds(mid, Rect::new(10.0, 20.0, 50.0, 50.0));
        tree.set_bounds(leaf, Rect::new(5.0, 5.0, 10.0, 10.0));
        assert_eq!(tree.to_window(leaf, Point::new(1.0, 1.0)), Point::new(16.0, 26.0));
        assert_eq!(tree.from_window(leaf, Point::new(16.0, 26.0)), Point::new(1.0, 1.0));
    }

    #[test]
    fn sequence_increments() {
        let mut tree = WidgetTree::new();
        let id = tree.create();
        assert_eq!(tree.sequence(id), 0);
        assert_eq!(tree.next_sequence(id), 1);
        assert_eq!(tree.next_sequence(id), 2);
        assert_eq!(tree.sequence(id), 2);
    }
}
