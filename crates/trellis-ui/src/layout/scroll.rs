//! Viewport layout with on-demand scroll bars.

use super::{Layout, NO_HINT, Sizer, Sizes, default_max_size};
use crate::tree::{WidgetId, WidgetTree};
use std::cell::Cell;
use trellis_core::geometry::{Point, Rect, Size};

/// How the content widget is sized relative to the visible viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Always the content's preferred size.
    #[default]
    Unmodified,
    /// At least as wide as the viewport.
    FillWidth,
    /// At least as tall as the viewport.
    FillHeight,
    /// At least as large as the viewport on both axes.
    Fill,
}

impl ScrollBehavior {
    fn fills_width(self) -> bool {
        matches!(self, ScrollBehavior::FillWidth | ScrollBehavior::Fill)
    }

    fn fills_height(self) -> bool {
        matches!(self, ScrollBehavior::FillHeight | ScrollBehavior::Fill)
    }
}

/// The widgets making up a scrollable region: a clipping viewport whose
/// first child is the content, plus one bar per axis.
///
/// The scroll position is the negated location of the content within the
/// viewport, kept within `[0, content - visible]` on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollViewport {
    pub view: WidgetId,
    pub h_bar: WidgetId,
    pub v_bar: WidgetId,
}

impl ScrollViewport {
    pub fn content(&self, tree: &WidgetTree) -> Option<WidgetId> {
        tree.children(self.view).first().copied()
    }

    pub fn visible_size(&self, tree: &WidgetTree) -> Size {
        tree.size(self.view)
    }

    pub fn content_size(&self, tree: &WidgetTree) -> Size {
        self.content(tree).map_or(Size::ZERO, |content| tree.size(content))
    }

    /// Largest scroll position on each axis.
    pub fn max_position(&self, tree: &WidgetTree) -> Point {
        let range = self.content_size(tree) - self.visible_size(tree);
        Point::new(range.width.max(0.0), range.height.max(0.0))
    }

    pub fn scrolled_position(&self, tree: &WidgetTree) -> Point {
        self.content(tree)
            .map_or(Point::ZERO, |content| -tree.location(content))
    }

    /// Scroll to `position`, clamped to the valid range, and repaint the bars.
    pub fn set_scrolled_position(&self, tree: &mut WidgetTree, position: Point) {
        let Some(content) = self.content(tree) else {
            return;
        };
        let max = self.max_position(tree);
        let clamped = Point::new(position.x.clamp(0.0, max.x), position.y.clamp(0.0, max.y));
        if clamped != self.scrolled_position(tree) {
            tree.set_location(content, -clamped);
            tree.repaint(self.h_bar);
            tree.repaint(self.v_bar);
        }
    }

    /// Re-apply the current position so it respects the current sizes.
    pub fn clamp_position(&self, tree: &mut WidgetTree) {
        let position = self.scrolled_position(tree);
        self.set_scrolled_position(tree, position);
    }

    /// Scroll the minimum amount needed to show `rect` (in content
    /// coordinates).
    pub fn scroll_into_view(&self, tree: &mut WidgetTree, rect: Rect) {
        let mut position = self.scrolled_position(tree);
        let visible = self.visible_size(tree);
        if rect.x < position.x {
            position.x = rect.x;
        } else if rect.right() > position.x + visible.width {
            position.x = rect.right() - visible.width;
        }
        if rect.y < position.y {
            position.y = rect.y;
        } else if rect.bottom() > position.y + visible.height {
            position.y = rect.bottom() - visible.height;
        }
        self.set_scrolled_position(tree, position);
    }
}

/// Lays out a scroll area: the viewport fills the inset bounds minus
/// whichever bars are needed, bars hug the right and bottom edges.
#[derive(Debug)]
pub struct ScrollLayout {
    viewport: ScrollViewport,
    behavior: Cell<ScrollBehavior>,
}

impl ScrollLayout {
    pub fn new(viewport: ScrollViewport, behavior: ScrollBehavior) -> Self {
        Self {
            viewport,
            behavior: Cell::new(behavior),
        }
    }

    pub fn viewport(&self) -> ScrollViewport {
        self.viewport
    }

    pub fn behavior(&self) -> ScrollBehavior {
        self.behavior.get()
    }

    pub fn set_behavior(&self, behavior: ScrollBehavior) {
        self.behavior.set(behavior);
    }

    fn bar_sizes(&self, tree: &WidgetTree) -> (Size, Size) {
        let unhinted = Size::new(NO_HINT, NO_HINT);
        (
            tree.sizes(self.viewport.h_bar, unhinted).pref,
            tree.sizes(self.viewport.v_bar, unhinted).pref,
        )
    }

    fn attach(tree: &mut WidgetTree, area: WidgetId, bar: WidgetId, needed: bool) {
        let attached = tree.parent(bar) == Some(area);
        if needed && !attached {
            tree.add_child(area, bar);
        } else if !needed && attached {
            tree.remove_child(area, bar);
        }
    }
}

impl Sizer for ScrollLayout {
    fn sizes(&self, tree: &WidgetTree, target: WidgetId, hint: Size) -> Sizes {
        let (h_bar, v_bar) = self.bar_sizes(tree);
        let insets = tree.insets(target);
        let min = Size::new(v_bar.width * 2.0, h_bar.height * 2.0).add_insets(insets);
        let pref = self
            .viewport
            .content(tree)
            .map_or(Size::ZERO, |content| tree.sizes(content, hint).pref)
            .add_insets(insets);
        Sizes::new(min, pref, default_max_size(pref))
    }
}

impl Layout for ScrollLayout {
    fn layout(&self, tree: &mut WidgetTree, target: WidgetId) {
        let (h_bar_size, v_bar_size) = self.bar_sizes(tree);
        let behavior = self.behavior.get();
        let bounds = tree.local_inset_bounds(target);
        let mut visible = bounds.size();
        let content = self.viewport.content(tree);
        let pref = content.map_or(Size::ZERO, |content| tree.sizes(content, Size::new(NO_HINT, NO_HINT)).pref);

        let mut content_size = pref;
        if behavior.fills_width() {
            content_size.width = content_size.width.max(visible.width);
        }
        if behavior.fills_height() {
            content_size.height = content_size.height.max(visible.height);
        }

        let mut need_h = false;
        let mut need_v = false;
        if visible.width < content_size.width {
            visible.height -= h_bar_size.height;
            if behavior.fills_height() {
                content_size.height = pref.height.max(visible.height);
            }
            need_h = true;
        }
        if visible.height < content_size.height {
            visible.width -= v_bar_size.width;
            if behavior.fills_width() {
                content_size.width = pref.width.max(visible.width);
            }
            need_v = true;
        }
        // Room taken by the vertical bar may now force the horizontal one.
        if !need_h && visible.width < content_size.width {
            visible.height -= h_bar_size.height;
            if behavior.fills_height() {
                content_size.height = pref.height.max(visible.height);
            }
            need_h = true;
        }
        visible = Size::new(visible.width.max(0.0), visible.height.max(0.0));

        Self::attach(tree, target, self.viewport.h_bar, need_h);
        Self::attach(tree, target, self.viewport.v_bar, need_v);
        tree.set_bounds(self.viewport.view, Rect::from_origin_size(bounds.origin(), visible));
        if need_h {
            tree.set_bounds(
                self.viewport.h_bar,
                Rect::new(bounds.x, bounds.y + visible.height, visible.width, h_bar_size.height),
            );
        }
        if need_v {
            tree.set_bounds(
                self.viewport.v_bar,
                Rect::new(bounds.x + visible.width, bounds.y, v_bar_size.width, visible.height),
            );
        }
        if let Some(content) = content {
            tree.set_size(content, content_size);
        }
        self.viewport.clamp_position(tree);
    }
}
