//! A scrollable viewport around a single content widget.

use super::scrollbar::{Orientation, ScrollBar};
use crate::event::{Event, EventType, KeyCode, KeyModifiers};
use crate::layout::{Layout, ScrollBehavior, ScrollLayout, ScrollViewport};
use crate::theme::Theme;
use crate::tree::{WidgetId, WidgetTree};
use std::rc::Rc;
use trellis_core::geometry::{Point, Rect};

/// An area widget holding a clipping viewport and a pair of scroll bars that
/// appear only when the content overflows.
///
/// Wheel events and the navigation keys (arrows, page up/down, home, end)
/// reaching the area from its content scroll it.
#[derive(Debug, Clone)]
pub struct ScrollArea {
    id: WidgetId,
    viewport: ScrollViewport,
    h_bar: ScrollBar,
    v_bar: ScrollBar,
    layout: Rc<ScrollLayout>,
    line_amount: f32,
}

impl ScrollArea {
    pub fn new(tree: &mut WidgetTree, behavior: ScrollBehavior, theme: &Theme) -> Self {
        let id = tree.create_named("scroll_area");
        let view = tree.create_named("scroll_view");
        tree.set_background(view, theme.content_background);
        tree.add_child(id, view);

        let line_amount = theme.scroll_line_amount;
        let h_bar = ScrollBar::new(tree, Orientation::Horizontal, &theme.scroll_bar, line_amount);
        let v_bar = ScrollBar::new(tree, Orientation::Vertical, &theme.scroll_bar, line_amount);
        let viewport = ScrollViewport {
            view,
            h_bar: h_bar.id(),
            v_bar: v_bar.id(),
        };
        h_bar.attach(viewport);
        v_bar.attach(viewport);

        let layout = Rc::new(ScrollLayout::new(viewport, behavior));
        tree.set_layout_rc(id, Some(layout.clone() as Rc<dyn Layout>));

        let area = Self {
            id,
            viewport,
            h_bar,
            v_bar,
            layout,
            line_amount,
        };
        area.install_handlers(tree);
        area
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn view(&self) -> WidgetId {
        self.viewport.view
    }

    pub fn viewport(&self) -> ScrollViewport {
        self.viewport
    }

    pub fn h_bar(&self) -> &ScrollBar {
        &self.h_bar
    }

    pub fn v_bar(&self) -> &ScrollBar {
        &self.v_bar
    }

    pub fn behavior(&self) -> ScrollBehavior {
        self.layout.behavior()
    }

    pub fn set_behavior(&self, tree: &mut WidgetTree, behavior: ScrollBehavior) {
        if self.layout.behavior() != behavior {
            self.layout.set_behavior(behavior);
            tree.set_needs_layout(self.id, true);
            tree.repaint(self.id);
        }
    }

    pub fn content(&self, tree: &WidgetTree) -> Option<WidgetId> {
        self.viewport.content(tree)
    }

    /// Replace the content widget. The scroll position resets to the origin.
    pub fn set_content(&self, tree: &mut WidgetTree, content: Option<WidgetId>) {
        if let Some(old) = self.content(tree) {
            if Some(old) == content {
                return;
            }
            tree.remove_child(self.viewport.view, old);
        }
        if let Some(content) = content {
            tree.add_child(self.viewport.view, content);
            tree.set_location(content, Point::ZERO);
        }
        tree.set_needs_layout(self.id, true);
        tree.repaint(self.id);
    }

    pub fn scrolled_position(&self, tree: &WidgetTree) -> Point {
        self.viewport.scrolled_position(tree)
    }

    /// Scroll so `position` of the content is at the viewport's top-left,
    /// clamped to `[0, content - visible]` on each axis.
    pub fn set_scrolled_position(&self, tree: &mut WidgetTree, position: Point) {
        self.viewport.set_scrolled_position(tree, position);
    }

    /// Scroll just enough to reveal `rect`, given in content coordinates.
    pub fn scroll_into_view(&self, tree: &mut WidgetTree, rect: Rect) {
        self.viewport.scroll_into_view(tree, rect);
    }

    fn mouse_wheel(&self, tree: &mut WidgetTree, event: &mut Event<'_>) {
        let Some(delta) = event.wheel_delta() else {
            return;
        };
        let position = self.scrolled_position(tree);
        self.set_scrolled_position(
            tree,
            Point::new(
                position.x - delta.x * self.line_amount,
                position.y - delta.y * self.line_amount,
            ),
        );
        event.finish();
    }

    fn key_down(&self, tree: &mut WidgetTree, event: &mut Event<'_>) {
        let Some(key) = event.key_data().copied() else {
            return;
        };
        if !key.modifiers.only(KeyModifiers::empty()) {
            return;
        }
        let position = self.scrolled_position(tree);
        let visible = self.viewport.visible_size(tree);
        let max = self.viewport.max_position(tree);
        let line = self.line_amount;
        let target = match key.code {
            KeyCode::UP => Point::new(position.x, position.y - line),
            KeyCode::DOWN => Point::new(position.x, position.y + line),
            KeyCode::LEFT => Point::new(position.x - line, position.y),
            KeyCode::RIGHT => Point::new(position.x + line, position.y),
            KeyCode::PAGE_UP => Point::new(position.x, position.y - visible.height),
            KeyCode::PAGE_DOWN => Point::new(position.x, position.y + visible.height),
            KeyCode::HOME => Point::new(position.x, 0.0),
            KeyCode::END => Point::new(position.x, max.y),
            _ => return,
        };
        self.set_scrolled_position(tree, target);
        event.finish();
    }

    fn install_handlers(&self, tree: &mut WidgetTree) {
        let area = self.clone();
        tree.add_handler(self.id, EventType::MouseWheel, move |tree, event| {
            area.mouse_wheel(tree, event)
        });
        let area = self.clone();
        tree.add_handler(self.id, EventType::KeyDown, move |tree, event| area.key_down(tree, event));
        let viewport = self.viewport;
        tree.add_handler(self.viewport.view, EventType::Resized, move |tree, _| {
            viewport.clamp_position(tree)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Sizer, Sizes};
    use trellis_core::geometry::Size;

    struct FixedSize(Size);

    impl Sizer for FixedSize {
        fn sizes(&self, _tree: &WidgetTree, _target: WidgetId, _hint: Size) -> Sizes {
            Sizes::fixed(self.0)
        }
    }

    fn area_with_content(content_size: Size) -> (WidgetTree, ScrollArea, WidgetId) {
        let mut tree = WidgetTree::new();
        let area = ScrollArea::new(&mut tree, ScrollBehavior::Unmodified, &Theme::default());
        let content = tree.create();
        tree.set_sizer(content, Some(Rc::new(FixedSize(content_size))));
        area.set_content(&mut tree, Some(content));
        tree.set_bounds(area.id(), Rect::new(0.0, 0.0, 200.0, 100.0));
        tree.validate_layout(area.id());
        (tree, area, content)
    }

    #[test]
    fn bars_follow_overflow() {
        let (tree, area, _) = area_with_content(Size::new(150.0, 300.0));
        assert_eq!(tree.parent(area.v_bar().id()), Some(area.id()));
        assert_eq!(tree.parent(area.h_bar().id()), None);
        assert_eq!(tree.size(area.view()), Size::new(184.0, 100.0));
    }

    #[test]
    fn wheel_scrolls_by_line_amount() {
        let (mut tree, area, content) = area_with_content(Size::new(150.0, 300.0));
        tree.dispatch(&mut Event::mouse_wheel(
            content,
            Point::ZERO,
            Point::new(0.0, -2.0),
            KeyModifiers::empty(),
        ));
        assert_eq!(area.scrolled_position(&tree), Point::new(0.0, 32.0));
    }

    #[test]
    fn end_key_scrolls_to_bottom() {
        let (mut tree, area, content) = area_with_content(Size::new(150.0, 300.0));
        let data = crate::event::KeyData {
            code: KeyCode::END,
            ch: None,
            modifiers: KeyModifiers::empty(),
            repeat: false,
        };
        tree.dispatch(&mut Event::key(EventType::KeyDown, content, data));
        assert_eq!(area.scrolled_position(&tree), Point::new(0.0, 200.0));
    }

    #[test]
    fn growing_the_view_reclamps() {
        let (mut tree, area, _) = area_with_content(Size::new(150.0, 300.0));
        area.set_scrolled_position(&mut tree, Point::new(0.0, 200.0));
        tree.set_bounds(area.id(), Rect::new(0.0, 0.0, 200.0, 250.0));
        tree.validate_layout(area.id());
        assert_eq!(area.scrolled_position(&tree), Point::new(0.0, 50.0));
    }
}
