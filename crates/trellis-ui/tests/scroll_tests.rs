//! Scroll areas: bar visibility, content sizing, and scroll bar interaction
//! through a window.

use std::rc::Rc;
use std::time::Duration;
use trellis_core::geometry::{Point, Rect, Size};
use trellis_test_utils::{FixedSizer, MockBackend};
use trellis_ui::widgets::ScrollBarPart;
use trellis_ui::{KeyModifiers, MouseEventKind, ScrollArea, ScrollBehavior, Theme, Window, WindowStyle, WidgetTree};

const AREA: Size = Size::new(200.0, 100.0);

fn area_with_content(behavior: ScrollBehavior, content_size: Size) -> (WidgetTree, ScrollArea) {
    let mut tree = WidgetTree::new();
    let area = ScrollArea::new(&mut tree, behavior, &Theme::default());
    let content = tree.create_named("content");
    FixedSizer::fixed(content_size).install(&mut tree, content);
    area.set_content(&mut tree, Some(content));
    tree.set_bounds(area.id(), Rect::from_size(AREA));
    tree.validate_layout(area.id());
    (tree, area)
}

fn bars_shown(tree: &WidgetTree, area: &ScrollArea) -> (bool, bool) {
    (
        tree.parent(area.h_bar().id()) == Some(area.id()),
        tree.parent(area.v_bar().id()) == Some(area.id()),
    )
}

#[test]
fn test_bars_appear_exactly_when_content_overflows() {
    let thickness = Theme::default().scroll_bar.size;
    for width in (0..=240).step_by(4) {
        for height in (0..=160).step_by(4) {
            let content_size = Size::new(width as f32, height as f32);
            let (tree, area) = area_with_content(ScrollBehavior::Unmodified, content_size);
            let (need_h, need_v) = bars_shown(&tree, &area);
            let visible = tree.size(area.view());

            assert_eq!(need_h, content_size.width > visible.width, "horizontal bar for {content_size}");
            assert_eq!(need_v, content_size.height > visible.height, "vertical bar for {content_size}");

            let used_width = visible.width + if need_v { thickness } else { 0.0 };
            let used_height = visible.height + if need_h { thickness } else { 0.0 };
            assert_eq!(Size::new(used_width, used_height), AREA, "viewport for {content_size}");
        }
    }
}

#[test]
fn test_fill_stretches_small_content() {
    let (tree, area) = area_with_content(ScrollBehavior::Fill, Size::new(50.0, 50.0));
    let content = area.content(&tree).unwrap();
    assert_eq!(tree.size(content), AREA);
    assert_eq!(bars_shown(&tree, &area), (false, false));
}

#[test]
fn test_fill_width_tracks_viewport_beside_vertical_bar() {
    let (tree, area) = area_with_content(ScrollBehavior::FillWidth, Size::new(50.0, 300.0));
    let content = area.content(&tree).unwrap();
    assert_eq!(bars_shown(&tree, &area), (false, true));
    assert_eq!(tree.size(content), Size::new(184.0, 300.0));
}

#[test]
fn test_fill_height_keeps_preferred_width() {
    let (tree, area) = area_with_content(ScrollBehavior::FillHeight, Size::new(50.0, 50.0));
    let content = area.content(&tree).unwrap();
    assert_eq!(tree.size(content), Size::new(50.0, 100.0));
}

#[test]
fn test_scroll_position_is_clamped() {
    let (mut tree, area) = area_with_content(ScrollBehavior::Unmodified, Size::new(400.0, 300.0));
    area.set_scrolled_position(&mut tree, Point::new(-50.0, 10_000.0));
    let max_y = 300.0 - tree.size(area.view()).height;
    assert_eq!(area.scrolled_position(&tree), Point::new(0.0, max_y));
}

#[test]
fn test_scroll_into_view_moves_minimally() {
    let (mut tree, area) = area_with_content(ScrollBehavior::Unmodified, Size::new(150.0, 300.0));
    area.scroll_into_view(&mut tree, Rect::new(0.0, 150.0, 10.0, 20.0));
    assert_eq!(area.scrolled_position(&tree), Point::new(0.0, 70.0));

    // Already visible: nothing moves.
    area.scroll_into_view(&mut tree, Rect::new(0.0, 100.0, 10.0, 20.0));
    assert_eq!(area.scrolled_position(&tree), Point::new(0.0, 70.0));

    area.scroll_into_view(&mut tree, Rect::new(0.0, 20.0, 10.0, 20.0));
    assert_eq!(area.scrolled_position(&tree), Point::new(0.0, 20.0));
}

/// A window whose root holds a scroll area filling the content area.
fn windowed_area(content_size: Size) -> (Window, ScrollArea, Rc<MockBackend>) {
    let backend = Rc::new(MockBackend::new(Rect::from_size(AREA)));
    let theme = Theme::default();
    let mut window = Window::with_backend(backend.clone(), WindowStyle::STANDARD, &theme);
    let root = window.root();
    let tree = window.tree_mut();
    let area = ScrollArea::new(tree, ScrollBehavior::Unmodified, &theme);
    let content = tree.create_named("content");
    FixedSizer::fixed(content_size).install(tree, content);
    area.set_content(tree, Some(content));
    tree.add_child(root, area.id());
    tree.set_bounds(area.id(), Rect::from_size(AREA));
    tree.validate_layout(root);
    (window, area, backend)
}

#[test]
fn test_held_line_button_repeats_until_release() {
    let (mut window, area, backend) = windowed_area(Size::new(150.0, 300.0));
    let bar = area.v_bar().clone();
    assert_eq!(window.tree().bounds(bar.id()), Rect::new(184.0, 0.0, 16.0, 100.0));

    let on_down_button = Point::new(190.0, 95.0);
    window.mouse(MouseEventKind::Down, KeyModifiers::empty(), on_down_button, 0, 1);
    assert_eq!(bar.pressed_part(), Some(ScrollBarPart::LineDown));
    assert_eq!(bar.position(window.tree()), 16.0);
    assert_eq!(backend.pending_delays(), vec![Theme::default().scroll_bar.initial_repeat_delay]);

    assert_eq!(backend.run_pending(window.tree_mut()), 1);
    assert_eq!(bar.position(window.tree()), 32.0);
    assert_eq!(backend.pending_delays(), vec![Duration::from_millis(75)]);

    window.mouse(MouseEventKind::Up, KeyModifiers::empty(), on_down_button, 0, 1);
    assert_eq!(bar.pressed_part(), None);
    // The queued repeat is stale and does nothing.
    assert_eq!(backend.run_pending(window.tree_mut()), 1);
    assert_eq!(bar.position(window.tree()), 32.0);
    assert_eq!(backend.pending_tasks(), 0);
}

#[test]
fn test_track_click_pages_by_visible_extent() {
    let (mut window, area, backend) = windowed_area(Size::new(150.0, 300.0));
    let bar = area.v_bar().clone();
    // Below the thumb, above the down button.
    let on_track = Point::new(190.0, 70.0);
    assert_eq!(
        bar.part_at(window.tree(), Point::new(6.0, 70.0)),
        Some(ScrollBarPart::PageDown)
    );

    window.mouse(MouseEventKind::Down, KeyModifiers::empty(), on_track, 0, 1);
    assert_eq!(bar.position(window.tree()), 100.0);
    window.mouse(MouseEventKind::Up, KeyModifiers::empty(), on_track, 0, 1);
    backend.discard_pending();
}

#[test]
fn test_dragging_thumb_scrolls_proportionally() {
    let (mut window, area, backend) = windowed_area(Size::new(150.0, 300.0));
    let bar = area.v_bar().clone();
    // Thumb spans 16..(16 + 68 / 3) at the top of the track.
    let grab = Point::new(190.0, 20.0);
    window.mouse(MouseEventKind::Down, KeyModifiers::empty(), grab, 0, 1);
    assert_eq!(bar.pressed_part(), Some(ScrollBarPart::Thumb));
    assert_eq!(backend.pending_tasks(), 0);

    let travel = 68.0 - 68.0 / 3.0;
    // Dragging outside the bar still reaches it through capture.
    window.mouse(
        MouseEventKind::Dragged,
        KeyModifiers::empty(),
        Point::new(20.0, 20.0 + travel / 2.0),
        0,
        1,
    );
    assert!((bar.position(window.tree()) - 100.0).abs() < 0.01);

    window.mouse(
        MouseEventKind::Dragged,
        KeyModifiers::empty(),
        Point::new(190.0, 500.0),
        0,
        1,
    );
    assert_eq!(bar.position(window.tree()), 200.0);
    window.mouse(MouseEventKind::Up, KeyModifiers::empty(), grab, 0, 1);
    assert_eq!(bar.pressed_part(), None);
}

#[test]
fn test_wheel_over_content_scrolls_area() {
    let (mut window, area, _) = windowed_area(Size::new(150.0, 300.0));
    window.mouse_wheel(KeyModifiers::empty(), Point::new(50.0, 50.0), Point::new(0.0, -3.0));
    assert_eq!(area.scrolled_position(window.tree()), Point::new(0.0, 48.0));
}
