//! Flow layout: row packing, wrapping, shrinking and vertical centering.

use trellis_core::geometry::{Rect, Size};
use trellis_test_utils::FixedSizer;
use trellis_ui::layout::NO_HINT;
use trellis_ui::{FlowLayout, Theme, WidgetId, WidgetTree};

fn flow_panel(tree: &mut WidgetTree, layout: FlowLayout) -> WidgetId {
    let panel = tree.create_named("flow");
    tree.set_layout(panel, layout);
    panel
}

fn add(tree: &mut WidgetTree, panel: WidgetId, sizer: FixedSizer) -> WidgetId {
    let id = tree.create();
    sizer.install(tree, id);
    tree.add_child(panel, id);
    id
}

fn lay_out(tree: &mut WidgetTree, panel: WidgetId, size: Size) {
    tree.set_bounds(panel, Rect::from_size(size));
    tree.validate_layout(panel);
}

#[test]
fn test_children_wrap_onto_new_rows() {
    let mut tree = WidgetTree::new();
    let panel = flow_panel(&mut tree, FlowLayout::new().gaps(5.0, 5.0));
    let ids: Vec<WidgetId> = (0..3)
        .map(|_| add(&mut tree, panel, FixedSizer::fixed(Size::new(40.0, 20.0))))
        .collect();

    lay_out(&mut tree, panel, Size::new(100.0, 100.0));
    assert_eq!(tree.bounds(ids[0]), Rect::new(0.0, 0.0, 40.0, 20.0));
    assert_eq!(tree.bounds(ids[1]), Rect::new(45.0, 0.0, 40.0, 20.0));
    assert_eq!(tree.bounds(ids[2]), Rect::new(0.0, 25.0, 40.0, 20.0));
}

#[test]
fn test_unhinted_sizes_keep_one_row() {
    let mut tree = WidgetTree::new();
    let panel = flow_panel(&mut tree, FlowLayout::new().gaps(5.0, 5.0));
    for _ in 0..3 {
        add(&mut tree, panel, FixedSizer::fixed(Size::new(40.0, 20.0)));
    }

    let sizes = tree.sizes(panel, Size::new(NO_HINT, NO_HINT));
    assert_eq!(sizes.pref, Size::new(130.0, 20.0));
    assert_eq!(sizes.min, Size::new(40.0, 20.0));
}

#[test]
fn test_width_hint_wraps_preferred_size() {
    let mut tree = WidgetTree::new();
    let panel = flow_panel(&mut tree, FlowLayout::new().gaps(5.0, 5.0));
    for _ in 0..3 {
        add(&mut tree, panel, FixedSizer::fixed(Size::new(40.0, 20.0)));
    }

    let sizes = tree.sizes(panel, Size::new(100.0, NO_HINT));
    assert_eq!(sizes.pref, Size::new(85.0, 45.0));
}

#[test]
fn test_shrinkable_child_fills_rest_of_row() {
    let mut tree = WidgetTree::new();
    let panel = flow_panel(&mut tree, FlowLayout::new().gaps(5.0, 5.0));
    let fixed = add(&mut tree, panel, FixedSizer::fixed(Size::new(40.0, 20.0)));
    let flexible = add(&mut tree, panel, FixedSizer::pref(Size::new(90.0, 20.0)));

    lay_out(&mut tree, panel, Size::new(100.0, 100.0));
    assert_eq!(tree.bounds(fixed), Rect::new(0.0, 0.0, 40.0, 20.0));
    assert_eq!(tree.bounds(flexible), Rect::new(45.0, 0.0, 55.0, 20.0));
}

#[test]
fn test_too_wide_child_is_shrunk_to_row_width() {
    let mut tree = WidgetTree::new();
    let panel = flow_panel(&mut tree, FlowLayout::new());
    let wide = add(
        &mut tree,
        panel,
        FixedSizer::new(Size::new(30.0, 10.0), Size::new(200.0, 10.0), Size::new(1000.0, 10.0)),
    );
    let after = add(&mut tree, panel, FixedSizer::fixed(Size::new(10.0, 10.0)));

    lay_out(&mut tree, panel, Size::new(100.0, 100.0));
    assert_eq!(tree.bounds(wide), Rect::new(0.0, 0.0, 100.0, 10.0));
    // The full row forces the next child down.
    assert_eq!(tree.bounds(after), Rect::new(0.0, 12.0, 10.0, 10.0));
}

#[test]
fn test_child_never_shrinks_below_minimum() {
    let mut tree = WidgetTree::new();
    let panel = flow_panel(&mut tree, FlowLayout::new());
    let stubborn = add(
        &mut tree,
        panel,
        FixedSizer::new(Size::new(150.0, 10.0), Size::new(200.0, 10.0), Size::new(1000.0, 10.0)),
    );

    lay_out(&mut tree, panel, Size::new(100.0, 100.0));
    assert_eq!(tree.bounds(stubborn), Rect::new(0.0, 0.0, 150.0, 10.0));
}

#[test]
fn test_vertical_centering_within_row() {
    let mut tree = WidgetTree::new();
    let panel = flow_panel(&mut tree, FlowLayout::new().vertically_centered(true));
    let short = add(&mut tree, panel, FixedSizer::fixed(Size::new(20.0, 10.0)));
    let tall = add(&mut tree, panel, FixedSizer::fixed(Size::new(20.0, 30.0)));

    lay_out(&mut tree, panel, Size::new(100.0, 100.0));
    assert_eq!(tree.bounds(short), Rect::new(0.0, 10.0, 20.0, 10.0));
    assert_eq!(tree.bounds(tall), Rect::new(22.0, 0.0, 20.0, 30.0));
}

#[test]
fn test_negative_gaps_are_clamped() {
    let layout = FlowLayout::new().gaps(-3.0, -1.0);
    assert_eq!(layout.h_gap(), 0.0);
    assert_eq!(layout.v_gap(), 0.0);

    let themed = FlowLayout::themed(&Theme::default());
    assert_eq!(themed.h_gap(), Theme::default().flow.h_gap);
}
