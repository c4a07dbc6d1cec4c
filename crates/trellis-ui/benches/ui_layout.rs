//! Benchmarks for layout computation

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use trellis_core::geometry::{Rect, Size};
use trellis_test_utils::{FixedSizer, WrappingSizer};
use trellis_ui::layout::NO_HINT;
use trellis_ui::{FlowLayout, PrecisionData, PrecisionLayout, ScrollArea, ScrollBehavior, Theme, WidgetId, WidgetTree};

fn precision_form(rows: usize) -> (WidgetTree, WidgetId) {
    let mut tree = WidgetTree::new();
    let panel = tree.create_named("form");
    tree.set_layout(panel, PrecisionLayout::new().columns(2));
    for _ in 0..rows {
        let label = tree.create();
        FixedSizer::pref(Size::new(80.0, 18.0)).install(&mut tree, label);
        tree.set_layout_data(label, PrecisionData::new());
        tree.add_child(panel, label);

        let field = tree.create();
        tree.set_sizer(field, Some(std::rc::Rc::new(WrappingSizer::new(Size::new(12.0, 18.0), 20))));
        tree.set_layout_data(field, PrecisionData::new().fill_horizontal());
        tree.add_child(panel, field);
    }
    (tree, panel)
}

fn bench_precision_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("precision_layout");

    for rows in [10, 50, 200] {
        group.throughput(Throughput::Elements(rows as u64 * 2));

        group.bench_with_input(BenchmarkId::new("pref", rows), &rows, |b, &rows| {
            let (tree, panel) = precision_form(rows);
            b.iter(|| black_box(tree.sizes(panel, Size::new(NO_HINT, NO_HINT))));
        });

        group.bench_with_input(BenchmarkId::new("layout", rows), &rows, |b, &rows| {
            let (mut tree, panel) = precision_form(rows);
            let mut width = 200.0;
            b.iter(|| {
                // Alternate widths so every pass invalidates the layout.
                width = if width == 200.0 { 320.0 } else { 200.0 };
                tree.set_bounds(panel, Rect::new(0.0, 0.0, width, 5000.0));
                tree.validate_layout(panel);
                black_box(tree.bounds(panel))
            });
        });
    }

    group.finish();
}

fn bench_flow_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("flow_layout");

    for count in [20, 100, 500] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut tree = WidgetTree::new();
            let panel = tree.create();
            tree.set_layout(panel, FlowLayout::new());
            for i in 0..count {
                let child = tree.create();
                let width = 20.0 + (i % 7) as f32 * 10.0;
                FixedSizer::pref(Size::new(width, 16.0)).install(&mut tree, child);
                tree.add_child(panel, child);
            }
            let mut width = 400.0;
            b.iter(|| {
                width = if width == 400.0 { 640.0 } else { 400.0 };
                tree.set_bounds(panel, Rect::new(0.0, 0.0, width, 2000.0));
                tree.validate_layout(panel);
                black_box(tree.bounds(panel))
            });
        });
    }

    group.finish();
}

fn bench_scroll_area(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_area");

    group.bench_function("resize_with_form_content", |b| {
        let (mut tree, form) = precision_form(100);
        let area = ScrollArea::new(&mut tree, ScrollBehavior::FillWidth, &Theme::default());
        area.set_content(&mut tree, Some(form));
        let mut height = 300.0;
        b.iter(|| {
            height = if height == 300.0 { 600.0 } else { 300.0 };
            tree.set_bounds(area.id(), Rect::new(0.0, 0.0, 400.0, height));
            tree.validate_layout(area.id());
            black_box(area.scrolled_position(&tree))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_precision_layout, bench_flow_layout, bench_scroll_area);
criterion_main!(benches);
