//! Deterministic sizers and layouts for layout tests.

use std::cell::Cell;
use std::rc::Rc;
use trellis_core::geometry::Size;
use trellis_ui::graphics::{FontDesc, TextMeasurer};
use trellis_ui::layout::{DEFAULT_MAX, Layout, Sizer, Sizes};
use trellis_ui::tree::{WidgetId, WidgetTree};

/// Reports the same sizes regardless of hint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSizer(pub Sizes);

impl FixedSizer {
    /// Minimum zero, preferred `pref`, default maximum.
    pub fn pref(pref: Size) -> Self {
        Self(Sizes::with_default_max(Size::ZERO, pref))
    }

    pub fn new(min: Size, pref: Size, max: Size) -> Self {
        Self(Sizes::new(min, pref, max))
    }

    /// Min, pref and max all `size`.
    pub fn fixed(size: Size) -> Self {
        Self(Sizes::fixed(size))
    }

    /// Install on `id`, returning it for chaining.
    pub fn install(self, tree: &mut WidgetTree, id: WidgetId) -> WidgetId {
        tree.set_sizer(id, Some(Rc::new(self)));
        id
    }
}

impl Sizer for FixedSizer {
    fn sizes(&self, _tree: &WidgetTree, _target: WidgetId, _hint: Size) -> Sizes {
        self.0
    }
}

/// Content made of `count` items of `item` size that wrap into rows at the
/// width hint, like a paragraph of equal words.
///
/// Unhinted, all items sit on one row. The minimum is a single column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrappingSizer {
    pub item: Size,
    pub count: usize,
}

impl WrappingSizer {
    pub fn new(item: Size, count: usize) -> Self {
        Self { item, count }
    }

    /// Extent when wrapped to at most `width`.
    pub fn wrapped(&self, width: f32) -> Size {
        let count = self.count.max(1);
        let per_row = if width < 0.0 {
            count
        } else {
            ((width / self.item.width).floor() as usize).clamp(1, count)
        };
        let rows = count.div_ceil(per_row);
        Size::new(per_row as f32 * self.item.width, rows as f32 * self.item.height)
    }
}

impl Sizer for WrappingSizer {
    fn sizes(&self, _tree: &WidgetTree, _target: WidgetId, hint: Size) -> Sizes {
        let pref = self.wrapped(hint.width);
        let min = self.wrapped(0.0);
        Sizes::new(min, pref, Size::new(DEFAULT_MAX, DEFAULT_MAX))
    }
}

/// A layout that places nothing and counts how often it runs.
#[derive(Debug, Clone, Default)]
pub struct CountingLayout {
    runs: Rc<Cell<usize>>,
}

impl CountingLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared counter, readable after the layout is moved into a tree.
    pub fn counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.runs)
    }
}

impl Sizer for CountingLayout {
    fn sizes(&self, _tree: &WidgetTree, _target: WidgetId, _hint: Size) -> Sizes {
        Sizes::with_default_max(Size::ZERO, Size::ZERO)
    }
}

impl Layout for CountingLayout {
    fn layout(&self, _tree: &mut WidgetTree, _target: WidgetId) {
        self.runs.set(self.runs.get() + 1);
    }
}

/// Text measurement where every character is `advance` wide and lines are
/// `line_height` tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Monospace {
    pub advance: f32,
    pub line_height: f32,
}

impl Default for Monospace {
    fn default() -> Self {
        Self {
            advance: 10.0,
            line_height: 20.0,
        }
    }
}

impl TextMeasurer for Monospace {
    fn measure(&self, text: &str, _font: &FontDesc) -> Size {
        Size::new(text.chars().count() as f32 * self.advance, self.line_height)
    }

    fn line_height(&self, _font: &FontDesc) -> f32 {
        self.line_height
    }
}
