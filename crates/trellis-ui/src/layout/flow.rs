//! Left-to-right wrapping layout.

use super::{Layout, NO_HINT, Sizer, Sizes, default_max_size, hinted};
use crate::theme::Theme;
use crate::tree::{WidgetId, WidgetTree};
use trellis_core::geometry::{Insets, Point, Rect, Size};

/// Places children at their preferred size in rows, starting a new row when
/// the current one runs out of width.
///
/// A child wider than the remaining row is shrunk to fit if its minimum
/// allows; otherwise it moves to a fresh row, where it is shrunk to the row
/// width or, failing that, to its minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowLayout {
    h_gap: f32,
    v_gap: f32,
    v_center: bool,
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowLayout {
    pub fn new() -> Self {
        Self {
            h_gap: 2.0,
            v_gap: 2.0,
            v_center: false,
        }
    }

    pub fn themed(theme: &Theme) -> Self {
        Self::new().gaps(theme.flow.h_gap, theme.flow.v_gap)
    }

    /// Gaps between children on a row and between rows. Negative values
    /// are treated as zero.
    pub fn gaps(mut self, horizontal: f32, vertical: f32) -> Self {
        self.h_gap = horizontal.max(0.0);
        self.v_gap = vertical.max(0.0);
        self
    }

    /// Center shorter children vertically within their row.
    pub fn vertically_centered(mut self, center: bool) -> Self {
        self.v_center = center;
        self
    }

    pub fn h_gap(&self) -> f32 {
        self.h_gap
    }

    pub fn v_gap(&self) -> f32 {
        self.v_gap
    }

    fn pack(&self, tree: &WidgetTree, target: WidgetId, size: Size, insets: Insets) -> Packing {
        let unhinted = Size::new(NO_HINT, NO_HINT);
        let width = size.width - insets.width();
        let mut origin = Point::new(insets.left, insets.top);
        let mut available = Size::new(width, size.height - insets.height());
        let mut row_height = 0.0f32;
        let mut packing = Packing {
            rects: Vec::new(),
            rows: Vec::new(),
            extent: Size::new(insets.left, insets.top),
            largest_min: Size::ZERO,
        };
        let mut row_start = 0;

        for (index, &child) in tree.children(target).iter().enumerate() {
            let sizes = tree.sizes(child, unhinted);
            packing.largest_min = packing.largest_min.max(sizes.min);
            let mut pref = sizes.pref;
            if pref.width > available.width {
                if sizes.min.width <= available.width {
                    pref.width = available.width;
                } else if origin.x == insets.left {
                    pref.width = sizes.min.width;
                } else {
                    origin.x = insets.left;
                    origin.y += row_height + self.v_gap;
                    available = Size::new(width, available.height - (row_height + self.v_gap));
                    row_height = 0.0;
                    if index > row_start {
                        packing.rows.push((row_start, index));
                        row_start = index;
                    }
                    if pref.width > available.width {
                        pref.width = if sizes.min.width <= available.width {
                            available.width
                        } else {
                            sizes.min.width
                        };
                    }
                }
                let chosen_width = pref.width;
                let resized = tree.sizes(child, Size::new(chosen_width, NO_HINT));
                pref = Size::new(chosen_width, resized.pref.height);
                if pref.height > available.height {
                    pref.height = if resized.min.height <= available.height {
                        available.height
                    } else {
                        resized.min.height
                    };
                }
            }
            packing.rects.push(Rect::from_origin_size(origin, pref));
            packing.extent = packing
                .extent
                .max(Size::new(origin.x + pref.width, origin.y + pref.height));
            row_height = row_height.max(pref.height);
            available.width -= pref.width + self.h_gap;
            if available.width <= 0.0 {
                origin.x = insets.left;
                origin.y += row_height + self.v_gap;
                available = Size::new(width, available.height - (row_height + self.v_gap));
                row_height = 0.0;
                packing.rows.push((row_start, index + 1));
                row_start = index + 1;
            } else {
                origin.x += pref.width + self.h_gap;
            }
        }
        if row_start < packing.rects.len() {
            packing.rows.push((row_start, packing.rects.len()));
        }
        packing
    }
}

struct Packing {
    rects: Vec<Rect>,
    /// Half-open index ranges of the children on each row.
    rows: Vec<(usize, usize)>,
    extent: Size,
    largest_min: Size,
}

impl Sizer for FlowLayout {
    fn sizes(&self, tree: &WidgetTree, target: WidgetId, hint: Size) -> Sizes {
        let insets = tree.insets(target);
        let size = Size::new(
            if hinted(hint.width) { hint.width } else { f32::MAX },
            if hinted(hint.height) { hint.height } else { f32::MAX },
        );
        let packing = self.pack(tree, target, size, insets);
        let pref = Size::new(packing.extent.width + insets.right, packing.extent.height + insets.bottom);
        let min = packing.largest_min.add_insets(insets);
        Sizes::new(min, pref, default_max_size(pref))
    }
}

impl Layout for FlowLayout {
    fn layout(&self, tree: &mut WidgetTree, target: WidgetId) {
        let insets = tree.insets(target);
        let packing = self.pack(tree, target, tree.size(target), insets);
        let children = tree.children(target).to_vec();
        let mut rects = packing.rects;
        if self.v_center {
            for &(start, end) in &packing.rows {
                let row_height = rects[start..end].iter().fold(0.0f32, |max, rect| max.max(rect.height));
                for rect in &mut rects[start..end] {
                    rect.y += (row_height - rect.height) / 2.0;
                }
            }
        }
        for (child, rect) in children.into_iter().zip(rects) {
            tree.set_bounds(child, rect);
        }
    }
}
