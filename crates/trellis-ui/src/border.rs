//! Widget borders.

use crate::graphics::Graphics;
use std::rc::Rc;
use trellis_core::Color;
use trellis_core::geometry::{Insets, Rect};

/// Decoration drawn around a widget's content. The insets shrink the area
/// available to the widget's layout.
pub trait Border {
    fn insets(&self) -> Insets;

    /// Paint the border within `bounds` (the widget's local bounds).
    fn paint(&self, gc: &mut dyn Graphics, bounds: Rect);
}

/// Reserves space without drawing anything.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EmptyBorder {
    pub insets: Insets,
}

impl EmptyBorder {
    pub fn new(insets: Insets) -> Self {
        Self { insets }
    }
}

impl Border for EmptyBorder {
    fn insets(&self) -> Insets {
        self.insets
    }

    fn paint(&self, _gc: &mut dyn Graphics, _bounds: Rect) {}
}

/// Solid edges whose thickness matches the insets on each side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineBorder {
    pub color: Color,
    pub insets: Insets,
}

impl LineBorder {
    pub fn new(color: Color, insets: Insets) -> Self {
        Self { color, insets }
    }

    pub fn uniform(color: Color, thickness: f32) -> Self {
        Self::new(color, Insets::uniform(thickness))
    }
}

impl Border for LineBorder {
    fn insets(&self) -> Insets {
        self.insets
    }

    fn paint(&self, gc: &mut dyn Graphics, bounds: Rect) {
        let Insets { top, left, bottom, right } = self.insets;
        gc.set_fill_color(self.color);
        if top > 0.0 {
            gc.fill_rect(Rect::new(bounds.x, bounds.y, bounds.width, top));
        }
        if bottom > 0.0 {
            gc.fill_rect(Rect::new(bounds.x, bounds.bottom() - bottom, bounds.width, bottom));
        }
        let side_height = bounds.height - (top + bottom);
        if side_height > 0.0 {
            if left > 0.0 {
                gc.fill_rect(Rect::new(bounds.x, bounds.y + top, left, side_height));
            }
            if right > 0.0 {
                gc.fill_rect(Rect::new(bounds.right() - right, bounds.y + top, right, side_height));
            }
        }
    }
}

/// Nests borders from the outside in; each one paints inside the insets of
/// those before it.
#[derive(Clone, Default)]
pub struct CompoundBorder {
    borders: Vec<Rc<dyn Border>>,
}

impl CompoundBorder {
    pub fn new(borders: Vec<Rc<dyn Border>>) -> Self {
        Self { borders }
    }
}

impl Border for CompoundBorder {
    fn insets(&self) -> Insets {
        self.borders
            .iter()
            .fold(Insets::ZERO, |total, border| total + border.insets())
    }

    fn paint(&self, gc: &mut dyn Graphics, bounds: Rect) {
        let mut remaining = bounds;
        for border in &self.borders {
            gc.save();
            border.paint(gc, remaining);
            gc.restore();
            remaining = remaining.inset(border.insets());
        }
    }
}
