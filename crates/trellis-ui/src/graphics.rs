//! Drawing and text-measurement capabilities supplied by the backend.
//!
//! Widgets never talk to a rasterizer directly. Painting goes through the
//! [`Graphics`] handed out with each Paint event, and text layout goes
//! through a [`TextMeasurer`].

use trellis_core::Color;
use trellis_core::geometry::{Point, Rect, Size};

/// Opaque handle to an image owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub u64);

/// One segment of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { control: Point, to: Point },
    CubicTo { control1: Point, control2: Point, to: Point },
    Close,
}

/// A vector outline built from move/line/curve segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.elements.push(PathElement::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.elements.push(PathElement::LineTo(Point::new(x, y)));
        self
    }

    pub fn quad_to(mut self, control: Point, to: Point) -> Self {
        self.elements.push(PathElement::QuadTo { control, to });
        self
    }

    pub fn cubic_to(mut self, control1: Point, control2: Point, to: Point) -> Self {
        self.elements.push(PathElement::CubicTo { control1, control2, to });
        self
    }

    pub fn close(mut self) -> Self {
        self.elements.push(PathElement::Close);
        self
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// A color stop at `position` in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub position: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    /// A two-stop gradient from `start` to `end`.
    pub fn between(start: Color, end: Color) -> Self {
        Self {
            stops: vec![
                GradientStop { position: 0.0, color: start },
                GradientStop { position: 1.0, color: end },
            ],
        }
    }
}

/// Font selection passed to a [`TextMeasurer`] and to [`Graphics::draw_text`].
#[derive(Debug, Clone, PartialEq)]
pub struct FontDesc {
    pub family: String,
    pub size: f32,
    pub bold: bool,
}

impl FontDesc {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
        }
    }
}

impl Default for FontDesc {
    fn default() -> Self {
        FontDesc::new("sans-serif", 13.0)
    }
}

/// Immediate-mode drawing surface.
///
/// Every `save` must be matched by a `restore`; state (clip, transform,
/// colors, stroke width) is restored to what it was at the matching `save`.
pub trait Graphics {
    fn save(&mut self);
    fn restore(&mut self);

    /// Intersect the clip region with `rect`.
    fn clip_rect(&mut self, rect: Rect);
    fn clip_path(&mut self, path: &Path);

    fn translate(&mut self, dx: f32, dy: f32);

    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_stroke_width(&mut self, width: f32);

    fn fill_rect(&mut self, rect: Rect);
    fn stroke_rect(&mut self, rect: Rect);
    fn stroke_line(&mut self, from: Point, to: Point);
    fn fill_ellipse(&mut self, bounds: Rect);
    fn stroke_ellipse(&mut self, bounds: Rect);
    fn fill_path(&mut self, path: &Path);
    fn stroke_path(&mut self, path: &Path);

    /// Fill `rect` with a gradient running from `start` to `end`.
    fn fill_linear_gradient(&mut self, rect: Rect, gradient: &Gradient, start: Point, end: Point);

    /// Draw a single line of text with its top-left corner at `origin`.
    fn draw_text(&mut self, origin: Point, text: &str, font: &FontDesc);

    fn draw_image(&mut self, image: ImageId, bounds: Rect);
}

/// Font metrics and text measurement.
pub trait TextMeasurer {
    /// The extent of `text` laid out on a single line.
    fn measure(&self, text: &str, font: &FontDesc) -> Size;

    /// Distance between consecutive baselines.
    fn line_height(&self, font: &FontDesc) -> f32;
}
