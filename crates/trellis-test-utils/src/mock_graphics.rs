//! A graphics context that records draw calls instead of rasterizing.

use trellis_core::Color;
use trellis_core::geometry::{Point, Rect};
use trellis_ui::graphics::{FontDesc, Gradient, Graphics, ImageId, Path};

/// Records a [`Graphics`] call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphicsCall {
    Save,
    Restore,
    ClipRect(Rect),
    ClipPath(Path),
    Translate { dx: f32, dy: f32 },
    FillColor(Color),
    StrokeColor(Color),
    StrokeWidth(f32),
    FillRect(Rect),
    StrokeRect(Rect),
    StrokeLine { from: Point, to: Point },
    FillEllipse(Rect),
    StrokeEllipse(Rect),
    FillPath(Path),
    StrokePath(Path),
    FillGradient { rect: Rect, gradient: Gradient },
    Text { origin: Point, text: String, font: FontDesc },
    Image { image: ImageId, bounds: Rect },
}

/// Records every call, and tracks the current translation so tests can
/// check where things land in window coordinates.
#[derive(Debug, Default)]
pub struct RecordingGraphics {
    calls: Vec<GraphicsCall>,
    offsets: Vec<Point>,
    offset: Point,
}

impl RecordingGraphics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[GraphicsCall] {
        &self.calls
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Whether every `save` has been matched by a `restore`.
    pub fn is_balanced(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Filled rects translated to window coordinates, in paint order.
    pub fn filled_rects(&self) -> Vec<Rect> {
        self.absolute(|call| match call {
            GraphicsCall::FillRect(rect) => Some(*rect),
            _ => None,
        })
    }

    /// Text drawn, in paint order.
    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                GraphicsCall::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Replays the recorded translations to map matching rects into window
    /// coordinates.
    fn absolute(&self, select: impl Fn(&GraphicsCall) -> Option<Rect>) -> Vec<Rect> {
        let mut stack = Vec::new();
        let mut offset = Point::ZERO;
        let mut result = Vec::new();
        for call in &self.calls {
            match call {
                GraphicsCall::Save => stack.push(offset),
                GraphicsCall::Restore => offset = stack.pop().unwrap_or_default(),
                GraphicsCall::Translate { dx, dy } => offset += Point::new(*dx, *dy),
                other => {
                    if let Some(rect) = select(other) {
                        result.push(rect.translated(offset.x, offset.y));
                    }
                }
            }
        }
        result
    }
}

impl Graphics for RecordingGraphics {
    fn save(&mut self) {
        self.offsets.push(self.offset);
        self.calls.push(GraphicsCall::Save);
    }

    fn restore(&mut self) {
        self.offset = self.offsets.pop().unwrap_or_default();
        self.calls.push(GraphicsCall::Restore);
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.calls.push(GraphicsCall::ClipRect(rect));
    }

    fn clip_path(&mut self, path: &Path) {
        self.calls.push(GraphicsCall::ClipPath(path.clone()));
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.offset += Point::new(dx, dy);
        self.calls.push(GraphicsCall::Translate { dx, dy });
    }

    fn set_fill_color(&mut self, color: Color) {
        self.calls.push(GraphicsCall::FillColor(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.calls.push(GraphicsCall::StrokeColor(color));
    }

    fn set_stroke_width(&mut self, width: f32) {
        self.calls.push(GraphicsCall::StrokeWidth(width));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.calls.push(GraphicsCall::FillRect(rect));
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.calls.push(GraphicsCall::StrokeRect(rect));
    }

    fn stroke_line(&mut self, from: Point, to: Point) {
        self.calls.push(GraphicsCall::StrokeLine { from, to });
    }

    fn fill_ellipse(&mut self, bounds: Rect) {
        self.calls.push(GraphicsCall::FillEllipse(bounds));
    }

    fn stroke_ellipse(&mut self, bounds: Rect) {
        self.calls.push(GraphicsCall::StrokeEllipse(bounds));
    }

    fn fill_path(&mut self, path: &Path) {
        self.calls.push(GraphicsCall::FillPath(path.clone()));
    }

    fn stroke_path(&mut self, path: &Path) {
        self.calls.push(GraphicsCall::StrokePath(path.clone()));
    }

    fn fill_linear_gradient(&mut self, rect: Rect, gradient: &Gradient, _start: Point, _end: Point) {
        self.calls.push(GraphicsCall::FillGradient {
            rect,
            gradient: gradient.clone(),
        });
    }

    fn draw_text(&mut self, origin: Point, text: &str, font: &FontDesc) {
        self.calls.push(GraphicsCall::Text {
            origin,
            text: text.to_string(),
            font: font.clone(),
        });
    }

    fn draw_image(&mut self, image: ImageId, bounds: Rect) {
        self.calls.push(GraphicsCall::Image { image, bounds });
    }
}
