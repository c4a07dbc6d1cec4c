//! Static, word-wrapped text.

use crate::event::{Event, EventType};
use crate::graphics::{FontDesc, TextMeasurer};
use crate::layout::{Sizer, Sizes, default_max_size, hinted};
use crate::theme::Theme;
use crate::tree::{WidgetId, WidgetTree};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use trellis_core::Color;
use trellis_core::geometry::{Point, Size};

struct LabelState {
    text: String,
    font: FontDesc,
    color: Color,
    measurer: Rc<dyn TextMeasurer>,
}

impl LabelState {
    /// Greedy word wrap of each explicit line. Words wider than `width` get
    /// a line of their own; an unhinted width only breaks at newlines.
    fn lines(&self, width: f32) -> Vec<String> {
        let mut lines = Vec::new();
        for paragraph in self.text.lines() {
            let mut current = String::new();
            for word in paragraph.split_whitespace() {
                if current.is_empty() {
                    current.push_str(word);
                    continue;
                }
                let candidate = format!("{current} {word}");
                if !hinted(width) || self.measurer.measure(&candidate, &self.font).width <= width {
                    current = candidate;
                } else {
                    lines.push(std::mem::replace(&mut current, word.to_string()));
                }
            }
            lines.push(current);
        }
        lines
    }

    fn widest_word(&self) -> f32 {
        self.text
            .split_whitespace()
            .map(|word| self.measurer.measure(word, &self.font).width)
            .fold(0.0, f32::max)
    }

    fn extent(&self, lines: &[String]) -> Size {
        let width = lines
            .iter()
            .map(|line| self.measurer.measure(line, &self.font).width)
            .fold(0.0, f32::max);
        Size::new(width, lines.len() as f32 * self.measurer.line_height(&self.font))
    }
}

/// A leaf widget showing text, wrapped at word boundaries to its width.
#[derive(Clone)]
pub struct Label {
    id: WidgetId,
    state: Rc<RefCell<LabelState>>,
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Label")
            .field("id", &self.id)
            .field("text", &self.state.borrow().text)
            .finish()
    }
}

struct LabelSizer(Rc<RefCell<LabelState>>);

impl Sizer for LabelSizer {
    fn sizes(&self, tree: &WidgetTree, target: WidgetId, hint: Size) -> Sizes {
        let state = self.0.borrow();
        let insets = tree.insets(target);
        let width = if hinted(hint.width) {
            (hint.width - insets.width()).max(0.0)
        } else {
            hint.width
        };
        let pref = state.extent(&state.lines(width)).add_insets(insets);
        let widest = state.widest_word();
        let min = Size::new(widest, state.extent(&state.lines(widest)).height).add_insets(insets);
        Sizes::new(min, pref, default_max_size(pref))
    }
}

impl Label {
    pub fn new(tree: &mut WidgetTree, text: impl Into<String>, measurer: Rc<dyn TextMeasurer>, theme: &Theme) -> Self {
        let id = tree.create_named("label");
        let state = Rc::new(RefCell::new(LabelState {
            text: text.into(),
            font: theme.label_font.clone(),
            color: theme.text_color,
            measurer,
        }));
        tree.set_sizer(id, Some(Rc::new(LabelSizer(state.clone()))));
        let label = Self { id, state };
        let painter = label.clone();
        tree.add_handler(id, EventType::Paint, move |tree, event| painter.paint(tree, event));
        label
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn text(&self) -> String {
        self.state.borrow().text.clone()
    }

    pub fn set_text(&self, tree: &mut WidgetTree, text: impl Into<String>) {
        let text = text.into();
        if self.state.borrow().text == text {
            return;
        }
        self.state.borrow_mut().text = text;
        self.invalidate(tree);
    }

    pub fn set_font(&self, tree: &mut WidgetTree, font: FontDesc) {
        self.state.borrow_mut().font = font;
        self.invalidate(tree);
    }

    pub fn set_color(&self, tree: &mut WidgetTree, color: Color) {
        self.state.borrow_mut().color = color;
        tree.repaint(self.id);
    }

    /// The lines the label currently paints.
    pub fn lines(&self, tree: &WidgetTree) -> Vec<String> {
        let width = tree.local_inset_bounds(self.id).width;
        self.state.borrow().lines(width)
    }

    fn invalidate(&self, tree: &mut WidgetTree) {
        if let Some(parent) = tree.parent(self.id) {
            tree.set_needs_layout(parent, true);
        }
        tree.repaint(self.id);
    }

    fn paint(&self, tree: &WidgetTree, event: &mut Event<'_>) {
        let lines = self.lines(tree);
        let origin = tree.local_inset_bounds(self.id).origin();
        let state = self.state.borrow();
        let line_height = state.measurer.line_height(&state.font);
        let Some(gc) = event.graphics() else {
            return;
        };
        gc.set_fill_color(state.color);
        for (index, line) in lines.iter().enumerate() {
            let y = origin.y + index as f32 * line_height;
            gc.draw_text(Point::new(origin.x, y), line, &state.font);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::NO_HINT;

    /// Every character is 10 wide, lines are 20 high.
    struct Monospace;

    impl TextMeasurer for Monospace {
        fn measure(&self, text: &str, _font: &FontDesc) -> Size {
            Size::new(text.chars().count() as f32 * 10.0, 20.0)
        }

        fn line_height(&self, _font: &FontDesc) -> f32 {
            20.0
        }
    }

    fn label(text: &str) -> (WidgetTree, Label) {
        let mut tree = WidgetTree::new();
        let label = Label::new(&mut tree, text, Rc::new(Monospace), &Theme::default());
        (tree, label)
    }

    #[test]
    fn unhinted_is_one_line() {
        let (tree, label) = label("hello big world");
        let sizes = tree.sizes(label.id(), Size::new(NO_HINT, NO_HINT));
        assert_eq!(sizes.pref, Size::new(150.0, 20.0));
        assert_eq!(sizes.min.width, 50.0);
    }

    #[test]
    fn wraps_at_hint() {
        let (tree, label) = label("hello big world");
        let sizes = tree.sizes(label.id(), Size::new(90.0, NO_HINT));
        assert_eq!(sizes.pref, Size::new(90.0, 40.0));
    }

    #[test]
    fn long_word_gets_its_own_line() {
        let (mut tree, label) = label("a extraordinary b");
        tree.set_bounds(label.id(), trellis_core::geometry::Rect::new(0.0, 0.0, 60.0, 60.0));
        assert_eq!(label.lines(&tree), vec!["a", "extraordinary", "b"]);
    }

    #[test]
    fn explicit_newlines_break_lines() {
        let (tree, label) = label("one two\n\nthree");
        let sizes = tree.sizes(label.id(), Size::new(NO_HINT, NO_HINT));
        assert_eq!(sizes.pref, Size::new(70.0, 60.0));

        let mut tree = tree;
        tree.set_bounds(label.id(), trellis_core::geometry::Rect::new(0.0, 0.0, 40.0, 80.0));
        assert_eq!(label.lines(&tree), vec!["one", "two", "", "three"]);
    }
}
