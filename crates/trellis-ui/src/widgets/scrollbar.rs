//! Scroll bars with line buttons, page track and draggable thumb.

use crate::event::{Event, EventType};
use crate::graphics::Path;
use crate::layout::{DEFAULT_MAX, ScrollViewport, Sizer, Sizes};
use crate::theme::ScrollBarTheme;
use crate::tree::{WidgetId, WidgetTree};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use trellis_core::geometry::{Point, Rect, Size};

/// Scrolling axis of a [`ScrollBar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    fn along_point(self, point: Point) -> f32 {
        match self {
            Orientation::Horizontal => point.x,
            Orientation::Vertical => point.y,
        }
    }

    fn along_size(self, size: Size) -> f32 {
        match self {
            Orientation::Horizontal => size.width,
            Orientation::Vertical => size.height,
        }
    }

    fn with_along(self, point: Point, value: f32) -> Point {
        match self {
            Orientation::Horizontal => Point::new(value, point.y),
            Orientation::Vertical => Point::new(point.x, value),
        }
    }

    /// A rect spanning `start..start + length` along the axis and the full
    /// thickness across it.
    fn segment(self, bounds: Size, start: f32, length: f32) -> Rect {
        match self {
            Orientation::Horizontal => Rect::new(start, 0.0, length, bounds.height),
            Orientation::Vertical => Rect::new(0.0, start, bounds.width, length),
        }
    }
}

/// Region of a scroll bar under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBarPart {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    Thumb,
}

/// Positions of the bar's parts along its axis, in local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Track {
    button: f32,
    length: f32,
    thumb: Option<(f32, f32)>,
}

impl Track {
    fn track_start(&self) -> f32 {
        self.button
    }

    fn track_end(&self) -> f32 {
        self.length - self.button
    }

    fn part_at(&self, along: f32) -> Option<ScrollBarPart> {
        if along < 0.0 || along >= self.length {
            return None;
        }
        if along < self.track_start() {
            return Some(ScrollBarPart::LineUp);
        }
        if along >= self.track_end() {
            return Some(ScrollBarPart::LineDown);
        }
        let (start, length) = self.thumb?;
        Some(if along < start {
            ScrollBarPart::PageUp
        } else if along < start + length {
            ScrollBarPart::Thumb
        } else {
            ScrollBarPart::PageDown
        })
    }
}

#[derive(Debug)]
struct ScrollBarState {
    orientation: Orientation,
    viewport: Option<ScrollViewport>,
    theme: ScrollBarTheme,
    line_amount: f32,
    pressed: Option<ScrollBarPart>,
    /// Pointer offset from the thumb's leading edge while dragging.
    grab: f32,
}

/// A scroll bar driving one axis of a [`ScrollViewport`].
///
/// Pressing a line button or the track steps once, then repeats after the
/// theme's initial delay until the button is released.
#[derive(Debug, Clone)]
pub struct ScrollBar {
    id: WidgetId,
    state: Rc<RefCell<ScrollBarState>>,
}

struct ScrollBarSizer {
    orientation: Orientation,
    thickness: f32,
}

impl Sizer for ScrollBarSizer {
    fn sizes(&self, _tree: &WidgetTree, _target: WidgetId, _hint: Size) -> Sizes {
        let t = self.thickness;
        match self.orientation {
            Orientation::Horizontal => Sizes::new(
                Size::new(t * 2.0, t),
                Size::new(t * 2.0, t),
                Size::new(DEFAULT_MAX, t),
            ),
            Orientation::Vertical => Sizes::new(
                Size::new(t, t * 2.0),
                Size::new(t, t * 2.0),
                Size::new(t, DEFAULT_MAX),
            ),
        }
    }
}

impl ScrollBar {
    pub fn new(tree: &mut WidgetTree, orientation: Orientation, theme: &ScrollBarTheme, line_amount: f32) -> Self {
        let id = tree.create_named(match orientation {
            Orientation::Horizontal => "h_scroll_bar",
            Orientation::Vertical => "v_scroll_bar",
        });
        tree.set_sizer(
            id,
            Some(Rc::new(ScrollBarSizer {
                orientation,
                thickness: theme.size,
            })),
        );
        let state = Rc::new(RefCell::new(ScrollBarState {
            orientation,
            viewport: None,
            theme: theme.clone(),
            line_amount,
            pressed: None,
            grab: 0.0,
        }));
        let bar = Self { id, state };
        bar.install_handlers(tree);
        bar
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn orientation(&self) -> Orientation {
        self.state.borrow().orientation
    }

    /// Connect the bar to the viewport it scrolls.
    pub fn attach(&self, viewport: ScrollViewport) {
        self.state.borrow_mut().viewport = Some(viewport);
    }

    pub fn pressed_part(&self) -> Option<ScrollBarPart> {
        self.state.borrow().pressed
    }

    /// The part at `point` (local coordinates), if any.
    pub fn part_at(&self, tree: &WidgetTree, point: Point) -> Option<ScrollBarPart> {
        let state = self.state.borrow();
        let track = Self::track(tree, self.id, &state);
        track.part_at(state.orientation.along_point(point))
    }

    /// Scroll position along this bar's axis.
    pub fn position(&self, tree: &WidgetTree) -> f32 {
        let state = self.state.borrow();
        state
            .viewport
            .map_or(0.0, |viewport| state.orientation.along_point(viewport.scrolled_position(tree)))
    }

    /// Scroll along this bar's axis, leaving the other axis alone.
    pub fn set_position(&self, tree: &mut WidgetTree, position: f32) {
        let (orientation, viewport) = {
            let state = self.state.borrow();
            (state.orientation, state.viewport)
        };
        if let Some(viewport) = viewport {
            let current = viewport.scrolled_position(tree);
            viewport.set_scrolled_position(tree, orientation.with_along(current, position));
        }
    }

    fn track(tree: &WidgetTree, id: WidgetId, state: &ScrollBarState) -> Track {
        let length = state.orientation.along_size(tree.size(id));
        let button = state.theme.size.min(length / 2.0);
        let mut track = Track {
            button,
            length,
            thumb: None,
        };
        let Some(viewport) = state.viewport else {
            return track;
        };
        let visible = state.orientation.along_size(viewport.visible_size(tree));
        let content = state.orientation.along_size(viewport.content_size(tree));
        let available = track.track_end() - track.track_start();
        if content <= visible || available <= 0.0 {
            return track;
        }
        let min_thumb = state.theme.size * state.theme.min_thumb_ratio;
        let thumb_length = (available * visible / content).max(min_thumb).min(available);
        let position = state.orientation.along_point(viewport.scrolled_position(tree));
        let start = track.track_start() + (available - thumb_length) * position / (content - visible);
        track.thumb = Some((start, thumb_length));
        track
    }

    /// Amount a single activation of `part` scrolls by.
    fn step_amount(tree: &WidgetTree, state: &ScrollBarState, part: ScrollBarPart) -> f32 {
        let page = state.viewport.map_or(0.0, |viewport| {
            state.orientation.along_size(viewport.visible_size(tree))
        });
        match part {
            ScrollBarPart::LineUp => -state.line_amount,
            ScrollBarPart::LineDown => state.line_amount,
            ScrollBarPart::PageUp => -page,
            ScrollBarPart::PageDown => page,
            ScrollBarPart::Thumb => 0.0,
        }
    }

    fn step(&self, tree: &mut WidgetTree, part: ScrollBarPart) {
        let amount = Self::step_amount(tree, &self.state.borrow(), part);
        let position = self.position(tree);
        self.set_position(tree, position + amount);
    }

    /// Queue the next repeat of `part`. The repeat is dropped if the bar's
    /// sequence has moved on or the part is no longer held.
    fn schedule_repeat(&self, tree: &WidgetTree, part: ScrollBarPart, delay: Duration) {
        let Some(window) = tree.window_of(self.id) else {
            return;
        };
        let sequence = tree.sequence(self.id);
        let bar = self.clone();
        window.invoke_after(
            delay,
            Box::new(move |tree: &mut WidgetTree| {
                if tree.sequence(bar.id) != sequence || bar.pressed_part() != Some(part) {
                    return;
                }
                bar.step(tree, part);
                let repeat = bar.state.borrow().theme.repeat_delay;
                bar.schedule_repeat(tree, part, repeat);
            }),
        );
    }

    fn mouse_down(&self, tree: &mut WidgetTree, event: &mut Event<'_>) {
        let Some(position) = event.position() else {
            return;
        };
        let local = tree.from_window(self.id, position);
        let Some(part) = self.part_at(tree, local) else {
            return;
        };
        tree.next_sequence(self.id);
        {
            let mut state = self.state.borrow_mut();
            state.pressed = Some(part);
            if part == ScrollBarPart::Thumb {
                let track = Self::track(tree, self.id, &state);
                let thumb_start = track.thumb.map_or(0.0, |(start, _)| start);
                state.grab = state.orientation.along_point(local) - thumb_start;
            }
        }
        if part != ScrollBarPart::Thumb {
            self.step(tree, part);
            let delay = self.state.borrow().theme.initial_repeat_delay;
            self.schedule_repeat(tree, part, delay);
        }
        tree.repaint(self.id);
        event.finish();
    }

    fn mouse_dragged(&self, tree: &mut WidgetTree, event: &mut Event<'_>) {
        let Some(position) = event.position() else {
            return;
        };
        let local = tree.from_window(self.id, position);
        let target = {
            let state = self.state.borrow();
            if state.pressed != Some(ScrollBarPart::Thumb) {
                return;
            }
            let Some(viewport) = state.viewport else {
                return;
            };
            let track = Self::track(tree, self.id, &state);
            let Some((_, thumb_length)) = track.thumb else {
                return;
            };
            let travel = track.track_end() - track.track_start() - thumb_length;
            if travel <= 0.0 {
                return;
            }
            let thumb_start = state.orientation.along_point(local) - state.grab - track.track_start();
            let range = state.orientation.along_point(viewport.max_position(tree));
            thumb_start / travel * range
        };
        self.set_position(tree, target);
        tree.repaint(self.id);
        event.finish();
    }

    fn mouse_up(&self, tree: &mut WidgetTree, event: &mut Event<'_>) {
        tree.next_sequence(self.id);
        if self.state.borrow_mut().pressed.take().is_some() {
            tree.repaint(self.id);
            event.finish();
        }
    }

    fn paint(&self, tree: &WidgetTree, event: &mut Event<'_>) {
        let state = self.state.borrow();
        let size = tree.size(self.id);
        let track = Self::track(tree, self.id, &state);
        let theme = &state.theme;
        let orientation = state.orientation;
        let Some(gc) = event.graphics() else {
            return;
        };

        gc.set_fill_color(theme.track_color);
        gc.fill_rect(Rect::from_size(size));

        let buttons = [
            (ScrollBarPart::LineUp, orientation.segment(size, 0.0, track.button)),
            (
                ScrollBarPart::LineDown,
                orientation.segment(size, track.track_end(), track.button),
            ),
        ];
        for (part, rect) in buttons {
            if state.pressed == Some(part) {
                gc.set_fill_color(theme.pressed_color);
                gc.fill_rect(rect);
            }
            gc.set_stroke_color(theme.outline_color);
            gc.stroke_rect(rect);
            gc.set_fill_color(theme.arrow_color);
            gc.fill_path(&arrow(rect, orientation, part == ScrollBarPart::LineUp));
        }

        if let Some((start, length)) = track.thumb {
            let rect = orientation.segment(size, start, length).inset_uniform(2.0);
            let color = if state.pressed == Some(ScrollBarPart::Thumb) {
                theme.pressed_color
            } else {
                theme.thumb_color
            };
            gc.set_fill_color(color);
            gc.fill_rect(rect);
            gc.set_stroke_color(theme.outline_color);
            gc.stroke_rect(rect);
        }
    }

    fn install_handlers(&self, tree: &mut WidgetTree) {
        let bar = self.clone();
        tree.add_handler(self.id, EventType::MouseDown, move |tree, event| bar.mouse_down(tree, event));
        let bar = self.clone();
        tree.add_handler(self.id, EventType::MouseDragged, move |tree, event| {
            bar.mouse_dragged(tree, event)
        });
        let bar = self.clone();
        tree.add_handler(self.id, EventType::MouseUp, move |tree, event| bar.mouse_up(tree, event));
        let bar = self.clone();
        tree.add_handler(self.id, EventType::Paint, move |tree, event| bar.paint(tree, event));
    }
}

/// Triangle pointing toward the start (`backward`) or end of the axis.
fn arrow(rect: Rect, orientation: Orientation, backward: bool) -> Path {
    let center = rect.center();
    let half = rect.width.min(rect.height) / 4.0;
    let tip = if backward { -half } else { half };
    match orientation {
        Orientation::Horizontal => Path::new()
            .move_to(center.x + tip, center.y)
            .line_to(center.x - tip, center.y - half)
            .line_to(center.x - tip, center.y + half)
            .close(),
        Orientation::Vertical => Path::new()
            .move_to(center.x, center.y + tip)
            .line_to(center.x - half, center.y - tip)
            .line_to(center.x + half, center.y - tip)
            .close(),
    }
}
