//! Bridge between a platform window and the widget tree.
//!
//! The platform side implements [`WindowBackend`] (requests flowing out of
//! the toolkit) and feeds raw callbacks into a [`Window`] (input and paint
//! requests flowing in). The window turns those callbacks into dispatched
//! events, tracks hover, mouse capture, focus, tooltip and cursor state, and
//! validates layout before every paint.

use crate::cursor::Cursor;
use crate::error::UiResult;
use crate::event::{Event, EventType, KeyCode, KeyData, KeyModifiers, MouseData};
use crate::graphics::Graphics;
use crate::layout::NO_HINT;
use crate::theme::Theme;
use crate::tree::{WidgetId, WidgetTree};
use bitflags::bitflags;
use std::rc::Rc;
use std::time::Duration;
use trellis_core::geometry::{Point, Rect, Size};

/// Deferred work run on the UI thread with access to the window's tree.
pub type Task = Box<dyn FnOnce(&mut WidgetTree)>;

/// Services a native window provides to the toolkit.
///
/// All methods take `&self`; implementations keep their own interior state.
pub trait WindowBackend {
    /// Mark `rect` (in content coordinates) as needing a paint callback.
    fn request_repaint(&self, rect: Rect);

    /// Deliver pending paint callbacks now instead of on the next cycle.
    fn flush_painting(&self);

    /// The outer frame in screen coordinates.
    fn frame(&self) -> Rect;
    fn set_frame(&self, frame: Rect);

    fn content_size(&self) -> Size;
    fn set_content_size(&self, size: Size);

    fn minimize(&self);
    fn zoom(&self);
    fn bring_to_front(&self);

    fn set_cursor(&self, cursor: Cursor);
    fn set_tooltip(&self, text: Option<&str>);

    /// Run `task` on the UI thread at the next opportunity. Safe to call from
    /// within event handlers.
    fn invoke(&self, task: Task);

    /// Run `task` on the UI thread after `delay`.
    fn invoke_after(&self, delay: Duration, task: Task);
}

/// Creates native windows.
pub trait Platform {
    fn create_window(&self, frame: Rect, style: WindowStyle) -> UiResult<Rc<dyn WindowBackend>>;
}

bitflags! {
    /// Decorations and controls of a native window.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowStyle: u8 {
        const TITLED         = 1 << 0;
        const CLOSABLE       = 1 << 1;
        const MINIATURIZABLE = 1 << 2;
        const RESIZABLE      = 1 << 3;
    }
}

impl WindowStyle {
    pub const STANDARD: WindowStyle = WindowStyle::all();
}

/// Raw mouse callback kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Down,
    Dragged,
    Up,
    Moved,
    Entered,
    Exited,
}

/// Raw key callback kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    Down,
    Typed,
    Up,
}

/// A top-level window: the widget tree, its root and the backend it draws to.
pub struct Window {
    tree: WidgetTree,
    root: WidgetId,
    backend: Rc<dyn WindowBackend>,
    style: WindowStyle,
    focus: Option<WidgetId>,
    window_focused: bool,
    last_mouse_widget: Option<WidgetId>,
    captured: Option<WidgetId>,
    last_tooltip: Option<String>,
    last_cursor: Cursor,
    in_live_resize: bool,
}

impl Window {
    /// Ask `platform` for a native window and wrap it.
    ///
    /// Failure means the platform cannot provide windows at all; callers
    /// usually treat it as fatal.
    pub fn open(platform: &dyn Platform, frame: Rect, style: WindowStyle, theme: &Theme) -> UiResult<Window> {
        let backend = platform.create_window(frame, style)?;
        Ok(Window::with_backend(backend, style, theme))
    }

    /// Wrap an existing backend.
    pub fn with_backend(backend: Rc<dyn WindowBackend>, style: WindowStyle, theme: &Theme) -> Window {
        let mut tree = WidgetTree::new();
        let root = tree.create_named("root");
        tree.set_background(root, theme.window_background);
        tree.set_window(root, Some(Rc::clone(&backend)));
        tree.set_bounds(root, Rect::from_size(backend.content_size()));
        tracing::info!("opened window {:?} with content {}", style, backend.content_size());
        Window {
            tree,
            root,
            backend,
            style,
            focus: None,
            window_focused: false,
            last_mouse_widget: None,
            captured: None,
            last_tooltip: None,
            last_cursor: Cursor::Arrow,
            in_live_resize: false,
        }
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// The root widget, covering the whole content area.
    pub fn root(&self) -> WidgetId {
        self.root
    }

    pub fn backend(&self) -> &Rc<dyn WindowBackend> {
        &self.backend
    }

    pub fn style(&self) -> WindowStyle {
        self.style
    }

    /// Whether the native window has keyboard focus.
    pub fn is_key_window(&self) -> bool {
        self.window_focused
    }

    pub fn in_live_resize(&self) -> bool {
        self.in_live_resize
    }

    // Outbound requests

    pub fn repaint(&self) {
        self.tree.repaint(self.root);
    }

    pub fn repaint_bounds(&self, rect: Rect) {
        self.tree.repaint_bounds(self.root, rect);
    }

    pub fn flush_painting(&self) {
        self.backend.flush_painting();
    }

    pub fn frame(&self) -> Rect {
        self.backend.frame()
    }

    pub fn set_frame(&self, frame: Rect) {
        self.backend.set_frame(frame);
    }

    pub fn content_size(&self) -> Size {
        self.backend.content_size()
    }

    pub fn set_content_size(&mut self, size: Size) {
        self.backend.set_content_size(size);
        self.tree.set_size(self.root, size);
    }

    /// Resize the content to the root's preferred size.
    pub fn pack(&mut self) {
        let pref = self.tree.sizes(self.root, Size::new(NO_HINT, NO_HINT)).pref;
        self.set_content_size(pref);
    }

    pub fn minimize(&self) {
        self.backend.minimize();
    }

    pub fn zoom(&self) {
        self.backend.zoom();
    }

    pub fn to_front(&self) {
        self.backend.bring_to_front();
    }

    // Inbound callbacks

    /// Lay out anything pending, then paint `region` of the content.
    pub fn paint(&mut self, gc: &mut dyn Graphics, region: Rect, in_live_resize: bool) {
        trellis_core::profiling::new_frame();
        self.in_live_resize = in_live_resize;
        self.tree.validate_layout(self.root);
        self.tree.paint(self.root, gc, region);
    }

    /// The native content area changed size.
    pub fn resized(&mut self) {
        let size = self.backend.content_size();
        self.tree.set_size(self.root, size);
    }

    /// A raw mouse callback. `position` is in content coordinates.
    pub fn mouse(&mut self, kind: MouseEventKind, modifiers: KeyModifiers, position: Point, button: u8, click_count: u32) {
        let data = MouseData {
            position,
            modifiers,
            button,
            click_count,
        };
        let hit = self.tree.widget_at(self.root, position);
        match kind {
            MouseEventKind::Down => {
                self.show_tooltip(None);
                if self.tree.is_enabled(hit) {
                    let mut event = Event::mouse(EventType::MouseDown, hit, data);
                    self.tree.dispatch(&mut event);
                    if !event.is_discarded() {
                        self.captured = Some(hit);
                    }
                }
            }
            MouseEventKind::Dragged => {
                let target = self.captured_or(hit);
                if self.tree.is_enabled(target) {
                    self.tree.dispatch(&mut Event::mouse(EventType::MouseDragged, target, data));
                }
            }
            MouseEventKind::Up => {
                let target = self.captured_or(hit);
                self.captured = None;
                if self.tree.is_enabled(target) {
                    self.tree.dispatch(&mut Event::mouse(EventType::MouseUp, target, data));
                }
                self.update_hover(hit, data);
            }
            MouseEventKind::Moved => {
                self.update_hover(hit, data);
                self.tree.dispatch(&mut Event::mouse(EventType::MouseMoved, hit, data));
                self.update_pointer_feedback(hit, position);
            }
            MouseEventKind::Entered => {
                self.update_hover(hit, data);
                self.update_pointer_feedback(hit, position);
            }
            MouseEventKind::Exited => {
                if let Some(last) = self.last_mouse_widget.take() {
                    if self.tree.contains(last) {
                        self.tree.dispatch(&mut Event::mouse(EventType::MouseExited, last, data));
                    }
                }
                self.show_tooltip(None);
            }
        }
    }

    /// A scroll-wheel callback. The pointer is then treated as having moved,
    /// since content may have scrolled beneath it.
    pub fn mouse_wheel(&mut self, modifiers: KeyModifiers, position: Point, delta: Point) {
        let hit = self.tree.widget_at(self.root, position);
        self.tree
            .dispatch(&mut Event::mouse_wheel(hit, position, delta, modifiers));
        let follow_up = if self.captured.is_some() {
            MouseEventKind::Dragged
        } else {
            MouseEventKind::Moved
        };
        self.mouse(follow_up, modifiers, position, 0, 0);
    }

    /// A raw key callback, delivered to the focused widget (or the root).
    /// An undiscarded Tab moves focus forward, Shift-Tab backward.
    pub fn key(&mut self, kind: KeyEventKind, code: KeyCode, ch: Option<char>, modifiers: KeyModifiers, repeat: bool) {
        let target = self.focus.filter(|id| self.tree.contains(*id)).unwrap_or(self.root);
        let event_type = match kind {
            KeyEventKind::Down => EventType::KeyDown,
            KeyEventKind::Typed => EventType::KeyTyped,
            KeyEventKind::Up => EventType::KeyUp,
        };
        let data = KeyData {
            code,
            ch,
            modifiers,
            repeat,
        };
        let mut event = Event::key(event_type, target, data);
        self.tree.dispatch(&mut event);
        if kind == KeyEventKind::Down && !event.is_discarded() && code == KeyCode::TAB {
            if modifiers.only(KeyModifiers::empty()) {
                self.focus_next();
            } else if modifiers.only(KeyModifiers::SHIFT) {
                self.focus_previous();
            }
        }
    }

    /// Deliver each character of `text` as a `KeyTyped` event.
    pub fn key_typed(&mut self, text: &str, modifiers: KeyModifiers) {
        for ch in text.chars() {
            self.key(KeyEventKind::Typed, KeyCode(ch as u32), Some(ch), modifiers, false);
        }
    }

    /// The native window became the key window.
    pub fn focus_gained(&mut self) {
        self.window_focused = true;
        if let Some(focus) = self.focus {
            self.tree.dispatch(&mut Event::simple(EventType::FocusGained, focus));
            self.tree.repaint(focus);
        }
    }

    /// The native window stopped being the key window.
    pub fn focus_lost(&mut self) {
        self.window_focused = false;
        if let Some(focus) = self.focus {
            self.tree.dispatch(&mut Event::simple(EventType::FocusLost, focus));
            self.tree.repaint(focus);
        }
    }

    /// The user asked to close the window. Returns `false` if a `Closing`
    /// handler aborted.
    pub fn close_requested(&mut self) -> bool {
        let mut event = Event::closing(self.root);
        self.tree.dispatch(&mut event);
        !event.is_aborted()
    }

    /// The native window is gone.
    pub fn closed(&mut self) {
        self.tree.dispatch(&mut Event::simple(EventType::Closed, self.root));
        tracing::info!("window closed");
    }

    // Focus

    /// The widget receiving key events, if any.
    pub fn focus(&self) -> Option<WidgetId> {
        self.focus.filter(|id| self.tree.contains(*id))
    }

    /// Move keyboard focus, dispatching `FocusLost` to the old widget and
    /// `FocusGained` to the new one.
    pub fn set_focus(&mut self, target: Option<WidgetId>) {
        let target = target.filter(|id| self.tree.contains(*id));
        if target == self.focus {
            return;
        }
        if let Some(old) = self.focus.take() {
            self.tree.set_focused(old, false);
            self.tree.dispatch(&mut Event::simple(EventType::FocusLost, old));
        }
        self.focus = target;
        if let Some(new) = target {
            tracing::debug!("focus -> {}", self.tree.describe(new));
            self.tree.set_focused(new, true);
            self.tree.dispatch(&mut Event::simple(EventType::FocusGained, new));
        }
    }

    /// Focus the next focusable widget in depth-first order, wrapping.
    pub fn focus_next(&mut self) {
        let focusables = self.focusables();
        if focusables.is_empty() {
            return;
        }
        let next = match self.current_focus_index(&focusables) {
            Some(index) => (index + 1) % focusables.len(),
            None => 0,
        };
        self.set_focus(Some(focusables[next]));
    }

    /// Focus the previous focusable widget in depth-first order, wrapping.
    pub fn focus_previous(&mut self) {
        let focusables = self.focusables();
        if focusables.is_empty() {
            return;
        }
        let previous = match self.current_focus_index(&focusables) {
            Some(index) => (index + focusables.len() - 1) % focusables.len(),
            None => focusables.len() - 1,
        };
        self.set_focus(Some(focusables[previous]));
    }

    fn current_focus_index(&self, focusables: &[WidgetId]) -> Option<usize> {
        let focus = self.focus?;
        focusables.iter().position(|id| *id == focus)
    }

    /// Enabled focusable widgets, depth-first from the root.
    fn focusables(&self) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if self.tree.is_focusable(id) && self.tree.is_enabled(id) {
                result.push(id);
            }
            stack.extend(self.tree.children(id).iter().rev());
        }
        result
    }

    // Pointer state

    fn captured_or(&self, hit: WidgetId) -> WidgetId {
        self.captured.filter(|id| self.tree.contains(*id)).unwrap_or(hit)
    }

    fn update_hover(&mut self, hit: WidgetId, data: MouseData) {
        if self.last_mouse_widget == Some(hit) {
            return;
        }
        if let Some(last) = self.last_mouse_widget {
            if self.tree.contains(last) {
                self.tree.dispatch(&mut Event::mouse(EventType::MouseExited, last, data));
            }
        }
        self.tree.dispatch(&mut Event::mouse(EventType::MouseEntered, hit, data));
        self.last_mouse_widget = Some(hit);
    }

    fn update_pointer_feedback(&mut self, hit: WidgetId, position: Point) {
        let mut tooltip = Event::tool_tip(hit, position);
        self.tree.dispatch(&mut tooltip);
        self.show_tooltip(tooltip.tooltip().map(str::to_string));

        let mut cursor = Event::update_cursor(hit, position);
        self.tree.dispatch(&mut cursor);
        let cursor = cursor.cursor().unwrap_or_default();
        if cursor != self.last_cursor {
            self.last_cursor = cursor;
            self.backend.set_cursor(cursor);
        }
    }

    fn show_tooltip(&mut self, text: Option<String>) {
        if text != self.last_tooltip {
            self.backend.set_tooltip(text.as_deref());
            self.last_tooltip = text;
        }
    }
}
