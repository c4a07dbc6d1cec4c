//! Event records and their dispatch through the widget tree.
//!
//! An [`Event`] is an ephemeral value built by the window adapter (or by
//! application code) and handed to [`WidgetTree::dispatch`]. Dispatch visits
//! the target and then its ancestors, invoking the handlers registered for
//! the event's [`EventType`] in registration order:
//!
//! - a handler that calls [`Event::finish`] (or [`Event::discard`]) stops the
//!   walk immediately, including the remaining handlers on the same widget;
//! - otherwise the walk continues to the parent only while the event
//!   [cascades](Event::cascades).
//!
//! [`WidgetTree::dispatch`]: crate::tree::WidgetTree::dispatch

mod handlers;
mod keys;

pub use handlers::{EventHandler, HandlerId, Handlers};
pub use keys::{KeyCode, KeyModifiers};

use crate::cursor::Cursor;
use crate::graphics::Graphics;
use crate::tree::WidgetId;
use std::any::Any;
use std::fmt;
use std::time::Instant;
use trellis_core::geometry::{Point, Rect};

/// Discriminates events for handler lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Paint,
    MouseDown,
    MouseDragged,
    MouseUp,
    MouseEntered,
    MouseMoved,
    MouseExited,
    MouseWheel,
    FocusGained,
    FocusLost,
    KeyDown,
    KeyTyped,
    KeyUp,
    ToolTip,
    UpdateCursor,
    Resized,
    Closing,
    Closed,
    /// Application-defined event. The code is free for the application to
    /// assign.
    User(u32),
}

impl EventType {
    /// Whether events of this type continue to the parent when a widget's
    /// handlers leave them unfinished. User events choose per instance.
    pub fn cascades_by_default(self) -> bool {
        matches!(
            self,
            EventType::KeyDown
                | EventType::KeyTyped
                | EventType::KeyUp
                | EventType::MouseWheel
                | EventType::ToolTip
                | EventType::UpdateCursor
        )
    }
}

/// Pointer state for button and motion events. Positions are in window
/// coordinates; use [`WidgetTree::from_window`](crate::tree::WidgetTree::from_window)
/// to get widget-local ones.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouseData {
    pub position: Point,
    pub modifiers: KeyModifiers,
    pub button: u8,
    pub click_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyData {
    pub code: KeyCode,
    /// The character produced, for `KeyTyped` events.
    pub ch: Option<char>,
    pub modifiers: KeyModifiers,
    pub repeat: bool,
}

/// Type-specific payload of an [`Event`].
pub enum EventData<'a> {
    None,
    Paint {
        gc: &'a mut dyn Graphics,
        dirty: Rect,
    },
    Mouse(MouseData),
    Wheel {
        position: Point,
        delta: Point,
        modifiers: KeyModifiers,
    },
    Key(KeyData),
    ToolTip {
        position: Point,
        text: Option<String>,
    },
    Cursor {
        position: Point,
        cursor: Option<Cursor>,
    },
    Closing {
        aborted: bool,
    },
    User(Box<dyn Any>),
}

impl fmt::Debug for EventData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventData::None => f.write_str("None"),
            EventData::Paint { dirty, .. } => f.debug_struct("Paint").field("dirty", dirty).finish(),
            EventData::Mouse(data) => f.debug_tuple("Mouse").field(data).finish(),
            EventData::Wheel { position, delta, modifiers } => f
                .debug_struct("Wheel")
                .field("position", position)
                .field("delta", delta)
                .field("modifiers", modifiers)
                .finish(),
            EventData::Key(data) => f.debug_tuple("Key").field(data).finish(),
            EventData::ToolTip { position, text } => f
                .debug_struct("ToolTip")
                .field("position", position)
                .field("text", text)
                .finish(),
            EventData::Cursor { position, cursor } => f
                .debug_struct("Cursor")
                .field("position", position)
                .field("cursor", cursor)
                .finish(),
            EventData::Closing { aborted } => f.debug_struct("Closing").field("aborted", aborted).finish(),
            EventData::User(_) => f.write_str("User(..)"),
        }
    }
}

/// A single event travelling through the widget tree.
#[derive(Debug)]
pub struct Event<'a> {
    event_type: EventType,
    timestamp: Instant,
    target: WidgetId,
    data: EventData<'a>,
    cascade: bool,
    done: bool,
    discarded: bool,
}

impl<'a> Event<'a> {
    /// Build an event with the default cascade for its type.
    pub fn new(event_type: EventType, target: WidgetId, data: EventData<'a>) -> Self {
        Self {
            event_type,
            timestamp: Instant::now(),
            target,
            data,
            cascade: event_type.cascades_by_default(),
            done: false,
            discarded: false,
        }
    }

    pub fn paint(target: WidgetId, gc: &'a mut dyn Graphics, dirty: Rect) -> Self {
        Self::new(EventType::Paint, target, EventData::Paint { gc, dirty })
    }

    /// A mouse button or motion event. `event_type` must be one of the
    /// `Mouse*` button/motion types.
    pub fn mouse(event_type: EventType, target: WidgetId, data: MouseData) -> Self {
        debug_assert!(matches!(
            event_type,
            EventType::MouseDown
                | EventType::MouseDragged
                | EventType::MouseUp
                | EventType::MouseEntered
                | EventType::MouseMoved
                | EventType::MouseExited
        ));
        Self::new(event_type, target, EventData::Mouse(data))
    }

    pub fn mouse_wheel(target: WidgetId, position: Point, delta: Point, modifiers: KeyModifiers) -> Self {
        Self::new(EventType::MouseWheel, target, EventData::Wheel { position, delta, modifiers })
    }

    /// A key event. `event_type` must be `KeyDown`, `KeyTyped` or `KeyUp`.
    pub fn key(event_type: EventType, target: WidgetId, data: KeyData) -> Self {
        debug_assert!(matches!(
            event_type,
            EventType::KeyDown | EventType::KeyTyped | EventType::KeyUp
        ));
        Self::new(event_type, target, EventData::Key(data))
    }

    pub fn tool_tip(target: WidgetId, position: Point) -> Self {
        Self::new(EventType::ToolTip, target, EventData::ToolTip { position, text: None })
    }

    pub fn update_cursor(target: WidgetId, position: Point) -> Self {
        Self::new(EventType::UpdateCursor, target, EventData::Cursor { position, cursor: None })
    }

    pub fn closing(target: WidgetId) -> Self {
        Self::new(EventType::Closing, target, EventData::Closing { aborted: false })
    }

    /// An event with no payload: focus, resize and close notifications.
    pub fn simple(event_type: EventType, target: WidgetId) -> Self {
        Self::new(event_type, target, EventData::None)
    }

    pub fn user(code: u32, target: WidgetId, payload: Box<dyn Any>, cascade: bool) -> Self {
        let mut event = Self::new(EventType::User(code), target, EventData::User(payload));
        event.cascade = cascade;
        event
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    pub fn target(&self) -> WidgetId {
        self.target
    }

    pub fn data(&self) -> &EventData<'a> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut EventData<'a> {
        &mut self.data
    }

    pub fn cascades(&self) -> bool {
        self.cascade
    }

    pub fn set_cascade(&mut self, cascade: bool) {
        self.cascade = cascade;
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Stop dispatch: no further handlers run and no ancestor sees the event.
    pub fn finish(&mut self) {
        self.done = true;
    }

    /// Finish the event and suppress the window's default handling of it
    /// (mouse capture for `MouseDown`, focus traversal for `KeyDown`).
    pub fn discard(&mut self) {
        self.discarded = true;
        self.done = true;
    }

    pub fn is_discarded(&self) -> bool {
        self.discarded
    }

    /// The pointer position for mouse, wheel, tooltip and cursor events.
    pub fn position(&self) -> Option<Point> {
        match &self.data {
            EventData::Mouse(data) => Some(data.position),
            EventData::Wheel { position, .. }
            | EventData::ToolTip { position, .. }
            | EventData::Cursor { position, .. } => Some(*position),
            _ => None,
        }
    }

    pub fn modifiers(&self) -> KeyModifiers {
        match &self.data {
            EventData::Mouse(data) => data.modifiers,
            EventData::Wheel { modifiers, .. } => *modifiers,
            EventData::Key(data) => data.modifiers,
            _ => KeyModifiers::empty(),
        }
    }

    pub fn mouse_data(&self) -> Option<&MouseData> {
        match &self.data {
            EventData::Mouse(data) => Some(data),
            _ => None,
        }
    }

    pub fn key_data(&self) -> Option<&KeyData> {
        match &self.data {
            EventData::Key(data) => Some(data),
            _ => None,
        }
    }

    pub fn wheel_delta(&self) -> Option<Point> {
        match &self.data {
            EventData::Wheel { delta, .. } => Some(*delta),
            _ => None,
        }
    }

    /// The graphics context of a Paint event.
    pub fn graphics(&mut self) -> Option<&mut dyn Graphics> {
        match &mut self.data {
            EventData::Paint { gc, .. } => {
                let gc: &mut dyn Graphics = &mut **gc;
                Some(gc)
            }
            _ => None,
        }
    }

    /// The dirty rect of a Paint event, in the painted widget's coordinates.
    pub fn dirty_rect(&self) -> Option<Rect> {
        match &self.data {
            EventData::Paint { dirty, .. } => Some(*dirty),
            _ => None,
        }
    }

    /// Supply tooltip text. Only meaningful for ToolTip events.
    pub fn set_tooltip(&mut self, tooltip: impl Into<String>) {
        if let EventData::ToolTip { text, .. } = &mut self.data {
            *text = Some(tooltip.into());
        }
    }

    pub fn tooltip(&self) -> Option<&str> {
        match &self.data {
            EventData::ToolTip { text, .. } => text.as_deref(),
            _ => None,
        }
    }

    /// Choose the pointer shape. Only meaningful for UpdateCursor events.
    pub fn set_cursor(&mut self, new_cursor: Cursor) {
        if let EventData::Cursor { cursor, .. } = &mut self.data {
            *cursor = Some(new_cursor);
        }
    }

    pub fn cursor(&self) -> Option<Cursor> {
        match &self.data {
            EventData::Cursor { cursor, .. } => *cursor,
            _ => None,
        }
    }

    /// Veto a window close. Only meaningful for Closing events.
    pub fn abort(&mut self) {
        if let EventData::Closing { aborted } = &mut self.data {
            *aborted = true;
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self.data, EventData::Closing { aborted: true })
    }

    pub fn user_payload<T: Any>(&self) -> Option<&T> {
        match &self.data {
            EventData::User(payload) => payload.downcast_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} -> {}", self.event_type, self.target)
    }
}
