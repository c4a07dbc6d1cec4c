//! Trellis UI - retained-mode widget toolkit core
//!
//! This crate provides the platform-independent half of a desktop widget
//! toolkit:
//! - an arena widget tree with bounds, borders, backgrounds and flags
//! - event dispatch with per-widget handlers and cascading to ancestors
//! - size negotiation through sizers and layouts (flow, precision grid,
//!   scroll viewport)
//! - a window adapter translating native callbacks into events
//!
//! Rendering and native windows are supplied by the embedder through the
//! [`Graphics`], [`TextMeasurer`], [`WindowBackend`] and [`Platform`] traits.
//!
//! ## Quick Start
//!
//! ```rust
//! use trellis_ui::layout::{PrecisionData, PrecisionLayout, NO_HINT};
//! use trellis_ui::WidgetTree;
//! use trellis_core::geometry::{Rect, Size};
//!
//! let mut tree = WidgetTree::new();
//! let panel = tree.create_named("panel");
//! tree.set_layout(panel, PrecisionLayout::new().columns(2));
//!
//! for _ in 0..2 {
//!     let cell = tree.create();
//!     tree.set_layout_data(cell, PrecisionData::new().size_hint(Size::new(50.0, 20.0)));
//!     tree.add_child(panel, cell);
//! }
//!
//! let sizes = tree.sizes(panel, Size::new(NO_HINT, NO_HINT));
//! assert_eq!(sizes.pref, Size::new(104.0, 20.0));
//!
//! tree.set_bounds(panel, Rect::from_size(sizes.pref));
//! tree.validate_layout(panel);
//! assert_eq!(tree.bounds(tree.children(panel)[1]), Rect::new(54.0, 0.0, 50.0, 20.0));
//! ```

pub mod border;
pub mod cursor;
pub mod error;
pub mod event;
pub mod flags;
pub mod graphics;
pub mod layout;
pub mod theme;
pub mod tree;
pub mod widgets;
pub mod window;

pub use border::{Border, CompoundBorder, EmptyBorder, LineBorder};
pub use cursor::Cursor;
pub use error::{UiError, UiResult};
pub use event::{Event, EventData, EventType, KeyCode, KeyModifiers};
pub use flags::WidgetFlags;
pub use graphics::{FontDesc, Graphics, TextMeasurer};
pub use layout::{Alignment, FlowLayout, Layout, PrecisionData, PrecisionLayout, ScrollBehavior, Sizer, Sizes};
pub use theme::Theme;
pub use tree::{WidgetId, WidgetTree};
pub use widgets::{Label, ScrollArea, ScrollBar};
pub use window::{KeyEventKind, MouseEventKind, Platform, Task, Window, WindowBackend, WindowStyle};
