//! Test utilities for the Trellis widget toolkit.
//!
//! Everything a test needs to drive a [`trellis_ui::Window`] without a
//! native window system:
//!
//! - [`MockBackend`] / [`MockPlatform`] - a window backend that records every
//!   outbound request and queues deferred tasks until the test runs them
//! - [`RecordingGraphics`] - a graphics context that records draw calls
//! - [`FixedSizer`], [`WrappingSizer`], [`CountingLayout`], [`Monospace`] -
//!   deterministic sizing for layout tests
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use trellis_test_utils::MockBackend;
//! use trellis_ui::{Theme, Window, WindowStyle};
//! use trellis_core::geometry::{Rect, Size};
//!
//! let backend = Rc::new(MockBackend::new(Rect::new(0.0, 0.0, 300.0, 200.0)));
//! let window = Window::with_backend(backend.clone(), WindowStyle::STANDARD, &Theme::default());
//!
//! assert_eq!(window.tree().size(window.root()), Size::new(300.0, 200.0));
//! ```
//!
//! # Interior Mutability
//!
//! The backend traits take `&self`, so the mocks keep their recordings behind
//! `parking_lot::Mutex`.

mod mock_backend;
mod mock_graphics;
mod sizers;

pub use mock_backend::{MockBackend, MockPlatform};
pub use mock_graphics::{GraphicsCall, RecordingGraphics};
pub use sizers::{CountingLayout, FixedSizer, Monospace, WrappingSizer};
