//! Size negotiation and child placement.
//!
//! A widget answers "how big do you want to be?" through a [`Sizer`]; a
//! container additionally positions its children through a [`Layout`].
//! Hints are per-axis: a negative value ([`NO_HINT`]) means the axis is
//! unconstrained.

mod flow;
mod precision;
mod precision_data;
mod scroll;

pub use flow::FlowLayout;
pub use precision::PrecisionLayout;
pub use precision_data::PrecisionData;
pub use scroll::{ScrollBehavior, ScrollLayout, ScrollViewport};

use crate::tree::{WidgetId, WidgetTree};
use trellis_core::geometry::Size;

/// Hint value meaning "no constraint on this axis".
pub const NO_HINT: f32 = -1.0;

/// Maximum extent reported by widgets that do not specify one.
pub const DEFAULT_MAX: f32 = 10000.0;

/// Whether a hint value constrains its axis.
pub(crate) fn hinted(value: f32) -> bool {
    value >= 0.0
}

/// Minimum, preferred and maximum size of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sizes {
    pub min: Size,
    pub pref: Size,
    pub max: Size,
}

impl Sizes {
    pub fn new(min: Size, pref: Size, max: Size) -> Self {
        Self { min, pref, max }
    }

    /// Min and pref as given, max expanded per [`default_max_size`].
    pub fn with_default_max(min: Size, pref: Size) -> Self {
        Self::new(min, pref, default_max_size(pref))
    }

    /// The same size for all three.
    pub fn fixed(size: Size) -> Self {
        Self::new(size, size, size)
    }
}

/// The larger of `pref` and [`DEFAULT_MAX`] on each axis.
pub fn default_max_size(pref: Size) -> Size {
    Size::new(pref.width.max(DEFAULT_MAX), pref.height.max(DEFAULT_MAX))
}

/// Reports the sizes a widget would like to have.
pub trait Sizer {
    /// `hint` constrains each axis unless negative.
    fn sizes(&self, tree: &WidgetTree, target: WidgetId, hint: Size) -> Sizes;
}

/// A [`Sizer`] that also positions the children of its widget.
pub trait Layout: Sizer {
    /// Assign bounds to every child of `target` within its current bounds.
    fn layout(&self, tree: &mut WidgetTree, target: WidgetId);
}

/// Placement of content within a larger extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    #[default]
    Start,
    Middle,
    End,
    /// Stretch to the full extent.
    Fill,
}

impl Alignment {
    /// Offset of an item of `size` aligned within `available`, never
    /// negative. `Fill` and `Start` both return 0.
    pub fn offset(self, size: f32, available: f32) -> f32 {
        match self {
            Alignment::Middle => ((available - size) / 2.0).max(0.0),
            Alignment::End => (available - size).max(0.0),
            Alignment::Start | Alignment::Fill => 0.0,
        }
    }
}
