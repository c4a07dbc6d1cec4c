//! Stock widgets built on the tree, layout and event primitives.

mod label;
mod scroll_area;
mod scrollbar;

pub use label::Label;
pub use scroll_area::ScrollArea;
pub use scrollbar::{Orientation, ScrollBar, ScrollBarPart};
