//! Per-widget state flags.

use bitflags::bitflags;

bitflags! {
    /// State bits carried by every widget node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WidgetFlags: u8 {
        /// The widget's children must be laid out again before the next paint.
        const NEED_LAYOUT = 1 << 0;

        /// The widget ignores mouse button input.
        const DISABLED    = 1 << 1;

        /// The widget currently holds keyboard focus.
        const FOCUSED     = 1 << 2;

        /// The widget takes part in Tab focus traversal.
        const FOCUSABLE   = 1 << 3;
    }
}

impl Default for WidgetFlags {
    fn default() -> Self {
        WidgetFlags::NEED_LAYOUT
    }
}
