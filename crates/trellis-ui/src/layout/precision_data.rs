use super::{Alignment, NO_HINT};
use trellis_core::geometry::Size;

/// Per-child constraints for a [`PrecisionLayout`](super::PrecisionLayout).
///
/// Attach with [`WidgetTree::set_layout_data`](crate::tree::WidgetTree::set_layout_data).
/// Children without one get a default record the first time the grid lays
/// them out.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionData {
    /// Overrides the child's preferred size on each axis unless [`NO_HINT`].
    pub size_hint: Size,
    /// Overrides the child's minimum size on each axis unless [`NO_HINT`].
    pub min_size: Size,
    pub h_span: usize,
    pub v_span: usize,
    pub h_align: Alignment,
    pub v_align: Alignment,
    /// Take a share of surplus width.
    pub h_grab: bool,
    /// Take a share of surplus height.
    pub v_grab: bool,
}

impl Default for PrecisionData {
    fn default() -> Self {
        Self {
            size_hint: Size::new(NO_HINT, NO_HINT),
            min_size: Size::new(NO_HINT, NO_HINT),
            h_span: 1,
            v_span: 1,
            h_align: Alignment::Start,
            v_align: Alignment::Middle,
            h_grab: false,
            v_grab: false,
        }
    }
}

impl PrecisionData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn span(mut self, h_span: usize, v_span: usize) -> Self {
        self.h_span = h_span;
        self.v_span = v_span;
        self
    }

    pub fn h_span(mut self, span: usize) -> Self {
        self.h_span = span;
        self
    }

    pub fn v_span(mut self, span: usize) -> Self {
        self.v_span = span;
        self
    }

    pub fn align(mut self, h_align: Alignment, v_align: Alignment) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    pub fn h_align(mut self, align: Alignment) -> Self {
        self.h_align = align;
        self
    }

    pub fn v_align(mut self, align: Alignment) -> Self {
        self.v_align = align;
        self
    }

    pub fn grab(mut self, h_grab: bool, v_grab: bool) -> Self {
        self.h_grab = h_grab;
        self.v_grab = v_grab;
        self
    }

    pub fn h_grab(mut self, grab: bool) -> Self {
        self.h_grab = grab;
        self
    }

    pub fn v_grab(mut self, grab: bool) -> Self {
        self.v_grab = grab;
        self
    }

    pub fn size_hint(mut self, hint: Size) -> Self {
        self.size_hint = hint;
        self
    }

    pub fn min_size(mut self, size: Size) -> Self {
        self.min_size = size;
        self
    }

    /// Fill and grab horizontally.
    pub fn fill_horizontal(self) -> Self {
        self.h_align(Alignment::Fill).h_grab(true)
    }

    /// Fill and grab on both axes.
    pub fn fill(self) -> Self {
        self.align(Alignment::Fill, Alignment::Fill).grab(true, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let data = PrecisionData::default();
        assert_eq!((data.h_span, data.v_span), (1, 1));
        assert_eq!(data.h_align, Alignment::Start);
        assert_eq!(data.v_align, Alignment::Middle);
        assert_eq!(data.size_hint, Size::new(NO_HINT, NO_HINT));
        assert!(!data.h_grab && !data.v_grab);
    }

    #[test]
    fn fill_sets_alignment_and_grab() {
        let data = PrecisionData::new().fill();
        assert_eq!(data.h_align, Alignment::Fill);
        assert_eq!(data.v_align, Alignment::Fill);
        assert!(data.h_grab && data.v_grab);
    }
}
