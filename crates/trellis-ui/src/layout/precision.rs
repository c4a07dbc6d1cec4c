//! Grid layout with row/column spanning and surplus apportionment.
//!
//! Every pass runs the same pipeline over a private copy of the children's
//! constraints:
//!
//! 1. measure each child and assemble the grid, wrapping rows as spans demand;
//! 2. resolve column widths, apportioning any width hint across grabbing
//!    columns;
//! 3. re-measure children whose effective width changed so wrapping content
//!    reports its height at the new width;
//! 4. resolve row heights the same way;
//! 5. when laying out, place each child inside its cell.
//!
//! [`Sizer::sizes`] runs the pipeline without placing anything, so measuring
//! a container never disturbs its children.

use super::{Alignment, Layout, NO_HINT, PrecisionData, Sizer, Sizes, hinted};
use crate::theme::Theme;
use crate::tree::{WidgetId, WidgetTree};
use trellis_core::geometry::{Point, Rect, Size};
use trellis_core::profiling::profile_function;

/// Residual below which apportionment counts as converged.
const TOLERANCE: f32 = 0.01;

/// Upper bound on apportionment passes per axis.
const MAX_APPORTION_PASSES: usize = 64;

/// Arranges children in a grid of a fixed number of columns.
///
/// ```
/// use trellis_ui::layout::{Alignment, PrecisionLayout};
///
/// let layout = PrecisionLayout::new()
///     .columns(3)
///     .spacing(8.0, 4.0)
///     .h_alignment(Alignment::Middle);
/// assert_eq!(layout.column_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionLayout {
    columns: usize,
    h_spacing: f32,
    v_spacing: f32,
    h_align: Alignment,
    v_align: Alignment,
    equal_columns: bool,
}

impl Default for PrecisionLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl PrecisionLayout {
    /// One column with the stock spacing of 4 horizontally and 2 vertically.
    pub fn new() -> Self {
        Self {
            columns: 1,
            h_spacing: 4.0,
            v_spacing: 2.0,
            h_align: Alignment::Start,
            v_align: Alignment::Start,
            equal_columns: false,
        }
    }

    /// One column with the spacing configured in `theme`.
    pub fn themed(theme: &Theme) -> Self {
        Self::new().spacing(theme.precision.h_spacing, theme.precision.v_spacing)
    }

    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn spacing(mut self, horizontal: f32, vertical: f32) -> Self {
        self.h_spacing = horizontal;
        self.v_spacing = vertical;
        self
    }

    /// Placement of the whole grid when it is narrower than the container.
    pub fn h_alignment(mut self, alignment: Alignment) -> Self {
        self.h_align = alignment;
        self
    }

    /// Placement of the whole grid when it is shorter than the container.
    pub fn v_alignment(mut self, alignment: Alignment) -> Self {
        self.v_align = alignment;
        self
    }

    /// Give every column the same width.
    pub fn equal_columns(mut self, equal: bool) -> Self {
        self.equal_columns = equal;
        self
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn h_spacing(&self) -> f32 {
        self.h_spacing
    }

    pub fn v_spacing(&self) -> f32 {
        self.v_spacing
    }

    fn solve(&self, tree: &WidgetTree, target: WidgetId, hint: Size, use_minimum: bool) -> Option<Grid> {
        profile_function!();
        if self.columns == 0 {
            return None;
        }
        let children = tree.children(target);
        let mut cells: Vec<Cell> = children
            .iter()
            .map(|&id| {
                let data = tree.layout_data::<PrecisionData>(id).cloned().unwrap_or_default();
                Cell::new(id, data, self.columns, children.len())
            })
            .collect();
        if cells.is_empty() {
            return None;
        }
        for cell in &mut cells {
            cell.compute_cache_size(tree, Size::new(NO_HINT, NO_HINT), use_minimum);
        }
        let rows = assemble(&mut cells, self.columns);
        let widths = resolve_tracks(
            self.columns,
            &column_tracks(&cells),
            self.h_spacing,
            hint.width,
            self.equal_columns,
        );
        if hinted(hint.width) {
            self.rewrap(tree, &mut cells, &widths, use_minimum);
        }
        let heights = resolve_tracks(rows, &row_tracks(&cells), self.v_spacing, hint.height, false);
        Some(Grid { cells, widths, heights })
    }

    fn rewrap(&self, tree: &WidgetTree, cells: &mut [Cell], widths: &[f32], use_minimum: bool) {
        for cell in cells.iter_mut() {
            if hinted(cell.data.size_hint.height) {
                continue;
            }
            let current = span_extent(widths, cell.column, cell.h_span, self.h_spacing);
            let fill_mismatch = current != cell.cache.width && cell.data.h_align == Alignment::Fill;
            if fill_mismatch || cell.cache.width > current {
                let width = cell.cache_min.width.max(current);
                cell.compute_cache_size(tree, Size::new(width, NO_HINT), use_minimum);
                let min_height = cell.data.min_size.height;
                if cell.data.v_grab && min_height > 0.0 && cell.cache.height < min_height {
                    cell.cache.height = min_height;
                }
            }
        }
    }

    fn total_size(&self, grid: &Grid) -> Size {
        let width = grid.widths.iter().sum::<f32>() + gaps(grid.widths.len(), self.h_spacing);
        let height = grid.heights.iter().sum::<f32>() + gaps(grid.heights.len(), self.v_spacing);
        Size::new(width, height)
    }

    fn measure(&self, tree: &WidgetTree, target: WidgetId, hint: Size, use_minimum: bool) -> Size {
        self.solve(tree, target, hint, use_minimum)
            .map(|grid| self.total_size(&grid))
            .unwrap_or_default()
    }

    fn position(&self, tree: &mut WidgetTree, grid: &Grid, mut location: Point, hint: Size) {
        let total = self.total_size(grid);
        if total.width < hint.width {
            location.x += match self.h_align {
                Alignment::Middle => ((hint.width - total.width) / 2.0).round(),
                Alignment::End => hint.width - total.width,
                Alignment::Start | Alignment::Fill => 0.0,
            };
        }
        if total.height < hint.height {
            location.y += match self.v_align {
                Alignment::Middle => ((hint.height - total.height) / 2.0).round(),
                Alignment::End => hint.height - total.height,
                Alignment::Start | Alignment::Fill => 0.0,
            };
        }
        let xs = track_origins(&grid.widths, location.x, self.h_spacing);
        let ys = track_origins(&grid.heights, location.y, self.v_spacing);
        for cell in &grid.cells {
            let cell_width = span_extent(&grid.widths, cell.column, cell.h_span, self.h_spacing);
            let cell_height = span_extent(&grid.heights, cell.row, cell.v_span, self.v_spacing);
            let (x, width) = place(cell.data.h_align, xs[cell.column], cell.cache.width, cell_width);
            let (y, height) = place(cell.data.v_align, ys[cell.row], cell.cache.height, cell_height);
            tree.set_bounds(cell.id, Rect::new(x, y, width, height));
        }
    }
}

impl Sizer for PrecisionLayout {
    fn sizes(&self, tree: &WidgetTree, target: WidgetId, hint: Size) -> Sizes {
        let insets = tree.insets(target);
        let min = self.measure(tree, target, Size::new(NO_HINT, NO_HINT), true);
        let pref_hint = Size::new(
            if hinted(hint.width) { (hint.width - insets.width()).max(0.0) } else { NO_HINT },
            if hinted(hint.height) { (hint.height - insets.height()).max(0.0) } else { NO_HINT },
        );
        let pref = self.measure(tree, target, pref_hint, false);
        Sizes::with_default_max(min.add_insets(insets), pref.add_insets(insets))
    }
}

impl Layout for PrecisionLayout {
    fn layout(&self, tree: &mut WidgetTree, target: WidgetId) {
        profile_function!();
        for child in tree.children(target).to_vec() {
            tree.ensure_layout_data::<PrecisionData>(child);
        }
        let insets = tree.insets(target);
        let size = tree.size(target).subtract_insets(insets);
        let hint = Size::new(size.width.max(0.0), size.height.max(0.0));
        if let Some(grid) = self.solve(tree, target, hint, false) {
            tracing::trace!(
                "precision layout of {}: widths {:?}, heights {:?}",
                tree.describe(target),
                grid.widths,
                grid.heights
            );
            self.position(tree, &grid, Point::new(insets.left, insets.top), hint);
        }
    }
}

/// Working state for one child during a single pass.
#[derive(Debug, Clone)]
struct Cell {
    id: WidgetId,
    data: PrecisionData,
    h_span: usize,
    v_span: usize,
    row: usize,
    column: usize,
    cache: Size,
    cache_min: Size,
}

impl Cell {
    /// Spans are clamped to the grid: `h_span` to the column count and
    /// `v_span` to one row per child, the most rows the children can fill.
    fn new(id: WidgetId, data: PrecisionData, columns: usize, max_rows: usize) -> Self {
        let h_span = data.h_span.clamp(1, columns);
        let v_span = data.v_span.clamp(1, max_rows.max(1));
        Self {
            id,
            data,
            h_span,
            v_span,
            row: 0,
            column: 0,
            cache: Size::ZERO,
            cache_min: Size::ZERO,
        }
    }

    fn compute_cache_size(&mut self, tree: &WidgetTree, hint: Size, use_minimum: bool) {
        let sizes = tree.sizes(self.id, hint);
        let data = &self.data;
        self.cache_min = Size::new(
            if hinted(data.min_size.width) { data.min_size.width } else { sizes.min.width },
            if hinted(data.min_size.height) { data.min_size.height } else { sizes.min.height },
        );
        let mut hint = hint;
        if hinted(hint.width) {
            hint.width = hint.width.max(self.cache_min.width).min(sizes.max.width);
        }
        if hinted(hint.height) {
            hint.height = hint.height.max(self.cache_min.height).min(sizes.max.height);
        }
        let mut cache = if use_minimum { sizes.min } else { sizes.pref };
        cache.width = resolve_cache_axis(cache.width, hint.width, data.size_hint.width, data.min_size.width);
        cache.height = resolve_cache_axis(cache.height, hint.height, data.size_hint.height, data.min_size.height);
        self.cache = cache;
    }

    fn last_column(&self) -> usize {
        self.column + self.h_span - 1
    }

    fn last_row(&self) -> usize {
        self.row + self.v_span - 1
    }
}

fn resolve_cache_axis(measured: f32, hint: f32, size_hint: f32, min_size: f32) -> f32 {
    if hinted(hint) {
        return hint;
    }
    let mut value = if hinted(size_hint) { size_hint } else { measured };
    if hinted(min_size) && value < min_size {
        value = min_size;
    }
    value
}

/// The solved grid of one pass.
struct Grid {
    cells: Vec<Cell>,
    widths: Vec<f32>,
    heights: Vec<f32>,
}

/// Assign each cell the first free run of its span, scanning row-major from
/// where the previous child ended. Returns the number of rows.
fn assemble(cells: &mut [Cell], columns: usize) -> usize {
    let mut occupied: Vec<Vec<bool>> = Vec::new();
    let (mut row, mut column) = (0, 0);
    for cell in cells.iter_mut() {
        loop {
            while occupied.len() < row + cell.v_span {
                occupied.push(vec![false; columns]);
            }
            if column + cell.h_span > columns {
                row += 1;
                column = 0;
                continue;
            }
            let free = occupied[row..row + cell.v_span]
                .iter()
                .all(|cells_in_row| cells_in_row[column..column + cell.h_span].iter().all(|taken| !taken));
            if free {
                break;
            }
            column += 1;
        }
        for cells_in_row in &mut occupied[row..row + cell.v_span] {
            for taken in &mut cells_in_row[column..column + cell.h_span] {
                *taken = true;
            }
        }
        cell.row = row;
        cell.column = column;
        column += cell.h_span;
    }
    occupied.len()
}

/// One child's demand on a single axis.
#[derive(Debug, Clone, Copy)]
struct Track {
    start: usize,
    span: usize,
    size: f32,
    /// Minimum contributed when the child occupies a single track.
    unit_min: Option<f32>,
    /// Minimum contributed when the child spans several tracks.
    span_min: Option<f32>,
    grab: bool,
}

impl Track {
    fn last(&self) -> usize {
        self.start + self.span - 1
    }
}

fn column_tracks(cells: &[Cell]) -> Vec<Track> {
    let mut tracks: Vec<(usize, Track)> = cells
        .iter()
        .map(|cell| {
            let grab = cell.data.h_grab;
            let min = cell.cache_min.width;
            let contributes = !grab || min != 0.0;
            (
                cell.last_row(),
                Track {
                    start: cell.column,
                    span: cell.h_span,
                    size: cell.cache.width,
                    unit_min: contributes.then_some(min),
                    span_min: contributes.then_some(if grab { min } else { cell.cache.width }),
                    grab,
                },
            )
        })
        .collect();
    tracks.sort_by_key(|(row, _)| *row);
    tracks.into_iter().map(|(_, track)| track).collect()
}

/// Row demands. Unlike columns, a row's minimum is the cell's preferred
/// height unless it grabs and carries an explicit minimum height.
fn row_tracks(cells: &[Cell]) -> Vec<Track> {
    let mut tracks: Vec<(usize, Track)> = cells
        .iter()
        .map(|cell| {
            let grab = cell.data.v_grab;
            let min_height = cell.data.min_size.height;
            let contributes = !grab || min_height != 0.0;
            let min = if grab && hinted(min_height) { min_height } else { cell.cache.height };
            (
                cell.last_column(),
                Track {
                    start: cell.row,
                    span: cell.v_span,
                    size: cell.cache.height,
                    unit_min: contributes.then_some(min),
                    span_min: contributes.then_some(min),
                    grab,
                },
            )
        })
        .collect();
    tracks.sort_by_key(|(column, _)| *column);
    tracks.into_iter().map(|(_, track)| track).collect()
}

/// Total spacing between `count` adjacent tracks.
fn gaps(count: usize, spacing: f32) -> f32 {
    count.saturating_sub(1) as f32 * spacing
}

fn span_extent(sizes: &[f32], start: usize, span: usize, spacing: f32) -> f32 {
    let end = (start + span).min(sizes.len());
    sizes[start..end].iter().sum::<f32>() + gaps(end - start, spacing)
}

fn track_origins(sizes: &[f32], origin: f32, spacing: f32) -> Vec<f32> {
    let mut position = origin;
    sizes
        .iter()
        .map(|size| {
            let start = position;
            position += size + spacing;
            start
        })
        .collect()
}

fn place(alignment: Alignment, origin: f32, natural: f32, available: f32) -> (f32, f32) {
    match alignment {
        Alignment::Fill => (origin, available),
        other => {
            let size = natural.min(available);
            (origin + other.offset(size, available), size)
        }
    }
}

/// Add `extra` to the tracks of a span ending at `last`: split evenly among
/// its expanding tracks, or entirely onto `last` when none expand.
fn apportion(extra: f32, last: usize, span: usize, expand_count: usize, expand: &[bool], values: &mut [f32]) {
    if expand_count == 0 {
        values[last] += extra;
        return;
    }
    let share = extra / expand_count as f32;
    for index in (last + 1 - span)..=last {
        if expand[index] {
            values[index] += share;
        }
    }
}

/// Resolve the extent of `count` tracks (columns or rows) from the demands
/// in `items`, then spread `hint` (if any) across the expanding tracks.
fn resolve_tracks(count: usize, items: &[Track], spacing: f32, hint: f32, equal: bool) -> Vec<f32> {
    let mut sizes = vec![0.0f32; count];
    let mut mins = vec![0.0f32; count];
    let mut expand = vec![false; count];
    let mut expand_count = 0;

    for index in 0..count {
        for item in items.iter().filter(|item| item.span == 1 && item.start == index) {
            sizes[index] = sizes[index].max(item.size);
            if item.grab && !expand[index] {
                expand[index] = true;
                expand_count += 1;
            }
            if let Some(min) = item.unit_min {
                mins[index] = mins[index].max(min);
            }
        }
        for item in items.iter().filter(|item| item.span > 1 && item.last() == index) {
            let range = item.start..=index;
            let span_size: f32 = sizes[range.clone()].iter().sum();
            let span_min: f32 = mins[range.clone()].iter().sum();
            let span_expand = expand[range.clone()].iter().filter(|flag| **flag).count();
            if item.grab && span_expand == 0 {
                expand[index] = true;
                expand_count += 1;
            }
            let extra = item.size - span_size - gaps(item.span, spacing);
            if extra > 0.0 {
                if equal {
                    let each = ((extra + span_size) / item.span as f32).floor();
                    for size in &mut sizes[range.clone()] {
                        *size = size.max(each);
                    }
                } else {
                    apportion(extra, index, item.span, span_expand, &expand, &mut sizes);
                }
            }
            if let Some(min) = item.span_min {
                let extra = min - span_min - gaps(item.span, spacing);
                if extra > 0.0 {
                    apportion(extra, index, item.span, span_expand, &expand, &mut mins);
                }
            }
        }
    }

    let available = hint - gaps(count, spacing);
    if equal {
        let min_track = mins.iter().copied().fold(0.0, f32::max);
        let mut track = sizes.iter().copied().fold(0.0, f32::max);
        if hinted(hint) && expand_count > 0 {
            track = min_track.max((available / count as f32).floor());
        }
        sizes.fill(track);
    } else if hinted(hint) && expand_count > 0 {
        distribute(&mut sizes, &mins, &mut expand, expand_count, items, spacing, available);
    }
    sizes
}

/// Iteratively move `sizes` toward summing to `available` by adjusting the
/// expanding tracks. A track that would fall below its minimum is pinned
/// there and leaves the expanding set.
fn distribute(
    sizes: &mut [f32],
    mins: &[f32],
    expand: &mut [bool],
    expand_count: usize,
    items: &[Track],
    spacing: f32,
    available: f32,
) {
    let mut remaining = expand_count;
    let mut total: f32 = sizes.iter().sum();
    for _ in 0..MAX_APPORTION_PASSES {
        if (total - available).abs() <= TOLERANCE {
            return;
        }
        let delta = (available - total) / remaining as f32;
        let mut retired = 0;
        for index in 0..sizes.len() {
            if !expand[index] {
                continue;
            }
            if sizes[index] + delta > mins[index] {
                sizes[index] += delta;
            } else {
                sizes[index] = mins[index];
                expand[index] = false;
                remaining -= 1;
                retired += 1;
            }
        }
        for item in items.iter().filter(|item| item.span > 1) {
            let Some(min) = item.span_min else {
                continue;
            };
            let range = item.start..=item.last();
            let span_size: f32 = sizes[range.clone()].iter().sum();
            let span_expand = expand[range].iter().filter(|flag| **flag).count();
            let extra = min - span_size - gaps(item.span, spacing);
            if extra > 0.0 {
                apportion(extra, item.last(), item.span, span_expand, expand, sizes);
            }
        }
        if remaining == 0 {
            return;
        }
        let new_total: f32 = sizes.iter().sum();
        if retired == 0 && (new_total - total).abs() <= TOLERANCE {
            // Spanning minimums undo every adjustment; nothing left to gain.
            return;
        }
        total = new_total;
    }
    tracing::warn!(
        "grid apportionment stopped after {} passes without converging",
        MAX_APPORTION_PASSES
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(start: usize, span: usize, size: f32, grab: bool) -> Track {
        Track {
            start,
            span,
            size,
            unit_min: Some(0.0),
            span_min: Some(size),
            grab,
        }
    }

    #[test]
    fn unit_tracks_take_max_size() {
        let items = [track(0, 1, 30.0, false), track(0, 1, 50.0, false), track(1, 1, 10.0, false)];
        assert_eq!(resolve_tracks(2, &items, 4.0, NO_HINT, false), vec![50.0, 10.0]);
    }

    #[test]
    fn span_shortfall_lands_on_last_track_without_expanders() {
        let items = [track(0, 1, 20.0, false), track(1, 1, 20.0, false), track(0, 2, 100.0, false)];
        let sizes = resolve_tracks(2, &items, 4.0, NO_HINT, false);
        assert_eq!(sizes, vec![20.0, 76.0]);
    }

    #[test]
    fn span_shortfall_splits_across_expanders() {
        let items = [track(0, 1, 20.0, true), track(1, 1, 20.0, true), track(0, 2, 104.0, false)];
        let sizes = resolve_tracks(2, &items, 4.0, NO_HINT, false);
        assert_eq!(sizes, vec![50.0, 50.0]);
    }

    #[test]
    fn hint_is_spread_over_expanders() {
        let items = [track(0, 1, 50.0, false), track(1, 1, 50.0, true)];
        let sizes = resolve_tracks(2, &items, 4.0, 254.0, false);
        assert_eq!(sizes, vec![50.0, 200.0]);
    }

    #[test]
    fn shrinking_pins_tracks_at_their_minimum() {
        let mut items = [track(0, 1, 100.0, true), track(1, 1, 100.0, true)];
        items[0].unit_min = Some(80.0);
        let sizes = resolve_tracks(2, &items, 0.0, 120.0, false);
        assert_eq!(sizes[0], 80.0);
        assert!((sizes[1] - 40.0).abs() <= TOLERANCE);
    }

    #[test]
    fn all_column_spans_without_expanders_terminate() {
        let items: Vec<Track> = (0..8).map(|i| track(0, 3, 100.0 + i as f32, false)).collect();
        let sizes = resolve_tracks(3, &items, 4.0, 50.0, false);
        assert_eq!(sizes[0], 0.0);
        assert_eq!(sizes[1], 0.0);
        assert_eq!(sizes[2], 107.0 - 8.0);
    }

    #[test]
    fn spanning_minimum_that_undoes_shrinking_terminates() {
        let mut items = vec![track(0, 1, 50.0, true), track(1, 1, 50.0, true), track(0, 2, 300.0, false)];
        items[2].span_min = Some(300.0);
        let sizes = resolve_tracks(2, &items, 4.0, 100.0, false);
        assert_eq!(sizes.iter().sum::<f32>() + 4.0, 300.0);
    }

    #[test]
    fn equal_mode_uses_widest_track() {
        let items = [track(0, 1, 30.0, false), track(1, 1, 70.0, false)];
        assert_eq!(resolve_tracks(2, &items, 4.0, NO_HINT, true), vec![70.0, 70.0]);
    }

    #[test]
    fn equal_mode_divides_hint_when_expanding() {
        let items = [track(0, 1, 30.0, true), track(1, 1, 70.0, false)];
        assert_eq!(resolve_tracks(2, &items, 4.0, 304.0, true), vec![150.0, 150.0]);
    }
}
