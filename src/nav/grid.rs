//! Focus movement across the rows of a grid.
//!
//! Every call is a pure function of the grid snapshot, the viewport, the
//! current position and the requested direction. Nothing is cached here;
//! the persisted [`FocusPosition`] lives in the grid controller.

use tracing::{debug, trace};

use super::row::CellOccupancy;
use crate::layout::{RowGeometry, Viewport};
use crate::types::{FocusPosition, GridDirection, NavTarget};

/// Read-only view of the grid the navigators work on.
///
/// Rows and cells past the end report as empty, geometry as `None`.
pub trait GridSnapshot {
    fn row_count(&self) -> usize;
    fn cell_count(&self, row: usize) -> usize;
    fn is_occupied(&self, row: usize, column: usize) -> bool;
    fn row_geometry(&self, row: usize) -> Option<RowGeometry>;
    fn viewport(&self) -> Viewport;
}

/// One row of a [`GridSnapshot`], seen through [`CellOccupancy`].
pub struct RowCells<'a, G: ?Sized> {
    grid: &'a G,
    row: usize,
}

impl<'a, G: GridSnapshot + ?Sized> RowCells<'a, G> {
    pub fn new(grid: &'a G, row: usize) -> Self {
        Self { grid, row }
    }
}

impl<G: GridSnapshot + ?Sized> CellOccupancy for RowCells<'_, G> {
    fn cell_count(&self) -> usize {
        self.grid.cell_count(self.row)
    }

    fn is_occupied(&self, column: usize) -> bool {
        self.grid.is_occupied(self.row, column)
    }
}

/// Resolves vertical, page and Ctrl+Home/End moves.
pub struct GridNavigator<'a, G: ?Sized> {
    grid: &'a G,
    viewport: Viewport,
    declared_columns: Option<usize>,
    sticky_header_offset: f64,
}

impl<'a, G: GridSnapshot + ?Sized> GridNavigator<'a, G> {
    pub fn new(grid: &'a G) -> Self {
        Self {
            grid,
            viewport: grid.viewport(),
            declared_columns: None,
            sticky_header_offset: 0.0,
        }
    }

    /// Override the viewport snapshot taken from the grid.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Number of declared columns; Ctrl+End is only resolved when known.
    #[must_use]
    pub fn with_declared_columns(mut self, columns: Option<usize>) -> Self {
        self.declared_columns = columns;
        self
    }

    /// Height of an active sticky header, subtracted from page-down offsets.
    #[must_use]
    pub fn with_sticky_header_offset(mut self, offset: f64) -> Self {
        self.sticky_header_offset = offset;
        self
    }

    /// Resolve the next focus target.
    ///
    /// Returns `None` only for Ctrl+End without declared columns, which the
    /// grid leaves unhandled. An empty grid always resolves to the origin.
    pub fn next_focus(
        &self,
        current: FocusPosition,
        direction: GridDirection,
    ) -> Option<NavTarget> {
        let row_count = self.grid.row_count();
        if row_count == 0 {
            trace!(?direction, "empty grid, resolving to origin");
            return Some(NavTarget::origin());
        }

        let column = current.column_index;
        let target = match direction {
            GridDirection::Up => {
                NavTarget::new(self.step_up(current, row_count), column, true)
            }
            GridDirection::Down => {
                NavTarget::new(self.step_down(current, row_count), column, true)
            }
            GridDirection::PageUp => self.page_up(current, row_count),
            GridDirection::PageDown => self.page_down(current, row_count),
            GridDirection::Home => NavTarget::new(0, 0, true),
            GridDirection::End => {
                let columns = self.declared_columns?;
                NavTarget::new(row_count - 1, columns.saturating_sub(1), true)
            }
        };
        debug!(
            ?direction,
            from_row = current.row_index,
            from_column = column,
            to_row = target.row_index,
            to_column = target.column_index,
            scroll_to = ?target.scroll_to,
            "resolved grid move"
        );
        Some(target)
    }

    fn step_up(&self, current: FocusPosition, row_count: usize) -> usize {
        (0..current.row_index.min(row_count))
            .rev()
            .find(|&row| self.grid.is_occupied(row, current.column_index))
            .unwrap_or(current.row_index)
    }

    fn step_down(&self, current: FocusPosition, row_count: usize) -> usize {
        (current.row_index.saturating_add(1)..row_count)
            .find(|&row| self.grid.is_occupied(row, current.column_index))
            .unwrap_or(current.row_index)
    }

    /// First occupied row in the column, scanning from the top.
    fn first_occupied(&self, current: FocusPosition, row_count: usize) -> usize {
        (0..row_count)
            .find(|&row| self.grid.is_occupied(row, current.column_index))
            .unwrap_or(current.row_index)
    }

    /// Last occupied row in the column, scanning from the bottom.
    fn last_occupied(&self, current: FocusPosition, row_count: usize) -> usize {
        (0..row_count)
            .rev()
            .find(|&row| self.grid.is_occupied(row, current.column_index))
            .unwrap_or(current.row_index)
    }

    fn page_up(&self, current: FocusPosition, row_count: usize) -> NavTarget {
        let column = current.column_index;
        let candidate = self.first_occupied(current, row_count);
        if current.row_index == 0 {
            return NavTarget::new(candidate, column, false);
        }

        // Walk up from the candidate to the first row starting above the
        // visible area and scroll so that row ends at the viewport bottom.
        let scrolled = (0..=candidate.min(row_count - 1)).rev().find_map(|row| {
            let geometry = self.grid.row_geometry(row)?;
            (geometry.top < self.viewport.scroll_top).then(|| {
                let offset = geometry.bottom() - self.viewport.client_height;
                (row, offset)
            })
        });

        match scrolled {
            Some((row, offset)) => {
                trace!(row, offset, "page up scrolls");
                // The scan never goes below the candidate, so the bound keeps
                // the candidate row.
                NavTarget::new(candidate.max(row), column, false).with_scroll_to(Some(offset))
            }
            None => NavTarget::new(candidate, column, false),
        }
    }

    fn page_down(&self, current: FocusPosition, row_count: usize) -> NavTarget {
        let column = current.column_index;
        let candidate = self.last_occupied(current, row_count);
        let grid_bottom = self.viewport.bottom();
        let last_row_visible = self
            .grid
            .row_geometry(row_count - 1)
            .map_or(true, |last| last.bottom() <= grid_bottom);

        if current.row_index >= candidate || last_row_visible {
            return NavTarget::new(candidate, column, false);
        }

        // Walk down from the candidate to the first row ending below the
        // visible area and scroll it to the top, under any sticky header.
        let scrolled = (candidate..row_count).find_map(|row| {
            let geometry = self.grid.row_geometry(row)?;
            (geometry.bottom() > grid_bottom)
                .then(|| (row, geometry.top - self.sticky_header_offset))
        });

        match scrolled {
            Some((row, offset)) => {
                trace!(row, offset, "page down scrolls");
                NavTarget::new(candidate.min(row), column, false).with_scroll_to(Some(offset))
            }
            None => NavTarget::new(candidate, column, false),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    /// Uniform-height grid backed by an occupancy matrix.
    struct TestGrid {
        cells: Vec<Vec<bool>>,
        row_height: f64,
        viewport: Viewport,
    }

    impl TestGrid {
        fn full(rows: usize, cols: usize) -> Self {
            Self::from_cells(vec![vec![true; cols]; rows])
        }

        fn from_cells(cells: Vec<Vec<bool>>) -> Self {
            let row_height = 20.0;
            let total = row_height * cells.len() as f64;
            Self {
                cells,
                row_height,
                viewport: Viewport::new(0.0, 60.0, total),
            }
        }

        fn scrolled(mut self, scroll_top: f64) -> Self {
            self.viewport.scroll_top = scroll_top;
            self
        }
    }

    impl GridSnapshot for TestGrid {
        fn row_count(&self) -> usize {
            self.cells.len()
        }

        fn cell_count(&self, row: usize) -> usize {
            self.cells.get(row).map_or(0, Vec::len)
        }

        fn is_occupied(&self, row: usize, column: usize) -> bool {
            self.cells
                .get(row)
                .and_then(|cells| cells.get(column))
                .copied()
                .unwrap_or(false)
        }

        fn row_geometry(&self, row: usize) -> Option<RowGeometry> {
            (row < self.cells.len())
                .then(|| RowGeometry::new(row as f64 * self.row_height, self.row_height))
        }

        fn viewport(&self) -> Viewport {
            self.viewport
        }
    }

    fn resolve(grid: &TestGrid, row: usize, column: usize, direction: GridDirection) -> NavTarget {
        GridNavigator::new(grid)
            .with_declared_columns(Some(grid.cell_count(0)))
            .next_focus(FocusPosition::new(row, column), direction)
            .unwrap()
    }

    #[test]
    fn test_empty_grid_resolves_to_origin() {
        let grid = TestGrid::from_cells(Vec::new());
        for direction in [
            GridDirection::Up,
            GridDirection::Down,
            GridDirection::PageUp,
            GridDirection::PageDown,
            GridDirection::Home,
            GridDirection::End,
        ] {
            let target = GridNavigator::new(&grid)
                .next_focus(FocusPosition::new(3, 2), direction)
                .unwrap();
            assert_eq!(target, NavTarget::origin(), "{direction:?}");
            assert_eq!(target.scroll_to, None);
        }
    }

    #[test]
    fn test_down_one_row() {
        let grid = TestGrid::full(5, 4);
        let target = resolve(&grid, 2, 1, GridDirection::Down);
        assert_eq!(target.position(), FocusPosition::new(3, 1));
        assert_eq!(target.scroll_to, None);
    }

    #[test]
    fn test_down_skips_empty_rows() {
        let mut cells = vec![vec![true; 4]; 5];
        for row in 1..=3 {
            cells[row][1] = false;
        }
        let grid = TestGrid::from_cells(cells);
        let target = resolve(&grid, 0, 1, GridDirection::Down);
        assert_eq!(target.position(), FocusPosition::new(4, 1));

        let target = resolve(&grid, 4, 1, GridDirection::Up);
        assert_eq!(target.position(), FocusPosition::new(0, 1));
    }

    #[test]
    fn test_vertical_moves_revert_at_boundaries() {
        let mut cells = vec![vec![true; 3]; 4];
        cells[2][0] = false;
        cells[3][0] = false;
        let grid = TestGrid::from_cells(cells);

        // Nothing occupied below row 1 in column 0.
        assert_eq!(resolve(&grid, 1, 0, GridDirection::Down).row_index, 1);
        // Already at the edges.
        assert_eq!(resolve(&grid, 0, 2, GridDirection::Up).row_index, 0);
        assert_eq!(resolve(&grid, 3, 2, GridDirection::Down).row_index, 3);
    }

    #[test]
    fn test_up_from_stale_row_terminates() {
        let grid = TestGrid::from_cells(vec![vec![false; 2]; 3]);
        let target = resolve(&grid, usize::MAX, 0, GridDirection::Up);
        assert_eq!(target.row_index, usize::MAX);
    }

    #[test]
    fn test_ctrl_home_and_end() {
        let grid = TestGrid::full(3, 3);
        let home = resolve(&grid, 2, 2, GridDirection::Home);
        assert_eq!(home, NavTarget::new(0, 0, true));

        let end = GridNavigator::new(&grid)
            .with_declared_columns(Some(5))
            .next_focus(FocusPosition::new(1, 2), GridDirection::End)
            .unwrap();
        assert_eq!(end, NavTarget::new(2, 4, true));
    }

    #[test]
    fn test_ctrl_end_without_columns_is_unhandled() {
        let grid = TestGrid::full(3, 3);
        let end = GridNavigator::new(&grid).next_focus(FocusPosition::new(1, 1), GridDirection::End);
        assert_eq!(end, None);
    }

    #[test]
    fn test_page_up_at_first_row_does_not_scroll() {
        let mut cells = vec![vec![true; 2]; 6];
        cells[0][1] = false;
        let grid = TestGrid::from_cells(cells);
        let target = resolve(&grid, 0, 1, GridDirection::PageUp);
        assert_eq!(target, NavTarget::new(1, 1, false));
    }

    #[test]
    fn test_page_up_scrolls_when_candidate_is_above_view() {
        // 10 rows of 20px, 60px viewport scrolled to row 5.
        let grid = TestGrid::full(10, 2).scrolled(100.0);
        let target = resolve(&grid, 6, 0, GridDirection::PageUp);
        // Candidate is row 0, which starts above scroll_top; it is aligned to
        // the viewport bottom.
        assert_eq!(target.row_index, 0);
        assert!(!target.scroll_into_view);
        assert_eq!(target.scroll_to, Some(20.0 - 60.0));
    }

    #[test]
    fn test_page_up_keeps_candidate_row_after_scan() {
        // Column 0 empty in rows 0..3: candidate is row 3 and the scan finds
        // row 3 as well (top 60 < scroll_top 80). The max() bound keeps it.
        let mut cells = vec![vec![true; 2]; 10];
        for row in cells.iter_mut().take(3) {
            row[0] = false;
        }
        let grid = TestGrid::from_cells(cells).scrolled(80.0);
        let target = resolve(&grid, 7, 0, GridDirection::PageUp);
        assert_eq!(target.row_index, 3);
        assert_eq!(target.scroll_to, Some(80.0 - 60.0));
    }

    #[test]
    fn test_page_up_without_rows_above_view() {
        let grid = TestGrid::full(10, 2);
        let target = resolve(&grid, 2, 1, GridDirection::PageUp);
        assert_eq!(target, NavTarget::new(0, 1, false));
    }

    #[test]
    fn test_page_down_last_row_visible() {
        // 3 rows of 20px fit in the 60px viewport.
        let grid = TestGrid::full(3, 2);
        let target = resolve(&grid, 0, 0, GridDirection::PageDown);
        assert_eq!(target, NavTarget::new(2, 0, false));
    }

    #[test]
    fn test_page_down_at_candidate_does_not_scroll() {
        let grid = TestGrid::full(10, 2);
        let target = resolve(&grid, 9, 0, GridDirection::PageDown);
        assert_eq!(target, NavTarget::new(9, 0, false));
    }

    #[test]
    fn test_page_down_scrolls_candidate_to_top() {
        let grid = TestGrid::full(10, 2);
        let target = resolve(&grid, 1, 1, GridDirection::PageDown);
        assert_eq!(target.row_index, 9);
        assert_eq!(target.scroll_to, Some(180.0));
    }

    #[test]
    fn test_page_down_subtracts_sticky_header() {
        let grid = TestGrid::full(10, 2);
        let target = GridNavigator::new(&grid)
            .with_sticky_header_offset(24.0)
            .next_focus(FocusPosition::new(1, 1), GridDirection::PageDown)
            .unwrap();
        assert_eq!(target.scroll_to, Some(180.0 - 24.0));
    }

    #[test]
    fn test_page_down_min_bound_keeps_candidate() {
        // Column 1 only occupied down to row 6; the scan starts at row 6,
        // which ends below the viewport, so min(candidate, scan) is row 6.
        let mut cells = vec![vec![true; 2]; 10];
        for row in cells.iter_mut().skip(7) {
            row[1] = false;
        }
        let grid = TestGrid::from_cells(cells);
        let target = resolve(&grid, 0, 1, GridDirection::PageDown);
        assert_eq!(target.row_index, 6);
        assert_eq!(target.scroll_to, Some(120.0));
    }

    #[test]
    fn test_row_cells_view() {
        let grid = TestGrid::from_cells(vec![vec![true, false], vec![false]]);
        let row = RowCells::new(&grid, 0);
        assert_eq!(row.cell_count(), 2);
        assert!(row.is_occupied(0));
        assert!(!row.is_occupied(1));
        assert!(!row.is_occupied(9));
        assert_eq!(RowCells::new(&grid, 5).cell_count(), 0);
    }
}
