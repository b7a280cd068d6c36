//! In-memory grid host.
//!
//! Rows are stacked top to bottom with fixed heights, below the generated
//! header when one is installed. Every command is recorded as a
//! [`HostEvent`] so callers can assert on exactly what the controller did.

use serde::Serialize;

use super::GridHost;
use crate::error::{GridFocusError, Result};
use crate::grid::DataGridRow;
use crate::layout::{RowGeometry, Viewport};
use crate::nav::GridSnapshot;
use crate::types::{FocusPosition, RowType};

/// Marker for an occupied cell in row patterns.
const OCCUPIED: char = '#';
/// Marker for an empty cell in row patterns.
const EMPTY: char = '.';

/// A command the controller issued to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum HostEvent {
    Focus { row: usize, column: usize },
    ScrollIntoView { row: usize, column: usize },
    ScrollTop { offset: f64 },
    TabIndex { index: i32 },
    HeaderInstalled { row_type: RowType },
    HeaderRemoved,
    RowLayout { row: usize, template_columns: String },
    UpdateRequested,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryRow {
    pub cells: Vec<bool>,
    pub height: f64,
    /// Index last pushed by the controller
    pub row_index: Option<usize>,
    /// Template columns last pushed by the controller
    pub template_columns: String,
}

impl MemoryRow {
    pub fn new(cells: Vec<bool>, height: f64) -> Self {
        Self {
            cells,
            height,
            row_index: None,
            template_columns: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    rows: Vec<MemoryRow>,
    /// Top of each row below the header, kept in step with `rows`
    row_tops: Vec<f64>,
    rows_height: f64,
    client_height: f64,
    scroll_top: f64,
    header: Option<RowType>,
    header_height: f64,
    focused: Option<FocusPosition>,
    tab_index: i32,
    pending_update: bool,
    events: Vec<HostEvent>,
}

impl MemoryHost {
    pub fn new(rows: Vec<MemoryRow>, client_height: f64) -> Self {
        let mut host = Self {
            rows,
            client_height,
            ..Self::default()
        };
        host.reflow();
        host
    }

    /// `rows` × `cols` grid with every cell occupied.
    pub fn uniform(rows: usize, cols: usize, row_height: f64, client_height: f64) -> Self {
        Self::from_occupancy(vec![vec![true; cols]; rows], row_height, client_height)
    }

    pub fn from_occupancy(cells: Vec<Vec<bool>>, row_height: f64, client_height: f64) -> Self {
        let rows = cells
            .into_iter()
            .map(|cells| MemoryRow::new(cells, row_height))
            .collect();
        Self::new(rows, client_height)
    }

    /// Build rows from patterns such as `"#..#"` (`#` occupied, `.` empty).
    pub fn from_patterns<S: AsRef<str>>(
        patterns: &[S],
        row_height: f64,
        client_height: f64,
    ) -> Result<Self> {
        let cells = patterns
            .iter()
            .map(|pattern| parse_pattern(pattern.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_occupancy(cells, row_height, client_height))
    }

    /// Height the generated header takes once installed.
    #[must_use]
    pub fn with_header_height(mut self, height: f64) -> Self {
        self.header_height = height;
        self
    }

    pub fn rows(&self) -> &[MemoryRow] {
        &self.rows
    }

    pub fn set_occupied(&mut self, row: usize, column: usize, occupied: bool) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.cells.get_mut(column)) {
            *cell = occupied;
        }
    }

    pub fn push_row(&mut self, row: MemoryRow) {
        self.rows.push(row);
        self.reflow();
    }

    /// Insert a row in front of `index` (or at the end when past it).
    pub fn insert_row(&mut self, index: usize, row: MemoryRow) {
        self.rows.insert(index.min(self.rows.len()), row);
        self.reflow();
    }

    pub fn remove_row(&mut self, index: usize) -> Option<MemoryRow> {
        let removed = (index < self.rows.len()).then(|| self.rows.remove(index));
        self.reflow();
        removed
    }

    /// Scroll as the user would; not recorded as a command.
    pub fn scroll_to(&mut self, offset: f64) {
        self.scroll_top = self.viewport().clamp_scroll_top(offset);
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Cell currently holding focus, if focus is inside the grid.
    pub fn focused(&self) -> Option<FocusPosition> {
        self.focused
    }

    /// Focus moves somewhere outside the grid.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    pub fn tab_index(&self) -> i32 {
        self.tab_index
    }

    pub fn header(&self) -> Option<RowType> {
        self.header
    }

    /// Whether an update was requested and not yet taken.
    pub fn take_update_request(&mut self) -> bool {
        std::mem::take(&mut self.pending_update)
    }

    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    fn header_offset(&self) -> f64 {
        if self.header.is_some() {
            self.header_height
        } else {
            0.0
        }
    }

    fn content_height(&self) -> f64 {
        self.header_offset() + self.rows_height
    }

    /// Recompute row tops after rows were added or removed.
    fn reflow(&mut self) {
        self.row_tops.clear();
        let mut top = 0.0;
        for row in &self.rows {
            self.row_tops.push(top);
            top += row.height;
        }
        self.rows_height = top;
    }
}

fn parse_pattern(pattern: &str) -> Result<Vec<bool>> {
    pattern
        .chars()
        .map(|c| match c {
            OCCUPIED => Ok(true),
            EMPTY => Ok(false),
            other => Err(GridFocusError::Fixture(format!(
                "unexpected cell marker {other:?} in row {pattern:?}"
            ))),
        })
        .collect()
}

impl GridSnapshot for MemoryHost {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell_count(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, |r| r.cells.len())
    }

    fn is_occupied(&self, row: usize, column: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(column))
            .copied()
            .unwrap_or(false)
    }

    fn row_geometry(&self, row: usize) -> Option<RowGeometry> {
        let target = self.rows.get(row)?;
        let top = self.row_tops.get(row)?;
        Some(RowGeometry::new(self.header_offset() + top, target.height))
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(self.scroll_top, self.client_height, self.content_height())
    }
}

impl GridHost for MemoryHost {
    fn set_scroll_top(&mut self, offset: f64) {
        self.scroll_top = self.viewport().clamp_scroll_top(offset);
        self.events.push(HostEvent::ScrollTop { offset });
    }

    fn focus_cell(&mut self, row: usize, column: usize) {
        self.focused = Some(FocusPosition::new(row, column));
        self.events.push(HostEvent::Focus { row, column });
    }

    fn scroll_cell_into_view(&mut self, row: usize, column: usize) {
        if let Some(geometry) = self.row_geometry(row) {
            let centered = geometry.top + geometry.height / 2.0 - self.client_height / 2.0;
            self.scroll_top = self.viewport().clamp_scroll_top(centered);
        }
        self.events.push(HostEvent::ScrollIntoView { row, column });
    }

    fn contains_focus(&self) -> bool {
        self.focused.is_some()
    }

    fn set_tab_index(&mut self, index: i32) {
        self.tab_index = index;
        self.events.push(HostEvent::TabIndex { index });
    }

    fn install_header(&mut self, header: &DataGridRow) {
        self.header = Some(header.row_type);
        self.events.push(HostEvent::HeaderInstalled {
            row_type: header.row_type,
        });
    }

    fn remove_header(&mut self) {
        self.header = None;
        self.events.push(HostEvent::HeaderRemoved);
    }

    fn header_height(&self) -> Option<f64> {
        self.header.map(|_| self.header_height)
    }

    fn apply_row_layout(&mut self, row: usize, layout: &DataGridRow) {
        if let Some(rendered) = self.rows.get_mut(row) {
            rendered.row_index = Some(layout.row_index);
            rendered.template_columns.clone_from(&layout.grid_template_columns);
        }
        self.events.push(HostEvent::RowLayout {
            row,
            template_columns: layout.grid_template_columns.clone(),
        });
    }

    fn request_update(&mut self) {
        self.pending_update = true;
        self.events.push(HostEvent::UpdateRequested);
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

    #[test]
    fn test_patterns() {
        let host = MemoryHost::from_patterns(&["#.#", "..#"], 20.0, 40.0).unwrap();
        assert_eq!(host.row_count(), 2);
        assert!(host.is_occupied(0, 0));
        assert!(!host.is_occupied(1, 0));
        assert!(!host.is_occupied(5, 0));

        let err = MemoryHost::from_patterns(&["#x"], 20.0, 40.0).unwrap_err();
        assert!(err.to_string().contains("unexpected cell marker"));
    }

    #[test]
    fn test_geometry_below_header() {
        let mut host = MemoryHost::uniform(3, 2, 20.0, 40.0).with_header_height(30.0);
        assert_eq!(host.row_geometry(1), Some(RowGeometry::new(20.0, 20.0)));
        host.install_header(&DataGridRow::header(RowType::StickyHeader, None, String::new()));
        assert_eq!(host.row_geometry(1), Some(RowGeometry::new(50.0, 20.0)));
        assert_eq!(host.viewport().scroll_height, 90.0);
        assert_eq!(host.header_height(), Some(30.0));
        assert_eq!(host.row_geometry(3), None);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut host = MemoryHost::uniform(10, 2, 20.0, 60.0);
        host.set_scroll_top(-40.0);
        assert_eq!(host.scroll_top(), 0.0);
        host.set_scroll_top(500.0);
        assert_eq!(host.scroll_top(), 140.0);
        assert_eq!(
            host.events(),
            &[
                HostEvent::ScrollTop { offset: -40.0 },
                HostEvent::ScrollTop { offset: 500.0 }
            ]
        );
    }

    #[test]
    fn test_scroll_into_view_centers() {
        let mut host = MemoryHost::uniform(10, 2, 20.0, 60.0);
        host.scroll_cell_into_view(5, 0);
        // Row 5 spans 100..120; centered means scroll_top = 110 - 30.
        assert_eq!(host.scroll_top(), 80.0);
    }

    #[test]
    fn test_geometry_follows_row_changes() {
        let mut host = MemoryHost::uniform(3, 1, 20.0, 40.0);
        host.insert_row(1, MemoryRow::new(vec![true], 50.0));
        assert_eq!(host.row_geometry(2), Some(RowGeometry::new(70.0, 20.0)));
        assert_eq!(host.viewport().scroll_height, 110.0);

        host.remove_row(0);
        assert_eq!(host.row_geometry(0), Some(RowGeometry::new(0.0, 50.0)));
        assert_eq!(host.row_geometry(2), Some(RowGeometry::new(70.0, 20.0)));
        assert_eq!(host.row_geometry(3), None);
        assert_eq!(host.viewport().scroll_height, 90.0);
    }
}
