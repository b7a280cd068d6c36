//! Grid controller.
//!
//! `DataGrid` owns the persisted [`FocusPosition`], the column layout and the
//! per-row state, and drives a [`GridHost`]. Configuration changes go through
//! explicit setters that run their dependent recomputation directly or queue
//! it; queued work runs when the host calls [`DataGrid::process_updates`].
//!
//! Key handling mirrors event bubbling: the focused row sees a key first and
//! the grid only acts on keys the row left alone.

mod queue;
mod row;

pub use queue::UpdateQueue;
pub use row::DataGridRow;

use serde_json::Value;
use tracing::{debug, trace};

use crate::host::GridHost;
use crate::layout::{generate_columns, generate_template_columns};
use crate::nav::{plan_focus, GridNavigator, RowCells};
use crate::types::{ColumnDefinition, FocusPosition, GenerateHeaderOptions, KeyInput};

/// Tab index of the grid while focus is outside it.
const TAB_INDEX_FOCUSABLE: i32 = 0;
/// Tab index of the grid while one of its cells holds focus.
const TAB_INDEX_DELEGATED: i32 = -1;

#[derive(Debug, Default)]
pub struct DataGrid {
    generate_header: GenerateHeaderOptions,
    grid_template_columns: Option<String>,
    generated_grid_template_columns: String,
    rows_data: Vec<Value>,
    column_definitions: Option<Vec<ColumnDefinition>>,
    focus: FocusPosition,
    rows: Vec<DataGridRow>,
    generated_header: Option<DataGridRow>,
    connected: bool,
    /// Set while a row focus notification is being applied
    is_updating_focus: bool,
    focus_update: UpdateQueue,
    row_index_update: UpdateQueue,
    column_definitions_stale: bool,
}

impl DataGrid {
    pub fn new() -> Self {
        Self {
            column_definitions_stale: true,
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Attach to a host: create the generated header and pick up its rows.
    pub fn connect<H: GridHost + ?Sized>(&mut self, host: &mut H) {
        self.connected = true;
        self.toggle_generated_header(host);
        self.on_rows_structure_changed(host);
    }

    pub fn disconnect<H: GridHost + ?Sized>(&mut self, host: &mut H) {
        self.connected = false;
        if self.generated_header.take().is_some() {
            host.remove_header();
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Rows were added to or removed from the host at unknown positions.
    ///
    /// Row state is matched by position here, so only rows past the old end
    /// are created or dropped. Hosts that know where rows changed call
    /// [`DataGrid::on_rows_inserted`] or [`DataGrid::on_rows_removed`], which
    /// keep each row's state with its row.
    pub fn on_rows_structure_changed<H: GridHost + ?Sized>(&mut self, host: &mut H) {
        self.sync_row_count(host);
        self.clamp_focus_row();
        self.queue_row_index_update(host);
    }

    /// `count` rows were inserted in front of row `index`.
    ///
    /// New rows receive the current column definitions right away; indexes
    /// and templates follow in the queued update. The focus position moves
    /// with its row.
    pub fn on_rows_inserted<H: GridHost + ?Sized>(
        &mut self,
        host: &mut H,
        index: usize,
        count: usize,
    ) {
        let previous = self.rows.len();
        let index = index.min(previous);
        debug!(index, count, "rows inserted");
        let column_definitions = self.column_definitions.clone();
        let tail = self.rows.split_off(index);
        self.rows.extend(
            std::iter::repeat_with(|| DataGridRow::new(column_definitions.clone())).take(count),
        );
        self.rows.extend(tail);
        if self.focus.row_index >= index && self.focus.row_index < previous {
            self.focus.row_index += count;
        }
        self.on_rows_structure_changed(host);
    }

    /// `count` rows starting at row `index` were removed.
    ///
    /// Focus below the removed block moves up with its row; focus inside it
    /// lands on the first row after the block.
    pub fn on_rows_removed<H: GridHost + ?Sized>(
        &mut self,
        host: &mut H,
        index: usize,
        count: usize,
    ) {
        let start = index.min(self.rows.len());
        let end = index.saturating_add(count).min(self.rows.len());
        debug!(start, end, "rows removed");
        let tail = self.rows.split_off(end);
        self.rows.truncate(start);
        self.rows.extend(tail);
        let row = self.focus.row_index;
        if row >= end {
            self.focus.row_index = row - (end - start);
        } else if row >= start {
            self.focus.row_index = start;
        }
        self.on_rows_structure_changed(host);
    }

    /// Run queued work. Hosts call this once per requested update.
    pub fn process_updates<H: GridHost + ?Sized>(&mut self, host: &mut H) {
        if !self.connected {
            return;
        }
        if self.row_index_update.is_pending() {
            self.update_row_indexes(host);
        }
        if self.focus_update.take() {
            self.focus_on_cell(host, self.focus.row_index, self.focus.column_index, true);
        }
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    pub fn generate_header(&self) -> GenerateHeaderOptions {
        self.generate_header
    }

    pub fn set_generate_header<H: GridHost + ?Sized>(
        &mut self,
        host: &mut H,
        options: GenerateHeaderOptions,
    ) {
        self.generate_header = options;
        if self.connected {
            self.toggle_generated_header(host);
        }
    }

    /// Explicit `grid-template-columns`, overriding the generated one.
    pub fn set_grid_template_columns<H: GridHost + ?Sized>(
        &mut self,
        host: &mut H,
        template: Option<String>,
    ) {
        self.grid_template_columns = template;
        if self.connected {
            self.update_row_indexes(host);
        }
    }

    /// Template columns pushed to every row.
    pub fn effective_template_columns(&self) -> &str {
        self.grid_template_columns
            .as_deref()
            .unwrap_or(&self.generated_grid_template_columns)
    }

    pub fn column_definitions(&self) -> Option<&[ColumnDefinition]> {
        self.column_definitions.as_deref()
    }

    pub fn set_column_definitions<H: GridHost + ?Sized>(
        &mut self,
        host: &mut H,
        definitions: Option<Vec<ColumnDefinition>>,
    ) {
        self.column_definitions = definitions;
        let Some(definitions) = &self.column_definitions else {
            self.generated_grid_template_columns.clear();
            return;
        };
        self.generated_grid_template_columns = generate_template_columns(definitions);
        if self.connected {
            self.column_definitions_stale = true;
            self.queue_row_index_update(host);
        }
    }

    pub fn rows_data(&self) -> &[Value] {
        &self.rows_data
    }

    /// Replace the row data; columns are generated from the first row when
    /// none are defined.
    pub fn set_rows_data<H: GridHost + ?Sized>(&mut self, host: &mut H, rows: Vec<Value>) {
        self.rows_data = rows;
        if self.column_definitions.is_none() {
            if let Some(first) = self.rows_data.first() {
                let generated = generate_columns(first);
                self.set_column_definitions(host, Some(generated));
            }
        }
    }

    pub fn focus_position(&self) -> FocusPosition {
        self.focus
    }

    pub fn set_focus_row_index<H: GridHost + ?Sized>(&mut self, host: &mut H, row: usize) {
        if self.focus.row_index != row {
            self.focus.row_index = row;
            if self.connected {
                self.queue_focus_update(host);
            }
        }
    }

    pub fn set_focus_column_index<H: GridHost + ?Sized>(&mut self, host: &mut H, column: usize) {
        if self.focus.column_index != column {
            self.focus.column_index = column;
            if self.connected {
                self.queue_focus_update(host);
            }
        }
    }

    pub fn rows(&self) -> &[DataGridRow] {
        &self.rows
    }

    pub fn generated_header(&self) -> Option<&DataGridRow> {
        self.generated_header.as_ref()
    }

    pub fn has_pending_updates(&self) -> bool {
        self.focus_update.is_pending() || self.row_index_update.is_pending()
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Handle a key press. Returns `true` when the key was consumed and the
    /// browser default (scrolling) should be prevented.
    pub fn handle_keydown<H: GridHost + ?Sized>(&mut self, host: &mut H, input: KeyInput) -> bool {
        let row_index = self.focus.row_index;
        let row_move = self
            .rows
            .get(row_index)
            .and_then(|row| row.resolve_keydown(&RowCells::new(&*host, row_index), input));
        if let Some(column) = row_move {
            trace!(row = row_index, column, key = input.key.as_key(), "row move");
            host.focus_cell(row_index, column);
            self.handle_cell_focused(host, row_index, column);
            return true;
        }

        let Some(direction) = input.grid_direction() else {
            return false;
        };
        let target = GridNavigator::new(&*host)
            .with_declared_columns(self.column_definitions.as_ref().map(Vec::len))
            .with_sticky_header_offset(self.sticky_header_offset(&*host))
            .next_focus(self.focus, direction);
        let Some(target) = target else {
            return false;
        };

        if let Some(offset) = target.scroll_to {
            host.set_scroll_top(offset);
        }
        self.focus_on_cell(
            host,
            target.row_index,
            target.column_index,
            target.scroll_into_view,
        );
        true
    }

    /// A cell received native focus (pointer click, programmatic focus).
    pub fn handle_cell_focused<H: GridHost + ?Sized>(
        &mut self,
        host: &mut H,
        row: usize,
        column: usize,
    ) {
        if let Some(focused_row) = self.rows.get_mut(row) {
            focused_row.handle_cell_focus(column);
            self.handle_row_focused(host, row);
        }
    }

    /// A row reports that one of its cells holds focus.
    pub fn handle_row_focused<H: GridHost + ?Sized>(&mut self, host: &mut H, row: usize) {
        let Some(column) = self.rows.get(row).map(|r| r.focus_column_index) else {
            return;
        };
        self.is_updating_focus = true;
        self.set_focus_row_index(host, row);
        self.set_focus_column_index(host, column);
        host.set_tab_index(TAB_INDEX_DELEGATED);
        self.is_updating_focus = false;
    }

    /// The grid element itself received focus: hand it to the focus cell.
    pub fn handle_focus<H: GridHost + ?Sized>(&mut self, host: &mut H) {
        self.focus_on_cell(host, self.focus.row_index, self.focus.column_index, true);
    }

    /// Focus left an element of the grid for `target_inside` (false when
    /// the new focus target is outside the grid or there is none).
    pub fn handle_focus_out<H: GridHost + ?Sized>(&mut self, host: &mut H, target_inside: bool) {
        if !target_inside {
            host.set_tab_index(TAB_INDEX_FOCUSABLE);
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn sticky_header_offset<H: GridHost + ?Sized>(&self, host: &H) -> f64 {
        if self.generate_header == GenerateHeaderOptions::Sticky && self.generated_header.is_some()
        {
            host.header_height().unwrap_or(0.0)
        } else {
            0.0
        }
    }

    fn focus_on_cell<H: GridHost + ?Sized>(
        &mut self,
        host: &mut H,
        row: usize,
        column: usize,
        scroll_into_view: bool,
    ) {
        let target = FocusPosition::new(row, column);
        let Some(plan) = plan_focus(&*host, self.focus, target, scroll_into_view) else {
            trace!("no rows, focus position reset to origin");
            self.focus = FocusPosition::ORIGIN;
            return;
        };

        let FocusPosition {
            row_index,
            column_index,
        } = plan.position;
        if host.cell_count(row_index) == 0 {
            trace!(row = row_index, "row has no cells, nothing to focus");
            return;
        }
        if plan.center_into_view {
            host.scroll_cell_into_view(row_index, column_index);
        }
        host.focus_cell(row_index, column_index);
        self.handle_cell_focused(host, row_index, column_index);
    }

    /// Match the row state list to the host's row count, at the end.
    fn sync_row_count<H: GridHost + ?Sized>(&mut self, host: &H) {
        let count = host.row_count();
        if count != self.rows.len() {
            debug!(from = self.rows.len(), to = count, "row count changed");
            let column_definitions = self.column_definitions.clone();
            self.rows
                .resize_with(count, || DataGridRow::new(column_definitions.clone()));
        }
    }

    /// Keep the focus row on an existing row. An empty grid keeps the old
    /// position; focusing it resets to the origin.
    fn clamp_focus_row(&mut self) {
        if let Some(last) = self.rows.len().checked_sub(1) {
            self.focus.row_index = self.focus.row_index.min(last);
        }
    }

    fn queue_focus_update<H: GridHost + ?Sized>(&mut self, host: &mut H) {
        if self.is_updating_focus && host.contains_focus() {
            trace!("focus update suppressed while synchronizing focus");
            return;
        }
        if self.focus_update.request() {
            host.request_update();
        }
    }

    fn queue_row_index_update<H: GridHost + ?Sized>(&mut self, host: &mut H) {
        if self.row_index_update.request() {
            host.request_update();
        } else {
            trace!("row index update already queued");
        }
    }

    fn toggle_generated_header<H: GridHost + ?Sized>(&mut self, host: &mut H) {
        if self.generated_header.take().is_some() {
            host.remove_header();
        }
        if let Some(row_type) = self.generate_header.header_row_type() {
            let header = DataGridRow::header(
                row_type,
                self.column_definitions.clone(),
                self.grid_template_columns.clone().unwrap_or_default(),
            );
            host.install_header(&header);
            self.generated_header = Some(header);
        }
    }

    fn update_row_indexes<H: GridHost + ?Sized>(&mut self, host: &mut H) {
        let template = self.effective_template_columns().to_string();
        for (index, row) in self.rows.iter_mut().enumerate() {
            row.row_index = index;
            row.grid_template_columns.clone_from(&template);
            if self.column_definitions_stale {
                row.column_definitions.clone_from(&self.column_definitions);
            }
            host.apply_row_layout(index, row);
        }
        self.row_index_update.take();
        self.column_definitions_stale = false;
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
    use crate::host::{HostEvent, MemoryHost};
    use crate::types::{NavKey, RowType};
    use serde_json::json;

    fn connected(host: &mut MemoryHost) -> DataGrid {
        let mut grid = DataGrid::new();
        grid.connect(host);
        grid.process_updates(host);
        host.take_update_request();
        host.take_events();
        grid
    }

    #[test]
    fn test_connect_installs_default_header_and_indexes_rows() {
        let mut host = MemoryHost::uniform(3, 2, 20.0, 60.0);
        let mut grid = DataGrid::new();
        grid.connect(&mut host);
        assert_eq!(host.header(), Some(RowType::Header));
        assert!(host.take_update_request());
        grid.process_updates(&mut host);
        assert_eq!(grid.rows().len(), 3);
        assert_eq!(host.rows()[2].row_index, Some(2));
    }

    #[test]
    fn test_setters_without_connection_have_no_side_effects() {
        let mut host = MemoryHost::uniform(3, 2, 20.0, 60.0);
        let mut grid = DataGrid::new();
        grid.set_focus_row_index(&mut host, 2);
        grid.set_generate_header(&mut host, GenerateHeaderOptions::Sticky);
        grid.set_column_definitions(&mut host, Some(vec![ColumnDefinition::new("a")]));
        assert!(host.events().is_empty());
        assert_eq!(grid.focus_position().row_index, 2);
        assert_eq!(grid.effective_template_columns(), "1fr");
    }

    #[test]
    fn test_focus_setters_queue_single_update() {
        let mut host = MemoryHost::uniform(4, 3, 20.0, 60.0);
        let mut grid = connected(&mut host);
        grid.set_focus_row_index(&mut host, 2);
        grid.set_focus_column_index(&mut host, 1);
        let requests = host
            .events()
            .iter()
            .filter(|e| **e == HostEvent::UpdateRequested)
            .count();
        assert_eq!(requests, 1);

        grid.process_updates(&mut host);
        assert_eq!(host.focused(), Some(FocusPosition::new(2, 1)));
        assert!(!grid.has_pending_updates());
    }

    #[test]
    fn test_row_focus_does_not_requeue_focus_update() {
        let mut host = MemoryHost::uniform(4, 3, 20.0, 60.0);
        let mut grid = connected(&mut host);
        host.focus_cell(3, 2);
        host.take_events();

        grid.handle_cell_focused(&mut host, 3, 2);
        assert_eq!(grid.focus_position(), FocusPosition::new(3, 2));
        assert_eq!(grid.rows()[3].focus_column_index, 2);
        assert!(!grid.has_pending_updates());
        assert_eq!(host.take_events(), vec![HostEvent::TabIndex { index: -1 }]);
    }

    #[test]
    fn test_row_focus_from_outside_queues_update() {
        // Focus is not inside the grid, so the guard does not apply.
        let mut host = MemoryHost::uniform(4, 3, 20.0, 60.0);
        let mut grid = connected(&mut host);
        grid.handle_row_focused(&mut host, 1);
        assert!(grid.has_pending_updates());
    }

    #[test]
    fn test_row_handles_horizontal_keys_first() {
        let mut host = MemoryHost::from_patterns(&["#.##", "####"], 20.0, 60.0).unwrap();
        let mut grid = connected(&mut host);
        grid.handle_cell_focused(&mut host, 0, 0);

        assert!(grid.handle_keydown(&mut host, KeyInput::new(NavKey::ArrowRight)));
        assert_eq!(host.focused(), Some(FocusPosition::new(0, 2)));
        assert_eq!(grid.focus_position(), FocusPosition::new(0, 2));

        assert!(grid.handle_keydown(&mut host, KeyInput::new(NavKey::End)));
        assert_eq!(grid.focus_position(), FocusPosition::new(0, 3));

        assert!(grid.handle_keydown(&mut host, KeyInput::new(NavKey::Home)));
        assert_eq!(grid.focus_position(), FocusPosition::new(0, 0));
    }

    #[test]
    fn test_ctrl_end_requires_column_definitions() {
        let mut host = MemoryHost::uniform(3, 4, 20.0, 60.0);
        let mut grid = connected(&mut host);
        assert!(!grid.handle_keydown(&mut host, KeyInput::with_ctrl(NavKey::End)));

        grid.set_column_definitions(
            &mut host,
            Some(vec![ColumnDefinition::new("a"), ColumnDefinition::new("b")]),
        );
        assert!(grid.handle_keydown(&mut host, KeyInput::with_ctrl(NavKey::End)));
        assert_eq!(grid.focus_position(), FocusPosition::new(2, 1));
    }

    #[test]
    fn test_row_keys_fall_through_on_rows_without_cells() {
        let mut host = MemoryHost::uniform(3, 0, 20.0, 60.0);
        let mut grid = connected(&mut host);
        assert!(!grid.handle_keydown(&mut host, KeyInput::new(NavKey::Home)));
        assert!(!grid.handle_keydown(&mut host, KeyInput::new(NavKey::ArrowLeft)));
        assert!(host.events().is_empty());
    }

    #[test]
    fn test_empty_grid_consumes_keys_and_resets_to_origin() {
        let mut host = MemoryHost::uniform(0, 0, 20.0, 60.0);
        let mut grid = connected(&mut host);
        grid.set_focus_row_index(&mut host, 4);
        assert!(grid.handle_keydown(&mut host, KeyInput::new(NavKey::ArrowDown)));
        assert_eq!(grid.focus_position(), FocusPosition::ORIGIN);
        assert!(host.focused().is_none());
    }

    #[test]
    fn test_rows_without_cells_take_no_focus() {
        let mut host = MemoryHost::uniform(3, 0, 20.0, 60.0);
        let mut grid = connected(&mut host);
        grid.handle_focus(&mut host);
        assert!(host.focused().is_none());
        assert!(host.events().is_empty());

        assert!(grid.handle_keydown(&mut host, KeyInput::new(NavKey::ArrowDown)));
        assert!(host.focused().is_none());
        assert_eq!(host.tab_index(), 0);
    }

    #[test]
    fn test_focus_inside_removed_block_lands_after_it() {
        let mut host = MemoryHost::uniform(5, 2, 20.0, 60.0);
        let mut grid = connected(&mut host);
        grid.handle_cell_focused(&mut host, 2, 1);

        host.remove_row(1);
        host.remove_row(1);
        grid.on_rows_removed(&mut host, 1, 2);
        assert_eq!(grid.rows().len(), 3);
        assert_eq!(grid.focus_position(), FocusPosition::new(1, 1));

        // Removing the trailing rows clamps focus onto the new last row.
        host.remove_row(1);
        host.remove_row(1);
        grid.on_rows_removed(&mut host, 1, 2);
        assert_eq!(grid.focus_position(), FocusPosition::new(0, 1));
    }

    #[test]
    fn test_rows_data_generates_columns_once() {
        let mut host = MemoryHost::uniform(2, 2, 20.0, 60.0);
        let mut grid = connected(&mut host);
        grid.set_rows_data(&mut host, vec![json!({"symbol": "H", "mass": 1.008})]);
        let keys: Vec<_> = grid
            .column_definitions()
            .unwrap()
            .iter()
            .map(|c| c.column_data_key.as_str())
            .collect();
        assert_eq!(keys, ["symbol", "mass"]);
        assert_eq!(grid.effective_template_columns(), "1fr 1fr");

        grid.set_rows_data(&mut host, vec![json!({"other": 1})]);
        assert_eq!(grid.column_definitions().unwrap().len(), 2);
        assert_eq!(grid.rows_data().len(), 1);
    }

    #[test]
    fn test_column_definitions_reach_rows_on_update() {
        let mut host = MemoryHost::uniform(2, 2, 20.0, 60.0);
        let mut grid = connected(&mut host);
        grid.set_column_definitions(&mut host, Some(vec![ColumnDefinition::new("a")]));
        assert!(grid.rows()[0].column_definitions.is_none());
        grid.process_updates(&mut host);
        assert_eq!(grid.rows()[1].column_definitions.as_ref().unwrap().len(), 1);
        assert_eq!(host.rows()[1].template_columns, "1fr");
    }

    #[test]
    fn test_explicit_template_columns_apply_immediately() {
        let mut host = MemoryHost::uniform(2, 2, 20.0, 60.0);
        let mut grid = connected(&mut host);
        grid.set_grid_template_columns(&mut host, Some("42px 42px".to_string()));
        assert_eq!(host.rows()[0].template_columns, "42px 42px");
        assert_eq!(grid.rows()[1].grid_template_columns, "42px 42px");
    }

    #[test]
    fn test_header_toggles() {
        let mut host = MemoryHost::uniform(2, 2, 20.0, 60.0);
        let mut grid = connected(&mut host);
        grid.set_generate_header(&mut host, GenerateHeaderOptions::Sticky);
        assert_eq!(
            host.take_events(),
            vec![
                HostEvent::HeaderRemoved,
                HostEvent::HeaderInstalled {
                    row_type: RowType::StickyHeader
                }
            ]
        );
        grid.set_generate_header(&mut host, GenerateHeaderOptions::None);
        assert_eq!(host.header(), None);
        assert!(grid.generated_header().is_none());

        grid.set_generate_header(&mut host, GenerateHeaderOptions::Default);
        grid.disconnect(&mut host);
        assert_eq!(host.header(), None);
        assert!(!grid.is_connected());
    }

    #[test]
    fn test_focus_out_restores_tab_stop() {
        let mut host = MemoryHost::uniform(2, 2, 20.0, 60.0);
        let mut grid = connected(&mut host);
        grid.handle_focus_out(&mut host, true);
        assert!(host.events().is_empty());
        grid.handle_focus_out(&mut host, false);
        assert_eq!(host.tab_index(), 0);
    }

    #[test]
    fn test_structure_change_assigns_columns_to_new_rows() {
        let mut host = MemoryHost::uniform(1, 2, 20.0, 60.0);
        let mut grid = connected(&mut host);
        grid.set_column_definitions(&mut host, Some(vec![ColumnDefinition::new("a")]));
        grid.process_updates(&mut host);

        host.push_row(crate::host::MemoryRow::new(vec![true, true], 20.0));
        grid.on_rows_structure_changed(&mut host);
        assert_eq!(grid.rows().len(), 2);
        assert!(grid.rows()[1].column_definitions.is_some());
        assert!(grid.has_pending_updates());
        grid.process_updates(&mut host);
        assert_eq!(host.rows()[1].row_index, Some(1));
    }
}
