//! The grid host: whatever owns the actual rows, cells and scroll container.
//!
//! The navigation core only reads a [`GridSnapshot`] and issues commands
//! through [`GridHost`]. In the browser this is the DOM (see the `viewer`
//! module); [`MemoryHost`] is an in-memory host used by tests, benches and
//! the CLI.

mod memory;

pub use memory::{HostEvent, MemoryHost, MemoryRow};

use crate::grid::DataGridRow;
pub use crate::nav::GridSnapshot;

/// Commands the grid controller issues to its host.
pub trait GridHost: GridSnapshot {
    /// Set the container's absolute `scrollTop`.
    fn set_scroll_top(&mut self, offset: f64);

    /// Give input focus to a cell. Indices are already clamped.
    fn focus_cell(&mut self, row: usize, column: usize);

    /// Center a cell in the scroll container.
    fn scroll_cell_into_view(&mut self, row: usize, column: usize);

    /// True when focus is on the grid or on anything inside it.
    fn contains_focus(&self) -> bool;

    /// Tab index of the grid element itself.
    fn set_tab_index(&mut self, index: i32);

    /// Insert the generated header row in front of all rows.
    fn install_header(&mut self, header: &DataGridRow);

    fn remove_header(&mut self);

    /// Height of the generated header, if one is installed.
    fn header_height(&self) -> Option<f64>;

    /// Push a row's index and template columns to the rendered row.
    fn apply_row_layout(&mut self, row: usize, layout: &DataGridRow);

    /// Ask for [`DataGrid::process_updates`](crate::grid::DataGrid::process_updates)
    /// to run once before the next frame.
    fn request_update(&mut self);
}
