//! Row-level state and keyboard handling.

use crate::nav::{next_column, CellOccupancy};
use crate::types::{ColumnDefinition, KeyInput, RowType};

/// State the grid keeps for each of its rows (and its generated header).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataGridRow {
    pub row_index: usize,
    pub row_type: RowType,
    /// Column of the cell that last had focus in this row
    pub focus_column_index: usize,
    pub grid_template_columns: String,
    pub column_definitions: Option<Vec<ColumnDefinition>>,
}

impl DataGridRow {
    pub fn new(column_definitions: Option<Vec<ColumnDefinition>>) -> Self {
        Self {
            column_definitions,
            ..Self::default()
        }
    }

    pub fn header(
        row_type: RowType,
        column_definitions: Option<Vec<ColumnDefinition>>,
        grid_template_columns: String,
    ) -> Self {
        Self {
            row_type,
            column_definitions,
            grid_template_columns,
            ..Self::default()
        }
    }

    /// A cell in this row received focus.
    pub fn handle_cell_focus(&mut self, column: usize) {
        self.focus_column_index = column;
    }

    /// Column a key press moves focus to inside this row.
    ///
    /// `None` means the row does not handle the key and it goes on to the
    /// grid: vertical keys, Ctrl+Home, Ctrl+End, or a row without cells.
    pub fn resolve_keydown<R>(&self, cells: &R, input: KeyInput) -> Option<usize>
    where
        R: CellOccupancy + ?Sized,
    {
        let direction = input.row_direction()?;
        if cells.cell_count() == 0 {
            return None;
        }
        Some(next_column(cells, self.focus_column_index, direction))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::NavKey;

    #[test]
    fn test_arrow_keys_use_tracked_column() {
        let mut row = DataGridRow::new(None);
        let cells = [true, false, true, true];
        row.handle_cell_focus(2);
        assert_eq!(
            row.resolve_keydown(&cells[..], KeyInput::new(NavKey::ArrowLeft)),
            Some(0)
        );
        assert_eq!(
            row.resolve_keydown(&cells[..], KeyInput::new(NavKey::ArrowRight)),
            Some(3)
        );
    }

    #[test]
    fn test_ctrl_home_end_pass_through() {
        let row = DataGridRow::new(None);
        let cells = [true, true];
        assert_eq!(
            row.resolve_keydown(&cells[..], KeyInput::with_ctrl(NavKey::End)),
            None
        );
        assert_eq!(
            row.resolve_keydown(&cells[..], KeyInput::new(NavKey::End)),
            Some(1)
        );
        assert_eq!(
            row.resolve_keydown(&cells[..], KeyInput::new(NavKey::ArrowDown)),
            None
        );
    }

    #[test]
    fn test_empty_row_does_not_handle_keys() {
        let row = DataGridRow::new(None);
        let cells: [bool; 0] = [];
        assert_eq!(
            row.resolve_keydown(&cells[..], KeyInput::new(NavKey::Home)),
            None
        );
    }
}
