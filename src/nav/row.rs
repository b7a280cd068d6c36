//! Focus movement within a single row.

use crate::types::RowDirection;

/// Which cells of a row hold focusable content.
///
/// Indices past `cell_count` must report unoccupied rather than panic.
pub trait CellOccupancy {
    fn cell_count(&self) -> usize;
    fn is_occupied(&self, column: usize) -> bool;
}

impl CellOccupancy for [bool] {
    fn cell_count(&self) -> usize {
        self.len()
    }

    fn is_occupied(&self, column: usize) -> bool {
        self.get(column).copied().unwrap_or(false)
    }
}

impl CellOccupancy for Vec<bool> {
    fn cell_count(&self) -> usize {
        self.len()
    }

    fn is_occupied(&self, column: usize) -> bool {
        self.as_slice().is_occupied(column)
    }
}

/// Next column to focus for a horizontal move starting at `current`.
///
/// Left/Right skip empty cells and stay put when nothing occupied lies in
/// that direction. Home/End jump to the first/last cell without looking at
/// occupancy. Callers must not pass an empty row.
pub fn next_column<R>(row: &R, current: usize, direction: RowDirection) -> usize
where
    R: CellOccupancy + ?Sized,
{
    let len = row.cell_count();
    match direction {
        RowDirection::Left => (0..current.min(len))
            .rev()
            .find(|&column| row.is_occupied(column))
            .unwrap_or(current),
        RowDirection::Right => (current.saturating_add(1)..len)
            .find(|&column| row.is_occupied(column))
            .unwrap_or(current),
        RowDirection::Home => 0,
        RowDirection::End => len.saturating_sub(1),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use test_case::test_case;

    const SPARSE: [bool; 6] = [true, false, false, true, false, false];

    #[test_case(3, RowDirection::Left => 0; "left skips empty cells")]
    #[test_case(0, RowDirection::Left => 0; "left at first cell stays")]
    #[test_case(0, RowDirection::Right => 3; "right skips empty cells")]
    #[test_case(3, RowDirection::Right => 3; "right with nothing occupied after stays")]
    #[test_case(3, RowDirection::Home => 0; "home")]
    #[test_case(0, RowDirection::End => 5; "end ignores occupancy")]
    fn test_sparse_row(current: usize, direction: RowDirection) -> usize {
        next_column(&SPARSE[..], current, direction)
    }

    #[test]
    fn test_home_end_do_not_check_occupancy() {
        let row = [false, true, true, false];
        assert_eq!(next_column(&row[..], 2, RowDirection::Home), 0);
        assert!(!row[0]);
        assert_eq!(next_column(&row[..], 1, RowDirection::End), 3);
        assert!(!row[3]);
    }

    #[test]
    fn test_right_never_lands_on_empty_cell() {
        let rows: [&[bool]; 4] = [
            &[true, true, true],
            &[true, false, true],
            &[false, false, true, false],
            &[true, false, false, false],
        ];
        for row in rows {
            for current in 0..row.len() {
                let next = next_column(row, current, RowDirection::Right);
                let any_right = row.iter().skip(current + 1).any(|&occupied| occupied);
                if any_right {
                    assert!(row[next], "row {row:?} from {current} landed on {next}");
                    assert!(next > current);
                } else {
                    assert_eq!(next, current);
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_current_column() {
        let row = vec![true, false, true];
        // Stale column past the end: left still finds the last occupied cell.
        assert_eq!(next_column(&row, 7, RowDirection::Left), 2);
        assert_eq!(next_column(&row, 7, RowDirection::Right), 7);
    }
}
