//! Keyboard focus navigation over a grid of rows and cells.
//!
//! - [`row`]: left/right/home/end inside one row, skipping empty cells
//! - [`grid`]: up/down/page/Ctrl+Home/Ctrl+End across rows, with scroll offsets
//! - [`focus`]: clamping a target and deciding whether to center it
//!
//! Navigation never fails. Out-of-range input is clamped or reverts to the
//! current position, and an empty grid resolves to the origin.

pub mod focus;
pub mod grid;
pub mod row;

pub use focus::{plan_focus, FocusPlan};
pub use grid::{GridNavigator, GridSnapshot, RowCells};
pub use row::{next_column, CellOccupancy};
