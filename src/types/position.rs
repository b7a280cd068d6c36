use serde::{Deserialize, Serialize};

/// The cell that receives input focus when the grid itself gains focus.
///
/// Owned by the grid controller; changed only by navigation results or by
/// focus arriving from outside (pointer clicks, programmatic focus).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusPosition {
    pub row_index: usize,
    pub column_index: usize,
}

impl FocusPosition {
    /// Logical position of an empty grid.
    pub const ORIGIN: Self = Self {
        row_index: 0,
        column_index: 0,
    };

    pub fn new(row_index: usize, column_index: usize) -> Self {
        Self {
            row_index,
            column_index,
        }
    }
}

/// Where a navigation key wants focus to go.
///
/// `scroll_to` is an absolute `scrollTop` the host must apply before focusing
/// (page moves only). `scroll_into_view` asks focus application to center the
/// target when the move traverses rows inside a scrollable grid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavTarget {
    pub row_index: usize,
    pub column_index: usize,
    pub scroll_into_view: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_to: Option<f64>,
}

impl NavTarget {
    pub fn new(row_index: usize, column_index: usize, scroll_into_view: bool) -> Self {
        Self {
            row_index,
            column_index,
            scroll_into_view,
            scroll_to: None,
        }
    }

    /// Target used whenever the grid has no rows.
    pub fn origin() -> Self {
        Self::new(0, 0, false)
    }

    #[must_use]
    pub fn with_scroll_to(mut self, offset: Option<f64>) -> Self {
        self.scroll_to = offset;
        self
    }

    pub fn position(&self) -> FocusPosition {
        FocusPosition::new(self.row_index, self.column_index)
    }
}
