//! Turning a resolved target into a concrete focus call.

use super::grid::GridSnapshot;
use crate::types::FocusPosition;

/// The cell to focus after clamping, and whether to center it first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusPlan {
    pub position: FocusPosition,
    pub center_into_view: bool,
}

/// Clamp `target` into the grid and decide on scroll-into-view.
///
/// Returns `None` for an empty grid: the logical position becomes the origin
/// and nothing is focused. Centering only happens when requested, when the
/// grid actually scrolls, and when the move goes up (or down) with room left
/// to scroll in that direction.
pub fn plan_focus<G>(
    grid: &G,
    current: FocusPosition,
    target: FocusPosition,
    scroll_into_view: bool,
) -> Option<FocusPlan>
where
    G: GridSnapshot + ?Sized,
{
    let row_count = grid.row_count();
    if row_count == 0 {
        return None;
    }

    let row_index = target.row_index.min(row_count - 1);
    let cell_count = grid.cell_count(row_index);
    let column_index = target.column_index.min(cell_count.saturating_sub(1));

    let viewport = grid.viewport();
    let moving_up = row_index < current.row_index && viewport.can_scroll_up();
    let moving_down = row_index > current.row_index && viewport.can_scroll_down();
    let center_into_view = scroll_into_view && viewport.is_scrollable() && (moving_up || moving_down);

    Some(FocusPlan {
        position: FocusPosition::new(row_index, column_index),
        center_into_view,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    #[test]
    fn test_empty_grid_has_no_plan() {
        let host = MemoryHost::uniform(0, 3, 20.0, 60.0);
        assert_eq!(
            plan_focus(&host, FocusPosition::ORIGIN, FocusPosition::new(2, 2), true),
            None
        );
    }

    #[test]
    fn test_clamps_row_and_column() {
        let host = MemoryHost::uniform(4, 3, 20.0, 200.0);
        let plan = plan_focus(&host, FocusPosition::ORIGIN, FocusPosition::new(10, 10), false)
            .unwrap();
        assert_eq!(plan.position, FocusPosition::new(3, 2));
        assert!(!plan.center_into_view);
    }

    #[test]
    fn test_centers_on_downward_move_with_room() {
        let host = MemoryHost::uniform(10, 3, 20.0, 60.0);
        let plan = plan_focus(&host, FocusPosition::new(2, 0), FocusPosition::new(5, 0), true)
            .unwrap();
        assert!(plan.center_into_view);
    }

    #[test]
    fn test_no_center_when_not_requested_or_unscrollable() {
        let host = MemoryHost::uniform(10, 3, 20.0, 60.0);
        let plan = plan_focus(&host, FocusPosition::new(2, 0), FocusPosition::new(5, 0), false)
            .unwrap();
        assert!(!plan.center_into_view);

        // Everything fits: nothing to scroll.
        let host = MemoryHost::uniform(3, 3, 20.0, 60.0);
        let plan = plan_focus(&host, FocusPosition::new(0, 0), FocusPosition::new(2, 0), true)
            .unwrap();
        assert!(!plan.center_into_view);
    }

    #[test]
    fn test_no_center_upward_at_top() {
        // scroll_top is 0, so there is no room to scroll up.
        let host = MemoryHost::uniform(10, 3, 20.0, 60.0);
        let plan = plan_focus(&host, FocusPosition::new(5, 0), FocusPosition::new(1, 0), true)
            .unwrap();
        assert!(!plan.center_into_view);
    }

    #[test]
    fn test_no_center_for_same_row() {
        let mut host = MemoryHost::uniform(10, 3, 20.0, 60.0);
        host.scroll_to(40.0);
        let plan = plan_focus(&host, FocusPosition::new(4, 0), FocusPosition::new(4, 2), true)
            .unwrap();
        assert!(!plan.center_into_view);
    }
}
