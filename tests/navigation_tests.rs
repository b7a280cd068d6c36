//! Grid navigation tests
//!
//! Resolves key presses against in-memory grids and checks the focus target
//! and scroll offset the navigator produces.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridfocus::host::MemoryHost;
use gridfocus::nav::{next_column, GridNavigator, GridSnapshot, RowCells};
use gridfocus::{FocusPosition, GridDirection, KeyInput, NavTarget, RowDirection};
use test_case::test_case;

const ROW_HEIGHT: f64 = 20.0;

fn grid(patterns: &[&str], client_height: f64) -> MemoryHost {
    MemoryHost::from_patterns(patterns, ROW_HEIGHT, client_height).unwrap()
}

fn resolve(host: &MemoryHost, from: (usize, usize), chord: &str) -> Option<NavTarget> {
    let direction = KeyInput::parse_chord(chord)
        .and_then(|input| input.grid_direction())
        .expect("vertical or grid-wide key");
    GridNavigator::new(host)
        .with_declared_columns(Some(host.cell_count(0)))
        .next_focus(FocusPosition::new(from.0, from.1), direction)
}

// ============================================================================
// Arrow keys
// ============================================================================

#[test]
fn test_down_moves_one_row_without_scrolling() {
    let host = MemoryHost::uniform(5, 4, ROW_HEIGHT, 200.0);
    let target = resolve(&host, (2, 1), "Down").unwrap();
    assert_eq!(target.position(), FocusPosition::new(3, 1));
    assert_eq!(target.scroll_to, None);
    assert!(target.scroll_into_view);
}

#[test]
fn test_down_skips_rows_with_empty_cell() {
    let host = grid(&["####", "#.##", "#.##", "#.##", "####"], 200.0);
    let target = resolve(&host, (0, 1), "Down").unwrap();
    assert_eq!(target.position(), FocusPosition::new(4, 1));
}

#[test]
fn test_up_skips_rows_with_empty_cell() {
    let host = grid(&["####", "#.##", "#.##", "#.##", "####"], 200.0);
    let target = resolve(&host, (4, 1), "Up").unwrap();
    assert_eq!(target.position(), FocusPosition::new(0, 1));
}

#[test_case("Up", (0, 2), (0, 2) ; "up at first row stays")]
#[test_case("Down", (2, 2), (2, 2) ; "down at last row stays")]
#[test_case("Down", (0, 3), (0, 3) ; "down with nothing below stays")]
#[test_case("Up", (2, 3), (0, 3) ; "up reaches first row")]
fn test_vertical_boundaries(chord: &str, from: (usize, usize), to: (usize, usize)) {
    let host = grid(&["####", "###.", "###."], 200.0);
    let target = resolve(&host, from, chord).unwrap();
    assert_eq!(target.position(), FocusPosition::new(to.0, to.1));
}

#[test_case(RowDirection::Left, 3, 0 ; "left skips empty cells")]
#[test_case(RowDirection::Right, 0, 3 ; "right skips empty cells")]
#[test_case(RowDirection::Right, 3, 3 ; "right at end stays")]
#[test_case(RowDirection::Home, 2, 0 ; "home")]
#[test_case(RowDirection::End, 0, 3 ; "end")]
fn test_row_moves(direction: RowDirection, from: usize, to: usize) {
    let host = grid(&["#..#"], 200.0);
    assert_eq!(next_column(&RowCells::new(&host, 0), from, direction), to);
}

// ============================================================================
// Ctrl+Home / Ctrl+End
// ============================================================================

#[test]
fn test_ctrl_end_uses_declared_columns() {
    let host = MemoryHost::uniform(3, 5, ROW_HEIGHT, 200.0);
    let target = GridNavigator::new(&host)
        .with_declared_columns(Some(5))
        .next_focus(FocusPosition::new(1, 2), GridDirection::End)
        .unwrap();
    assert_eq!(target.position(), FocusPosition::new(2, 4));
    assert!(target.scroll_into_view);
}

#[test]
fn test_ctrl_home_goes_to_origin() {
    let host = MemoryHost::uniform(3, 5, ROW_HEIGHT, 200.0);
    let target = resolve(&host, (2, 3), "Ctrl+Home").unwrap();
    assert_eq!(target.position(), FocusPosition::ORIGIN);
    assert!(target.scroll_into_view);
}

#[test]
fn test_ctrl_end_without_declared_columns() {
    let host = MemoryHost::uniform(3, 5, ROW_HEIGHT, 200.0);
    let target = GridNavigator::new(&host).next_focus(FocusPosition::ORIGIN, GridDirection::End);
    assert_eq!(target, None);
}

// ============================================================================
// Page Up / Page Down
// ============================================================================

#[test]
fn test_page_up_from_first_row_does_not_scroll() {
    let mut host = MemoryHost::uniform(10, 2, ROW_HEIGHT, 60.0);
    host.scroll_to(40.0);
    let target = resolve(&host, (0, 1), "PageUp").unwrap();
    assert_eq!(target.position(), FocusPosition::new(0, 1));
    assert_eq!(target.scroll_to, None);
    assert!(!target.scroll_into_view);
}

#[test]
fn test_page_up_scrolls_first_row_into_view() {
    let mut host = MemoryHost::uniform(10, 2, ROW_HEIGHT, 60.0);
    host.scroll_to(100.0);
    let target = resolve(&host, (6, 0), "PageUp").unwrap();
    assert_eq!(target.position(), FocusPosition::new(0, 0));
    // Row 0 spans 0..20; its bottom lands at the viewport bottom.
    assert_eq!(target.scroll_to, Some(20.0 - 60.0));
}

#[test]
fn test_page_down_with_last_row_visible() {
    let host = MemoryHost::uniform(3, 2, ROW_HEIGHT, 100.0);
    let target = resolve(&host, (0, 0), "PageDown").unwrap();
    assert_eq!(target.position(), FocusPosition::new(2, 0));
    assert_eq!(target.scroll_to, None);
    assert!(!target.scroll_into_view);
}

#[test]
fn test_page_down_scrolls_candidate_to_top() {
    let host = MemoryHost::uniform(10, 2, ROW_HEIGHT, 60.0);
    let target = resolve(&host, (0, 0), "PageDown").unwrap();
    assert_eq!(target.position(), FocusPosition::new(9, 0));
    assert_eq!(target.scroll_to, Some(180.0));
}

#[test]
fn test_page_down_stops_at_last_occupied_row() {
    let host = grid(
        &["##", "##", "##", "##", "##", "##", "#.", "#.", "#.", "#."],
        60.0,
    );
    let target = resolve(&host, (0, 1), "PageDown").unwrap();
    assert_eq!(target.position(), FocusPosition::new(5, 1));
    assert_eq!(target.scroll_to, Some(100.0));
}

#[test]
fn test_page_down_below_sticky_header() {
    let host = MemoryHost::uniform(10, 2, ROW_HEIGHT, 60.0);
    let target = GridNavigator::new(&host)
        .with_sticky_header_offset(15.0)
        .next_focus(FocusPosition::new(1, 0), GridDirection::PageDown)
        .unwrap();
    assert_eq!(target.scroll_to, Some(180.0 - 15.0));
}

// ============================================================================
// Empty grid
// ============================================================================

#[test_case("Down" ; "down")]
#[test_case("Up" ; "up")]
#[test_case("PageUp" ; "page up")]
#[test_case("PageDown" ; "page down")]
#[test_case("Ctrl+End" ; "ctrl end")]
fn test_empty_grid_resolves_to_origin(chord: &str) {
    let host = MemoryHost::uniform(0, 0, ROW_HEIGHT, 60.0);
    let direction = KeyInput::parse_chord(chord)
        .and_then(|input| input.grid_direction())
        .unwrap();
    let target = GridNavigator::new(&host)
        .with_declared_columns(Some(3))
        .next_focus(FocusPosition::new(4, 2), direction)
        .unwrap();
    assert_eq!(target, NavTarget::origin());
}
