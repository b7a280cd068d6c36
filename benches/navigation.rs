//! Benchmarks for focus navigation on large grids.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gridfocus::grid::DataGrid;
use gridfocus::host::MemoryHost;
use gridfocus::nav::GridNavigator;
use gridfocus::{FocusPosition, GridDirection, KeyInput, NavKey};

/// Grid where only the first and last rows have cells in column 1, so
/// vertical moves scan every row in between.
fn sparse_grid(rows: usize) -> MemoryHost {
    let mut host = MemoryHost::uniform(rows, 8, 24.0, 600.0);
    for row in 1..rows.saturating_sub(1) {
        host.set_occupied(row, 1, false);
    }
    host
}

fn bench_arrow_down_sparse(c: &mut Criterion) {
    let mut group = c.benchmark_group("arrow_down_sparse");
    for rows in [1_000usize, 10_000, 100_000] {
        let host = sparse_grid(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &host, |b, host| {
            b.iter(|| {
                GridNavigator::new(host)
                    .next_focus(black_box(FocusPosition::new(0, 1)), GridDirection::Down)
            })
        });
    }
    group.finish();
}

fn bench_page_down(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_down");
    for rows in [1_000usize, 10_000, 100_000] {
        let host = MemoryHost::uniform(rows, 8, 24.0, 600.0);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &host, |b, host| {
            b.iter(|| {
                GridNavigator::new(host)
                    .next_focus(black_box(FocusPosition::new(10, 3)), GridDirection::PageDown)
            })
        });
    }
    group.finish();
}

/// Full key handling through the grid controller, row first then grid.
fn bench_keydown_walk(c: &mut Criterion) {
    c.bench_function("keydown_walk_1000", |b| {
        b.iter(|| {
            let mut host = MemoryHost::uniform(1_000, 8, 24.0, 600.0);
            let mut grid = DataGrid::new();
            grid.connect(&mut host);
            for _ in 0..100 {
                grid.handle_keydown(&mut host, KeyInput::new(NavKey::ArrowDown));
                grid.handle_keydown(&mut host, KeyInput::new(NavKey::ArrowRight));
            }
            grid.handle_keydown(&mut host, KeyInput::with_ctrl(NavKey::Home));
            black_box(grid.focus_position())
        })
    });
}

criterion_group!(
    benches,
    bench_arrow_down_sparse,
    bench_page_down,
    bench_keydown_walk
);
criterion_main!(benches);
