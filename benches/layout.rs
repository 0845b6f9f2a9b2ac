//! Benchmarks for lane assignment.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(
    clippy::expect_used,
    clippy::cast_possible_truncation
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use schedview::layout::{assign_lanes, lay_out_grid};
use schedview::types::{AdjacentStep, Block, Column, Grid};

/// Column of `blocks` blocks laid out as a staircase: each starts one row
/// after the previous one (wrapping at the bottom) and runs `span` rows.
fn staircase(rows: u32, blocks: u32, span: u32) -> Column {
    let mut column = Column::new("bench");
    for i in 0..blocks {
        let start = i % (rows - span + 1);
        column.push(Block::new(start, span));
    }
    column
}

/// A typical widget-sized day: 48 half-hour rows, a handful of tracks
fn bench_day_schedule(c: &mut Criterion) {
    let mut grid = Grid::with_row_count(48);
    for track in 0..8 {
        let mut column = staircase(48, 24, 3 + track % 3);
        column.id = format!("track-{track}");
        grid.columns.push(column);
    }

    c.bench_function("lay_out_day_schedule", |b| {
        b.iter(|| lay_out_grid(black_box(&grid), AdjacentStep::default()).expect("layout"))
    });
}

/// Single crowded columns of increasing size
fn bench_column_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_lanes");
    for &blocks in &[16_u32, 128, 1024] {
        let rows = blocks * 2;
        let column = staircase(rows, blocks, 8);
        group.throughput(Throughput::Elements(u64::from(blocks)));
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &column, |b, column| {
            b.iter(|| assign_lanes(black_box(column), rows).expect("lanes"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_day_schedule, bench_column_scaling);
criterion_main!(benches);
