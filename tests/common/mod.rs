//! Shared fixtures for the integration tests.
//!
//! - `column`: build a column from `(start_row, span)` pairs
//! - `max_active`: brute-force count of blocks active at the busiest row
//! - `Lcg`: tiny deterministic generator for randomised columns
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation
)]

use schedview::types::{Block, Column};

/// Column "c" holding one block per `(start_row, span)` pair, in order
pub fn column(blocks: &[(u32, u32)]) -> Column {
    let mut column = Column::new("c");
    for &(start, span) in blocks {
        column.push(Block::new(start, span));
    }
    column
}

/// Largest number of blocks covering a single row, counted row by row
pub fn max_active(column: &Column, row_count: u32) -> u32 {
    (0..row_count)
        .map(|row| {
            column
                .blocks
                .iter()
                .filter(|b| b.start_row <= row && row < b.start_row + b.span)
                .count() as u32
        })
        .max()
        .unwrap_or(0)
}

/// Linear congruential generator; same seed, same sequence
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Next value in `0..bound`
    pub fn below(&mut self, bound: u32) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((self.0 >> 33) % u64::from(bound)) as u32
    }

    /// A valid random column of `blocks` blocks in `row_count` rows
    pub fn column(&mut self, row_count: u32, blocks: usize, max_span: u32) -> Column {
        let mut pairs = Vec::with_capacity(blocks);
        for _ in 0..blocks {
            let start = self.below(row_count);
            let room = row_count - start;
            let span = 1 + self.below(room.min(max_span));
            pairs.push((start, span));
        }
        column(&pairs)
    }
}
