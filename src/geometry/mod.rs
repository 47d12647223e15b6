// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Spectral sequence page geometry.
//!
//! On page `r` the differential connects `E_r^{p,q}` with its chain neighbors
//! `(p ± r, q ± (1 - r))`. Cells sharing a diagonal index lie on the same chain. Both the canvas
//! renderer and the TikZ exporter derive their differential connectors from
//! [`cell_segments`], so the two outputs always agree on connectivity.

use smallvec::SmallVec;

use crate::model::{Coordinate, Orientation, SparseGrid};

/// A position `(r, p, q)` on page `r` of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceCoord {
    pub r: i32,
    pub p: i32,
    pub q: i32,
}

impl SequenceCoord {
    pub const fn new(r: i32, p: i32, q: i32) -> Self {
        Self { r, p, q }
    }

    pub fn at(r: i32, cell: Coordinate) -> Self {
        Self { r, p: cell.x, q: cell.y }
    }

    pub fn cell(self) -> Coordinate {
        Coordinate::new(self.p, self.q)
    }

    pub fn diagonal_index(self) -> i64 {
        diagonal_index(self.r, self.p, self.q)
    }

    pub fn neighbor(self, t: i32) -> Coordinate {
        chain_neighbor(t, self.r, self.p, self.q)
    }
}

/// The chain invariant `r*q - p*(1 - r)`.
///
/// Two cells on the same page lie on the same chain iff their indices are equal.
pub fn diagonal_index(r: i32, p: i32, q: i32) -> i64 {
    let (r, p, q) = (i64::from(r), i64::from(p), i64::from(q));
    r * q - p * (1 - r)
}

/// The cell `t` steps along the page-`r` chain through `(p, q)`.
///
/// Arithmetic wraps for `i32`-overflowing inputs; such cells are outside the encodable range and
/// are never occupied.
pub fn chain_neighbor(t: i32, r: i32, p: i32, q: i32) -> Coordinate {
    let dp = t.wrapping_mul(r);
    let dq = t.wrapping_mul(1i32.wrapping_sub(r));
    Coordinate::new(p.wrapping_add(dp), q.wrapping_add(dq))
}

/// A directed differential connector between two cell centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub from: Coordinate,
    pub to: Coordinate,
    /// Diagonal index of the chain the segment lies on.
    pub chain: i64,
}

impl Segment {
    pub fn reversed(self) -> Self {
        Self { from: self.to, to: self.from, chain: self.chain }
    }

    /// The undirected edge, with endpoints in a canonical order.
    pub fn undirected(self) -> (Coordinate, Coordinate) {
        if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }
}

fn oriented(lower: Coordinate, upper: Coordinate, chain: i64, orientation: Orientation) -> Segment {
    // `upper` is the `+1` neighbor of `lower`.
    match orientation {
        Orientation::Homological => Segment { from: upper, to: lower, chain },
        Orientation::Cohomological => Segment { from: lower, to: upper, chain },
    }
}

/// The differential segments owned by the occupied `cell` on page `r`.
///
/// Each edge `{c, next(c)}` is owned by `c` when `c` is occupied. The backward edge
/// `{prev(c), c}` is owned by `c` only when `prev(c)` is empty, so that iterating all occupied cells
/// produces every edge touching an occupied cell exactly once.
pub fn cell_segments<T>(
    grid: &SparseGrid<T>,
    r: i32,
    orientation: Orientation,
    cell: Coordinate,
) -> SmallVec<[Segment; 2]> {
    let here = SequenceCoord::at(r, cell);
    let chain = here.diagonal_index();
    let next = here.neighbor(1);
    let prev = here.neighbor(-1);

    let mut out = SmallVec::new();
    out.push(oriented(cell, next, chain, orientation));
    if !grid.contains(prev) {
        out.push(oriented(prev, cell, chain, orientation));
    }
    out
}

/// All differential segments of page `r`, in grid iteration order.
pub fn differential_segments<T>(
    grid: &SparseGrid<T>,
    r: i32,
    orientation: Orientation,
) -> Vec<Segment> {
    grid.coordinates()
        .flat_map(|cell| cell_segments(grid, r, orientation, cell))
        .collect()
}
