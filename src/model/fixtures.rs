// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Small charts shared by the demo, tests and benches.

use super::grid::SparseGrid;

fn label(page: i32, p: i32, q: i32) -> String {
    format!("E_{page}^{{{p},{q}}}")
}

fn grid_from(page: i32, cells: &[(i32, i32)]) -> SparseGrid<String> {
    let mut grid = SparseGrid::new();
    for &(p, q) in cells {
        grid.set(p, q, label(page, p, q)).expect("fixture cells are in range");
    }
    grid
}

/// The chart the editor opens with in demo mode.
pub fn demo_grid() -> SparseGrid<String> {
    grid_from(1, &[(0, 0), (1, 0), (0, 1), (2, 2), (-3, 2)])
}

/// Five cells around the origin, including one in the negative quadrant.
pub fn five_cell_grid() -> SparseGrid<String> {
    grid_from(1, &[(-1, -1), (0, 0), (1, 0), (0, 1), (2, 2)])
}

/// A dense `size × size` block anchored at the origin.
pub fn dense_block(size: i32) -> SparseGrid<String> {
    let mut grid = SparseGrid::new();
    for p in 0..size {
        for q in 0..size {
            grid.set(p, q, label(2, p, q)).expect("fixture cells are in range");
        }
    }
    grid
}
