// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark charts (no RNG).

use sseqed::model::{fixtures, Arrow, Coordinate, SparseGrid};

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Demo,
    Block32,
    Scattered,
}

impl Case {
    pub const ALL: [Case; 3] = [Case::Demo, Case::Block32, Case::Scattered];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Block32 => "block_32",
            Self::Scattered => "scattered_2k",
        }
    }
}

pub struct Chart {
    pub grid: SparseGrid<String>,
    pub arrows: Vec<Arrow>,
}

pub fn chart(case: Case) -> Chart {
    let grid = match case {
        Case::Demo => fixtures::demo_grid(),
        Case::Block32 => fixtures::dense_block(32),
        Case::Scattered => scattered(2_000),
    };
    let arrows = scattered_arrows(&grid, 64);
    Chart { grid, arrows }
}

/// `count` cells spread over ±2000 by two co-prime strides.
pub fn scattered(count: i32) -> SparseGrid<String> {
    let mut grid = SparseGrid::new();
    for i in 0..count {
        let p = (i * 37) % 4001 - 2000;
        let q = (i * 91) % 3989 - 1994;
        grid.set(p, q, format!("x_{{{i}}}")).expect("bench cells are in range");
    }
    grid
}

fn scattered_arrows(grid: &SparseGrid<String>, count: usize) -> Vec<Arrow> {
    let cells = grid.coordinates().collect::<Vec<_>>();
    if cells.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|i| {
            let from = cells[i % cells.len()];
            let to = cells[(i * 7 + 3) % cells.len()];
            Arrow::new(from, to)
        })
        .collect()
}

/// Coordinates covering every sign combination and both range extremes.
pub fn coordinates(count: i32) -> Vec<Coordinate> {
    (0..count)
        .map(|i| {
            let x = (i * 7_919) % 65_535 - 32_767;
            let y = (i * 104_729) % 65_535 - 32_767;
            Coordinate::new(x, y)
        })
        .collect()
}
