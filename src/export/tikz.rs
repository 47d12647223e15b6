// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! TikZ `matrix of math nodes` export.
//!
//! The grid becomes a matrix whose rows run from the highest `q` down to the lowest and whose
//! columns run from the lowest `p` up. Differentials are emitted only when both ends land inside
//! the matrix; user arrows are emitted as-is and may reference positions outside of it.

use crate::geometry::cell_segments;
use crate::model::{Arrow, Coordinate, Orientation, SparseGrid};

const INDENT: &str = "    ";
const AXIS_LENGTH_CELLS: u32 = 4;

/// Largest `extra_range` honored by the export. The matrix is written cell by cell, so larger
/// paddings are clamped to this.
pub const MAX_EXTRA_RANGE: u32 = 256;

/// Everything that shapes one export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TikzOptions {
    pub page: i32,
    pub orientation: Orientation,
    /// Empty rows and columns added around the occupied cells, at most [`MAX_EXTRA_RANGE`].
    pub extra_range: u32,
    pub minimum_width_ex: u32,
    pub minimum_height_ex: u32,
    pub column_sep_ex: u32,
    pub row_sep_ex: u32,
    pub show_differentials: bool,
    pub show_arrows: bool,
    pub show_axes: bool,
}

impl Default for TikzOptions {
    fn default() -> Self {
        Self {
            page: 0,
            orientation: Orientation::Homological,
            extra_range: 0,
            minimum_width_ex: 5,
            minimum_height_ex: 5,
            column_sep_ex: 1,
            row_sep_ex: 1,
            show_differentials: true,
            show_arrows: true,
            show_axes: true,
        }
    }
}

/// The `p × q` box a matrix covers.
///
/// The box spans every occupied cell and the origin, padded by `extra_range` on every side, plus
/// one more row below for the horizontal axis. Padding is clamped to [`MAX_EXTRA_RANGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixFrame {
    pub p_min: i32,
    pub p_max: i32,
    pub q_min: i32,
    pub q_max: i32,
}

impl MatrixFrame {
    pub fn from_grid<T>(grid: &SparseGrid<T>, extra_range: u32) -> Self {
        let (mut p_min, mut p_max, mut q_min, mut q_max) = (0, 0, 0, 0);
        if let Some(bounds) = grid.bounds() {
            p_min = bounds.min.x.min(0);
            p_max = bounds.max.x.max(0);
            q_min = bounds.min.y.min(0);
            q_max = bounds.max.y.max(0);
        }

        // Lossless: the clamp keeps the padding far below `i32::MAX`.
        let pad = extra_range.min(MAX_EXTRA_RANGE) as i32;
        Self {
            p_min: p_min.saturating_sub(pad),
            p_max: p_max.saturating_add(pad),
            q_min: q_min.saturating_sub(pad).saturating_sub(1),
            q_max: q_max.saturating_add(pad),
        }
    }

    pub fn rows(&self) -> usize {
        (i64::from(self.q_max) - i64::from(self.q_min) + 1) as usize
    }

    pub fn columns(&self) -> usize {
        (i64::from(self.p_max) - i64::from(self.p_min) + 1) as usize
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        (self.p_min..=self.p_max).contains(&coord.x) && (self.q_min..=self.q_max).contains(&coord.y)
    }

    /// 1-based `(row, column)` of a cell. Cells outside the frame yield positions outside
    /// `1..=rows` and `1..=columns`.
    pub fn position(&self, coord: Coordinate) -> (i64, i64) {
        let row = i64::from(self.q_max) - i64::from(coord.y) + 1;
        let column = i64::from(coord.x) - i64::from(self.p_min) + 1;
        (row, column)
    }
}

struct Writer {
    out: String,
    ints: itoa::Buffer,
}

impl Writer {
    fn new() -> Self {
        Self { out: String::new(), ints: itoa::Buffer::new() }
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn int<I: itoa::Integer>(&mut self, value: I) {
        self.out.push_str(self.ints.format(value));
    }

    fn node(&mut self, frame: &MatrixFrame, coord: Coordinate) {
        let (row, column) = frame.position(coord);
        self.out.push_str("(m-");
        self.int(row);
        self.out.push('-');
        self.int(column);
    }

    fn connector(&mut self, frame: &MatrixFrame, from: Coordinate, to: Coordinate) {
        self.out.push_str(INDENT);
        self.out.push_str("\\draw[->] ");
        self.node(frame, from);
        self.out.push_str(") -- ");
        self.node(frame, to);
        self.out.push_str(");\n");
    }

    fn axis(&mut self, frame: &MatrixFrame, offset: (u32, u32)) {
        self.out.push_str(INDENT);
        self.out.push_str("\\draw[->, thick] ");
        self.node(frame, Coordinate::ORIGIN);
        self.out.push_str(".south west) -- ++(");
        for (idx, length) in [offset.0, offset.1].into_iter().enumerate() {
            if idx > 0 {
                self.out.push_str(", ");
            }
            if length == 0 {
                self.out.push('0');
            } else {
                self.int(length);
                self.out.push_str("ex");
            }
        }
        self.out.push_str(");\n");
    }
}

/// Renders the chart as a TikZ picture.
pub fn export_tikz(grid: &SparseGrid<String>, arrows: &[Arrow], options: &TikzOptions) -> String {
    let frame = MatrixFrame::from_grid(grid, options.extra_range);
    let mut w = Writer::new();

    w.line(0, "\\begin{tikzpicture}");
    w.line(1, "\\matrix (m) [");
    w.line(2, "matrix of math nodes,");
    w.line(2, "nodes in empty cells,");
    let nodes = format!(
        "nodes={{minimum width={}ex, minimum height={}ex}},",
        options.minimum_width_ex, options.minimum_height_ex
    );
    w.line(2, &nodes);
    w.line(2, &format!("column sep={}ex,", options.column_sep_ex));
    w.line(2, &format!("row sep={}ex", options.row_sep_ex));
    w.line(1, "]{");

    for q in (frame.q_min..=frame.q_max).rev() {
        w.out.push_str(INDENT);
        w.out.push_str(INDENT);
        for p in frame.p_min..=frame.p_max {
            if p > frame.p_min {
                w.out.push_str(" & ");
            }
            if let Some(label) = grid.get(p, q) {
                w.out.push_str(label);
            }
        }
        w.out.push_str(" \\\\\n");
    }
    w.line(1, "};");
    w.line(0, "");

    if options.show_differentials {
        w.line(1, "% Differentials");
        for cell in grid.coordinates() {
            for segment in cell_segments(grid, options.page, options.orientation, cell) {
                if frame.contains(segment.from) && frame.contains(segment.to) {
                    w.connector(&frame, segment.from, segment.to);
                }
            }
        }
    }

    if options.show_arrows {
        w.line(1, "% Arrows");
        for arrow in arrows {
            w.connector(&frame, arrow.from, arrow.to);
        }
    }

    if options.show_axes {
        w.line(1, "% Axes");
        let horizontal = AXIS_LENGTH_CELLS
            .saturating_mul(options.minimum_width_ex.saturating_add(options.column_sep_ex));
        let vertical = AXIS_LENGTH_CELLS
            .saturating_mul(options.minimum_height_ex.saturating_add(options.row_sep_ex));
        w.axis(&frame, (horizontal, 0));
        w.axis(&frame, (0, vertical));
    }

    w.line(0, "\\end{tikzpicture}");
    w.out
}
