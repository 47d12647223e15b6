// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editor state snapshots and the operations that produce new ones.
//!
//! [`EditorState`] is immutable from the outside: every operation returns a fresh snapshot and
//! shares untouched parts with its predecessor. A failed operation leaves the snapshot it was
//! applied to unchanged.

use std::sync::Arc;

use thiserror::Error;

use crate::export::{export_tikz, TikzOptions};
use crate::geom::Vector;
use crate::model::{
    Arrow, CellKey, CoordError, Coordinate, EditorViewState, Orientation, SparseGrid, Toggle,
};
use crate::render::{PointerState, RenderScene};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    SetCell { at: Coordinate, content: String },
    DeleteCell { at: Coordinate },
    ClearGrid,
    AddArrow(Arrow),
    RemoveArrow { index: usize },
    ClearArrows,
    SetPage(i32),
    StepPage(i32),
    SetOrientation(Orientation),
    ToggleOrientation,
    SetToggle { toggle: Toggle, visible: bool },
    FlipToggle(Toggle),
    SetPan(Vector),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error(transparent)]
    Coord(#[from] CoordError),
    #[error("arrow index {index} is out of range (arrows={len})")]
    ArrowIndexOutOfRange { index: usize, len: usize },
}

/// What a batch of ops touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delta {
    /// Cells whose content was set or deleted, in ascending order.
    pub cells: Vec<Coordinate>,
    pub grid_cleared: bool,
    pub arrows: bool,
    pub view: bool,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && !self.grid_cleared && !self.arrows && !self.view
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplyResult {
    pub state: EditorState,
    pub applied: usize,
    pub delta: Delta,
}

/// One immutable snapshot of the chart and its view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorState {
    grid: Arc<SparseGrid<String>>,
    arrows: Arc<Vec<Arrow>>,
    view: EditorViewState,
    rev: u64,
}

/// Label given to a freshly created cell on page `r`.
pub fn default_cell_label(r: i32, p: i32, q: i32) -> String {
    format!("E_{{{r}}}^{{{p},{q}}}")
}

impl EditorState {
    pub fn new(view: EditorViewState) -> Self {
        Self { view, ..Self::default() }
    }

    pub fn grid(&self) -> &SparseGrid<String> {
        &self.grid
    }

    /// Occupied cells in ascending key order.
    pub fn cells(&self) -> crate::model::grid::Iter<'_, String> {
        self.grid.iter()
    }

    pub fn cell(&self, at: Coordinate) -> Option<&str> {
        self.grid.get_at(at).map(String::as_str)
    }

    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }

    pub fn view(&self) -> &EditorViewState {
        &self.view
    }

    /// Number of successful applications that led to this snapshot.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn apply(&self, op: &Op) -> Result<EditorState, ApplyError> {
        apply_ops(self, std::slice::from_ref(op)).map(|result| result.state)
    }

    /// Exports the snapshot using the current page and orientation.
    pub fn export(&self, options: &TikzOptions) -> String {
        let options = TikzOptions {
            page: self.view.page,
            orientation: self.view.orientation,
            ..*options
        };
        export_tikz(&self.grid, &self.arrows, &options)
    }

    pub fn scene(&self, pointer: PointerState, connect_start: Option<Coordinate>) -> RenderScene<'_, String> {
        RenderScene {
            grid: &self.grid,
            arrows: &self.arrows,
            view: &self.view,
            pointer,
            connect_start,
        }
    }
}

/// Applies `ops` in order, all or nothing.
pub fn apply_ops(state: &EditorState, ops: &[Op]) -> Result<ApplyResult, ApplyError> {
    if ops.is_empty() {
        return Ok(ApplyResult { state: state.clone(), applied: 0, delta: Delta::default() });
    }

    let mut next = state.clone();
    let mut delta = Delta::default();
    for op in ops {
        apply_op(&mut next, op, &mut delta)?;
    }

    delta.cells.sort();
    delta.cells.dedup();
    next.rev += 1;
    tracing::debug!(rev = next.rev, applied = ops.len(), ?delta, "applied ops");

    Ok(ApplyResult { state: next, applied: ops.len(), delta })
}

// Per-op mutation helpers used by `apply_ops`.
include!("ops_impl.rs");

#[cfg(test)]
mod tests;
