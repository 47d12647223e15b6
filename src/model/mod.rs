// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A chart is a sparse grid of labelled cells, an ordered list of user arrows, and the view state
//! (pan, page, orientation, toggles) the canvas is drawn with.

pub mod arrow;
pub mod coord;
pub mod fixtures;
pub mod grid;
pub mod view;

pub use arrow::Arrow;
pub use coord::{decode, encode, CellKey, CoordError, Coordinate, MAX_MAGNITUDE};
pub use grid::{CellBounds, SparseGrid};
pub use view::{EditorViewState, Orientation, Toggle, Toggles, DEFAULT_GRID_SIZE};
