// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON configuration seeding the initial editor state.
//!
//! Every field is optional. The file is only ever read; edits made in the editor are not written
//! back.
//!
//! ```json
//! {
//!   "page": 2,
//!   "orientation": "cohomological",
//!   "show_dot_grid": false,
//!   "export": { "extra_range": 1 },
//!   "cells": [{ "p": 0, "q": 0, "label": "\\mathbb{Z}" }],
//!   "arrows": [{ "from": [0, 0], "to": [2, 1] }]
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::export::{TikzOptions, MAX_EXTRA_RANGE};
use crate::model::{Arrow, Coordinate, EditorViewState, Orientation, Toggles};
use crate::ops::{apply_ops, ApplyError, EditorState, Op};

/// Grid size used by the terminal canvas, in virtual pixels per cell.
pub const TUI_GRID_SIZE: f64 = 24.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}", path = path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid config {path}: {source}", path = path.display())]
    Json { path: PathBuf, source: serde_json::Error },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TikzConfig {
    #[serde(deserialize_with = "bounded_extra_range")]
    pub extra_range: u32,
    pub minimum_width_ex: u32,
    pub minimum_height_ex: u32,
    pub column_sep_ex: u32,
    pub row_sep_ex: u32,
    pub show_differentials: bool,
    pub show_arrows: bool,
    pub show_axes: bool,
}

impl Default for TikzConfig {
    fn default() -> Self {
        let options = TikzOptions::default();
        Self {
            extra_range: options.extra_range,
            minimum_width_ex: options.minimum_width_ex,
            minimum_height_ex: options.minimum_height_ex,
            column_sep_ex: options.column_sep_ex,
            row_sep_ex: options.row_sep_ex,
            show_differentials: options.show_differentials,
            show_arrows: options.show_arrows,
            show_axes: options.show_axes,
        }
    }
}

fn bounded_extra_range<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = u32::deserialize(deserializer)?;
    if value > MAX_EXTRA_RANGE {
        return Err(de::Error::custom(format_args!(
            "extra_range {value} exceeds the maximum of {MAX_EXTRA_RANGE}"
        )));
    }
    Ok(value)
}

impl TikzConfig {
    /// Export options for `view`'s page and orientation.
    pub fn options_for(&self, view: &EditorViewState) -> TikzOptions {
        TikzOptions {
            page: view.page,
            orientation: view.orientation,
            extra_range: self.extra_range,
            minimum_width_ex: self.minimum_width_ex,
            minimum_height_ex: self.minimum_height_ex,
            column_sep_ex: self.column_sep_ex,
            row_sep_ex: self.row_sep_ex,
            show_differentials: self.show_differentials,
            show_arrows: self.show_arrows,
            show_axes: self.show_axes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellConfig {
    pub p: i32,
    pub q: i32,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub page: i32,
    pub orientation: Orientation,
    pub show_dot_grid: bool,
    pub show_axes: bool,
    pub show_differentials: bool,
    pub show_extra_arrows: bool,
    pub grid_size: f64,
    pub export: TikzConfig,
    pub cells: Vec<CellConfig>,
    pub arrows: Vec<Arrow>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let toggles = Toggles::default();
        Self {
            page: 0,
            orientation: Orientation::default(),
            show_dot_grid: toggles.dot_grid,
            show_axes: toggles.axes,
            show_differentials: toggles.differentials,
            show_extra_arrows: toggles.extra_arrows,
            grid_size: TUI_GRID_SIZE,
            export: TikzConfig::default(),
            cells: Vec::new(),
            arrows: Vec::new(),
        }
    }
}

impl EditorConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_owned(), source })?;
        Self::from_json(&raw).map_err(|source| ConfigError::Json { path: path.to_owned(), source })
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn view(&self) -> EditorViewState {
        EditorViewState {
            page: self.page,
            orientation: self.orientation,
            toggles: Toggles {
                dot_grid: self.show_dot_grid,
                axes: self.show_axes,
                differentials: self.show_differentials,
                extra_arrows: self.show_extra_arrows,
            },
            grid_size: self.grid_size,
            ..EditorViewState::default()
        }
    }

    pub fn export_options(&self) -> TikzOptions {
        self.export.options_for(&self.view())
    }

    /// Builds the initial snapshot. Seed cells go through the regular ops, so out-of-range
    /// coordinates are reported instead of dropped.
    pub fn into_state(self) -> Result<EditorState, ApplyError> {
        let view = self.view();
        let ops = self
            .cells
            .into_iter()
            .map(|cell| Op::SetCell { at: Coordinate::new(cell.p, cell.q), content: cell.label })
            .chain(self.arrows.into_iter().map(Op::AddArrow))
            .collect::<Vec<_>>();

        let seeded = apply_ops(&EditorState::new(view), &ops)?;
        tracing::info!(
            cells = seeded.state.grid().len(),
            arrows = seeded.state.arrows().len(),
            "seeded editor state"
        );
        Ok(seeded.state)
    }
}
