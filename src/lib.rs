// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Sseqed: a spectral sequence chart editor with TikZ export.
//!
//! Charts live on an unbounded integer lattice indexed by a bijective Morton key
//! ([`model`]). Differentials are derived from the page and orientation ([`geometry`]), drawn by
//! a surface-agnostic canvas renderer ([`render`]) and exported as a TikZ matrix ([`export`]).
//! Editing goes through immutable snapshots ([`ops`]) driven by the terminal front end ([`tui`]).

pub mod config;
pub mod export;
pub mod geom;
pub mod geometry;
pub mod gesture;
pub mod model;
pub mod ops;
pub mod render;
pub mod tui;
