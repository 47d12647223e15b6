// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::coord::Coordinate;

/// A user-drawn connection between two cells.
///
/// Differentials are derived from the grid and never stored as arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Arrow {
    pub from: Coordinate,
    pub to: Coordinate,
}

impl Arrow {
    pub const fn new(from: Coordinate, to: Coordinate) -> Self {
        Self { from, to }
    }

    pub fn reversed(self) -> Self {
        Self { from: self.to, to: self.from }
    }
}

impl fmt::Display for Arrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.from, self.to)
    }
}
