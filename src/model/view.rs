// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom::{vector, Vector};

/// Pixels per grid cell on a canvas with a 16px root font (`6rem`).
pub const DEFAULT_GRID_SIZE: f64 = 96.0;

/// Which chain neighbor is the source of a differential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// `d_r : E_{p,q} → E_{p-r,q+r-1}`.
    #[default]
    Homological,
    /// `d_r : E^{p,q} → E^{p+r,q-r+1}`.
    Cohomological,
}

impl Orientation {
    pub fn toggled(self) -> Self {
        match self {
            Self::Homological => Self::Cohomological,
            Self::Cohomological => Self::Homological,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Homological => "homological",
            Self::Cohomological => "cohomological",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A visibility toggle of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    DotGrid,
    Axes,
    Differentials,
    ExtraArrows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggles {
    pub dot_grid: bool,
    pub axes: bool,
    pub differentials: bool,
    pub extra_arrows: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Self { dot_grid: true, axes: true, differentials: true, extra_arrows: true }
    }
}

impl Toggles {
    pub fn get(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::DotGrid => self.dot_grid,
            Toggle::Axes => self.axes,
            Toggle::Differentials => self.differentials,
            Toggle::ExtraArrows => self.extra_arrows,
        }
    }

    pub fn set(&mut self, toggle: Toggle, visible: bool) {
        let slot = match toggle {
            Toggle::DotGrid => &mut self.dot_grid,
            Toggle::Axes => &mut self.axes,
            Toggle::Differentials => &mut self.differentials,
            Toggle::ExtraArrows => &mut self.extra_arrows,
        };
        *slot = visible;
    }
}

/// Pan, page and visibility state of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorViewState {
    pub pan: Vector,
    pub page: i32,
    pub orientation: Orientation,
    pub toggles: Toggles,
    pub grid_size: f64,
}

impl Default for EditorViewState {
    fn default() -> Self {
        Self {
            pan: vector(0.0, 0.0),
            page: 0,
            orientation: Orientation::Homological,
            toggles: Toggles::default(),
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Orientation, Toggle, Toggles};

    #[test]
    fn orientation_toggles_back_and_forth() {
        assert_eq!(Orientation::Homological.toggled(), Orientation::Cohomological);
        assert_eq!(Orientation::Cohomological.toggled().toggled(), Orientation::Cohomological);
    }

    #[test]
    fn orientation_uses_lowercase_names() {
        let json = serde_json::to_string(&Orientation::Cohomological).expect("serialize");
        assert_eq!(json, "\"cohomological\"");
        assert_eq!(Orientation::Homological.to_string(), "homological");
    }

    #[test]
    fn toggles_default_to_visible_and_can_be_set() {
        let mut toggles = Toggles::default();
        for toggle in [Toggle::DotGrid, Toggle::Axes, Toggle::Differentials, Toggle::ExtraArrows] {
            assert!(toggles.get(toggle));
        }
        toggles.set(Toggle::Axes, false);
        assert!(!toggles.get(Toggle::Axes));
        assert!(toggles.get(Toggle::DotGrid));
    }
}
