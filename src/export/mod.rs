// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Static text exports of a chart.

pub mod tikz;

pub use tikz::{export_tikz, MatrixFrame, TikzOptions, MAX_EXTRA_RANGE};
