// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! A display-list [`Surface`] backend.

use crate::geom::{size, Point, Size};

use super::{Rgba, Surface};

/// One recorded drawing call, in device pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Polyline { points: Vec<Point>, color: Rgba, width: f64 },
    Disc { center: Point, radius: f64, color: Rgba },
}

/// Records drawing calls instead of rasterizing them.
///
/// `clear` drops everything recorded so far, so after a full redraw the list holds exactly one
/// frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSurface {
    size: Size,
    device_pixel_ratio: f64,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { size: size(width, height), device_pixel_ratio: 1.0, ops: Vec::new() }
    }

    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = size(width, height);
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn polylines(&self) -> impl Iterator<Item = &[Point]> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Polyline { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
    }

    fn stroke_polyline(&mut self, points: &[Point], color: Rgba, width: f64) {
        self.ops.push(DrawOp::Polyline { points: points.to_vec(), color, width });
    }

    fn fill_disc(&mut self, center: Point, radius: f64, color: Rgba) {
        self.ops.push(DrawOp::Disc { center, radius, color });
    }
}
