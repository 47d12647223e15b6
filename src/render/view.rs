// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! World ↔ pixel mapping of the chart canvas.
//!
//! World space has its origin at the center of cell `(0, 0)`, one cell per `grid_size` units and
//! `y` pointing up. CSS pixels have their origin at the top-left corner of the surface and `y`
//! pointing down; device pixels are CSS pixels scaled by the device pixel ratio.

use crate::geom::{point, vector, Point, Size, Transform, Vector};
use crate::model::Coordinate;

/// Pointer state sampled by the UI, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub position: Option<Point>,
    pub primary_down: bool,
    /// The connect modifier (Shift on a canvas, Shift or Alt in the terminal).
    pub modifier: bool,
}

impl PointerState {
    pub fn at(position: Point) -> Self {
        Self { position: Some(position), ..Self::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    world_to_device: Transform,
    device_to_world: Transform,
    device_pixel_ratio: f64,
    grid_size: f64,
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl ViewTransform {
    /// Builds the transform for a surface of `surface_size` device pixels.
    ///
    /// Returns `None` when the surface is unsized or the inputs do not yield an invertible
    /// transform.
    pub fn new(surface_size: Size, device_pixel_ratio: f64, pan: Vector, grid_size: f64) -> Option<Self> {
        if !is_positive(surface_size.width)
            || !is_positive(surface_size.height)
            || !is_positive(device_pixel_ratio)
            || !is_positive(grid_size)
            || !pan.x.is_finite()
            || !pan.y.is_finite()
        {
            return None;
        }

        let css_width = surface_size.width / device_pixel_ratio;
        let css_height = surface_size.height / device_pixel_ratio;

        let world_to_device = Transform::identity()
            .pre_scale(device_pixel_ratio, device_pixel_ratio)
            .pre_translate(vector(css_width / 2.0 + pan.x, css_height / 2.0 + pan.y))
            .pre_scale(1.0, -1.0);
        let device_to_world = world_to_device.inverse()?;

        Some(Self { world_to_device, device_to_world, device_pixel_ratio, grid_size })
    }

    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    pub fn world_to_device(&self, world: Point) -> Point {
        self.world_to_device.transform_point(world)
    }

    pub fn world_to_pixel(&self, world: Point) -> Point {
        let device = self.world_to_device(world);
        point(device.x / self.device_pixel_ratio, device.y / self.device_pixel_ratio)
    }

    /// Maps a pointer position in CSS pixels into world space.
    pub fn pixel_to_world(&self, css: Point) -> Point {
        let device = point(css.x * self.device_pixel_ratio, css.y * self.device_pixel_ratio);
        self.device_to_world.transform_point(device)
    }

    /// The cell whose center is nearest to `world`.
    pub fn world_to_cell(&self, world: Point) -> Coordinate {
        let snap = |v: f64| (v / self.grid_size + 0.5).floor() as i32;
        Coordinate::new(snap(world.x), snap(world.y))
    }

    pub fn pixel_to_cell(&self, css: Point) -> Coordinate {
        self.world_to_cell(self.pixel_to_world(css))
    }

    pub fn cell_center(&self, cell: Coordinate) -> Point {
        point(f64::from(cell.x) * self.grid_size, f64::from(cell.y) * self.grid_size)
    }
}
