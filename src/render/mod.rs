// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canvas rendering for spectral sequence charts.
//!
//! Rendering is a pure function of the chart snapshot plus pointer state. Backends implement the
//! small device-pixel [`Surface`] trait; [`Pen`] layers a canvas-2D style transform stack, path
//! building and style state on top of it.

use std::fmt;

use crate::geom::{Point, Size, Transform, Vector};

pub mod arrow;
pub mod canvas;
pub mod recording;
pub mod view;

pub use arrow::{draw_arrow, ArrowGeometry, ArrowWing, Contraction, HEAD_LENGTH, HEAD_WIDTH};
pub use canvas::{label_anchors, render_canvas, RenderScene, RenderedFrame};
pub use recording::{DrawOp, RecordingSurface};
pub use view::{PointerState, ViewTransform};

/// Line segments used to flatten one quadratic curve.
const QUADRATIC_STEPS: usize = 8;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/// A device-pixel drawing target.
///
/// Coordinates passed to a surface are already transformed: `(0, 0)` is the top-left device pixel
/// and `y` grows downwards.
pub trait Surface {
    /// Size in device pixels. A surface that has not been laid out yet reports zero.
    fn size(&self) -> Size;

    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }

    fn clear(&mut self);

    fn stroke_polyline(&mut self, points: &[Point], color: Rgba, width: f64);

    fn fill_disc(&mut self, center: Point, radius: f64, color: Rgba);
}

#[derive(Debug, Clone, Copy)]
struct PenState {
    transform: Transform,
    stroke_color: Rgba,
    fill_color: Rgba,
    line_width: f64,
}

impl Default for PenState {
    fn default() -> Self {
        Self {
            transform: Transform::identity(),
            stroke_color: Rgba::BLACK,
            fill_color: Rgba::BLACK,
            line_width: 1.0,
        }
    }
}

/// Canvas-2D style drawing state over a [`Surface`].
///
/// Path points are transformed when they are added, as on an HTML canvas, so changing the
/// transform mid-path only affects later points.
pub struct Pen<'s, S: Surface + ?Sized> {
    surface: &'s mut S,
    state: PenState,
    saved: Vec<PenState>,
    subpaths: Vec<Vec<Point>>,
}

impl<'s, S: Surface + ?Sized> Pen<'s, S> {
    pub fn new(surface: &'s mut S) -> Self {
        Self { surface, state: PenState::default(), saved: Vec::new(), subpaths: Vec::new() }
    }

    pub fn save(&mut self) {
        self.saved.push(self.state);
    }

    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    pub fn reset_transform(&mut self) {
        self.state.transform = Transform::identity();
    }

    pub fn translate(&mut self, offset: Vector) {
        self.state.transform = self.state.transform.pre_translate(offset);
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.state.transform = self.state.transform.pre_scale(sx, sy);
    }

    pub fn clear(&mut self) {
        self.surface.clear();
    }

    pub fn set_stroke_color(&mut self, color: Rgba) {
        self.state.stroke_color = color;
    }

    pub fn set_fill_color(&mut self, color: Rgba) {
        self.state.fill_color = color;
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    pub fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    pub fn move_to(&mut self, to: Point) {
        let to = self.state.transform.transform_point(to);
        self.subpaths.push(vec![to]);
    }

    pub fn line_to(&mut self, to: Point) {
        let to = self.state.transform.transform_point(to);
        match self.subpaths.last_mut() {
            Some(subpath) => subpath.push(to),
            None => self.subpaths.push(vec![to]),
        }
    }

    pub fn quadratic_curve_to(&mut self, control: Point, to: Point) {
        let control = self.state.transform.transform_point(control);
        let to = self.state.transform.transform_point(to);

        let Some(from) = self.subpaths.last().and_then(|subpath| subpath.last()).copied() else {
            self.subpaths.push(vec![to]);
            return;
        };

        let subpath = self.subpaths.last_mut().expect("checked above");
        for step in 1..=QUADRATIC_STEPS {
            let t = step as f64 / QUADRATIC_STEPS as f64;
            let u = 1.0 - t;
            let x = u * u * from.x + 2.0 * u * t * control.x + t * t * to.x;
            let y = u * u * from.y + 2.0 * u * t * control.y + t * t * to.y;
            subpath.push(Point::new(x, y));
        }
    }

    pub fn stroke(&mut self) {
        let width = self.state.line_width * self.linear_scale();
        let color = self.state.stroke_color;
        for subpath in &self.subpaths {
            if subpath.len() >= 2 {
                self.surface.stroke_polyline(subpath, color, width);
            }
        }
    }

    /// Fills a circle given in user space.
    pub fn fill_circle(&mut self, center: Point, radius: f64) {
        let center = self.state.transform.transform_point(center);
        let radius = radius * self.linear_scale();
        self.surface.fill_disc(center, radius, self.state.fill_color);
    }

    fn linear_scale(&self) -> f64 {
        self.state.transform.determinant().abs().sqrt()
    }
}
