// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::geom::{point, vector, Point};
use crate::geometry::{cell_segments, diagonal_index};
use crate::model::{Arrow, Coordinate, EditorViewState, SparseGrid};

use super::arrow::{draw_arrow, Contraction};
use super::view::{PointerState, ViewTransform};
use super::{Pen, Rgba, Surface};

/// Dots are drawn this many grid units around the viewport center.
const DOT_GRID_RADIUS: i32 = 10;
const DOT_RADIUS: f64 = 2.0;
const AXIS_LENGTH_CELLS: f64 = 4.0;
const ARROW_LINE_WIDTH: f64 = 1.5;
const CELL_CONTRACTION: f64 = 0.35;
const PREVIEW_CONTRACTION: f64 = 0.15;

const DOT_COLOR: Rgba = Rgba::rgb(0xcc, 0xcc, 0xcc);
const HOVER_COLOR: Rgba = Rgba::BLACK.with_alpha(0x22);
const HOVER_START_COLOR: Rgba = Rgba::BLACK.with_alpha(0x44);
const AXIS_COLOR: Rgba = Rgba::rgb(0x66, 0x66, 0x66);
const DIFFERENTIAL_COLOR: Rgba = Rgba::rgb(0x99, 0x99, 0x99);
const DIFFERENTIAL_HIGHLIGHT_COLOR: Rgba = Rgba::rgb(0x33, 0x33, 0x33);
const USER_ARROW_COLOR: Rgba = Rgba::rgb(0x66, 0x66, 0xdd);
const PREVIEW_COLOR: Rgba = Rgba::BLACK;

/// Everything one canvas frame is drawn from.
#[derive(Debug, Clone, Copy)]
pub struct RenderScene<'a, T> {
    pub grid: &'a SparseGrid<T>,
    pub arrows: &'a [Arrow],
    pub view: &'a EditorViewState,
    pub pointer: PointerState,
    /// Start cell of an in-progress connect gesture.
    pub connect_start: Option<Coordinate>,
}

/// What a successful render resolved, for the caller's hit testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedFrame {
    pub view: ViewTransform,
    pub hovered: Option<Coordinate>,
}

/// Redraws the whole canvas from `scene`.
///
/// Returns `None` without touching the surface when it has no usable size.
pub fn render_canvas<S, T>(surface: &mut S, scene: &RenderScene<'_, T>) -> Option<RenderedFrame>
where
    S: Surface + ?Sized,
{
    let dpr = surface.device_pixel_ratio();
    let size = surface.size();
    let view_state = scene.view;
    // Hit testing mirrors the pen transform built below. `None` also covers unsized surfaces.
    let view = ViewTransform::new(size, dpr, view_state.pan, view_state.grid_size)?;
    let gs = view.grid_size();

    let mut pen = Pen::new(surface);
    pen.clear();
    pen.reset_transform();
    pen.scale(dpr, dpr);
    let pan = view_state.pan;
    pen.translate(vector(size.width / dpr / 2.0 + pan.x, size.height / dpr / 2.0 + pan.y));
    pen.scale(1.0, -1.0);

    if view_state.toggles.dot_grid {
        pen.save();
        draw_dot_grid(&mut pen, view_state, gs);
        pen.restore();
    }

    let pointer_world = scene.pointer.position.map(|css| view.pixel_to_world(css));
    let hovered = pointer_world.map(|world| view.world_to_cell(world));

    if let (Some(world), Some(cell)) = (pointer_world, hovered) {
        let center = view.cell_center(cell);
        if !scene.grid.contains(cell) && (world - center).length() < gs / 2.0 {
            let color = if scene.connect_start == Some(cell) {
                HOVER_START_COLOR
            } else {
                HOVER_COLOR
            };
            pen.set_fill_color(color);
            pen.fill_circle(center, gs / 4.0);
        }
    }

    pen.set_line_width(ARROW_LINE_WIDTH);

    if view_state.toggles.axes {
        let origin = point(-0.5 * gs, -0.5 * gs);
        let reach = (AXIS_LENGTH_CELLS - 0.5) * gs;
        pen.set_stroke_color(AXIS_COLOR);
        draw_arrow(&mut pen, origin, point(reach, origin.y), Contraction::None);
        draw_arrow(&mut pen, origin, point(origin.x, reach), Contraction::None);
    }

    if view_state.toggles.differentials {
        let r = view_state.page;
        let hovered_chain = hovered.map(|cell| diagonal_index(r, cell.x, cell.y));
        let contraction = Contraction::Fixed(CELL_CONTRACTION * gs);
        for cell in scene.grid.coordinates() {
            for segment in cell_segments(scene.grid, r, view_state.orientation, cell) {
                let color = if Some(segment.chain) == hovered_chain {
                    DIFFERENTIAL_HIGHLIGHT_COLOR
                } else {
                    DIFFERENTIAL_COLOR
                };
                pen.set_stroke_color(color);
                draw_arrow(
                    &mut pen,
                    view.cell_center(segment.from),
                    view.cell_center(segment.to),
                    contraction,
                );
            }
        }
    }

    if view_state.toggles.extra_arrows {
        pen.set_stroke_color(USER_ARROW_COLOR);
        let contraction = Contraction::Fixed(CELL_CONTRACTION * gs);
        for arrow in scene.arrows {
            draw_arrow(&mut pen, view.cell_center(arrow.from), view.cell_center(arrow.to), contraction);
        }
    }

    let pointer = scene.pointer;
    if let (true, true, Some(start), Some(world)) =
        (pointer.primary_down, pointer.modifier, scene.connect_start, pointer_world)
    {
        pen.save();
        pen.set_stroke_color(PREVIEW_COLOR);
        draw_arrow(
            &mut pen,
            view.cell_center(start),
            world,
            Contraction::Fixed(PREVIEW_CONTRACTION * gs),
        );
        pen.restore();
    }

    Some(RenderedFrame { view, hovered })
}

fn draw_dot_grid<S: Surface + ?Sized>(pen: &mut Pen<'_, S>, view: &EditorViewState, gs: f64) {
    // Truncation toward zero, matching the pan direction of the canvas.
    let center_x = (-view.pan.x / gs).trunc() as i32;
    let center_y = (view.pan.y / gs).trunc() as i32;

    pen.set_fill_color(DOT_COLOR);
    for x in center_x - DOT_GRID_RADIUS..=center_x + DOT_GRID_RADIUS {
        for y in center_y - DOT_GRID_RADIUS..=center_y + DOT_GRID_RADIUS {
            pen.fill_circle(point(f64::from(x) * gs, f64::from(y) * gs), DOT_RADIUS);
        }
    }
}

/// Cell centers in CSS pixels, for label overlays.
pub fn label_anchors<'g, T>(
    grid: &'g SparseGrid<T>,
    view: &'g ViewTransform,
) -> impl Iterator<Item = (Point, &'g T)> + 'g {
    grid.iter()
        .map(move |(cell, content)| (view.world_to_pixel(view.cell_center(cell)), content))
}
