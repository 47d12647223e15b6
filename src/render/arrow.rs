// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The arrow primitive: a straight shaft with two curved head wings.

use crate::geom::{vector, Point};

use super::{Pen, Surface};

/// Distance from the tip back to the wing ends, in world units.
pub const HEAD_LENGTH: f64 = 10.0;
/// Sideways offset of each wing end from the shaft.
pub const HEAD_WIDTH: f64 = 10.0;

const HEAD_CONTROL_FRACTION: f64 = 0.65;
const PROPORTIONAL_FRACTION: f64 = 0.15;

/// How far both ends of an arrow are pulled in along the shaft.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Contraction {
    #[default]
    None,
    /// A fixed inset in world units, applied to each end.
    Fixed(f64),
    /// 15% of the arrow length at each end.
    Proportional,
}

impl Contraction {
    fn inset(self, length: f64) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Fixed(inset) => inset,
            Self::Proportional => length * PROPORTIONAL_FRACTION,
        }
    }
}

/// One head wing, drawn as a quadratic curve from the tip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowWing {
    pub control: Point,
    pub end: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowGeometry {
    pub start: Point,
    pub tip: Point,
    pub wings: [ArrowWing; 2],
}

impl ArrowGeometry {
    /// Returns `None` for a zero-length arrow or one whose contraction leaves no shaft.
    pub fn new(from: Point, to: Point, contraction: Contraction) -> Option<Self> {
        let delta = to - from;
        let length = delta.length();
        if !length.is_finite() || length <= 0.0 {
            return None;
        }

        let inset = contraction.inset(length);
        if !inset.is_finite() || length - 2.0 * inset <= 0.0 {
            return None;
        }

        let direction = delta / length;
        let normal = vector(-direction.y, direction.x);
        let start = from + direction * inset;
        let tip = to - direction * inset;

        let control = tip - direction * (HEAD_LENGTH * HEAD_CONTROL_FRACTION);
        let base = tip - direction * HEAD_LENGTH;
        let wings = [
            ArrowWing { control, end: base + normal * HEAD_WIDTH },
            ArrowWing { control, end: base - normal * HEAD_WIDTH },
        ];

        Some(Self { start, tip, wings })
    }

    pub fn shaft_length(&self) -> f64 {
        (self.tip - self.start).length()
    }
}

/// Strokes an arrow with the pen's current style. Degenerate arrows draw nothing.
pub fn draw_arrow<S: Surface + ?Sized>(
    pen: &mut Pen<'_, S>,
    from: Point,
    to: Point,
    contraction: Contraction,
) {
    let Some(arrow) = ArrowGeometry::new(from, to, contraction) else {
        return;
    };

    pen.begin_path();
    pen.move_to(arrow.start);
    pen.line_to(arrow.tip);
    for wing in arrow.wings {
        pen.move_to(arrow.tip);
        pen.quadratic_curve_to(wing.control, wing.end);
    }
    pen.stroke();
}
