// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pointer gestures on the canvas.
//!
//! A primary-button drag pans the view. The same drag with the connect modifier held draws a user
//! arrow from the cell under the press to the cell under the release; letting go of the modifier
//! before the release abandons the arrow.

use crate::geom::{Point, Vector};
use crate::model::{Arrow, Coordinate};
use crate::render::ViewTransform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
}

/// A pointer event in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Point,
    /// Whether the event concerns the primary button.
    pub primary: bool,
    pub modifier: bool,
}

impl PointerEvent {
    pub fn down(position: Point, modifier: bool) -> Self {
        Self { kind: PointerEventKind::Down, position, primary: true, modifier }
    }

    pub fn moved(position: Point, modifier: bool) -> Self {
        Self { kind: PointerEventKind::Move, position, primary: true, modifier }
    }

    pub fn up(position: Point, modifier: bool) -> Self {
        Self { kind: PointerEventKind::Up, position, primary: true, modifier }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Panning {
        pan_start: Vector,
        drag_start: Point,
    },
    Connecting {
        start: Coordinate,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    None,
    /// The new pan offset.
    Pan(Vector),
    Connect(Arrow),
    Abandoned,
}

impl Gesture {
    /// The start cell of an in-progress connect gesture.
    pub fn connect_start(&self) -> Option<Coordinate> {
        match self {
            Self::Connecting { start } => Some(*start),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn handle(
        self,
        event: &PointerEvent,
        view: &ViewTransform,
        pan: Vector,
    ) -> (Gesture, GestureOutcome) {
        use PointerEventKind::{Down, Move, Up};

        match (self, event.kind) {
            (Self::Idle, Down) if event.primary => {
                if event.modifier {
                    let start = view.pixel_to_cell(event.position);
                    tracing::debug!(%start, "connect started");
                    (Self::Connecting { start }, GestureOutcome::None)
                } else {
                    (Self::Panning { pan_start: pan, drag_start: event.position }, GestureOutcome::None)
                }
            }
            (Self::Panning { pan_start, drag_start }, Move) => {
                (self, GestureOutcome::Pan(pan_start + (event.position - drag_start)))
            }
            (Self::Panning { .. }, Up) if event.primary => (Self::Idle, GestureOutcome::None),
            (Self::Connecting { start }, Up) if event.primary => {
                if event.modifier {
                    let arrow = Arrow::new(start, view.pixel_to_cell(event.position));
                    tracing::debug!(%arrow, "connect finished");
                    (Self::Idle, GestureOutcome::Connect(arrow))
                } else {
                    tracing::debug!(%start, "connect abandoned");
                    (Self::Idle, GestureOutcome::Abandoned)
                }
            }
            _ => (self, GestureOutcome::None),
        }
    }
}
