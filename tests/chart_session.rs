// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};

use sseqed::config::EditorConfig;
use sseqed::geom::{size, Vector};
use sseqed::gesture::{Gesture, GestureOutcome, PointerEvent};
use sseqed::model::{Arrow, Coordinate, EditorViewState};
use sseqed::ops::{apply_ops, EditorState, Op};
use sseqed::render::{
    label_anchors, render_canvas, DrawOp, PointerState, RecordingSurface, ViewTransform,
};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

fn c(x: i32, y: i32) -> Coordinate {
    Coordinate::new(x, y)
}

fn matrix_rows(source: &str) -> Vec<&str> {
    source
        .lines()
        .skip_while(|line| line.trim() != "]{")
        .skip(1)
        .take_while(|line| line.trim() != "};")
        .collect()
}

fn section<'s>(source: &'s str, header: &str) -> Vec<&'s str> {
    source
        .lines()
        .skip_while(|line| line.trim() != header)
        .skip(1)
        .take_while(|line| line.trim_start().starts_with("\\draw"))
        .collect()
}

fn loaded_state() -> (EditorConfig, EditorState) {
    let config = EditorConfig::load(fixture_path("five_cell_chart.json")).expect("load config");
    let state = config.clone().into_state().expect("seed state");
    (config, state)
}

#[test]
fn config_fixture_exports_the_five_cell_chart() {
    let (config, state) = loaded_state();
    let source = state.export(&config.export_options());

    assert_eq!(
        matrix_rows(&source),
        vec![
            "         &  &  & E_1^{2,2} \\\\",
            "         & E_1^{0,1} &  &  \\\\",
            "         & E_1^{0,0} & E_1^{1,0} &  \\\\",
            "        E_1^{-1,-1} &  &  &  \\\\",
            "         &  &  &  \\\\",
        ]
    );
    assert_eq!(section(&source, "% Differentials").len(), 8);
    assert_eq!(section(&source, "% Arrows"), vec!["    \\draw[->] (m-3-2) -- (m-2-4);"]);
    assert_eq!(section(&source, "% Axes").len(), 2);
}

#[test]
fn edits_flow_into_render_and_export() {
    let (config, state) = loaded_state();
    let ops = [
        Op::DeleteCell { at: c(-1, -1) },
        Op::SetCell { at: c(3, 0), content: "\\mathbb{Z}/2".to_owned() },
        Op::StepPage(2),
        Op::ClearArrows,
        Op::AddArrow(Arrow::new(c(3, 0), c(0, 1))),
    ];
    let result = apply_ops(&state, &ops).expect("apply");
    let next = result.state;
    assert_eq!(result.delta.cells, vec![c(-1, -1), c(3, 0)]);
    assert_eq!(next.view().page, 2);
    assert_eq!(state.cell(c(-1, -1)), Some("E_1^{-1,-1}"));

    let mut surface = RecordingSurface::new(800.0, 600.0);
    let frame = render_canvas(&mut surface, &next.scene(PointerState::default(), None))
        .expect("sized surface");
    assert_eq!(surface.ops().first(), Some(&DrawOp::Clear));
    assert_eq!(label_anchors(next.grid(), &frame.view).count(), 5);

    let source = next.export(&config.export_options());
    assert!(source.contains("\\mathbb{Z}/2"));
    assert!(!source.contains("E_1^{-1,-1}"));
    assert_eq!(section(&source, "% Arrows").len(), 1);
}

#[test]
fn unsized_surfaces_are_left_alone() {
    let (_, state) = loaded_state();
    let mut surface = RecordingSurface::new(0.0, 300.0);
    assert!(render_canvas(&mut surface, &state.scene(PointerState::default(), None)).is_none());
    assert!(surface.ops().is_empty());
}

#[test]
fn connect_gesture_appends_one_arrow() {
    let state = EditorState::new(EditorViewState { grid_size: 50.0, ..EditorViewState::default() });
    let view = ViewTransform::new(size(500.0, 500.0), 1.0, Vector::zero(), 50.0).expect("view");
    let at = |cell: Coordinate| view.world_to_pixel(view.cell_center(cell));

    let mut gesture = Gesture::Idle;
    let mut state = state;
    for event in [
        PointerEvent::down(at(c(0, 0)), true),
        PointerEvent::moved(at(c(1, 1)), true),
        PointerEvent::up(at(c(2, 1)), true),
        PointerEvent::down(at(c(0, 0)), true),
        PointerEvent::up(at(c(3, 3)), false),
    ] {
        let (next, outcome) = gesture.handle(&event, &view, state.view().pan);
        gesture = next;
        if let GestureOutcome::Connect(arrow) = outcome {
            state = state.apply(&Op::AddArrow(arrow)).expect("add arrow");
        }
    }

    assert!(gesture.is_idle());
    assert_eq!(state.arrows(), &[Arrow::new(c(0, 0), c(2, 1))]);
}
