// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use rstest::{fixture, rstest};

use crate::export::TikzOptions;
use crate::geom::vector;
use crate::model::{
    Arrow, CoordError, Coordinate, EditorViewState, Orientation, Toggle, MAX_MAGNITUDE,
};

use super::{apply_op, apply_ops, default_cell_label, ApplyError, Delta, EditorState, Op};

fn c(x: i32, y: i32) -> Coordinate {
    Coordinate::new(x, y)
}

#[fixture]
fn seeded() -> EditorState {
    let ops = [
        Op::SetCell { at: c(0, 0), content: "A".to_owned() },
        Op::SetCell { at: c(1, 0), content: "B".to_owned() },
        Op::AddArrow(Arrow::new(c(0, 0), c(1, 0))),
        Op::AddArrow(Arrow::new(c(1, 0), c(2, 2))),
    ];
    apply_ops(&EditorState::default(), &ops).expect("seed").state
}

#[test]
fn default_cell_label_uses_page_and_position() {
    assert_eq!(default_cell_label(2, 0, 1), "E_{2}^{0,1}");
    assert_eq!(default_cell_label(-1, -3, 4), "E_{-1}^{-3,4}");
}

#[rstest]
fn set_cell_produces_a_new_snapshot(seeded: EditorState) {
    let next = seeded
        .apply(&Op::SetCell { at: c(0, 0), content: "changed".to_owned() })
        .expect("apply");

    assert_eq!(next.cell(c(0, 0)), Some("changed"));
    assert_eq!(seeded.cell(c(0, 0)), Some("A"));
    assert_eq!(next.rev(), seeded.rev() + 1);
}

#[rstest]
fn empty_labels_are_kept(seeded: EditorState) {
    let next = seeded.apply(&Op::SetCell { at: c(5, 5), content: String::new() }).expect("apply");
    assert_eq!(next.cell(c(5, 5)), Some(""));
    assert_eq!(next.cells().len(), 3);
}

#[rstest]
fn out_of_range_cells_are_rejected(seeded: EditorState) {
    let at = c(MAX_MAGNITUDE as i32 + 1, 0);
    let err = seeded.apply(&Op::SetCell { at, content: "x".to_owned() }).expect_err("range");
    assert_eq!(err, ApplyError::Coord(CoordError::OutOfRange { coord: at }));
}

#[rstest]
fn rejected_cells_leave_shared_storage_alone(seeded: EditorState) {
    let mut next = seeded.clone();
    let mut delta = Delta::default();
    let at = c(0, -(MAX_MAGNITUDE as i32) - 1);
    let err = apply_op(&mut next, &Op::SetCell { at, content: "x".to_owned() }, &mut delta)
        .expect_err("range");

    assert_eq!(err, ApplyError::Coord(CoordError::OutOfRange { coord: at }));
    assert!(Arc::ptr_eq(&next.grid, &seeded.grid));
    assert!(delta.is_empty());
}

#[rstest]
fn delete_and_clear_cells(seeded: EditorState) {
    let next = seeded.apply(&Op::DeleteCell { at: c(0, 0) }).expect("apply");
    assert_eq!(next.cell(c(0, 0)), None);
    assert_eq!(next.cells().len(), 1);

    let cleared = next.apply(&Op::ClearGrid).expect("apply");
    assert!(cleared.grid().is_empty());
    assert_eq!(cleared.arrows().len(), 2);
}

#[rstest]
fn arrows_keep_insertion_order_and_remove_by_index(seeded: EditorState) {
    let next = seeded.apply(&Op::AddArrow(Arrow::new(c(3, 3), c(0, 0)))).expect("apply");
    assert_eq!(
        next.arrows(),
        &[
            Arrow::new(c(0, 0), c(1, 0)),
            Arrow::new(c(1, 0), c(2, 2)),
            Arrow::new(c(3, 3), c(0, 0)),
        ]
    );

    let removed = next.apply(&Op::RemoveArrow { index: 1 }).expect("apply");
    assert_eq!(removed.arrows(), &[Arrow::new(c(0, 0), c(1, 0)), Arrow::new(c(3, 3), c(0, 0))]);

    let cleared = removed.apply(&Op::ClearArrows).expect("apply");
    assert!(cleared.arrows().is_empty());
    assert_eq!(cleared.cells().len(), 2);
}

#[rstest]
fn removing_a_missing_arrow_fails(seeded: EditorState) {
    assert_eq!(
        seeded.apply(&Op::RemoveArrow { index: 2 }),
        Err(ApplyError::ArrowIndexOutOfRange { index: 2, len: 2 })
    );
}

#[rstest]
fn failed_batches_leave_the_snapshot_untouched(seeded: EditorState) {
    let ops = [
        Op::SetCell { at: c(9, 9), content: "new".to_owned() },
        Op::ClearArrows,
        Op::RemoveArrow { index: 0 },
    ];
    let err = apply_ops(&seeded, &ops).expect_err("arrow list is empty by then");
    assert_eq!(err, ApplyError::ArrowIndexOutOfRange { index: 0, len: 0 });
    assert_eq!(seeded.cell(c(9, 9)), None);
    assert_eq!(seeded.arrows().len(), 2);
}

#[test]
fn view_ops_update_the_view() {
    let state = EditorState::default();
    let ops = [
        Op::SetPage(2),
        Op::StepPage(-3),
        Op::ToggleOrientation,
        Op::FlipToggle(Toggle::Axes),
        Op::SetToggle { toggle: Toggle::DotGrid, visible: false },
        Op::SetPan(vector(12.0, -4.0)),
    ];
    let result = apply_ops(&state, &ops).expect("apply");
    let view = result.state.view();

    assert_eq!(view.page, -1);
    assert_eq!(view.orientation, Orientation::Cohomological);
    assert!(!view.toggles.axes);
    assert!(!view.toggles.dot_grid);
    assert!(view.toggles.differentials);
    assert_eq!(view.pan, vector(12.0, -4.0));
    assert!(result.delta.view);
    assert!(!result.delta.arrows);
}

#[test]
fn page_steps_saturate() {
    let state = EditorState::default().apply(&Op::SetPage(i32::MAX)).expect("apply");
    let next = state.apply(&Op::StepPage(1)).expect("apply");
    assert_eq!(next.view().page, i32::MAX);
}

#[rstest]
fn delta_lists_touched_cells_once(seeded: EditorState) {
    let ops = [
        Op::SetCell { at: c(2, 0), content: "x".to_owned() },
        Op::SetCell { at: c(-1, 0), content: "y".to_owned() },
        Op::SetCell { at: c(2, 0), content: "z".to_owned() },
        Op::DeleteCell { at: c(7, 7) },
    ];
    let result = apply_ops(&seeded, &ops).expect("apply");
    assert_eq!(result.applied, 4);
    assert_eq!(result.delta.cells, vec![c(-1, 0), c(2, 0)]);
    assert!(!result.delta.view);
}

#[test]
fn noop_view_changes_report_an_empty_delta() {
    let state = EditorState::default();
    let result = apply_ops(&state, &[Op::SetPage(0), Op::ClearGrid]).expect("apply");
    assert!(result.delta.is_empty());
}

#[rstest]
fn export_follows_the_current_page_and_orientation(seeded: EditorState) {
    let view = EditorViewState { page: 1, orientation: Orientation::Cohomological, ..*seeded.view() };
    let ops = [Op::SetPage(view.page), Op::SetOrientation(view.orientation)];
    let state = apply_ops(&seeded, &ops).expect("apply").state;

    let options = TikzOptions { show_arrows: false, show_axes: false, ..TikzOptions::default() };
    let source = state.export(&options);
    // Page 1 chains are rows; (0,0) → (1,0) is the cohomological differential.
    assert!(source.contains("    \\draw[->] (m-1-1) -- (m-1-2);\n"));
    assert!(!source.contains("% Arrows"));
}
