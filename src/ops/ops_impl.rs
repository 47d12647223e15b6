// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Mutates `state` in place; callers hand in a private copy of the snapshot.
/// Shared storage is only cloned once an op is known to succeed.
fn apply_op(state: &mut EditorState, op: &Op, delta: &mut Delta) -> Result<(), ApplyError> {
    tracing::debug!(?op, "apply op");
    match op {
        Op::SetCell { at, content } => {
            let key = CellKey::encode(*at)?;
            Arc::make_mut(&mut state.grid).insert(key, content.clone());
            delta.cells.push(*at);
        }
        Op::DeleteCell { at } => {
            if state.grid.contains(*at) {
                Arc::make_mut(&mut state.grid).delete_at(*at);
                delta.cells.push(*at);
            }
        }
        Op::ClearGrid => {
            if !state.grid.is_empty() {
                Arc::make_mut(&mut state.grid).clear();
                delta.grid_cleared = true;
            }
        }
        Op::AddArrow(arrow) => {
            Arc::make_mut(&mut state.arrows).push(*arrow);
            delta.arrows = true;
        }
        Op::RemoveArrow { index } => {
            let len = state.arrows.len();
            if *index >= len {
                return Err(ApplyError::ArrowIndexOutOfRange { index: *index, len });
            }
            Arc::make_mut(&mut state.arrows).remove(*index);
            delta.arrows = true;
        }
        Op::ClearArrows => {
            if !state.arrows.is_empty() {
                Arc::make_mut(&mut state.arrows).clear();
                delta.arrows = true;
            }
        }
        Op::SetPage(page) => set_view(state, delta, |view| view.page = *page),
        Op::StepPage(step) => {
            set_view(state, delta, |view| view.page = view.page.saturating_add(*step));
        }
        Op::SetOrientation(orientation) => {
            set_view(state, delta, |view| view.orientation = *orientation);
        }
        Op::ToggleOrientation => {
            set_view(state, delta, |view| view.orientation = view.orientation.toggled());
        }
        Op::SetToggle { toggle, visible } => {
            set_view(state, delta, |view| view.toggles.set(*toggle, *visible));
        }
        Op::FlipToggle(toggle) => {
            set_view(state, delta, |view| {
                let visible = view.toggles.get(*toggle);
                view.toggles.set(*toggle, !visible);
            });
        }
        Op::SetPan(pan) => set_view(state, delta, |view| view.pan = *pan),
    }
    Ok(())
}

fn set_view(state: &mut EditorState, delta: &mut Delta, update: impl FnOnce(&mut EditorViewState)) {
    let before = state.view;
    update(&mut state.view);
    delta.view |= state.view != before;
}
