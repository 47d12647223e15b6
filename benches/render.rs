// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sseqed::geom::point;
use sseqed::model::{Coordinate, EditorViewState};
use sseqed::render::{render_canvas, PointerState, RecordingSurface, RenderScene};

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group names in this file: `render.canvas`, `render.canvas_hidpi`
// - Case IDs come from `fixtures::Case::id` and must not be renamed.
fn benches_render(c: &mut Criterion) {
    for (group_name, ratio) in [("render.canvas", 1.0), ("render.canvas_hidpi", 2.0)] {
        let mut group = c.benchmark_group(group_name);
        for case in fixtures::Case::ALL {
            let chart = fixtures::chart(case);
            let view = EditorViewState { page: 2, ..EditorViewState::default() };
            let mut surface =
                RecordingSurface::new(1600.0 * ratio, 1000.0 * ratio).with_device_pixel_ratio(ratio);
            group.bench_function(case.id(), move |b| {
                b.iter(|| {
                    let scene = RenderScene {
                        grid: &chart.grid,
                        arrows: &chart.arrows,
                        view: &view,
                        pointer: PointerState {
                            position: Some(point(812.0, 488.0)),
                            primary_down: true,
                            modifier: true,
                        },
                        connect_start: Some(Coordinate::ORIGIN),
                    };
                    let frame = render_canvas(&mut surface, black_box(&scene)).expect("render");
                    black_box((frame.hovered, surface.ops().len()))
                })
            });
        }
        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_render
}
criterion_main!(benches);
