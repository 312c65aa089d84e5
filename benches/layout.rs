// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use visitlane::geometry::{build_scene, GeometryConfig};
use visitlane::layout::{layout_visits, BranchOrigin, LayoutOptions};

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group names in this file: `layout.visits`, `layout.visits_prev_track`, `layout.scene`
// - Case IDs come from `fixtures::Case::id` and must not be renamed.
fn benches_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout.visits");
    for case in fixtures::Case::ALL {
        let visits = fixtures::fixture(case);
        let options = LayoutOptions::default();
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let layout = layout_visits(black_box(&visits), black_box(&options));
                black_box(layout.branch_connections().len())
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("layout.visits_prev_track");
    for case in fixtures::Case::ALL {
        let visits = fixtures::fixture(case);
        let options = LayoutOptions {
            branch_origin: BranchOrigin::PreviousTrackLastRow,
            ..LayoutOptions::default()
        };
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let layout = layout_visits(black_box(&visits), black_box(&options));
                black_box(layout.branch_connections().len())
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("layout.scene");
    for case in fixtures::Case::ALL {
        let visits = fixtures::fixture(case);
        let layout = layout_visits(&visits, &LayoutOptions::default());
        let config = GeometryConfig::default();
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let scene = build_scene(black_box(&visits), black_box(&layout), black_box(&config));
                black_box(scene.nodes.len() + scene.curves.len())
            })
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_layout
}
criterion_main!(benches);
