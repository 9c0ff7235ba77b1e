// Copyright 2026 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use bracken_crossing::tracker::CrossingTracker;
use bracken_crossing::types::{Crossing, DeviceId, DeviceKind, Modifiers, Sample};
use bracken_scene::{ElementDesc, ElementId, Scene, SurfaceId};
use kurbo::{Point, Rect};

const GRID: usize = 16;
const CELL: f64 = 32.0;

/// A surface whose root holds a GRID×GRID lattice of reactive cells.
fn grid_scene() -> (Scene, SurfaceId) {
    let mut scene = Scene::new();
    let side = GRID as f64 * CELL;
    let root = scene.insert(
        None,
        ElementDesc {
            bounds: Rect::new(0.0, 0.0, side, side),
            ..Default::default()
        },
    );
    for y in 0..GRID {
        for x in 0..GRID {
            let x0 = x as f64 * CELL;
            let y0 = y as f64 * CELL;
            let _ = scene.insert(
                Some(root),
                ElementDesc {
                    bounds: Rect::new(x0, y0, x0 + CELL, y0 + CELL),
                    z_index: 1,
                    ..Default::default()
                },
            );
        }
    }
    let surface = scene.add_surface(root).unwrap();
    (scene, surface)
}

fn pointer_at_origin(
    scene: &mut Scene,
    surface: SurfaceId,
    sink: &mut impl FnMut(&Crossing<ElementId, SurfaceId>),
) -> (CrossingTracker<ElementId, SurfaceId>, DeviceId) {
    let mut tracker = CrossingTracker::new();
    let mouse = tracker.add_device(DeviceKind::Pointer, "bench mouse");
    tracker.process_sample(
        scene,
        sink,
        mouse,
        Sample {
            position: Point::new(CELL / 2.0, CELL / 2.0),
            modifiers: Modifiers::empty(),
            time: 0,
            surface: Some(surface),
        },
    );
    (tracker, mouse)
}

/// Every sample lands in a different cell: full Leave/Enter synthesis.
fn bench_retarget_churn(c: &mut Criterion) {
    let (mut scene, surface) = grid_scene();
    let mut crossings = 0_u64;
    let mut sink = |_c: &Crossing<ElementId, SurfaceId>| crossings += 1;
    let (mut tracker, mouse) = pointer_at_origin(&mut scene, surface, &mut sink);

    let mut group = c.benchmark_group("retarget_churn");
    group.throughput(Throughput::Elements(1));
    group.bench_function("alternate_cells", |b| {
        let mut time = 1_u64;
        b.iter(|| {
            // Hop between two diagonal cells.
            let which = time % 2;
            let coord = CELL / 2.0 + which as f64 * CELL;
            let target = tracker.process_sample(
                &mut scene,
                &mut sink,
                mouse,
                Sample {
                    position: Point::new(coord, coord),
                    modifiers: Modifiers::empty(),
                    time,
                    surface: None,
                },
            );
            time += 1;
            black_box(target)
        });
    });
    group.finish();
    black_box(crossings);
}

/// Every sample lands in the same cell: pick runs, transition is absorbed.
fn bench_stationary_samples(c: &mut Criterion) {
    let (mut scene, surface) = grid_scene();
    let mut crossings = 0_u64;
    let mut sink = |_c: &Crossing<ElementId, SurfaceId>| crossings += 1;
    let (mut tracker, mouse) = pointer_at_origin(&mut scene, surface, &mut sink);

    let mut group = c.benchmark_group("stationary_samples");
    group.throughput(Throughput::Elements(1));
    group.bench_function("same_cell", |b| {
        let mut time = 1_u64;
        b.iter(|| {
            let target = tracker.process_sample(
                &mut scene,
                &mut sink,
                mouse,
                Sample {
                    position: Point::new(CELL / 2.0, CELL / 2.0),
                    modifiers: Modifiers::empty(),
                    time,
                    surface: None,
                },
            );
            time += 1;
            black_box(target)
        });
    });
    group.finish();
    black_box(crossings);
}

criterion_group!(benches, bench_retarget_churn, bench_stationary_samples);
criterion_main!(benches);
