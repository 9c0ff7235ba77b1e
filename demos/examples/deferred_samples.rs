// Copyright 2026 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handlers that react to crossings by moving the pointer again.
//!
//! Dispatch is synchronous, and the tracker is exclusively borrowed while it
//! runs, so a handler cannot call back into it mid-transition. The supported
//! pattern is shown here: the handler queues follow-up samples during
//! dispatch, and the event loop drains the queue once the outer call
//! returns. Because the tracker commits its target only after the full
//! notification sequence, the drained samples observe the completed
//! transition.
//!
//! Run:
//! - `cargo run -p bracken_demos --example deferred_samples`

use bracken_crossing::tracker::CrossingTracker;
use bracken_crossing::types::{Crossing, CrossingKind, DeviceKind, Modifiers, Sample};
use bracken_scene::{ElementDesc, ElementId, Scene, SurfaceId};
use kurbo::{Point, Rect};

fn main() {
    let mut scene = Scene::new();
    let root = scene.insert(
        None,
        ElementDesc {
            bounds: Rect::new(0.0, 0.0, 200.0, 200.0),
            ..Default::default()
        },
    );
    let trap = scene.insert(
        Some(root),
        ElementDesc {
            bounds: Rect::new(20.0, 20.0, 80.0, 80.0),
            z_index: 1,
            ..Default::default()
        },
    );
    let safety = scene.insert(
        Some(root),
        ElementDesc {
            bounds: Rect::new(120.0, 120.0, 180.0, 180.0),
            z_index: 1,
            ..Default::default()
        },
    );
    let surface = scene.add_surface(root).unwrap();
    println!("trap={trap:?} safety={safety:?}");

    let mut tracker = CrossingTracker::new();
    let mouse = tracker.add_device(DeviceKind::Pointer, "demo mouse");

    // The "handler": entering the trap element schedules a warp to safety.
    let mut queue: Vec<Sample<SurfaceId>> = Vec::new();
    {
        let mut sink = |c: &Crossing<ElementId, SurfaceId>| {
            println!("  {:?} source={:?} related={:?}", c.kind, c.source, c.related);
            if c.kind == CrossingKind::Enter && c.source == trap {
                println!("  (handler queues a warp to safety)");
                queue.push(Sample {
                    position: Point::new(150.0, 150.0),
                    modifiers: Modifiers::empty(),
                    time: c.time + 1,
                    surface: None,
                });
            }
        };

        println!("== move onto the trap ==");
        tracker.process_sample(
            &mut scene,
            &mut sink,
            mouse,
            Sample {
                position: Point::new(50.0, 50.0),
                modifiers: Modifiers::empty(),
                time: 10,
                surface: Some(surface),
            },
        );
    }

    println!("== drain the queue ==");
    let mut sink = |c: &Crossing<ElementId, SurfaceId>| {
        println!("  {:?} source={:?} related={:?}", c.kind, c.source, c.related);
    };
    for sample in queue.drain(..) {
        tracker.process_sample(&mut scene, &mut sink, mouse, sample);
    }
    println!("final target: {:?}", tracker.tracked_target(mouse));
}
