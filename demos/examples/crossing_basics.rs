// Copyright 2026 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic crossing synthesis over a small scene.
//!
//! A mouse wanders across a surface with two buttons. Watch the Enter/Leave
//! sequence: entering from outside crosses the surface root before the
//! button, and moving between siblings leaves one before entering the other.
//!
//! Run:
//! - `cargo run -p bracken_demos --example crossing_basics`

use bracken_crossing::tracker::CrossingTracker;
use bracken_crossing::types::{Crossing, DeviceKind, Modifiers, Sample};
use bracken_scene::{ElementDesc, ElementId, Scene, SurfaceId};
use kurbo::{Point, Rect};

fn main() {
    let mut scene = Scene::new();
    let root = scene.insert(
        None,
        ElementDesc {
            bounds: Rect::new(0.0, 0.0, 400.0, 300.0),
            ..Default::default()
        },
    );
    let ok_button = scene.insert(
        Some(root),
        ElementDesc {
            bounds: Rect::new(40.0, 200.0, 180.0, 260.0),
            z_index: 1,
            ..Default::default()
        },
    );
    let cancel_button = scene.insert(
        Some(root),
        ElementDesc {
            bounds: Rect::new(220.0, 200.0, 360.0, 260.0),
            z_index: 1,
            ..Default::default()
        },
    );
    let surface = scene.add_surface(root).unwrap();
    println!("root={root:?} ok={ok_button:?} cancel={cancel_button:?}");

    let mut tracker = CrossingTracker::new();
    let mouse = tracker.add_device(DeviceKind::Pointer, "demo mouse");

    let mut sink = |c: &Crossing<ElementId, SurfaceId>| {
        println!(
            "  {:?} source={:?} related={:?} at={:?} t={}",
            c.kind, c.source, c.related, c.position, c.time
        );
    };

    let mut feed = |tracker: &mut CrossingTracker<ElementId, SurfaceId>,
                    scene: &mut Scene,
                    label: &str,
                    x: f64,
                    y: f64,
                    time: u64| {
        println!("== {label} ==");
        let target = tracker.process_sample(
            scene,
            &mut sink,
            mouse,
            Sample {
                position: Point::new(x, y),
                modifiers: Modifiers::empty(),
                time,
                surface: Some(surface),
            },
        );
        println!("  target is now {target:?}");
    };

    feed(&mut tracker, &mut scene, "over the OK button", 100.0, 230.0, 10);
    feed(&mut tracker, &mut scene, "still over OK (no events)", 120.0, 230.0, 20);
    feed(&mut tracker, &mut scene, "over to Cancel", 300.0, 230.0, 30);
    feed(&mut tracker, &mut scene, "onto empty surface area", 200.0, 50.0, 40);
}
