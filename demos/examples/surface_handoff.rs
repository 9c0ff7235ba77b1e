// Copyright 2026 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Moving a device between surfaces.
//!
//! A pointer holding a target on one surface is warped to a second surface.
//! The Leave goes out while the device is still attached to the old surface
//! (so handlers see the correct surface on it), with the new surface's root
//! as the related element; the new target is only acquired by the next
//! sample's pick.
//!
//! Run:
//! - `cargo run -p bracken_demos --example surface_handoff`

use bracken_crossing::adapters::scene::teardown_surface;
use bracken_crossing::tracker::CrossingTracker;
use bracken_crossing::types::{Crossing, DeviceKind, Modifiers, Sample};
use bracken_scene::{ElementDesc, ElementId, Scene, SurfaceId};
use kurbo::{Point, Rect};

fn panel(scene: &mut Scene, z: i32) -> (ElementId, ElementId) {
    let root = scene.insert(
        None,
        ElementDesc {
            bounds: Rect::new(0.0, 0.0, 300.0, 300.0),
            ..Default::default()
        },
    );
    let pad = scene.insert(
        Some(root),
        ElementDesc {
            bounds: Rect::new(50.0, 50.0, 250.0, 250.0),
            z_index: z,
            ..Default::default()
        },
    );
    (root, pad)
}

fn main() {
    let mut scene = Scene::new();
    let (first_root, first_pad) = panel(&mut scene, 1);
    let (second_root, second_pad) = panel(&mut scene, 1);
    let first = scene.add_surface(first_root).unwrap();
    let second = scene.add_surface(second_root).unwrap();
    println!("first: root={first_root:?} pad={first_pad:?}");
    println!("second: root={second_root:?} pad={second_pad:?}");

    let mut tracker = CrossingTracker::new();
    let pen = tracker.add_device(DeviceKind::Pointer, "demo pen");

    let mut sink = |c: &Crossing<ElementId, SurfaceId>| {
        println!(
            "  {:?} source={:?} related={:?} surface={:?}",
            c.kind, c.source, c.related, c.surface
        );
    };

    println!("== settle on the first surface ==");
    tracker.process_sample(
        &mut scene,
        &mut sink,
        pen,
        Sample {
            position: Point::new(100.0, 100.0),
            modifiers: Modifiers::empty(),
            time: 10,
            surface: Some(first),
        },
    );

    println!("== warp to the second surface ==");
    tracker.process_sample(
        &mut scene,
        &mut sink,
        pen,
        Sample {
            position: Point::new(100.0, 100.0),
            modifiers: Modifiers::empty(),
            time: 20,
            surface: Some(second),
        },
    );

    println!("== tear the second surface down ==");
    teardown_surface(&mut scene, &mut tracker, &mut sink, second);
    println!(
        "  pen is now attached to {:?}, target {:?}",
        tracker.device(pen).unwrap().surface(),
        tracker.tracked_target(pen)
    );
}
