// Copyright 2026 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter helpers for Bracken Scene.
//!
//! ## Feature
//!
//! Enable with `scene_adapter`.
//!
//! ## Notes
//!
//! [`Scene`] implements the tracker's trait seam directly (its generational
//! handles already give the tracker clean staleness semantics), so most of
//! the wiring is plain forwarding. The helpers below cover the lifecycle
//! hand-offs that involve both sides: element removal and surface teardown.

use alloc::vec::Vec;

use bracken_scene::{ElementId, Scene, SurfaceId};
use kurbo::Point;

use crate::tracker::CrossingTracker;
use crate::types::{CrossingSink, PickOracle, SceneLookup};

impl SceneLookup for Scene {
    type Elem = ElementId;
    type Surface = SurfaceId;

    fn is_alive(&self, elem: ElementId) -> bool {
        Self::is_alive(self, elem)
    }

    fn is_reactive(&self, elem: ElementId) -> bool {
        Self::is_reactive(self, elem)
    }

    fn surface_root(&self, surface: SurfaceId) -> Option<ElementId> {
        Self::surface_root(self, surface)
    }

    fn add_pointer_ref(&mut self, elem: ElementId) {
        Self::add_pointer_ref(self, elem);
    }

    fn remove_pointer_ref(&mut self, elem: ElementId) {
        Self::remove_pointer_ref(self, elem);
    }
}

impl PickOracle for Scene {
    fn pick(&mut self, surface: SurfaceId, at: Point) -> Option<ElementId> {
        Self::pick(self, surface, at)
    }
}

/// Remove an element subtree and forward every destruction to the tracker.
///
/// Destructions reach the tracker's guard table before any further sample can
/// observe the stale handles. Returns the destroyed handles, children first,
/// as reported by [`Scene::remove`].
pub fn remove_element(
    scene: &mut Scene,
    tracker: &mut CrossingTracker<ElementId, SurfaceId>,
    id: ElementId,
) -> Vec<ElementId> {
    let destroyed = scene.remove(id);
    for &elem in &destroyed {
        tracker.element_destroyed(elem);
    }
    destroyed
}

/// Tear down a surface: detach every attached device, then unregister it.
///
/// The detach Leaves go out while the surface handle is still meaningful to
/// handlers. Returns the surface's root element, which stays in the scene.
pub fn teardown_surface<K>(
    scene: &mut Scene,
    tracker: &mut CrossingTracker<ElementId, SurfaceId>,
    sink: &mut K,
    surface: SurfaceId,
) -> Option<ElementId>
where
    K: CrossingSink<ElementId, SurfaceId>,
{
    tracker.surface_destroyed(scene, sink, surface);
    scene.remove_surface(surface)
}
