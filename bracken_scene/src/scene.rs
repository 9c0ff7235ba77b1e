// Copyright 2026 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core registry implementation: element arena, surfaces, queries.

use alloc::vec::Vec;
use kurbo::{Point, Rect};

use crate::types::{ElementDesc, ElementFlags, ElementId, SurfaceId};

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// The scene registry: a generational arena of elements plus a surface table.
///
/// Elements form a forest; each [`SurfaceId`] names one root element as its
/// display root. The registry tracks, per element, the flags relevant to
/// pointer interaction and a has-pointer reference count maintained by the
/// crossing subsystem.
pub struct Scene {
    elements: Vec<Option<Element>>, // slots
    generations: Vec<u32>,          // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    surfaces: Vec<Option<Surface>>,
    surface_generations: Vec<u32>,
    surface_free: Vec<usize>,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.elements.len();
        let alive = self.elements.iter().filter(|e| e.is_some()).count();
        let surfaces = self.surfaces.iter().filter(|s| s.is_some()).count();
        f.debug_struct("Scene")
            .field("elements_total", &total)
            .field("elements_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("surfaces", &surfaces)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Element {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    desc: ElementDesc,
    // Number of devices currently resting on this element. Several devices may
    // target the same element at once, so this is a count rather than a bit.
    pointer_refs: u32,
}

impl Element {
    fn new(generation: u32, desc: ElementDesc) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            desc,
            pointer_refs: 0,
        }
    }
}

#[derive(Clone, Debug)]
struct Surface {
    generation: u32,
    root: ElementId,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            surfaces: Vec::new(),
            surface_generations: Vec::new(),
            surface_free: Vec::new(),
        }
    }

    /// Insert a new element as a child of `parent` (or as a root if `None`).
    pub fn insert(&mut self, parent: Option<ElementId>, desc: ElementDesc) -> ElementId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.elements[idx] = Some(Element::new(generation, desc));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.elements.push(Some(Element::new(generation, desc)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            ((self.elements.len() - 1) as u32, generation)
        };
        let id = ElementId::new(idx, generation);
        if let Some(p) = parent {
            if let Some(parent_el) = self.element_mut(p) {
                parent_el.children.push(id);
                self.element_mut(id).expect("fresh id is live").parent = Some(p);
            } else {
                log::warn!("insert under stale parent {p:?}; element {id:?} becomes a root");
            }
        }
        id
    }

    /// Remove an element and its subtree.
    ///
    /// Returns every destroyed handle, children before parents, so callers can
    /// forward destructions to subsystems holding element handles (for example
    /// a crossing tracker's target bookkeeping). A stale `id` removes nothing.
    pub fn remove(&mut self, id: ElementId) -> Vec<ElementId> {
        let mut destroyed = Vec::new();
        if !self.is_alive(id) {
            return destroyed;
        }
        if let Some(parent) = self.element(id).and_then(|e| e.parent) {
            if let Some(p) = self.element_mut(parent) {
                p.children.retain(|c| *c != id);
            }
        }
        self.remove_subtree(id, &mut destroyed);
        destroyed
    }

    fn remove_subtree(&mut self, id: ElementId, destroyed: &mut Vec<ElementId>) {
        let children = match self.element(id) {
            Some(e) => e.children.clone(),
            None => return,
        };
        for child in children {
            self.remove_subtree(child, destroyed);
        }
        self.elements[id.idx()] = None;
        self.free_list.push(id.idx());
        destroyed.push(id);
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    /// Returns true if `id` is live and flagged [`ElementFlags::REACTIVE`].
    pub fn is_reactive(&self, id: ElementId) -> bool {
        self.element(id)
            .map(|e| e.desc.flags.contains(ElementFlags::REACTIVE))
            .unwrap_or(false)
    }

    /// Update element flags. Stale handles are ignored.
    pub fn set_flags(&mut self, id: ElementId, flags: ElementFlags) {
        if let Some(e) = self.element_mut(id) {
            e.desc.flags = flags;
        }
    }

    /// Update surface-space bounds. Stale handles are ignored.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(e) = self.element_mut(id) {
            e.desc.bounds = bounds;
        }
    }

    /// Update the stacking order. Stale handles are ignored.
    pub fn set_z_index(&mut self, id: ElementId, z: i32) {
        if let Some(e) = self.element_mut(id) {
            e.desc.z_index = z;
        }
    }

    /// Returns the bounds of a live element.
    pub fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.element(id).map(|e| e.desc.bounds)
    }

    /// Returns the z-index of a live element.
    pub fn z_index(&self, id: ElementId) -> Option<i32> {
        self.element(id).map(|e| e.desc.z_index)
    }

    /// Returns the parent of a live element, if it has one.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.element(id).and_then(|e| e.parent)
    }

    // --- has-pointer bookkeeping ---

    /// Record that a device now rests on `id`.
    ///
    /// Only the crossing subsystem is expected to call this, paired with
    /// [`Scene::remove_pointer_ref`].
    pub fn add_pointer_ref(&mut self, id: ElementId) {
        match self.element_mut(id) {
            Some(e) => e.pointer_refs += 1,
            None => log::warn!("add_pointer_ref on stale element {id:?}"),
        }
    }

    /// Record that a device no longer rests on `id`.
    pub fn remove_pointer_ref(&mut self, id: ElementId) {
        match self.element_mut(id) {
            Some(e) => {
                if e.pointer_refs == 0 {
                    log::warn!("remove_pointer_ref underflow on element {id:?}");
                } else {
                    e.pointer_refs -= 1;
                }
            }
            None => log::warn!("remove_pointer_ref on stale element {id:?}"),
        }
    }

    /// Returns true if at least one device currently targets `id`.
    pub fn has_pointer(&self, id: ElementId) -> bool {
        self.element(id).map(|e| e.pointer_refs > 0).unwrap_or(false)
    }

    // --- surfaces ---

    /// Register a display surface rooted at `root`.
    ///
    /// Returns `None` (with a diagnostic) if `root` is stale or is not a root
    /// element.
    pub fn add_surface(&mut self, root: ElementId) -> Option<SurfaceId> {
        match self.element(root) {
            Some(e) if e.parent.is_none() => {}
            Some(_) => {
                log::warn!("add_surface: {root:?} is not a root element");
                return None;
            }
            None => {
                log::warn!("add_surface: stale root {root:?}");
                return None;
            }
        }
        let (idx, generation) = if let Some(idx) = self.surface_free.pop() {
            let generation = self.surface_generations[idx].saturating_add(1);
            self.surface_generations[idx] = generation;
            self.surfaces[idx] = Some(Surface { generation, root });
            #[allow(
                clippy::cast_possible_truncation,
                reason = "SurfaceId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.surfaces.push(Some(Surface { generation, root }));
            self.surface_generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "SurfaceId uses 32-bit indices by design."
            )]
            ((self.surfaces.len() - 1) as u32, generation)
        };
        Some(SurfaceId::new(idx, generation))
    }

    /// Unregister a surface, returning its root element.
    ///
    /// The root element itself is not removed; tear it down separately with
    /// [`Scene::remove`] if desired.
    pub fn remove_surface(&mut self, id: SurfaceId) -> Option<ElementId> {
        let root = self.surface(id)?.root;
        self.surfaces[id.idx()] = None;
        self.surface_free.push(id.idx());
        Some(root)
    }

    /// Returns true if `id` refers to a live surface.
    pub fn surface_is_alive(&self, id: SurfaceId) -> bool {
        self.surface(id).is_some()
    }

    /// Returns the root element of a live surface.
    pub fn surface_root(&self, id: SurfaceId) -> Option<ElementId> {
        self.surface(id).map(|s| s.root)
    }

    // --- picking ---

    /// Pick the topmost visible, reactive element of `surface` under `at`.
    ///
    /// Candidates are ranked by z-index; equal z resolves to the newer handle.
    /// An invisible element hides its whole subtree, while a visible but
    /// non-reactive element still lets its children participate. Returns
    /// `None` when the surface is stale or nothing reactive lies under the
    /// point.
    pub fn pick(&self, surface: SurfaceId, at: Point) -> Option<ElementId> {
        let Some(root) = self.surface_root(surface) else {
            log::warn!("pick on stale surface {surface:?}");
            return None;
        };
        let mut best: Option<(ElementId, i32)> = None;
        let mut stack = Vec::new();
        stack.push(root);
        while let Some(id) = stack.pop() {
            let Some(el) = self.element(id) else {
                continue;
            };
            if !el.desc.flags.contains(ElementFlags::VISIBLE) {
                continue;
            }
            stack.extend(el.children.iter().copied());
            if !el.desc.flags.contains(ElementFlags::REACTIVE) {
                continue;
            }
            if !el.desc.bounds.contains(at) {
                continue;
            }
            let z = el.desc.z_index;
            match best {
                None => best = Some((id, z)),
                Some((best_id, best_z)) => {
                    if z > best_z || (z == best_z && Self::id_is_newer(id, best_id)) {
                        best = Some((id, z));
                    }
                }
            }
        }
        best.map(|(id, _)| id)
    }

    // --- internals ---

    #[inline]
    fn id_is_newer(a: ElementId, b: ElementId) -> bool {
        (a.1 > b.1) || (a.1 == b.1 && a.0 > b.0)
    }

    fn element(&self, id: ElementId) -> Option<&Element> {
        let e = self.elements.get(id.idx())?.as_ref()?;
        (e.generation == id.1).then_some(e)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let e = self.elements.get_mut(id.idx())?.as_mut()?;
        (e.generation == id.1).then_some(e)
    }

    fn surface(&self, id: SurfaceId) -> Option<&Surface> {
        let s = self.surfaces.get(id.idx())?.as_ref()?;
        (s.generation == id.1).then_some(s)
    }
}
