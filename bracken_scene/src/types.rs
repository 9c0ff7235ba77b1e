// Copyright 2026 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene registry: handles, flags, and element descriptors.

use kurbo::Rect;

/// Identifier for an element in the scene.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ElementId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ElementId`.
///
/// ### Liveness
///
/// Use [`Scene::is_alive`](crate::Scene::is_alive) to check whether an `ElementId` still refers
/// to a live element. Stale handles never alias a different live element because the generation
/// must match. This is what makes it safe for other subsystems (a crossing tracker, a focus
/// manager) to hold an `ElementId` across element destruction without a weak pointer.
///
/// ### Newer
///
/// An `ElementId` is considered newer than another when it has a higher generation,
/// or the same generation and a higher slot index. This total order is used for
/// deterministic tie-breaks in [picking](crate::Scene::pick).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Identifier for a display surface.
///
/// Same slot-and-generation scheme as [`ElementId`]; see there for the liveness rules.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SurfaceId(pub(crate) u32, pub(crate) u32);

impl SurfaceId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element flags controlling visibility and pointer reactivity.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element is visible (participates in picking at all).
        const VISIBLE  = 0b0000_0001;
        /// Element is reactive (eligible to become a pointer's crossing target).
        const REACTIVE = 0b0000_0010;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::REACTIVE
    }
}

/// Descriptor for a new element.
///
/// Bounds are expressed in surface space: whatever layout or transform pipeline
/// sits upstream is expected to resolve positions before registering elements here.
#[derive(Clone, Debug)]
pub struct ElementDesc {
    /// Surface-space bounds used for picking.
    pub bounds: Rect,
    /// Stacking order; higher is nearer to the user.
    pub z_index: i32,
    /// Visibility and reactivity flags.
    pub flags: ElementFlags,
}

impl Default for ElementDesc {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            z_index: 0,
            flags: ElementFlags::default(),
        }
    }
}
