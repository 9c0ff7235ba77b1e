// Copyright 2026 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracker implementation.
//!
//! ## Overview
//!
//! Owns the device table, runs the per-sample update cycle, and turns target
//! changes into ordered [`Crossing`] notifications through a [`CrossingSink`].
//!
//! ## Ordering
//!
//! - The Leave for the old target is fully dispatched before the Enter for the
//!   new target begins.
//! - Entering a surface from nowhere dispatches an Enter for the surface root
//!   before the Enter for the picked descendant.
//! - The device's tracked target is committed only after every notification
//!   for the transition has been dispatched, so handler-scheduled follow-up
//!   work observes either the old state or the new state, never a half-applied
//!   one.
//!
//! ## Destruction
//!
//! The tracker keeps a registration table of (element, device) pairs. Hosts
//! forward element destruction via [`CrossingTracker::element_destroyed`],
//! which clears the affected targets directly and deliberately emits nothing:
//! a destroyed element cannot meaningfully appear as either side of a further
//! transition. As a backstop, a stored target whose handle has gone stale is
//! also treated as already-cleared the next time it is consulted.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::Point;

use crate::crossing;
use crate::device::DeviceState;
use crate::types::{
    Crossing, CrossingKind, CrossingSink, DeviceId, DeviceKind, Modifiers, PickOracle, Sample,
    SceneLookup,
};

/// Per-device crossing state tracker.
///
/// The tracker is an explicit context object: it owns the device records and
/// the destruction-guard table, and every operation takes the scene and sink
/// collaborators as arguments. There is no ambient global state.
///
/// ## Usage
///
/// - Register devices with [`CrossingTracker::add_device`] at discovery time.
/// - Feed raw samples through [`CrossingTracker::process_sample`]; the tracker
///   updates scalar device state, consults the [`PickOracle`], and synthesizes
///   Enter/Leave notifications for target changes.
/// - Forward element destruction ([`CrossingTracker::element_destroyed`]) and
///   surface teardown ([`CrossingTracker::surface_destroyed`]) from the
///   registry so tracked targets never dangle.
pub struct CrossingTracker<E, S> {
    devices: Vec<Option<DeviceState<E, S>>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    // Guard registration table: which devices are interested in which element's
    // destruction. Small by nature (one entry per pointer device).
    watches: Vec<(E, DeviceId)>,
}

impl<E, S> core::fmt::Debug for CrossingTracker<E, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.devices.len();
        let alive = self.devices.iter().filter(|d| d.is_some()).count();
        f.debug_struct("CrossingTracker")
            .field("devices_total", &total)
            .field("devices_alive", &alive)
            .field("watches", &self.watches.len())
            .finish_non_exhaustive()
    }
}

impl<E: Copy + Eq + core::fmt::Debug, S: Copy + Eq + core::fmt::Debug> Default
    for CrossingTracker<E, S>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Copy + Eq + core::fmt::Debug, S: Copy + Eq + core::fmt::Debug> CrossingTracker<E, S> {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            watches: Vec::new(),
        }
    }

    /// Register a device discovered by the platform layer.
    pub fn add_device(&mut self, kind: DeviceKind, name: &str) -> DeviceId {
        let name = String::from(name);
        if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.devices[idx] = Some(DeviceState::new(generation, kind, name));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "DeviceId uses 32-bit indices by design."
            )]
            DeviceId::new(idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.devices.push(Some(DeviceState::new(generation, kind, name)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "DeviceId uses 32-bit indices by design."
            )]
            DeviceId::new((self.devices.len() - 1) as u32, generation)
        }
    }

    /// Remove a device at removal time.
    ///
    /// Detaches it first (surface to none), which emits the usual Leave if a
    /// target was tracked, then frees the record. The id becomes stale.
    pub fn remove_device<L, K>(&mut self, scene: &mut L, sink: &mut K, device: DeviceId)
    where
        L: SceneLookup<Elem = E, Surface = S>,
        K: CrossingSink<E, S>,
    {
        if self.record(device).is_none() {
            log::warn!("remove_device on unknown device {device:?}");
            return;
        }
        self.attach_surface(scene, sink, device, None);
        self.devices[device.idx()] = None;
        self.free_list.push(device.idx());
        self.watches.retain(|(_, d)| *d != device);
    }

    /// Returns true if `device` refers to a live record.
    pub fn is_alive(&self, device: DeviceId) -> bool {
        self.record(device).is_some()
    }

    /// Read access to a live device record.
    pub fn device(&self, device: DeviceId) -> Option<&DeviceState<E, S>> {
        self.record(device)
    }

    /// Current position of a pointer device.
    ///
    /// `None` for unknown devices and for non-pointer kinds; the capability
    /// check is explicit rather than a meaningless default.
    pub fn position(&self, device: DeviceId) -> Option<Point> {
        let rec = self.record(device)?;
        (rec.kind() == DeviceKind::Pointer).then(|| rec.position())
    }

    /// The element `device` currently rests on, if any.
    pub fn tracked_target(&self, device: DeviceId) -> Option<E> {
        self.record(device).and_then(|rec| rec.tracked_target())
    }

    /// Store a host-computed click count on the device record.
    pub fn set_click_count(&mut self, device: DeviceId, count: u32) {
        match self.record_mut(device) {
            Some(rec) => rec.set_click_count(count),
            None => log::warn!("set_click_count on unknown device {device:?}"),
        }
    }

    /// Overwrite the device's scalar sample state (previous values saved first).
    ///
    /// Unconditional and infallible; an unknown device is a no-op with a
    /// diagnostic.
    pub fn update_sample(
        &mut self,
        device: DeviceId,
        position: Point,
        modifiers: Modifiers,
        time: u64,
    ) {
        match self.record_mut(device) {
            Some(rec) => rec.record_sample(position, modifiers, time),
            None => log::warn!("update_sample on unknown device {device:?}"),
        }
    }

    /// Move `device`'s tracked target to `new_target`, synthesizing crossings.
    ///
    /// The transition dispatches, in order: the Leave for the old target (with
    /// the new target as its related element), then an Enter for the surface
    /// root when entering from nowhere onto a non-root element, then the Enter
    /// for the new target. Each notification is fully dispatched
    /// before the next begins. Calling with the current target is a no-op.
    ///
    /// Guards: non-pointer devices, detached devices, stale elements, and
    /// non-reactive elements are rejected with a diagnostic and no state
    /// change.
    pub fn retarget<L, K>(
        &mut self,
        scene: &mut L,
        sink: &mut K,
        device: DeviceId,
        new_target: Option<E>,
    ) where
        L: SceneLookup<Elem = E, Surface = S>,
        K: CrossingSink<E, S>,
    {
        let Some(rec) = self.record(device) else {
            log::warn!("retarget on unknown device {device:?}");
            return;
        };
        let kind = rec.kind();
        let surface = rec.surface;
        let position = rec.position();
        let time = rec.time();
        let stored = rec.tracked_target();

        if kind != DeviceKind::Pointer {
            if new_target.is_some() {
                log::warn!("retarget on non-pointer device {device:?}");
            }
            return;
        }
        let Some(surface) = surface else {
            // A detached pointer holds no target, so clearing is already done.
            if new_target.is_some() {
                log::warn!("retarget on detached device {device:?}");
            }
            return;
        };

        // Backstop for a missed destruction notice: a stale stored target is
        // treated as already cleared, silently.
        let old = match stored {
            Some(t) if scene.is_alive(t) => Some(t),
            Some(t) => {
                self.unwatch(t, device);
                if let Some(rec) = self.record_mut(device) {
                    rec.target = None;
                }
                None
            }
            None => None,
        };

        if new_target == old {
            return;
        }
        if let Some(t) = new_target {
            if !scene.is_alive(t) {
                log::warn!("retarget of {device:?} to stale element {t:?}");
                return;
            }
            if !scene.is_reactive(t) {
                log::warn!("retarget of {device:?} to non-reactive element {t:?}");
                return;
            }
        }

        let root = if old.is_none() && new_target.is_some() {
            scene.surface_root(surface)
        } else {
            None
        };

        log::trace!("device {device:?} crossing {old:?} -> {new_target:?}");

        // Dispatch runs inline: the has-pointer state and the guard table are
        // adjusted as each side of the transition completes, and the tracked
        // target is committed only after the whole sequence.
        for step in crossing::steps_between(old, new_target, root) {
            let notification = Crossing {
                kind: step.kind,
                time,
                position,
                device,
                source: step.source,
                related: step.related,
                surface,
            };
            sink.dispatch(&notification);
            match step.kind {
                CrossingKind::Leave if Some(step.source) == old => {
                    scene.remove_pointer_ref(step.source);
                    self.unwatch(step.source, device);
                }
                CrossingKind::Enter if Some(step.source) == new_target => {
                    scene.add_pointer_ref(step.source);
                    self.watch(step.source, device);
                }
                _ => {}
            }
        }

        if let Some(rec) = self.record_mut(device) {
            rec.target = new_target;
        }
    }

    /// Attach `device` to `new_surface` (or detach it with `None`).
    ///
    /// If the device holds a target on its old surface, a Leave is dispatched
    /// first, carrying the old surface and, when moving to another surface,
    /// that surface's root as the related element. No target is picked on the
    /// new surface here; that happens on the next sample.
    pub fn attach_surface<L, K>(
        &mut self,
        scene: &mut L,
        sink: &mut K,
        device: DeviceId,
        new_surface: Option<S>,
    ) where
        L: SceneLookup<Elem = E, Surface = S>,
        K: CrossingSink<E, S>,
    {
        let Some(rec) = self.record(device) else {
            log::warn!("attach_surface on unknown device {device:?}");
            return;
        };
        let old_surface = rec.surface;
        if old_surface == new_surface {
            return;
        }
        let stored = rec.tracked_target();
        let position = rec.position();
        let time = rec.time();

        if let Some(target) = stored {
            // The Leave carries the old surface, so it goes out before the
            // attachment is updated.
            if let Some(from) = old_surface {
                if scene.is_alive(target) {
                    let related = new_surface.and_then(|s| scene.surface_root(s));
                    let notification = Crossing {
                        kind: CrossingKind::Leave,
                        time,
                        position,
                        device,
                        source: target,
                        related,
                        surface: from,
                    };
                    sink.dispatch(&notification);
                    scene.remove_pointer_ref(target);
                }
            }
            self.unwatch(target, device);
            if let Some(rec) = self.record_mut(device) {
                rec.target = None;
            }
        }

        if let Some(rec) = self.record_mut(device) {
            rec.surface = new_surface;
        }
    }

    /// Run the full update cycle for one raw sample.
    ///
    /// Surface transition (if the sample names a differing surface), scalar
    /// update, pick, and retarget, in that order. Returns the tracked target
    /// after processing so the caller can populate the triggering event.
    ///
    /// A `None` pick leaves the target untouched: a transiently failing oracle
    /// must never synthesize a ghost Leave.
    pub fn process_sample<L, K>(
        &mut self,
        scene: &mut L,
        sink: &mut K,
        device: DeviceId,
        sample: Sample<S>,
    ) -> Option<E>
    where
        L: PickOracle<Elem = E, Surface = S>,
        K: CrossingSink<E, S>,
    {
        let Some(rec) = self.record(device) else {
            log::warn!("process_sample on unknown device {device:?}");
            return None;
        };
        let kind = rec.kind();
        let attached = rec.surface;

        if let Some(surface) = sample.surface {
            if attached != Some(surface) {
                self.attach_surface(scene, sink, device, Some(surface));
            }
        }
        self.update_sample(device, sample.position, sample.modifiers, sample.time);

        if kind == DeviceKind::Pointer {
            if let Some(surface) = self.record(device).and_then(|r| r.surface) {
                if let Some(hit) = scene.pick(surface, sample.position) {
                    let current = self.record(device).and_then(|r| r.tracked_target());
                    if Some(hit) != current {
                        self.retarget(scene, sink, device, Some(hit));
                    }
                }
            }
        }

        self.record(device).and_then(|r| r.tracked_target())
    }

    /// Guard path: the registry destroyed `element`.
    ///
    /// Every device registered as interested has its tracked target cleared
    /// directly. Deliberately emits no Leave: the destroyed element cannot
    /// appear as either side of a further transition. Asymmetric with
    /// [`CrossingTracker::attach_surface`], which does emit one; see the
    /// module docs.
    pub fn element_destroyed(&mut self, element: E) {
        let mut owners = Vec::new();
        self.watches.retain(|(e, d)| {
            if *e == element {
                owners.push(*d);
                false
            } else {
                true
            }
        });
        for device in owners {
            if let Some(rec) = self.record_mut(device) {
                if rec.target == Some(element) {
                    log::trace!("device {device:?} target {element:?} destroyed");
                    rec.target = None;
                }
            }
        }
    }

    /// Surface teardown: detach every device attached to `surface`.
    pub fn surface_destroyed<L, K>(&mut self, scene: &mut L, sink: &mut K, surface: S)
    where
        L: SceneLookup<Elem = E, Surface = S>,
        K: CrossingSink<E, S>,
    {
        let attached: Vec<DeviceId> = self
            .devices
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                let rec = slot.as_ref()?;
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "DeviceId uses 32-bit indices by design."
                )]
                (rec.surface == Some(surface)).then(|| DeviceId::new(i as u32, rec.generation))
            })
            .collect();
        for device in attached {
            self.attach_surface(scene, sink, device, None);
        }
    }

    // --- internals ---

    fn watch(&mut self, element: E, device: DeviceId) {
        if !self.watches.contains(&(element, device)) {
            self.watches.push((element, device));
        }
    }

    fn unwatch(&mut self, element: E, device: DeviceId) {
        self.watches.retain(|w| *w != (element, device));
    }

    fn record(&self, device: DeviceId) -> Option<&DeviceState<E, S>> {
        let rec = self.devices.get(device.idx())?.as_ref()?;
        (rec.generation == device.1).then_some(rec)
    }

    fn record_mut(&mut self, device: DeviceId) -> Option<&mut DeviceState<E, S>> {
        let rec = self.devices.get_mut(device.idx())?.as_mut()?;
        (rec.generation == device.1).then_some(rec)
    }
}
