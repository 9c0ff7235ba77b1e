// Copyright 2026 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the crossing tracker: handles, kinds, notifications, samples,
//! and the collaborator traits.
//!
//! ## Overview
//!
//! These types describe what flows in and out of the
//! [tracker](crate::tracker): raw device [`Sample`]s arrive, ordered
//! [`Crossing`] notifications leave through a [`CrossingSink`], and the scene
//! is consulted through [`SceneLookup`]/[`PickOracle`].

use kurbo::Point;

/// Identifier for a device registered with a tracker.
///
/// Small, copyable, and generational: a slot index plus a generation counter.
/// Removing a device frees its slot; a later device may reuse the slot with a
/// bumped generation, so a stale `DeviceId` fails lookups cleanly and never
/// aliases a different live device.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct DeviceId(pub(crate) u32, pub(crate) u32);

impl DeviceId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// The capability class of an input device.
///
/// Only [`Pointer`](Self::Pointer) devices participate in crossing synthesis;
/// the other kinds keep their sample history but never acquire a target.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DeviceKind {
    /// A pointing device: mouse, touchpad, pen.
    Pointer,
    /// A keyboard device.
    Keyboard,
    /// Any other device class (jog wheels, pads, custom hardware).
    Extension,
}

bitflags::bitflags! {
    /// Modifier and button state carried alongside a sample.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        /// Shift is held.
        const SHIFT   = 1 << 0;
        /// Caps lock is latched.
        const LOCK    = 1 << 1;
        /// Control is held.
        const CONTROL = 1 << 2;
        /// Alt (mod1) is held.
        const ALT     = 1 << 3;
        /// Super (logo) is held.
        const SUPER   = 1 << 4;
        /// Primary pointer button is down.
        const BUTTON1 = 1 << 8;
        /// Middle pointer button is down.
        const BUTTON2 = 1 << 9;
        /// Secondary pointer button is down.
        const BUTTON3 = 1 << 10;
    }
}

/// Whether a crossing notification enters or leaves its source element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CrossingKind {
    /// The pointer moved onto the source element.
    Enter,
    /// The pointer moved off the source element.
    Leave,
}

/// A synthesized crossing notification.
///
/// Ephemeral: built by the tracker for one dispatch and never stored. `source`
/// is the element the notification is about; `related` is the other party in
/// the transition: the element being left for an Enter, the element being
/// entered for a Leave, or `None` when there is no counterpart (entering from
/// outside, leaving to nowhere).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Crossing<E, S> {
    /// Enter or Leave.
    pub kind: CrossingKind,
    /// Timestamp of the sample that triggered the transition, in milliseconds.
    pub time: u64,
    /// Device position at the time of the transition, in surface space.
    pub position: Point,
    /// The device whose target changed.
    pub device: DeviceId,
    /// The element this notification is about.
    pub source: E,
    /// The other party in the transition, if any.
    pub related: Option<E>,
    /// The surface the transition happened on.
    pub surface: S,
}

/// A raw device sample, as delivered by a platform event source.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample<S> {
    /// Position in surface space.
    pub position: Point,
    /// Modifier and button state.
    pub modifiers: Modifiers,
    /// Timestamp in milliseconds.
    pub time: u64,
    /// The surface the sample was observed on, when the source knows it.
    /// A differing surface triggers a surface transition before the sample is
    /// recorded; `None` leaves the attachment unchanged.
    pub surface: Option<S>,
}

/// Element-registry facet consulted by the tracker.
///
/// The tracker treats element and surface handles as opaque copyable tokens;
/// this trait supplies the few facts it needs about them. The two
/// `*_pointer_ref` calls are the only foreign mutation the tracker performs:
/// they maintain the registry's has-pointer state as targets change.
pub trait SceneLookup {
    /// Element handle type.
    type Elem: Copy + Eq + core::fmt::Debug;
    /// Surface handle type.
    type Surface: Copy + Eq + core::fmt::Debug;

    /// Returns true if `elem` still refers to a live element.
    fn is_alive(&self, elem: Self::Elem) -> bool;

    /// Returns true if `elem` is live and eligible to become a crossing target.
    fn is_reactive(&self, elem: Self::Elem) -> bool;

    /// Returns the root element of a live surface.
    fn surface_root(&self, surface: Self::Surface) -> Option<Self::Elem>;

    /// Record that a device now rests on `elem`.
    fn add_pointer_ref(&mut self, elem: Self::Elem);

    /// Record that a device no longer rests on `elem`.
    fn remove_pointer_ref(&mut self, elem: Self::Elem);
}

/// Hit-test oracle resolving surface coordinates to the topmost reactive element.
///
/// `pick` may drive a render-side picking pass internally (hence `&mut self`),
/// but must be side-effect-free with respect to tracker state. Returning
/// `None` means "no information": the tracker will not change its target on a
/// failed pick, so a transiently failing oracle never produces ghost Leave
/// notifications.
pub trait PickOracle: SceneLookup {
    /// Resolve `at` on `surface` to the topmost reactive element, if any.
    fn pick(&mut self, surface: Self::Surface, at: Point) -> Option<Self::Elem>;
}

/// Synchronous receiver for crossing notifications.
///
/// `dispatch` must complete all handler work before returning; the tracker
/// relies on this to make its ordering guarantees (Leave fully delivered
/// before the matching Enter begins) observable by handlers.
pub trait CrossingSink<E: Copy, S: Copy> {
    /// Deliver one notification to all registered handlers.
    fn dispatch(&mut self, crossing: &Crossing<E, S>);
}

impl<E: Copy, S: Copy, F: FnMut(&Crossing<E, S>)> CrossingSink<E, S> for F {
    fn dispatch(&mut self, crossing: &Crossing<E, S>) {
        self(crossing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_compose() {
        let m = Modifiers::SHIFT | Modifiers::BUTTON1;
        assert!(m.contains(Modifiers::SHIFT));
        assert!(!m.contains(Modifiers::CONTROL));
        assert_eq!(m & Modifiers::BUTTON1, Modifiers::BUTTON1);
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = 0_u32;
        {
            let mut sink = |c: &Crossing<u32, u32>| {
                assert_eq!(c.kind, CrossingKind::Enter);
                seen += 1;
            };
            let crossing = Crossing {
                kind: CrossingKind::Enter,
                time: 1,
                position: Point::new(0.0, 0.0),
                device: DeviceId::new(0, 1),
                source: 7_u32,
                related: None,
                surface: 1_u32,
            };
            sink.dispatch(&crossing);
        }
        assert_eq!(seen, 1);
    }
}
