// Copyright 2026 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-device state: the mutable record behind each [`DeviceId`].
//!
//! [`DeviceState`] is owned by the tracker and updated on every sample; the
//! previous position/modifiers/timestamp are kept so handlers can compute
//! deltas without their own history.
//!
//! [`DeviceId`]: crate::types::DeviceId

use alloc::string::String;
use kurbo::Point;

use crate::types::{DeviceKind, Modifiers};

/// The mutable record for one registered device.
///
/// Scalar fields (position, modifiers, time) are overwritten on every sample
/// with the prior values saved first. The attached surface and tracked target
/// are mutated only by the tracker's transition logic.
#[derive(Clone, Debug)]
pub struct DeviceState<E, S> {
    pub(crate) generation: u32,
    kind: DeviceKind,
    name: String,
    position: Point,
    previous_position: Point,
    modifiers: Modifiers,
    previous_modifiers: Modifiers,
    time: u64,
    previous_time: u64,
    click_count: u32,
    pub(crate) surface: Option<S>,
    pub(crate) target: Option<E>,
}

impl<E: Copy, S: Copy> DeviceState<E, S> {
    pub(crate) fn new(generation: u32, kind: DeviceKind, name: String) -> Self {
        Self {
            generation,
            kind,
            name,
            position: Point::ZERO,
            previous_position: Point::ZERO,
            modifiers: Modifiers::empty(),
            previous_modifiers: Modifiers::empty(),
            time: 0,
            previous_time: 0,
            click_count: 0,
            surface: None,
            target: None,
        }
    }

    /// Overwrite the scalar sample state, saving the prior values first.
    pub(crate) fn record_sample(&mut self, position: Point, modifiers: Modifiers, time: u64) {
        self.previous_position = self.position;
        self.previous_modifiers = self.modifiers;
        self.previous_time = self.time;
        self.position = position;
        self.modifiers = modifiers;
        self.time = time;
    }

    /// The device's capability class.
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Human-readable device name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position recorded by the most recent sample.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Position recorded by the sample before the most recent one.
    pub fn previous_position(&self) -> Point {
        self.previous_position
    }

    /// Modifier state recorded by the most recent sample.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Modifier state recorded by the sample before the most recent one.
    pub fn previous_modifiers(&self) -> Modifiers {
        self.previous_modifiers
    }

    /// Timestamp of the most recent sample, in milliseconds.
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Timestamp of the sample before the most recent one.
    pub fn previous_time(&self) -> u64 {
        self.previous_time
    }

    /// Click count as maintained by the host's multi-click policy.
    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    pub(crate) fn set_click_count(&mut self, count: u32) {
        self.click_count = count;
    }

    /// The surface this device is attached to, if any.
    pub fn surface(&self) -> Option<S> {
        self.surface
    }

    /// The element this device currently rests on, if any.
    ///
    /// Non-null only for [`DeviceKind::Pointer`] devices attached to a
    /// surface.
    pub fn tracked_target(&self) -> Option<E> {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn record_sample_saves_previous() {
        let mut dev: DeviceState<u32, u32> =
            DeviceState::new(1, DeviceKind::Pointer, "test pointer".to_string());

        dev.record_sample(Point::new(10.0, 20.0), Modifiers::SHIFT, 100);
        assert_eq!(dev.position(), Point::new(10.0, 20.0));
        assert_eq!(dev.previous_position(), Point::ZERO);
        assert_eq!(dev.previous_time(), 0);

        dev.record_sample(Point::new(30.0, 40.0), Modifiers::empty(), 116);
        assert_eq!(dev.previous_position(), Point::new(10.0, 20.0));
        assert_eq!(dev.previous_modifiers(), Modifiers::SHIFT);
        assert_eq!(dev.previous_time(), 100);
        assert_eq!(dev.time(), 116);
    }

    #[test]
    fn fresh_device_is_detached() {
        let dev: DeviceState<u32, u32> =
            DeviceState::new(1, DeviceKind::Keyboard, "kbd".to_string());
        assert_eq!(dev.kind(), DeviceKind::Keyboard);
        assert_eq!(dev.surface(), None);
        assert_eq!(dev.tracked_target(), None);
        assert_eq!(dev.click_count(), 0);
    }
}
