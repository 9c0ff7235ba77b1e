// Copyright 2026 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bracken Scene: a Kurbo-native scene registry with generational handles.
//!
//! Bracken Scene is the element-registry half of the Bracken workspace. It owns
//! a forest of elements, names display surfaces, and answers point picks.
//!
//! - Represents elements with surface-space bounds, z-order, and flags for
//!   visibility and pointer reactivity.
//! - Hands out generational [`ElementId`]/[`SurfaceId`] handles: a freed slot is
//!   reused with a bumped generation, so a stale handle fails lookups cleanly
//!   instead of aliasing a new element. Subsystems that hold handles across
//!   destruction (such as the crossing tracker in `bracken_crossing`) need no
//!   weak pointers.
//! - Maintains the per-element has-pointer reference count on behalf of the
//!   crossing subsystem: the flag means "at least one device rests here".
//! - Answers [`Scene::pick`] queries: the topmost visible, reactive element of
//!   a surface under a point.
//!
//! ## Not a layout engine
//!
//! This crate performs no layout and no transform math. Upstream code resolves
//! element positions into surface space and registers the resulting boxes,
//! z-order, and flags here.
//!
//! ## Example
//!
//! ```
//! use bracken_scene::{ElementDesc, Scene};
//! use kurbo::{Point, Rect};
//!
//! let mut scene = Scene::new();
//! let root = scene.insert(
//!     None,
//!     ElementDesc { bounds: Rect::new(0.0, 0.0, 200.0, 200.0), ..Default::default() },
//! );
//! let button = scene.insert(
//!     Some(root),
//!     ElementDesc { bounds: Rect::new(10.0, 10.0, 60.0, 40.0), z_index: 1, ..Default::default() },
//! );
//! let surface = scene.add_surface(root).unwrap();
//!
//! assert_eq!(scene.pick(surface, Point::new(20.0, 20.0)), Some(button));
//! assert_eq!(scene.pick(surface, Point::new(150.0, 150.0)), Some(root));
//!
//! // Removal reports the destroyed handles so trackers can drop them.
//! let destroyed = scene.remove(button);
//! assert_eq!(destroyed, vec![button]);
//! assert!(!scene.is_alive(button));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod scene;
mod types;

pub use scene::Scene;
pub use types::{ElementDesc, ElementFlags, ElementId, SurfaceId};
