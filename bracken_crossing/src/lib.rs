// Copyright 2026 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bracken Crossing: per-device pointer crossing tracking with ordered Enter/Leave synthesis.
//!
//! ## Overview
//!
//! This crate watches where each pointer device rests in a scene and
//! synthesizes the Enter and Leave crossing notifications that handlers
//! expect as the pointer moves across elements and across display surfaces.
//! It does not perform hit testing itself: the scene is consulted through the
//! [`SceneLookup`](crate::types::SceneLookup) and
//! [`PickOracle`](crate::types::PickOracle) traits, and notifications leave
//! through a synchronous [`CrossingSink`](crate::types::CrossingSink).
//!
//! ## Workflow
//!
//! 1) Register devices with
//!    [`CrossingTracker::add_device`](crate::tracker::CrossingTracker::add_device)
//!    when the platform layer discovers them.
//! 2) Feed every raw sample through
//!    [`CrossingTracker::process_sample`](crate::tracker::CrossingTracker::process_sample).
//!    The tracker records scalar state, runs the oracle, and dispatches the
//!    Enter/Leave sequence for any target change.
//! 3) Forward lifecycle events from the registry:
//!    [`element_destroyed`](crate::tracker::CrossingTracker::element_destroyed)
//!    when an element goes away,
//!    [`surface_destroyed`](crate::tracker::CrossingTracker::surface_destroyed)
//!    on surface teardown,
//!    [`remove_device`](crate::tracker::CrossingTracker::remove_device) at
//!    device removal.
//!
//! ## Ordering
//!
//! For a target change the dispatch order is fixed: the Leave for the old
//! target, then an Enter for the surface root when entering a surface from
//! nowhere onto a non-root element, then the Enter for the new target. Each
//! notification is fully dispatched before the next begins, and
//! the tracked target is committed only after the whole sequence, so handlers
//! never observe a half-applied transition.
//!
//! ## Failed picks and destruction
//!
//! A `None` answer from the oracle changes nothing: transient pick failures
//! must not synthesize ghost Leave notifications. Destruction of the tracked
//! element clears the target silently (no Leave) through the guard table,
//! with generational handle staleness as a backstop; see
//! [`tracker`](crate::tracker) for the rationale.
//!
//! ## Sink sketch
//!
//! Any `FnMut(&Crossing<E, S>)` is a sink, so a host can dispatch straight
//! into its handler list:
//!
//! ```no_run
//! use bracken_crossing::types::{Crossing, CrossingKind};
//!
//! fn deliver(c: &Crossing<u32, u32>) {
//!     match c.kind {
//!         CrossingKind::Enter => { /* notify enter handlers of c.source */ }
//!         CrossingKind::Leave => { /* notify leave handlers of c.source */ }
//!     }
//! }
//! # let _sink = |c: &Crossing<u32, u32>| deliver(c);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod crossing;
pub mod device;
pub mod tracker;
pub mod types;
