// Copyright 2026 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Bracken crates.
//!
//! Enabled via feature flags to keep the core small and `no_std` by default.

#[cfg(feature = "scene_adapter")]
pub mod scene;
