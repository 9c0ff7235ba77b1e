// Copyright 2026 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure transition logic: compute the ordered Enter/Leave steps for a target change.
//!
//! ## Usage
//!
//! Given the old target, the new target, and the surface root, [`steps_between`]
//! returns the notifications a tracker must dispatch, in order. The function is
//! pure: it never touches device or scene state, which is what makes the
//! ordering rules testable in isolation.
//!
//! ## Minimal example
//!
//! ```
//! use bracken_crossing::crossing::{steps_between, Step};
//! use bracken_crossing::types::CrossingKind;
//!
//! // From nowhere onto descendant 2 of root 1: the surface is entered first.
//! let steps = steps_between(None, Some(2_u32), Some(1));
//! assert_eq!(
//!     steps,
//!     vec![
//!         Step { kind: CrossingKind::Enter, source: 1, related: None },
//!         Step { kind: CrossingKind::Enter, source: 2, related: Some(1) },
//!     ]
//! );
//! ```

use alloc::vec::Vec;

use crate::types::CrossingKind;

/// One planned notification: the kind plus its source/related pairing.
///
/// The timestamp, coordinates, device, and surface are supplied by the tracker
/// when the step is turned into a full [`Crossing`](crate::types::Crossing).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Step<E> {
    /// Enter or Leave.
    pub kind: CrossingKind,
    /// The element the notification is about.
    pub source: E,
    /// The other party in the transition, if any.
    pub related: Option<E>,
}

/// Compute the ordered steps that move a device's target from `old` to `new`.
///
/// Ordering semantics:
/// - An unchanged target produces no steps (idempotence).
/// - The Leave for `old` always precedes the Enter for `new`.
/// - Entering from nowhere onto a descendant of `root` first enters the root,
///   so the surface never appears to have been skipped; the descendant's Enter
///   then carries the root as its related element.
///
/// `root` is only consulted for that boundary case; pass `None` when the
/// surface root is unknown and the transition degrades to a direct Enter.
pub fn steps_between<E: Copy + Eq>(old: Option<E>, new: Option<E>, root: Option<E>) -> Vec<Step<E>> {
    let mut out = Vec::new();
    if old == new {
        return out;
    }
    if let Some(from) = old {
        out.push(Step {
            kind: CrossingKind::Leave,
            source: from,
            related: new,
        });
    }
    if let Some(to) = new {
        let mut related = old;
        if old.is_none() {
            if let Some(r) = root {
                if to != r {
                    out.push(Step {
                        kind: CrossingKind::Enter,
                        source: r,
                        related: None,
                    });
                    related = Some(r);
                }
            }
        }
        out.push(Step {
            kind: CrossingKind::Enter,
            source: to,
            related,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn unchanged_target_is_empty() {
        assert!(steps_between(None, None, Some(1_u32)).is_empty());
        assert!(steps_between(Some(5_u32), Some(5), Some(1)).is_empty());
    }

    #[test]
    fn sibling_move_leaves_then_enters() {
        let steps = steps_between(Some(2_u32), Some(3), Some(1));
        assert_eq!(
            steps,
            vec![
                Step {
                    kind: CrossingKind::Leave,
                    source: 2,
                    related: Some(3),
                },
                Step {
                    kind: CrossingKind::Enter,
                    source: 3,
                    related: Some(2),
                },
            ]
        );
    }

    #[test]
    fn clearing_leaves_with_no_related() {
        let steps = steps_between(Some(2_u32), None, Some(1));
        assert_eq!(
            steps,
            vec![Step {
                kind: CrossingKind::Leave,
                source: 2,
                related: None,
            }]
        );
    }

    #[test]
    fn fresh_entry_crosses_root_first() {
        let steps = steps_between(None, Some(2_u32), Some(1));
        assert_eq!(steps.len(), 2);
        assert_eq!(
            steps[0],
            Step {
                kind: CrossingKind::Enter,
                source: 1,
                related: None,
            }
        );
        assert_eq!(
            steps[1],
            Step {
                kind: CrossingKind::Enter,
                source: 2,
                related: Some(1),
            }
        );
    }

    #[test]
    fn fresh_entry_onto_root_is_single() {
        let steps = steps_between(None, Some(1_u32), Some(1));
        assert_eq!(
            steps,
            vec![Step {
                kind: CrossingKind::Enter,
                source: 1,
                related: None,
            }]
        );
    }

    #[test]
    fn fresh_entry_without_root_degrades_to_direct_enter() {
        let steps = steps_between(None, Some(2_u32), None);
        assert_eq!(
            steps,
            vec![Step {
                kind: CrossingKind::Enter,
                source: 2,
                related: None,
            }]
        );
    }

    // Moving between elements never synthesizes a root crossing: the device
    // was already inside the surface.
    #[test]
    fn interior_move_skips_root() {
        let steps = steps_between(Some(3_u32), Some(4), Some(1));
        assert_eq!(steps.len(), 2);
        assert!(steps.iter().all(|s| s.source != 1));
    }
}
