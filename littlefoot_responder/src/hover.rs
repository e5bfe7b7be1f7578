// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tracking: enter/leave crossings from successive pointer paths.
//!
//! ## Usage
//!
//! 1) Resolve the root→target path under the pointer (for example with
//!    [`path_at_point`](crate::adapters::document::path_at_point) when the `document_adapter`
//!    feature is enabled).
//! 2) Call [`HoverPath::retarget`] with that path to get the [`Crossing`]s since the last move.
//!
//! ## Minimal example
//!
//! ```
//! use littlefoot_responder::hover::{Crossing, HoverPath};
//! let mut h: HoverPath<u32> = HoverPath::new();
//! assert_eq!(h.retarget(&[1, 2]), vec![Crossing::Enter(1), Crossing::Enter(2)]);
//! assert_eq!(h.retarget(&[1, 3]), vec![Crossing::Leave(2), Crossing::Enter(3)]);
//! ```

use alloc::vec::Vec;

/// The root→target path currently under the pointer.
///
/// Retargeting to a new path yields the minimal set of crossings between the two paths, split at
/// their lowest common ancestor. Leaves come first, innermost to outermost, then enters,
/// outermost to innermost. Nodes on the shared prefix produce nothing, so moving between two
/// children of a popover never reports the popover as left.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverPath<K: Copy + Eq> {
    current: Vec<K>,
}

/// A pointer crossing into or out of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Crossing<K> {
    /// The pointer is now over this node or one of its descendants.
    Enter(K),
    /// The pointer is no longer over this node or any of its descendants.
    Leave(K),
}

impl<K: Copy + Eq> HoverPath<K> {
    /// Create an empty hover path.
    pub fn new() -> Self {
        Self {
            current: Vec::new(),
        }
    }

    /// The path currently hovered, root first.
    pub fn current(&self) -> &[K] {
        &self.current
    }

    /// Forget the hovered path and return a leave for every node on it, innermost first.
    pub fn clear(&mut self) -> Vec<Crossing<K>> {
        let out = self.current.iter().rev().map(|&k| Crossing::Leave(k)).collect();
        self.current.clear();
        out
    }

    /// Move the pointer to `path` and return the crossings.
    pub fn retarget(&mut self, path: &[K]) -> Vec<Crossing<K>> {
        let shared = self
            .current
            .iter()
            .zip(path)
            .take_while(|(a, b)| a == b)
            .count();

        let mut out: Vec<Crossing<K>> = self.current[shared..]
            .iter()
            .rev()
            .map(|&k| Crossing::Leave(k))
            .collect();
        out.extend(path[shared..].iter().map(|&k| Crossing::Enter(k)));

        self.current.clear();
        self.current.extend_from_slice(path);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn first_move_enters_outer_to_inner() {
        let mut h: HoverPath<u32> = HoverPath::new();
        assert_eq!(
            h.retarget(&[1, 2, 3]),
            vec![Crossing::Enter(1), Crossing::Enter(2), Crossing::Enter(3)]
        );
        assert_eq!(h.current(), &[1, 2, 3]);
    }

    #[test]
    fn leaving_the_document_leaves_inner_to_outer() {
        let mut h: HoverPath<u32> = HoverPath::new();
        let _ = h.retarget(&[1, 2]);
        assert_eq!(h.retarget(&[]), vec![Crossing::Leave(2), Crossing::Leave(1)]);
        assert!(h.current().is_empty());
    }

    #[test]
    fn clear_matches_retarget_to_empty() {
        let mut a: HoverPath<u32> = HoverPath::new();
        let mut b = a.clone();
        let _ = a.retarget(&[4, 5, 6]);
        let _ = b.retarget(&[4, 5, 6]);
        assert_eq!(a.clear(), b.retarget(&[]));
    }

    // Body → popover → content, then over to the popover tooltip: the popover stays entered.
    #[test]
    fn moving_inside_a_subtree_keeps_the_ancestor() {
        let mut h: HoverPath<u32> = HoverPath::new();
        let _ = h.retarget(&[1, 10, 11]);
        assert_eq!(
            h.retarget(&[1, 10, 12]),
            vec![Crossing::Leave(11), Crossing::Enter(12)]
        );
    }

    // Button → popover with the body as the only shared ancestor.
    #[test]
    fn sibling_subtrees_cross_at_the_common_ancestor() {
        let mut h: HoverPath<u32> = HoverPath::new();
        let _ = h.retarget(&[1, 2, 3]);
        assert_eq!(
            h.retarget(&[1, 10, 11]),
            vec![
                Crossing::Leave(3),
                Crossing::Leave(2),
                Crossing::Enter(10),
                Crossing::Enter(11),
            ]
        );
    }

    #[test]
    fn disjoint_paths_leave_everything() {
        let mut h: HoverPath<u32> = HoverPath::new();
        let _ = h.retarget(&[1, 2]);
        assert_eq!(
            h.retarget(&[7]),
            vec![Crossing::Leave(2), Crossing::Leave(1), Crossing::Enter(7)]
        );
    }

    #[test]
    fn same_path_is_quiet() {
        let mut h: HoverPath<u32> = HoverPath::new();
        let _ = h.retarget(&[7, 8]);
        assert!(h.retarget(&[7, 8]).is_empty());
    }
}
