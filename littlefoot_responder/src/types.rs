// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for delegation: roles, lookups, events, and intents.
//!
//! ## Overview
//!
//! These types describe the delegation protocol and its inputs/outputs.
//! They are referenced by the [`delegate`](crate::delegate) module and used by the popover engine.

use alloc::vec::Vec;

/// What an element is to the popover engine.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Role {
    /// A footnote trigger button.
    Button,
    /// The root of an open popover. Everything inside it shares this role.
    Popover,
}

/// Keys the delegator distinguishes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    /// Dismisses every popover.
    Escape,
    /// Activates or dismisses the focused button.
    Enter,
    /// Activates or dismisses the focused button.
    Space,
    /// Any other key; ignored.
    Other,
}

/// Map elements to roles.
///
/// Roles are looked up on every event, so elements inserted after the delegator was attached are
/// handled like the original ones.
pub trait RoleLookup<K> {
    /// Returns the role of `node`, if it has one.
    fn role_of(&self, node: &K) -> Option<Role>;
}

/// Look up the parent of a node to reconstruct a root→target path.
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// A no‑op parent provider: every node is its own root.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    #[inline]
    fn parent_of(&self, _node: &K) -> Option<K> {
        None
    }
}

/// Where a target sits relative to the footnote markup.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Route<K> {
    /// The target is a footnote button or inside one.
    Button(K),
    /// The target is inside an open popover; carries the popover root.
    Popover(K),
    /// Anywhere else.
    Outside,
}

/// A document-level event with its target already resolved.
#[derive(Clone, Debug, PartialEq)]
pub enum Event<K> {
    /// Primary click on `target`.
    Click {
        /// Innermost element under the pointer.
        target: K,
    },
    /// Key press, with the focused element if any.
    KeyDown {
        /// Pressed key.
        key: Key,
        /// Focused element.
        target: Option<K>,
    },
    /// Pointer moved; `path` is root→target under the pointer, empty when it left the document.
    PointerMove {
        /// Root→target path.
        path: Vec<K>,
    },
    /// The document scrolled.
    Scroll,
    /// The viewport resized.
    Resize,
    /// A scrollable element scrolled; `target` is that element.
    ContentScroll {
        /// The scrolled element.
        target: K,
    },
}

/// What the engine should do in response to an [`Event`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Intent<K> {
    /// Toggle the popover of a button.
    Toggle(K),
    /// A click landed outside every button and popover.
    ClickOutside,
    /// Dismiss every popover.
    DismissAll,
    /// Recompute placement of open popovers; `resize` also recomputes widths.
    Reflow {
        /// The viewport changed size.
        resize: bool,
    },
    /// Refresh the scroll flags of the popover rooted at this node.
    RefreshScroll(K),
    /// The pointer entered a button or popover.
    HoverEnter(K, Role),
    /// The pointer left a button or popover.
    HoverLeave(K, Role),
}
