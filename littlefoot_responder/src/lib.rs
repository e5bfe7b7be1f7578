// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Littlefoot Responder: deterministic, `no_std` event delegation for footnote popovers.
//!
//! ## Overview
//!
//! A page with hundreds of footnotes should not carry hundreds of listeners. This crate models a
//! single delegated listener per event type: events arrive with their target already resolved,
//! the [`Delegator`](crate::delegate::Delegator) reconstructs the target's ancestry and turns the
//! event into an [`Intent`](crate::types::Intent) the popover engine acts on.
//!
//! It does not perform hit testing and does not own any state machine.
//!
//! ## Roles
//!
//! A [`RoleLookup`](crate::types::RoleLookup) marks elements as
//! [`Button`](crate::types::Role::Button) or [`Popover`](crate::types::Role::Popover).
//! The innermost role on the target's path decides the [`Route`](crate::types::Route):
//!
//! - a click on a button (or anything inside it) toggles that button;
//! - a click inside a popover is left alone;
//! - a click anywhere else is reported as [`ClickOutside`](crate::types::Intent::ClickOutside).
//!
//! Because roles are looked up per event, buttons inserted after the delegator was attached are
//! handled like the original ones.
//!
//! ## Keyboard, scroll and resize
//!
//! Escape dismisses everything. Enter and Space on a button toggle it. Document scroll and
//! viewport resize ask for a reflow; scrolling inside a popover asks for its scroll flags to be
//! refreshed.
//!
//! ## Hover
//!
//! Pointer moves carry the root→target path under the pointer. [`HoverPath`](crate::hover::HoverPath)
//! diffs it against the previous path at the lowest common ancestor, and the delegator reports the
//! crossings of nodes that have a role.
//!
//! ## Minimal example
//!
//! ```
//! use littlefoot_responder::delegate::Delegator;
//! use littlefoot_responder::types::{Event, Intent, ParentLookup, Role, RoleLookup};
//!
//! #[derive(Copy, Clone, Debug, Eq, PartialEq)]
//! struct Node(u32);
//!
//! // 1 is the body, 2 a button inside it, 3 a label inside the button.
//! struct Tree;
//! impl ParentLookup<Node> for Tree {
//!     fn parent_of(&self, n: &Node) -> Option<Node> {
//!         match n.0 {
//!             2 => Some(Node(1)),
//!             3 => Some(Node(2)),
//!             _ => None,
//!         }
//!     }
//! }
//! impl RoleLookup<Node> for Tree {
//!     fn role_of(&self, n: &Node) -> Option<Role> {
//!         (n.0 == 2).then_some(Role::Button)
//!     }
//! }
//!
//! let mut delegator = Delegator::new();
//! let intents = delegator.handle(Event::Click { target: Node(3) }, &Tree, &Tree);
//! assert_eq!(intents, vec![Intent::Toggle(Node(2))]);
//! let intents = delegator.handle(Event::Click { target: Node(1) }, &Tree, &Tree);
//! assert_eq!(intents, vec![Intent::ClickOutside]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod delegate;
pub mod hover;
pub mod types;
