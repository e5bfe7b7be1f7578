// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delegator implementation.
//!
//! ## Overview
//!
//! Turns document-level events into [`Intent`]s for the popover engine.
//! One [`Delegator`] stands in for a single listener per event type at the document root.
//!
//! ## Routing
//!
//! - Reconstructs the target's root→target path via [`ParentLookup`].
//! - Walks it from the target outwards and picks the innermost node with a [`Role`].
//! - Roles are looked up per event, so elements added after [`Delegator::attach`] route the same
//!   way as the original ones.
//!
//! ## Lifecycle
//!
//! A delegator starts attached. [`Delegator::detach`] makes it inert and forgets hover state;
//! [`Delegator::attach`] re-arms it.

use alloc::vec;
use alloc::vec::Vec;

use crate::hover::{Crossing, HoverPath};
use crate::types::{Event, Intent, Key, ParentLookup, Role, RoleLookup, Route};

/// Event delegator for footnote buttons and popovers.
///
/// ## Usage
///
/// - Construct with [`Delegator::new`].
/// - Feed each document event to [`Delegator::handle`] with the current role and parent lookups.
/// - Apply the returned intents in order.
#[derive(Clone, Debug)]
pub struct Delegator<K: Copy + Eq> {
    attached: bool,
    hover: HoverPath<K>,
}

impl<K: Copy + Eq> Default for Delegator<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq> Delegator<K> {
    /// Create an attached delegator with no hover state.
    pub fn new() -> Self {
        Self {
            attached: true,
            hover: HoverPath::new(),
        }
    }

    /// Start routing events.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stop routing events and forget the hovered path.
    pub fn detach(&mut self) {
        self.attached = false;
        self.hover = HoverPath::new();
    }

    /// Whether events are routed.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// The hovered root→target path.
    pub fn hovered(&self) -> &[K] {
        self.hover.current()
    }

    /// Classify `target` by its innermost ancestor (or itself) with a role.
    pub fn route(
        &self,
        target: K,
        roles: &impl RoleLookup<K>,
        parents: &impl ParentLookup<K>,
    ) -> Route<K> {
        let path = reconstruct_path(target, parents);
        for &node in path.iter().rev() {
            match roles.role_of(&node) {
                Some(Role::Button) => return Route::Button(node),
                Some(Role::Popover) => return Route::Popover(node),
                None => {}
            }
        }
        Route::Outside
    }

    /// Handle one event and return what the engine should do about it.
    ///
    /// Returns nothing while detached.
    pub fn handle(
        &mut self,
        event: Event<K>,
        roles: &impl RoleLookup<K>,
        parents: &impl ParentLookup<K>,
    ) -> Vec<Intent<K>> {
        if !self.attached {
            return Vec::new();
        }
        match event {
            Event::Click { target } => match self.route(target, roles, parents) {
                Route::Button(button) => vec![Intent::Toggle(button)],
                Route::Popover(_) => Vec::new(),
                Route::Outside => vec![Intent::ClickOutside],
            },
            Event::KeyDown { key: Key::Escape, .. } => vec![Intent::DismissAll],
            Event::KeyDown {
                key: Key::Enter | Key::Space,
                target: Some(target),
            } => match self.route(target, roles, parents) {
                Route::Button(button) => vec![Intent::Toggle(button)],
                _ => Vec::new(),
            },
            Event::KeyDown { .. } => Vec::new(),
            Event::PointerMove { path } => self
                .hover
                .retarget(&path)
                .into_iter()
                .filter_map(|crossing| match crossing {
                    Crossing::Enter(k) => roles.role_of(&k).map(|r| Intent::HoverEnter(k, r)),
                    Crossing::Leave(k) => roles.role_of(&k).map(|r| Intent::HoverLeave(k, r)),
                })
                .collect(),
            Event::Scroll => vec![Intent::Reflow { resize: false }],
            Event::Resize => vec![Intent::Reflow { resize: true }],
            Event::ContentScroll { target } => match self.route(target, roles, parents) {
                Route::Popover(popover) => vec![Intent::RefreshScroll(popover)],
                _ => Vec::new(),
            },
        }
    }
}

fn reconstruct_path<K: Copy>(target: K, parents: &impl ParentLookup<K>) -> Vec<K> {
    let mut out = Vec::new();
    let mut cur = target;
    // Collect to root; caller ensures acyclic ancestry.
    loop {
        out.push(cur);
        match parents.parent_of(&cur) {
            Some(p) => cur = p,
            None => break,
        }
    }
    out.reverse();
    out
}
