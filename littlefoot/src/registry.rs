// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Buttons with a popover, keyed by button.
//!
//! A button has an entry exactly while its popover exists: from the activation request until
//! the dismissal completes. Inactive buttons have none.

use std::collections::BTreeMap;

use littlefoot_document::ElementId;

use crate::popover::Popover;
use crate::scheduler::TaskToken;
use crate::state::{ButtonState, Pending};

#[derive(Debug)]
pub(crate) struct Entry {
    pub(crate) state: ButtonState,
    pub(crate) pending: Option<Pending>,
    /// Token of the in-flight activate/dismiss task.
    pub(crate) token: Option<TaskToken>,
    /// Token of a scheduled unhover dismissal.
    pub(crate) hover_token: Option<TaskToken>,
    pub(crate) popover: Popover,
}

impl Entry {
    pub(crate) fn new(popover: Popover, token: TaskToken) -> Self {
        Self {
            state: ButtonState::Activating,
            pending: None,
            token: Some(token),
            hover_token: None,
            popover,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Registry {
    entries: BTreeMap<ElementId, Entry>,
}

impl Registry {
    pub(crate) fn get(&self, button: ElementId) -> Option<&Entry> {
        self.entries.get(&button)
    }

    pub(crate) fn get_mut(&mut self, button: ElementId) -> Option<&mut Entry> {
        self.entries.get_mut(&button)
    }

    pub(crate) fn insert(&mut self, button: ElementId, entry: Entry) {
        self.entries.insert(button, entry);
    }

    pub(crate) fn remove(&mut self, button: ElementId) -> Option<Entry> {
        self.entries.remove(&button)
    }

    pub(crate) fn state_of(&self, button: ElementId) -> ButtonState {
        self.get(button).map_or(ButtonState::Inactive, |e| e.state)
    }

    /// Every button with an entry, in id order.
    pub(crate) fn buttons(&self) -> Vec<ElementId> {
        self.entries.keys().copied().collect()
    }

    /// Buttons in `state`.
    pub(crate) fn in_state(&self, state: ButtonState) -> Vec<ElementId> {
        self.entries
            .iter()
            .filter(|(_, e)| e.state == state)
            .map(|(&b, _)| b)
            .collect()
    }

    /// The button owning the popover rooted at `root`.
    pub(crate) fn button_for_popover(&self, root: ElementId) -> Option<ElementId> {
        self.entries
            .iter()
            .find(|(_, e)| e.popover.root() == root)
            .map(|(&b, _)| b)
    }

    pub(crate) fn popovers_mut(&mut self) -> impl Iterator<Item = (ElementId, &mut Entry)> {
        self.entries.iter_mut().map(|(&b, e)| (b, e))
    }

    pub(crate) fn drain(&mut self) -> Vec<(ElementId, Entry)> {
        std::mem::take(&mut self.entries).into_iter().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
