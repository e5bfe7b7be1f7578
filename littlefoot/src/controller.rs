// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-button activation state machine.
//!
//! ```text
//!             request_activate              activate_delay
//!  inactive ──────────────────▶ activating ───────────────▶ active
//!     ▲                             │                         │
//!     │ dismiss_delay               │ superseded              │ request_dismiss
//!     └──────────── dismissing ◀────┴─────────────────────────┘
//! ```
//!
//! One transition per button is in flight at a time. A request of the kind already in flight is
//! absorbed and clears any pending opposite request. A request of the opposite kind is recorded
//! as the single pending intent and starts when the in-flight delay completes.
//!
//! Under the single-open policy every other open popover is dismissed (or, while still
//! activating, superseded) before a new popover is inserted.

use littlefoot_document::ElementId;
use littlefoot_responder::types::Role;
use tracing::{debug, trace};

use crate::engine::{Littlefoot, Task};
use crate::measure::Measure;
use crate::popover::Popover;
use crate::reflow::Throttled;
use crate::registry::Entry;
use crate::scheduler::TaskToken;
use crate::state::{self, ButtonState, Pending};

impl Littlefoot {
    pub(crate) fn request_activate(&mut self, button: ElementId) {
        let Some(entry) = self.registry.get_mut(button) else {
            self.start_activation(button);
            return;
        };
        match entry.state {
            ButtonState::Activating | ButtonState::Active => {
                if entry.pending.take().is_some() {
                    debug!(?button, "pending dismissal cancelled");
                } else {
                    trace!(?button, state = %entry.state, "activation absorbed");
                }
            }
            ButtonState::Dismissing => {
                entry.pending = Some(Pending::Activate);
                debug!(?button, "activation queued behind dismissal");
            }
            ButtonState::Inactive => {}
        }
    }

    pub(crate) fn request_dismiss(&mut self, button: ElementId) {
        let Some(entry) = self.registry.get_mut(button) else {
            trace!(?button, "dismissal of inactive button ignored");
            return;
        };
        match entry.state {
            ButtonState::Activating => {
                entry.pending = Some(Pending::Dismiss);
                debug!(?button, "dismissal queued behind activation");
            }
            ButtonState::Active => self.begin_dismiss(button),
            ButtonState::Dismissing => {
                if entry.pending.take().is_some() {
                    debug!(?button, "pending activation cancelled");
                } else {
                    trace!(?button, "dismissal absorbed");
                }
            }
            ButtonState::Inactive => {}
        }
    }

    /// Request the opposite of where the button is heading.
    pub(crate) fn toggle(&mut self, button: ElementId) {
        let heading_open = self.registry.get(button).is_some_and(|e| match e.pending {
            Some(Pending::Activate) => true,
            Some(Pending::Dismiss) => false,
            None => e.state.is_open(),
        });
        if heading_open {
            self.request_dismiss(button);
        } else {
            self.request_activate(button);
        }
    }

    pub(crate) fn dismiss_all(&mut self) {
        for button in self.registry.buttons() {
            self.request_dismiss(button);
        }
    }

    fn start_activation(&mut self, button: ElementId) {
        if !self.document.is_rendered(button) {
            debug!(?button, "button is not rendered; ignoring activation");
            return;
        }
        if !self.settings.allow_multiple {
            self.enforce_single_open(button);
        }
        self.serial += 1;
        let Some(popover) = Popover::create(
            &mut self.document,
            button,
            &self.settings,
            &*self.measure,
            self.serial,
        ) else {
            return;
        };
        let token = self
            .scheduler
            .schedule(self.settings.activate_delay, Task::FinishActivate(button));
        debug!(?button, popover = popover.id(), "activating");
        self.registry.insert(button, Entry::new(popover, token));
        self.sync(button);
    }

    fn enforce_single_open(&mut self, except: ElementId) {
        for other in self.registry.buttons() {
            if other == except {
                continue;
            }
            let Some(entry) = self.registry.get_mut(other) else {
                continue;
            };
            match entry.state {
                ButtonState::Active => self.begin_dismiss(other),
                ButtonState::Activating => {
                    debug!(button = ?other, "activation superseded");
                    self.begin_dismiss(other);
                }
                ButtonState::Dismissing => {
                    if entry.pending == Some(Pending::Activate) {
                        entry.pending = None;
                        debug!(button = ?other, "pending activation dropped");
                    }
                }
                ButtonState::Inactive => {}
            }
        }
    }

    /// Move to `dismissing`, invalidating whatever was in flight.
    fn begin_dismiss(&mut self, button: ElementId) {
        let Some(entry) = self.registry.get_mut(button) else {
            return;
        };
        for token in [entry.token.take(), entry.hover_token.take()].into_iter().flatten() {
            self.scheduler.cancel(token);
        }
        entry.state = ButtonState::Dismissing;
        entry.pending = None;
        entry.token = Some(
            self.scheduler
                .schedule(self.settings.dismiss_delay, Task::FinishDismiss(button)),
        );
        debug!(?button, "dismissing");
        self.sync(button);
    }

    pub(crate) fn finish_activate(&mut self, button: ElementId, token: TaskToken) {
        let Some(entry) = self.registry.get_mut(button) else {
            return;
        };
        if entry.token != Some(token) || entry.state != ButtonState::Activating {
            trace!(?button, "stale activation ignored");
            return;
        }
        entry.token = None;
        entry.state = ButtonState::Active;
        entry
            .popover
            .reflow(&mut self.document, &self.settings, None);
        let pending = entry.pending.take();
        debug!(?button, "active");
        self.sync(button);
        if pending == Some(Pending::Dismiss) {
            self.begin_dismiss(button);
        }
    }

    pub(crate) fn finish_dismiss(&mut self, button: ElementId, token: TaskToken) {
        if self.registry.get(button).and_then(|e| e.token) != Some(token) {
            trace!(?button, "stale dismissal ignored");
            return;
        }
        let Some(entry) = self.registry.remove(button) else {
            return;
        };
        if let Some(hover) = entry.hover_token {
            self.scheduler.cancel(hover);
        }
        entry.popover.destroy(&mut self.document);
        state::sync(&mut self.document, button, ButtonState::Inactive, None);
        debug!(?button, "inactive");
        if entry.pending == Some(Pending::Activate) {
            self.start_activation(button);
        }
    }

    pub(crate) fn finish_unhover(&mut self, button: ElementId, token: TaskToken) {
        let Some(entry) = self.registry.get_mut(button) else {
            return;
        };
        if entry.hover_token != Some(token) {
            return;
        }
        entry.hover_token = None;
        debug!(?button, "pointer left; dismissing");
        self.request_dismiss(button);
    }

    fn sync(&mut self, button: ElementId) {
        match self.registry.get(button) {
            Some(entry) => state::sync(
                &mut self.document,
                button,
                entry.state,
                Some((entry.popover.root(), entry.popover.id())),
            ),
            None => state::sync(&mut self.document, button, ButtonState::Inactive, None),
        }
    }

    fn hover_button(&self, node: ElementId, role: Role) -> Option<ElementId> {
        match role {
            Role::Button => Some(node),
            Role::Popover => self.registry.button_for_popover(node),
        }
    }

    pub(crate) fn hover_enter(&mut self, node: ElementId, role: Role) {
        let Some(button) = self.hover_button(node, role) else {
            return;
        };
        if let Some(entry) = self.registry.get_mut(button)
            && let Some(token) = entry.hover_token.take()
        {
            self.scheduler.cancel(token);
            trace!(?button, "pointer back; unhover dismissal cancelled");
        }
        if role == Role::Button && self.settings.activate_on_hover {
            self.request_activate(button);
        }
    }

    pub(crate) fn hover_leave(&mut self, node: ElementId, role: Role) {
        if !self.settings.dismiss_on_unhover {
            return;
        }
        let Some(button) = self.hover_button(node, role) else {
            return;
        };
        let Some(entry) = self.registry.get_mut(button) else {
            return;
        };
        if !entry.state.is_open() {
            return;
        }
        if let Some(token) = entry.hover_token.take() {
            self.scheduler.cancel(token);
        }
        entry.hover_token = Some(
            self.scheduler
                .schedule(self.settings.hover_delay, Task::HoverDismiss(button)),
        );
        trace!(?button, "pointer left; unhover dismissal scheduled");
    }

    pub(crate) fn request_reflow(&mut self, resize: bool) {
        let now = self.scheduler.now();
        match self
            .reflow
            .request(now, self.settings.reflow_interval, resize)
        {
            Throttled::Now => self.reflow_all(resize),
            Throttled::Later(delay) => {
                let token = self.scheduler.schedule(delay, Task::TrailingReflow);
                self.reflow.set_trailing(token);
                trace!(?delay, "trailing reflow scheduled");
            }
            Throttled::Coalesced => trace!("reflow coalesced"),
        }
    }

    /// Re-run placement and sizing of every opening or open popover.
    pub(crate) fn reflow_all(&mut self, resize: bool) {
        let measure: Option<&dyn Measure> = resize.then_some(&*self.measure);
        let mut count = 0_usize;
        for (_, entry) in self.registry.popovers_mut() {
            if entry.state.is_open() {
                entry
                    .popover
                    .reflow(&mut self.document, &self.settings, measure);
                count += 1;
            }
        }
        trace!(count, resize, "reflow");
    }
}
