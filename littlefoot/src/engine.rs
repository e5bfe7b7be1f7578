// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine and its public operations.

use std::time::Duration;

use kurbo::Point;
use littlefoot_document::{Document, ElementId};
use littlefoot_responder::adapters::document::{SelectorRoles, path_at_point, target_at_point};
use littlefoot_responder::delegate::Delegator;
use littlefoot_responder::types::{Event, Intent, Key};
use tracing::debug;

use crate::measure::{Measure, TextMeasure};
use crate::popover::Popover;
use crate::reflow::ReflowThrottle;
use crate::registry::Registry;
use crate::scheduler::Scheduler;
use crate::settings::{Compiled, SettingValue, Settings};
use crate::setup::Processed;
use crate::state::{self, ButtonState};
use crate::{Error, setup};

/// An input event, delivered at the document level.
///
/// Scroll and resize events report that the host already changed the document (with
/// [`Document::scroll_to`], [`Document::set_viewport_size`] or [`Document::set_scroll_top`]);
/// the engine reads the new geometry from the document.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DocumentEvent {
    /// Primary click on an element.
    Click {
        /// The clicked element.
        target: ElementId,
    },
    /// Primary click at a client-space point; the target is found by hit testing.
    ClickAt {
        /// Pointer position relative to the viewport.
        point: Point,
    },
    /// Key press.
    KeyDown {
        /// The key.
        key: Key,
        /// The focused element, if any.
        target: Option<ElementId>,
    },
    /// The pointer moved to a client-space point.
    PointerMove {
        /// Pointer position relative to the viewport.
        point: Point,
    },
    /// The document scrolled.
    Scroll,
    /// The viewport was resized.
    Resize,
    /// A popover's content region scrolled.
    ContentScroll {
        /// The scrolled element.
        target: ElementId,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Task {
    FinishActivate(ElementId),
    FinishDismiss(ElementId),
    HoverDismiss(ElementId),
    TrailingReflow,
}

/// A footnote popover engine bound to one document.
///
/// The engine owns the document while mounted. Time only passes through [`Littlefoot::advance`]:
/// activations and dismissals complete once their delay has been advanced past.
pub struct Littlefoot {
    pub(crate) document: Document,
    pub(crate) settings: Settings,
    pub(crate) compiled: Compiled,
    pub(crate) registry: Registry,
    pub(crate) scheduler: Scheduler<Task>,
    pub(crate) delegator: Delegator<ElementId>,
    pub(crate) reflow: ReflowThrottle,
    pub(crate) measure: Box<dyn Measure>,
    pub(crate) serial: u64,
    processed: Processed,
}

impl core::fmt::Debug for Littlefoot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Littlefoot")
            .field("document", &self.document)
            .field("settings", &self.settings)
            .field("popovers", &self.registry.len())
            .field("scheduled", &self.scheduler.len())
            .field("now", &self.scheduler.now())
            .field("mounted", &self.delegator.is_attached())
            .finish_non_exhaustive()
    }
}

impl Littlefoot {
    /// Process the footnotes of `document` into buttons and start handling events.
    pub fn mount(document: Document, settings: Settings) -> Result<Self, Error> {
        let mut engine = Self::new(document, settings)?;
        engine.processed = setup::run(&mut engine.document, &engine.settings, &engine.compiled);
        debug!(buttons = engine.processed.buttons(), "footnotes processed");
        Ok(engine)
    }

    /// Start handling events on a document that already carries footnote buttons.
    ///
    /// Every button is reset to the inactive rendering. The buttons stay in the document on
    /// [`Littlefoot::unmount`].
    pub fn new(document: Document, settings: Settings) -> Result<Self, Error> {
        let compiled = Compiled::new(&settings)?;
        let mut engine = Self {
            document,
            settings,
            compiled,
            registry: Registry::default(),
            scheduler: Scheduler::default(),
            delegator: Delegator::new(),
            reflow: ReflowThrottle::default(),
            measure: Box::new(TextMeasure::default()),
            serial: 0,
            processed: Processed::default(),
        };
        for button in engine.buttons() {
            state::sync(&mut engine.document, button, ButtonState::Inactive, None);
        }
        Ok(engine)
    }

    /// Measure popover content with `measure` instead of [`TextMeasure`].
    pub fn with_measure(mut self, measure: impl Measure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    /// Begin activating the buttons matching `selector`.
    ///
    /// Only the first match is activated unless [`Settings::allow_multiple`] is set. A missing,
    /// empty, invalid or unmatched selector does nothing.
    pub fn activate(&mut self, selector: Option<&str>) {
        if !self.is_mounted() {
            return;
        }
        let Some(mut buttons) = self.select_buttons(selector) else {
            return;
        };
        if !self.settings.allow_multiple {
            buttons.truncate(1);
        }
        for button in buttons {
            self.request_activate(button);
        }
    }

    /// Begin dismissing the buttons matching `selector`, or every open popover without one.
    ///
    /// An empty, invalid or unmatched selector does nothing.
    pub fn dismiss(&mut self, selector: Option<&str>) {
        if !self.is_mounted() {
            return;
        }
        if selector.is_none() {
            self.dismiss_all();
            return;
        }
        let Some(buttons) = self.select_buttons(selector) else {
            return;
        };
        for button in buttons {
            self.request_dismiss(button);
        }
    }

    /// Read a setting by its camelCase name. See [`Settings::get`].
    pub fn get_setting(&self, name: &str) -> Option<SettingValue> {
        self.settings.get(name)
    }

    /// Deliver a document-level event.
    pub fn dispatch(&mut self, event: DocumentEvent) {
        let event = match event {
            DocumentEvent::Click { target } => Event::Click { target },
            DocumentEvent::ClickAt { point } => Event::Click {
                target: target_at_point(&self.document, point).unwrap_or(self.document.root()),
            },
            DocumentEvent::KeyDown { key, target } => Event::KeyDown { key, target },
            DocumentEvent::PointerMove { point } => Event::PointerMove {
                path: path_at_point(&self.document, point),
            },
            DocumentEvent::Scroll => Event::Scroll,
            DocumentEvent::Resize => Event::Resize,
            DocumentEvent::ContentScroll { target } => Event::ContentScroll { target },
        };
        let roles = SelectorRoles {
            document: &self.document,
            button: &self.compiled.button,
            popover: &self.compiled.popover,
        };
        let intents = self.delegator.handle(event, &roles, &self.document);
        for intent in intents {
            self.apply(intent);
        }
    }

    /// Let `dt` pass, running every transition that falls due in order.
    pub fn advance(&mut self, dt: Duration) {
        let until = self.scheduler.now().saturating_add(dt);
        while let Some((token, task)) = self.scheduler.pop_due(until) {
            match task {
                Task::FinishActivate(button) => self.finish_activate(button, token),
                Task::FinishDismiss(button) => self.finish_dismiss(button, token),
                Task::HoverDismiss(button) => self.finish_unhover(button, token),
                Task::TrailingReflow => {
                    let now = self.scheduler.now();
                    if let Some(resize) = self.reflow.take_trailing(token, now) {
                        self.reflow_all(resize);
                    }
                }
            }
        }
        self.scheduler.settle(until);
    }

    /// Time passed through [`Littlefoot::advance`] since construction.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Activation state of `button`.
    pub fn state_of(&self, button: ElementId) -> ButtonState {
        self.registry.state_of(button)
    }

    /// The popover of `button`, while it has one.
    pub fn popover_of(&self, button: ElementId) -> Option<&Popover> {
        self.registry.get(button).map(|e| &e.popover)
    }

    /// Buttons whose popover is open.
    pub fn active_buttons(&self) -> Vec<ElementId> {
        self.registry.in_state(ButtonState::Active)
    }

    /// Every footnote button in the document, in document order.
    pub fn buttons(&self) -> Vec<ElementId> {
        self.document.query_selector_all(&self.compiled.button)
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The document, for layout updates, scrolling and resizing by the host.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The configuration.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether the engine still handles events.
    pub fn is_mounted(&self) -> bool {
        self.delegator.is_attached()
    }

    /// Stop handling events and remove every popover.
    ///
    /// Pending transitions are dropped. Buttons created by [`Littlefoot::mount`] are removed and
    /// the footnotes they replaced are shown again, so the document can be mounted anew.
    /// Other buttons are reset to inactive.
    pub fn unmount(&mut self) {
        if !self.is_mounted() {
            return;
        }
        for (button, entry) in self.registry.drain() {
            entry.popover.destroy(&mut self.document);
            state::sync(&mut self.document, button, ButtonState::Inactive, None);
        }
        core::mem::take(&mut self.processed).undo(&mut self.document);
        self.scheduler.clear();
        self.reflow = ReflowThrottle::default();
        self.delegator.detach();
        debug!("unmounted");
    }

    /// Unmount and hand the document back, as it was before [`Littlefoot::mount`].
    pub fn into_document(mut self) -> Document {
        self.unmount();
        self.document
    }

    fn select_buttons(&self, selector: Option<&str>) -> Option<Vec<ElementId>> {
        let Some(source) = selector.map(str::trim).filter(|s| !s.is_empty()) else {
            debug!("no selector; ignoring request");
            return None;
        };
        let selector = match source.parse::<littlefoot_document::Selector>() {
            Ok(selector) => selector,
            Err(error) => {
                debug!(selector = source, %error, "invalid selector; ignoring request");
                return None;
            }
        };
        let buttons: Vec<ElementId> = self
            .document
            .query_selector_all(&selector)
            .into_iter()
            .filter(|&id| self.document.matches(id, &self.compiled.button) && self.in_scope(id))
            .collect();
        if buttons.is_empty() {
            debug!(selector = source, "selector matches no button; ignoring request");
            return None;
        }
        Some(buttons)
    }

    fn in_scope(&self, id: ElementId) -> bool {
        self.compiled.scope.as_ref().is_none_or(|scope| {
            self.document
                .path_to_root(id)
                .into_iter()
                .any(|el| self.document.matches(el, scope))
        })
    }

    fn apply(&mut self, intent: Intent<ElementId>) {
        match intent {
            Intent::Toggle(button) => self.toggle(button),
            Intent::ClickOutside => {
                if self.settings.dismiss_on_document_touch {
                    self.dismiss_all();
                }
            }
            Intent::DismissAll => self.dismiss_all(),
            Intent::Reflow { resize } => self.request_reflow(resize),
            Intent::RefreshScroll(root) => {
                if let Some(button) = self.registry.button_for_popover(root)
                    && let Some(entry) = self.registry.get_mut(button)
                {
                    entry.popover.refresh_scroll(&mut self.document);
                }
            }
            Intent::HoverEnter(node, role) => self.hover_enter(node, role),
            Intent::HoverLeave(node, role) => self.hover_leave(node, role),
        }
    }
}
