// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Button activation state and the classes and ARIA attributes derived from it.

use littlefoot_document::{Document, ElementId};

/// Activation state of one footnote button.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ButtonState {
    /// Closed; no popover.
    #[default]
    Inactive,
    /// Popover created, waiting for the activate delay.
    Activating,
    /// Popover open.
    Active,
    /// Popover closing, waiting for the dismiss delay.
    Dismissing,
}

impl ButtonState {
    /// Lowercase name of the state.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Activating => "activating",
            Self::Active => "active",
            Self::Dismissing => "dismissing",
        }
    }

    /// Whether the popover is opening or open. These count toward the single-open limit.
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Activating | Self::Active)
    }

    /// Whether a transition is in flight.
    pub const fn is_changing(self) -> bool {
        matches!(self, Self::Activating | Self::Dismissing)
    }
}

impl core::fmt::Display for ButtonState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The one request queued behind an in-flight transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Pending {
    Activate,
    Dismiss,
}

/// Write the classes and ARIA attributes of `state` onto a button and its popover root.
///
/// This is the only place those are written. Only an `active` button is rendered `is-active`, so
/// a popover closing under the single-open policy never shows next to the one replacing it.
pub(crate) fn sync(
    document: &mut Document,
    button: ElementId,
    state: ButtonState,
    popover: Option<(ElementId, &str)>,
) {
    let (active, changing, expanded) = match state {
        ButtonState::Inactive => (false, false, false),
        ButtonState::Activating => (false, true, false),
        ButtonState::Active => (true, false, true),
        ButtonState::Dismissing => (false, true, true),
    };
    document.set_class(button, "is-active", active);
    document.set_class(button, "is-changing", changing);
    document.set_attribute(button, "aria-expanded", if expanded { "true" } else { "false" });
    match popover {
        Some((_, id)) if expanded => document.set_attribute(button, "aria-controls", id),
        _ => document.remove_attribute(button, "aria-controls"),
    }
    if let Some((root, _)) = popover {
        document.set_class(root, "is-active", state == ButtonState::Active);
    }
}
