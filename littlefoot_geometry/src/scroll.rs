// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll flags for popover content that overflows its allotted height.

bitflags::bitflags! {
    /// Scroll state of a popover's content region.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ScrollState: u8 {
        /// Content is taller than the height allotted to it (`is-scrollable`).
        const SCROLLABLE      = 0b0000_0001;
        /// Content is scrolled to its maximum extent (`is-fully-scrolled`).
        const FULLY_SCROLLED  = 0b0000_0010;
    }
}

/// Scroll metrics of a content region.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ContentScroll {
    /// Current scroll offset.
    pub scroll_top: f64,
    /// Total content height.
    pub scroll_height: f64,
    /// Visible height.
    pub client_height: f64,
}

impl ContentScroll {
    /// Largest reachable scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    /// Derive the scroll flags.
    ///
    /// Fully scrolled is only reported for scrollable content, with one pixel of slack for
    /// fractional offsets.
    pub fn state(&self) -> ScrollState {
        let mut state = ScrollState::empty();
        if self.scroll_height > self.client_height {
            state |= ScrollState::SCROLLABLE;
            if self.scroll_top >= self.max_scroll() - 1.0 {
                state |= ScrollState::FULLY_SCROLLED;
            }
        }
        state
    }
}
