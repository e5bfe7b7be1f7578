// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Littlefoot Geometry: placement and sizing rules for footnote popovers.
//!
//! ## Overview
//!
//! Everything here is a pure function of measurements. Nothing holds state and nothing touches a
//! document; the caller measures the trigger button and the viewport, hands the numbers over, and
//! applies the result.
//!
//! - [`available_room`] measures the space above and below a button inside the viewport.
//! - [`resolve_placement`] decides whether the popover opens above ([`Placement::Top`]) or below
//!   ([`Placement::Bottom`]) the button.
//! - [`available_height`], [`popover_max_width`] and [`wrapper_max_width`] compute the size
//!   constraints.
//! - [`popover_frame`] positions the popover in document space.
//! - [`resolve`] runs all of the above for one [`LayoutInput`].
//! - [`ContentScroll`] derives the [`ScrollState`] flags of a popover's scrollable content.
//!
//! ## Degenerate input
//!
//! Measurements of detached or hidden buttons are usually zero-sized, and a zero viewport has no
//! room at all. These never fail: [`available_room`] returns `None` and the placement falls back
//! to [`Placement::Bottom`].
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::{Rect, Size, Vec2};
//! use littlefoot_geometry::{LayoutInput, Placement, resolve};
//!
//! let layout = resolve(&LayoutInput {
//!     button: Rect::new(100.0, 550.0, 120.0, 570.0),
//!     scroll_offset: Vec2::ZERO,
//!     viewport: Size::new(800.0, 600.0),
//!     client_width: 800.0,
//!     natural: Size::new(300.0, 120.0),
//!     max_height: 240.0,
//!     margin: 10.0,
//!     edge_gap: 15.0,
//! });
//! // The button sits near the bottom of the viewport, so the popover opens above it.
//! assert_eq!(layout.placement, Placement::Top);
//! assert_eq!(layout.max_width, 800.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod placement;
mod scroll;

pub use placement::{
    LayoutInput, Placement, PopoverLayout, Room, available_height, available_room,
    decision_height, popover_frame, popover_max_width, resolve, resolve_placement,
    wrapper_max_width,
};
pub use scroll::{ContentScroll, ScrollState};
