// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Littlefoot: footnote popovers over an in-memory document.
//!
//! Footnote references in a [`Document`] become buttons. Activating a button opens a popover next
//! to it showing the footnote's content, placed above or below the button depending on where
//! there is room in the viewport, and kept in place as the document scrolls or the viewport is
//! resized.
//!
//! ## Lifecycle of a button
//!
//! Each button moves through [`ButtonState`]: `inactive → activating → active → dismissing →
//! inactive`. The two transitional states last [`Settings::activate_delay`] and
//! [`Settings::dismiss_delay`], during which the host can animate. A request that arrives while a
//! transition is in flight is queued and the last request wins.
//!
//! Unless [`Settings::allow_multiple`] is set, opening a popover dismisses every other one first.
//!
//! ## Time and events
//!
//! The engine never blocks and reads no clock. The host
//!
//! - delivers input with [`Littlefoot::dispatch`], and
//! - lets time pass with [`Littlefoot::advance`], which runs the transitions that fall due.
//!
//! Scroll and resize events are throttled to one reflow per [`Settings::reflow_interval`], with a
//! trailing reflow so the final position is always applied.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//!
//! use kurbo::{Rect, Size};
//! use littlefoot::{ButtonState, Document, ElementData, Littlefoot, Settings};
//!
//! let mut doc = Document::new(
//!     ElementData::new("body").with_bounds(Rect::new(0.0, 0.0, 800.0, 2000.0)),
//!     Size::new(800.0, 600.0),
//! );
//! let root = doc.root();
//! let p = doc.insert(Some(root), ElementData::new("p"));
//! let sup = doc.insert(
//!     Some(p),
//!     ElementData::new("sup").with_bounds(Rect::new(100.0, 100.0, 110.0, 112.0)),
//! );
//! doc.insert(Some(sup), ElementData::new("a").with_attribute("href", "#fn:1"));
//! let ol = doc.insert(Some(root), ElementData::new("ol"));
//! doc.insert(
//!     Some(ol),
//!     ElementData::new("li").with_id("fn:1").with_html("<p>A footnote.</p>"),
//! );
//!
//! let mut lf = Littlefoot::mount(doc, Settings::default()).unwrap();
//! lf.activate(Some(r#"button[data-footnote-id="1"]"#));
//! lf.advance(Duration::from_millis(100));
//!
//! let button = lf.active_buttons()[0];
//! assert_eq!(lf.state_of(button), ButtonState::Active);
//! let popover = lf.popover_of(button).unwrap();
//! assert_eq!(lf.document().html(popover.content()), Some("<p>A footnote.</p>"));
//!
//! lf.dismiss(None);
//! lf.advance(Duration::from_millis(500));
//! assert_eq!(lf.state_of(button), ButtonState::Inactive);
//! ```
//!
//! ## Features
//!
//! - `serde`: (de)serialize [`Settings`] from camelCase keys, delays in milliseconds.
//!
//! ## Logging
//!
//! State transitions and ignored requests are logged at `debug` level with [`tracing`];
//! reflows and scroll flag changes at `trace`. No subscriber is installed.

mod controller;
mod engine;
mod error;
mod measure;
mod popover;
mod reflow;
mod registry;
mod scheduler;
mod settings;
mod setup;
mod state;

pub use engine::{DocumentEvent, Littlefoot};
pub use error::Error;
pub use measure::{Measure, TextMeasure};
pub use popover::Popover;
pub use settings::{DEFAULT_BUTTON_SELECTOR, SettingValue, Settings};
pub use state::ButtonState;

pub use kurbo;
pub use littlefoot_document::{Document, ElementData, ElementFlags, ElementId, Selector};
pub use littlefoot_geometry::{Placement, ScrollState};
pub use littlefoot_responder::types::Key;
