// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Littlefoot Document: a Kurbo-native element tree for footnote popovers.
//!
//! The popover engine needs a small slice of a browser document: elements with tags, classes,
//! attributes and inline styles, a markup payload per element, layout boxes, scrollable regions,
//! a scrolling viewport, selector queries and hit testing. This crate provides exactly that.
//!
//! ## Not a layout engine
//!
//! This crate does not measure or arrange anything. Upstream code computes layout boxes with
//! whatever system it uses and writes them into the document as document-space rectangles.
//! Client coordinates (relative to the viewport) are derived by subtracting the scroll offset.
//!
//! ## API overview
//!
//! - [`Document`]: element arena, tree structure, viewport and queries.
//! - [`ElementData`]: per-element data (tag, classes, attributes, style, markup, bounds, z, flags).
//! - [`ElementFlags`]: rendering and picking controls.
//! - [`ElementId`]: generational handle of an element.
//! - [`Selector`]: a parsed CSS selector subset; see the [`selector`] module for the syntax.
//!
//! Key operations:
//! - [`Document::insert`] / [`Document::insert_before`] → [`ElementId`]
//! - [`Document::query_selector`] and [`Document::closest`]
//! - [`Document::hit_test_point`] for the topmost element under a client point.
//! - [`Document::scroll_to`] and [`Document::set_scroll_top`] for document and element scroll.
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use littlefoot_document::{Document, ElementData, Selector};
//!
//! let mut doc = Document::new(
//!     ElementData::new("body").with_bounds(Rect::new(0.0, 0.0, 800.0, 2000.0)),
//!     Size::new(800.0, 600.0),
//! );
//! let root = doc.root();
//! let button = doc.insert(
//!     Some(root),
//!     ElementData::new("button")
//!         .with_attribute("data-footnote-id", "1")
//!         .with_bounds(Rect::new(100.0, 100.0, 120.0, 120.0)),
//! );
//!
//! let selector = Selector::parse(r#"button[data-footnote-id="1"]"#).unwrap();
//! assert_eq!(doc.query_selector(&selector), Some(button));
//!
//! let hit = doc.hit_test_point(Point::new(110.0, 110.0)).unwrap();
//! assert_eq!(hit.element, button);
//! assert_eq!(hit.path, vec![root, button]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
pub mod selector;
mod types;

pub use document::{Document, Hit, Viewport};
pub use selector::{Selector, SelectorError};
pub use types::{ElementData, ElementFlags, ElementId};
