// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the document: element identifiers, flags, and element data.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use kurbo::Rect;

/// Identifier for an element in the document.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ElementId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ElementId`.
///
/// ### Newer
///
/// An `ElementId` is considered newer than another when it has a higher generation.
/// If generations are equal, the one with the higher slot index is considered newer.
/// This order is used for deterministic tie-breaks in
/// [hit testing](crate::Document::hit_test_point).
///
/// The derived `Ord` (slot first, then generation) only gives ids a stable order as map keys.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }

    /// Returns true if `self` was created after `other`.
    pub const fn is_newer_than(self, other: Self) -> bool {
        (self.1 > other.1) || (self.1 == other.1 && self.0 > other.0)
    }
}

bitflags::bitflags! {
    /// Element flags controlling rendering and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element is rendered (not `display: none`).
        const VISIBLE  = 0b0000_0001;
        /// Element receives pointer input (participates in hit testing).
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Data carried by one element.
///
/// Bounds are in document space and come from upstream layout; the document does not lay out
/// anything itself.
#[derive(Clone, Debug)]
pub struct ElementData {
    /// Lowercase tag name.
    pub tag: String,
    /// Class list, in insertion order, without duplicates.
    pub classes: Vec<String>,
    /// Attributes, including `id`.
    pub attributes: BTreeMap<String, String>,
    /// Inline style properties (for example `max-width` → `800px`).
    pub style: BTreeMap<String, String>,
    /// Markup payload (the element's inner HTML), stored verbatim.
    pub html: String,
    /// Layout box in document space.
    pub bounds: Rect,
    /// Stacking order. Higher is drawn on top.
    pub z_index: i32,
    /// Rendering and picking flags.
    pub flags: ElementFlags,
    /// Natural content height for scrollable regions. `None` means the content fits the bounds.
    pub scroll_height: Option<f64>,
}

impl ElementData {
    /// Create element data for `tag` with empty bounds and default flags.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            style: BTreeMap::new(),
            html: String::new(),
            bounds: Rect::ZERO,
            z_index: 0,
            flags: ElementFlags::default(),
            scroll_height: None,
        }
    }

    /// Add a class.
    pub fn with_class(mut self, class: &str) -> Self {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
        self
    }

    /// Set an attribute.
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Set the `id` attribute.
    pub fn with_id(self, id: &str) -> Self {
        self.with_attribute("id", id)
    }

    /// Set the markup payload.
    pub fn with_html(mut self, html: &str) -> Self {
        self.html = html.to_string();
        self
    }

    /// Set the layout box.
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the stacking order.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Set the flags.
    pub fn with_flags(mut self, flags: ElementFlags) -> Self {
        self.flags = flags;
        self
    }
}
