// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter helpers for Littlefoot Document.
//!
//! ## Feature
//!
//! Enable with `document_adapter`.
//!
//! ## Notes
//!
//! [`Document`] provides parents directly. [`SelectorRoles`] assigns roles by selector match,
//! and the point helpers turn a client-space pointer position into delegator input.

use alloc::vec::Vec;

use kurbo::Point;
use littlefoot_document::{Document, ElementId, Selector};

use crate::types::{ParentLookup, Role, RoleLookup};

impl ParentLookup<ElementId> for Document {
    fn parent_of(&self, node: &ElementId) -> Option<ElementId> {
        self.parent(*node)
    }
}

/// Roles from selector matches against a document.
///
/// An element matching `button` is a [`Role::Button`]; one matching `popover` is a
/// [`Role::Popover`]. The button selector is checked first.
#[derive(Copy, Clone, Debug)]
pub struct SelectorRoles<'a> {
    /// Document the selectors are matched against.
    pub document: &'a Document,
    /// Footnote button selector.
    pub button: &'a Selector,
    /// Popover root selector.
    pub popover: &'a Selector,
}

impl RoleLookup<ElementId> for SelectorRoles<'_> {
    fn role_of(&self, node: &ElementId) -> Option<Role> {
        if self.document.matches(*node, self.button) {
            Some(Role::Button)
        } else if self.document.matches(*node, self.popover) {
            Some(Role::Popover)
        } else {
            None
        }
    }
}

/// The topmost element under a client-space point.
pub fn target_at_point(document: &Document, pt: Point) -> Option<ElementId> {
    document.hit_test_point(pt).map(|hit| hit.element)
}

/// The root→target path under a client-space point, empty when nothing is hit.
pub fn path_at_point(document: &Document, pt: Point) -> Vec<ElementId> {
    document
        .hit_test_point(pt)
        .map(|hit| hit.path)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delegate::Delegator;
    use crate::types::{Event, Intent, Route};
    use alloc::vec;
    use kurbo::{Rect, Size};
    use littlefoot_document::ElementData;

    fn doc() -> (Document, ElementId, ElementId, ElementId) {
        let mut doc = Document::new(
            ElementData::new("body").with_bounds(Rect::new(0.0, 0.0, 800.0, 2000.0)),
            Size::new(800.0, 600.0),
        );
        let root = doc.root();
        let button = doc.insert(
            Some(root),
            ElementData::new("button")
                .with_class("littlefoot-footnote__button")
                .with_bounds(Rect::new(100.0, 100.0, 120.0, 120.0)),
        );
        let popover = doc.insert(
            Some(root),
            ElementData::new("aside")
                .with_class("littlefoot-footnote")
                .with_bounds(Rect::new(0.0, 130.0, 300.0, 300.0))
                .with_z_index(1),
        );
        let content = doc.insert(
            Some(popover),
            ElementData::new("div")
                .with_class("littlefoot-footnote__content")
                .with_bounds(Rect::new(10.0, 140.0, 290.0, 290.0))
                .with_z_index(1),
        );
        (doc, button, popover, content)
    }

    #[test]
    fn selector_roles_and_parents_route_document_elements() {
        let (doc, button, popover, content) = doc();
        let b = Selector::parse("button.littlefoot-footnote__button").unwrap();
        let p = Selector::parse(".littlefoot-footnote").unwrap();
        let roles = SelectorRoles {
            document: &doc,
            button: &b,
            popover: &p,
        };
        let d: Delegator<ElementId> = Delegator::new();
        assert_eq!(d.route(button, &roles, &doc), Route::Button(button));
        assert_eq!(d.route(content, &roles, &doc), Route::Popover(popover));
        assert_eq!(d.route(doc.root(), &roles, &doc), Route::Outside);
    }

    #[test]
    fn point_helpers_follow_hit_testing() {
        let (mut doc, button, popover, content) = doc();
        let root = doc.root();
        assert_eq!(target_at_point(&doc, Point::new(110.0, 110.0)), Some(button));
        assert_eq!(
            path_at_point(&doc, Point::new(150.0, 200.0)),
            vec![root, popover, content]
        );
        // Client space: scrolling moves the content out from under the pointer.
        doc.scroll_to(kurbo::Vec2::new(0.0, 1000.0));
        assert_eq!(path_at_point(&doc, Point::new(150.0, 200.0)), vec![root]);
        assert!(path_at_point(&doc, Point::new(-5.0, -5.0)).is_empty());
    }

    #[test]
    fn pointer_path_from_document_drives_hover() {
        let (doc, button, _, _) = doc();
        let b = Selector::parse("button.littlefoot-footnote__button").unwrap();
        let p = Selector::parse(".littlefoot-footnote").unwrap();
        let roles = SelectorRoles {
            document: &doc,
            button: &b,
            popover: &p,
        };
        let mut d: Delegator<ElementId> = Delegator::new();
        let path = path_at_point(&doc, Point::new(110.0, 110.0));
        assert_eq!(
            d.handle(Event::PointerMove { path }, &roles, &doc),
            vec![Intent::HoverEnter(button, Role::Button)]
        );
    }
}
