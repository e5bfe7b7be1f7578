// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: structure, updates, queries.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use kurbo::{Point, Rect, Size, Vec2};

use crate::selector::Selector;
use crate::types::{ElementData, ElementFlags, ElementId};

/// The visible part of the document.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Viewport size (`innerWidth` × `innerHeight`).
    pub size: Size,
    /// Scroll offset of the document inside the viewport.
    pub scroll_offset: Vec2,
}

/// Results of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched element.
    pub element: ElementId,
    /// Path from root to element (inclusive).
    pub path: Vec<ElementId>,
}

#[derive(Clone, Debug)]
struct Element {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    data: ElementData,
    scroll_top: f64,
}

impl Element {
    fn new(generation: u32, data: ElementData) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            data,
            scroll_top: 0.0,
        }
    }
}

/// An element tree with a viewport.
///
/// The document starts with a root element (the `body`). Elements inserted without a parent are
/// detached: they exist but are not [connected](Self::is_connected) and never render or hit.
pub struct Document {
    elements: Vec<Option<Element>>, // slots
    generations: Vec<u32>,          // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    root: ElementId,
    viewport: Viewport,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.elements.len();
        let alive = self.elements.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Document")
            .field("elements_total", &total)
            .field("elements_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("root", &self.root)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create a document whose root element is `root`, shown in a viewport of `viewport_size`.
    pub fn new(root: ElementData, viewport_size: Size) -> Self {
        let mut doc = Self {
            elements: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: ElementId::new(0, 1),
            viewport: Viewport {
                size: viewport_size,
                scroll_offset: Vec2::ZERO,
            },
        };
        doc.root = doc.insert(None, root);
        doc
    }

    /// The root element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Insert a new element as the last child of `parent` (or detached if `None`).
    pub fn insert(&mut self, parent: Option<ElementId>, data: ElementData) -> ElementId {
        let id = self.allocate(data);
        if let Some(p) = parent
            && self.is_alive(p)
        {
            self.link(id, p, None);
        }
        id
    }

    /// Insert a new element as the previous sibling of `reference`.
    ///
    /// Returns `None` if `reference` is stale or has no parent.
    pub fn insert_before(&mut self, reference: ElementId, data: ElementData) -> Option<ElementId> {
        let parent = self.parent(reference)?;
        let id = self.allocate(data);
        self.link(id, parent, Some(reference));
        Some(id)
    }

    /// Remove an element (and its subtree) from the document.
    ///
    /// The root cannot be removed.
    pub fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) || id == self.root {
            return;
        }
        if let Some(parent) = self.element(id).and_then(|e| e.parent) {
            self.unlink(id, parent);
        }
        self.free_subtree(id);
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    /// Element data, if `id` is live.
    pub fn data(&self, id: ElementId) -> Option<&ElementData> {
        self.element(id).map(|e| &e.data)
    }

    /// Mutable element data, if `id` is live.
    pub fn data_mut(&mut self, id: ElementId) -> Option<&mut ElementData> {
        self.element_mut(id).map(|e| &mut e.data)
    }

    /// Tag name.
    pub fn tag(&self, id: ElementId) -> Option<&str> {
        self.data(id).map(|d| d.tag.as_str())
    }

    /// Parent element.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.element(id)?.parent
    }

    /// Children in document order. Empty for stale ids.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.element(id)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    /// Path from the topmost ancestor to `id` (inclusive). Empty for stale ids.
    pub fn path_to_root(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut cursor = self.is_alive(id).then_some(id);
        while let Some(cur) = cursor {
            out.push(cur);
            cursor = self.parent(cur);
        }
        out.reverse();
        out
    }

    /// Returns true if `id` is the root or a descendant of it.
    pub fn is_connected(&self, id: ElementId) -> bool {
        self.path_to_root(id).first() == Some(&self.root)
    }

    /// Returns true if `id` is connected, it and all its ancestors are visible, and its bounds are
    /// non-empty.
    pub fn is_rendered(&self, id: ElementId) -> bool {
        let path = self.path_to_root(id);
        if path.first() != Some(&self.root) {
            return false;
        }
        let all_visible = path.iter().all(|&el| {
            self.data(el)
                .is_some_and(|d| d.flags.contains(ElementFlags::VISIBLE))
        });
        let bounds = self.bounds(id).unwrap_or(Rect::ZERO);
        all_visible && bounds.width() > 0.0 && bounds.height() > 0.0
    }

    /// The nearest inclusive ancestor of `id` matching `selector`.
    pub fn closest(&self, id: ElementId, selector: &Selector) -> Option<ElementId> {
        let mut cursor = self.is_alive(id).then_some(id);
        while let Some(cur) = cursor {
            if selector.matches(self, cur) {
                return Some(cur);
            }
            cursor = self.parent(cur);
        }
        None
    }

    /// Returns true if `ancestor` is `id` or one of its ancestors.
    pub fn contains(&self, ancestor: ElementId, id: ElementId) -> bool {
        self.path_to_root(id).contains(&ancestor)
    }

    /// All elements below `id` (exclusive) in document order.
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(id).iter().rev().copied().collect();
        while let Some(cur) = stack.pop() {
            out.push(cur);
            stack.extend(self.children(cur).iter().rev().copied());
        }
        out
    }

    /// First element in document order matching `selector`.
    pub fn query_selector(&self, selector: &Selector) -> Option<ElementId> {
        self.query_selector_all(selector).into_iter().next()
    }

    /// All elements in document order matching `selector`, the root included.
    pub fn query_selector_all(&self, selector: &Selector) -> Vec<ElementId> {
        let mut all = Vec::with_capacity(self.elements.len());
        all.push(self.root);
        all.extend(self.descendants(self.root));
        all.retain(|&id| selector.matches(self, id));
        all
    }

    /// Returns true if `id` matches `selector`.
    pub fn matches(&self, id: ElementId, selector: &Selector) -> bool {
        selector.matches(self, id)
    }

    // --- classes, attributes, style ---

    /// Returns true if the element has `class`.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.data(id)
            .is_some_and(|d| d.classes.iter().any(|c| c == class))
    }

    /// Add or remove `class`.
    pub fn set_class(&mut self, id: ElementId, class: &str, on: bool) {
        let Some(data) = self.data_mut(id) else {
            return;
        };
        let present = data.classes.iter().position(|c| c == class);
        match (present, on) {
            (None, true) => data.classes.push(class.to_string()),
            (Some(i), false) => {
                data.classes.remove(i);
            }
            _ => {}
        }
    }

    /// Add `class`.
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        self.set_class(id, class, true);
    }

    /// Remove `class`.
    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        self.set_class(id, class, false);
    }

    /// Attribute value.
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.data(id)?.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute.
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        if let Some(data) = self.data_mut(id) {
            data.attributes.insert(name.to_string(), value.to_string());
        }
    }

    /// Remove an attribute.
    pub fn remove_attribute(&mut self, id: ElementId, name: &str) {
        if let Some(data) = self.data_mut(id) {
            data.attributes.remove(name);
        }
    }

    /// Inline style property.
    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.data(id)?.style.get(property).map(String::as_str)
    }

    /// Set an inline style property.
    pub fn set_style(&mut self, id: ElementId, property: &str, value: &str) {
        if let Some(data) = self.data_mut(id) {
            data.style.insert(property.to_string(), value.to_string());
        }
    }

    /// Remove an inline style property.
    pub fn remove_style(&mut self, id: ElementId, property: &str) {
        if let Some(data) = self.data_mut(id) {
            data.style.remove(property);
        }
    }

    /// Markup payload.
    pub fn html(&self, id: ElementId) -> Option<&str> {
        self.data(id).map(|d| d.html.as_str())
    }

    /// Replace the markup payload.
    pub fn set_html(&mut self, id: ElementId, html: &str) {
        if let Some(data) = self.data_mut(id) {
            data.html = html.to_string();
        }
    }

    // --- geometry ---

    /// Layout box in document space.
    pub fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.data(id).map(|d| d.bounds)
    }

    /// Update the layout box.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(data) = self.data_mut(id) {
            data.bounds = bounds;
        }
        self.clamp_scroll_top(id);
    }

    /// Update the flags.
    pub fn set_flags(&mut self, id: ElementId, flags: ElementFlags) {
        if let Some(data) = self.data_mut(id) {
            data.flags = flags;
        }
    }

    /// Layout box relative to the viewport (`getBoundingClientRect`).
    pub fn client_rect(&self, id: ElementId) -> Option<Rect> {
        self.bounds(id).map(|b| b - self.viewport.scroll_offset)
    }

    /// Visible height of an element.
    pub fn client_height(&self, id: ElementId) -> f64 {
        self.bounds(id).map_or(0.0, |b| b.height())
    }

    /// Total content height of an element.
    pub fn scroll_height(&self, id: ElementId) -> f64 {
        let client = self.client_height(id);
        self.data(id)
            .and_then(|d| d.scroll_height)
            .map_or(client, |h| h.max(client))
    }

    /// Set the natural content height of an element; `None` means it fits its bounds.
    pub fn set_scroll_height(&mut self, id: ElementId, height: Option<f64>) {
        if let Some(data) = self.data_mut(id) {
            data.scroll_height = height;
        }
        self.clamp_scroll_top(id);
    }

    /// Scroll offset of an element's content.
    pub fn scroll_top(&self, id: ElementId) -> f64 {
        self.element(id).map_or(0.0, |e| e.scroll_top)
    }

    /// Scroll an element's content, clamped to its scrollable extent. Returns the applied offset.
    pub fn set_scroll_top(&mut self, id: ElementId, top: f64) -> f64 {
        let max = (self.scroll_height(id) - self.client_height(id)).max(0.0);
        let top = if top.is_finite() { top.clamp(0.0, max) } else { 0.0 };
        if let Some(e) = self.element_mut(id) {
            e.scroll_top = top;
        }
        top
    }

    fn clamp_scroll_top(&mut self, id: ElementId) {
        let top = self.scroll_top(id);
        self.set_scroll_top(id, top);
    }

    // --- viewport ---

    /// The viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resize the viewport. The scroll offset is re-clamped.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport.size = size;
        self.scroll_to(self.viewport.scroll_offset);
    }

    /// Content width of the document (the root's width).
    pub fn client_width(&self) -> f64 {
        self.bounds(self.root).map_or(0.0, |b| b.width())
    }

    /// Height of the document (the root's height).
    pub fn document_height(&self) -> f64 {
        self.bounds(self.root).map_or(0.0, |b| b.height())
    }

    /// Scroll the document, clamped to its extent. Returns the applied offset.
    pub fn scroll_to(&mut self, offset: Vec2) -> Vec2 {
        let root = self.bounds(self.root).unwrap_or(Rect::ZERO);
        let max_x = (root.width() - self.viewport.size.width).max(0.0);
        let max_y = (root.height() - self.viewport.size.height).max(0.0);
        let clamp = |v: f64, max: f64| if v.is_finite() { v.clamp(0.0, max) } else { 0.0 };
        self.viewport.scroll_offset = Vec2::new(clamp(offset.x, max_x), clamp(offset.y, max_y));
        self.viewport.scroll_offset
    }

    /// Scroll to the top of the document.
    pub fn scroll_to_top(&mut self) -> Vec2 {
        self.scroll_to(Vec2::new(self.viewport.scroll_offset.x, 0.0))
    }

    /// Scroll to the bottom of the document.
    pub fn scroll_to_bottom(&mut self) -> Vec2 {
        self.scroll_to(Vec2::new(self.viewport.scroll_offset.x, f64::MAX))
    }

    /// Hit test a point in client coordinates. Returns the topmost rendered, pickable element.
    ///
    /// If multiple elements overlap with the same `z_index`, the newer [`ElementId`] wins.
    pub fn hit_test_point(&self, pt: Point) -> Option<Hit> {
        let doc_pt = pt + self.viewport.scroll_offset;
        let mut best: Option<(ElementId, i32)> = None;
        let mut candidates = Vec::with_capacity(self.elements.len());
        candidates.push(self.root);
        candidates.extend(self.descendants(self.root));
        for id in candidates {
            let Some(data) = self.data(id) else {
                continue;
            };
            if !data.flags.contains(ElementFlags::PICKABLE) || !self.is_rendered(id) {
                continue;
            }
            if !data.bounds.contains(doc_pt) {
                continue;
            }
            match best {
                None => best = Some((id, data.z_index)),
                Some((best_id, z_best)) => {
                    let z = data.z_index;
                    if z > z_best || (z == z_best && id.is_newer_than(best_id)) {
                        best = Some((id, z));
                    }
                }
            }
        }
        best.map(|(element, _)| Hit {
            element,
            path: self.path_to_root(element),
        })
    }

    // --- internals ---

    fn element(&self, id: ElementId) -> Option<&Element> {
        let e = self.elements.get(id.idx())?.as_ref()?;
        (e.generation == id.generation()).then_some(e)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let e = self.elements.get_mut(id.idx())?.as_mut()?;
        if e.generation != id.generation() {
            return None;
        }
        Some(e)
    }

    fn allocate(&mut self, data: ElementData) -> ElementId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.elements[idx] = Some(Element::new(generation, data));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.elements.push(Some(Element::new(generation, data)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            ((self.elements.len() - 1) as u32, generation)
        };
        ElementId::new(idx, generation)
    }

    fn link(&mut self, id: ElementId, parent: ElementId, before: Option<ElementId>) {
        if let Some(p) = self.element_mut(parent) {
            let at = before
                .and_then(|b| p.children.iter().position(|c| *c == b))
                .unwrap_or(p.children.len());
            p.children.insert(at, id);
        }
        if let Some(e) = self.element_mut(id) {
            e.parent = Some(parent);
        }
    }

    fn unlink(&mut self, id: ElementId, parent: ElementId) {
        if let Some(p) = self.element_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(e) = self.element_mut(id) {
            e.parent = None;
        }
    }

    fn free_subtree(&mut self, id: ElementId) {
        let children = self.children(id).to_vec();
        for child in children {
            self.free_subtree(child);
        }
        self.elements[id.idx()] = None;
        self.free_list.push(id.idx());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Document {
        Document::new(
            ElementData::new("body").with_bounds(Rect::new(0.0, 0.0, 800.0, 3000.0)),
            Size::new(800.0, 600.0),
        )
    }

    #[test]
    fn insert_and_hit_test() {
        let mut doc = page();
        let root = doc.root();
        let _a = doc.insert(
            Some(root),
            ElementData::new("p").with_bounds(Rect::new(10.0, 10.0, 60.0, 60.0)),
        );
        let b = doc.insert(
            Some(root),
            ElementData::new("aside")
                .with_bounds(Rect::new(40.0, 40.0, 120.0, 120.0))
                .with_z_index(10),
        );

        let hit = doc.hit_test_point(Point::new(50.0, 50.0)).unwrap();
        assert_eq!(hit.element, b, "topmost by z should win");
        assert_eq!(hit.path.first().copied(), Some(root));
        assert_eq!(hit.path.last().copied(), Some(b));

        let body = doc.hit_test_point(Point::new(500.0, 500.0)).unwrap();
        assert_eq!(body.element, root);
    }

    #[test]
    fn hit_test_uses_client_coordinates() {
        let mut doc = page();
        let root = doc.root();
        let p = doc.insert(
            Some(root),
            ElementData::new("p").with_bounds(Rect::new(0.0, 1000.0, 100.0, 1100.0)),
        );
        assert_eq!(doc.hit_test_point(Point::new(50.0, 50.0)).unwrap().element, root);
        doc.scroll_to(Vec2::new(0.0, 1000.0));
        assert_eq!(doc.hit_test_point(Point::new(50.0, 50.0)).unwrap().element, p);
        assert_eq!(
            doc.client_rect(p),
            Some(Rect::new(0.0, 0.0, 100.0, 100.0))
        );
    }

    #[test]
    fn hidden_and_detached_elements_do_not_render() {
        let mut doc = page();
        let root = doc.root();
        let hidden = doc.insert(
            Some(root),
            ElementData::new("div")
                .with_bounds(Rect::new(0.0, 0.0, 10.0, 10.0))
                .with_flags(ElementFlags::empty()),
        );
        let inner = doc.insert(
            Some(hidden),
            ElementData::new("span").with_bounds(Rect::new(0.0, 0.0, 10.0, 10.0)),
        );
        let detached = doc.insert(
            None,
            ElementData::new("span").with_bounds(Rect::new(0.0, 0.0, 10.0, 10.0)),
        );
        let empty = doc.insert(Some(root), ElementData::new("span"));
        assert!(!doc.is_rendered(hidden));
        assert!(!doc.is_rendered(inner), "hidden ancestors hide descendants");
        assert!(!doc.is_connected(detached));
        assert!(!doc.is_rendered(detached));
        assert!(!doc.is_rendered(empty));
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut doc = page();
        let root = doc.root();
        let a = doc.insert(Some(root), ElementData::new("div"));
        let a_child = doc.insert(Some(a), ElementData::new("span"));
        assert!(doc.is_alive(a));

        doc.remove(a);
        assert!(!doc.is_alive(a));
        assert!(!doc.is_alive(a_child), "subtree is removed");
        assert!(doc.children(root).is_empty());

        let b = doc.insert(Some(root), ElementData::new("div"));
        assert!(doc.is_alive(b));
        assert!(!doc.is_alive(a));
        assert!(b.is_newer_than(a));

        doc.remove(root);
        assert!(doc.is_alive(root), "the root is permanent");
    }

    #[test]
    fn insert_before_keeps_document_order() {
        let mut doc = page();
        let root = doc.root();
        let first = doc.insert(Some(root), ElementData::new("p"));
        let second = doc.insert(Some(root), ElementData::new("p"));
        let between = doc.insert_before(second, ElementData::new("span")).unwrap();
        assert_eq!(doc.children(root), &[first, between, second]);
        assert!(doc.insert_before(root, ElementData::new("span")).is_none());
    }

    #[test]
    fn classes_attributes_and_style() {
        let mut doc = page();
        let root = doc.root();
        let b = doc.insert(Some(root), ElementData::new("button"));
        doc.add_class(b, "is-active");
        doc.add_class(b, "is-active");
        assert_eq!(doc.data(b).unwrap().classes.len(), 1);
        doc.remove_class(b, "is-active");
        assert!(!doc.has_class(b, "is-active"));

        doc.set_attribute(b, "aria-expanded", "false");
        assert_eq!(doc.attribute(b, "aria-expanded"), Some("false"));
        doc.remove_attribute(b, "aria-expanded");
        assert_eq!(doc.attribute(b, "aria-expanded"), None);

        doc.set_style(b, "max-width", "800px");
        assert_eq!(doc.style(b, "max-width"), Some("800px"));
        doc.remove_style(b, "max-width");
        assert_eq!(doc.style(b, "max-width"), None);
    }

    #[test]
    fn document_scroll_is_clamped() {
        let mut doc = page();
        assert_eq!(doc.scroll_to_bottom(), Vec2::new(0.0, 2400.0));
        assert_eq!(doc.scroll_to_top(), Vec2::ZERO);
        assert_eq!(doc.scroll_to(Vec2::new(-5.0, f64::NAN)), Vec2::ZERO);
        doc.set_viewport_size(Size::new(800.0, 2000.0));
        doc.scroll_to_bottom();
        assert_eq!(doc.viewport().scroll_offset.y, 1000.0);
    }

    #[test]
    fn element_scroll_is_clamped() {
        let mut doc = page();
        let root = doc.root();
        let content = doc.insert(
            Some(root),
            ElementData::new("div").with_bounds(Rect::new(0.0, 0.0, 100.0, 200.0)),
        );
        assert_eq!(doc.set_scroll_top(content, 50.0), 0.0, "content fits");
        doc.set_scroll_height(content, Some(500.0));
        assert_eq!(doc.set_scroll_top(content, 1000.0), 300.0);
        doc.set_scroll_height(content, None);
        assert_eq!(doc.scroll_top(content), 0.0);
    }
}
