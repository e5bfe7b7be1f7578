// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning footnote references into buttons.

use std::collections::BTreeSet;

use littlefoot_document::{Document, ElementData, ElementFlags, ElementId};
use tracing::{debug, trace};

use crate::Settings;
use crate::settings::Compiled;

const PRINT_ONLY: &str = "footnote-print-only";
const PROCESSED: &str = "footnote-processed";

/// One footnote reference found in the document.
#[derive(Debug)]
struct Reference {
    /// The element replaced by the button: the anchor or its `sup`.
    element: ElementId,
    footnote: ElementId,
}

/// What setup changed in the document, so teardown can give it back.
#[derive(Clone, Debug, Default)]
pub(crate) struct Processed {
    /// Inserted button containers.
    containers: Vec<ElementId>,
    /// Hidden elements, in hiding order, and whether each was visible before.
    hidden: Vec<(ElementId, bool)>,
    /// Back links marked as processed.
    marked: BTreeSet<ElementId>,
}

impl Processed {
    /// Number of buttons inserted.
    pub(crate) fn buttons(&self) -> usize {
        self.containers.len()
    }

    /// Remove the buttons and restore what was hidden or marked.
    pub(crate) fn undo(self, document: &mut Document) {
        for container in self.containers {
            document.remove(container);
        }
        // Reverse order: an element hidden twice gets its first recorded visibility back.
        for (id, was_visible) in self.hidden.into_iter().rev() {
            document.remove_class(id, PRINT_ONLY);
            if was_visible && let Some(flags) = document.data(id).map(|d| d.flags) {
                document.set_flags(id, flags | ElementFlags::VISIBLE);
            }
        }
        for link in self.marked {
            document.remove_class(link, PROCESSED);
        }
        trace!("footnote processing undone");
    }
}

/// Replace every footnote reference in scope with a button.
///
/// Buttons are numbered from 1 in document order. The references and footnotes are kept in the
/// document, hidden and marked for print. References already marked for print are skipped.
pub(crate) fn run(document: &mut Document, settings: &Settings, compiled: &Compiled) -> Processed {
    let references = find_references(document, settings, compiled);
    let mut processed = Processed::default();
    let mut footnote_lists = BTreeSet::new();
    for (index, reference) in references.iter().enumerate() {
        let number = index + 1;
        if let Some(container) = insert_button(document, reference, number) {
            processed.containers.push(container);
        }
        hide(document, reference.element, &mut processed);
        hide(document, reference.footnote, &mut processed);
        for link in document.descendants(reference.footnote) {
            if document.matches(link, &compiled.back_link) {
                document.add_class(link, PROCESSED);
                processed.marked.insert(link);
            }
        }
        if let Some(list) = document.closest(reference.footnote, &compiled.footnotes) {
            footnote_lists.insert(list);
        }
    }
    for list in footnote_lists {
        hide(document, list, &mut processed);
        let rules: Vec<ElementId> = document
            .children(list)
            .iter()
            .copied()
            .filter(|&child| document.tag(child) == Some("hr"))
            .collect();
        for rule in rules {
            hide(document, rule, &mut processed);
        }
    }
    processed
}

fn find_references(document: &Document, settings: &Settings, compiled: &Compiled) -> Vec<Reference> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for anchor in document.query_selector_all(&compiled.anchor) {
        if let Some(scope) = &compiled.scope
            && document.closest(anchor, scope).is_none()
        {
            continue;
        }
        if document.has_class(anchor, PRINT_ONLY) {
            trace!("reference already processed");
            continue;
        }
        let Some(href) = document.attribute(anchor, "href") else {
            continue;
        };
        if !compiled.anchor_pattern.is_match(href) {
            continue;
        }
        let Some(footnote) = find_by_id(document, href.trim_start_matches('#')) else {
            debug!(href, "footnote reference without a target");
            continue;
        };
        if !document.matches(footnote, &compiled.footnote) {
            trace!(href, "reference target is not a footnote");
            continue;
        }
        if !seen.insert(footnote) && !settings.allow_duplicates {
            trace!(href, "duplicate reference skipped");
            continue;
        }
        let element = document
            .closest(anchor, &compiled.anchor_parent)
            .unwrap_or(anchor);
        if document.has_class(element, PRINT_ONLY) {
            trace!(href, "reference already processed");
            continue;
        }
        out.push(Reference { element, footnote });
    }
    out
}

fn find_by_id(document: &Document, id: &str) -> Option<ElementId> {
    let root = document.root();
    document
        .descendants(root)
        .into_iter()
        .find(|&el| document.attribute(el, "id") == Some(id))
}

fn insert_button(
    document: &mut Document,
    reference: &Reference,
    number: usize,
) -> Option<ElementId> {
    let bounds = document.bounds(reference.element).unwrap_or_default();
    let content = document
        .html(reference.footnote)
        .unwrap_or_default()
        .trim()
        .to_string();
    let number = number.to_string();
    let container = document.insert_before(
        reference.element,
        ElementData::new("span")
            .with_class("littlefoot-footnote__container")
            .with_bounds(bounds),
    )?;
    document.insert(
        Some(container),
        ElementData::new("button")
            .with_class("littlefoot-footnote__button")
            .with_id(&format!("lf-{number}"))
            .with_attribute("data-footnote-id", &number)
            .with_attribute("data-footnote-number", &number)
            .with_attribute("data-footnote-content", &content)
            .with_attribute("title", &format!("See Footnote {number}"))
            .with_attribute("aria-label", &format!("Footnote {number}"))
            .with_attribute("aria-expanded", "false")
            .with_html(&number)
            .with_bounds(bounds),
    );
    Some(container)
}

/// Mark `id` for print only and take it out of the screen rendering.
fn hide(document: &mut Document, id: ElementId, processed: &mut Processed) {
    let Some(flags) = document.data(id).map(|d| d.flags) else {
        return;
    };
    document.add_class(id, PRINT_ONLY);
    document.set_flags(id, flags - ElementFlags::VISIBLE);
    processed
        .hidden
        .push((id, flags.contains(ElementFlags::VISIBLE)));
}
