// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay showing one footnote.
//!
//! ## Markup
//!
//! ```text
//! aside.littlefoot-footnote#fncontent:N   data-footnote-position, data-footnote-max-height
//! ├── div.littlefoot-footnote__wrapper    style max-width
//! │   └── div.littlefoot-footnote__content[tabindex=0]   the button's content, verbatim
//! └── div.littlefoot-footnote__tooltip    style left
//! ```
//!
//! The popover is inserted next to its button, inside the button's container.

use kurbo::{Rect, Size};
use littlefoot_document::{Document, ElementData, ElementId};
use littlefoot_geometry::{
    ContentScroll, LayoutInput, Placement, PopoverLayout, ScrollState, popover_max_width, resolve,
};

use crate::Settings;
use crate::measure::Measure;

/// A popover bound to one button.
#[derive(Clone, Debug)]
pub struct Popover {
    button: ElementId,
    root: ElementId,
    wrapper: ElementId,
    content: ElementId,
    tooltip: ElementId,
    id: String,
    natural: Size,
    layout: Option<PopoverLayout>,
    scroll: ScrollState,
}

impl Popover {
    /// Build the popover markup for `button` and lay it out.
    ///
    /// Returns `None` if the button is not in the document. `serial` names the popover when the
    /// button has no `data-footnote-id`.
    pub(crate) fn create(
        document: &mut Document,
        button: ElementId,
        settings: &Settings,
        measure: &dyn Measure,
        serial: u64,
    ) -> Option<Self> {
        let parent = document.parent(button)?;
        let number = document
            .attribute(button, "data-footnote-id")
            .map_or_else(|| serial.to_string(), str::to_string);
        let html = document
            .attribute(button, "data-footnote-content")
            .unwrap_or_default()
            .to_string();
        let id = format!("fncontent:{number}");
        let natural = measure.measure(&html, popover_max_width(document.client_width()));

        let root = document.insert(
            Some(parent),
            ElementData::new("aside")
                .with_class("littlefoot-footnote")
                .with_id(&id)
                .with_attribute("data-footnote-id", &number)
                .with_z_index(1),
        );
        let wrapper = document.insert(
            Some(root),
            ElementData::new("div")
                .with_class("littlefoot-footnote__wrapper")
                .with_z_index(1),
        );
        let content = document.insert(
            Some(wrapper),
            ElementData::new("div")
                .with_class("littlefoot-footnote__content")
                .with_attribute("tabindex", "0")
                .with_html(&html)
                .with_z_index(1),
        );
        let tooltip = document.insert(
            Some(root),
            ElementData::new("div")
                .with_class("littlefoot-footnote__tooltip")
                .with_z_index(1),
        );

        let mut popover = Self {
            button,
            root,
            wrapper,
            content,
            tooltip,
            id,
            natural,
            layout: None,
            scroll: ScrollState::empty(),
        };
        popover.reflow(document, settings, None);
        Some(popover)
    }

    /// The button this popover belongs to.
    pub fn button(&self) -> ElementId {
        self.button
    }

    /// The `aside.littlefoot-footnote` root.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// The wrapper fitted to the content width.
    pub fn wrapper(&self) -> ElementId {
        self.wrapper
    }

    /// The scrollable content region.
    pub fn content(&self) -> ElementId {
        self.content
    }

    /// The arrow pointing at the button.
    pub fn tooltip(&self) -> ElementId {
        self.tooltip
    }

    /// Element id of the root, referenced by the button's `aria-controls`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Natural size of the content at the current maximum width.
    pub fn natural_size(&self) -> Size {
        self.natural
    }

    /// Side of the button the popover opens on.
    pub fn placement(&self) -> Placement {
        self.layout.map(|l| l.placement).unwrap_or_default()
    }

    /// The last layout.
    pub fn layout(&self) -> Option<&PopoverLayout> {
        self.layout.as_ref()
    }

    /// Scroll flags of the content.
    pub fn scroll_state(&self) -> ScrollState {
        self.scroll
    }

    /// Recompute placement and sizing from the current button and viewport geometry.
    ///
    /// With a `measure`, the content is measured again first (the maximum width may have
    /// changed).
    pub(crate) fn reflow(
        &mut self,
        document: &mut Document,
        settings: &Settings,
        measure: Option<&dyn Measure>,
    ) {
        let Some(button) = document.bounds(self.button) else {
            return;
        };
        let viewport = document.viewport();
        let client_width = document.client_width();
        if let Some(measure) = measure {
            let html = document.html(self.content).unwrap_or_default();
            self.natural = measure.measure(html, popover_max_width(client_width));
        }
        let layout = resolve(&LayoutInput {
            button,
            scroll_offset: viewport.scroll_offset,
            viewport: viewport.size,
            client_width,
            natural: self.natural,
            max_height: settings.max_height,
            margin: settings.margin,
            edge_gap: settings.edge_gap,
        });

        let root = self.root;
        document.set_attribute(root, "data-footnote-position", layout.placement.as_str());
        document.set_class(
            root,
            "is-positioned-top",
            layout.placement == Placement::Top,
        );
        document.set_class(
            root,
            "is-positioned-bottom",
            layout.placement == Placement::Bottom,
        );
        document.set_attribute(
            root,
            "data-footnote-max-height",
            &settings.max_height.to_string(),
        );
        document.set_style(root, "max-width", &format!("{}px", layout.max_width));
        document.set_style(
            self.wrapper,
            "max-width",
            &format!("{}px", layout.wrapper_width),
        );
        document.set_style(
            self.tooltip,
            "left",
            &format!("{}%", layout.left_relative * 100.0),
        );

        document.set_bounds(root, layout.frame);
        document.set_bounds(self.wrapper, layout.frame);
        document.set_scroll_height(self.content, Some(self.natural.height));
        document.set_bounds(self.content, layout.frame);
        document.set_bounds(self.tooltip, tooltip_rect(button, layout.frame, settings.margin));

        tracing::trace!(
            popover = %self.id,
            placement = layout.placement.as_str(),
            content_height = layout.content_height,
            "reflowed popover"
        );
        self.layout = Some(layout);
        self.refresh_scroll(document);
    }

    /// Re-derive `is-scrollable` and `is-fully-scrolled` from the content's scroll metrics.
    pub(crate) fn refresh_scroll(&mut self, document: &mut Document) -> ScrollState {
        let state = ContentScroll {
            scroll_top: document.scroll_top(self.content),
            scroll_height: document.scroll_height(self.content),
            client_height: document.client_height(self.content),
        }
        .state();
        document.set_class(
            self.root,
            "is-scrollable",
            state.contains(ScrollState::SCROLLABLE),
        );
        document.set_class(
            self.root,
            "is-fully-scrolled",
            state.contains(ScrollState::FULLY_SCROLLED),
        );
        if state != self.scroll {
            tracing::trace!(popover = %self.id, ?state, "scroll state changed");
        }
        self.scroll = state;
        state
    }

    /// Remove the popover markup.
    pub(crate) fn destroy(self, document: &mut Document) {
        document.remove(self.root);
    }
}

/// The gap between button and popover, one margin wide, centred on the button.
fn tooltip_rect(button: Rect, frame: Rect, margin: f64) -> Rect {
    let cx = button.center().x;
    let half = margin / 2.0;
    if frame.y0 >= button.y1 {
        Rect::new(cx - half, button.y1, cx + half, frame.y0)
    } else {
        Rect::new(cx - half, frame.y1, cx + half, button.y0)
    }
}
