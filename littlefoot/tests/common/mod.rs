// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A laid-out article with three footnotes.
//!
//! ```text
//! body 800×3000, viewport 800×600
//! ├── p
//! │   ├── sup > a[href="#fn:1"]   100,560 – 112,580   near the bottom of the first screen
//! │   ├── sup > a[href="#fn:2"]   300,200 – 312,220
//! │   └── sup > a[href="#fn:3"]   500,1500 – 512,1520
//! └── div.footnotes
//!     ├── hr
//!     └── ol > li#fn:N > a.reversefootnote
//! ```

#![allow(dead_code, reason = "Each test binary uses a different subset of the helpers.")]

use std::time::Duration;

use littlefoot::kurbo::{Point, Rect, Size};
use littlefoot::{Document, ElementData, ElementId, Littlefoot, Selector, Settings};

pub const ACTIVATE: Duration = Duration::from_millis(100);
pub const DISMISS: Duration = Duration::from_millis(500);

/// Content of footnote 1: long enough to scroll at the default maximum height.
pub fn long_content() -> String {
    format!(
        "<p>{}</p>",
        "The footnote continues with a long digression about typography. ".repeat(30)
    )
}

pub fn document() -> Document {
    let mut doc = Document::new(
        ElementData::new("body").with_bounds(Rect::new(0.0, 0.0, 800.0, 3000.0)),
        Size::new(800.0, 600.0),
    );
    let root = doc.root();
    let p = doc.insert(Some(root), ElementData::new("p"));
    for (n, x, y) in [(1, 100.0, 560.0), (2, 300.0, 200.0), (3, 500.0, 1500.0)] {
        let sup = doc.insert(
            Some(p),
            ElementData::new("sup")
                .with_id(&format!("fnref:{n}"))
                .with_bounds(Rect::new(x, y, x + 12.0, y + 20.0)),
        );
        doc.insert(
            Some(sup),
            ElementData::new("a")
                .with_class("footnote")
                .with_attribute("href", &format!("#fn:{n}"))
                .with_bounds(Rect::new(x, y, x + 12.0, y + 20.0)),
        );
    }

    let footnotes = doc.insert(Some(root), ElementData::new("div").with_class("footnotes"));
    doc.insert(Some(footnotes), ElementData::new("hr"));
    let ol = doc.insert(Some(footnotes), ElementData::new("ol"));
    let contents = [
        long_content(),
        "<p>The second footnote.</p>".to_string(),
        "<p>The third footnote.</p>".to_string(),
    ];
    for (i, content) in contents.iter().enumerate() {
        let n = i + 1;
        let li = doc.insert(
            Some(ol),
            ElementData::new("li")
                .with_id(&format!("fn:{n}"))
                .with_html(content),
        );
        doc.insert(
            Some(li),
            ElementData::new("a")
                .with_class("reversefootnote")
                .with_attribute("href", &format!("#fnref:{n}")),
        );
    }
    doc
}

pub fn mount() -> Littlefoot {
    mount_with(Settings::default())
}

pub fn mount_with(settings: Settings) -> Littlefoot {
    Littlefoot::mount(document(), settings).unwrap()
}

pub fn selector(n: usize) -> String {
    format!(r#"button[data-footnote-id="{n}"]"#)
}

pub fn button(lf: &Littlefoot, n: usize) -> ElementId {
    let selector = Selector::parse(&selector(n)).unwrap();
    lf.document().query_selector(&selector).unwrap()
}

pub fn count(lf: &Littlefoot, selector: &str) -> usize {
    let selector = Selector::parse(selector).unwrap();
    lf.document().query_selector_all(&selector).len()
}

/// Buttons rendered as active, whatever the registry says.
pub fn active_button_count(lf: &Littlefoot) -> usize {
    count(lf, "button.littlefoot-footnote__button.is-active")
}

pub fn popover_count(lf: &Littlefoot) -> usize {
    count(lf, ".littlefoot-footnote")
}

/// Centre of `id` in client coordinates.
pub fn client_centre(lf: &Littlefoot, id: ElementId) -> Point {
    let bounds = lf.document().bounds(id).unwrap();
    bounds.center() - lf.document().viewport().scroll_offset
}

pub fn open(lf: &mut Littlefoot, n: usize) -> ElementId {
    lf.activate(Some(&selector(n)));
    lf.advance(ACTIVATE);
    button(lf, n)
}
