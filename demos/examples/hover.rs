// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover to open, move away to close.
//!
//! Run:
//! - `cargo run -p littlefoot_demos --example hover`

use std::time::Duration;

use littlefoot::kurbo::{Point, Rect, Size};
use littlefoot::{Document, DocumentEvent, ElementData, Littlefoot, Settings};

fn main() {
    tracing_subscriber::fmt::init();

    let mut doc = Document::new(
        ElementData::new("body").with_bounds(Rect::new(0.0, 0.0, 800.0, 1200.0)),
        Size::new(800.0, 600.0),
    );
    let root = doc.root();
    let sup = doc.insert(
        Some(root),
        ElementData::new("sup").with_bounds(Rect::new(200.0, 100.0, 212.0, 120.0)),
    );
    doc.insert(Some(sup), ElementData::new("a").with_attribute("href", "#note-1"));
    doc.insert(
        Some(root),
        ElementData::new("li")
            .with_id("note-1")
            .with_html("<p>Shown on hover.</p>"),
    );

    let settings = Settings {
        activate_on_hover: true,
        dismiss_on_unhover: true,
        ..Settings::default()
    };
    let mut lf = Littlefoot::mount(doc, settings).expect("valid settings");
    let button = lf.buttons()[0];

    let step = |lf: &mut Littlefoot, label: &str, point: Point, ms: u64| {
        lf.dispatch(DocumentEvent::PointerMove { point });
        lf.advance(Duration::from_millis(ms));
        println!("{:?}\t{label:<16} {}", lf.now(), lf.state_of(button));
    };

    step(&mut lf, "enter button", Point::new(206.0, 110.0), 100);
    let content = lf.popover_of(button).map(|p| p.content());
    if let Some(bounds) = content.and_then(|c| lf.document().bounds(c)) {
        step(&mut lf, "enter popover", bounds.center(), 400);
    }
    step(&mut lf, "leave", Point::new(700.0, 500.0), 250);
    step(&mut lf, "(wait)", Point::new(700.0, 500.0), 500);
}
