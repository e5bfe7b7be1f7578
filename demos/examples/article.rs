// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A footnoted article: open a popover, scroll past it, close it.
//!
//! Prints the popover placement as the document scrolls. Set `RUST_LOG=littlefoot=trace` to see
//! every transition and reflow.
//!
//! Run:
//! - `cargo run -p littlefoot_demos --example article`

use std::time::Duration;

use littlefoot::kurbo::{Point, Rect, Size, Vec2};
use littlefoot::{Document, DocumentEvent, ElementData, Littlefoot, Settings};
use tracing_subscriber::EnvFilter;

fn article() -> Document {
    let mut doc = Document::new(
        ElementData::new("body").with_bounds(Rect::new(0.0, 0.0, 800.0, 3000.0)),
        Size::new(800.0, 600.0),
    );
    let root = doc.root();
    let p = doc.insert(Some(root), ElementData::new("p"));
    for (n, y) in [(1, 560.0), (2, 1400.0)] {
        let sup = doc.insert(
            Some(p),
            ElementData::new("sup").with_bounds(Rect::new(120.0, y, 132.0, y + 20.0)),
        );
        doc.insert(
            Some(sup),
            ElementData::new("a").with_attribute("href", &format!("#fn:{n}")),
        );
    }
    let footnotes = doc.insert(Some(root), ElementData::new("div").with_class("footnotes"));
    doc.insert(Some(footnotes), ElementData::new("hr"));
    let ol = doc.insert(Some(footnotes), ElementData::new("ol"));
    let notes = [
        "<p>Footnotes are the mark of a careful writer. ".repeat(20) + "</p>",
        "<p>A short aside.</p>".to_string(),
    ];
    for (i, html) in notes.iter().enumerate() {
        doc.insert(
            Some(ol),
            ElementData::new("li")
                .with_id(&format!("fn:{}", i + 1))
                .with_html(html),
        );
    }
    doc
}

fn report(lf: &Littlefoot, label: &str) {
    for button in lf.buttons() {
        let number = lf
            .document()
            .attribute(button, "data-footnote-id")
            .unwrap_or("?");
        match lf.popover_of(button) {
            Some(popover) => println!(
                "  {label}: footnote {number} {} at {} ({:?})",
                lf.state_of(button),
                popover.placement().as_str(),
                popover.scroll_state(),
            ),
            None => println!("  {label}: footnote {number} {}", lf.state_of(button)),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .init();

    let mut lf = Littlefoot::mount(article(), Settings::default()).expect("default settings");
    println!("== Mounted: {} buttons ==", lf.buttons().len());

    let first = lf.buttons()[0];
    lf.dispatch(DocumentEvent::Click { target: first });
    report(&lf, "clicked");
    lf.advance(Duration::from_millis(100));
    report(&lf, "opened");

    println!("== Scrolling ==");
    for y in [600.0, 1200.0, 2400.0] {
        lf.document_mut().scroll_to(Vec2::new(0.0, y));
        lf.dispatch(DocumentEvent::Scroll);
        lf.advance(Duration::from_millis(20));
        report(&lf, &format!("scroll {y}"));
    }

    println!("== Click outside ==");
    lf.dispatch(DocumentEvent::ClickAt {
        point: Point::new(700.0, 50.0),
    });
    report(&lf, "dismissing");
    lf.advance(Duration::from_millis(500));
    report(&lf, "closed");
}
