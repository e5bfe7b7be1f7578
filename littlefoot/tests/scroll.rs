// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Repositioning on scroll and resize, and scrolling inside a popover.

mod common;

use std::time::Duration;

use common::{mount, open};
use littlefoot::kurbo::{Rect, Size, Vec2};
use littlefoot::{ButtonState, DocumentEvent, Littlefoot, Placement, ScrollState};

/// Past the trailing edge of the default reflow interval.
const SETTLE: Duration = Duration::from_millis(20);

fn scroll(lf: &mut Littlefoot, y: f64) {
    lf.document_mut().scroll_to(Vec2::new(0.0, y));
    lf.dispatch(DocumentEvent::Scroll);
}

fn position(lf: &Littlefoot, button: littlefoot::ElementId) -> Option<&str> {
    let root = lf.popover_of(button)?.root();
    lf.document().attribute(root, "data-footnote-position")
}

#[test]
fn follows_the_button_through_scrolling() {
    let mut lf = mount();
    let b = open(&mut lf, 1);
    // The button sits near the bottom of the first screen.
    assert_eq!(position(&lf, b), Some("top"));
    let root = lf.popover_of(b).unwrap().root();
    assert!(lf.document().has_class(root, "is-positioned-top"));

    scroll(&mut lf, 2400.0);
    assert_eq!(position(&lf, b), Some("bottom"));
    assert!(lf.document().has_class(root, "is-positioned-bottom"));
    assert!(!lf.document().has_class(root, "is-positioned-top"));

    // Within the reflow interval: applied by the trailing reflow.
    scroll(&mut lf, 0.0);
    lf.advance(SETTLE);
    assert_eq!(position(&lf, b), Some("top"));

    scroll(&mut lf, 2400.0);
    lf.advance(SETTLE);
    assert_eq!(position(&lf, b), Some("bottom"));
    assert_eq!(lf.state_of(b), ButtonState::Active);
}

#[test]
fn frame_stays_beside_the_button() {
    let mut lf = mount();
    let b = open(&mut lf, 1);
    let doc = lf.document();
    let button = doc.bounds(b).unwrap();
    let frame = doc.bounds(lf.popover_of(b).unwrap().root()).unwrap();
    assert_eq!(frame.y1, button.y0 - 10.0);

    scroll(&mut lf, 2400.0);
    let frame = lf
        .document()
        .bounds(lf.popover_of(b).unwrap().root())
        .unwrap();
    assert_eq!(frame.y0, button.y1 + 10.0);
}

#[test]
fn burst_ends_with_the_final_position() {
    let mut lf = mount();
    let b = open(&mut lf, 1);

    scroll(&mut lf, 2400.0);
    assert_eq!(position(&lf, b), Some("bottom"));
    lf.advance(Duration::from_millis(5));
    scroll(&mut lf, 1200.0);
    scroll(&mut lf, 600.0);
    scroll(&mut lf, 0.0);
    // Throttled: still showing the first event of the burst.
    assert_eq!(position(&lf, b), Some("bottom"));

    lf.advance(SETTLE);
    assert_eq!(position(&lf, b), Some("top"));
}

#[test]
fn resize_measures_again() {
    let mut lf = mount();
    let b = open(&mut lf, 1);
    assert_eq!(lf.popover_of(b).unwrap().natural_size().width, 800.0);

    let root = lf.document().root();
    lf.document_mut()
        .set_bounds(root, Rect::new(0.0, 0.0, 400.0, 3000.0));
    lf.document_mut().set_viewport_size(Size::new(400.0, 600.0));
    lf.dispatch(DocumentEvent::Resize);

    let popover = lf.popover_of(b).unwrap();
    assert_eq!(popover.natural_size().width, 400.0);
    let doc = lf.document();
    assert_eq!(doc.style(popover.root(), "max-width"), Some("400px"));
    assert_eq!(doc.style(popover.wrapper(), "max-width"), Some("400px"));
}

#[test]
fn long_content_scrolls_inside_the_popover() {
    let mut lf = mount();
    let b = open(&mut lf, 1);
    let popover = lf.popover_of(b).unwrap();
    let (root, content) = (popover.root(), popover.content());
    assert_eq!(popover.scroll_state(), ScrollState::SCROLLABLE);
    assert!(lf.document().has_class(root, "is-scrollable"));
    assert!(!lf.document().has_class(root, "is-fully-scrolled"));
    assert_eq!(lf.document().client_height(content), 240.0);

    lf.document_mut().set_scroll_top(content, 10_000.0);
    lf.dispatch(DocumentEvent::ContentScroll { target: content });
    assert!(lf.document().has_class(root, "is-fully-scrolled"));
    assert!(lf.document().has_class(root, "is-scrollable"));

    lf.document_mut().set_scroll_top(content, 0.0);
    lf.dispatch(DocumentEvent::ContentScroll { target: content });
    assert!(!lf.document().has_class(root, "is-fully-scrolled"));
}

#[test]
fn short_content_does_not_scroll() {
    let mut lf = mount();
    let b = open(&mut lf, 2);
    let popover = lf.popover_of(b).unwrap();
    assert_eq!(popover.placement(), Placement::Bottom);
    assert_eq!(popover.scroll_state(), ScrollState::empty());
    assert!(!lf.document().has_class(popover.root(), "is-scrollable"));
}
