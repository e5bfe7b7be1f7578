// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use littlefoot::kurbo::{Point, Rect, Size, Vec2};
use littlefoot::{Document, DocumentEvent, ElementData, Littlefoot, Settings};
use littlefoot_geometry::{LayoutInput, resolve};

/// An article with `n` footnotes spread over its height, 40px apart.
fn article(n: usize) -> Document {
    let height = 40.0 * n as f64 + 600.0;
    let mut doc = Document::new(
        ElementData::new("body").with_bounds(Rect::new(0.0, 0.0, 800.0, height)),
        Size::new(800.0, 600.0),
    );
    let root = doc.root();
    let p = doc.insert(Some(root), ElementData::new("p"));
    for i in 1..=n {
        let y = 40.0 * i as f64;
        let x = (i % 60) as f64 * 12.0;
        let sup = doc.insert(
            Some(p),
            ElementData::new("sup").with_bounds(Rect::new(x, y, x + 12.0, y + 20.0)),
        );
        doc.insert(
            Some(sup),
            ElementData::new("a").with_attribute("href", &format!("#fn:{i}")),
        );
    }
    let ol = doc.insert(Some(root), ElementData::new("ol"));
    for i in 1..=n {
        doc.insert(
            Some(ol),
            ElementData::new("li")
                .with_id(&format!("fn:{i}"))
                .with_html(&"<p>Footnote text that wraps over a few lines. </p>".repeat(i % 8 + 1)),
        );
    }
    doc
}

fn open_all(n: usize) -> Littlefoot {
    let settings = Settings {
        allow_multiple: true,
        ..Settings::default()
    };
    let mut lf = Littlefoot::mount(article(n), settings).unwrap();
    lf.activate(Some("button.littlefoot-footnote__button"));
    lf.advance(Duration::from_millis(100));
    lf
}

fn bench_mount(c: &mut Criterion) {
    let mut group = c.benchmark_group("mount");
    for &n in &[10_usize, 100, 500] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("footnotes_{n}"), |b| {
            b.iter_batched(
                || article(n),
                |doc| black_box(Littlefoot::mount(doc, Settings::default()).unwrap()),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_scroll_burst(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_burst");
    for &open in &[1_usize, 10, 50] {
        group.throughput(Throughput::Elements(open as u64));
        group.bench_function(format!("open_{open}"), |b| {
            b.iter_batched(
                || open_all(open),
                |mut lf| {
                    // Sixty events a few milliseconds apart, then let the trailing reflow run.
                    for step in 0..60_u32 {
                        lf.document_mut()
                            .scroll_to(Vec2::new(0.0, f64::from(step) * 10.0));
                        lf.dispatch(DocumentEvent::Scroll);
                        lf.advance(Duration::from_millis(4));
                    }
                    lf.advance(Duration::from_millis(20));
                    black_box(lf)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let inputs: Vec<LayoutInput> = (0..1000)
        .map(|i| {
            let y = f64::from(i) * 3.0;
            LayoutInput {
                button: Rect::new(100.0, y, 112.0, y + 20.0),
                scroll_offset: Vec2::new(0.0, 1200.0),
                viewport: Size::new(800.0, 600.0),
                client_width: 800.0,
                natural: Size::new(400.0, f64::from(i % 500)),
                max_height: 240.0,
                margin: 10.0,
                edge_gap: 15.0,
            }
        })
        .collect();
    group.throughput(Throughput::Elements(inputs.len() as u64));
    group.bench_function("layouts_1000", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(resolve(black_box(input)));
            }
        });
    });
    group.finish();
}

fn bench_hit_test(c: &mut Criterion) {
    let lf = open_all(50);
    let points: Vec<Point> = (0..100)
        .map(|i| Point::new(f64::from(i % 10) * 80.0, f64::from(i / 10) * 60.0))
        .collect();
    c.bench_function("hit_test/open_50", |b| {
        b.iter(|| {
            for &pt in &points {
                black_box(lf.document().hit_test_point(pt));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_mount,
    bench_scroll_burst,
    bench_resolve,
    bench_hit_test
);
criterion_main!(benches);
