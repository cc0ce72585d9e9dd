// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::Size;
use understory_parallax::{LayerMetrics, ParallaxLayoutEngine, ParallaxParams, SlidingStyle};
use understory_scroll::{Viewport, WrapDirection};
use understory_sections::SectionIndex;

fn strip(n: usize) -> SectionIndex<()> {
    let mut sections = SectionIndex::new(12.0);
    for i in 0..n {
        let id = sections.push(());
        // Every fourth section is wide.
        let width = if i % 4 == 3 { 900.0 } else { 300.0 };
        sections.set_measured_size(id, Size::new(width, 400.0));
    }
    sections
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_parallax");
    let metrics = LayerMetrics {
        viewport_width: 320.0,
        header_width: 640.0,
        background_width: 960.0,
    };

    for &n in &[4_usize, 32, 256] {
        let sections = strip(n);
        let cw = sections.content_width();
        for style in [SlidingStyle::Bounded, SlidingStyle::Towed, SlidingStyle::Synced] {
            let engine = ParallaxLayoutEngine::new(ParallaxParams {
                style,
                ..ParallaxParams::default()
            });

            let mut viewport = Viewport::new();
            viewport.set_offset(cw / 3.0);
            group.bench_function(format!("plain(n={n},style={style})"), |b| {
                b.iter(|| black_box(engine.layout(&sections, &viewport, &metrics)));
            });

            let mut wrapping = Viewport::new();
            wrapping.set_offset(cw - 100.0);
            wrapping.begin_wrap(WrapDirection::ToHead, cw);
            wrapping.set_offset(cw - 40.0);
            group.bench_function(format!("wrapping(n={n},style={style})"), |b| {
                b.iter(|| black_box(engine.layout(&sections, &wrapping, &metrics)));
            });
        }

        group.bench_function(format!("section_under_offset(n={n})"), |b| {
            let mut x = 0.0;
            b.iter(|| {
                x = (x + 97.0) % cw;
                black_box(sections.section_under_offset(x))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
