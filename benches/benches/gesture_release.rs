// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use understory_gesture::{GestureController, PointerEvent, PointerId};
use understory_sections::SectionIndex;

fn strip(n: usize) -> SectionIndex<()> {
    let mut sections = SectionIndex::new(12.0);
    for _ in 0..n {
        let id = sections.push(());
        sections.set_measured_size(id, Size::new(300.0, 400.0));
    }
    sections
}

/// Drags `distance` pixels to the left in `steps` moves, `dt` ms apart,
/// releases, and runs frames until the controller settles.
fn drag_and_settle(
    gestures: &mut GestureController,
    sections: &SectionIndex<()>,
    distance: f64,
    steps: u32,
    dt: u64,
) -> f64 {
    let p = PointerId(0);
    let start = 400.0;
    gestures.handle(&PointerEvent::down(p, Point::new(start, 100.0), 0), sections);
    for step in 1..=steps {
        let x = start - distance * f64::from(step) / f64::from(steps);
        gestures.handle(
            &PointerEvent::moved(p, Point::new(x, 100.0), u64::from(step) * dt),
            sections,
        );
    }
    let end = u64::from(steps) * dt;
    gestures.handle(
        &PointerEvent::up(p, Point::new(start - distance, 100.0), end),
        sections,
    );
    let mut now = end;
    while gestures.state().is_animating() {
        now += 16;
        gestures.advance(now, sections);
    }
    gestures.viewport().offset()
}

fn bench_release(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_gesture");
    let sections = strip(8);

    let fresh = || {
        let mut gestures = GestureController::default();
        gestures.set_viewport_width(320.0);
        gestures
    };

    group.bench_function("slow_drag_snap", |b| {
        b.iter_batched(
            fresh,
            |mut gestures| black_box(drag_and_settle(&mut gestures, &sections, 250.0, 50, 20)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("fast_fling", |b| {
        b.iter_batched(
            fresh,
            |mut gestures| black_box(drag_and_settle(&mut gestures, &sections, 120.0, 6, 8)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("wrap_to_tail", |b| {
        b.iter_batched(
            fresh,
            |mut gestures| black_box(drag_and_settle(&mut gestures, &sections, -120.0, 6, 8)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_release);
criterion_main!(benches);
