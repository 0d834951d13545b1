// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use std::time::Duration;
use understory_drawer::pointer::PointerId;
use understory_drawer::{DrawerLayout, DrawerSpec, Edge, LayoutConfig};

const CONTAINER: Size = Size::new(1920.0, 1080.0);
const FRAME: Duration = Duration::from_millis(16);

fn populated(count: u32) -> DrawerLayout<u32, ()> {
    let mut layout = DrawerLayout::new(CONTAINER, LayoutConfig::default(), ());
    for i in 0..count {
        let edge = Edge::ALL[(i % 4) as usize];
        let size = match edge.axis() {
            understory_drawer::Axis::Horizontal => Size::new(320.0, 1080.0),
            understory_drawer::Axis::Vertical => Size::new(1920.0, 240.0),
        };
        layout
            .register(i, DrawerSpec::new(edge, size, 16.0))
            .expect("surfaces are unique");
    }
    layout
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("drawer/drag");

    // Pointer events fan out to every drawer, so cost grows with the drawer count.
    for count in [4_u32, 64, 1_024] {
        group.bench_with_input(BenchmarkId::new("gesture", count), &count, |b, &count| {
            b.iter_batched(
                || populated(count),
                |mut layout| {
                    let finger = PointerId(1);
                    layout.pointer_down(finger, Some(&0), Point::new(8.0, 540.0));
                    for step in 1..=30 {
                        layout.pointer_move(finger, Point::new(8.0 + f64::from(step) * 8.0, 540.0));
                    }
                    layout.pointer_up(finger, Vec2::new(1200.0, 0.0));
                    black_box(layout);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_settle(c: &mut Criterion) {
    let mut group = c.benchmark_group("drawer/settle");

    for count in [4_u32, 64, 1_024] {
        group.bench_with_input(BenchmarkId::new("open_close", count), &count, |b, &count| {
            b.iter_batched(
                || populated(count),
                |mut layout| {
                    for i in 0..count {
                        if let Some(id) = layout.drawer_for(&i) {
                            layout.open_drawer(id).expect("drawer is registered");
                        }
                    }
                    while layout.tick(FRAME) {}
                    black_box(layout.scrim_opacity());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_drag, bench_settle);
criterion_main!(benches);
