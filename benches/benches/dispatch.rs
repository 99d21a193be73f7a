// Copyright 2026 the Stipple Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use stipple_canvas_ref::RefCanvas;
use stipple_display_list::{
    DisplayList, DisplayListBuilder, DlColor, DlDrawStyle, DlOpReceiver, DlPath, DlPoint, DlRRect,
    DlRect,
};
use stipple_dispatch::Dispatcher;

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn next_f32(&mut self, upper: f32) -> f32 {
        (self.next_u32() >> 8) as f32 / (1 << 24) as f32 * upper
    }
}

// A scene of mixed shapes spread over a `extent` x `extent` square.
fn record_scene(builder: &mut DisplayListBuilder, count: u32, extent: f32, seed: u64) {
    let mut rng = Lcg::new(seed);
    for i in 0..count {
        let x = rng.next_f32(extent);
        let y = rng.next_f32(extent);
        let size = 4.0 + rng.next_f32(28.0);
        let rect = DlRect::from_xywh(x, y, size, size);
        builder.set_color(DlColor(0xFF00_0000 | rng.next_u32()));
        match i % 4 {
            0 => builder.draw_rect(&rect),
            1 => builder.draw_oval(&rect),
            2 => builder.draw_rrect(&DlRRect::from_rect_radius(rect, size * 0.25)),
            _ => {
                builder.set_draw_style(DlDrawStyle::Stroke);
                let mut path = DlPath::new();
                path.move_to(DlPoint::new(x, y))
                    .quad_to(DlPoint::new(x + size, y), DlPoint::new(x + size, y + size))
                    .line_to(DlPoint::new(x, y + size));
                builder.draw_path(&path);
                builder.set_draw_style(DlDrawStyle::Fill);
            }
        }
    }
}

fn flat_list(count: u32, with_rtree: bool) -> DisplayList {
    let mut builder = if with_rtree {
        DisplayListBuilder::with_rtree()
    } else {
        DisplayListBuilder::new()
    };
    record_scene(&mut builder, count, 2_048.0, 0x5717_0000_0000_0001);
    builder.build()
}

// `depth` levels of lists, each embedding the next at half opacity.
fn nested_list(count: u32, depth: u32) -> DisplayList {
    let mut list = flat_list(count, false);
    for level in 0..depth {
        let mut builder = DisplayListBuilder::new();
        builder.save();
        builder.translate(8.0, 8.0);
        builder.draw_display_list(&list, if level % 2 == 0 { 0.5 } else { 1.0 });
        builder.restore();
        record_scene(&mut builder, 16, 512.0, u64::from(level));
        list = builder.build();
    }
    list
}

fn play(list: &DisplayList, canvas: RefCanvas) -> usize {
    let mut dispatcher = Dispatcher::new(canvas);
    list.dispatch(&mut dispatcher);
    dispatcher.end_recording_as_picture().events.len()
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("stipple_dispatch");
    group.sample_size(50);

    for &count in &[256_u32, 4_096_u32] {
        let list = flat_list(count, false);
        group.bench_function(format!("flat(n={count})"), |b| {
            b.iter_batched(
                RefCanvas::new,
                |canvas| black_box(play(black_box(&list), canvas)),
                BatchSize::SmallInput,
            );
        });
    }

    for &depth in &[4_u32, 16_u32] {
        let list = nested_list(256, depth);
        group.bench_function(format!("nested(n=256,depth={depth})"), |b| {
            b.iter_batched(
                RefCanvas::new,
                |canvas| black_box(play(black_box(&list), canvas)),
                BatchSize::SmallInput,
            );
        });
    }

    // One list embedded under a small viewport; the R-tree skips most draws.
    for &with_rtree in &[false, true] {
        let child = flat_list(4_096, with_rtree);
        let mut builder = DisplayListBuilder::new();
        builder.draw_display_list(&child, 1.0);
        let list = builder.build();
        let viewport = Rect::new(0.0, 0.0, 256.0, 256.0);
        group.bench_function(format!("culled_nested(rtree={with_rtree})"), |b| {
            b.iter_batched(
                || RefCanvas::with_cull_rect(viewport),
                |canvas| black_box(play(black_box(&list), canvas)),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
