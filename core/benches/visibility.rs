use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use miners_core::{Field, FrameBuffer, LevelLayout, visibility};

fn bench_explore_level_one(c: &mut Criterion) {
    let layout = LevelLayout::level_one();

    c.bench_function("explore_level_one_start", |b| {
        b.iter(|| {
            let mut field = Field::from_layout(&layout);
            let mut frame = FrameBuffer::new(field.size());
            visibility::explore(&mut field, black_box((0, 0)), &mut frame)
        })
    });
}

fn bench_explore_open_field(c: &mut Criterion) {
    let rows = vec![vec![0u8; 100]; 100];
    let layout = LevelLayout::from_codes(&rows, &[]).unwrap();

    c.bench_function("explore_open_100x100", |b| {
        b.iter(|| {
            let mut field = Field::from_layout(&layout);
            let mut frame = FrameBuffer::new(field.size());
            visibility::explore(&mut field, black_box((50, 50)), &mut frame)
        })
    });
}

criterion_group!(benches, bench_explore_level_one, bench_explore_open_field);
criterion_main!(benches);
