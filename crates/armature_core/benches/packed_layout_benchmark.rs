//! # Packed Layout Benchmark
//!
//! Measures planning and allocating a skeleton-shaped block.

#![allow(missing_docs)]

use armature_core::math::SoaTransform;
use armature_core::memory::{PackedBuffer, PackedLayout, RegionRequest};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn requests(joints: usize) -> [RegionRequest; 4] {
    [
        RegionRequest::array::<SoaTransform>(joints.div_ceil(4)),
        RegionRequest::array::<[u32; 2]>(joints),
        RegionRequest::array::<i16>(joints),
        RegionRequest::array::<u8>(joints * 12),
    ]
}

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("packed_layout_plan");

    for joints in [16, 128, 1024] {
        let requests = requests(joints);
        group.bench_with_input(BenchmarkId::new("plan", joints), &requests, |b, requests| {
            b.iter(|| PackedLayout::plan(black_box(requests)));
        });
    }

    group.finish();
}

fn bench_allocate(c: &mut Criterion) {
    let mut group = c.benchmark_group("packed_buffer_allocate");

    for joints in [16, 128, 1024] {
        let Ok(layout) = PackedLayout::plan(&requests(joints)) else {
            continue;
        };
        group.throughput(criterion::Throughput::Bytes(layout.size() as u64));
        group.bench_with_input(BenchmarkId::new("allocate", joints), &layout, |b, layout| {
            b.iter(|| PackedBuffer::allocate(black_box(layout.clone())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_plan, bench_allocate);
criterion_main!(benches);
