//! # Skeleton Benchmark
//!
//! Build, save and load cost for wide skeletons.

#![allow(missing_docs)]

use armature_io::{IArchive, OArchive};
use armature_skeleton::{RawJoint, RawSkeleton, Skeleton, SkeletonBuilder};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn description(joints: usize) -> RawSkeleton {
    let mut root = RawJoint::new("root");
    for i in 1..joints {
        root = root.with_child(RawJoint::new(format!("joint_{i:04}")));
    }
    RawSkeleton { roots: vec![root] }
}

fn encode(skeleton: &Skeleton) -> Vec<u8> {
    let Ok(mut out) = OArchive::new(Vec::new()) else {
        return Vec::new();
    };
    if out.write_object(skeleton).is_err() {
        return Vec::new();
    }
    out.into_inner()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("skeleton_build");

    for joints in [16, 128, 1024] {
        let raw = description(joints);
        group.bench_with_input(BenchmarkId::new("build", joints), &raw, |b, raw| {
            b.iter(|| SkeletonBuilder::build(black_box(raw)));
        });
    }

    group.finish();
}

fn bench_archive(c: &mut Criterion) {
    let mut group = c.benchmark_group("skeleton_archive");

    for joints in [16, 128, 1024] {
        let Ok(skeleton) = SkeletonBuilder::build(&description(joints)) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("save", joints), &skeleton, |b, skeleton| {
            b.iter(|| encode(black_box(skeleton)));
        });

        let bytes = encode(&skeleton);
        group.bench_with_input(BenchmarkId::new("load", joints), &bytes, |b, bytes| {
            let mut loaded = Skeleton::default();
            b.iter(|| {
                if let Ok(mut input) = IArchive::new(black_box(bytes.as_slice())) {
                    let _ = input.read_object(&mut loaded);
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_archive);
criterion_main!(benches);
