//! # Archive Benchmark
//!
//! Compares native and byte-swapped array throughput.

#![allow(missing_docs)]

use armature_core::math::SoaTransform;
use armature_io::{Endianness, IArchive, OArchive};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn encode(poses: &[SoaTransform], endianness: Endianness) -> Vec<u8> {
    let Ok(mut out) = OArchive::with_endianness(Vec::new(), endianness) else {
        return Vec::new();
    };
    if out.write_array(poses).is_err() {
        return Vec::new();
    }
    out.into_inner()
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("archive_write_array");
    let poses = vec![SoaTransform::IDENTITY; 256];
    group.throughput(Throughput::Bytes(
        (poses.len() * std::mem::size_of::<SoaTransform>()) as u64,
    ));

    for endianness in [Endianness::native(), Endianness::native().swapped()] {
        group.bench_with_input(
            BenchmarkId::new("soa_transforms", format!("{endianness:?}")),
            &poses,
            |b, poses| {
                b.iter(|| encode(black_box(poses), endianness));
            },
        );
    }

    group.finish();
}

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("archive_read_array");
    let poses = vec![SoaTransform::IDENTITY; 256];

    for endianness in [Endianness::native(), Endianness::native().swapped()] {
        let bytes = encode(&poses, endianness);
        group.bench_with_input(
            BenchmarkId::new("soa_transforms", format!("{endianness:?}")),
            &bytes,
            |b, bytes| {
                let mut loaded = vec![SoaTransform::default(); 256];
                b.iter(|| {
                    if let Ok(mut input) = IArchive::new(black_box(bytes.as_slice())) {
                        let _ = input.read_array(&mut loaded);
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_write, bench_read);
criterion_main!(benches);
