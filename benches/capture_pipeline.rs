// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gowisata::camera::{storage, CapturedFrame};
use std::hint::black_box;
use tempfile::tempdir;

fn frame(width: u32, height: u32, rotation_degrees: i32) -> CapturedFrame {
    let pixels = (0..width * height)
        .flat_map(|i| [(i % 251) as u8, (i % 127) as u8, (i % 63) as u8, 255])
        .collect();
    CapturedFrame {
        width,
        height,
        pixels,
        rotation_degrees,
    }
}

fn capture_pipeline_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("capture_pipeline");
    group.sample_size(20);

    let dir = tempdir().expect("temp dir");

    for rotation in [0, 90, 180] {
        let input = frame(640, 480, rotation);
        group.bench_with_input(
            BenchmarkId::new("process_640x480", rotation),
            &input,
            |b, input| {
                b.iter(|| {
                    let locator = storage::process_capture(input.clone(), dir.path(), 90)
                        .expect("capture persisted");
                    black_box(locator)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, capture_pipeline_benchmark);
criterion_main!(benches);
