//! Benchmarks for complete voice chains.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion};
use stepbox::graph::RenderCtx;
use stepbox::voices;

use crate::BLOCK_SIZES;

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let sample_rate = 48_000.0;

    let clap_sample: Arc<[f32]> = (0..4_800).map(|i| (i as f32 * 0.01).sin()).collect::<Vec<f32>>().into();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        let ctx = RenderCtx::new(sample_rate, 0.0);

        group.bench_with_input(BenchmarkId::new("kick", size), &size, |b, _| {
            let mut voice = voices::kick(0.0);
            b.iter(|| {
                voice.render_block(black_box(&mut buffer), &ctx);
            })
        });

        group.bench_with_input(BenchmarkId::new("hats", size), &size, |b, _| {
            let mut voice = voices::hats(0.0, sample_rate);
            b.iter(|| {
                voice.render_block(black_box(&mut buffer), &ctx);
            })
        });

        group.bench_with_input(BenchmarkId::new("clap", size), &size, |b, _| {
            let mut voice = voices::clap(0.0, Arc::clone(&clap_sample));
            b.iter(|| {
                voice.render_block(black_box(&mut buffer), &ctx);
            })
        });

        // The heaviest chain: two saws, envelope, swept resonant filter
        group.bench_with_input(BenchmarkId::new("bass", size), &size, |b, _| {
            let mut voice = voices::bass(0.0, 36);
            b.iter(|| {
                voice.render_block(black_box(&mut buffer), &ctx);
            })
        });
    }

    group.finish();
}
