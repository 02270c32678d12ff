//! Benchmarks for the state-variable filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use stepbox::dsp::filter::SVFilter;

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");
    let sample_rate = 48_000.0;

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.05).sin()).collect();

        let mut lowpass = SVFilter::lowpass(1_000.0, 0.707);
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| {
                for &sample in &input {
                    black_box(lowpass.process(black_box(sample), sample_rate));
                }
            })
        });

        // Resonant sweep: cutoff changes every sample, the bass voice case
        let mut swept = SVFilter::lowpass(300.0, 25.0);
        group.bench_with_input(BenchmarkId::new("swept_resonant", size), &size, |b, _| {
            b.iter(|| {
                for (i, &sample) in input.iter().enumerate() {
                    swept.set_cutoff(300.0 + i as f32);
                    black_box(swept.process(black_box(sample), sample_rate));
                }
            })
        });
    }

    group.finish();
}
