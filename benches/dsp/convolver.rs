//! Benchmarks for partitioned FFT convolution.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use stepbox::dsp::convolver::Convolver;

use crate::BLOCK_SIZES;

pub fn bench_convolver(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/convolver");

    // Half a second of impulse response at 48kHz, the reverb's size
    let mut rng = fastrand::Rng::with_seed(11);
    let impulse: Vec<f32> = (0..24_000).map(|_| rng.f32() * 2.0 - 1.0).collect();

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|_| rng.f32() * 2.0 - 1.0).collect();
        let mut output = vec![0.0f32; size];
        let mut conv = Convolver::new(&impulse);

        group.bench_with_input(BenchmarkId::new("reverb_ir", size), &size, |b, _| {
            b.iter(|| {
                conv.process(black_box(&input), &mut output);
                black_box(&output);
            })
        });
    }

    group.finish();
}
