//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use stepbox::dsp::oscillator::{Oscillator, Waveform};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let sample_rate = 48_000.0;

    for &size in BLOCK_SIZES {
        for (name, waveform) in [
            ("sine", Waveform::Sine),
            ("square", Waveform::Square),
            ("saw", Waveform::Saw),
        ] {
            let mut osc = Oscillator::new(waveform);
            let mut buffer = vec![0.0f32; size];
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for sample in buffer.iter_mut() {
                        *sample = osc.tick(black_box(440.0), sample_rate);
                    }
                    black_box(&buffer);
                })
            });
        }
    }

    group.finish();
}
