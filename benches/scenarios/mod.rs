//! Real-world scenario benchmarks.

mod voices;

pub use voices::bench_voices;
