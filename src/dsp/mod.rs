//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! Everything here is block- or sample-oriented and allocation-free on the
//! render path. Scheduling (when things happen) lives in `sequencing`; these
//! types only care about producing samples.

/// Scheduled parameter timelines (set-value-at, exponential target-at).
pub mod automation;
/// Process-wide cached buffers: noise burst and reverb impulse response.
pub mod buffers;
/// Uniform-partitioned FFT convolution for the wet path.
pub mod convolver;
/// Topology-preserving state-variable filter.
pub mod filter;
/// Audio-band waveform generators.
pub mod oscillator;
