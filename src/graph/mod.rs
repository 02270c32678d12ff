//! Short-lived voice subgraphs.
//!
//! A voice is assembled from these nodes at trigger time, parametrized with
//! automation anchored at an absolute device timestamp, and handed to the
//! engine in one scoped operation. Nothing here is pooled or reused: a node
//! renders its transient and reports itself finished. The `extensions`
//! module adds fluent helpers so recipes read as signal chains.

/// Fluent combinators (`.gain()`, `.lowpass()`, `.layer()`, ...).
pub mod extensions;
/// Serial filter stage with a swept cutoff.
pub mod filter;
/// Scheduled gain stage.
pub mod gain;
/// Two-input sum for layered sources.
pub mod layer;
/// Core trait shared by all nodes.
pub mod node;
/// Oscillator with automated frequency and an absolute start/stop window.
pub mod oscillator;
/// One-shot buffer player.
pub mod sampler;

pub use node::{note_to_freq, GraphNode, RenderCtx};
