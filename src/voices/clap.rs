//! Clap voice.
//!
//! One-shot playback of the externally supplied sample at half gain. No
//! envelope: the recording's own decay is the envelope.

use std::sync::Arc;

use crate::dsp::automation::Automation;
use crate::graph::{extensions::NodeExt, sampler::SamplerNode, GraphNode};

/// Build one clap hit anchored at absolute device time `t`.
pub fn clap(t: f64, sample: Arc<[f32]>) -> Box<dyn GraphNode> {
    SamplerNode::new(sample, t).gain(Automation::new(0.5)).boxed()
}
