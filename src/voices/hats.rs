//! Hi-hat voice.
//!
//! Replays the shared cached noise burst through a fast gain decay and a
//! 5 kHz high-pass. Every hit reuses the same buffer verbatim; the 20 ms
//! envelope is what makes it a tight "tss" rather than a wash.

use crate::dsp::{automation::Automation, buffers};
use crate::graph::{extensions::NodeExt, sampler::SamplerNode, GraphNode};

/// Build one hats hit anchored at absolute device time `t`.
pub fn hats(t: f64, sample_rate: f32) -> Box<dyn GraphNode> {
    SamplerNode::new(buffers::noise_burst(sample_rate), t)
        .gain(
            Automation::new(1.0)
                .set_value_at(1.0, t)
                .target_at(0.0, t, 0.02),
        )
        .highpass(Automation::new(5_000.0), 1.0)
        .boxed()
}
