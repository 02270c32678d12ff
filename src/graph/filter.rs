use crate::dsp::automation::Automation;
use crate::dsp::filter::SVFilter;
use crate::graph::node::{GraphNode, RenderCtx};

/// Serial filter stage: source renders into the block, the filter
/// processes it in place. The cutoff is a timeline so recipes can sweep
/// it (the bass "wow" is a 300 -> 3000 Hz cutoff approach at Q = 25).
pub struct Filter<N> {
    input: N,
    filter: SVFilter,
    cutoff: Automation,
}

impl<N> Filter<N> {
    pub fn lowpass(input: N, cutoff: Automation, q: f32) -> Self {
        Self {
            input,
            filter: SVFilter::lowpass(0.0, q),
            cutoff,
        }
    }

    pub fn highpass(input: N, cutoff: Automation, q: f32) -> Self {
        Self {
            input,
            filter: SVFilter::highpass(0.0, q),
            cutoff,
        }
    }
}

impl<N: GraphNode> GraphNode for Filter<N> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.input.render_block(out, ctx);
        for (i, sample) in out.iter_mut().enumerate() {
            self.filter.set_cutoff(self.cutoff.value_at(ctx.sample_time(i)));
            *sample = self.filter.process(*sample, ctx.sample_rate);
        }
    }

    // The filter rings for a handful of samples after its source stops;
    // at the cutoffs used here that tail is far below audibility.
    fn is_finished(&self, time: f64) -> bool {
        self.input.is_finished(time)
    }
}
