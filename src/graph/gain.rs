use crate::dsp::automation::Automation;
use crate::graph::node::{GraphNode, RenderCtx};

/// Multiplies a signal by a scheduled gain timeline.
///
/// This is where the amplitude envelopes of all four recipes live: the
/// input renders into the block and is scaled in place, sample by sample,
/// by the timeline's value at that sample's absolute time.
pub struct Gain<N> {
    input: N,
    gain: Automation,
}

impl<N> Gain<N> {
    pub fn new(input: N, gain: Automation) -> Self {
        Self { input, gain }
    }
}

impl<N: GraphNode> GraphNode for Gain<N> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.input.render_block(out, ctx);
        for (i, sample) in out.iter_mut().enumerate() {
            *sample *= self.gain.value_at(ctx.sample_time(i));
        }
    }

    fn is_finished(&self, time: f64) -> bool {
        self.input.is_finished(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::Waveform;
    use crate::graph::extensions::NodeExt;
    use crate::graph::oscillator::OscNode;

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn constant_gain_scales_the_signal() {
        let mut plain = OscNode::new(Waveform::Square, Automation::new(440.0)).start_at(0.0);
        let mut scaled = OscNode::new(Waveform::Square, Automation::new(440.0))
            .start_at(0.0)
            .gain(Automation::new(0.5));

        let ctx = RenderCtx::new(SAMPLE_RATE, 0.0);
        let mut a = vec![0.0; 128];
        let mut b = vec![0.0; 128];
        plain.render_block(&mut a, &ctx);
        scaled.render_block(&mut b, &ctx);

        for (x, y) in a.iter().zip(&b) {
            assert!((x * 0.5 - y).abs() < 1e-6);
        }
    }

    #[test]
    fn decaying_gain_fades_the_signal_out() {
        let envelope = Automation::new(1.0)
            .set_value_at(1.0, 0.0)
            .target_at(0.0, 0.0, 0.02);
        let mut node =
            OscNode::new(Waveform::Square, Automation::new(440.0))
                .start_at(0.0)
                .gain(envelope);

        let mut buf = vec![0.0; 9_600]; // 200ms = 10 time constants
        node.render_block(&mut buf, &RenderCtx::new(SAMPLE_RATE, 0.0));

        let head = buf[..480].iter().fold(0.0f32, |m, &s| m.max(s.abs()));
        let tail = buf[9_000..].iter().fold(0.0f32, |m, &s| m.max(s.abs()));
        assert!(head > 0.5);
        assert!(tail < 1e-3, "envelope should have decayed, got {tail}");
    }
}
