use crate::dsp::automation::Automation;
use crate::dsp::oscillator::{Oscillator, Waveform};
use crate::graph::node::{GraphNode, RenderCtx};

/// An oscillator bounded by an absolute start/stop window.
///
/// Outside the window the node renders silence; inside it the frequency
/// timeline is evaluated per sample, which is what lets the kick sweep its
/// pitch and the bass hold unison without the node carrying any
/// recipe-specific logic.
pub struct OscNode {
    osc: Oscillator,
    frequency: Automation,
    start: f64,
    stop: f64,
}

impl OscNode {
    pub fn new(waveform: Waveform, frequency: Automation) -> Self {
        Self {
            osc: Oscillator::new(waveform),
            frequency,
            start: 0.0,
            stop: f64::INFINITY,
        }
    }

    /// Begin producing sound at absolute device time `t`.
    pub fn start_at(mut self, t: f64) -> Self {
        self.start = t;
        self
    }

    /// Fall permanently silent at absolute device time `t`.
    pub fn stop_at(mut self, t: f64) -> Self {
        self.stop = t;
        self
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for (i, sample) in out.iter_mut().enumerate() {
            let t = ctx.sample_time(i);
            if t < self.start || t >= self.stop {
                *sample = 0.0;
            } else {
                let freq = self.frequency.value_at(t);
                *sample = self.osc.tick(freq, ctx.sample_rate);
            }
        }
    }

    fn is_finished(&self, time: f64) -> bool {
        time >= self.stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn silent_outside_window() {
        let mut node = OscNode::new(Waveform::Sine, Automation::new(440.0))
            .start_at(1.0)
            .stop_at(2.0);

        let mut before = vec![0.0; 128];
        node.render_block(&mut before, &RenderCtx::new(SAMPLE_RATE, 0.5));
        assert!(before.iter().all(|&s| s == 0.0));

        let mut during = vec![0.0; 128];
        node.render_block(&mut during, &RenderCtx::new(SAMPLE_RATE, 1.5));
        assert!(during.iter().any(|&s| s.abs() > 0.1));

        let mut after = vec![0.0; 128];
        node.render_block(&mut after, &RenderCtx::new(SAMPLE_RATE, 2.5));
        assert!(after.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn window_edge_inside_a_block() {
        let mut node = OscNode::new(Waveform::Square, Automation::new(440.0)).start_at(1.0);

        // Block straddles the start: first half silent, second half live
        let start = 1.0 - 64.0 / SAMPLE_RATE as f64;
        let mut buf = vec![0.0; 128];
        node.render_block(&mut buf, &RenderCtx::new(SAMPLE_RATE, start));

        assert!(buf[..64].iter().all(|&s| s == 0.0));
        assert!(buf[64..].iter().any(|&s| s.abs() > 0.5));
    }

    #[test]
    fn finished_only_after_stop() {
        let node = OscNode::new(Waveform::Sine, Automation::new(100.0))
            .start_at(0.0)
            .stop_at(1.0);
        assert!(!node.is_finished(0.5));
        assert!(node.is_finished(1.0));
    }

    #[test]
    fn swept_frequency_follows_the_timeline() {
        // 100 Hz falling toward 30 Hz: early zero crossings should come
        // faster than late ones.
        let sweep = Automation::new(100.0).target_at(30.0, 0.0, 0.15);
        let mut node = OscNode::new(Waveform::Sine, sweep).start_at(0.0).stop_at(1.0);

        let mut buf = vec![0.0; SAMPLE_RATE as usize];
        node.render_block(&mut buf, &RenderCtx::new(SAMPLE_RATE, 0.0));

        let crossings = |window: &[f32]| {
            window
                .windows(2)
                .filter(|w| (w[0] >= 0.0) != (w[1] >= 0.0))
                .count()
        };
        let early = crossings(&buf[..8_000]);
        let late = crossings(&buf[40_000..]);
        assert!(
            early > late * 2,
            "sweep should slow down: early={early}, late={late}"
        );
    }
}
