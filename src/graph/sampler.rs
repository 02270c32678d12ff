use std::sync::Arc;

use crate::graph::node::{GraphNode, RenderCtx};

/// Plays a shared buffer once, from an absolute start time.
///
/// The buffer is reference-counted, never copied: the hats voice replays
/// the same cached noise burst for every hit, and the clap voice replays
/// the loaded sample.
pub struct SamplerNode {
    buffer: Arc<[f32]>,
    start: f64,
    position: usize,
}

impl SamplerNode {
    pub fn new(buffer: Arc<[f32]>, start: f64) -> Self {
        Self {
            buffer,
            start,
            position: 0,
        }
    }
}

impl GraphNode for SamplerNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for (i, sample) in out.iter_mut().enumerate() {
            if ctx.sample_time(i) >= self.start && self.position < self.buffer.len() {
                *sample = self.buffer[self.position];
                self.position += 1;
            } else {
                *sample = 0.0;
            }
        }
    }

    fn is_finished(&self, time: f64) -> bool {
        time >= self.start && self.position >= self.buffer.len()
    }
}
