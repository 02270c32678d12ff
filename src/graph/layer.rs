use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Sums two sources sample for sample.
///
/// Voices use this for layered material: the kick's body-plus-click pair
/// and the bass's unison saws. Both sources render at full amplitude and
/// are added; level balance belongs to each branch's own gain stage.
pub struct Layer<A, B> {
    source_a: A,
    source_b: B,
    temp_buffer: Vec<f32>,
}

impl<A, B> Layer<A, B> {
    pub fn new(source_a: A, source_b: B) -> Self {
        Self {
            source_a,
            source_b,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<A: GraphNode, B: GraphNode> GraphNode for Layer<A, B> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source_a.render_block(out, ctx);

        // Slice temp buffer to the block size (no allocation on the render path)
        let frames = &mut self.temp_buffer[..out.len()];
        frames.fill(0.0);
        self.source_b.render_block(frames, ctx);

        for (o, b) in out.iter_mut().zip(frames.iter()) {
            *o += *b;
        }
    }

    fn is_finished(&self, time: f64) -> bool {
        self.source_a.is_finished(time) && self.source_b.is_finished(time)
    }
}
