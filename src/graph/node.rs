/// Convert a note index to frequency in Hz, equal-tempered.
/// A4 = 440 Hz = note 69. Out-of-range notes simply yield out-of-range
/// frequencies; callers decide whether that matters.
#[inline]
pub fn note_to_freq(note: i32) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

/// Context passed to graph nodes during rendering.
///
/// `time` is the absolute device time of the first frame in the output
/// block; nodes derive per-sample timestamps from it, so a node scheduled
/// in the future renders silence until its moment arrives regardless of
/// when the engine started rendering it.
pub struct RenderCtx {
    pub sample_rate: f32,
    pub time: f64,
}

impl RenderCtx {
    pub fn new(sample_rate: f32, time: f64) -> Self {
        Self { sample_rate, time }
    }

    /// Absolute device time of frame `i` within the block.
    #[inline]
    pub fn sample_time(&self, i: usize) -> f64 {
        self.time + i as f64 / self.sample_rate as f64
    }

    /// Absolute device time one past the end of a block of `frames`.
    #[inline]
    pub fn end_time(&self, frames: usize) -> f64 {
        self.sample_time(frames)
    }
}

/// Core trait for voice subgraph nodes.
pub trait GraphNode: Send {
    /// Fill `out` with this node's signal for the block starting at
    /// `ctx.time`. Output is overwritten, not accumulated.
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// True once the node can never produce sound again. The engine
    /// retires voices whose root node reports finished.
    fn is_finished(&self, time: f64) -> bool;
}

/// Allow boxed nodes to be used as nodes (for dynamic dispatch).
impl GraphNode for Box<dyn GraphNode> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(out, ctx)
    }

    fn is_finished(&self, time: f64) -> bool {
        (**self).is_finished(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_pitch_is_exact() {
        assert_eq!(note_to_freq(69), 440.0);
    }

    #[test]
    fn octaves_double_and_halve() {
        assert!((note_to_freq(57) - 220.0).abs() < 1e-3);
        assert!((note_to_freq(81) - 880.0).abs() < 1e-2);
    }

    #[test]
    fn semitone_ratio() {
        let ratio = note_to_freq(70) / note_to_freq(69);
        assert!((ratio - 2.0_f32.powf(1.0 / 12.0)).abs() < 1e-6);
    }

    #[test]
    fn sample_time_advances_by_sample_period() {
        let ctx = RenderCtx::new(48_000.0, 10.0);
        assert_eq!(ctx.sample_time(0), 10.0);
        assert!((ctx.sample_time(48_000) - 11.0).abs() < 1e-9);
    }
}
