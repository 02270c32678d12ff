use crate::{
    dsp::{buffers::ImpulseResponse, convolver::Convolver},
    MAX_BLOCK_SIZE,
};

/// The shared output routing: one mono mix bus, two parallel paths.
///
/// Every voice sums into the same bus. The dry path copies the bus to
/// every output channel untouched; the wet path runs the bus through a
/// per-channel convolver loaded with the synthesized impulse response and
/// adds the result onto the first two channels. No per-voice gain staging
/// happens here - each voice sets its own levels.
pub struct OutputBus {
    wet_left: Convolver,
    wet_right: Convolver,
    wet_left_buf: Vec<f32>,
    wet_right_buf: Vec<f32>,
}

impl OutputBus {
    pub fn new(impulse: &ImpulseResponse) -> Self {
        Self {
            wet_left: Convolver::new(&impulse.left),
            wet_right: Convolver::new(&impulse.right),
            wet_left_buf: vec![0.0; MAX_BLOCK_SIZE],
            wet_right_buf: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// Render the bus into an interleaved output block.
    ///
    /// Channels beyond the first two repeat the left/right pair, so the
    /// routing behaves on mono, stereo, and multichannel devices alike.
    pub fn process(&mut self, bus: &[f32], out: &mut [f32], channels: usize) {
        let frames = bus.len();
        debug_assert_eq!(out.len(), frames * channels);

        let wet_left = &mut self.wet_left_buf[..frames];
        let wet_right = &mut self.wet_right_buf[..frames];
        self.wet_left.process(bus, wet_left);
        self.wet_right.process(bus, wet_right);

        for i in 0..frames {
            let left = bus[i] + wet_left[i];
            let right = bus[i] + wet_right[i];
            for ch in 0..channels {
                out[i * channels + ch] = if ch % 2 == 0 { left } else { right };
            }
        }
    }
}
