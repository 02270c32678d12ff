use std::collections::VecDeque;
use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

/*
Uniform-partitioned FFT convolution.

The impulse response is cut into equal partitions of PARTITION samples and
each partition is transformed once at construction. At run time the input
stream is chunked into PARTITION-sample blocks; each block's spectrum is
pushed into a frequency-domain delay line, and the output block is

    IFFT( sum over i of  X[t - i] * H[i] )

overlap-added with the tail of the previous block. Every term of the sum
aligns at the current block start, so a single overlap buffer of
PARTITION samples suffices.

All FFT buffers are allocated up front; process() does no allocation. The
price of block processing is PARTITION samples of latency on the output,
which for a reverb wet path reads as pre-delay.
*/

/// Partition length in samples. Output is delayed by exactly this much.
pub const PARTITION: usize = 512;
const FFT_SIZE: usize = 2 * PARTITION;

pub struct Convolver {
    fft: Arc<dyn Fft<f32>>,
    ifft: Arc<dyn Fft<f32>>,
    /// Impulse response partition spectra, earliest first.
    partitions: Vec<Vec<Complex<f32>>>,
    /// Frequency-domain delay line of recent input spectra (ring).
    fdl: Vec<Vec<Complex<f32>>>,
    /// Ring slot holding the most recent input spectrum.
    fdl_pos: usize,
    /// Input samples collected toward the next block.
    pending: Vec<f32>,
    /// Tail of the previous output block, to be overlap-added.
    overlap: Vec<f32>,
    /// Finished output samples not yet handed to the caller.
    ready: VecDeque<f32>,
    time_buf: Vec<Complex<f32>>,
    freq_acc: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl Convolver {
    pub fn new(impulse: &[f32]) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(FFT_SIZE);
        let ifft = planner.plan_fft_inverse(FFT_SIZE);

        let scratch_len = fft
            .get_inplace_scratch_len()
            .max(ifft.get_inplace_scratch_len());
        let mut scratch = vec![Complex::default(); scratch_len];

        // Transform each impulse partition once.
        let chunks = impulse.chunks(PARTITION);
        let mut partitions = Vec::with_capacity(chunks.len().max(1));
        for chunk in chunks {
            let mut buf = vec![Complex::default(); FFT_SIZE];
            for (slot, &s) in buf.iter_mut().zip(chunk) {
                slot.re = s;
            }
            fft.process_with_scratch(&mut buf, &mut scratch);
            partitions.push(buf);
        }
        if partitions.is_empty() {
            partitions.push(vec![Complex::default(); FFT_SIZE]);
        }

        let fdl = vec![vec![Complex::default(); FFT_SIZE]; partitions.len()];

        let mut ready = VecDeque::with_capacity(2 * PARTITION);
        // One partition of latency: the first block of output only exists
        // once the first full input block has been transformed.
        ready.extend(std::iter::repeat(0.0).take(PARTITION));

        Self {
            fft,
            ifft,
            partitions,
            fdl,
            fdl_pos: 0,
            pending: Vec::with_capacity(PARTITION),
            overlap: vec![0.0; PARTITION],
            ready,
            time_buf: vec![Complex::default(); FFT_SIZE],
            freq_acc: vec![Complex::default(); FFT_SIZE],
            scratch,
        }
    }

    /// Convolve a stream chunk. `output` receives exactly `input.len()`
    /// samples, delayed by [`PARTITION`] relative to the input.
    pub fn process(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(input.len(), output.len());
        for (&sample, out) in input.iter().zip(output.iter_mut()) {
            self.pending.push(sample);
            if self.pending.len() == PARTITION {
                self.flush_block();
            }
            // A block is flushed every PARTITION pushes and yields PARTITION
            // samples, so the queue never runs dry after the prefill.
            *out = self.ready.pop_front().unwrap_or(0.0);
        }
    }

    fn flush_block(&mut self) {
        // Transform the newest input block into the delay line
        for slot in self.time_buf.iter_mut() {
            *slot = Complex::default();
        }
        for (slot, &s) in self.time_buf.iter_mut().zip(&self.pending) {
            slot.re = s;
        }
        self.pending.clear();

        self.fft
            .process_with_scratch(&mut self.time_buf, &mut self.scratch);
        self.fdl_pos = (self.fdl_pos + 1) % self.fdl.len();
        self.fdl[self.fdl_pos].copy_from_slice(&self.time_buf);

        // Multiply-accumulate: newest spectrum against the earliest partition
        for slot in self.freq_acc.iter_mut() {
            *slot = Complex::default();
        }
        let n = self.fdl.len();
        for (i, partition) in self.partitions.iter().enumerate() {
            let spectrum = &self.fdl[(self.fdl_pos + n - i) % n];
            for ((acc, &x), &h) in self.freq_acc.iter_mut().zip(spectrum).zip(partition) {
                *acc += x * h;
            }
        }

        self.ifft
            .process_with_scratch(&mut self.freq_acc, &mut self.scratch);

        // First half + previous tail goes out; second half becomes the tail
        let scale = 1.0 / FFT_SIZE as f32;
        for i in 0..PARTITION {
            self.ready
                .push_back(self.freq_acc[i].re * scale + self.overlap[i]);
            self.overlap[i] = self.freq_acc[PARTITION + i].re * scale;
        }
    }
}
