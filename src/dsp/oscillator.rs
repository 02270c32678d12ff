use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Saw,
}

impl Waveform {
    /// Evaluate the waveform at a phase in [0, 1).
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Saw => 2.0 * phase - 1.0,
        }
    }
}

/// Phase accumulator driving one waveform.
///
/// Frequency is supplied per sample so callers can sweep pitch without the
/// oscillator holding any automation state of its own.
pub struct Oscillator {
    waveform: Waveform,
    phase: f32,
}

impl Oscillator {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
        }
    }

    /// Produce one sample at the given frequency and advance the phase.
    #[inline]
    pub fn tick(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let out = self.waveform.sample(self.phase);
        self.phase += frequency / sample_rate;
        if self.phase >= 1.0 {
            self.phase -= self.phase.floor();
        }
        out
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
