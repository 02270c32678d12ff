use std::f32::consts::TAU;

/*
State-variable filter, TPT form.

One topology yields low-pass and high-pass responses from the same two
integrator states. Resonance is expressed as Q: the damping coefficient of
the loop is k = 1/Q, so Q = 0.707 is the flat Butterworth response and
large Q (the bass voice runs at 25) gives a strong resonant peak at the
cutoff.

Cutoff can change every sample; the warped coefficient g is recomputed on
each call so swept cutoffs track exactly.
*/

#[derive(Debug, Clone, Copy)]
pub enum FilterMode {
    LowPass,
    HighPass,
}

pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    pub cutoff_hz: f32,
    pub q: f32,
    mode: FilterMode,
}

impl SVFilter {
    pub fn lowpass(cutoff_hz: f32, q: f32) -> Self {
        Self::new(FilterMode::LowPass, cutoff_hz, q)
    }

    pub fn highpass(cutoff_hz: f32, q: f32) -> Self {
        Self::new(FilterMode::HighPass, cutoff_hz, q)
    }

    fn new(mode: FilterMode, cutoff_hz: f32, q: f32) -> Self {
        debug_assert!(q > 0.0);
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            q,
            mode,
        }
    }

    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = cutoff_hz;
    }

    /// Process one sample at the filter's current cutoff.
    #[inline]
    pub fn process(&mut self, sample: f32, sample_rate: f32) -> f32 {
        // Prewarp the cutoff so the digital response hits the analog
        // frequency exactly. Clamp below Nyquist to keep tan() sane.
        let cutoff = self.cutoff_hz.clamp(1.0, sample_rate * 0.49);
        let g = (TAU * cutoff / (2.0 * sample_rate)).tan();
        let k = 1.0 / self.q;

        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        match self.mode {
            FilterMode::LowPass => v2,
            FilterMode::HighPass => sample - k * v1 - v2,
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}
