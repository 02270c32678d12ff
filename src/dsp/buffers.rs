//! Process-wide cached buffers.
//!
//! Two pieces of signal material are shared by every voice and every
//! playback run: the white-noise burst behind the hats voice and the
//! synthesized impulse response behind the reverb. Both are built lazily,
//! exactly once, and are read-only afterwards; `OnceLock` makes that safe
//! even if the audio and control threads race on first use.
//!
//! The sample rate is captured on first construction. A process only ever
//! talks to one output device here, so later calls at a different rate
//! intentionally return the original buffer.

use std::sync::{Arc, OnceLock};

static NOISE_BURST: OnceLock<Arc<[f32]>> = OnceLock::new();
static REVERB_IMPULSE: OnceLock<Arc<ImpulseResponse>> = OnceLock::new();

/// Stereo impulse response for the wet path.
pub struct ImpulseResponse {
    pub left: Vec<f32>,
    pub right: Vec<f32>,
}

/// 100ms of white noise, shared verbatim by every hats hit.
pub fn noise_burst(sample_rate: f32) -> Arc<[f32]> {
    NOISE_BURST
        .get_or_init(|| {
            let len = (sample_rate / 10.0) as usize;
            let mut rng = fastrand::Rng::new();
            (0..len)
                .map(|_| rng.f32() * 2.0 - 1.0)
                .collect::<Vec<f32>>()
                .into()
        })
        .clone()
}

/// Half a second of exponentially decaying noise per channel.
///
/// The two channels are independent, which is what makes the reverb read
/// as a space rather than a mono echo.
pub fn reverb_impulse(sample_rate: f32) -> Arc<ImpulseResponse> {
    REVERB_IMPULSE
        .get_or_init(|| {
            let len = (0.5 * sample_rate) as usize;
            let decay = 0.5;
            let mut rng = fastrand::Rng::new();
            let mut channel = || -> Vec<f32> {
                (0..len)
                    .map(|i| {
                        let envelope = (1.0 - i as f32 / len as f32).powf(decay);
                        (rng.f32() * 2.0 - 1.0) * envelope
                    })
                    .collect()
            };
            Arc::new(ImpulseResponse {
                left: channel(),
                right: channel(),
            })
        })
        .clone()
}
