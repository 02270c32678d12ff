//! The four synthesis recipes and the rack that fires them.
//!
//! Each recipe is a plain function from an absolute trigger timestamp
//! (plus a note value for bass) to a finished subgraph. Recipes share no
//! mutable state between calls; a voice is built, parametrized, and
//! submitted in one scoped operation, then forgotten.

mod bass;
mod clap;
mod hats;
mod kick;

pub use bass::bass;
pub use clap::clap;
pub use hats::hats;
pub use kick::kick;

use std::sync::Arc;

use crate::engine::EngineHandle;
use crate::sequencing::{Instrument, TriggerSink};

/// Owns the per-process voice resources (the clap sample, the engine
/// handle) and turns scheduler dispatches into submitted subgraphs.
pub struct VoiceRack {
    handle: EngineHandle,
    clap_sample: Arc<[f32]>,
    sample_rate: f32,
}

impl VoiceRack {
    /// `clap_sample` is the externally loaded recording; supplying it is
    /// the caller's responsibility and happens before playback starts.
    pub fn new(handle: EngineHandle, clap_sample: Arc<[f32]>) -> Self {
        let sample_rate = handle.sample_rate();
        Self {
            handle,
            clap_sample,
            sample_rate,
        }
    }
}

impl TriggerSink for VoiceRack {
    fn trigger(&mut self, instrument: Instrument, at: f64, value: i32) {
        let voice = match instrument {
            Instrument::Kick => kick(at),
            Instrument::Hats => hats(at, self.sample_rate),
            Instrument::Clap => clap(at, Arc::clone(&self.clap_sample)),
            Instrument::Bass => bass(at, value),
        };
        self.handle.submit(voice);
    }
}
