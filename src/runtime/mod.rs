//! Device playback runtime.
//!
//! Wires the pieces together against a real output device: the engine
//! renders inside the cpal callback, and the calling thread becomes the
//! scheduler's tick loop. The tick cadence is fixed; timestamps come from
//! the engine's own clock, so a sluggish tick never shifts the audio.
//!
//! # Example
//!
//! ```ignore
//! use stepbox::{runtime::Player, sequencing::{Instrument, Track}};
//!
//! let track = Track::new(135.0)
//!     .with_steps(Instrument::Kick, vec![1, 0, 0, 0]);
//! Player::new(track, clap_sample).run()?;
//! ```

use std::sync::Arc;
use std::thread;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{error, info};

use crate::engine::Engine;
use crate::sequencing::{LookaheadScheduler, Track, TICK_INTERVAL};
use crate::voices::VoiceRack;

/// Plays one track against the default output device, forever.
pub struct Player {
    track: Track,
    clap_sample: Arc<[f32]>,
}

impl Player {
    pub fn new(track: Track, clap_sample: Arc<[f32]>) -> Self {
        Self { track, clap_sample }
    }

    /// Open the device, start the stream, and run the scheduler loop on
    /// the calling thread. Does not return while playback is healthy.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        info!(
            tempo = self.track.tempo(),
            sample_rate, channels, "starting playback"
        );

        let (mut engine, handle) = Engine::new(sample_rate);
        let clock = handle.clock();

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| engine.render(data, channels),
                |err| error!("audio stream error: {err}"),
                None,
            )
            .wrap_err("failed to build output stream")?;
        stream.play().wrap_err("failed to start output stream")?;

        let mut rack = VoiceRack::new(handle, self.clap_sample);
        let mut scheduler = LookaheadScheduler::new(self.track);
        scheduler.start(&clock, &mut rack);

        // The tick loop IS the lifetime of playback: the stream stays
        // alive because it is still in scope here.
        loop {
            thread::sleep(TICK_INTERVAL);
            scheduler.pass(&clock, &mut rack);
        }
    }
}
