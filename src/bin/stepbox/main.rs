//! stepbox - lookahead drum machine
//!
//! Run with: cargo run [path/to/clap.wav]

use std::sync::Arc;

use color_eyre::eyre::Result;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use stepbox::{
    io,
    runtime::Player,
    sequencing::{Instrument, Track},
};

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let clap_sample: Arc<[f32]> = match std::env::args().nth(1) {
        Some(path) => io::load_wav(&path)?,
        None => {
            warn!("no clap sample given; substituting a short noise burst");
            let mut rng = fastrand::Rng::new();
            (0..2_400)
                .map(|_| rng.f32() * 2.0 - 1.0)
                .collect::<Vec<f32>>()
                .into()
        }
    };

    Player::new(demo_track(), clap_sample).run()
}

/// The stock two-bar pattern at 135 BPM.
fn demo_track() -> Track {
    #[rustfmt::skip]
    let track = Track::new(135.0)
        .with_steps(Instrument::Kick, vec![
            1, 0, 0, 0, 1, 0, 0, 0,
            1, 0, 0, 0, 1, 0, 0, 0,
            1, 0, 0, 0, 1, 0, 0, 0,
            1, 0, 0, 0, 1, 0, 0, 0,
        ])
        .with_steps(Instrument::Hats, vec![
            0, 0, 1, 0, 0, 0, 1, 0,
            0, 0, 1, 0, 0, 0, 1, 1,
            0, 0, 1, 0, 0, 0, 1, 0,
            0, 0, 1, 0, 0, 0, 1, 0,
        ])
        .with_steps(Instrument::Clap, vec![
            0, 0, 0, 0, 1, 0, 0, 0,
            0, 0, 0, 0, 1, 0, 0, 0,
            0, 0, 0, 0, 1, 0, 0, 0,
            0, 0, 0, 0, 1, 0, 0, 0,
        ])
        .with_steps(Instrument::Bass, vec![
            36, 0, 38, 36, 36, 38, 41, 0,
            36, 60, 36, 0, 39, 0, 48, 0,
            36, 0, 24, 60, 40, 40, 24, 24,
            36, 60, 36, 0, 39, 0, 48, 0,
        ]);
    track
}
