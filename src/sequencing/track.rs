use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The four step-sequenced voices.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Instrument {
    Kick,
    Hats,
    Clap,
    Bass,
}

/*
A Track is the whole pattern: a tempo and one step array per instrument,
supplied wholesale at startup and never mutated.

Step semantics are instrument-dependent. Kick/Hats/Clap read any non-zero
value as a trigger; Bass reads the value as a note index (pitch), with 0
meaning silent everywhere. Step arrays can be any positive length - lookup
wraps modulo the array, so an 8-step lane loops twice as fast as a 16-step
one against the same clock.

With the `serde` feature a Track deserializes from the external pattern
format:

    { "tempo": 135, "tracks": { "Kick": [1, 0, 0, 0], ... } }

A lane that is omitted simply never triggers. Step values are not
validated; a nonsense bass note yields a nonsense frequency, not an error.
*/
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct Track {
    tempo: f64,
    #[cfg_attr(feature = "serde", serde(rename = "tracks"))]
    instruments: BTreeMap<Instrument, Vec<i32>>,
}

impl Track {
    /// A pattern with no lanes yet. Tempo must be positive.
    pub fn new(tempo: f64) -> Self {
        debug_assert!(tempo > 0.0, "tempo must be positive");
        Self {
            tempo,
            instruments: BTreeMap::new(),
        }
    }

    /// Add one instrument lane. Replaces any existing lane for that
    /// instrument; patterns are assembled once, before playback.
    pub fn with_steps(mut self, instrument: Instrument, steps: Vec<i32>) -> Self {
        self.instruments.insert(instrument, steps);
        self
    }

    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    /// Seconds per beat.
    pub fn beat_duration(&self) -> f64 {
        60.0 / self.tempo
    }

    /// Step value for an instrument at an absolute 16th-note index.
    /// Missing and empty lanes read as silent.
    pub fn hit(&self, instrument: Instrument, step_index: usize) -> i32 {
        match self.instruments.get(&instrument) {
            Some(steps) if !steps.is_empty() => steps[step_index % steps.len()],
            _ => 0,
        }
    }

    /// The instruments that have a lane, in stable order.
    pub fn instruments(&self) -> impl Iterator<Item = Instrument> + '_ {
        self.instruments.keys().copied()
    }
}
