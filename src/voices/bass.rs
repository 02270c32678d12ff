//! Bass voice.
//!
//! Two unison sawtooths at the note's equal-tempered frequency into a
//! hard-resonant low-pass (Q = 25) whose cutoff sweeps from 300 Hz toward
//! 3 kHz - the rising "wow". The 100 ms gain decay keeps it plucky.

use crate::dsp::automation::Automation;
use crate::dsp::oscillator::Waveform;
use crate::graph::{extensions::NodeExt, node::note_to_freq, oscillator::OscNode, GraphNode};

/// Build one bass note anchored at absolute device time `t`.
///
/// `note` is a pitch index (69 = A4 = 440 Hz). Values outside the useful
/// range produce out-of-range frequencies rather than errors.
pub fn bass(t: f64, note: i32) -> Box<dyn GraphNode> {
    let freq = note_to_freq(note);

    let unison = OscNode::new(Waveform::Saw, Automation::new(freq))
        .start_at(t)
        .stop_at(t + 1.0)
        .layer(
            OscNode::new(Waveform::Saw, Automation::new(freq))
                .start_at(t)
                .stop_at(t + 1.0),
        );

    unison
        .gain(
            Automation::new(1.0)
                .set_value_at(1.0, t)
                .target_at(0.0, t, 0.1),
        )
        .lowpass(
            Automation::new(300.0)
                .set_value_at(300.0, t)
                .target_at(3_000.0, t, 0.05),
            25.0,
        )
        .gain(Automation::new(0.5))
        .boxed()
}
