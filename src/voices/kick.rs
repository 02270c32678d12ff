//! Kick drum voice.
//!
//! Two layered oscillators. The body is a sine that starts at 100 Hz and
//! falls exponentially toward 30 Hz - the fast pitch drop is what reads
//! as "punch". A fixed 40 Hz square, gone within about 10 ms, adds the
//! percussive click at the attack.

use crate::dsp::automation::Automation;
use crate::dsp::oscillator::Waveform;
use crate::graph::{extensions::NodeExt, oscillator::OscNode, GraphNode};

/// Build one kick hit anchored at absolute device time `t`.
pub fn kick(t: f64) -> Box<dyn GraphNode> {
    let body = OscNode::new(
        Waveform::Sine,
        Automation::new(100.0).target_at(30.0, t, 0.15),
    )
    .start_at(t)
    .stop_at(t + 1.0)
    .gain(
        Automation::new(1.0)
            .set_value_at(1.0, t)
            .target_at(0.0, t, 0.1),
    );

    let click = OscNode::new(Waveform::Square, Automation::new(40.0))
        .start_at(t)
        .stop_at(t + 1.0)
        .gain(
            Automation::new(0.5)
                .set_value_at(0.5, t)
                .target_at(0.0, t, 0.01),
        );

    body.layer(click).boxed()
}
