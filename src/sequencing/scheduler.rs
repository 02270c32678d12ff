use std::time::Duration;

use tracing::trace;

use crate::sequencing::track::{Instrument, Track};

/*
Lookahead Scheduler
===================

The scheduler's job is to keep dispatched audio phase-locked to the device
clock while being driven by a coarse, jittery software timer. The trick is
to separate two times:

  - WHEN WE DECIDE: a fixed-cadence tick (TICK_INTERVAL) on an ordinary
    thread. Ticks can be late; nobody cares.

  - WHEN IT SOUNDS: absolute device timestamps, computed from the device
    clock captured at start(). These never depend on tick timing.

Each pass looks at the logical beat clock. If the upcoming beat boundary
has entered the lookahead window, the pass dispatches all four 16th-note
subdivisions of that beat - each stamped with its exact future device
time - and advances the boundary by one whole beat. A late tick just means
the decision is made later; the timestamps come out the same, so the
device still renders exactly on time.

One beat is committed per pass at most, and the boundary only ever moves
forward, so no step can be dispatched twice. A pass that finds the window
short of the boundary does nothing. There is no recovery path: if the
tick loop stalls, playback silently stops at the last committed beat.

The step index is derived by rounding the step's beat position against
the 16th-note grid rather than by counting: index = round(beats / 0.25).
*/

/// Forward window, in beats, within which a beat boundary is committed.
pub const LOOKAHEAD_BEATS: f64 = 0.5;

/// Fixed delay between scheduling passes. Much smaller than the lookahead
/// window so jitter in one tick is absorbed by the next.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// 16th notes per beat.
const SUBDIVISIONS: usize = 4;
/// One 16th note, in beats.
const STEP_BEATS: f64 = 1.0 / SUBDIVISIONS as f64;

/// A monotonically increasing reading of the audio device's clock, in
/// seconds. Ground truth for all timing decisions.
pub trait DeviceClock {
    fn now(&self) -> f64;
}

/// Receives dispatched triggers. The production sink builds and submits
/// voice subgraphs; tests record the calls.
pub trait TriggerSink {
    /// `at` is an absolute device timestamp; `value` is the raw step value
    /// (guaranteed non-zero).
    fn trigger(&mut self, instrument: Instrument, at: f64, value: i32);
}

/// Dispatches pattern steps ahead of the device clock.
///
/// Two states: stopped (initial) and running. `start` transitions to
/// running and performs the first pass immediately; there is no way back.
pub struct LookaheadScheduler {
    track: Track,
    /// Device time at playback start.
    origin: f64,
    /// Beats elapsed at which the next unscheduled beat begins.
    /// Monotonically non-decreasing, advanced in whole beats.
    next_boundary: f64,
    running: bool,
}

impl LookaheadScheduler {
    pub fn new(track: Track) -> Self {
        Self {
            track,
            origin: 0.0,
            next_boundary: 0.0,
            running: false,
        }
    }

    /// Anchor the beat clock at the current device time and begin
    /// dispatching. The first scheduling pass runs before this returns.
    pub fn start(&mut self, clock: &impl DeviceClock, sink: &mut impl TriggerSink) {
        self.origin = clock.now();
        self.next_boundary = 0.0;
        self.running = true;
        self.pass(clock, sink);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Beats elapsed since `start`, derived from the device clock.
    pub fn elapsed_beats(&self, clock: &impl DeviceClock) -> f64 {
        (clock.now() - self.origin) / self.track.beat_duration()
    }

    /// Beats' worth of pattern committed so far.
    pub fn next_boundary(&self) -> f64 {
        self.next_boundary
    }

    /// One scheduling pass. Called once per tick; commits at most one
    /// beat of dispatches.
    pub fn pass(&mut self, clock: &impl DeviceClock, sink: &mut impl TriggerSink) {
        if !self.running {
            return;
        }

        let current = self.elapsed_beats(clock);
        if current + LOOKAHEAD_BEATS <= self.next_boundary {
            return;
        }

        let beat_duration = self.track.beat_duration();
        for instrument in self.track.instruments() {
            for k in 0..SUBDIVISIONS {
                let step_beats = self.next_boundary + k as f64 * STEP_BEATS;
                let step_index = (step_beats / STEP_BEATS).round() as usize;
                let value = self.track.hit(instrument, step_index);
                if value != 0 {
                    let at = self.origin + step_beats * beat_duration;
                    trace!(?instrument, step_index, at, value, "dispatch");
                    sink.trigger(instrument, at, value);
                }
            }
        }

        self.next_boundary += 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ManualClock {
        now: std::cell::Cell<f64>,
    }

    impl ManualClock {
        fn at(now: f64) -> Self {
            Self {
                now: std::cell::Cell::new(now),
            }
        }

        fn advance(&self, dt: f64) {
            self.now.set(self.now.get() + dt);
        }
    }

    impl DeviceClock for ManualClock {
        fn now(&self) -> f64 {
            self.now.get()
        }
    }

    #[derive(Default)]
    struct Recorder {
        triggers: Vec<(Instrument, f64, i32)>,
    }

    impl TriggerSink for Recorder {
        fn trigger(&mut self, instrument: Instrument, at: f64, value: i32) {
            self.triggers.push((instrument, at, value));
        }
    }

    fn four_on_floor(tempo: f64) -> Track {
        Track::new(tempo).with_steps(Instrument::Kick, vec![1, 0, 0, 0])
    }

    #[test]
    fn start_commits_the_first_beat_immediately() {
        let clock = ManualClock::at(12.5);
        let mut sink = Recorder::default();
        let mut scheduler = LookaheadScheduler::new(four_on_floor(120.0));

        scheduler.start(&clock, &mut sink);

        assert_eq!(scheduler.next_boundary(), 1.0);
        assert_eq!(sink.triggers.len(), 1);
        let (instrument, at, value) = sink.triggers[0];
        assert_eq!(instrument, Instrument::Kick);
        assert_eq!(at, 12.5); // beat zero lands exactly at the origin
        assert_eq!(value, 1);
    }

    #[test]
    fn pass_waits_for_the_window_to_reach_the_boundary() {
        let clock = ManualClock::at(0.0);
        let mut sink = Recorder::default();
        let mut scheduler = LookaheadScheduler::new(four_on_floor(60.0)); // 1s beats

        scheduler.start(&clock, &mut sink);
        assert_eq!(sink.triggers.len(), 1);

        // Window is 0.5 beats; boundary 1.0 is reached once current > 0.5
        clock.advance(0.4);
        scheduler.pass(&clock, &mut sink);
        assert_eq!(sink.triggers.len(), 1, "window short of boundary");

        clock.advance(0.2); // current = 0.6 beats
        scheduler.pass(&clock, &mut sink);
        assert_eq!(sink.triggers.len(), 2);
        assert_eq!(sink.triggers[1].1, 1.0); // origin 0 + one 1s beat
    }

    #[test]
    fn late_ticks_do_not_shift_timestamps() {
        let clock = ManualClock::at(3.0);
        let mut sink = Recorder::default();
        let mut scheduler = LookaheadScheduler::new(four_on_floor(120.0)); // 0.5s beats

        scheduler.start(&clock, &mut sink);
        // A badly delayed tick: two full beats late
        clock.advance(1.3);
        scheduler.pass(&clock, &mut sink);
        scheduler.pass(&clock, &mut sink);
        scheduler.pass(&clock, &mut sink);

        let times: Vec<f64> = sink.triggers.iter().map(|&(_, at, _)| at).collect();
        // Timestamps stay on the grid anchored at the origin, regardless
        // of when the decisions were made
        assert_eq!(times, vec![3.0, 3.5, 4.0, 4.5]);
    }

    #[test]
    fn stopped_scheduler_does_nothing() {
        let clock = ManualClock::at(0.0);
        let mut sink = Recorder::default();
        let mut scheduler = LookaheadScheduler::new(four_on_floor(120.0));

        scheduler.pass(&clock, &mut sink);
        assert!(sink.triggers.is_empty());
        assert!(!scheduler.is_running());
    }

    #[test]
    fn bass_values_pass_through_as_notes() {
        let track = Track::new(120.0).with_steps(Instrument::Bass, vec![36, 0, 48, 0]);
        let clock = ManualClock::at(0.0);
        let mut sink = Recorder::default();
        let mut scheduler = LookaheadScheduler::new(track);

        scheduler.start(&clock, &mut sink);

        let values: Vec<i32> = sink.triggers.iter().map(|&(_, _, v)| v).collect();
        assert_eq!(values, vec![36, 48]);
    }
}
