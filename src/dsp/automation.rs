/*
Parameter Automation
====================

An Automation is a small timeline of scheduled changes for one scalar
parameter (a gain, a frequency, a filter cutoff), evaluated at absolute
device time. Voices build their envelopes out of two event kinds:

  set_value_at(v, t)        The parameter jumps to v at time t.

  target_at(v, t, tau)      From time t the parameter approaches v
                            exponentially with time constant tau:

                                value(x) = v + (v0 - v) * e^((t - x) / tau)

                            where v0 is the value the timeline had at t.
                            After one tau the value has covered ~63% of the
                            distance; after five it is effectively there.

The exponential-approach form is what gives percussive envelopes their
natural decay: a gain scheduled as set(1.0, t) then target(0.0, t, 0.1)
is a classic 100ms drum decay.

Evaluation walks the event list in order, resolving the running value at
each event's start time, so a later set_value_at cleanly cuts off an
earlier approach. Voices schedule one to three events, so the walk is
cheap enough to run per sample.

Events must be pushed in chronological order; timelines are built once
per voice trigger and never mutated afterwards.
*/

#[derive(Debug, Clone, Copy)]
enum Event {
    SetValue {
        time: f64,
        value: f32,
    },
    TargetAt {
        time: f64,
        target: f32,
        time_constant: f32,
    },
}

impl Event {
    fn time(&self) -> f64 {
        match *self {
            Event::SetValue { time, .. } | Event::TargetAt { time, .. } => time,
        }
    }
}

/// A scheduled parameter timeline, evaluated at absolute device time.
#[derive(Debug, Clone)]
pub struct Automation {
    initial: f32,
    events: Vec<Event>,
}

impl Automation {
    /// A timeline holding `value` until events say otherwise.
    pub fn new(value: f32) -> Self {
        Self {
            initial: value,
            events: Vec::new(),
        }
    }

    /// Schedule a jump to `value` at `time`.
    pub fn set_value_at(mut self, value: f32, time: f64) -> Self {
        debug_assert!(self.events.last().map_or(true, |e| e.time() <= time));
        self.events.push(Event::SetValue { time, value });
        self
    }

    /// Schedule an exponential approach toward `target` starting at `time`.
    pub fn target_at(mut self, target: f32, time: f64, time_constant: f32) -> Self {
        debug_assert!(time_constant > 0.0);
        debug_assert!(self.events.last().map_or(true, |e| e.time() <= time));
        self.events.push(Event::TargetAt {
            time,
            target,
            time_constant,
        });
        self
    }

    /// Evaluate the timeline at absolute time `t`.
    pub fn value_at(&self, t: f64) -> f32 {
        let mut value = self.initial;
        // Active approach segment: (start, start value, target, tau)
        let mut approach: Option<(f64, f32, f32, f32)> = None;

        for event in &self.events {
            let start = event.time();
            if start > t {
                break;
            }
            // Resolve the running value at this event's start
            if let Some((t0, v0, target, tau)) = approach {
                value = Self::approach_value(start, t0, v0, target, tau);
            }
            match *event {
                Event::SetValue { value: v, .. } => {
                    value = v;
                    approach = None;
                }
                Event::TargetAt {
                    time,
                    target,
                    time_constant,
                } => {
                    approach = Some((time, value, target, time_constant));
                }
            }
        }

        match approach {
            Some((t0, v0, target, tau)) => Self::approach_value(t, t0, v0, target, tau),
            None => value,
        }
    }

    #[inline]
    fn approach_value(t: f64, t0: f64, v0: f32, target: f32, tau: f32) -> f32 {
        target + (v0 - target) * (-((t - t0) / tau as f64)).exp() as f32
    }
}
