pub mod scheduler;
pub mod track;

pub use scheduler::{DeviceClock, LookaheadScheduler, TriggerSink, LOOKAHEAD_BEATS, TICK_INTERVAL};
pub use track::{Instrument, Track};
