//! The audio-callback side of the system.
//!
//! An [`Engine`] lives inside the output stream's callback and owns all
//! render state: the live voice list, the output routing, and the device
//! clock. Its counterpart [`EngineHandle`] lives on the control side and
//! exposes the two things the rest of the system needs: the clock reading
//! and fire-and-forget voice submission over a lock-free ring.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use rtrb::{Consumer, Producer, RingBuffer};
use tracing::warn;

use crate::{
    dsp::buffers,
    graph::{GraphNode, RenderCtx},
    sequencing::DeviceClock,
    MAX_BLOCK_SIZE,
};

pub mod routing;

use routing::OutputBus;

/// Submitted-but-not-yet-adopted voices the ring can hold. Sixteen steps
/// of four voices fits many times over; overflow drops voices.
const VOICE_QUEUE_SIZE: usize = 256;

/// Renders submitted voices against the device clock.
pub struct Engine {
    sample_rate: f32,
    rx: Consumer<Box<dyn GraphNode>>,
    voices: Vec<Box<dyn GraphNode>>,
    bus: OutputBus,
    /// Frames rendered so far; the device clock is this divided by the
    /// sample rate.
    frames: Arc<AtomicU64>,
    voice_buf: Vec<f32>,
    mix_buf: Vec<f32>,
}

/// Control-side handle: device clock reads and voice submission.
pub struct EngineHandle {
    tx: Producer<Box<dyn GraphNode>>,
    frames: Arc<AtomicU64>,
    sample_rate: f32,
}

/// A cheap, cloneable reading of the engine's device clock.
#[derive(Clone)]
pub struct EngineClock {
    frames: Arc<AtomicU64>,
    sample_rate: f32,
}

impl DeviceClock for EngineClock {
    fn now(&self) -> f64 {
        self.frames.load(Ordering::Relaxed) as f64 / self.sample_rate as f64
    }
}

impl Engine {
    pub fn new(sample_rate: f32) -> (Self, EngineHandle) {
        let (tx, rx) = RingBuffer::new(VOICE_QUEUE_SIZE);
        let frames = Arc::new(AtomicU64::new(0));
        let impulse = buffers::reverb_impulse(sample_rate);

        let engine = Self {
            sample_rate,
            rx,
            voices: Vec::with_capacity(64),
            bus: OutputBus::new(&impulse),
            frames: Arc::clone(&frames),
            voice_buf: vec![0.0; MAX_BLOCK_SIZE],
            mix_buf: vec![0.0; MAX_BLOCK_SIZE],
        };
        let handle = EngineHandle {
            tx,
            frames,
            sample_rate,
        };
        (engine, handle)
    }

    /// Render into an interleaved output buffer and advance the clock.
    pub fn render(&mut self, data: &mut [f32], channels: usize) {
        // Adopt newly submitted voices
        while let Ok(voice) = self.rx.pop() {
            self.voices.push(voice);
        }

        let total_frames = data.len() / channels;
        let mut written = 0;
        while written < total_frames {
            let frames = (total_frames - written).min(MAX_BLOCK_SIZE);
            let time = self.frames.load(Ordering::Relaxed) as f64 / self.sample_rate as f64;
            let ctx = RenderCtx::new(self.sample_rate, time);

            self.mix_buf[..frames].fill(0.0);
            for voice in self.voices.iter_mut() {
                let block = &mut self.voice_buf[..frames];
                block.fill(0.0);
                voice.render_block(block, &ctx);
                for (m, &s) in self.mix_buf[..frames].iter_mut().zip(block.iter()) {
                    *m += s;
                }
            }

            // Retire voices that can no longer sound
            let end = ctx.end_time(frames);
            self.voices.retain(|voice| !voice.is_finished(end));

            let out = &mut data[written * channels..(written + frames) * channels];
            self.bus.process(&self.mix_buf[..frames], out, channels);

            self.frames.fetch_add(frames as u64, Ordering::Relaxed);
            written += frames;
        }
    }

    /// Number of live voices (for diagnostics).
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }
}

impl EngineHandle {
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Current device time in seconds.
    pub fn now(&self) -> f64 {
        self.frames.load(Ordering::Relaxed) as f64 / self.sample_rate as f64
    }

    /// A clock that can be read independently of this handle.
    pub fn clock(&self) -> EngineClock {
        EngineClock {
            frames: Arc::clone(&self.frames),
            sample_rate: self.sample_rate,
        }
    }

    /// Hand a finished voice subgraph to the engine. Fire and forget:
    /// nothing can retract a submitted voice. A full ring drops the voice.
    pub fn submit(&mut self, voice: Box<dyn GraphNode>) {
        if self.tx.push(voice).is_err() {
            warn!("voice ring full; dropping a voice");
        }
    }
}

impl DeviceClock for EngineHandle {
    fn now(&self) -> f64 {
        EngineHandle::now(self)
    }
}
