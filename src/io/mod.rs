// Purpose - external interfaces: decoded sample input.

use std::path::Path;
use std::sync::Arc;

/// Error loading a sample from disk.
#[derive(Debug)]
pub enum SampleError {
    Wav(hound::Error),
}

impl std::fmt::Display for SampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleError::Wav(err) => write!(f, "failed to read WAV sample: {err}"),
        }
    }
}

impl std::error::Error for SampleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SampleError::Wav(err) => Some(err),
        }
    }
}

impl From<hound::Error> for SampleError {
    fn from(err: hound::Error) -> Self {
        SampleError::Wav(err)
    }
}

/// Load a WAV file as a mono f32 buffer.
///
/// Integer formats are normalized to [-1, 1]; multichannel files are
/// downmixed by averaging. The result feeds the clap voice directly.
pub fn load_wav(path: impl AsRef<Path>) -> Result<Arc<[f32]>, SampleError> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1_i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
    };

    let channels = spec.channels as usize;
    let mono: Vec<f32> = if channels <= 1 {
        samples
    } else {
        samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    };

    Ok(mono.into())
}
