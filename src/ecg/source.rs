#[cfg(test)]
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::ecg::synth::SyntheticEcg;
use crate::ecg::StripError;

/// One recorded lead as described by the acquisition device.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub label: String,
    pub sample_rate: f64, // Hz
}

/// Multi-lead recording: `buffer[i]` holds the millivolt samples of `channels[i]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveformBuffer {
    pub channels: Vec<Channel>,
    pub buffer: Vec<Vec<f64>>,
}

impl WaveformBuffer {
    pub fn validate(&self) -> Result<(), StripError> {
        if self.channels.len() != self.buffer.len() {
            return Err(StripError::ChannelMismatch {
                channels: self.channels.len(),
                buffers: self.buffer.len(),
            });
        }
        for channel in &self.channels {
            if !channel.sample_rate.is_finite() || channel.sample_rate <= 0.0 {
                return Err(StripError::InvalidSampleRate {
                    label: channel.label.clone(),
                    rate: channel.sample_rate,
                });
            }
        }
        Ok(())
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    pub fn labels(&self) -> Vec<String> {
        self.channels.iter().map(|c| c.label.clone()).collect()
    }
}

/// Something that can hand over a recording on demand. `Ok(None)` means
/// "nothing to show", which is not an error.
pub trait WaveformSource {
    fn load(&mut self) -> Result<Option<WaveformBuffer>, StripError>;
}

#[cfg(test)]
/// In-memory source for deterministic playback in tests.
pub struct ManualSource {
    queue: VecDeque<WaveformBuffer>,
}

#[cfg(test)]
impl ManualSource {
    pub fn new(buffers: impl IntoIterator<Item = WaveformBuffer>) -> Self {
        Self {
            queue: buffers.into_iter().collect(),
        }
    }
}

#[cfg(test)]
impl WaveformSource for ManualSource {
    fn load(&mut self) -> Result<Option<WaveformBuffer>, StripError> {
        Ok(self.queue.pop_front())
    }
}

/// Reads a `{ "channels": [...], "buffer": [[...], ...] }` document.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WaveformSource for JsonFileSource {
    fn load(&mut self) -> Result<Option<WaveformBuffer>, StripError> {
        let text = fs::read_to_string(&self.path)?;
        let waveform: WaveformBuffer = serde_json::from_str(&text)?;
        log::info!(
            "loaded {} channels from {}",
            waveform.num_channels(),
            self.path.display()
        );
        Ok(Some(waveform))
    }
}

/// Demo recording generated on the fly.
pub struct SyntheticSource {
    generator: SyntheticEcg,
    seconds: f64,
}

impl SyntheticSource {
    pub fn new(generator: SyntheticEcg, seconds: f64) -> Self {
        Self { generator, seconds }
    }
}

impl WaveformSource for SyntheticSource {
    fn load(&mut self) -> Result<Option<WaveformBuffer>, StripError> {
        Ok(Some(self.generator.twelve_lead(self.seconds)))
    }
}
