use crate::error::{InvalidConfigSnafu, Result};
use serde_derive::{Deserialize, Serialize};
use snafu::ensure;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channels {
    Mono,
    Stereo,
}

impl Channels {
    pub fn count(&self) -> usize {
        match self {
            Self::Mono => 1,
            Self::Stereo => 2,
        }
    }
}

/// A hint telling the codec what kind of signal it will be fed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Application {
    /// Speech, favoring intelligibility.
    Voip,
    /// Music or mixed content, favoring fidelity.
    Audio,
    /// Minimal algorithmic delay, at the expense of quality.
    RestrictedLowDelay,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub sample_rate: u32,
    pub channels: Channels,
    /// Samples per input frame, counting every channel of interleaved input.
    pub frame_size: usize,
    /// Frames aggregated into each encoded packet.
    pub frames_per_packet: usize,
    pub application: Application,
    /// Target bitrate applied when the codec is created. `None` keeps the codec's default.
    pub bitrate: Option<i32>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            channels: Channels::Mono,
            // 10ms at 48kHz
            frame_size: 480,
            frames_per_packet: 2,
            application: Application::Voip,
            bitrate: None,
        }
    }
}

impl EncoderConfig {
    pub fn new(sample_rate: u32, channels: Channels, frame_size: usize, frames_per_packet: usize) -> Self {
        Self {
            sample_rate,
            channels,
            frame_size,
            frames_per_packet,
            ..Default::default()
        }
    }

    /// The number of samples held by a full packet.
    pub fn packet_samples(&self) -> usize {
        self.frame_size * self.frames_per_packet
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.sample_rate > 0, InvalidConfigSnafu { reason: "sample rate must be non-zero" });
        ensure!(self.frame_size > 0, InvalidConfigSnafu { reason: "frame size must be non-zero" });
        ensure!(
            self.frame_size % self.channels.count() == 0,
            InvalidConfigSnafu {
                reason: "frame size must be a multiple of the channel count"
            }
        );
        ensure!(
            self.frames_per_packet > 0,
            InvalidConfigSnafu {
                reason: "frames per packet must be non-zero"
            }
        );
        ensure!(
            self.frame_size.checked_mul(self.frames_per_packet).is_some(),
            InvalidConfigSnafu {
                reason: "packet sample count overflows"
            }
        );
        Ok(())
    }
}
