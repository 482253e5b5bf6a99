use crate::{
    config::{Application, Channels, EncoderConfig},
    error::{CodecInitSnafu, ReleasedSnafu, Result},
};
use log::debug;
use scopeguard::{guard, ScopeGuard};

/// A request sent over a codec's control channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodecControl {
    SetVbr(bool),
    SetBitrate(i32),
    GetBitrate,
}

/// A stateful speech codec. Failures are reported as the codec's negative status codes.
pub trait Codec: Sized {
    fn create(sample_rate: u32, channels: Channels, application: Application) -> core::result::Result<Self, i32>;

    /// Applies or queries a setting. Setters return 0 on success, `GetBitrate` returns the
    /// bitrate.
    fn control(&mut self, request: CodecControl) -> core::result::Result<i32, i32>;

    /// Encodes all of `samples` as a single packet into `output`, returning the number of bytes
    /// written.
    fn encode(&mut self, samples: &[i16], output: &mut [u8]) -> core::result::Result<usize, i32>;

    fn destroy(self);
}

/// Owns a codec and destroys it exactly once, either on `release` or on drop.
pub(crate) struct CodecHandle<C: Codec> {
    codec: Option<C>,
}

impl<C: Codec> CodecHandle<C> {
    /// Creates the codec and puts it into constant bitrate mode. If anything fails after creation,
    /// the codec is destroyed before returning.
    pub fn open(config: &EncoderConfig) -> Result<Self> {
        let codec = C::create(config.sample_rate, config.channels, config.application).map_err(|code| CodecInitSnafu { code }.build())?;
        let mut codec = guard(codec, |codec| codec.destroy());

        codec
            .control(CodecControl::SetVbr(false))
            .map_err(|code| CodecInitSnafu { code }.build())?;
        if let Some(bitrate) = config.bitrate {
            codec
                .control(CodecControl::SetBitrate(bitrate))
                .map_err(|code| CodecInitSnafu { code }.build())?;
        }

        Ok(Self {
            codec: Some(ScopeGuard::into_inner(codec)),
        })
    }

    pub fn get_mut(&mut self) -> Result<&mut C> {
        self.codec.as_mut().ok_or_else(|| ReleasedSnafu.build())
    }

    pub fn is_released(&self) -> bool {
        self.codec.is_none()
    }

    pub fn release(&mut self) {
        if let Some(codec) = self.codec.take() {
            debug!("releasing codec");
            codec.destroy();
        }
    }
}

impl<C: Codec> Drop for CodecHandle<C> {
    fn drop(&mut self) {
        self.release();
    }
}
