use crate::{Application, Channels, Codec, CodecControl};

// Sentinels libopus reports from OPUS_GET_BITRATE.
const OPUS_AUTO: i32 = -1000;
const OPUS_BITRATE_MAX: i32 = -1;

/// A `Codec` backed by libopus.
pub struct OpusCodec {
    encoder: ::opus::Encoder,
}

fn status(err: ::opus::Error) -> i32 {
    err.code() as i32
}

impl Codec for OpusCodec {
    fn create(sample_rate: u32, channels: Channels, application: Application) -> Result<Self, i32> {
        let channels = match channels {
            Channels::Mono => ::opus::Channels::Mono,
            Channels::Stereo => ::opus::Channels::Stereo,
        };
        let application = match application {
            Application::Voip => ::opus::Application::Voip,
            Application::Audio => ::opus::Application::Audio,
            Application::RestrictedLowDelay => ::opus::Application::LowDelay,
        };
        let encoder = ::opus::Encoder::new(sample_rate, channels, application).map_err(status)?;
        Ok(Self { encoder })
    }

    fn control(&mut self, request: CodecControl) -> Result<i32, i32> {
        match request {
            CodecControl::SetVbr(enabled) => self.encoder.set_vbr(enabled).map(|_| 0).map_err(status),
            CodecControl::SetBitrate(bitrate) => self.encoder.set_bitrate(::opus::Bitrate::Bits(bitrate)).map(|_| 0).map_err(status),
            CodecControl::GetBitrate => self
                .encoder
                .get_bitrate()
                .map(|bitrate| match bitrate {
                    ::opus::Bitrate::Bits(bits) => bits,
                    ::opus::Bitrate::Max => OPUS_BITRATE_MAX,
                    ::opus::Bitrate::Auto => OPUS_AUTO,
                })
                .map_err(status),
        }
    }

    fn encode(&mut self, samples: &[i16], output: &mut [u8]) -> Result<usize, i32> {
        self.encoder.encode(samples, output).map_err(status)
    }

    fn destroy(self) {
        drop(self.encoder);
    }
}
