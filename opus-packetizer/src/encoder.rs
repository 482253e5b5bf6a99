use crate::{
    codec::{Codec, CodecControl, CodecHandle},
    config::EncoderConfig,
    error::{CodecControlSnafu, CodecEncodeSnafu, InvalidFrameLengthSnafu, OverflowSnafu, PayloadTooLargeSnafu, ReleasedSnafu, Result, UnderflowSnafu},
    header::MAX_PAYLOAD_BYTES,
    packet::EncodedPacket,
    EncoderError,
};
use av_traits::{AudioEncoder, PacketSink};
use log::{debug, trace, warn};
use snafu::ensure;

/// Buffers fixed-size frames until a packet's worth has accumulated, then encodes them in one
/// codec call. Encoded packets stay pending until drained into a `PacketSink`.
///
/// The encoder is meant to be driven by a single owner: push frames with `encode`, drain whenever
/// `is_ready` returns true, call `terminate` at the end of a stream to flush a short final packet,
/// and `release` once done. Dropping the encoder also releases the codec.
pub struct FrameAggregatingEncoder<C: Codec> {
    codec: CodecHandle<C>,
    config: EncoderConfig,
    sample_buffer: Box<[i16]>,
    output_buffer: Box<[u8]>,
    buffered_frames: usize,
    encoded_len: usize,
    terminated: bool,
}

impl<C: Codec> FrameAggregatingEncoder<C> {
    pub fn new(config: EncoderConfig) -> Result<Self> {
        config.validate()?;
        let codec = CodecHandle::open(&config)?;

        debug!(
            "created encoder: sample_rate={}, channels={}, frame_size={}, frames_per_packet={}",
            config.sample_rate,
            config.channels.count(),
            config.frame_size,
            config.frames_per_packet
        );

        Ok(Self {
            codec,
            sample_buffer: vec![0; config.packet_samples()].into_boxed_slice(),
            output_buffer: vec![0; MAX_PAYLOAD_BYTES].into_boxed_slice(),
            config,
            buffered_frames: 0,
            encoded_len: 0,
            terminated: false,
        })
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Buffers a frame of exactly `frame_size` samples. When this completes the packet, the packet
    /// is encoded and the encoded size is returned. Otherwise returns 0.
    pub fn encode(&mut self, frame: &[i16]) -> Result<usize> {
        self.ensure_open()?;
        ensure!(
            self.buffered_frames < self.config.frames_per_packet,
            OverflowSnafu {
                capacity: self.config.frames_per_packet
            }
        );
        ensure!(
            frame.len() == self.config.frame_size,
            InvalidFrameLengthSnafu {
                expected: self.config.frame_size,
                actual: frame.len(),
            }
        );

        self.terminated = false;
        let offset = self.config.frame_size * self.buffered_frames;
        self.sample_buffer[offset..offset + self.config.frame_size].copy_from_slice(frame);
        self.buffered_frames += 1;

        if self.buffered_frames == self.config.frames_per_packet {
            self.encode_buffered_frames()
        } else {
            Ok(0)
        }
    }

    // Leaves the buffered frames in place. They're only discarded by a drain.
    fn encode_buffered_frames(&mut self) -> Result<usize> {
        let sample_count = self.config.frame_size * self.buffered_frames;
        let len = self
            .codec
            .get_mut()?
            .encode(&self.sample_buffer[..sample_count], &mut self.output_buffer)
            .map_err(|code| CodecEncodeSnafu { code }.build())?;
        ensure!(
            len <= self.output_buffer.len(),
            PayloadTooLargeSnafu {
                len,
                capacity: self.output_buffer.len(),
            }
        );

        trace!("encoded {} frames into {} bytes", self.buffered_frames, len);
        self.encoded_len = len;
        Ok(len)
    }

    /// The number of frames accumulated since the last drain, including frames already encoded
    /// into a pending packet.
    pub fn buffered_frames(&self) -> usize {
        self.buffered_frames
    }

    pub fn is_ready(&self) -> bool {
        self.encoded_len > 0
    }

    /// The size of the pending payload, or 0 if nothing is pending.
    pub fn encoded_len(&self) -> usize {
        self.encoded_len
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Writes the pending packet to `sink` as an 8 byte header followed by the payload, then
    /// resets the encoder for the next packet.
    pub fn drain_encoded_packet<S: PacketSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        self.ensure_open()?;
        ensure!(self.is_ready(), UnderflowSnafu);

        let packet = EncodedPacket {
            terminated: self.terminated,
            payload: &self.output_buffer[..self.encoded_len],
        };
        packet.write_to(sink)?;
        trace!("drained {} byte packet (terminated = {})", self.encoded_len, self.terminated);

        self.buffered_frames = 0;
        self.encoded_len = 0;
        self.terminated = false;
        Ok(())
    }

    /// Sets the codec's target bitrate. The value isn't validated here, and if the codec refuses
    /// it, the previous bitrate stays in effect.
    pub fn set_bitrate(&mut self, bitrate: i32) -> Result<()> {
        if let Err(code) = self.codec.get_mut()?.control(CodecControl::SetBitrate(bitrate)) {
            warn!("codec rejected bitrate {} (code = {})", bitrate, code);
        }
        Ok(())
    }

    pub fn bitrate(&mut self) -> Result<i32> {
        self.codec
            .get_mut()?
            .control(CodecControl::GetBitrate)
            .map_err(|code| CodecControlSnafu { code }.build())
    }

    /// Flags the next drained packet as the last of the stream. If frames are buffered and haven't
    /// been encoded yet, they're encoded now as a short packet. A packet that's already pending is
    /// not re-encoded.
    pub fn terminate(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.terminated = true;
        if self.buffered_frames > 0 && !self.is_ready() {
            debug!("flushing {} of {} frames on terminate", self.buffered_frames, self.config.frames_per_packet);
            self.encode_buffered_frames()?;
        }
        Ok(())
    }

    /// Destroys the codec. Calling this more than once has no effect.
    pub fn release(&mut self) {
        self.codec.release();
    }

    pub fn is_released(&self) -> bool {
        self.codec.is_released()
    }

    fn ensure_open(&self) -> Result<()> {
        ensure!(!self.codec.is_released(), ReleasedSnafu);
        Ok(())
    }
}

impl<C: Codec> AudioEncoder<i16> for FrameAggregatingEncoder<C> {
    type Error = EncoderError;

    fn encode(&mut self, frame: &[i16]) -> Result<usize> {
        FrameAggregatingEncoder::encode(self, frame)
    }

    fn buffered_frames(&self) -> usize {
        FrameAggregatingEncoder::buffered_frames(self)
    }

    fn is_ready(&self) -> bool {
        FrameAggregatingEncoder::is_ready(self)
    }

    fn drain_encoded_packet(&mut self, sink: &mut dyn PacketSink) -> Result<()> {
        FrameAggregatingEncoder::drain_encoded_packet(self, sink)
    }

    fn set_bitrate(&mut self, bitrate: i32) -> Result<()> {
        FrameAggregatingEncoder::set_bitrate(self, bitrate)
    }

    fn terminate(&mut self) -> Result<()> {
        FrameAggregatingEncoder::terminate(self)
    }

    fn release(&mut self) {
        FrameAggregatingEncoder::release(self)
    }
}
