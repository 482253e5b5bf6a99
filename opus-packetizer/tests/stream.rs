use opus_packetizer::{
    Application, AudioEncoder, BigEndian, Channels, Codec, CodecControl, EncodedPacket, EncoderConfig, EncoderError, FrameAggregatingEncoder, PacketBuffer,
    PacketSink, TERMINATOR_FLAG,
};

/// Stores each packet's samples verbatim as little-endian bytes, truncated to fit the output.
struct PcmCodec;

impl Codec for PcmCodec {
    fn create(_sample_rate: u32, _channels: Channels, _application: Application) -> Result<Self, i32> {
        Ok(Self)
    }

    fn control(&mut self, _request: CodecControl) -> Result<i32, i32> {
        Ok(0)
    }

    fn encode(&mut self, samples: &[i16], output: &mut [u8]) -> Result<usize, i32> {
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        let len = bytes.len().min(output.len());
        output[..len].copy_from_slice(&bytes[..len]);
        Ok(len)
    }

    fn destroy(self) {}
}

fn decode_all(mut buf: &[u8]) -> Vec<EncodedPacket<'_>> {
    let mut packets = vec![];
    while !buf.is_empty() {
        let (packet, len) = EncodedPacket::decode::<BigEndian>(buf).unwrap();
        packets.push(packet);
        buf = &buf[len..];
    }
    packets
}

fn run_stream<E: AudioEncoder<i16, Error = EncoderError>>(encoder: &mut E, frames: &[Vec<i16>], sink: &mut dyn PacketSink) {
    for frame in frames {
        encoder.encode(frame).unwrap();
        if encoder.is_ready() {
            encoder.drain_encoded_packet(sink).unwrap();
        }
    }
    encoder.terminate().unwrap();
    if encoder.is_ready() {
        encoder.drain_encoded_packet(sink).unwrap();
    }
    encoder.release();
}

#[test]
fn test_stream_with_short_final_packet() {
    let config = EncoderConfig::new(48_000, Channels::Mono, 40, 3);
    let mut encoder = FrameAggregatingEncoder::<PcmCodec>::new(config).unwrap();
    let frames: Vec<Vec<i16>> = (0..8).map(|i| vec![i as i16; 40]).collect();

    let mut buf = PacketBuffer::new();
    run_stream(&mut encoder, &frames, &mut buf);

    let packets = decode_all(buf.as_slice());
    assert_eq!(packets.len(), 3);
    assert_eq!(packets.iter().map(|p| p.payload.len()).collect::<Vec<_>>(), vec![240, 240, 160]);
    assert_eq!(packets.iter().map(|p| p.terminated).collect::<Vec<_>>(), vec![false, false, true]);

    // the short packet holds frames 6 and 7
    assert_eq!(&packets[2].payload[..2], &[6, 0]);
    assert_eq!(&packets[2].payload[80..82], &[7, 0]);
}

#[test]
fn test_stream_ending_on_packet_boundary() {
    let config = EncoderConfig::new(48_000, Channels::Mono, 40, 2);
    let mut encoder = FrameAggregatingEncoder::<PcmCodec>::new(config).unwrap();
    let frames: Vec<Vec<i16>> = (0..4).map(|i| vec![i as i16; 40]).collect();

    let mut buf = PacketBuffer::new();
    run_stream(&mut encoder, &frames, &mut buf);

    // nothing is left to flush, so no packet carries the terminator
    let packets = decode_all(buf.as_slice());
    assert_eq!(packets.len(), 2);
    assert!(packets.iter().all(|p| !p.terminated));
}

#[test]
fn test_terminate_before_drain_flags_pending_packet() {
    let config = EncoderConfig::new(48_000, Channels::Stereo, 40, 2);
    let mut encoder = FrameAggregatingEncoder::<PcmCodec>::new(config).unwrap();
    let mut buf = PacketBuffer::new();

    encoder.encode(&[1; 40]).unwrap();
    assert_eq!(encoder.encode(&[2; 40]).unwrap(), 160);
    encoder.terminate().unwrap();
    assert_eq!(encoder.encoded_len(), 160);
    encoder.drain_encoded_packet(&mut buf).unwrap();

    assert_eq!(&buf.as_slice()[..8], &(160 | TERMINATOR_FLAG).to_be_bytes());
    assert_eq!(buf.len(), 8 + 160);
}

#[test]
fn test_payload_is_bounded_by_output_capacity() {
    // 600 samples would be 1200 bytes of pcm, but the output buffer holds 960
    let config = EncoderConfig::new(48_000, Channels::Mono, 300, 2);
    let mut encoder = FrameAggregatingEncoder::<PcmCodec>::new(config).unwrap();
    encoder.encode(&[0; 300]).unwrap();
    assert_eq!(encoder.encode(&[0; 300]).unwrap(), 960);
}
