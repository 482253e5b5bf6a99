use crate::{
    error::{PayloadTooLargeSnafu, Result as EncodeResult},
    header::{pack_header, unpack_header, LENGTH_MASK, MAX_PAYLOAD_BYTES, TERMINATOR_FLAG},
};
use av_traits::PacketSink;
use byteorder::ByteOrder;
use snafu::{ensure, Snafu};

/// The size of the fixed-width header preceding every payload.
pub const HEADER_LENGTH: usize = 8;

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum DecodeError {
    #[snafu(display("not enough bytes for packet header"))]
    ShortHeader,
    #[snafu(display("reserved bits set in packet header {header:#x}"))]
    ReservedBits { header: u64 },
    #[snafu(display("payload length {len} exceeds the maximum of {}", MAX_PAYLOAD_BYTES))]
    PayloadTooLong { len: usize },
    #[snafu(display("expected {expected} payload bytes, only {available} available"))]
    ShortPayload { expected: usize, available: usize },
}

/// A framed packet: the terminator flag and the payload it describes. Payloads longer than
/// `MAX_PAYLOAD_BYTES` can't be framed, and `write_to` refuses them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedPacket<'a> {
    pub terminated: bool,
    pub payload: &'a [u8],
}

impl<'a> EncodedPacket<'a> {
    pub fn header(&self) -> u64 {
        pack_header(self.payload.len(), self.terminated)
    }

    /// The number of bytes `write_to` produces.
    pub fn encoded_len(&self) -> usize {
        HEADER_LENGTH + self.payload.len()
    }

    /// Writes the header and payload to `sink`. Nothing is written if the payload is too long to
    /// frame.
    pub fn write_to<S: PacketSink + ?Sized>(&self, sink: &mut S) -> EncodeResult<()> {
        ensure!(
            self.payload.len() <= MAX_PAYLOAD_BYTES,
            PayloadTooLargeSnafu {
                len: self.payload.len(),
                capacity: MAX_PAYLOAD_BYTES,
            }
        );
        sink.write_u64(self.header());
        sink.append(self.payload);
        Ok(())
    }

    /// Decodes one packet from the front of `buf`, returning it along with the number of bytes it
    /// occupied. `B` must match the byte order the sender's sink wrote the header in.
    pub fn decode<B: ByteOrder>(buf: &'a [u8]) -> Result<(Self, usize), DecodeError> {
        ensure!(buf.len() >= HEADER_LENGTH, ShortHeaderSnafu);
        let header = B::read_u64(&buf[..HEADER_LENGTH]);
        ensure!(header & !(LENGTH_MASK | TERMINATOR_FLAG) == 0, ReservedBitsSnafu { header });

        let (len, terminated) = unpack_header(header);
        ensure!(len <= MAX_PAYLOAD_BYTES, PayloadTooLongSnafu { len });

        let available = buf.len() - HEADER_LENGTH;
        ensure!(available >= len, ShortPayloadSnafu { expected: len, available });

        Ok((
            Self {
                terminated,
                payload: &buf[HEADER_LENGTH..HEADER_LENGTH + len],
            },
            HEADER_LENGTH + len,
        ))
    }
}
