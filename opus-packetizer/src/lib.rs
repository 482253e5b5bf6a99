//! Aggregates fixed-size PCM frames into constant-bitrate speech packets and frames each packet
//! as a length-prefixed record for packetized voice transports.

mod codec;
pub use codec::*;

mod config;
pub use config::*;

mod encoder;
pub use encoder::*;

mod error;
pub use error::*;

mod header;
pub use header::*;

mod packet;
pub use packet::*;

mod packet_buffer;
pub use packet_buffer::*;

#[cfg(feature = "opus")]
mod opus_codec;
#[cfg(feature = "opus")]
pub use opus_codec::*;

pub use av_traits::{AudioEncoder, PacketSink};
pub use byteorder::{BigEndian, ByteOrder, LittleEndian};
