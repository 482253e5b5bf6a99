#![no_std]

mod audio_encoder;
pub use audio_encoder::*;

mod packet_sink;
pub use packet_sink::*;
