use crate::PacketSink;

/// Implements frame-aggregating audio encoding behavior. Frames are pushed one at a time and the
/// encoder decides when enough have accumulated to produce a packet.
///
/// Typical usage should look like this:
///
/// ```
/// # use av_traits::{AudioEncoder, PacketSink};
/// fn encode<'a, F, E>(frames: F, encoder: &mut E, sink: &mut dyn PacketSink) -> Result<(), E::Error>
///     where F: Iterator<Item = &'a [i16]>,
///     E: AudioEncoder<i16>
/// {
///     for frame in frames {
///         encoder.encode(frame)?;
///         if encoder.is_ready() {
///             encoder.drain_encoded_packet(sink)?;
///         }
///     }
///
///     encoder.terminate()?;
///     if encoder.is_ready() {
///         encoder.drain_encoded_packet(sink)?;
///     }
///     encoder.release();
///
///     Ok(())
/// }
/// ```
pub trait AudioEncoder<S> {
    type Error;

    /// Buffers a single frame. When the frame completes a packet, the packet is encoded and the
    /// number of encoded bytes is returned. Otherwise 0 is returned.
    fn encode(&mut self, frame: &[S]) -> Result<usize, Self::Error>;

    /// The number of frames accumulated since the last drain.
    fn buffered_frames(&self) -> usize;

    /// Whether an encoded packet is waiting to be drained.
    fn is_ready(&self) -> bool;

    /// Writes the pending packet to the sink and resets the encoder for the next packet.
    fn drain_encoded_packet(&mut self, sink: &mut dyn PacketSink) -> Result<(), Self::Error>;

    fn set_bitrate(&mut self, bitrate: i32) -> Result<(), Self::Error>;

    /// Marks the stream as ending. Any partially filled packet is encoded so that it can be
    /// drained, and the next drained packet is flagged as the last one.
    fn terminate(&mut self) -> Result<(), Self::Error>;

    /// Frees the underlying codec. Subsequent calls do nothing.
    fn release(&mut self);
}
