use av_traits::PacketSink;
use byteorder::{BigEndian, ByteOrder};
use std::marker::PhantomData;

/// A growable `PacketSink` that writes headers in the byte order `B`. Network byte order is used
/// unless another is requested with `with_byte_order`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PacketBuffer<B = BigEndian> {
    data: Vec<u8>,
    byte_order: PhantomData<B>,
}

impl PacketBuffer {
    pub fn new() -> Self {
        Self::with_byte_order()
    }
}

impl<B: ByteOrder> PacketBuffer<B> {
    pub fn with_byte_order() -> Self {
        Self {
            data: Vec::new(),
            byte_order: PhantomData,
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl<B: ByteOrder> Default for PacketBuffer<B> {
    fn default() -> Self {
        Self::with_byte_order()
    }
}

impl<B: ByteOrder> PacketSink for PacketBuffer<B> {
    fn write_u64(&mut self, value: u64) {
        let mut buf = [0u8; 8];
        B::write_u64(&mut buf, value);
        self.data.extend_from_slice(&buf);
    }

    fn append(&mut self, data: &[u8]) {
        self.data.extend_from_slice(data);
    }
}
