/// An append-only destination for framed packets.
pub trait PacketSink {
    /// Writes a 64-bit integer using the fixed-width encoding of the receiving protocol.
    fn write_u64(&mut self, value: u64);

    /// Appends raw bytes.
    fn append(&mut self, data: &[u8]);
}

impl<T: PacketSink + ?Sized> PacketSink for &mut T {
    fn write_u64(&mut self, value: u64) {
        (**self).write_u64(value)
    }

    fn append(&mut self, data: &[u8]) {
        (**self).append(data)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct Recorder {
        words: [u64; 2],
        word_count: usize,
        byte_count: usize,
    }

    impl PacketSink for Recorder {
        fn write_u64(&mut self, value: u64) {
            self.words[self.word_count] = value;
            self.word_count += 1;
        }

        fn append(&mut self, data: &[u8]) {
            self.byte_count += data.len();
        }
    }

    #[test]
    fn test_packet_sink_object_safety() {
        let _s: *const dyn PacketSink;
    }

    #[test]
    fn test_packet_sink_through_reference() {
        let mut recorder = Recorder {
            words: [0; 2],
            word_count: 0,
            byte_count: 0,
        };
        fn write_packet<S: PacketSink>(mut sink: S) {
            sink.write_u64(7);
            sink.append(&[1, 2, 3]);
        }

        write_packet(&mut recorder);
        assert_eq!(recorder.words[0], 7);
        assert_eq!(recorder.word_count, 1);
        assert_eq!(recorder.byte_count, 3);
    }
}
