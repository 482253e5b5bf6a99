/// The most bytes a single encoded packet may hold. Voice transports in the Mumble family use
/// 960 even though libopus recommends up to 4000.
pub const MAX_PAYLOAD_BYTES: usize = 960;

/// Set in a packet header when the packet is the last one of its stream.
pub const TERMINATOR_FLAG: u64 = 1 << 13;

/// The header bits that carry the payload length.
pub const LENGTH_MASK: u64 = TERMINATOR_FLAG - 1;

// The flag must never overlap a valid payload length.
const _: () = assert!((MAX_PAYLOAD_BYTES as u64) <= LENGTH_MASK);

/// Packs a payload length and the terminator flag into a header word.
pub fn pack_header(len: usize, terminated: bool) -> u64 {
    debug_assert!(len as u64 <= LENGTH_MASK, "payload length overlaps the terminator flag");
    let mut header = len as u64;
    if terminated {
        header |= TERMINATOR_FLAG;
    }
    header
}

/// Splits a header word into the payload length and the terminator flag. Bits above the flag are
/// left in the length; callers that need to reject them should check against `LENGTH_MASK` first.
pub fn unpack_header(header: u64) -> (usize, bool) {
    ((header & !TERMINATOR_FLAG) as usize, header & TERMINATOR_FLAG != 0)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pack_header() {
        assert_eq!(pack_header(0, false), 0);
        assert_eq!(pack_header(71, false), 71);
        assert_eq!(pack_header(71, true), 71 | 8192);
        assert_eq!(pack_header(MAX_PAYLOAD_BYTES, true), 960 + 8192);
    }

    #[test]
    fn test_unpack_header() {
        assert_eq!(unpack_header(71), (71, false));
        assert_eq!(unpack_header(71 | 8192), (71, true));
        assert_eq!(unpack_header(8192), (0, true));
    }

    #[test]
    fn test_length_is_recoverable_below_flag() {
        for len in [0, 1, 120, 959, 960, 4000, 8191] {
            for terminated in [false, true] {
                let header = pack_header(len, terminated);
                assert_eq!((header & !8192) as usize, len);
                assert_eq!(unpack_header(header), (len, terminated));
            }
        }
    }
}
