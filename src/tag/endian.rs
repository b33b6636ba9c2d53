//! Byte-order conversion for the frame size field.
//!
//! Sizes are stored big-endian on disk. The conversion is a plain in-place
//! reversal, applied only when the host is little-endian.

use super::layout::FRAME_SIZE_LEN;

/// Reverse `buf` in place. Applying it twice restores the original bytes.
pub fn swap_in_place(buf: &mut [u8]) {
    let n = buf.len();
    for i in 0..n / 2 {
        buf.swap(i, n - 1 - i);
    }
}

/// Turn on-disk (big-endian) bytes into host order, in place.
pub fn to_host(buf: &mut [u8]) {
    if cfg!(target_endian = "little") {
        swap_in_place(buf);
    }
}

/// Turn host-order bytes into on-disk (big-endian) order, in place.
pub fn to_disk(buf: &mut [u8]) {
    // Reversal is its own inverse.
    to_host(buf);
}

pub fn decode_size(raw: [u8; FRAME_SIZE_LEN]) -> u32 {
    let mut buf = raw;
    to_host(&mut buf);
    u32::from_ne_bytes(buf)
}

pub fn encode_size(size: u32) -> [u8; FRAME_SIZE_LEN] {
    let mut buf = size.to_ne_bytes();
    to_disk(&mut buf);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_is_self_inverse() {
        let original = [1u8, 2, 3, 4, 5];
        let mut buf = original;
        swap_in_place(&mut buf);
        assert_eq!(buf, [5, 4, 3, 2, 1]);
        swap_in_place(&mut buf);
        assert_eq!(buf, original);
    }

    #[test]
    fn swap_handles_empty_and_single() {
        let mut empty: [u8; 0] = [];
        swap_in_place(&mut empty);
        let mut one = [7u8];
        swap_in_place(&mut one);
        assert_eq!(one, [7]);
    }

    #[test]
    fn decode_reads_big_endian() {
        assert_eq!(decode_size([0, 0, 0, 5]), 5);
        assert_eq!(decode_size([0x01, 0x02, 0x03, 0x04]), 0x0102_0304);
        assert_eq!(decode_size([0x01, 0x02, 0x03, 0x04]), u32::from_be_bytes([1, 2, 3, 4]));
    }

    #[test]
    fn encode_writes_big_endian() {
        assert_eq!(encode_size(6), [0, 0, 0, 6]);
        assert_eq!(encode_size(0xdead_beef), [0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(decode_size(encode_size(123_456)), 123_456);
    }
}
