//! MD5 message padding.
//!
//! A message is extended with a single `0x80` byte, then zero bytes until its
//! length is 56 modulo 64, then the original length in bits as a little-endian
//! `u64` (taken modulo 2^64). The result always spans a whole number of
//! [`BLOCK_SIZE`] blocks.

/// Size of one MD5 block in bytes (512 bits).
pub const BLOCK_SIZE: usize = 64;

/// Size of the trailing length field in bytes.
pub const LENGTH_FIELD_SIZE: usize = 8;

/// Offset within the final block where the length field starts.
const LENGTH_OFFSET: usize = BLOCK_SIZE - LENGTH_FIELD_SIZE;

/// Number of bytes (the `0x80` marker plus zero fill) appended to a message of
/// `message_len` bytes before the length field. Always in `1..=64`.
pub fn padding_len(message_len: u64) -> usize {
    let rem = (message_len % BLOCK_SIZE as u64) as usize;
    if rem < LENGTH_OFFSET {
        LENGTH_OFFSET - rem
    } else {
        // The marker does not fit ahead of the length field: spill into a new block.
        BLOCK_SIZE + LENGTH_OFFSET - rem
    }
}

/// Total length after padding a message of `message_len` bytes.
pub fn padded_len(message_len: u64) -> u64 {
    message_len + padding_len(message_len) as u64 + LENGTH_FIELD_SIZE as u64
}

/// Little-endian encoding of the message length in bits.
pub fn length_field(bit_len: u64) -> [u8; LENGTH_FIELD_SIZE] {
    bit_len.to_le_bytes()
}

/// Bit length of a `message_len`-byte message, reduced modulo 2^64.
pub fn bit_length(message_len: u64) -> u64 {
    message_len.wrapping_mul(8)
}

/// Writes the padding tail for a message of `message_len` bytes whose bit
/// length is `bit_len` into `out`.
fn extend_tail(out: &mut Vec<u8>, message_len: u64, bit_len: u64) {
    let zeros = padding_len(message_len) - 1;
    out.reserve(1 + zeros + LENGTH_FIELD_SIZE);
    out.push(0x80);
    out.resize(out.len() + zeros, 0);
    out.extend_from_slice(&length_field(bit_len));
}

/// Pads `input` into a byte stream whose length is a multiple of [`BLOCK_SIZE`].
///
/// # Examples
///
/// ```
/// use legacy_md5::md5::padding::pad;
///
/// let padded = pad(b"abc");
/// assert_eq!(padded.len(), 64);
/// assert_eq!(padded[3], 0x80);
/// assert_eq!(&padded[56..], &24u64.to_le_bytes());
/// ```
pub fn pad(input: &[u8]) -> Vec<u8> {
    let message_len = input.len() as u64;
    let mut out = Vec::with_capacity(padded_len(message_len) as usize);
    out.extend_from_slice(input);
    extend_tail(&mut out, message_len, bit_length(message_len));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_empty() {
        let padded = pad(b"");
        assert_eq!(padded.len(), 64);
        assert_eq!(padded[0], 0x80);
        assert!(padded[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_pad_boundary_lengths() {
        let cases = [(0, 64), (1, 64), (55, 64), (56, 128), (57, 128), (63, 128), (64, 128), (65, 128), (119, 128), (120, 192)];
        for (len, expected) in cases {
            let input = vec![0xAAu8; len];
            let padded = pad(&input);
            assert_eq!(padded.len(), expected, "input length {len}");
            assert_eq!(padded_len(len as u64), expected as u64);
        }
    }

    #[test]
    fn test_marker_lands_at_56_without_zero_fill() {
        // 55 bytes + 0x80 reaches 56 exactly, so the length follows immediately.
        let padded = pad(&[1u8; 55]);
        assert_eq!(padding_len(55), 1);
        assert_eq!(padded[55], 0x80);
        assert_eq!(&padded[56..], &length_field(55 * 8));
    }

    #[test]
    fn test_len_56_needs_extra_block() {
        let padded = pad(&[1u8; 56]);
        assert_eq!(padding_len(56), 64);
        assert_eq!(padded[56], 0x80);
        assert!(padded[57..120].iter().all(|&b| b == 0));
        assert_eq!(&padded[120..], &length_field(56 * 8));
    }

    #[test]
    fn test_input_is_preserved_as_prefix() {
        let input: Vec<u8> = (0..=200u8).collect();
        let padded = pad(&input);
        assert_eq!(&padded[..input.len()], &input[..]);
        assert!(padded.len() >= input.len() + 9);
        assert_eq!(padded.len() % BLOCK_SIZE, 0);
    }

    #[test]
    fn test_bit_length_wraps() {
        assert_eq!(bit_length(3), 24);
        assert_eq!(bit_length(1 << 61), 0);
        assert_eq!(bit_length((1 << 61) + 1), 8);
    }

    #[test]
    fn test_padding_len_range() {
        for len in 0..256u64 {
            let p = padding_len(len);
            assert!((1..=BLOCK_SIZE).contains(&p));
            assert_eq!((len + p as u64) % BLOCK_SIZE as u64, LENGTH_OFFSET as u64);
        }
    }
}
