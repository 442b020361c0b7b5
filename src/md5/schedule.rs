//! Splitting a 64-byte block into the sixteen message words.

use super::padding::BLOCK_SIZE;

/// Number of 32-bit words in one block.
pub const WORDS_PER_BLOCK: usize = 16;

/// The sixteen little-endian words of one block, in stream order.
pub type Schedule = [u32; WORDS_PER_BLOCK];

/// Decodes bytes `[4j, 4j+4)` of `block` as little-endian word `j`.
///
/// `block` must be exactly [`BLOCK_SIZE`] bytes; every caller in this crate
/// slices it out of a padded stream or a full buffer.
pub fn schedule(block: &[u8]) -> Schedule {
    debug_assert_eq!(block.len(), BLOCK_SIZE, "MD5 blocks are 64 bytes");
    let mut words = [0u32; WORDS_PER_BLOCK];
    for (word, bytes) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_are_little_endian() {
        let mut block = [0u8; BLOCK_SIZE];
        block[..4].copy_from_slice(&[0x61, 0x62, 0x63, 0x80]);
        block[56] = 0x18;
        let words = schedule(&block);
        assert_eq!(words[0], 0x8063_6261);
        assert_eq!(words[14], 0x18);
        assert!(words[1..14].iter().all(|&w| w == 0));
        assert_eq!(words[15], 0);
    }

    #[test]
    fn test_word_index_matches_byte_offset() {
        let block: Vec<u8> = (0..BLOCK_SIZE as u8).collect();
        let words = schedule(&block);
        for (j, &w) in words.iter().enumerate() {
            let base = (4 * j) as u32;
            let expected = base | ((base + 1) << 8) | ((base + 2) << 16) | ((base + 3) << 24);
            assert_eq!(w, expected, "word {j}");
        }
    }
}
