//! Error type shared by the fallible edges of the crate.
//!
//! The digest computation itself cannot fail. Errors only appear where bytes
//! come from somewhere else (readers, files, hex strings) or where a caller has
//! asked to be told about bit-length wraparound instead of having it applied
//! silently.

use thiserror::Error;

/// Errors produced by `legacy_md5`.
#[derive(Debug, Error)]
pub enum Error {
    /// Feeding `additional` more bytes would push the message length past
    /// 2^64 bits, and the hasher was configured with
    /// [`LengthPolicy::Reject`](crate::md5::LengthPolicy::Reject).
    #[error("message bit length {bit_len} cannot grow by {additional} bytes without exceeding 2^64 bits")]
    LengthOverflow {
        /// Bit length already absorbed by the hasher.
        bit_len: u64,
        /// Number of bytes that were refused.
        additional: usize,
    },

    /// A textual digest was not 32 hexadecimal characters.
    #[error("invalid hex digest: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// A raw digest was built from a slice of the wrong size.
    #[error("digest must be {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required length in bytes.
        expected: usize,
        /// Length supplied by the caller.
        actual: usize,
    },

    /// Reading the input failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::InvalidLength {
            expected: 16,
            actual: 3,
        };
        assert_eq!(err.to_string(), "digest must be 16 bytes, got 3");

        let err = Error::LengthOverflow {
            bit_len: u64::MAX,
            additional: 1,
        };
        assert!(err.to_string().contains("2^64"));
    }

    #[test]
    fn test_from_conversions() {
        let err: Error = hex::FromHexError::OddLength.into();
        assert!(matches!(err, Error::InvalidHex(_)));

        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "gone");
    }
}
