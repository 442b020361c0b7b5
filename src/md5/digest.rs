//! Turning the final chaining state into the 16-byte digest, and the
//! [`Digest`] value that carries it around.

use std::fmt;
use std::str::FromStr;

use super::compress::State;
use crate::error::{Error, Result};

/// The size of the MD5 digest in bytes (128 bits = 16 bytes).
pub const MD5_OUTPUT_SIZE: usize = 16;

/// A finished MD5 digest.
///
/// Displays as 32 lowercase hex characters, byte 0 first, which is the form
/// `md5sum` and most tooling exchange.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; MD5_OUTPUT_SIZE]);

/// Serializes A, B, C, D as four little-endian words.
pub fn assemble(state: State) -> Digest {
    let mut out = [0u8; MD5_OUTPUT_SIZE];
    for (chunk, word) in out.chunks_exact_mut(4).zip(state.words()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    Digest(out)
}

impl Digest {
    /// Wraps raw digest bytes.
    pub const fn from_bytes(bytes: [u8; MD5_OUTPUT_SIZE]) -> Self {
        Self(bytes)
    }

    /// The raw bytes, in output order.
    pub const fn as_bytes(&self) -> &[u8; MD5_OUTPUT_SIZE] {
        &self.0
    }

    /// Lowercase hex form, e.g. `d41d8cd98f00b204e9800998ecf8427e`.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses a 32-character hex string in either case.
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut out = [0u8; MD5_OUTPUT_SIZE];
        hex::decode_to_slice(s.trim(), &mut out)?;
        Ok(Self(out))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        f.debug_tuple("Digest").field(&format_args!("{hex}")).finish()
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&hex::encode(self.0))
    }
}

impl fmt::UpperHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&hex::encode_upper(self.0))
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; MD5_OUTPUT_SIZE] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: MD5_OUTPUT_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self(raw))
    }
}

impl From<[u8; MD5_OUTPUT_SIZE]> for Digest {
    fn from(bytes: [u8; MD5_OUTPUT_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; MD5_OUTPUT_SIZE] {
    fn from(d: Digest) -> Self {
        d.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
