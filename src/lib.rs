//! A pure Rust MD5 message digest, bit-for-bit compatible with RFC 1321.
//!
//! DISCLAIMER: MD5 is broken. Collisions can be produced cheaply. Use this
//! crate to interoperate with formats and tools that still speak MD5, never
//! to protect anything. If you need a secure hash, use a vetted, modern
//! algorithm (e.g. SHA-2 or SHA-3 from RustCrypto).
//!
//! ```
//! use legacy_md5::{md5, Md5};
//!
//! let digest = md5(b"The quick brown fox jumps over the lazy dog");
//! assert_eq!(digest.to_string(), "9e107d9d372bb6826bd81d3542a419d6");
//!
//! let mut hasher = Md5::new();
//! hasher.update(b"The quick brown fox ");
//! hasher.update(b"jumps over the lazy dog");
//! assert_eq!(hasher.finalize(), digest);
//! ```

pub mod error;
pub mod md5;

pub use crate::error::{Error, Result};

// Re-export MD5 functionality
pub use crate::md5::{
    md5, md5_batch, md5_file, md5_files, md5_hex, md5_observed, md5_reader, Digest, LengthPolicy,
    Md5, Md5Builder, MD5_OUTPUT_SIZE,
};
