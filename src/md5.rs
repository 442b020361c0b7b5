//! MD5 message digest (RFC 1321).
//!
//! MD5 is collision-broken. It is here for compatibility with formats and
//! tools that still name it, not as a security primitive.
//!
//! The one-shot [`md5`] runs four stages strictly in order:
//!
//! 1. [`padding::pad`] extends the input to a multiple of 64 bytes.
//! 2. [`schedule::schedule`] reads each 64-byte block as sixteen
//!    little-endian words.
//! 3. [`compress::compress`] folds each block into the running state.
//! 4. [`digest::assemble`] writes the final state out as 16 bytes.
//!
//! Blocks chain through the state, so one message is always hashed
//! sequentially. [`Md5`] does the same work incrementally.

pub mod batch;
pub mod compress;
pub mod digest;
pub mod hasher;
pub mod observer;
pub mod padding;
pub mod schedule;
pub mod tables;

use log::{log_enabled, trace, Level};

pub use batch::{md5_batch, md5_file, md5_files, md5_reader};
pub use compress::{compress, compress_observed, left_rotate, Round, State};
pub use digest::{assemble, Digest, MD5_OUTPUT_SIZE};
pub use hasher::{LengthPolicy, Md5, Md5Builder, MAX_MESSAGE_BYTES};
pub use observer::{LogObserver, RecordingObserver, StepObserver, StepTrace};
pub use padding::{pad, BLOCK_SIZE};
pub use schedule::{schedule, Schedule};

/// Computes the MD5 digest of `input`.
///
/// # Examples
///
/// ```
/// use legacy_md5::md5;
///
/// assert_eq!(md5(b"abc").to_hex(), "900150983cd24fb0d6963f7d28e17f72");
/// ```
pub fn md5(input: &[u8]) -> Digest {
    md5_observed(input, &mut ())
}

/// Computes the MD5 digest of `input` and returns it as lowercase hex.
pub fn md5_hex(input: &[u8]) -> String {
    md5(input).to_hex()
}

/// Computes the MD5 digest of `input`, reporting every compression step to
/// `observer`. The digest is identical to [`md5`].
pub fn md5_observed<O: StepObserver + ?Sized>(input: &[u8], observer: &mut O) -> Digest {
    let padded = pad(input);
    if log_enabled!(Level::Trace) {
        for (i, block) in padded.chunks_exact(BLOCK_SIZE).enumerate() {
            trace!("padded block {i}: {}", hex::encode(block));
        }
    }

    let state = padded
        .chunks_exact(BLOCK_SIZE)
        .fold(State::INITIAL, |state, block| {
            compress_observed(state, &schedule(block), &mut *observer)
        });
    assemble(state)
}
