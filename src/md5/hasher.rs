//! Streaming MD5 context.
//!
//! [`Md5`] accepts input in pieces of any size and produces the same digest as
//! hashing the concatenation in one go. Full blocks are compressed as soon as
//! they arrive; at most 63 bytes wait in the buffer between calls.

use std::fmt;
use std::io;

use log::{debug, warn};

use super::compress::{compress, compress_observed, State};
use super::digest::{assemble, Digest};
use super::observer::LogObserver;
use super::padding::{bit_length, length_field, padding_len, BLOCK_SIZE, LENGTH_FIELD_SIZE};
use super::schedule::schedule;
use crate::error::{Error, Result};

/// Longest message, in bytes, whose bit length still fits in the 64-bit
/// length field.
pub const MAX_MESSAGE_BYTES: u64 = u64::MAX / 8;

/// What to do when a message grows past 2^64 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthPolicy {
    /// Reduce the length modulo 2^64 as RFC 1321 specifies.
    #[default]
    Wrap,
    /// Refuse the input in [`Md5::try_update`] with [`Error::LengthOverflow`].
    Reject,
}

/// A builder for configuring an [`Md5`] context.
#[derive(Debug, Clone, Default)]
pub struct Md5Builder {
    length_policy: LengthPolicy,
    trace_steps: bool,
}

impl Md5Builder {
    /// Creates a builder with the defaults: wrap the length, no tracing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how oversized messages are handled by [`Md5::try_update`].
    pub fn length_policy(mut self, policy: LengthPolicy) -> Self {
        self.length_policy = policy;
        self
    }

    /// Routes every compression through a [`LogObserver`], which logs each
    /// of the 64 steps at trace level. Slow; meant for debugging.
    pub fn trace_steps(mut self, on: bool) -> Self {
        self.trace_steps = on;
        self
    }

    /// Builds a fresh context.
    pub fn build(self) -> Md5 {
        Md5 {
            state: State::INITIAL,
            buffer: [0u8; BLOCK_SIZE],
            buffer_len: 0,
            bytes: 0,
            blocks: 0,
            wrapped: false,
            policy: self.length_policy,
            tracer: self.trace_steps.then(LogObserver::new),
        }
    }
}

/// An incremental MD5 context.
#[derive(Clone)]
pub struct Md5 {
    state: State,
    buffer: [u8; BLOCK_SIZE],
    buffer_len: usize,
    /// Bytes absorbed so far, mod 2^64.
    bytes: u64,
    blocks: u64,
    wrapped: bool,
    policy: LengthPolicy,
    tracer: Option<LogObserver>,
}

impl fmt::Debug for Md5 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Md5")
            .field("state", &self.state)
            .field("bytes", &self.bytes)
            .field("buffered", &self.buffer_len)
            .field("policy", &self.policy)
            .field("trace_steps", &self.tracer.is_some())
            .finish()
    }
}

impl Default for Md5 {
    fn default() -> Self {
        Self::new()
    }
}

impl Md5 {
    /// Creates a new MD5 context with default settings.
    pub fn new() -> Self {
        Md5Builder::new().build()
    }

    /// Starts configuring a context.
    pub fn builder() -> Md5Builder {
        Md5Builder::new()
    }

    /// One-shot convenience equal to [`md5`](crate::md5::md5).
    pub fn digest(data: &[u8]) -> Digest {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }

    /// Feeds `data` into the context.
    ///
    /// Never fails: if the message passes 2^64 bits the length field wraps,
    /// as RFC 1321 specifies, and a warning is logged once.
    pub fn update(&mut self, data: &[u8]) {
        if !self.wrapped && self.would_overflow(data.len()) {
            warn!(
                "MD5 message passed 2^64 bits after {} bytes; length field wraps",
                self.bytes
            );
            self.wrapped = true;
        }
        self.absorb(data);
    }

    /// Like [`update`](Self::update), but under [`LengthPolicy::Reject`]
    /// returns [`Error::LengthOverflow`] instead of letting the length wrap.
    /// Refused input is not consumed.
    pub fn try_update(&mut self, data: &[u8]) -> Result<()> {
        if self.policy == LengthPolicy::Reject && self.would_overflow(data.len()) {
            return Err(Error::LengthOverflow {
                bit_len: self.bit_len(),
                additional: data.len(),
            });
        }
        self.update(data);
        Ok(())
    }

    /// Pads the message, compresses the final block(s) and returns the digest.
    pub fn finalize(mut self) -> Digest {
        self.finish()
    }

    /// Returns the digest and leaves `self` ready for a new message with the
    /// same configuration.
    pub fn finalize_reset(&mut self) -> Digest {
        let digest = self.finish();
        self.reset();
        digest
    }

    /// Discards everything absorbed so far.
    pub fn reset(&mut self) {
        *self = Md5Builder {
            length_policy: self.policy,
            trace_steps: self.tracer.is_some(),
        }
        .build();
    }

    /// Bytes absorbed so far, reduced mod 2^64.
    pub fn bytes_processed(&self) -> u64 {
        self.bytes
    }

    /// Message length in bits as it will appear in the length field.
    pub fn bit_len(&self) -> u64 {
        bit_length(self.bytes)
    }

    /// Whether the message has grown past what the length field can hold.
    pub fn length_wrapped(&self) -> bool {
        self.wrapped
    }

    fn would_overflow(&self, additional: usize) -> bool {
        self.wrapped || additional as u64 > MAX_MESSAGE_BYTES - self.bytes
    }

    fn absorb(&mut self, mut data: &[u8]) {
        self.bytes = self.bytes.wrapping_add(data.len() as u64);

        if self.buffer_len > 0 {
            let take = (BLOCK_SIZE - self.buffer_len).min(data.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&data[..take]);
            self.buffer_len += take;
            data = &data[take..];
            if self.buffer_len < BLOCK_SIZE {
                return;
            }
            let block = self.buffer;
            self.process_block(&block);
            self.buffer_len = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_SIZE);
        for block in &mut blocks {
            self.process_block(block);
        }
        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffer_len = rest.len();
    }

    fn process_block(&mut self, block: &[u8]) {
        let words = schedule(block);
        self.state = match self.tracer.as_mut() {
            Some(tracer) => compress_observed(self.state, &words, tracer),
            None => compress(self.state, &words),
        };
        self.blocks += 1;
    }

    fn finish(&mut self) -> Digest {
        let n = self.buffer_len;
        let total = n + padding_len(n as u64) + LENGTH_FIELD_SIZE;

        let mut tail = [0u8; 2 * BLOCK_SIZE];
        tail[..n].copy_from_slice(&self.buffer[..n]);
        tail[n] = 0x80;
        tail[total - LENGTH_FIELD_SIZE..total].copy_from_slice(&length_field(self.bit_len()));

        for block in tail[..total].chunks_exact(BLOCK_SIZE) {
            self.process_block(block);
        }

        debug!(
            "md5 finalized: {} bytes, {} blocks{}",
            self.bytes,
            self.blocks,
            if self.wrapped { " (length wrapped)" } else { "" }
        );
        assemble(self.state)
    }
}

impl io::Write for Md5 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.try_update(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
