//! Hooks for watching a compression run step by step.
//!
//! The compressor reports what it did through [`StepObserver`]; observers get
//! copies of the state and never feed anything back. `()` is the do-nothing
//! observer and compiles away entirely.

use log::{log_enabled, trace, Level};

use super::compress::{Round, State};

/// Snapshot taken right after one of the 64 steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTrace {
    /// Step index, 0..64.
    pub step: usize,
    pub round: Round,
    /// Schedule word consumed by this step.
    pub message_index: usize,
    /// Rotation applied by this step.
    pub shift: u32,
    /// (A, B, C, D) after the step's register rotation.
    pub state: State,
}

/// Receives progress events from the compressor.
pub trait StepObserver {
    /// Called once per block with the incoming chaining state.
    fn on_block_start(&mut self, _state: State) {}

    /// Called after each of the 64 steps.
    fn on_step(&mut self, _trace: &StepTrace) {}

    /// Called once per block with the chaining state before and after.
    fn on_block_end(&mut self, _before: State, _after: State) {}
}

impl StepObserver for () {}

/// Writes every step to the `log` facade at trace level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver {
    blocks: u64,
}

impl LogObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks seen so far.
    pub fn blocks(&self) -> u64 {
        self.blocks
    }
}

impl StepObserver for LogObserver {
    fn on_block_start(&mut self, state: State) {
        trace!(
            "block {}: A={:08x} B={:08x} C={:08x} D={:08x}",
            self.blocks,
            state.a,
            state.b,
            state.c,
            state.d
        );
    }

    fn on_step(&mut self, t: &StepTrace) {
        if !log_enabled!(Level::Trace) {
            return;
        }
        trace!(
            "step {:2} round {} k={:2} s={:2} A={:08x} B={:08x} C={:08x} D={:08x}",
            t.step,
            t.round.number(),
            t.message_index,
            t.shift,
            t.state.a,
            t.state.b,
            t.state.c,
            t.state.d
        );
    }

    fn on_block_end(&mut self, _before: State, after: State) {
        trace!(
            "block {} done: A={:08x} B={:08x} C={:08x} D={:08x}",
            self.blocks,
            after.a,
            after.b,
            after.c,
            after.d
        );
        self.blocks += 1;
    }
}

/// Collects every step in memory. Handy for tests and teaching output.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub steps: Vec<StepTrace>,
    pub blocks: Vec<(State, State)>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StepObserver for RecordingObserver {
    fn on_step(&mut self, trace: &StepTrace) {
        self.steps.push(*trace);
    }

    fn on_block_end(&mut self, before: State, after: State) {
        self.blocks.push((before, after));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::md5::compress::{compress, compress_observed};
    use crate::md5::padding::pad;
    use crate::md5::schedule::schedule;

    #[test]
    fn test_observer_sees_every_step() {
        let padded = pad(b"abc");
        let sched = schedule(&padded);
        let mut rec = RecordingObserver::new();
        let observed = compress_observed(State::INITIAL, &sched, &mut rec);

        assert_eq!(observed, compress(State::INITIAL, &sched));
        assert_eq!(rec.steps.len(), 64);
        assert_eq!(rec.blocks, vec![(State::INITIAL, observed)]);
        for (i, t) in rec.steps.iter().enumerate() {
            assert_eq!(t.step, i);
            assert_eq!(t.round, Round::of_step(i));
        }
    }

    #[test]
    fn test_register_rotation_between_steps() {
        let padded = pad(b"");
        let mut rec = RecordingObserver::new();
        compress_observed(State::INITIAL, &schedule(&padded), &mut rec);
        for pair in rec.steps.windows(2) {
            let (prev, next) = (pair[0].state, pair[1].state);
            assert_eq!(next.a, prev.d);
            assert_eq!(next.c, prev.b);
            assert_eq!(next.d, prev.c);
        }
    }

    #[test]
    fn test_log_observer_counts_blocks() {
        let padded = pad(&[0u8; 100]);
        let mut obs = LogObserver::new();
        let mut state = State::INITIAL;
        for block in padded.chunks_exact(64) {
            state = compress_observed(state, &schedule(block), &mut obs);
        }
        assert_eq!(obs.blocks(), 2);
    }
}
