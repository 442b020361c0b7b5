//! The MD5 compression function.
//!
//! One call consumes a single block schedule and advances the chaining state
//! through 64 steps grouped into four rounds of sixteen. Each round has its own
//! auxiliary function and message-word order. All additions wrap modulo 2^32.

use super::observer::{StepObserver, StepTrace};
use super::schedule::Schedule;
use super::tables::{INITIAL_STATE, K, S};

/// Number of steps in one compression.
pub const STEPS: usize = 64;

/// The four 32-bit chaining words (A, B, C, D).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub d: u32,
}

impl State {
    /// The RFC 1321 starting state.
    pub const INITIAL: State = INITIAL_STATE;

    /// Word-wise addition modulo 2^32, used to chain one block into the next.
    pub fn wrapping_add(self, other: State) -> State {
        State {
            a: self.a.wrapping_add(other.a),
            b: self.b.wrapping_add(other.b),
            c: self.c.wrapping_add(other.c),
            d: self.d.wrapping_add(other.d),
        }
    }

    /// The words in A, B, C, D order.
    pub fn words(self) -> [u32; 4] {
        [self.a, self.b, self.c, self.d]
    }
}

impl Default for State {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// One of the four sixteen-step phases of a compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Round {
    One,
    Two,
    Three,
    Four,
}

impl Round {
    /// Round that step `step` (0..64) belongs to.
    pub fn of_step(step: usize) -> Round {
        match step / 16 {
            0 => Round::One,
            1 => Round::Two,
            2 => Round::Three,
            _ => Round::Four,
        }
    }

    /// 1-based round number, as RFC 1321 counts them.
    pub fn number(self) -> usize {
        match self {
            Round::One => 1,
            Round::Two => 2,
            Round::Three => 3,
            Round::Four => 4,
        }
    }

    /// The auxiliary function F, G, H or I for this round.
    #[inline(always)]
    pub fn aux(self, x: u32, y: u32, z: u32) -> u32 {
        match self {
            Round::One => f(x, y, z),
            Round::Two => g(x, y, z),
            Round::Three => h(x, y, z),
            Round::Four => i(x, y, z),
        }
    }

    /// Index into the schedule read at `step`.
    #[inline(always)]
    pub fn message_index(self, step: usize) -> usize {
        match self {
            Round::One => step % 16,
            Round::Two => (5 * step + 1) % 16,
            Round::Three => (3 * step + 5) % 16,
            Round::Four => (7 * step) % 16,
        }
    }
}

/// Round 1: bitwise select, `x ? y : z`.
#[inline(always)]
pub fn f(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

/// Round 2: `z ? x : y`.
#[inline(always)]
pub fn g(x: u32, y: u32, z: u32) -> u32 {
    (x & z) | (y & !z)
}

/// Round 3: parity.
#[inline(always)]
pub fn h(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

/// Round 4.
#[inline(always)]
pub fn i(x: u32, y: u32, z: u32) -> u32 {
    y ^ (x | !z)
}

/// Circular left rotation of a 32-bit word. `n` is taken modulo 32, so 0 and
/// 32 both leave `x` unchanged.
#[inline(always)]
pub fn left_rotate(x: u32, n: u32) -> u32 {
    x.rotate_left(n % 32)
}

/// Runs the 64 steps over `schedule` and chains the result onto `state`.
pub fn compress(state: State, schedule: &Schedule) -> State {
    compress_observed(state, schedule, &mut ())
}

/// Same as [`compress`], reporting every step to `observer`.
///
/// The observer only sees copies of the state; it cannot change the result.
pub fn compress_observed<O: StepObserver + ?Sized>(
    state: State,
    schedule: &Schedule,
    observer: &mut O,
) -> State {
    observer.on_block_start(state);

    let State {
        mut a,
        mut b,
        mut c,
        mut d,
    } = state;

    for step in 0..STEPS {
        let round = Round::of_step(step);
        let k = round.message_index(step);

        let temp = a
            .wrapping_add(round.aux(b, c, d))
            .wrapping_add(schedule[k])
            .wrapping_add(K[step]);
        let new_b = b.wrapping_add(left_rotate(temp, S[step]));

        a = d;
        d = c;
        c = b;
        b = new_b;

        observer.on_step(&StepTrace {
            step,
            round,
            message_index: k,
            shift: S[step],
            state: State { a, b, c, d },
        });
    }

    let after = state.wrapping_add(State { a, b, c, d });
    observer.on_block_end(state, after);
    after
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::md5::padding::pad;
    use crate::md5::schedule::schedule;

    #[test]
    fn test_aux_functions() {
        let (x, y, z) = (0xF0F0_F0F0, 0xFF00_FF00, 0x0F0F_0F0F);
        assert_eq!(f(x, y, z), 0xFF0F_FF0F);
        assert_eq!(f(u32::MAX, y, z), y);
        assert_eq!(f(0, y, z), z);
        assert_eq!(g(x, y, u32::MAX), x);
        assert_eq!(g(x, y, 0), y);
        assert_eq!(h(x, y, z), x ^ y ^ z);
        assert_eq!(i(0, 0, u32::MAX), 0);
        assert_eq!(i(0, 0, 0), u32::MAX);
    }

    #[test]
    fn test_left_rotate() {
        assert_eq!(left_rotate(0x8000_0001, 1), 0x0000_0003);
        assert_eq!(left_rotate(0x1234_5678, 0), 0x1234_5678);
        assert_eq!(left_rotate(0x1234_5678, 32), 0x1234_5678);
        assert_eq!(left_rotate(0x1234_5678, 8), 0x3456_7812);
        for n in 0..32 {
            assert_eq!(left_rotate(1, n), 1u32 << n);
        }
    }

    #[test]
    fn test_rotate_is_not_shift() {
        // Top bits must wrap back around; a plain shift would drop them.
        let x = 0xF000_0000u32;
        assert_eq!(left_rotate(x, 4), 0x0000_000F);
        assert_ne!(left_rotate(x, 4), x << 4);
    }

    #[test]
    fn test_rounds_and_message_order() {
        assert_eq!(Round::of_step(0), Round::One);
        assert_eq!(Round::of_step(15), Round::One);
        assert_eq!(Round::of_step(16), Round::Two);
        assert_eq!(Round::of_step(47), Round::Three);
        assert_eq!(Round::of_step(63), Round::Four);
        assert_eq!(Round::of_step(40).number(), 3);

        let order = |r: Round, start: usize| -> Vec<usize> {
            (start..start + 16).map(|s| r.message_index(s)).collect()
        };
        assert_eq!(order(Round::One, 0), (0..16).collect::<Vec<_>>());
        assert_eq!(order(Round::Two, 16), vec![1, 6, 11, 0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12]);
        assert_eq!(order(Round::Three, 32), vec![5, 8, 11, 14, 1, 4, 7, 10, 13, 0, 3, 6, 9, 12, 15, 2]);
        assert_eq!(order(Round::Four, 48), vec![0, 7, 14, 5, 12, 3, 10, 1, 8, 15, 6, 13, 4, 11, 2, 9]);

        // Every word is read exactly once per round.
        for r in [Round::One, Round::Two, Round::Three, Round::Four] {
            let start = (r.number() - 1) * 16;
            let mut seen = order(r, start);
            seen.sort_unstable();
            assert_eq!(seen, (0..16).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_compress_empty_message_block() {
        let padded = pad(b"");
        let out = compress(State::INITIAL, &schedule(&padded));
        // d41d8cd98f00b204e9800998ecf8427e read back as little-endian words
        assert_eq!(out.words(), [0xd98c1dd4, 0x04b2008f, 0x980980e9, 0x7e42f8ec]);
    }

    #[test]
    fn test_chaining_adds_input_state() {
        let block = [0u8; 64];
        let sched = schedule(&block);
        let zero = State { a: 0, b: 0, c: 0, d: 0 };
        let from_zero = compress(zero, &sched);
        let from_init = compress(State::INITIAL, &sched);
        assert_ne!(from_zero, from_init);
    }

    #[test]
    fn test_state_wrapping_add() {
        let s = State {
            a: u32::MAX,
            b: 1,
            c: 2,
            d: 3,
        };
        let t = s.wrapping_add(State { a: 2, b: 2, c: 2, d: 2 });
        assert_eq!(t.words(), [1, 3, 4, 5]);
        assert_eq!(State::default(), State::INITIAL);
    }
}
