//! Deterministic random number stream.
//!
//! Every random decision in a run (tile layout, dice, enemy selection, loot)
//! draws from one [`RngStream`] stored in the game state. The stream is
//! explicit and threadable: given the same seed and the same sequence of
//! draws it reproduces bit-exactly, which is what makes replay-by-seed work.
//!
//! The generator is PCG-XSH-RR: 64-bit LCG state, 32-bit permuted output.

/// Seeded PCG stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RngStream {
    state: u64,
}

impl RngStream {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a stream seeded from an integer run seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Resets the stream to the given seed.
    pub fn reseed(&mut self, seed: u64) {
        self.state = seed;
    }

    /// Current internal state (for snapshots and diagnostics).
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Pure step function: returns the drawn value and the successor state.
    ///
    /// `state' = state × multiplier + increment (mod 2^64)`, output is the
    /// XSH-RR permutation of `state'`.
    #[inline]
    pub fn step(state: u64) -> (u32, u64) {
        let next = state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);

        // XOR upper bits with lower bits, shift right
        let xorshifted = (((next >> 18) ^ next) >> 27) as u32;
        // Use upper bits to determine rotation amount
        let rot = (next >> 59) as u32;

        (xorshifted.rotate_right(rot), next)
    }

    /// Draws the next raw 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        let (value, next) = Self::step(self.state);
        self.state = next;
        value
    }

    /// Draws a value in `[0, 1)`.
    pub fn next01(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Draws an integer in `[min, max]` inclusive.
    ///
    /// Returns `min` without consuming a draw when the range is empty.
    pub fn next_int(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = u64::from(max - min) + 1;
        min + (u64::from(self.next_u32()) % range) as u32
    }

    /// Rolls a die with `sides` faces (1..=sides).
    pub fn roll_die(&mut self, sides: u32) -> u32 {
        self.next_int(1, sides.max(1))
    }

    /// Picks one element uniformly.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.next_int(0, (items.len() - 1) as u32) as usize;
        items.get(index)
    }

    /// Draws a key with probability proportional to its weight.
    ///
    /// Uses a single draw in `[0, total)` and walks the cumulative sum by
    /// subtraction, so ties resolve in enumeration order and a miss is never
    /// re-drawn. Returns `None` (without drawing) if every weight is zero.
    ///
    /// The scaling product is taken in 128 bits, so any number of `u32`
    /// weights is accepted.
    pub fn weighted_pick<K: Copy>(&mut self, entries: &[(K, u32)]) -> Option<K> {
        let total: u64 = entries.iter().map(|(_, weight)| u64::from(*weight)).sum();
        if total == 0 {
            return None;
        }

        let mut roll = ((u128::from(self.next_u32()) * u128::from(total)) >> 32) as u64;
        for (key, weight) in entries {
            let weight = u64::from(*weight);
            if roll < weight {
                return Some(*key);
            }
            roll -= weight;
        }

        // Unreachable while roll < total; keep the last weighted key as a guard.
        entries
            .iter()
            .rev()
            .find(|(_, weight)| *weight > 0)
            .map(|(key, _)| *key)
    }

    /// Returns true with the given percent chance (0..=100).
    pub fn chance(&mut self, percent: u32) -> bool {
        self.next_int(1, 100) <= percent
    }
}
