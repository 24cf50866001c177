//! Injected randomness for dice rolls.
//!
//! Randomness is never ambient: every roll asks an [`RngOracle`] for a value
//! derived from an explicit seed. Seeds are built from the game seed stored in
//! [`GameState`](crate::state::GameState), the turn counter, the acting
//! character and a per-roll context index, so replaying the same intents from
//! the same state always yields the same outcomes.

/// Source of deterministic random numbers.
///
/// Implementations must return the same value for the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a die with N sides (1-N inclusive). A zero-sided die rolls 0.
    fn roll_die(&self, seed: u64, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        (self.next_u32(seed) % sides) + 1
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// Stateless: each call performs one LCG step from the provided seed and
/// permutes the result.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Derives the seed for one roll.
///
/// * `game_seed` - fixed at new-game time
/// * `turn` - turn counter before the intent is applied
/// * `actor` - character performing the intent
/// * `context` - index of the roll within the intent (0, 1, 2, ...)
pub fn compute_seed(game_seed: u64, turn: u64, actor: u32, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= turn.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // SplitMix64 finalizer
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic() {
        let rng = PcgRng;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
        assert_ne!(rng.next_u32(42), rng.next_u32(43));
    }

    #[test]
    fn roll_die_stays_in_range() {
        let rng = PcgRng;
        for seed in 0..2_000u64 {
            let roll = rng.roll_die(compute_seed(7, seed, 0, 0), 6);
            assert!((1..=6).contains(&roll), "roll {roll} out of range");
        }
    }

    #[test]
    fn zero_sided_die_rolls_zero() {
        assert_eq!(PcgRng.roll_die(1, 0), 0);
    }

    #[test]
    fn seed_depends_on_every_component() {
        let base = compute_seed(1, 2, 3, 4);
        assert_ne!(base, compute_seed(9, 2, 3, 4));
        assert_ne!(base, compute_seed(1, 9, 3, 4));
        assert_ne!(base, compute_seed(1, 2, 9, 4));
        assert_ne!(base, compute_seed(1, 2, 3, 9));
    }
}
