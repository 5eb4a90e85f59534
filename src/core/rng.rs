//! Deterministic random number generation for sessions.
//!
//! Every session owns one `GameRng` seeded from its
//! [`SessionConfig`](super::SessionConfig). Seating, dealing and each
//! built-in bot draw from their own named stream, so reshuffling the deck
//! never moves anyone to a different seat:
//!
//! ```
//! use turn_engine::core::GameRng;
//!
//! let session = GameRng::new(7);
//! let mut seats = vec![0, 1, 2, 3];
//! session.for_context("seats").shuffle(&mut seats);
//!
//! let mut again = vec![0, 1, 2, 3];
//! GameRng::new(7).for_context("seats").shuffle(&mut again);
//! assert_eq!(seats, again);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::ops::Range;

/// Seeded ChaCha8 generator.
///
/// There is no process-wide generator: two sessions with the same seed make
/// identical random choices whatever other sessions are doing.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Stream for a named purpose, derived from the seed alone.
    ///
    /// Drawing from `self` beforehand does not change the result.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn gen_range_usize(&mut self, range: Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    /// Pick one element, `None` for an empty slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }

    /// Capture the position of this stream.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume a stream at a captured position.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable stream position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat_order(rng: &GameRng) -> Vec<u8> {
        let mut seats: Vec<u8> = (0..6).collect();
        rng.for_context("seats").shuffle(&mut seats);
        seats
    }

    #[test]
    fn test_same_seed_same_seats() {
        assert_eq!(seat_order(&GameRng::new(42)), seat_order(&GameRng::new(42)));
    }

    #[test]
    fn test_streams_ignore_parent_draws() {
        let fresh = GameRng::new(5);
        let mut used = GameRng::new(5);
        for _ in 0..10 {
            used.gen_range_usize(0..100);
        }

        assert_eq!(seat_order(&fresh), seat_order(&used));
    }

    #[test]
    fn test_seats_and_deal_differ() {
        let rng = GameRng::new(42);
        let mut seats = rng.for_context("seats");
        let mut deal = rng.for_context("deal");

        let a: Vec<_> = (0..10).map(|_| seats.gen_range_usize(0..1000)).collect();
        let b: Vec<_> = (0..10).map(|_| deal.gen_range_usize(0..1000)).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_bot_streams_differ() {
        let rng = GameRng::new(0);
        let options = ["Draw", "Play", "Pass", "Discard"];
        let picks = |name: &str| {
            let mut bot = rng.for_context(name);
            (0..12).map(|_| *bot.choose(&options).unwrap()).collect::<Vec<_>>()
        };

        assert_ne!(picks("bot:0"), picks("bot:1"));
        assert!(GameRng::new(0).choose::<u8>(&[]).is_none());
    }

    #[test]
    fn test_resume_deal_midway() {
        let mut deal = GameRng::new(9).for_context("deal");
        let mut deck: Vec<u32> = (0..36).collect();
        deal.shuffle(&mut deck);

        let saved = deal.state();
        let json = serde_json::to_string(&saved).unwrap();
        let mut resumed = GameRng::from_state(&serde_json::from_str(&json).unwrap());

        let mut a: Vec<u32> = (0..36).collect();
        let mut b = a.clone();
        deal.shuffle(&mut a);
        resumed.shuffle(&mut b);
        assert_eq!(a, b);
    }
}
