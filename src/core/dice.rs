//! Dice with an explicit, immutable face list.

use serde::{Deserialize, Serialize};

use super::rng::GameRng;

/// A die whose faces are fixed at construction.
///
/// Each `Dice` owns its faces; there is no shared default list that one
/// game could mutate under another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dice<T> {
    sides: Vec<T>,
}

impl<T: Clone> Dice<T> {
    /// Create a die with the given faces.
    pub fn new(sides: Vec<T>) -> Self {
        assert!(!sides.is_empty(), "A die needs at least one side");
        Self { sides }
    }

    /// The faces of this die.
    #[must_use]
    pub fn sides(&self) -> &[T] {
        &self.sides
    }

    /// Roll `times` times, returning each face rolled.
    pub fn roll(&self, times: usize, rng: &mut GameRng) -> Vec<T> {
        (0..times)
            .map(|_| self.sides[rng.gen_range_usize(0..self.sides.len())].clone())
            .collect()
    }
}

impl Dice<u32> {
    /// Standard six-sided die.
    #[must_use]
    pub fn d6() -> Self {
        Self::new((1..=6).collect())
    }

    /// Roll `times` times and sum the faces.
    pub fn roll_sum(&self, times: usize, rng: &mut GameRng) -> u32 {
        self.roll(times, rng).into_iter().sum()
    }
}
