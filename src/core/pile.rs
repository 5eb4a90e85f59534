//! Shared ordered piles (draw pile, discard pile, hands).
//!
//! The engine does not know what a card is. A `Pile<T>` is just an ordered
//! sequence whose top is its tail, mutated only by the acting participant's
//! action effects. Backed by `im::Vector` so a session can snapshot its
//! piles cheaply.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::rng::GameRng;

/// Ordered sequence of card-like values. Top = end of the sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile<T: Clone> {
    items: Vector<T>,
}

impl<T: Clone> Default for Pile<T> {
    fn default() -> Self {
        Self { items: Vector::new() }
    }
}

impl<T: Clone> Pile<T> {
    /// Create an empty pile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the pile is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Put an item on top.
    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Put an item at the bottom.
    pub fn put_bottom(&mut self, item: T) {
        self.items.push_front(item);
    }

    /// Take the top item.
    pub fn draw(&mut self) -> Option<T> {
        self.items.pop_back()
    }

    /// Move the top item of `self` onto `target`, returning a copy of it.
    pub fn draw_into(&mut self, target: &mut Pile<T>) -> Option<T> {
        let item = self.draw()?;
        target.push(item.clone());
        Some(item)
    }

    /// Look at the top item.
    #[must_use]
    pub fn peek_top(&self) -> Option<&T> {
        self.items.back()
    }

    /// Look at the bottom item.
    #[must_use]
    pub fn peek_bottom(&self) -> Option<&T> {
        self.items.front()
    }

    /// Item at `index`, counted from the bottom.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Remove and return the item at `index`, counted from the bottom.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Position of the first item matching `pred`, counted from the bottom.
    pub fn position(&self, pred: impl Fn(&T) -> bool) -> Option<usize> {
        self.items.iter().position(pred)
    }

    /// Iterate from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Shuffle in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut items: Vec<T> = self.items.iter().cloned().collect();
        rng.shuffle(&mut items);
        self.items = items.into_iter().collect();
    }
}

impl<T: Clone> FromIterator<T> for Pile<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
