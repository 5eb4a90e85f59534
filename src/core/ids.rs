//! Participant identification and per-participant data storage.
//!
//! ## ParticipantId
//!
//! Roster slot of a participant, assigned in join order. Seat order is a
//! separate concern owned by [`Ring`](crate::turn::Ring).
//!
//! ## ParticipantMap
//!
//! Per-participant data backed by a `Vec` for O(1) access by `ParticipantId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Participant identifier supporting up to 255 participants.
///
/// Indices are 0-based and follow join order: the first participant added
/// to a session is `ParticipantId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub u8);

impl ParticipantId {
    /// Create a new participant ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw roster index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all participant IDs of a roster with `count` entries.
    ///
    /// ```
    /// use turn_engine::core::ParticipantId;
    ///
    /// let ids: Vec<_> = ParticipantId::all(3).collect();
    /// assert_eq!(ids, vec![ParticipantId(0), ParticipantId(1), ParticipantId(2)]);
    /// ```
    pub fn all(count: usize) -> impl Iterator<Item = ParticipantId> {
        (0..count as u8).map(ParticipantId)
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Participant {}", self.0)
    }
}

/// Per-participant data storage with O(1) access.
///
/// Unlike a fixed-size table, a `ParticipantMap` grows as participants join
/// a session, so it may start empty. Entries are only removed before a game
/// is set up; eliminated participants keep their slot so final standings
/// stay inspectable.
///
/// ```
/// use turn_engine::core::{ParticipantId, ParticipantMap};
///
/// let mut wins: ParticipantMap<u32> = ParticipantMap::with_value(2, 0);
/// wins[ParticipantId::new(1)] += 1;
/// assert_eq!(wins[ParticipantId::new(1)], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantMap<T> {
    data: Vec<T>,
}

impl<T> Default for ParticipantMap<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<T> ParticipantMap<T> {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a map with `count` values from a factory function.
    pub fn from_fn(count: usize, factory: impl Fn(ParticipantId) -> T) -> Self {
        assert!(count <= 255, "At most 255 participants supported");

        let data = (0..count as u8).map(|i| factory(ParticipantId(i))).collect();
        Self { data }
    }

    /// Create a map with all entries set to the same value.
    pub fn with_value(count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_fn(count, |_| value.clone())
    }

    /// Append an entry, returning the ID it was stored under.
    pub fn push(&mut self, value: T) -> ParticipantId {
        assert!(self.data.len() < 255, "At most 255 participants supported");
        let id = ParticipantId(self.data.len() as u8);
        self.data.push(value);
        id
    }

    /// Remove an entry, shifting every later entry down one slot.
    ///
    /// Later participants are renumbered, so callers holding IDs past `id`
    /// must refresh them.
    pub fn remove(&mut self, id: ParticipantId) -> Option<T> {
        self.contains(id).then(|| self.data.remove(id.index()))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check if an ID refers to an entry of this map.
    #[must_use]
    pub fn contains(&self, id: ParticipantId) -> bool {
        id.index() < self.data.len()
    }

    /// Get a participant's data, if present.
    #[must_use]
    pub fn get(&self, id: ParticipantId) -> Option<&T> {
        self.data.get(id.index())
    }

    /// Get a participant's data mutably, if present.
    pub fn get_mut(&mut self, id: ParticipantId) -> Option<&mut T> {
        self.data.get_mut(id.index())
    }

    /// Iterate over (ParticipantId, &T) pairs in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (ParticipantId(i as u8), v))
    }

    /// Iterate over (ParticipantId, &mut T) pairs in roster order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ParticipantId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (ParticipantId(i as u8), v))
    }

    /// Iterate over all IDs.
    pub fn ids(&self) -> impl Iterator<Item = ParticipantId> {
        ParticipantId::all(self.data.len())
    }
}

impl<T> Index<ParticipantId> for ParticipantMap<T> {
    type Output = T;

    fn index(&self, id: ParticipantId) -> &Self::Output {
        &self.data[id.index()]
    }
}

impl<T> IndexMut<ParticipantId> for ParticipantMap<T> {
    fn index_mut(&mut self, id: ParticipantId) -> &mut Self::Output {
        &mut self.data[id.index()]
    }
}
