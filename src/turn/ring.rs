//! Seating ring.
//!
//! Seat order is fixed when the game is set up: the roster is shuffled once
//! and each seat's next-clockwise neighbour is the following seat, wrapping
//! around. Eliminated participants keep their seat and are skipped by
//! [`Ring::next_active`].

use log::debug;
use rustc_hash::FxHashMap;

use crate::core::{EngineError, GameRng, ParticipantId, Result, SessionConfig};
use crate::participants::Roster;

/// Cyclic seating order over participant IDs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ring {
    seats: Vec<ParticipantId>,
    positions: FxHashMap<ParticipantId, usize>,
}

impl Ring {
    /// Shuffle `participants` into a ring.
    ///
    /// Fails with [`EngineError::InvalidPlayerCount`] outside the bounds in
    /// `config`.
    pub fn build(participants: Vec<ParticipantId>, config: &SessionConfig, rng: &mut GameRng) -> Result<Self> {
        let mut seats = participants;
        Self::check_count(seats.len(), config)?;
        rng.shuffle(&mut seats);
        Ok(Self::from_seats(seats))
    }

    /// Seat `participants` in exactly the given order.
    pub fn with_order(participants: Vec<ParticipantId>, config: &SessionConfig) -> Result<Self> {
        Self::check_count(participants.len(), config)?;
        Ok(Self::from_seats(participants))
    }

    fn check_count(count: usize, config: &SessionConfig) -> Result<()> {
        if config.accepts_player_count(count) {
            Ok(())
        } else {
            Err(EngineError::InvalidPlayerCount {
                count,
                min: config.min_player_count,
                max: config.max_player_count,
            })
        }
    }

    fn from_seats(seats: Vec<ParticipantId>) -> Self {
        let positions: FxHashMap<_, _> = seats.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        debug_assert_eq!(positions.len(), seats.len(), "participant seated twice");
        Self { seats, positions }
    }

    /// Write every seat's neighbours into the roster.
    pub fn wire<S>(&self, roster: &mut Roster<S>) -> Result<()> {
        for &id in &self.seats {
            let left = self.left_of(id)?;
            let right = self.right_of(id)?;
            roster
                .get_mut(id)
                .ok_or(EngineError::UnknownParticipant(id))?
                .set_neighbors(left, right);
        }
        Ok(())
    }

    /// Number of seats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Check if the ring has no seats.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Seats in ring order, starting from seat 0.
    #[must_use]
    pub fn seats(&self) -> &[ParticipantId] {
        &self.seats
    }

    /// Iterate over seats in ring order.
    pub fn iter(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.seats.iter().copied()
    }

    #[must_use]
    pub fn contains(&self, id: ParticipantId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Seat index of a participant.
    #[must_use]
    pub fn position_of(&self, id: ParticipantId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    fn seat(&self, id: ParticipantId) -> Result<usize> {
        self.position_of(id).ok_or(EngineError::UnknownParticipant(id))
    }

    /// Next seat clockwise.
    pub fn left_of(&self, id: ParticipantId) -> Result<ParticipantId> {
        let i = self.seat(id)?;
        Ok(self.seats[(i + 1) % self.seats.len()])
    }

    /// Next seat counterclockwise.
    pub fn right_of(&self, id: ParticipantId) -> Result<ParticipantId> {
        let i = self.seat(id)?;
        let n = self.seats.len();
        Ok(self.seats[(i + n - 1) % n])
    }

    /// One step in the configured direction, ignoring elimination.
    pub fn advance(&self, current: ParticipantId, clockwise: bool) -> Result<ParticipantId> {
        if clockwise {
            self.left_of(current)
        } else {
            self.right_of(current)
        }
    }

    /// Next seat in the configured direction whose occupant is still active.
    ///
    /// Visits at most one full lap, ending back at `current`; returns `None`
    /// when every seat is eliminated.
    pub fn next_active(
        &self,
        current: ParticipantId,
        clockwise: bool,
        is_eliminated: impl Fn(ParticipantId) -> bool,
    ) -> Result<Option<ParticipantId>> {
        let mut candidate = current;
        for _ in 0..self.seats.len() {
            candidate = self.advance(candidate, clockwise)?;
            if !is_eliminated(candidate) {
                debug!("turn passes from {} to {}", current, candidate);
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: u8) -> Vec<ParticipantId> {
        (0..n).map(ParticipantId::new).collect()
    }

    #[test]
    fn test_build_rejects_bad_counts() {
        let config = SessionConfig::default();
        let mut rng = GameRng::new(1);

        let err = Ring::build(ids(1), &config, &mut rng).unwrap_err();
        assert_eq!(err, EngineError::InvalidPlayerCount { count: 1, min: 2, max: 6 });
        assert!(Ring::build(ids(7), &config, &mut rng).is_err());
        assert!(Ring::build(ids(6), &config, &mut rng).is_ok());
    }

    #[test]
    fn test_build_rejects_empty_roster_with_zero_minimum() {
        let config: SessionConfig = serde_json::from_str(r#"{"min_player_count": 0}"#).unwrap();

        let err = Ring::build(Vec::new(), &config, &mut GameRng::new(0)).unwrap_err();
        assert_eq!(err, EngineError::InvalidPlayerCount { count: 0, min: 0, max: 6 });
        assert!(Ring::with_order(Vec::new(), &config).is_err());
    }

    #[test]
    fn test_build_is_a_permutation() {
        let config = SessionConfig::default();
        let ring = Ring::build(ids(6), &config, &mut GameRng::new(3)).unwrap();

        let mut seated = ring.seats().to_vec();
        seated.sort();
        assert_eq!(seated, ids(6));
    }

    #[test]
    fn test_build_deterministic_for_seed() {
        let config = SessionConfig::default();
        let a = Ring::build(ids(5), &config, &mut GameRng::new(11)).unwrap();
        let b = Ring::build(ids(5), &config, &mut GameRng::new(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_neighbors_wrap() {
        let ring = Ring::with_order(ids(3), &SessionConfig::default()).unwrap();
        let p = ParticipantId::new;

        assert_eq!(ring.left_of(p(0)).unwrap(), p(1));
        assert_eq!(ring.left_of(p(2)).unwrap(), p(0));
        assert_eq!(ring.right_of(p(0)).unwrap(), p(2));
        assert_eq!(ring.advance(p(1), false).unwrap(), p(0));
    }

    #[test]
    fn test_two_seats_are_mutual_neighbors() {
        let ring = Ring::with_order(ids(2), &SessionConfig::default()).unwrap();
        let p = ParticipantId::new;

        assert_eq!(ring.left_of(p(0)).unwrap(), p(1));
        assert_eq!(ring.right_of(p(0)).unwrap(), p(1));
    }

    #[test]
    fn test_unknown_participant() {
        let ring = Ring::with_order(ids(2), &SessionConfig::default()).unwrap();
        let err = ring.left_of(ParticipantId::new(9)).unwrap_err();
        assert_eq!(err, EngineError::UnknownParticipant(ParticipantId::new(9)));
    }

    #[test]
    fn test_next_active_skips_eliminated() {
        let ring = Ring::with_order(ids(4), &SessionConfig::default()).unwrap();
        let p = ParticipantId::new;
        let out = [p(1), p(2)];

        let next = ring.next_active(p(0), true, |id| out.contains(&id)).unwrap();
        assert_eq!(next, Some(p(3)));
        let next = ring.next_active(p(3), false, |id| out.contains(&id)).unwrap();
        assert_eq!(next, Some(p(0)));
    }

    #[test]
    fn test_next_active_returns_to_current() {
        let ring = Ring::with_order(ids(3), &SessionConfig::default()).unwrap();
        let p = ParticipantId::new;

        let next = ring.next_active(p(1), true, |id| id != p(1)).unwrap();
        assert_eq!(next, Some(p(1)));
    }

    #[test]
    fn test_next_active_all_eliminated() {
        let ring = Ring::with_order(ids(3), &SessionConfig::default()).unwrap();
        assert_eq!(ring.next_active(ParticipantId::new(0), true, |_| true).unwrap(), None);
    }
}
