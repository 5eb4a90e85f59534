//! Game rules trait for concrete games.
//!
//! Games implement `GameRules` to define:
//! - The phase sequence of every turn
//! - Which actions each participant has
//! - How the shared state is dealt
//! - Who starts, and when the game is over

use serde::{Deserialize, Serialize};

use crate::actions::ActionRegistry;
use crate::core::{GameRng, ParticipantId, PhaseSequence, Result};
use crate::participants::Roster;
use crate::turn::Ring;

/// Final standings of a finished game.
///
/// A participant is in at most one of the two lists; participants in
/// neither simply placed in between.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    pub winners: Vec<ParticipantId>,
    pub losers: Vec<ParticipantId>,
}

impl Standings {
    #[must_use]
    pub fn new(winners: Vec<ParticipantId>, losers: Vec<ParticipantId>) -> Self {
        Self { winners, losers }
    }

    /// A game with nobody winning or losing.
    #[must_use]
    pub fn draw() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_winner(&self, participant: ParticipantId) -> bool {
        self.winners.contains(&participant)
    }

    #[must_use]
    pub fn is_loser(&self, participant: ParticipantId) -> bool {
        self.losers.contains(&participant)
    }
}

/// Rules of one game type.
///
/// The session calls these in order: `register_actions` as participants
/// join, `deal` once the ring exists, `first_participant` to pick who
/// starts, then `evaluate_game_over` before the first turn, between phases
/// and after every action.
///
/// ## Implementation Notes
///
/// - `evaluate_game_over` must be free of side effects: the session stores
///   the first `Some` and never asks again.
/// - Randomness must come from the `GameRng` handed to `deal`, so that a
///   seed reproduces the whole game.
pub trait GameRules: Send {
    /// Shared state of one game (piles, hands, board).
    type State: Send;

    /// Phases of every turn, in order.
    fn phases(&self) -> PhaseSequence {
        PhaseSequence::draw_play()
    }

    /// Fill a joining participant's registry.
    fn register_actions(&self, participant: ParticipantId, actions: &mut ActionRegistry<Self::State>);

    /// Prepare the state for play. `seats` is the ring order.
    fn deal(&mut self, state: &mut Self::State, seats: &[ParticipantId], rng: &mut GameRng) -> Result<()> {
        let _ = (state, seats, rng);
        Ok(())
    }

    /// Who takes the first turn. Defaults to the first seat.
    fn first_participant(&self, state: &Self::State, ring: &Ring) -> Option<ParticipantId> {
        let _ = state;
        ring.seats().first().copied()
    }

    /// `Some(standings)` once the game has ended.
    fn evaluate_game_over(&self, state: &Self::State, roster: &Roster<Self::State>) -> Option<Standings>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standings_membership() {
        let p = ParticipantId::new;
        let standings = Standings::new(vec![p(0), p(2)], vec![p(1)]);

        assert!(standings.is_winner(p(0)));
        assert!(!standings.is_winner(p(1)));
        assert!(standings.is_loser(p(1)));
        assert!(!standings.is_loser(p(3)));

        let draw = Standings::draw();
        assert!(!draw.is_winner(p(0)));
        assert!(!draw.is_loser(p(0)));
    }

    #[test]
    fn test_standings_serde() {
        let standings = Standings::new(vec![ParticipantId::new(1)], vec![ParticipantId::new(0)]);
        let json = serde_json::to_string(&standings).unwrap();
        let restored: Standings = serde_json::from_str(&json).unwrap();
        assert_eq!(standings, restored);
    }
}
