//! Simple shedding game implementation.

use serde::{Deserialize, Serialize};

use crate::actions::{ActionContext, ActionOutcome, ActionRegistry, LegalityContext};
use crate::core::{EngineError, GameRng, ParticipantId, ParticipantMap, PhaseConfig, PhaseId, PhaseSequence, Pile, Result};
use crate::participants::Roster;
use crate::session::{GameRules, Standings};
use crate::turn::Ring;

/// Action names of the simple game.
pub const DRAW: &str = "Draw";
pub const PLAY: &str = "Play";
pub const PASS: &str = "Pass";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    fn letter(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: u8,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: u8, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Can this card go on top of `top`? Anything goes on an empty pile.
    #[must_use]
    pub fn plays_on(&self, top: Option<&Card>) -> bool {
        top.map_or(true, |t| t.suit == self.suit || t.rank == self.rank)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit.letter())
    }
}

/// Shared state of the simple game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleState {
    pub deck: Pile<Card>,
    pub discard: Pile<Card>,
    /// Cleared discards; never re-enter play.
    pub out_of_play: Pile<Card>,
    pub hands: ParticipantMap<Pile<Card>>,
    /// Suit of the deck's bottom card after the deal.
    pub trump: Option<Suit>,
    /// Participants who emptied their hand for good, in order.
    pub finished: Vec<ParticipantId>,
}

impl SimpleState {
    /// Cards in a participant's hand that may be played right now.
    #[must_use]
    pub fn playable(&self, participant: ParticipantId) -> Vec<Card> {
        let top = self.discard.peek_top();
        self.hands
            .get(participant)
            .map(|hand| hand.iter().filter(|c| c.plays_on(top)).copied().collect())
            .unwrap_or_default()
    }

    /// Number of cards a participant holds.
    #[must_use]
    pub fn hand_len(&self, participant: ParticipantId) -> usize {
        self.hands.get(participant).map_or(0, Pile::len)
    }

    fn hand_mut(&mut self, participant: ParticipantId) -> Result<&mut Pile<Card>> {
        self.hands
            .get_mut(participant)
            .ok_or(EngineError::UnknownParticipant(participant))
    }
}

/// Shedding card game used to exercise the engine end to end.
#[derive(Clone, Debug)]
pub struct SimpleGame {
    hand_size: usize,
    lowest_rank: u8,
}

impl Default for SimpleGame {
    fn default() -> Self {
        SimpleGameBuilder::new().build().0
    }
}

/// Builder for creating a SimpleGame.
#[derive(Clone, Debug)]
pub struct SimpleGameBuilder {
    hand_size: usize,
    lowest_rank: u8,
}

impl Default for SimpleGameBuilder {
    fn default() -> Self {
        Self {
            hand_size: 6,
            lowest_rank: 6,
        }
    }
}

impl SimpleGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards each participant holds after drawing.
    pub fn hand_size(mut self, size: usize) -> Self {
        assert!(size >= 1, "Hand size must be at least 1");
        self.hand_size = size;
        self
    }

    /// Lowest rank in the deck; aces are 14.
    pub fn lowest_rank(mut self, rank: u8) -> Self {
        assert!((2..=14).contains(&rank), "Rank must be 2-14");
        self.lowest_rank = rank;
        self
    }

    /// Build the rules and an empty state for the session to deal into.
    pub fn build(self) -> (SimpleGame, SimpleState) {
        let game = SimpleGame {
            hand_size: self.hand_size,
            lowest_rank: self.lowest_rank,
        };
        (game, SimpleState::default())
    }
}

impl SimpleGame {
    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    /// Full deck in rank-major order.
    #[must_use]
    pub fn deck(&self) -> Vec<Card> {
        (self.lowest_rank..=14)
            .flat_map(|rank| Suit::ALL.into_iter().map(move |suit| Card::new(rank, suit)))
            .collect()
    }
}

impl GameRules for SimpleGame {
    type State = SimpleState;

    fn phases(&self) -> PhaseSequence {
        PhaseSequence::new(vec![
            PhaseConfig::new(PhaseId::DRAW, "Draw").allow_empty(),
            // Pass is always legal, so this phase is never empty
            PhaseConfig::new(PhaseId::PLAY, "Play"),
        ])
    }

    fn register_actions(&self, _participant: ParticipantId, actions: &mut ActionRegistry<SimpleState>) {
        let hand_size = self.hand_size;

        actions.register(
            DRAW,
            move |ctx: &LegalityContext<'_, SimpleState>| {
                ctx.phase == PhaseId::DRAW
                    && !ctx.state.deck.is_empty()
                    && ctx.state.hand_len(ctx.actor) < hand_size
            },
            move |ctx: &mut ActionContext<'_, SimpleState>| {
                let actor = ctx.actor;
                let SimpleState { deck, hands, .. } = &mut *ctx.state;
                let hand = hands.get_mut(actor).ok_or(EngineError::UnknownParticipant(actor))?;
                while hand.len() < hand_size && deck.draw_into(hand).is_some() {}
                Ok(ActionOutcome::EndPhase)
            },
        );

        actions.register(
            PLAY,
            |ctx: &LegalityContext<'_, SimpleState>| {
                ctx.phase == PhaseId::PLAY && !ctx.state.playable(ctx.actor).is_empty()
            },
            |ctx: &mut ActionContext<'_, SimpleState>| {
                let actor = ctx.actor;
                let options: Vec<String> = ctx.state.playable(actor).iter().map(Card::to_string).collect();
                let Some(choice) = ctx.choose(&options)? else {
                    return Ok(ActionOutcome::EndTurn);
                };

                let hand = ctx.state.hand_mut(actor)?;
                let index = hand
                    .position(|c| c.to_string() == choice)
                    .ok_or_else(|| EngineError::IllegalActionAttempted {
                        participant: actor,
                        option: choice.clone(),
                    })?;
                let card = hand.remove_at(index).ok_or(EngineError::UnknownParticipant(actor))?;
                let emptied = hand.is_empty();
                ctx.state.discard.push(card);

                if emptied && ctx.state.deck.is_empty() {
                    finish(ctx);
                }
                Ok(ActionOutcome::EndPhase)
            },
        );

        actions.register(
            PASS,
            |ctx: &LegalityContext<'_, SimpleState>| ctx.phase == PhaseId::PLAY,
            |ctx: &mut ActionContext<'_, SimpleState>| {
                let state = &mut *ctx.state;
                while let Some(card) = state.discard.draw() {
                    state.out_of_play.push(card);
                }
                if state.hand_len(ctx.actor) == 0 && state.deck.is_empty() {
                    finish(ctx);
                }
                Ok(ActionOutcome::EndTurn)
            },
        );
    }

    fn deal(&mut self, state: &mut SimpleState, seats: &[ParticipantId], rng: &mut GameRng) -> Result<()> {
        let mut deck: Pile<Card> = self.deck().into_iter().collect();
        deck.shuffle(rng);

        let count = seats.iter().map(|s| s.index() + 1).max().unwrap_or(0);
        let mut hands = ParticipantMap::from_fn(count, |_| Pile::new());
        for _ in 0..self.hand_size {
            for &seat in seats {
                deck.draw_into(&mut hands[seat]);
            }
        }

        *state = SimpleState {
            trump: deck.peek_bottom().map(|c| c.suit),
            deck,
            hands,
            ..SimpleState::default()
        };
        Ok(())
    }

    /// The holder of the lowest trump starts.
    fn first_participant(&self, state: &SimpleState, ring: &Ring) -> Option<ParticipantId> {
        let lowest_trump = |seat: &ParticipantId| {
            state
                .hands
                .get(*seat)
                .into_iter()
                .flat_map(Pile::iter)
                .filter(|c| Some(c.suit) == state.trump)
                .map(|c| c.rank)
                .min()
        };

        ring.iter()
            .filter_map(|seat| lowest_trump(&seat).map(|rank| (rank, seat)))
            .min()
            .map(|(_, seat)| seat)
            .or_else(|| ring.seats().first().copied())
    }

    /// Over once the deck is gone and at most one participant holds cards.
    fn evaluate_game_over(&self, state: &SimpleState, roster: &Roster<SimpleState>) -> Option<Standings> {
        if !state.deck.is_empty() {
            return None;
        }

        let holding: Vec<ParticipantId> = roster.ids().filter(|&id| state.hand_len(id) > 0).collect();
        if holding.len() > 1 {
            return None;
        }

        let mut winners = state.finished.clone();
        for id in roster.ids() {
            if !holding.contains(&id) && !winners.contains(&id) {
                winners.push(id);
            }
        }
        Some(Standings::new(winners, holding))
    }
}

fn finish(ctx: &mut ActionContext<'_, SimpleState>) {
    let actor = ctx.actor;
    if !ctx.state.finished.contains(&actor) {
        ctx.state.finished.push(actor);
    }
    ctx.eliminate(actor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SessionConfig;
    use crate::participants::FirstOptionBot;
    use crate::session::GameSession;

    fn session(players: usize, seed: u64) -> GameSession<SimpleGame> {
        let (game, state) = SimpleGameBuilder::new().build();
        let mut session = GameSession::new(game, state, SessionConfig::default().with_seed(seed));
        for i in 0..players {
            session.add_participant(format!("bot {}", i), FirstOptionBot).unwrap();
        }
        session
    }

    #[test]
    fn test_deck_composition() {
        let (game, _) = SimpleGameBuilder::new().lowest_rank(6).build();
        let deck = game.deck();

        assert_eq!(deck.len(), 36);
        assert_eq!(deck[0], Card::new(6, Suit::Clubs));
        assert_eq!(deck[35], Card::new(14, Suit::Spades));
    }

    #[test]
    fn test_plays_on() {
        let top = Card::new(9, Suit::Hearts);

        assert!(Card::new(9, Suit::Clubs).plays_on(Some(&top)));
        assert!(Card::new(12, Suit::Hearts).plays_on(Some(&top)));
        assert!(!Card::new(12, Suit::Clubs).plays_on(Some(&top)));
        assert!(Card::new(12, Suit::Clubs).plays_on(None));
        assert_eq!(top.to_string(), "9H");
    }

    #[test]
    fn test_deal() {
        let mut session = session(3, 1);
        session.setup().unwrap();
        let state = session.state();

        for id in session.roster().ids() {
            assert_eq!(state.hand_len(id), 6);
        }
        assert_eq!(state.deck.len(), 36 - 18);
        assert_eq!(state.trump, state.deck.peek_bottom().map(|c| c.suit));
    }

    #[test]
    fn test_lowest_trump_starts() {
        let mut session = session(4, 8);
        session.setup().unwrap();
        let state = session.state();
        let trump = state.trump.unwrap();
        let first = session.current_participant().unwrap();

        let lowest = |id: ParticipantId| {
            state.hands[id]
                .iter()
                .filter(|c| c.suit == trump)
                .map(|c| c.rank)
                .min()
        };
        if let Some(rank) = lowest(first) {
            for id in session.roster().ids() {
                assert!(lowest(id).map_or(true, |r| r >= rank));
            }
        }
    }

    #[test]
    fn test_game_to_completion() {
        let mut session = session(3, 5);
        let standings = session.run().unwrap();

        assert!(standings.losers.len() <= 1);
        assert_eq!(standings.winners.len() + standings.losers.len(), 3);
        assert!(session.state().deck.is_empty());
    }

    #[test]
    fn test_deterministic_replay() {
        let mut a = session(4, 21);
        let mut b = session(4, 21);

        assert_eq!(a.run().unwrap(), b.run().unwrap());
        assert_eq!(a.history(), b.history());
        assert_eq!(a.state(), b.state());
    }
}
