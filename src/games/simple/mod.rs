//! Simple shedding game for testing the engine.
//!
//! A minimal game that exercises every engine path:
//! - A 36-card deck (ranks 6 to ace) is shuffled and six cards dealt to each
//!   participant; the bottom card's suit is trump
//! - The holder of the lowest trump starts
//! - DRAW: refill the hand from the deck (nothing to do once it is gone)
//! - PLAY: put one card matching the top discard's suit or rank, or pass;
//!   passing clears the discard pile
//! - Emptying your hand after the deck is gone takes you out of the game
//! - The last participant still holding cards loses
//!
//! Supports 2-6 participants.

mod game;

pub use game::{Card, SimpleGame, SimpleGameBuilder, SimpleState, Suit, DRAW, PASS, PLAY};
