//! Turn order and turn execution.
//!
//! - `Ring`: fixed cyclic seating with left/right neighbours
//! - `TurnController`: runs one participant through the phase sequence

mod controller;
mod ring;

pub use controller::{TurnController, TurnEnd, TurnReport, TurnScope, TurnStage};
pub use ring::Ring;
