//! Game sessions.
//!
//! A [`GameSession`] owns the participants, the shared state and the rules
//! of one game. It builds the seating ring, runs turns through the turn
//! controller and stores the standings the first time the rules report the
//! game as over.
//!
//! ## Key Types
//!
//! - `GameRules`: what a concrete game supplies
//! - `GameSession`: the driver
//! - `SessionStage`: Created → Setup → Loop → Terminal
//! - `Standings`: winners and losers

mod lifecycle;
mod rules;
#[allow(clippy::module_inception)]
mod session;

pub use lifecycle::SessionStage;
pub use rules::{GameRules, Standings};
pub use session::GameSession;
