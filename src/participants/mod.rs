//! Participants and the decision makers behind them.
//!
//! A [`Participant`] pairs an action registry with a [`DecisionMaker`].
//! Human and bot participants run through identical engine paths; the
//! decision maker's [`ParticipantKind`] only changes how an illegal answer
//! is handled.

pub mod bots;
pub mod decision;
mod participant;

pub use bots::{FirstOptionBot, RandomBot, RecordedRequest, ScriptedDecider, Transcript};
pub use decision::{Decision, DecisionMaker, DecisionRequest, ParticipantKind, RequestKind};
pub use participant::{Participant, Roster};
