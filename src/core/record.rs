//! Action history records.

use serde::{Deserialize, Serialize};

use super::config::PhaseId;
use super::ids::ParticipantId;

/// A performed action with the metadata needed for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The participant who performed the action.
    pub participant: ParticipantId,

    /// Name the action is registered under.
    pub action: String,

    /// Phase the action was performed in.
    pub phase: PhaseId,

    /// Turn number (starts at 1).
    pub turn: u32,

    /// Sequence number within the turn.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(
        participant: ParticipantId,
        action: impl Into<String>,
        phase: PhaseId,
        turn: u32,
        sequence: u32,
    ) -> Self {
        Self {
            participant,
            action: action.into(),
            phase,
            turn,
            sequence,
        }
    }
}
