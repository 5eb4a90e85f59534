//! Contexts handed to legality predicates and effects.

use crate::core::{ParticipantId, PhaseId, Result};
use crate::participants::decision::{decide, Decision, DecisionMaker, DecisionRequest, RequestKind};

/// Read-only view for legality predicates.
///
/// Predicates are re-evaluated every time the controller builds the legal
/// set, so they must be cheap and side-effect free.
pub struct LegalityContext<'a, S> {
    /// Shared game state (piles, hands, board).
    pub state: &'a S,
    /// The participant whose action is being checked.
    pub actor: ParticipantId,
    /// Phase the turn is in.
    pub phase: PhaseId,
    /// Turn number (starts at 1).
    pub turn: u32,
}

/// What the controller should do after an effect ran.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Keep offering actions in the current phase.
    #[default]
    Continue,
    /// Move on to the next phase.
    EndPhase,
    /// Skip the remaining phases of this turn.
    EndTurn,
}

/// Mutable access for effects: the only place game state changes.
pub struct ActionContext<'a, S> {
    /// Shared game state (piles, hands, board).
    pub state: &'a mut S,
    /// The participant performing the action.
    pub actor: ParticipantId,
    /// Phase the turn is in.
    pub phase: PhaseId,
    /// Turn number (starts at 1).
    pub turn: u32,
    decider: &'a mut dyn DecisionMaker,
    max_retries: u32,
    eliminations: Vec<ParticipantId>,
}

impl<'a, S> ActionContext<'a, S> {
    pub(crate) fn new(
        state: &'a mut S,
        actor: ParticipantId,
        phase: PhaseId,
        turn: u32,
        decider: &'a mut dyn DecisionMaker,
        max_retries: u32,
    ) -> Self {
        Self {
            state,
            actor,
            phase,
            turn,
            decider,
            max_retries,
            eliminations: Vec::new(),
        }
    }

    /// Ask the acting participant to pick one of `options` (e.g. which card
    /// to discard).
    ///
    /// A single option is returned without asking. `None` means the
    /// participant declined: no options, or it answered with end-of-turn or
    /// forfeit. An answer outside `options` follows the same retry policy
    /// as top-level action choices.
    pub fn choose(&mut self, options: &[String]) -> Result<Option<String>> {
        match options {
            [] => Ok(None),
            [only] => Ok(Some(only.clone())),
            _ => {
                let request = DecisionRequest {
                    participant: self.actor,
                    phase: self.phase,
                    options,
                    kind: RequestKind::SubChoice,
                    attempt: 0,
                };
                match decide(&mut *self.decider, request, self.max_retries)? {
                    Decision::Act(choice) => Ok(Some(choice)),
                    Decision::EndTurn | Decision::Forfeit => Ok(None),
                }
            }
        }
    }

    /// Mark a participant as eliminated once this effect returns.
    ///
    /// Elimination is terminal. The participant stays in the roster and the
    /// ring but is skipped from then on.
    pub fn eliminate(&mut self, participant: ParticipantId) {
        if !self.eliminations.contains(&participant) {
            self.eliminations.push(participant);
        }
    }

    /// Read-only view of the same situation, for reusing predicates.
    pub fn legality(&self) -> LegalityContext<'_, S> {
        LegalityContext {
            state: &*self.state,
            actor: self.actor,
            phase: self.phase,
            turn: self.turn,
        }
    }

    pub(crate) fn into_eliminations(self) -> Vec<ParticipantId> {
        self.eliminations
    }
}
