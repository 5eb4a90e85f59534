//! Decision makers.
//!
//! Whenever more than one action is legal, the controller suspends on the
//! acting participant's [`DecisionMaker`]. Humans (behind a UI or a test
//! script) and bots implement the same trait; only their [`ParticipantKind`]
//! differs, and it decides how an illegal answer is treated.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::actions::ActionName;
use crate::core::{EngineError, ParticipantId, PhaseId, Result};

/// Who stands behind a decision maker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantKind {
    /// Illegal answers are re-prompted a bounded number of times.
    Human,
    /// Illegal answers are a defect and fail immediately.
    Bot,
}

/// What is being asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    /// Pick the next action of the phase.
    Action,
    /// Pick an option inside a running effect.
    SubChoice,
}

/// A single suspension point handed to a decision maker.
#[derive(Clone, Copy, Debug)]
pub struct DecisionRequest<'a> {
    /// The participant being asked.
    pub participant: ParticipantId,
    /// Phase the turn is in.
    pub phase: PhaseId,
    /// Legal options in offering order. Never empty.
    pub options: &'a [ActionName],
    /// Whether this picks an action or a sub-choice.
    pub kind: RequestKind,
    /// 0 on the first ask, then incremented on every re-prompt.
    pub attempt: u32,
}

/// Answer from a decision maker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Take the named option.
    Act(ActionName),
    /// Stop acting and end the turn.
    EndTurn,
    /// Give up on the current phase.
    Forfeit,
}

impl Decision {
    /// Shorthand for `Decision::Act`.
    pub fn act(name: impl Into<ActionName>) -> Self {
        Self::Act(name.into())
    }
}

/// Source of choices for one participant.
pub trait DecisionMaker: Send {
    /// Human or bot.
    fn kind(&self) -> ParticipantKind;

    /// Pick one of `request.options`, or end the turn, or forfeit.
    fn choose(&mut self, request: &DecisionRequest<'_>) -> Decision;
}

impl<D: DecisionMaker + ?Sized> DecisionMaker for Box<D> {
    fn kind(&self) -> ParticipantKind {
        (**self).kind()
    }

    fn choose(&mut self, request: &DecisionRequest<'_>) -> Decision {
        (**self).choose(request)
    }
}

/// Ask `decider` and validate the answer against `request.options`.
///
/// A human naming an unknown option is asked again, up to `max_retries`
/// extra times. A bot doing the same fails on the first answer.
pub(crate) fn decide(
    decider: &mut dyn DecisionMaker,
    mut request: DecisionRequest<'_>,
    max_retries: u32,
) -> Result<Decision> {
    loop {
        match decider.choose(&request) {
            Decision::Act(name) if !request.options.contains(&name) => {
                let retry = decider.kind() == ParticipantKind::Human && request.attempt < max_retries;
                if !retry {
                    return Err(EngineError::IllegalActionAttempted {
                        participant: request.participant,
                        option: name,
                    });
                }
                warn!(
                    "{} chose '{}', not one of {:?}; asking again",
                    request.participant, name, request.options
                );
                request.attempt += 1;
            }
            decision => return Ok(decision),
        }
    }
}
