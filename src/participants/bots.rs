//! Built-in decision makers.
//!
//! - `FirstOptionBot`: always takes the first legal option
//! - `RandomBot`: uniform choice from a seeded stream
//! - `ScriptedDecider`: replays a fixed list of answers and records every
//!   request, for driving tests and replays

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::decision::{Decision, DecisionMaker, DecisionRequest, ParticipantKind};
use crate::actions::ActionName;
use crate::core::GameRng;

/// Deterministic bot that takes the first legal option.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstOptionBot;

impl DecisionMaker for FirstOptionBot {
    fn kind(&self) -> ParticipantKind {
        ParticipantKind::Bot
    }

    fn choose(&mut self, request: &DecisionRequest<'_>) -> Decision {
        match request.options.first() {
            Some(option) => Decision::Act(option.clone()),
            None => Decision::EndTurn,
        }
    }
}

/// Bot choosing uniformly among the legal options.
#[derive(Clone, Debug)]
pub struct RandomBot {
    rng: GameRng,
}

impl RandomBot {
    /// Create a bot drawing from the given stream.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Create a bot with its own seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(GameRng::new(seed))
    }
}

impl DecisionMaker for RandomBot {
    fn kind(&self) -> ParticipantKind {
        ParticipantKind::Bot
    }

    fn choose(&mut self, request: &DecisionRequest<'_>) -> Decision {
        match self.rng.choose(request.options) {
            Some(option) => Decision::Act(option.clone()),
            None => Decision::EndTurn,
        }
    }
}

/// One recorded request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub options: Vec<ActionName>,
    pub attempt: u32,
}

/// Shared log of the requests a [`ScriptedDecider`] received.
///
/// The decider is moved into its participant, so tests keep a clone of the
/// transcript to inspect afterwards.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Transcript {
    /// Lock the log, recovering it if a holder panicked.
    fn lock(&self) -> MutexGuard<'_, Vec<RecordedRequest>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, request: &DecisionRequest<'_>) {
        self.lock().push(RecordedRequest {
            options: request.options.to_vec(),
            attempt: request.attempt,
        });
    }

    /// Number of times the decider was asked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if the decider was never asked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of every request so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().clone()
    }

    /// Attempt counter of every request so far.
    #[must_use]
    pub fn attempts(&self) -> Vec<u32> {
        self.requests().into_iter().map(|r| r.attempt).collect()
    }
}

/// Replays a fixed list of answers.
///
/// Once the script runs out every request is answered with
/// [`Decision::EndTurn`].
#[derive(Debug)]
pub struct ScriptedDecider {
    kind: ParticipantKind,
    script: VecDeque<Decision>,
    transcript: Transcript,
}

impl ScriptedDecider {
    /// Scripted answers treated as coming from a human.
    pub fn human(script: impl IntoIterator<Item = Decision>) -> Self {
        Self::new(ParticipantKind::Human, script)
    }

    /// Scripted answers treated as coming from a bot.
    pub fn bot(script: impl IntoIterator<Item = Decision>) -> Self {
        Self::new(ParticipantKind::Bot, script)
    }

    pub fn new(kind: ParticipantKind, script: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            kind,
            script: script.into_iter().collect(),
            transcript: Transcript::default(),
        }
    }

    /// Handle onto the shared request log.
    #[must_use]
    pub fn transcript(&self) -> Transcript {
        self.transcript.clone()
    }
}

impl DecisionMaker for ScriptedDecider {
    fn kind(&self) -> ParticipantKind {
        self.kind
    }

    fn choose(&mut self, request: &DecisionRequest<'_>) -> Decision {
        self.transcript.record(request);
        self.script.pop_front().unwrap_or(Decision::EndTurn)
    }
}
