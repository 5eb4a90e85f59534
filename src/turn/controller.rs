//! Turn controller.
//!
//! Drives one participant through the phase sequence. Within a phase it
//! repeatedly builds the legal action set and either performs the only
//! option directly or suspends on the participant's decision maker. A turn
//! stops early when the participant ends it, when the participant is
//! eliminated, or the moment the game-over check fires.
//!
//! ## Stages
//!
//! `TurnStart` → `PhaseActive(first)` → ... → `PhaseActive(last)` → `TurnEnd`

use log::{debug, warn};

use crate::actions::{ActionContext, ActionName, ActionOutcome, LegalityContext};
use crate::core::{ActionRecord, EngineError, ParticipantId, PhaseConfig, PhaseId, PhaseSequence, Result};
use crate::participants::decision::{decide, Decision, DecisionRequest, RequestKind};
use crate::participants::Roster;

/// Where the controller is within a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TurnStage {
    #[default]
    TurnStart,
    PhaseActive(PhaseId),
    TurnEnd,
}

/// Why a turn ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TurnEnd {
    /// Every phase ran to completion.
    #[default]
    Completed,
    /// The participant ended the turn, by decision or through an effect.
    EndedByParticipant,
    /// The game-over check fired.
    GameOver,
    /// The acting participant was eliminated.
    Eliminated,
}

/// Summary of a finished turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub participant: ParticipantId,
    pub turn: u32,
    /// Phases entered, in order.
    pub phases: Vec<PhaseId>,
    /// Actions performed, in order.
    pub records: Vec<ActionRecord>,
    /// How many times the decision maker was asked for an action. Retries
    /// and sub-choices are not counted.
    pub decisions: u32,
    pub end: TurnEnd,
}

impl TurnReport {
    fn new(participant: ParticipantId, turn: u32) -> Self {
        Self {
            participant,
            turn,
            phases: Vec::new(),
            records: Vec::new(),
            decisions: 0,
            end: TurnEnd::Completed,
        }
    }

    /// Names of the performed actions, in order.
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.action.as_str())
    }
}

/// Everything a turn reads or mutates.
pub struct TurnScope<'a, S> {
    pub phases: &'a PhaseSequence,
    pub state: &'a mut S,
    pub roster: &'a mut Roster<S>,
    pub actor: ParticipantId,
    pub turn: u32,
}

enum PhaseExit {
    Next,
    Turn(TurnEnd),
}

/// Runs turns, one at a time.
#[derive(Clone, Debug, Default)]
pub struct TurnController {
    stage: TurnStage,
    max_decision_retries: u32,
}

impl TurnController {
    #[must_use]
    pub fn new(max_decision_retries: u32) -> Self {
        Self {
            stage: TurnStage::TurnStart,
            max_decision_retries,
        }
    }

    #[must_use]
    pub fn stage(&self) -> TurnStage {
        self.stage
    }

    /// Phase of the turn in progress, if any.
    #[must_use]
    pub fn current_phase(&self) -> Option<PhaseId> {
        match self.stage {
            TurnStage::PhaseActive(phase) => Some(phase),
            _ => None,
        }
    }

    /// Run one full turn for `scope.actor`.
    ///
    /// `game_over` is consulted before every phase and after every action;
    /// once it returns true no further action is performed.
    pub fn run_turn<S, G>(&mut self, scope: TurnScope<'_, S>, mut game_over: G) -> Result<TurnReport>
    where
        G: FnMut(&S, &Roster<S>) -> bool,
    {
        let TurnScope {
            phases,
            state,
            roster,
            actor,
            turn,
        } = scope;

        let participant = roster.get(actor).ok_or(EngineError::UnknownParticipant(actor))?;
        self.stage = TurnStage::TurnStart;
        debug!("turn {} starts for {} ({})", turn, actor, participant.name());

        let mut report = TurnReport::new(actor, turn);
        report.end = if participant.is_eliminated() {
            TurnEnd::Eliminated
        } else {
            self.run_phases(phases, state, roster, actor, turn, &mut game_over, &mut report)?
        };

        self.stage = TurnStage::TurnEnd;
        debug!(
            "turn {} ends for {}: {:?} after {} action(s)",
            turn,
            actor,
            report.end,
            report.records.len()
        );
        Ok(report)
    }

    #[allow(clippy::too_many_arguments)]
    fn run_phases<S, G>(
        &mut self,
        phases: &PhaseSequence,
        state: &mut S,
        roster: &mut Roster<S>,
        actor: ParticipantId,
        turn: u32,
        game_over: &mut G,
        report: &mut TurnReport,
    ) -> Result<TurnEnd>
    where
        G: FnMut(&S, &Roster<S>) -> bool,
    {
        for phase in phases.iter() {
            if game_over(&*state, &*roster) {
                return Ok(TurnEnd::GameOver);
            }

            self.stage = TurnStage::PhaseActive(phase.id);
            report.phases.push(phase.id);
            debug!("{} enters {} ({})", actor, phase.name, phase.id);

            if let PhaseExit::Turn(end) = self.run_phase(phase, state, roster, actor, turn, game_over, report)? {
                return Ok(end);
            }
        }
        Ok(TurnEnd::Completed)
    }

    #[allow(clippy::too_many_arguments)]
    fn run_phase<S, G>(
        &mut self,
        phase: &PhaseConfig,
        state: &mut S,
        roster: &mut Roster<S>,
        actor: ParticipantId,
        turn: u32,
        game_over: &mut G,
        report: &mut TurnReport,
    ) -> Result<PhaseExit>
    where
        G: FnMut(&S, &Roster<S>) -> bool,
    {
        let mut performed = 0usize;

        loop {
            let participant = roster.get_mut(actor).ok_or(EngineError::UnknownParticipant(actor))?;
            let legal = participant.actions().legal_names(&LegalityContext {
                state: &*state,
                actor,
                phase: phase.id,
                turn,
            });

            if legal.is_empty() {
                if performed == 0 && !phase.allow_empty {
                    return Err(EngineError::NoLegalAction {
                        participant: actor,
                        phase: phase.id,
                    });
                }
                return Ok(PhaseExit::Next);
            }

            let (registry, decider) = participant.parts_mut();
            let chosen: ActionName = match legal.as_slice() {
                [only] => only.clone(),
                _ => {
                    report.decisions += 1;
                    let request = DecisionRequest {
                        participant: actor,
                        phase: phase.id,
                        options: &legal,
                        kind: RequestKind::Action,
                        attempt: 0,
                    };
                    match decide(&mut *decider, request, self.max_decision_retries)? {
                        Decision::Act(name) => name,
                        Decision::EndTurn => return Ok(PhaseExit::Turn(TurnEnd::EndedByParticipant)),
                        Decision::Forfeit => {
                            warn!("{} forfeits {}", actor, phase.id);
                            return Ok(PhaseExit::Next);
                        }
                    }
                }
            };

            let action = registry.get(&chosen).ok_or_else(|| EngineError::IllegalActionAttempted {
                participant: actor,
                option: chosen.clone(),
            })?;
            let mut ctx = ActionContext::new(&mut *state, actor, phase.id, turn, decider, self.max_decision_retries);
            let outcome = action.perform(&mut ctx)?;
            let eliminations = ctx.into_eliminations();

            performed += 1;
            debug!("{} performs '{}' in {}: {:?}", actor, chosen, phase.id, outcome);
            let sequence = report.records.len() as u32;
            report.records.push(ActionRecord::new(actor, chosen, phase.id, turn, sequence));

            for id in eliminations {
                roster
                    .get_mut(id)
                    .ok_or(EngineError::UnknownParticipant(id))?
                    .eliminate();
                debug!("{} is eliminated", id);
            }

            if game_over(&*state, &*roster) {
                return Ok(PhaseExit::Turn(TurnEnd::GameOver));
            }
            if roster[actor].is_eliminated() {
                return Ok(PhaseExit::Turn(TurnEnd::Eliminated));
            }

            match outcome {
                ActionOutcome::Continue => {}
                ActionOutcome::EndPhase => return Ok(PhaseExit::Next),
                ActionOutcome::EndTurn => return Ok(PhaseExit::Turn(TurnEnd::EndedByParticipant)),
            }
        }
    }
}
