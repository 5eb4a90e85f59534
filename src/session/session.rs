//! Game session: owns everything one game needs and drives it.

use im::Vector;
use log::{debug, info};

use super::lifecycle::{Lifecycle, SessionStage};
use super::rules::{GameRules, Standings};
use crate::core::{ActionRecord, EngineError, GameRng, ParticipantId, PhaseId, PhaseSequence, Result, SessionConfig};
use crate::participants::{DecisionMaker, Participant, RandomBot, Roster};
use crate::turn::{Ring, TurnController, TurnReport, TurnScope};

/// A single game of rules `R`.
///
/// ## Lifecycle
///
/// 1. `Created`: add or remove participants
/// 2. `setup()`: seats are shuffled into a ring and the state is dealt
/// 3. `play_turn()` / `run()`: turns rotate around the ring
/// 4. The first game-over evaluation returning standings ends the game;
///    from then on `is_game_over` is answered from the stored standings.
///
/// Sessions share nothing, so independent sessions can run on different
/// threads.
pub struct GameSession<R: GameRules> {
    rules: R,
    config: SessionConfig,
    phases: PhaseSequence,
    state: R::State,
    roster: Roster<R::State>,
    ring: Option<Ring>,
    controller: TurnController,
    rng: GameRng,
    lifecycle: Lifecycle,
    current: Option<ParticipantId>,
    last_phase: Option<PhaseId>,
    standings: Option<Standings>,
    turn: u32,
    history: Vector<ActionRecord>,
}

impl<R: GameRules> GameSession<R> {
    pub fn new(rules: R, state: R::State, config: SessionConfig) -> Self {
        let phases = rules.phases();
        let rng = GameRng::new(config.seed);
        let controller = TurnController::new(config.max_decision_retries);

        Self {
            rules,
            config,
            phases,
            state,
            roster: Roster::new(),
            ring: None,
            controller,
            rng,
            lifecycle: Lifecycle::new(),
            current: None,
            last_phase: None,
            standings: None,
            turn: 0,
            history: Vector::new(),
        }
    }

    // === Participants ===

    /// Add a participant driven by `decider`. Only before setup.
    pub fn add_participant(
        &mut self,
        name: impl Into<String>,
        decider: impl DecisionMaker + 'static,
    ) -> Result<ParticipantId> {
        self.lifecycle.require("add a participant", &[SessionStage::Created])?;
        if self.roster.len() >= self.config.max_player_count {
            return Err(EngineError::InvalidPlayerCount {
                count: self.roster.len() + 1,
                min: self.config.min_player_count,
                max: self.config.max_player_count,
            });
        }

        let id = ParticipantId::new(self.roster.len() as u8);
        let mut participant = Participant::new(id, name, Box::new(decider));
        self.rules.register_actions(id, participant.actions_mut());
        debug!("{} joins as {}", participant.name(), id);
        self.roster.push(participant);
        Ok(id)
    }

    /// Add a random bot seeded from the session seed.
    pub fn add_bot(&mut self, name: impl Into<String>) -> Result<ParticipantId> {
        let rng = self.rng.for_context(&format!("bot:{}", self.roster.len()));
        self.add_participant(name, RandomBot::new(rng))
    }

    /// Remove a participant before setup.
    ///
    /// Later participants move down one ID and get their actions registered
    /// again under the new ID.
    pub fn remove_participant(&mut self, id: ParticipantId) -> Result<Participant<R::State>> {
        self.lifecycle.require("remove a participant", &[SessionStage::Created])?;
        let removed = self.roster.remove(id).ok_or(EngineError::UnknownParticipant(id))?;

        for (new_id, participant) in self.roster.iter_mut().skip(id.index()) {
            participant.reassign(new_id);
            self.rules.register_actions(new_id, participant.actions_mut());
        }
        debug!("{} leaves", removed.name());
        Ok(removed)
    }

    /// Mark a participant as eliminated. Elimination is terminal.
    pub fn eliminate(&mut self, id: ParticipantId) -> Result<()> {
        self.roster
            .get_mut(id)
            .ok_or(EngineError::UnknownParticipant(id))?
            .eliminate();
        debug!("{} is eliminated", id);
        Ok(())
    }

    // === Flow ===

    /// Build the ring, wire neighbours and deal.
    pub fn setup(&mut self) -> Result<()> {
        self.lifecycle.require("set up", &[SessionStage::Created])?;

        let ids = self.roster.ids().collect();
        let ring = Ring::build(ids, &self.config, &mut self.rng.for_context("seats"))?;
        ring.wire(&mut self.roster)?;

        self.rules
            .deal(&mut self.state, ring.seats(), &mut self.rng.for_context("deal"))?;

        let first = self
            .rules
            .first_participant(&self.state, &ring)
            .ok_or(EngineError::EmptyRing)?;
        if !ring.contains(first) {
            return Err(EngineError::UnknownParticipant(first));
        }

        info!(
            "game set up with {} participants, seats {:?}, {} starts",
            ring.len(),
            ring.seats(),
            first
        );
        self.current = Some(first);
        self.ring = Some(ring);
        self.lifecycle.advance("set up", SessionStage::Setup)
    }

    /// Play one turn for the current participant, then pass the turn on.
    pub fn play_turn(&mut self) -> Result<TurnReport> {
        self.is_game_over();
        self.lifecycle
            .require("play a turn", &[SessionStage::Setup, SessionStage::Loop])?;
        let actor = self.current.ok_or(EngineError::EmptyRing)?;
        self.lifecycle.advance("play a turn", SessionStage::Loop)?;
        self.turn += 1;

        let Self {
            rules,
            phases,
            state,
            roster,
            controller,
            standings,
            turn,
            ..
        } = self;
        let report = controller.run_turn(
            TurnScope {
                phases,
                state,
                roster,
                actor,
                turn: *turn,
            },
            |state, roster| {
                if standings.is_none() {
                    *standings = rules.evaluate_game_over(state, roster);
                }
                standings.is_some()
            },
        )?;

        self.last_phase = report.phases.last().copied();
        self.history.extend(report.records.iter().cloned());

        if self.standings.is_some() {
            self.conclude();
            return Ok(report);
        }

        let ring = self.ring.as_ref().ok_or(EngineError::EmptyRing)?;
        let roster = &self.roster;
        let next = ring.next_active(actor, self.config.clockwise, |id| roster[id].is_eliminated())?;
        match next {
            Some(next) => self.current = Some(next),
            None if self.is_game_over() => {}
            None => return Err(EngineError::EmptyRing),
        }
        Ok(report)
    }

    /// Play until the game is over, setting up first if needed.
    pub fn run(&mut self) -> Result<Standings> {
        if self.lifecycle.current() == SessionStage::Created {
            self.setup()?;
        }
        while !self.is_game_over() {
            self.play_turn()?;
        }
        Ok(self.standings.clone().unwrap_or_default())
    }

    /// Whether the game has ended.
    ///
    /// Evaluates the rules until they first report standings; afterwards
    /// the stored standings answer every call. Always false before setup.
    pub fn is_game_over(&mut self) -> bool {
        if self.standings.is_some() {
            return true;
        }
        if self.lifecycle.current() == SessionStage::Created {
            return false;
        }

        self.standings = self.rules.evaluate_game_over(&self.state, &self.roster);
        if self.standings.is_some() {
            self.conclude();
        }
        self.standings.is_some()
    }

    fn conclude(&mut self) {
        if self.lifecycle.current() == SessionStage::Terminal {
            return;
        }
        if self.lifecycle.advance("finish", SessionStage::Terminal).is_ok() {
            let standings = self.standings.clone().unwrap_or_default();
            info!(
                "game over after {} turn(s): winners {:?}, losers {:?}",
                self.turn, standings.winners, standings.losers
            );
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn stage(&self) -> SessionStage {
        self.lifecycle.current()
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn phases(&self) -> &PhaseSequence {
        &self.phases
    }

    #[must_use]
    pub fn state(&self) -> &R::State {
        &self.state
    }

    /// Mutable state, for hosts that script positions.
    pub fn state_mut(&mut self) -> &mut R::State {
        &mut self.state
    }

    #[must_use]
    pub fn roster(&self) -> &Roster<R::State> {
        &self.roster
    }

    pub fn participant(&self, id: ParticipantId) -> Result<&Participant<R::State>> {
        self.roster.get(id).ok_or(EngineError::UnknownParticipant(id))
    }

    /// Seating ring, once set up.
    #[must_use]
    pub fn ring(&self) -> Option<&Ring> {
        self.ring.as_ref()
    }

    /// Whose turn is next (or in progress).
    #[must_use]
    pub fn current_participant(&self) -> Option<ParticipantId> {
        self.current
    }

    /// Phase the most recent turn ended in.
    #[must_use]
    pub fn current_phase(&self) -> Option<PhaseId> {
        self.last_phase
    }

    /// Number of turns started so far.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn
    }

    /// Every performed action, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn standings(&self) -> Option<&Standings> {
        self.standings.as_ref()
    }

    /// Winners, empty until the game is over.
    #[must_use]
    pub fn winners(&self) -> &[ParticipantId] {
        self.standings.as_ref().map(|s| s.winners.as_slice()).unwrap_or(&[])
    }

    /// Losers, empty until the game is over.
    #[must_use]
    pub fn losers(&self) -> &[ParticipantId] {
        self.standings.as_ref().map(|s| s.losers.as_slice()).unwrap_or(&[])
    }
}

impl<R: GameRules + std::fmt::Debug> std::fmt::Debug for GameSession<R>
where
    R::State: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("rules", &self.rules)
            .field("stage", &self.lifecycle.current())
            .field("state", &self.state)
            .field("roster", &self.roster)
            .field("ring", &self.ring)
            .field("current", &self.current)
            .field("turn", &self.turn)
            .field("standings", &self.standings)
            .finish_non_exhaustive()
    }
}
