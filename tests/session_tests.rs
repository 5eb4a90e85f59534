//! Session lifecycle and rotation tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use proptest::prelude::*;

use turn_engine::actions::{ActionContext, ActionOutcome, ActionRegistry, LegalityContext};
use turn_engine::core::{EngineError, GameRng, ParticipantId, PhaseConfig, PhaseId, PhaseSequence, Result, SessionConfig};
use turn_engine::participants::{FirstOptionBot, Roster, ScriptedDecider};
use turn_engine::session::{GameRules, GameSession, SessionStage, Standings};
use turn_engine::turn::{Ring, TurnEnd};

/// Every turn the actor adds one point to their own score. Reaching the
/// target wins; a participant with a negative score is knocked out.
#[derive(Clone)]
struct Race {
    target: u32,
    evaluations: Arc<AtomicUsize>,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Scores {
    points: Vec<i32>,
    turns: Vec<ParticipantId>,
}

impl Race {
    fn new(target: u32) -> Self {
        Self {
            target,
            evaluations: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl GameRules for Race {
    type State = Scores;

    fn phases(&self) -> PhaseSequence {
        PhaseSequence::new(vec![PhaseConfig::new(PhaseId::PLAY, "Play")])
    }

    fn register_actions(&self, _participant: ParticipantId, actions: &mut ActionRegistry<Scores>) {
        actions.register(
            "Step",
            |_: &LegalityContext<'_, Scores>| true,
            |ctx: &mut ActionContext<'_, Scores>| {
                let actor = ctx.actor;
                ctx.state.points[actor.index()] += 1;
                ctx.state.turns.push(actor);
                Ok(ActionOutcome::EndTurn)
            },
        );
    }

    fn deal(&mut self, state: &mut Scores, seats: &[ParticipantId], _rng: &mut GameRng) -> Result<()> {
        state.points = vec![0; seats.len()];
        Ok(())
    }

    fn first_participant(&self, _state: &Scores, ring: &Ring) -> Option<ParticipantId> {
        ring.seats().first().copied()
    }

    fn evaluate_game_over(&self, state: &Scores, roster: &Roster<Scores>) -> Option<Standings> {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        let winner = roster
            .ids()
            .find(|id| state.points.get(id.index()).is_some_and(|&p| p >= self.target as i32))?;
        let losers = roster.ids().filter(|&id| id != winner).collect();
        Some(Standings::new(vec![winner], losers))
    }
}

fn race(target: u32, players: usize, config: SessionConfig) -> GameSession<Race> {
    let mut session = GameSession::new(Race::new(target), Scores::default(), config);
    for i in 0..players {
        session.add_participant(format!("runner {}", i), FirstOptionBot).unwrap();
    }
    session
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ===== Lifecycle Tests =====

#[test]
fn test_setup_requires_enough_participants() {
    let mut session = race(3, 1, SessionConfig::default());

    let err = session.setup().unwrap_err();
    assert_eq!(err, EngineError::InvalidPlayerCount { count: 1, min: 2, max: 6 });
    assert_eq!(session.stage(), SessionStage::Created);
}

#[test]
fn test_run_reaches_terminal() {
    init_logging();
    let mut session = race(3, 3, SessionConfig::default().with_seed(9));
    let standings = session.run().unwrap();

    assert_eq!(session.stage(), SessionStage::Terminal);
    assert_eq!(standings.winners.len(), 1);
    assert_eq!(standings.losers.len(), 2);
    assert_eq!(session.turn_number(), 7);
    assert_eq!(session.history().len(), 7);
}

#[test]
fn test_game_over_is_remembered() {
    let rules = Race::new(1);
    let evaluations = rules.evaluations.clone();
    let mut session = GameSession::new(rules, Scores::default(), SessionConfig::default());
    session.add_participant("a", FirstOptionBot).unwrap();
    session.add_participant("b", FirstOptionBot).unwrap();
    session.setup().unwrap();

    assert!(!session.is_game_over());
    let report = session.play_turn().unwrap();
    assert_eq!(report.end, TurnEnd::GameOver);

    let calls = evaluations.load(Ordering::SeqCst);
    let winners = session.winners().to_vec();

    // rewrite the state so a fresh evaluation would disagree
    session.state_mut().points = vec![0, 0];
    for _ in 0..5 {
        assert!(session.is_game_over());
    }

    assert_eq!(evaluations.load(Ordering::SeqCst), calls);
    assert_eq!(session.winners(), winners.as_slice());
    assert_eq!(session.losers().len(), 1);
}

#[test]
fn test_no_turns_after_game_over() {
    let mut session = race(1, 2, SessionConfig::default());
    session.run().unwrap();

    let err = session.play_turn().unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidStage {
            operation: "play a turn",
            stage: "over"
        }
    );
}

// ===== Rotation Tests =====

#[test]
fn test_clockwise_follows_left_neighbors() {
    let mut session = race(100, 4, SessionConfig::default().with_seed(3));
    session.setup().unwrap();

    for _ in 0..8 {
        let actor = session.current_participant().unwrap();
        let expected = session.participant(actor).unwrap().left();
        session.play_turn().unwrap();
        assert_eq!(session.current_participant(), expected);
    }
}

#[test]
fn test_counterclockwise_follows_right_neighbors() {
    let mut session = race(100, 4, SessionConfig::default().with_seed(3).counterclockwise());
    session.setup().unwrap();

    for _ in 0..8 {
        let actor = session.current_participant().unwrap();
        let expected = session.participant(actor).unwrap().right();
        session.play_turn().unwrap();
        assert_eq!(session.current_participant(), expected);
    }
}

#[test]
fn test_eliminated_participants_are_skipped() {
    init_logging();
    let mut session = race(100, 3, SessionConfig::default().with_seed(1));
    session.setup().unwrap();
    let seats = session.ring().unwrap().seats().to_vec();
    session.eliminate(seats[1]).unwrap();

    for _ in 0..6 {
        session.play_turn().unwrap();
    }

    let turns = &session.state().turns;
    assert!(!turns.contains(&seats[1]));
    assert_eq!(turns[..4], [seats[0], seats[2], seats[0], seats[2]]);
}

#[test]
fn test_all_eliminated_stops_with_empty_ring() {
    let mut session = race(100, 2, SessionConfig::default());
    session.setup().unwrap();
    for id in [ParticipantId::new(0), ParticipantId::new(1)] {
        session.eliminate(id).unwrap();
    }

    let err = session.play_turn().unwrap_err();
    assert_eq!(err, EngineError::EmptyRing);
}

#[test]
fn test_seating_is_reproducible() {
    let seat = |seed| {
        let mut session = race(2, 5, SessionConfig::default().with_seed(seed));
        session.setup().unwrap();
        session.ring().unwrap().seats().to_vec()
    };

    assert_eq!(seat(77), seat(77));
}

proptest! {
    #[test]
    fn test_setup_links_every_participant(n in 2usize..=6, seed in any::<u64>(), counterclockwise in any::<bool>()) {
        let mut config = SessionConfig::default().with_seed(seed);
        if counterclockwise {
            config = config.counterclockwise();
        }
        let mut session = race(100, n, config);
        session.setup().unwrap();
        let ring = session.ring().unwrap();

        for (id, participant) in session.roster().iter() {
            prop_assert_eq!(participant.id(), id);
            let left = participant.left().unwrap();
            let right = participant.right().unwrap();

            prop_assert_eq!(session.participant(left).unwrap().right(), Some(id));
            prop_assert_eq!(session.participant(right).unwrap().left(), Some(id));
            prop_assert_eq!(left, ring.left_of(id).unwrap());
            prop_assert_eq!(right, ring.right_of(id).unwrap());
        }

        let start = ring.seats()[0];
        let mut current = start;
        let mut lap = Vec::new();
        for _ in 0..n {
            lap.push(current);
            current = session.participant(current).unwrap().left().unwrap();
        }
        prop_assert_eq!(current, start);
        lap.sort();
        lap.dedup();
        prop_assert_eq!(lap.len(), n);
    }
}

// ===== Participant Tests =====

#[test]
fn test_mixed_humans_and_bots() {
    let mut session = GameSession::new(Race::new(2), Scores::default(), SessionConfig::default());
    let human = ScriptedDecider::human([]);
    let transcript = human.transcript();
    session.add_participant("human", human).unwrap();
    session.add_bot("bot").unwrap();

    session.run().unwrap();

    // "Step" is the only action, so nobody is ever asked
    assert!(transcript.is_empty());
    assert_eq!(session.winners().len(), 1);
}

// ===== Concurrency Tests =====

#[test]
fn test_sessions_run_in_parallel() {
    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            thread::spawn(move || {
                let mut session = race(5, 3, SessionConfig::default().with_seed(seed));
                let standings = session.run().unwrap();
                (standings, session.state().clone())
            })
        })
        .collect();

    for (seed, handle) in handles.into_iter().enumerate() {
        let (standings, state) = handle.join().unwrap();

        let mut replay = race(5, 3, SessionConfig::default().with_seed(seed as u64));
        assert_eq!(replay.run().unwrap(), standings);
        assert_eq!(replay.state(), &state);
    }
}
