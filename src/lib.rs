//! # turn-engine
//!
//! A generic engine for turn-based, multi-participant games, plus the
//! directed multigraph it uses for its own bookkeeping.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: No hardcoded phases, cards or actions. Games
//!    supply a `PhaseSequence`, per-participant action registries and a
//!    game-over check through `GameRules`.
//!
//! 2. **N-Participant First**: Turn order is a ring of any size within the
//!    configured bounds; nothing assumes two participants.
//!
//! 3. **Humans and Bots are Equal**: Both are `DecisionMaker`s and run
//!    through the same engine paths. Only the handling of an illegal answer
//!    differs.
//!
//! ## Architecture
//!
//! - **Legality-Gated Actions**: Every action is a predicate plus an
//!   effect. A phase with exactly one legal action performs it without
//!   asking anyone.
//!
//! - **One Graph, Many Policies**: Direction, weighting and multiplicity are
//!   an `EdgePolicy` value, not a type hierarchy.
//!
//! - **Seeded Randomness**: Seat shuffling, dealing and bots draw from
//!   named streams of one session seed, so a seed replays a whole game.
//!
//! ## Modules
//!
//! - `core`: IDs, configuration, errors, RNG, piles, dice
//! - `graph`: Directed multigraph with DFS/BFS and cycle detection
//! - `actions`: Action registry and effect contexts
//! - `participants`: Participants, decision makers and bots
//! - `turn`: Seating ring and turn controller
//! - `session`: Game rules trait and the session driver
//! - `games`: A small shedding game exercising the whole engine

pub mod actions;
pub mod core;
pub mod games;
pub mod graph;
pub mod participants;
pub mod session;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    ActionRecord, Dice, EngineError, GameRng, GameRngState, GraphError, ParticipantId, ParticipantMap,
    PhaseConfig, PhaseId, PhaseSequence, Pile, Result, SessionConfig,
};

pub use crate::graph::{Bfs, Dfs, Direction, EdgePolicy, Graph, Multiplicity, NodeId, Weight, Weighting};

pub use crate::actions::{Action, ActionContext, ActionName, ActionOutcome, ActionRegistry, LegalityContext};

pub use crate::participants::{
    Decision, DecisionMaker, DecisionRequest, FirstOptionBot, Participant, ParticipantKind, RandomBot,
    RequestKind, Roster, ScriptedDecider, Transcript,
};

pub use crate::turn::{Ring, TurnController, TurnEnd, TurnReport, TurnScope, TurnStage};

pub use crate::session::{GameRules, GameSession, SessionStage, Standings};
