//! Core engine types: participant IDs, configuration, errors, RNG, piles.
//!
//! This module contains the game-agnostic building blocks. Games configure
//! them through `SessionConfig` and `PhaseSequence` rather than modifying
//! the core.

pub mod config;
pub mod dice;
pub mod error;
pub mod ids;
pub mod pile;
pub mod record;
pub mod rng;

pub use config::{PhaseConfig, PhaseId, PhaseSequence, SessionConfig};
pub use dice::Dice;
pub use error::{EngineError, GraphError, Result};
pub use ids::{ParticipantId, ParticipantMap};
pub use pile::Pile;
pub use record::ActionRecord;
pub use rng::{GameRng, GameRngState};
