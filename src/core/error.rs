//! Error types.
//!
//! Graph misuse and engine invariant violations are caller bugs: they abort
//! the offending call and are never healed. The only failure the engine
//! recovers from locally is a human choosing an option outside the legal
//! set, which is re-prompted before it becomes
//! [`EngineError::IllegalActionAttempted`].

use thiserror::Error;

use super::config::PhaseId;
use super::ids::ParticipantId;
use crate::graph::NodeId;

/// Errors raised by [`Graph`](crate::graph::Graph) operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node {0} is not in the graph")]
    UnknownNode(NodeId),
    #[error("no edge {from} -> {to} with weight {weight}")]
    EdgeNotFound { from: NodeId, to: NodeId, weight: i64 },
    #[error("self-loop on {0} rejected by a simple graph")]
    SelfLoop(NodeId),
}

/// Errors raised by the turn engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("need between {min} and {max} participants, got {count}")]
    InvalidPlayerCount { count: usize, min: usize, max: usize },
    #[error("no legal action for {participant} in phase {phase}")]
    NoLegalAction { participant: ParticipantId, phase: PhaseId },
    #[error("{participant} chose '{option}', which is not a legal option")]
    IllegalActionAttempted { participant: ParticipantId, option: String },
    #[error("{0} is not part of this session")]
    UnknownParticipant(ParticipantId),
    #[error("cannot {operation} while the session is {stage}")]
    InvalidStage { operation: &'static str, stage: &'static str },
    #[error("every participant in the ring is eliminated")]
    EmptyRing,
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
