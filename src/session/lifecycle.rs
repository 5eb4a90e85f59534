//! Session lifecycle.
//!
//! Stages and their allowed transitions are held in a small directed simple
//! graph; a transition is legal exactly when the edge exists.

use crate::core::{EngineError, Result};
use crate::graph::{EdgePolicy, Graph, NodeId};

/// Coarse stage of a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionStage {
    /// Participants may join and leave.
    Created,
    /// Ring built and state dealt; no turn played yet.
    Setup,
    /// Turns are being played.
    Loop,
    /// The game is over; standings are final.
    Terminal,
}

impl SessionStage {
    const ALL: [SessionStage; 4] = [Self::Created, Self::Setup, Self::Loop, Self::Terminal];

    /// Lowercase name, for error messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Setup => "set up",
            Self::Loop => "running",
            Self::Terminal => "over",
        }
    }

    fn node(self) -> NodeId {
        NodeId::new(self as u32)
    }
}

impl std::fmt::Display for SessionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Lifecycle {
    transitions: Graph<SessionStage>,
    current: SessionStage,
}

impl Lifecycle {
    pub(crate) fn new() -> Self {
        let mut transitions = Graph::new(EdgePolicy::DIRECTED_SIMPLE);
        for stage in SessionStage::ALL {
            let node = transitions.add_node(stage);
            debug_assert_eq!(node, stage.node());
        }

        let edges = [
            (SessionStage::Created, SessionStage::Setup),
            (SessionStage::Setup, SessionStage::Loop),
            // a game can be decided by the deal alone
            (SessionStage::Setup, SessionStage::Terminal),
            (SessionStage::Loop, SessionStage::Terminal),
        ];
        for (from, to) in edges {
            let connected = transitions.connect(from.node(), to.node());
            debug_assert!(connected.is_ok(), "{from} -> {to}: {connected:?}");
        }

        Self {
            transitions,
            current: SessionStage::Created,
        }
    }

    pub(crate) fn current(&self) -> SessionStage {
        self.current
    }

    /// Fail with `InvalidStage` unless the session is in one of `allowed`.
    pub(crate) fn require(&self, operation: &'static str, allowed: &[SessionStage]) -> Result<()> {
        if allowed.contains(&self.current) {
            Ok(())
        } else {
            Err(self.invalid(operation))
        }
    }

    /// Move to `next`. Staying in the current stage is a no-op.
    pub(crate) fn advance(&mut self, operation: &'static str, next: SessionStage) -> Result<()> {
        if next == self.current {
            return Ok(());
        }
        if !self.transitions.find_edge(self.current.node(), next.node(), 1) {
            return Err(self.invalid(operation));
        }
        self.current = next;
        Ok(())
    }

    fn invalid(&self, operation: &'static str) -> EngineError {
        EngineError::InvalidStage {
            operation,
            stage: self.current.as_str(),
        }
    }
}
