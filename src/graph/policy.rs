//! Edge-insertion policies.
//!
//! Every graph variant is the same [`Graph`](super::Graph) with a different
//! policy chosen at construction:
//!
//! | axis | options |
//! |---|---|
//! | `Direction` | `Directed`, `Undirected` |
//! | `Weighting` | `Weighted`, `Unit` |
//! | `Multiplicity` | `Multi`, `Simple` |
//!
//! Weighted directed graphs additionally record a mirrored `(v, u, -w)`
//! entry for each edge `(u, v, w)`, so the adjacency of a node doubles as a
//! flow/balance ledger. Unit-weight and undirected variants never mirror.

use serde::{Deserialize, Serialize};

use super::Weight;

/// Are edges one-way or symmetric?
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Directed,
    Undirected,
}

/// Do edges carry caller-supplied weights?
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weighting {
    Weighted,
    /// Every edge has weight 1, whatever the caller passes.
    Unit,
}

/// May several edges join the same pair of nodes?
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Multiplicity {
    /// Parallel edges accumulate; self-loops allowed.
    Multi,
    /// At most one edge of each weight per pair; re-adding one is a no-op.
    /// Under unit weighting that leaves a single edge. Self-loops rejected.
    Simple,
}

/// Combination of the three policy axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgePolicy {
    pub direction: Direction,
    pub weighting: Weighting,
    pub multiplicity: Multiplicity,
}

impl EdgePolicy {
    /// Weighted directed multigraph with negative mirroring.
    pub const WEIGHTED_DIRECTED_MULTI: EdgePolicy =
        EdgePolicy::new(Direction::Directed, Weighting::Weighted, Multiplicity::Multi);
    /// Unit-weight directed multigraph.
    pub const DIRECTED_MULTI: EdgePolicy =
        EdgePolicy::new(Direction::Directed, Weighting::Unit, Multiplicity::Multi);
    /// Weighted undirected multigraph.
    pub const WEIGHTED_UNDIRECTED_MULTI: EdgePolicy =
        EdgePolicy::new(Direction::Undirected, Weighting::Weighted, Multiplicity::Multi);
    /// Unit-weight undirected multigraph.
    pub const UNDIRECTED_MULTI: EdgePolicy =
        EdgePolicy::new(Direction::Undirected, Weighting::Unit, Multiplicity::Multi);
    /// Weighted directed simple graph.
    pub const WEIGHTED_DIRECTED_SIMPLE: EdgePolicy =
        EdgePolicy::new(Direction::Directed, Weighting::Weighted, Multiplicity::Simple);
    /// Unit-weight directed simple graph, the usual choice for cycle checks.
    pub const DIRECTED_SIMPLE: EdgePolicy =
        EdgePolicy::new(Direction::Directed, Weighting::Unit, Multiplicity::Simple);
    /// Weighted undirected simple graph.
    pub const WEIGHTED_UNDIRECTED_SIMPLE: EdgePolicy =
        EdgePolicy::new(Direction::Undirected, Weighting::Weighted, Multiplicity::Simple);
    /// Unit-weight undirected simple graph.
    pub const UNDIRECTED_SIMPLE: EdgePolicy =
        EdgePolicy::new(Direction::Undirected, Weighting::Unit, Multiplicity::Simple);

    /// Combine three axes.
    #[must_use]
    pub const fn new(direction: Direction, weighting: Weighting, multiplicity: Multiplicity) -> Self {
        Self {
            direction,
            weighting,
            multiplicity,
        }
    }

    #[must_use]
    pub const fn is_directed(self) -> bool {
        matches!(self.direction, Direction::Directed)
    }

    #[must_use]
    pub const fn is_simple(self) -> bool {
        matches!(self.multiplicity, Multiplicity::Simple)
    }

    /// Does adding `(u, v, w)` also record `(v, u, -w)`?
    #[must_use]
    pub const fn mirrors(self) -> bool {
        matches!(
            (self.direction, self.weighting),
            (Direction::Directed, Weighting::Weighted)
        )
    }

    /// The weight actually stored for a requested weight.
    #[must_use]
    pub const fn effective_weight(self, weight: Weight) -> Weight {
        match self.weighting {
            Weighting::Weighted => weight,
            Weighting::Unit => 1,
        }
    }
}

impl Default for EdgePolicy {
    fn default() -> Self {
        Self::WEIGHTED_DIRECTED_MULTI
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_weighted_directed_mirrors() {
        assert!(EdgePolicy::WEIGHTED_DIRECTED_MULTI.mirrors());
        assert!(EdgePolicy::WEIGHTED_DIRECTED_SIMPLE.mirrors());
        assert!(!EdgePolicy::DIRECTED_MULTI.mirrors());
        assert!(!EdgePolicy::WEIGHTED_UNDIRECTED_MULTI.mirrors());
        assert!(!EdgePolicy::UNDIRECTED_SIMPLE.mirrors());
    }

    #[test]
    fn test_unit_weight_coerces() {
        assert_eq!(EdgePolicy::DIRECTED_MULTI.effective_weight(7), 1);
        assert_eq!(EdgePolicy::DIRECTED_MULTI.effective_weight(0), 1);
        assert_eq!(EdgePolicy::WEIGHTED_DIRECTED_MULTI.effective_weight(0), 0);
        assert_eq!(EdgePolicy::WEIGHTED_DIRECTED_MULTI.effective_weight(-3), -3);
    }

    #[test]
    fn test_axes() {
        let policy = EdgePolicy::UNDIRECTED_SIMPLE;
        assert!(!policy.is_directed());
        assert!(policy.is_simple());
        assert_eq!(EdgePolicy::default(), EdgePolicy::WEIGHTED_DIRECTED_MULTI);
    }
}
