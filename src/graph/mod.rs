//! Generic directed multigraph.
//!
//! One [`Graph`] type covers every variant; behaviour is chosen by the
//! [`EdgePolicy`] passed at construction instead of by a type hierarchy, so
//! all variants share one traversal and removal implementation.
//!
//! ## Key Types
//!
//! - `NodeId`: identity of a node (not of its payload)
//! - `EdgePolicy`: direction × weighting × multiplicity
//! - `Graph`: node/edge storage and mutation
//! - `Dfs` / `Bfs`: lazy traversal iterators
//!
//! The session uses a `Graph` to hold its lifecycle transitions; games can
//! use one as a board.

mod policy;
mod store;
mod traversal;

pub use policy::{Direction, EdgePolicy, Multiplicity, Weighting};
pub use store::Graph;
pub use traversal::{Bfs, Dfs};

use serde::{Deserialize, Serialize};

/// Edge weight. Zero and negative weights are ordinary values.
pub type Weight = i64;

/// Index into a graph's node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw arena index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node({})", self.0)
    }
}
