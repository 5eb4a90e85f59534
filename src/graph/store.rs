//! Arena-backed multigraph storage.
//!
//! Nodes live in a flat `Vec` of slots referenced by `NodeId`. Removing a
//! node empties its slot; IDs are never reused, so a `NodeId` that outlives
//! its node can only ever fail with `UnknownNode`, never alias a newer node.

use smallvec::SmallVec;

use super::policy::{Direction, EdgePolicy};
use super::{NodeId, Weight};
use crate::core::GraphError;

type Weights = SmallVec<[Weight; 2]>;

/// Edges from one node to one neighbour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Adjacent {
    pub(crate) target: NodeId,
    /// Edges actually added from the owning node to `target`.
    pub(crate) forward: Weights,
    /// Negated copies of edges added from `target` to the owning node.
    pub(crate) mirrored: Weights,
}

impl Adjacent {
    fn new(target: NodeId) -> Self {
        Self {
            target,
            forward: SmallVec::new(),
            mirrored: SmallVec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.forward.is_empty() && self.mirrored.is_empty()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Slot<T> {
    pub(crate) value: T,
    pub(crate) adjacency: Vec<Adjacent>,
}

impl<T> Slot<T> {
    fn entry(&mut self, target: NodeId) -> &mut Adjacent {
        let idx = match self.adjacency.iter().position(|a| a.target == target) {
            Some(idx) => idx,
            None => {
                self.adjacency.push(Adjacent::new(target));
                self.adjacency.len() - 1
            }
        };
        &mut self.adjacency[idx]
    }

    fn find(&self, target: NodeId) -> Option<&Adjacent> {
        self.adjacency.iter().find(|a| a.target == target)
    }

    fn prune(&mut self) {
        self.adjacency.retain(|a| !a.is_empty());
    }
}

/// Generic multigraph with a configurable edge-insertion policy.
///
/// Node identity is the `NodeId` returned by [`add_node`](Self::add_node):
/// two nodes holding equal payloads are still distinct nodes.
///
/// ```
/// use turn_engine::graph::{EdgePolicy, Graph};
///
/// let mut g = Graph::new(EdgePolicy::WEIGHTED_DIRECTED_MULTI);
/// let a = g.add_node("a");
/// let b = g.add_node("b");
///
/// g.add_edge(a, b, 5).unwrap();
/// g.add_edge(a, b, 5).unwrap();
///
/// assert_eq!(g.edge_weights(a, b), &[5, 5]);
/// // Weighted directed graphs keep a negated mirror of every edge.
/// assert_eq!(g.mirrored_weights(b, a), &[-5, -5]);
/// ```
#[derive(Clone, Debug)]
pub struct Graph<T> {
    policy: EdgePolicy,
    slots: Vec<Option<Slot<T>>>,
    live: usize,
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::new(EdgePolicy::default())
    }
}

impl<T> Graph<T> {
    /// Create an empty graph with the given policy.
    #[must_use]
    pub fn new(policy: EdgePolicy) -> Self {
        Self {
            policy,
            slots: Vec::new(),
            live: 0,
        }
    }

    /// The policy chosen at construction.
    #[must_use]
    pub fn policy(&self) -> EdgePolicy {
        self.policy
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Check if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Check if a node is present.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.slot(node).is_some()
    }

    /// Insert a node holding `value`. Always creates a new identity.
    pub fn add_node(&mut self, value: T) -> NodeId {
        let id = NodeId::new(self.slots.len() as u32);
        self.slots.push(Some(Slot {
            value,
            adjacency: Vec::new(),
        }));
        self.live += 1;
        id
    }

    /// Remove a node and every edge incident to it, in both directions.
    ///
    /// Returns the node's payload.
    pub fn remove_node(&mut self, node: NodeId) -> Result<T, GraphError> {
        if !self.contains(node) {
            return Err(GraphError::UnknownNode(node));
        }

        for slot in self.slots.iter_mut().flatten() {
            slot.adjacency.retain(|a| a.target != node);
        }

        let slot = self.slots[node.index()]
            .take()
            .ok_or(GraphError::UnknownNode(node))?;
        self.live -= 1;
        Ok(slot.value)
    }

    /// Payload of a node.
    #[must_use]
    pub fn value(&self, node: NodeId) -> Option<&T> {
        self.slot(node).map(|s| &s.value)
    }

    /// Payload of a node, mutably.
    pub fn value_mut(&mut self, node: NodeId) -> Option<&mut T> {
        self.slot_mut(node).map(|s| &mut s.value)
    }

    /// Iterate over (NodeId, &T) in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (NodeId::new(i as u32), &s.value)))
    }

    /// The oldest surviving node.
    #[must_use]
    pub fn first_node(&self) -> Option<NodeId> {
        self.nodes().next().map(|(id, _)| id)
    }

    /// Add an edge `from -> to`.
    ///
    /// Both endpoints must already exist; nothing is inserted implicitly.
    /// How the edge is stored depends on the policy:
    /// - unit weighting stores weight 1 whatever `weight` is
    /// - weighted directed graphs also record the mirror `(to, from, -weight)`
    /// - undirected graphs also record `(to, from, weight)`
    /// - simple graphs keep at most one edge of each weight between a pair
    ///   (so one edge in total under unit weighting), ignore a repeated
    ///   weight and reject self-loops
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: Weight) -> Result<(), GraphError> {
        self.require(from)?;
        self.require(to)?;

        let policy = self.policy;
        let weight = policy.effective_weight(weight);

        if policy.is_simple() {
            if from == to {
                return Err(GraphError::SelfLoop(from));
            }
            if self.edge_weights(from, to).contains(&weight) {
                return Ok(());
            }
        }

        self.slot_mut_unchecked(from).entry(to).forward.push(weight);

        if policy.mirrors() {
            self.slot_mut_unchecked(to).entry(from).mirrored.push(-weight);
        } else if policy.direction == Direction::Undirected && from != to {
            self.slot_mut_unchecked(to).entry(from).forward.push(weight);
        }

        Ok(())
    }

    /// Add a unit edge `from -> to`.
    pub fn connect(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        self.add_edge(from, to, 1)
    }

    /// Remove exactly one edge `from -> to` of the given weight (the most
    /// recently added one), along with its mirror or symmetric counterpart.
    pub fn remove_edge(&mut self, from: NodeId, to: NodeId, weight: Weight) -> Result<(), GraphError> {
        self.require(from)?;
        self.require(to)?;

        let policy = self.policy;
        let weight = policy.effective_weight(weight);
        let not_found = GraphError::EdgeNotFound { from, to, weight };

        let slot = self.slot_mut_unchecked(from);
        let adjacent = slot
            .adjacency
            .iter_mut()
            .find(|a| a.target == to)
            .ok_or_else(|| not_found.clone())?;
        let pos = adjacent
            .forward
            .iter()
            .rposition(|w| *w == weight)
            .ok_or(not_found)?;
        adjacent.forward.remove(pos);
        slot.prune();

        if policy.mirrors() {
            Self::remove_one(self.slot_mut_unchecked(to), from, -weight, true);
        } else if policy.direction == Direction::Undirected && from != to {
            Self::remove_one(self.slot_mut_unchecked(to), from, weight, false);
        }

        Ok(())
    }

    /// Remove a unit edge `from -> to`.
    pub fn disconnect(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        self.remove_edge(from, to, 1)
    }

    /// Check for an edge `from -> to` with the given weight.
    #[must_use]
    pub fn find_edge(&self, from: NodeId, to: NodeId, weight: Weight) -> bool {
        let weight = self.policy.effective_weight(weight);
        self.edge_weights(from, to).contains(&weight)
    }

    /// Weights of every edge `from -> to`, in insertion order.
    ///
    /// Empty when either node is absent or no edge exists.
    #[must_use]
    pub fn edge_weights(&self, from: NodeId, to: NodeId) -> &[Weight] {
        self.slot(from)
            .and_then(|s| s.find(to))
            .map(|a| a.forward.as_slice())
            .unwrap_or(&[])
    }

    /// Mirror entries stored at `node` for edges `other -> node`.
    ///
    /// Only weighted directed graphs record mirrors.
    #[must_use]
    pub fn mirrored_weights(&self, node: NodeId, other: NodeId) -> &[Weight] {
        self.slot(node)
            .and_then(|s| s.find(other))
            .map(|a| a.mirrored.as_slice())
            .unwrap_or(&[])
    }

    /// Outgoing edges of a node as `(target, weights)`.
    pub fn out_edges(&self, node: NodeId) -> Result<impl Iterator<Item = (NodeId, &[Weight])>, GraphError> {
        let slot = self.slot(node).ok_or(GraphError::UnknownNode(node))?;
        Ok(slot
            .adjacency
            .iter()
            .filter(|a| !a.forward.is_empty())
            .map(|a| (a.target, a.forward.as_slice())))
    }

    /// Incoming edges of a node as `(source, weights)`.
    ///
    /// For undirected graphs this equals [`out_edges`](Self::out_edges).
    pub fn in_edges(&self, node: NodeId) -> Result<Vec<(NodeId, Vec<Weight>)>, GraphError> {
        self.require(node)?;
        Ok(self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| {
                let source = NodeId::new(i as u32);
                s.as_ref()
                    .and_then(|s| s.find(node))
                    .filter(|a| !a.forward.is_empty())
                    .map(|a| (source, a.forward.to_vec()))
            })
            .collect())
    }

    /// Number of edges added and not yet removed.
    ///
    /// Mirrors are not counted, and an undirected edge counts once.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        let mut loops = 0;
        let mut others = 0;
        for (id, slot) in self.live_slots() {
            for adjacent in &slot.adjacency {
                if adjacent.target == id {
                    loops += adjacent.forward.len();
                } else {
                    others += adjacent.forward.len();
                }
            }
        }

        match self.policy.direction {
            Direction::Directed => loops + others,
            Direction::Undirected => loops + others / 2,
        }
    }

    /// Targets of forward edges, in insertion order, one per neighbour.
    pub(crate) fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.slot(node)
            .into_iter()
            .flat_map(|s| s.adjacency.iter())
            .filter(|a| !a.forward.is_empty())
            .map(|a| a.target)
    }

    pub(crate) fn slot(&self, node: NodeId) -> Option<&Slot<T>> {
        self.slots.get(node.index()).and_then(Option::as_ref)
    }

    pub(crate) fn slot_capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn live_slots(&self) -> impl Iterator<Item = (NodeId, &Slot<T>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (NodeId::new(i as u32), s)))
    }

    fn slot_mut(&mut self, node: NodeId) -> Option<&mut Slot<T>> {
        self.slots.get_mut(node.index()).and_then(Option::as_mut)
    }

    fn require(&self, node: NodeId) -> Result<(), GraphError> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(GraphError::UnknownNode(node))
        }
    }

    /// Slot access after `require` has succeeded.
    fn slot_mut_unchecked(&mut self, node: NodeId) -> &mut Slot<T> {
        match self.slots[node.index()].as_mut() {
            Some(slot) => slot,
            None => unreachable!("slot {node} checked by caller"),
        }
    }

    fn remove_one(slot: &mut Slot<T>, target: NodeId, weight: Weight, mirrored: bool) {
        if let Some(adjacent) = slot.adjacency.iter_mut().find(|a| a.target == target) {
            let list = if mirrored {
                &mut adjacent.mirrored
            } else {
                &mut adjacent.forward
            };
            if let Some(pos) = list.iter().rposition(|w| *w == weight) {
                list.remove(pos);
            }
        }
        slot.prune();
    }
}

impl<T> PartialEq for Graph<T>
where
    T: PartialEq,
{
    /// Graphs are equal when they have the same policy, the same node IDs
    /// with equal payloads, and identical adjacency (including order).
    fn eq(&self, other: &Self) -> bool {
        self.policy == other.policy
            && self.live == other.live
            && self.live_slots().zip(other.live_slots()).all(|((a, sa), (b, sb))| {
                a == b && sa.value == sb.value && sa.adjacency == sb.adjacency
            })
    }
}
