//! Lazy traversals and cycle detection.
//!
//! Traversals borrow the graph immutably for their whole lifetime, so a
//! visitor cannot mutate adjacency mid-walk. Only forward edges are
//! followed; the mirror ledger of weighted directed graphs is never walked.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use super::policy::Direction;
use super::store::Graph;
use super::NodeId;
use crate::core::GraphError;

/// Depth-first traversal order.
///
/// Yields each reachable node once. Neighbours are explored in the order
/// their first edge was added.
pub struct Dfs<'g, T> {
    graph: &'g Graph<T>,
    stack: Vec<NodeId>,
    visited: FxHashSet<NodeId>,
}

impl<T> Iterator for Dfs<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(node) = self.stack.pop() {
            if !self.visited.insert(node) {
                continue;
            }
            let pending: Vec<NodeId> = self
                .graph
                .successors(node)
                .filter(|n| !self.visited.contains(n))
                .collect();
            self.stack.extend(pending.into_iter().rev());
            return Some(node);
        }
        None
    }
}

/// Breadth-first traversal order.
pub struct Bfs<'g, T> {
    graph: &'g Graph<T>,
    queue: VecDeque<NodeId>,
    visited: FxHashSet<NodeId>,
}

impl<T> Iterator for Bfs<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(node) = self.queue.pop_front() {
            if !self.visited.insert(node) {
                continue;
            }
            for next in self.graph.successors(node) {
                if !self.visited.contains(&next) {
                    self.queue.push_back(next);
                }
            }
            return Some(node);
        }
        None
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unseen,
    OnStack,
    Done,
}

impl<T> Graph<T> {
    /// Resolve an optional start node. `None` means the oldest node, and an
    /// empty graph has nothing to start from.
    fn start_node(&self, start: Option<NodeId>) -> Result<Option<NodeId>, GraphError> {
        match start {
            Some(node) if self.contains(node) => Ok(Some(node)),
            Some(node) => Err(GraphError::UnknownNode(node)),
            None => Ok(self.first_node()),
        }
    }

    /// Depth-first walk from `start` (or the oldest node).
    pub fn iter_dfs(&self, start: Option<NodeId>) -> Result<Dfs<'_, T>, GraphError> {
        Ok(Dfs {
            graph: self,
            stack: self.start_node(start)?.into_iter().collect(),
            visited: FxHashSet::default(),
        })
    }

    /// Breadth-first walk from `start` (or the oldest node).
    pub fn iter_bfs(&self, start: Option<NodeId>) -> Result<Bfs<'_, T>, GraphError> {
        Ok(Bfs {
            graph: self,
            queue: self.start_node(start)?.into_iter().collect(),
            visited: FxHashSet::default(),
        })
    }

    /// Visit nodes depth-first until `visit` returns true.
    ///
    /// Returns the node that satisfied `visit`, or `None` once every
    /// reachable node has been seen.
    ///
    /// ```
    /// use turn_engine::graph::{EdgePolicy, Graph};
    ///
    /// let mut g = Graph::new(EdgePolicy::DIRECTED_MULTI);
    /// let a = g.add_node(1);
    /// let b = g.add_node(2);
    /// let c = g.add_node(3);
    /// g.connect(a, b).unwrap();
    /// g.connect(b, c).unwrap();
    ///
    /// assert_eq!(g.dfs(Some(a), |_, v| *v == 3).unwrap(), Some(c));
    /// assert_eq!(g.dfs(Some(b), |_, v| *v == 1).unwrap(), None);
    /// ```
    pub fn dfs(
        &self,
        start: Option<NodeId>,
        mut visit: impl FnMut(NodeId, &T) -> bool,
    ) -> Result<Option<NodeId>, GraphError> {
        Ok(self.iter_dfs(start)?.find(|&n| self.value(n).is_some_and(|v| visit(n, v))))
    }

    /// Visit nodes breadth-first until `visit` returns true.
    pub fn bfs(
        &self,
        start: Option<NodeId>,
        mut visit: impl FnMut(NodeId, &T) -> bool,
    ) -> Result<Option<NodeId>, GraphError> {
        Ok(self.iter_bfs(start)?.find(|&n| self.value(n).is_some_and(|v| visit(n, v))))
    }

    /// Does the graph contain a cycle?
    ///
    /// Every component is checked, not only the one holding the first node.
    /// Directed graphs report a cycle when a walk reaches a node that is
    /// still on the current path, so two branches converging on one node
    /// are not a false positive. Undirected graphs report a cycle on a self
    /// loop, on parallel edges, or on reaching a visited node other than
    /// the one just arrived from. Only presence is reported, never location.
    #[must_use]
    pub fn has_cycle(&self) -> bool {
        match self.policy().direction {
            Direction::Directed => self.has_directed_cycle(),
            Direction::Undirected => self.has_undirected_cycle(),
        }
    }

    fn has_directed_cycle(&self) -> bool {
        let mut marks = vec![Mark::Unseen; self.slot_capacity()];

        for (root, _) in self.nodes() {
            if marks[root.index()] != Mark::Unseen {
                continue;
            }

            // Frames of (node, successors, next successor index).
            let mut stack: Vec<(NodeId, Vec<NodeId>, usize)> = Vec::new();
            marks[root.index()] = Mark::OnStack;
            stack.push((root, self.successors(root).collect(), 0));

            while let Some((node, successors, cursor)) = stack.last_mut() {
                let Some(&next) = successors.get(*cursor) else {
                    marks[node.index()] = Mark::Done;
                    stack.pop();
                    continue;
                };
                *cursor += 1;

                match marks[next.index()] {
                    Mark::OnStack => return true,
                    Mark::Done => {}
                    Mark::Unseen => {
                        marks[next.index()] = Mark::OnStack;
                        let successors = self.successors(next).collect();
                        stack.push((next, successors, 0));
                    }
                }
            }
        }

        false
    }

    fn has_undirected_cycle(&self) -> bool {
        let mut seen = vec![false; self.slot_capacity()];

        for (root, _) in self.nodes() {
            if seen[root.index()] {
                continue;
            }

            // Frames of (node, arrived-from, neighbours, next neighbour index).
            let mut stack: Vec<(NodeId, Option<NodeId>, Vec<NodeId>, usize)> = Vec::new();
            seen[root.index()] = true;
            stack.push((root, None, self.successors(root).collect(), 0));

            while let Some((node, parent, neighbours, cursor)) = stack.last_mut() {
                let Some(&next) = neighbours.get(*cursor) else {
                    stack.pop();
                    continue;
                };
                *cursor += 1;
                let (node, parent) = (*node, *parent);

                if next == node {
                    return true;
                }
                if Some(next) == parent {
                    if self.edge_weights(node, next).len() > 1 {
                        return true;
                    }
                    continue;
                }
                if seen[next.index()] {
                    return true;
                }

                seen[next.index()] = true;
                let neighbours = self.successors(next).collect();
                stack.push((next, Some(node), neighbours, 0));
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{EdgePolicy, Graph, NodeId};

    fn chain(policy: EdgePolicy, len: usize) -> (Graph<usize>, Vec<NodeId>) {
        let mut g = Graph::new(policy);
        let nodes: Vec<_> = (0..len).map(|i| g.add_node(i)).collect();
        for pair in nodes.windows(2) {
            g.connect(pair[0], pair[1]).unwrap();
        }
        (g, nodes)
    }

    #[test]
    fn test_empty_graph_traversals() {
        let g: Graph<()> = Graph::new(EdgePolicy::DIRECTED_MULTI);

        assert_eq!(g.iter_dfs(None).unwrap().count(), 0);
        assert_eq!(g.iter_bfs(None).unwrap().count(), 0);
        assert_eq!(g.dfs(None, |_, _| true).unwrap(), None);
        assert!(!g.has_cycle());
    }

    #[test]
    fn test_unknown_start() {
        let g: Graph<()> = Graph::new(EdgePolicy::DIRECTED_MULTI);
        assert!(g.iter_dfs(Some(NodeId::new(0))).is_err());
        assert!(g.bfs(Some(NodeId::new(3)), |_, _| true).is_err());
    }

    #[test]
    fn test_dfs_and_bfs_orders() {
        // a -> b -> d, a -> c
        let mut g = Graph::new(EdgePolicy::DIRECTED_MULTI);
        let a = g.add_node('a');
        let b = g.add_node('b');
        let c = g.add_node('c');
        let d = g.add_node('d');
        g.connect(a, b).unwrap();
        g.connect(a, c).unwrap();
        g.connect(b, d).unwrap();

        let dfs: Vec<_> = g.iter_dfs(Some(a)).unwrap().collect();
        assert_eq!(dfs, vec![a, b, d, c]);

        let bfs: Vec<_> = g.iter_bfs(Some(a)).unwrap().collect();
        assert_eq!(bfs, vec![a, b, c, d]);
    }

    #[test]
    fn test_traversal_visits_each_node_once() {
        let mut g = Graph::new(EdgePolicy::DIRECTED_MULTI);
        let a = g.add_node(0);
        let b = g.add_node(1);
        g.connect(a, b).unwrap();
        g.connect(a, b).unwrap();
        g.connect(b, a).unwrap();

        let mut visits = 0;
        let found = g
            .dfs(None, |_, _| {
                visits += 1;
                false
            })
            .unwrap();

        assert_eq!(found, None);
        assert_eq!(visits, 2);
    }

    #[test]
    fn test_traversal_ignores_mirrors() {
        let mut g = Graph::new(EdgePolicy::WEIGHTED_DIRECTED_MULTI);
        let a = g.add_node(0);
        let b = g.add_node(1);
        g.add_edge(a, b, 2).unwrap();

        assert_eq!(g.iter_bfs(Some(b)).unwrap().collect::<Vec<_>>(), vec![b]);
        assert!(!g.has_cycle());
    }

    #[test]
    fn test_undirected_walks_both_ways() {
        let (g, nodes) = chain(EdgePolicy::UNDIRECTED_SIMPLE, 3);
        let order: Vec<_> = g.iter_bfs(Some(nodes[2])).unwrap().collect();
        assert_eq!(order, vec![nodes[2], nodes[1], nodes[0]]);
    }

    #[test]
    fn test_directed_dag_has_no_cycle() {
        // Diamond: two branches converge on the same node.
        let mut g = Graph::new(EdgePolicy::DIRECTED_SIMPLE);
        let a = g.add_node(0);
        let b = g.add_node(1);
        let c = g.add_node(2);
        let d = g.add_node(3);
        g.connect(a, b).unwrap();
        g.connect(a, c).unwrap();
        g.connect(b, d).unwrap();
        g.connect(c, d).unwrap();

        assert!(!g.has_cycle());

        g.connect(d, a).unwrap();
        assert!(g.has_cycle());
    }

    #[test]
    fn test_cycle_in_second_component() {
        let mut g = Graph::new(EdgePolicy::DIRECTED_SIMPLE);
        let _lonely = g.add_node(0);
        let b = g.add_node(1);
        let c = g.add_node(2);
        g.connect(b, c).unwrap();
        g.connect(c, b).unwrap();

        assert!(g.has_cycle());
    }

    #[test]
    fn test_multigraph_self_loop_is_cycle() {
        let mut g = Graph::new(EdgePolicy::DIRECTED_MULTI);
        let a = g.add_node(0);
        g.connect(a, a).unwrap();
        assert!(g.has_cycle());
    }

    #[test]
    fn test_undirected_cycles() {
        let (mut g, nodes) = chain(EdgePolicy::UNDIRECTED_SIMPLE, 4);
        assert!(!g.has_cycle());

        g.connect(nodes[3], nodes[0]).unwrap();
        assert!(g.has_cycle());

        let (mut multi, nodes) = chain(EdgePolicy::UNDIRECTED_MULTI, 2);
        assert!(!multi.has_cycle());
        multi.connect(nodes[1], nodes[0]).unwrap();
        assert!(multi.has_cycle());
    }
}
