use serde::{Deserialize, Serialize};

use crate::error::{CtrnnError, Result};

/// Dense node identifier, contiguous from 0.
pub type NodeId = usize;

/// Weight given to edges added without one.
pub const DEFAULT_WEIGHT: f32 = 1.0;

/// One incoming connection of a target node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeTail {
    pub source: NodeId,
    pub weight: f32,
}

impl EdgeTail {
    pub fn new(source: NodeId, weight: f32) -> Self {
        Self { source, weight }
    }
}

/// Directed graph stored as per-target lists of weighted predecessor edges.
///
/// Edges keep their insertion order. The structure only grows: nodes appear
/// when an edge references them and there is no removal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PredecessorGraph {
    pub(super) predecessors: Vec<Vec<EdgeTail>>,
    pub(super) num_edges: usize,
}

impl PredecessorGraph {
    /// Creates a graph with `num_nodes` nodes and no edges.
    pub fn with_nodes(num_nodes: usize) -> Self {
        Self {
            predecessors: vec![Vec::new(); num_nodes],
            num_edges: 0,
        }
    }

    /// Adopts prebuilt predecessor lists as they are.
    ///
    /// Sources are not checked against the node count, so this also serves
    /// bipartite projections whose sources index a separate sensor space.
    pub fn from_predecessors(predecessors: Vec<Vec<EdgeTail>>) -> Self {
        let mut graph = Self {
            predecessors,
            num_edges: 0,
        };
        graph.num_edges = graph.calc_num_edges();
        graph
    }

    pub fn num_nodes(&self) -> usize {
        self.predecessors.len()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Sums the predecessor list lengths. Only bulk constructors need this;
    /// edge additions keep `num_edges` current.
    pub(crate) fn calc_num_edges(&self) -> usize {
        self.predecessors.iter().map(Vec::len).sum()
    }

    /// Incoming edges of `node`, in insertion order.
    pub fn predecessors(&self, node: NodeId) -> Result<&[EdgeTail]> {
        self.predecessors
            .get(node)
            .map(Vec::as_slice)
            .ok_or(CtrnnError::NodeOutOfRange {
                node,
                num_nodes: self.num_nodes(),
            })
    }

    /// Mutable view of the incoming edges of `node`. Weights may be rewritten
    /// but the list itself cannot change length.
    pub fn predecessors_mut(&mut self, node: NodeId) -> Result<&mut [EdgeTail]> {
        let num_nodes = self.num_nodes();
        self.predecessors
            .get_mut(node)
            .map(Vec::as_mut_slice)
            .ok_or(CtrnnError::NodeOutOfRange { node, num_nodes })
    }

    /// Adds an edge with [`DEFAULT_WEIGHT`].
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Result<()> {
        self.add_weighted_edge(source, target, DEFAULT_WEIGHT)
    }

    /// Appends `source -> target` to the target's predecessors, first growing
    /// the graph so both endpoints exist.
    ///
    /// Fails with [`CtrnnError::NodeOutOfRange`] for an id whose node count
    /// would not fit in a `usize`; the graph is left unchanged then.
    pub fn add_weighted_edge(&mut self, source: NodeId, target: NodeId, weight: f32) -> Result<()> {
        self.grow_to_include(source.max(target))?;
        self.predecessors[target].push(EdgeTail::new(source, weight));
        self.num_edges += 1;
        Ok(())
    }

    fn grow_to_include(&mut self, node: NodeId) -> Result<()> {
        if node >= self.predecessors.len() {
            let num_nodes = node.checked_add(1).ok_or(CtrnnError::NodeOutOfRange {
                node,
                num_nodes: self.predecessors.len(),
            })?;
            self.predecessors.resize_with(num_nodes, Vec::new);
        }
        Ok(())
    }

    /// Iterates `(target, predecessors)` pairs in node order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &[EdgeTail])> + '_ {
        self.predecessors
            .iter()
            .enumerate()
            .map(|(node, edges)| (node, edges.as_slice()))
    }

    /// Every edge weight in flat predecessor order: all of target 0's edges,
    /// then target 1's, and so on.
    pub fn weights(&self) -> impl Iterator<Item = f32> + '_ {
        self.predecessors.iter().flatten().map(|edge| edge.weight)
    }

    pub(crate) fn edges_mut(&mut self) -> impl Iterator<Item = &mut EdgeTail> + '_ {
        self.predecessors.iter_mut().flatten()
    }

    /// Largest source id referenced by any edge.
    pub fn max_source(&self) -> Option<NodeId> {
        self.predecessors.iter().flatten().map(|edge| edge.source).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_nodes_has_no_edges() {
        let graph = PredecessorGraph::with_nodes(4);
        assert_eq!(graph.num_nodes(), 4);
        assert_eq!(graph.num_edges(), 0);
        for node in 0..4 {
            assert!(graph.predecessors(node).unwrap().is_empty());
        }
    }

    #[test]
    fn test_add_edge_grows_for_source_and_target() {
        let mut graph = PredecessorGraph::with_nodes(1);
        graph.add_edge(3, 0).unwrap();
        assert_eq!(graph.num_nodes(), 4);

        graph.add_weighted_edge(0, 6, -2.0).unwrap();
        assert_eq!(graph.num_nodes(), 7);
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(graph.predecessors(0).unwrap(), &[EdgeTail::new(3, DEFAULT_WEIGHT)]);
        assert_eq!(graph.predecessors(6).unwrap(), &[EdgeTail::new(0, -2.0)]);
    }

    #[test]
    fn test_add_edge_rejects_unrepresentable_node() {
        let mut graph = PredecessorGraph::with_nodes(2);
        assert!(matches!(
            graph.add_edge(NodeId::MAX, 0),
            Err(CtrnnError::NodeOutOfRange { node: NodeId::MAX, num_nodes: 2 })
        ));
        assert!(graph.add_weighted_edge(0, NodeId::MAX, 1.0).is_err());
        assert_eq!(graph.num_nodes(), 2);
        assert_eq!(graph.num_edges(), 0);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut graph = PredecessorGraph::with_nodes(3);
        graph.add_weighted_edge(2, 0, 0.2).unwrap();
        graph.add_weighted_edge(0, 0, 0.0).unwrap();
        graph.add_weighted_edge(1, 0, 0.1).unwrap();

        let sources: Vec<_> = graph.predecessors(0).unwrap().iter().map(|e| e.source).collect();
        assert_eq!(sources, vec![2, 0, 1]);
    }

    #[test]
    fn test_predecessors_out_of_range() {
        let graph = PredecessorGraph::with_nodes(3);
        match graph.predecessors(5) {
            Err(CtrnnError::NodeOutOfRange { node, num_nodes }) => {
                assert_eq!(node, 5);
                assert_eq!(num_nodes, 3);
            }
            other => panic!("expected NodeOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_predecessors_mut_rewrites_in_place() {
        let mut graph = PredecessorGraph::with_nodes(2);
        graph.add_edge(0, 1).unwrap();
        graph.predecessors_mut(1).unwrap()[0].weight = 4.5;

        assert_eq!(graph.predecessors(1).unwrap()[0].weight, 4.5);
        assert_eq!(graph.num_edges(), 1);
        assert!(graph.predecessors_mut(2).is_err());
    }

    #[test]
    fn test_from_predecessors_counts_edges() {
        let graph = PredecessorGraph::from_predecessors(vec![
            vec![EdgeTail::new(0, 1.0), EdgeTail::new(9, 1.0)],
            vec![],
            vec![EdgeTail::new(4, 1.0)],
        ]);
        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_edges(), 3);
        assert_eq!(graph.max_source(), Some(9));
    }

    #[test]
    fn test_weights_follow_predecessor_order() {
        let mut graph = PredecessorGraph::with_nodes(2);
        graph.add_weighted_edge(0, 1, 3.0).unwrap();
        graph.add_weighted_edge(1, 0, 1.0).unwrap();
        graph.add_weighted_edge(0, 0, 2.0).unwrap();

        let weights: Vec<f32> = graph.weights().collect();
        assert_eq!(weights, vec![1.0, 2.0, 3.0]);
    }
}
