//! Bulk construction from edge lists.

use ndarray::{ArrayView1, ArrayView2};

use super::predecessor::{NodeId, PredecessorGraph, DEFAULT_WEIGHT};
use crate::error::{CtrnnError, Result};

impl PredecessorGraph {
    /// Builds a graph from `(source, target)` pairs.
    ///
    /// Nodes are assumed to be labelled contiguously from 0. The edge list may
    /// leave isolated nodes out, so `num_nodes` is a lower bound that grows to
    /// cover the largest referenced id. When `weights` is given it must hold
    /// one weight per edge; otherwise every edge gets [`DEFAULT_WEIGHT`].
    pub fn from_edge_list(
        num_nodes: usize,
        edges: &[(NodeId, NodeId)],
        weights: Option<&[f32]>,
    ) -> Result<Self> {
        if let Some(weights) = weights {
            check_weight_count(edges.len(), weights.len())?;
        }

        let mut graph = Self::with_nodes(num_nodes);
        for (index, &(source, target)) in edges.iter().enumerate() {
            let weight = weights.map_or(DEFAULT_WEIGHT, |weights| weights[index]);
            graph.add_weighted_edge(source, target, weight)?;
        }
        graph.num_edges = graph.calc_num_edges();
        Ok(graph)
    }

    /// Same as [`PredecessorGraph::from_edge_list`] for an `[num_edges, 2]`
    /// array whose rows are `[source, target]`.
    pub fn from_edge_array(
        num_nodes: usize,
        edges: ArrayView2<'_, usize>,
        weights: Option<ArrayView1<'_, f32>>,
    ) -> Result<Self> {
        if edges.ncols() != 2 {
            return Err(CtrnnError::InvalidConfig(format!(
                "edge array must have 2 columns (source, target), got {}",
                edges.ncols()
            )));
        }
        if let Some(weights) = weights.as_ref() {
            check_weight_count(edges.nrows(), weights.len())?;
        }

        let mut graph = Self::with_nodes(num_nodes);
        for (index, row) in edges.outer_iter().enumerate() {
            let weight = weights.as_ref().map_or(DEFAULT_WEIGHT, |weights| weights[index]);
            graph.add_weighted_edge(row[0], row[1], weight)?;
        }
        graph.num_edges = graph.calc_num_edges();
        Ok(graph)
    }
}

fn check_weight_count(num_edges: usize, num_weights: usize) -> Result<()> {
    if num_edges != num_weights {
        return Err(CtrnnError::WeightCountMismatch {
            expected: num_edges,
            actual: num_weights,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_from_edge_list_unweighted() {
        let graph = PredecessorGraph::from_edge_list(2, &[(0, 1), (1, 0), (0, 4)], None).unwrap();
        assert_eq!(graph.num_nodes(), 5);
        assert_eq!(graph.num_edges(), 3);
        assert!(graph.weights().all(|w| w == DEFAULT_WEIGHT));
    }

    #[test]
    fn test_from_edge_list_weight_mismatch() {
        let result = PredecessorGraph::from_edge_list(2, &[(0, 1), (1, 0)], Some(&[0.5]));
        assert!(matches!(
            result,
            Err(CtrnnError::WeightCountMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_from_edge_array_weighted() {
        let edges = arr2(&[[0, 2], [1, 2], [2, 0]]);
        let weights = arr1(&[0.1f32, 0.2, 0.3]);
        let graph =
            PredecessorGraph::from_edge_array(3, edges.view(), Some(weights.view())).unwrap();

        let into_two: Vec<_> = graph.predecessors(2).unwrap().iter().map(|e| (e.source, e.weight)).collect();
        assert_eq!(into_two, vec![(0, 0.1), (1, 0.2)]);
        assert_eq!(graph.predecessors(0).unwrap()[0].weight, 0.3);
    }

    #[test]
    fn test_from_edge_array_rejects_bad_shape() {
        let edges = arr2(&[[0, 1, 2]]);
        assert!(PredecessorGraph::from_edge_array(3, edges.view(), None).is_err());
    }
}
