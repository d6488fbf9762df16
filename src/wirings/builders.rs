//! Constructors for the fully connected topology families and the in-place
//! weight refill used when only parameters change between trials.
//!
//! Weights for a target's incoming edges are laid out contiguously, targets in
//! order. For the full topologies this is row-major with the target as row:
//! the edge from `j` into `i` reads offset `i * num_sources + j`.

use ndarray::ArrayView1;

use crate::error::{CtrnnError, Result};
use crate::graph::{EdgeTail, PredecessorGraph};

/// Every neuron receives an edge from every neuron, itself included, with
/// sources ordered `0..num_nodes`.
pub fn all_to_all(num_nodes: usize, default_weight: f32) -> PredecessorGraph {
    full_bipartite(num_nodes, num_nodes, |_, _| default_weight)
}

/// [`all_to_all`] with weights read from a row-major `num_nodes²` buffer.
pub fn all_to_all_from_weights<'a>(
    num_nodes: usize,
    weights: impl Into<ArrayView1<'a, f32>>,
) -> Result<PredecessorGraph> {
    let weights = weights.into();
    check_len(num_nodes * num_nodes, weights.len())?;
    Ok(full_bipartite(num_nodes, num_nodes, |target, source| {
        weights[target * num_nodes + source]
    }))
}

/// Every one of `num_neurons` targets receives an edge from every one of
/// `num_sensors` sensors. Sources index the sensor vector, so the graph has
/// exactly `num_neurons` predecessor lists.
pub fn full_sensor_projection(
    num_sensors: usize,
    num_neurons: usize,
    default_weight: f32,
) -> PredecessorGraph {
    full_bipartite(num_sensors, num_neurons, |_, _| default_weight)
}

/// [`full_sensor_projection`] with weights read from a row-major
/// `num_neurons * num_sensors` buffer.
pub fn full_sensor_projection_from_weights<'a>(
    num_sensors: usize,
    num_neurons: usize,
    weights: impl Into<ArrayView1<'a, f32>>,
) -> Result<PredecessorGraph> {
    let weights = weights.into();
    check_len(num_neurons * num_sensors, weights.len())?;
    Ok(full_bipartite(num_sensors, num_neurons, |target, source| {
        weights[target * num_sensors + source]
    }))
}

/// Rewrites every edge weight of `graph` from `weights`, in predecessor
/// order, leaving the shape untouched. The buffer must hold exactly one value
/// per edge; nothing is written otherwise.
pub fn refill_weights<'a>(
    graph: &mut PredecessorGraph,
    weights: impl Into<ArrayView1<'a, f32>>,
) -> Result<()> {
    let weights = weights.into();
    check_len(graph.num_edges(), weights.len())?;
    for (edge, &weight) in graph.edges_mut().zip(weights.iter()) {
        edge.weight = weight;
    }
    Ok(())
}

fn full_bipartite(
    num_sources: usize,
    num_targets: usize,
    weight: impl Fn(usize, usize) -> f32,
) -> PredecessorGraph {
    let predecessors = (0..num_targets)
        .map(|target| {
            (0..num_sources)
                .map(|source| EdgeTail::new(source, weight(target, source)))
                .collect()
        })
        .collect();
    PredecessorGraph::from_predecessors(predecessors)
}

fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(CtrnnError::WeightCountMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_to_all_shape() {
        let graph = all_to_all(4, 0.5);
        assert_eq!(graph.num_nodes(), 4);
        assert_eq!(graph.num_edges(), 16);
        for (_, edges) in graph.iter() {
            let sources: Vec<_> = edges.iter().map(|e| e.source).collect();
            assert_eq!(sources, vec![0, 1, 2, 3]);
            assert!(edges.iter().all(|e| e.weight == 0.5));
        }
    }

    #[test]
    fn test_all_to_all_from_weights_is_target_major() {
        let weights: Vec<f32> = (0..9).map(|x| x as f32).collect();
        let graph = all_to_all_from_weights(3, &weights).unwrap();
        for target in 0..3 {
            for (source, edge) in graph.predecessors(target).unwrap().iter().enumerate() {
                assert_eq!(edge.source, source);
                assert_eq!(edge.weight, weights[target * 3 + source]);
            }
        }
    }

    #[test]
    fn test_sensor_projection_wider_than_neurons() {
        let graph = full_sensor_projection(5, 2, 1.0);
        assert_eq!(graph.num_nodes(), 2);
        assert_eq!(graph.num_edges(), 10);
        assert_eq!(graph.max_source(), Some(4));
    }

    #[test]
    fn test_from_weights_rejects_wrong_length() {
        assert!(all_to_all_from_weights(3, &[0.0f32; 8]).is_err());
        assert!(full_sensor_projection_from_weights(2, 3, &[0.0f32; 7]).is_err());
    }

    #[test]
    fn test_refill_rejects_wrong_length_without_writing() {
        let mut graph = all_to_all(2, 1.0);
        let result = refill_weights(&mut graph, &[9.0f32; 3]);
        assert!(matches!(
            result,
            Err(CtrnnError::WeightCountMismatch { expected: 4, actual: 3 })
        ));
        assert!(graph.weights().all(|w| w == 1.0));
    }
}
