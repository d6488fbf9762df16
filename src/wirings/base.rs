use super::builders::{all_to_all, full_sensor_projection};
use crate::error::{CtrnnError, Result};
use crate::graph::{EdgeTail, PredecessorGraph, DEFAULT_WEIGHT};

/// Base trait for wiring configurations of a CTRNN layer
///
/// A wiring owns the recurrent graph among its neurons and, once built with
/// an input dimension, the sensory graph from inputs to neurons.
pub trait Wiring: Send + Sync {
    /// Returns the number of neurons in this wiring
    fn units(&self) -> usize;

    /// Returns the input dimension (number of sensors), if built
    fn input_dim(&self) -> Option<usize>;

    /// Check if the wiring has been built (input dimension is set)
    fn is_built(&self) -> bool {
        self.input_dim().is_some()
    }

    /// Build the sensory side of the wiring for `input_dim` sensors.
    ///
    /// Building twice with the same dimension is a no-op; a different
    /// dimension is an error.
    fn build(&mut self, input_dim: usize) -> Result<()>;

    /// Edges among the neurons, one predecessor list per neuron
    fn recurrent_graph(&self) -> &PredecessorGraph;

    /// Edges from sensors to neurons, one predecessor list per neuron
    fn sensory_graph(&self) -> Option<&PredecessorGraph>;

    /// Count internal synapses
    fn synapse_count(&self) -> usize {
        self.recurrent_graph().num_edges()
    }

    /// Count sensory synapses
    fn sensory_synapse_count(&self) -> usize {
        self.sensory_graph().map_or(0, PredecessorGraph::num_edges)
    }
}

pub(crate) fn check_rebuild(existing: Option<usize>, requested: usize) -> Result<bool> {
    match existing {
        Some(existing) if existing != requested => {
            Err(CtrnnError::ConflictingInputDim { existing, requested })
        }
        Some(_) => Ok(false),
        None => Ok(true),
    }
}

/// Fully connected wiring structure
#[derive(Clone, Debug)]
pub struct FullyConnected {
    units: usize,
    recurrent: PredecessorGraph,
    sensory: Option<PredecessorGraph>,
    input_dim: Option<usize>,
    self_connections: bool,
}

impl FullyConnected {
    pub fn new(units: usize, self_connections: bool) -> Self {
        let recurrent = if self_connections {
            all_to_all(units, DEFAULT_WEIGHT)
        } else {
            let predecessors = (0..units)
                .map(|target| {
                    (0..units)
                        .filter(|&source| source != target)
                        .map(|source| EdgeTail::new(source, DEFAULT_WEIGHT))
                        .collect()
                })
                .collect();
            PredecessorGraph::from_predecessors(predecessors)
        };

        Self {
            units,
            recurrent,
            sensory: None,
            input_dim: None,
            self_connections,
        }
    }

    pub fn self_connections(&self) -> bool {
        self.self_connections
    }
}

impl Wiring for FullyConnected {
    fn units(&self) -> usize {
        self.units
    }

    fn input_dim(&self) -> Option<usize> {
        self.input_dim
    }

    fn build(&mut self, input_dim: usize) -> Result<()> {
        if check_rebuild(self.input_dim(), input_dim)? {
            self.input_dim = Some(input_dim);
            self.sensory = Some(full_sensor_projection(input_dim, self.units, DEFAULT_WEIGHT));
        }
        Ok(())
    }

    fn recurrent_graph(&self) -> &PredecessorGraph {
        &self.recurrent
    }

    fn sensory_graph(&self) -> Option<&PredecessorGraph> {
        self.sensory.as_ref()
    }
}
