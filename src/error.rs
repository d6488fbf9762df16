//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

use crate::graph::NodeId;

/// Errors raised by graph construction, network assembly and simulation.
#[derive(Debug, Error)]
pub enum CtrnnError {
    #[error("node {node} is out of range for a graph with {num_nodes} nodes")]
    NodeOutOfRange { node: NodeId, num_nodes: usize },

    #[error("neuron {index} is out of range for a layer with {num_neurons} neurons")]
    NeuronOutOfRange { index: usize, num_neurons: usize },

    #[error("sensor {sensor} is out of range for {num_sensors} sensors")]
    SensorOutOfRange { sensor: NodeId, num_sensors: usize },

    #[error("expected {expected} parameters, got {actual}")]
    ParameterCountMismatch { expected: usize, actual: usize },

    #[error("expected {expected} weights, got {actual}")]
    WeightCountMismatch { expected: usize, actual: usize },

    #[error("expected {expected} input values, got {actual}")]
    InputSizeMismatch { expected: usize, actual: usize },

    #[error("layer expects {expected} inputs but the previous layer has {actual} neurons")]
    LayerShapeMismatch { expected: usize, actual: usize },

    #[error("sensory graph has {actual} predecessor lists, expected one per neuron ({expected})")]
    SensoryShapeMismatch { expected: usize, actual: usize },

    #[error("step size must be finite and positive, got {0}")]
    InvalidStepSize(f32),

    #[error("softmax temperature must be finite and positive, got {0}")]
    InvalidTemperature(f32),

    #[error("sparsity level must be in range [0, 1), got {0}")]
    InvalidSparsity(f64),

    #[error("conflicting input dimensions: expected {existing}, got {requested}")]
    ConflictingInputDim { existing: usize, requested: usize },

    #[error("wiring must be built with an input dimension before use")]
    WiringNotBuilt,

    #[error("readout needs at least one action")]
    EmptyActionSet,

    #[error("readout window of {num_actions} neurons starting at {start} exceeds {num_outputs} outputs")]
    ReadoutWindow {
        start: usize,
        num_actions: usize,
        num_outputs: usize,
    },

    #[error("invalid network configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse network configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CtrnnError>;
