//! # Nervous System
//!
//! An owned pipeline of layers. The first stage is always an [`InputLayer`];
//! every further stage reads the output of the stage right before it.
//!
//! ```rust
//! use ctrnn::layers::CtrnnLayer;
//! use ctrnn::NervousSystem;
//!
//! let mut system = NervousSystem::new(&[3]);
//! system.add_layer(CtrnnLayer::fully_connected(4, 3, 0.1).unwrap()).unwrap();
//! system.add_layer(CtrnnLayer::fully_connected(2, 4, 0.1).unwrap()).unwrap();
//!
//! let parameters = vec![0.5f32; system.parameter_count()];
//! system.configure(&parameters).unwrap();
//! system.reset();
//!
//! system.set_input(&[1.0f32, 0.0, -1.0]).unwrap();
//! system.step().unwrap();
//! assert_eq!(system.output().len(), 2);
//! ```

use ndarray::{s, Array1, ArrayView1};
use tracing::{debug, trace};

use crate::config::NetworkConfig;
use crate::error::{CtrnnError, Result};
use crate::layers::{InputLayer, Layer};

/// Layered network exposing a single flat parameter vector.
#[derive(Debug)]
pub struct NervousSystem {
    input: InputLayer,
    layers: Vec<Box<dyn Layer>>,
    parameter_count: usize,
}

impl NervousSystem {
    /// Creates a pipeline holding only an input layer of the given shape.
    pub fn new(input_shape: &[usize]) -> Self {
        Self {
            input: InputLayer::new(input_shape),
            layers: Vec::new(),
            parameter_count: 0,
        }
    }

    /// Builds the pipeline described by `config`.
    pub fn from_config(config: &NetworkConfig) -> Result<Self> {
        config.build()
    }

    /// Appends a layer, taking ownership of it.
    pub fn add_layer(&mut self, layer: impl Layer + 'static) -> Result<()> {
        self.add_boxed_layer(Box::new(layer))
    }

    /// Appends a boxed layer. Its input size must equal the neuron count of
    /// the current last layer.
    pub fn add_boxed_layer(&mut self, layer: Box<dyn Layer>) -> Result<()> {
        let available = self.last_layer().num_neurons();
        if layer.input_size() != available {
            return Err(CtrnnError::LayerShapeMismatch {
                expected: layer.input_size(),
                actual: available,
            });
        }

        self.parameter_count += layer.parameter_count();
        debug!(
            index = self.layers.len() + 1,
            kind = layer.kind(),
            num_neurons = layer.num_neurons(),
            layer_parameters = layer.parameter_count(),
            total_parameters = self.parameter_count,
            "added layer"
        );
        self.layers.push(layer);
        Ok(())
    }

    /// Total number of reals [`NervousSystem::configure`] expects.
    pub fn parameter_count(&self) -> usize {
        self.parameter_count
    }

    /// Splits `parameters` across the layers in pipeline order.
    ///
    /// The vector must hold exactly [`NervousSystem::parameter_count`]
    /// values; on a length mismatch no layer is touched.
    pub fn configure<'a>(&mut self, parameters: impl Into<ArrayView1<'a, f32>>) -> Result<()> {
        let parameters = parameters.into();
        if parameters.len() != self.parameter_count {
            return Err(CtrnnError::ParameterCountMismatch {
                expected: self.parameter_count,
                actual: parameters.len(),
            });
        }

        let mut slice_start = 0;
        for layer in self.layers.iter_mut() {
            let count = layer.parameter_count();
            layer.configure(parameters.slice(s![slice_start..slice_start + count]))?;
            slice_start += count;
        }
        debug!(parameters = parameters.len(), layers = self.layers.len(), "configured");
        Ok(())
    }

    /// Sets every sensor value of the input layer.
    pub fn set_input<T: Copy + Into<f32>>(&mut self, inputs: &[T]) -> Result<()> {
        self.input.set_states(inputs)
    }

    /// Sets a single sensor value of the input layer.
    pub fn set_sensor(&mut self, index: usize, value: f32) -> Result<()> {
        self.input.set_neuron_state(index, value)
    }

    /// Propagates activity one step forward through every layer, in order.
    pub fn step(&mut self) -> Result<()> {
        for index in 0..self.layers.len() {
            let (done, rest) = self.layers.split_at_mut(index);
            let previous = match done.last() {
                Some(layer) => layer.output(),
                None => self.input.output(),
            };
            rest[0].step(previous.view())?;
        }
        trace!(layers = self.layers.len(), "stepped");
        Ok(())
    }

    /// Resets every layer's dynamic state, keeping parameters.
    pub fn reset(&mut self) {
        self.input.reset();
        for layer in self.layers.iter_mut() {
            layer.reset();
        }
    }

    /// Output of the last layer. Valid until the next `step`, `configure` or
    /// `reset`.
    pub fn output(&self) -> &Array1<f32> {
        self.last_layer().output()
    }

    /// Number of layers, the input layer included.
    pub fn num_layers(&self) -> usize {
        self.layers.len() + 1
    }

    /// Layer at `index`, where index 0 is the input layer.
    pub fn layer(&self, index: usize) -> Option<&dyn Layer> {
        match index {
            0 => Some(&self.input as &dyn Layer),
            _ => self.layers.get(index - 1).map(|layer| layer.as_ref()),
        }
    }

    pub fn input_layer(&self) -> &InputLayer {
        &self.input
    }

    fn last_layer(&self) -> &dyn Layer {
        match self.layers.last() {
            Some(layer) => layer.as_ref(),
            None => &self.input,
        }
    }
}
