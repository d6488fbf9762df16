use ndarray::{Array1, ArrayView1};

use super::Layer;
use crate::error::{CtrnnError, Result};

/// First stage of every pipeline: a buffer of sensor values set from outside.
///
/// The shape is kept for callers that lay sensors out as e.g.
/// `[channels, height, width]`; internally the values are flat.
#[derive(Debug, Clone)]
pub struct InputLayer {
    shape: Vec<usize>,
    states: Array1<f32>,
}

impl InputLayer {
    pub fn new(shape: &[usize]) -> Self {
        let num_neurons: usize = shape.iter().product();
        Self {
            shape: shape.to_vec(),
            states: Array1::zeros(num_neurons),
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Sets one sensor value.
    pub fn set_neuron_state(&mut self, index: usize, value: f32) -> Result<()> {
        let num_neurons = self.states.len();
        let state = self
            .states
            .get_mut(index)
            .ok_or(CtrnnError::NeuronOutOfRange { index, num_neurons })?;
        *state = value;
        Ok(())
    }

    /// Replaces every sensor value. `values` must match the layer size.
    pub fn set_states<T: Copy + Into<f32>>(&mut self, values: &[T]) -> Result<()> {
        if values.len() != self.states.len() {
            return Err(CtrnnError::InputSizeMismatch {
                expected: self.states.len(),
                actual: values.len(),
            });
        }
        for (state, &value) in self.states.iter_mut().zip(values) {
            *state = value.into();
        }
        Ok(())
    }
}

impl Layer for InputLayer {
    fn kind(&self) -> &'static str {
        "input"
    }

    fn num_neurons(&self) -> usize {
        self.states.len()
    }

    fn input_size(&self) -> usize {
        0
    }

    fn parameter_count(&self) -> usize {
        0
    }

    fn configure(&mut self, parameters: ArrayView1<'_, f32>) -> Result<()> {
        if !parameters.is_empty() {
            return Err(CtrnnError::ParameterCountMismatch {
                expected: 0,
                actual: parameters.len(),
            });
        }
        Ok(())
    }

    fn step(&mut self, _previous: ArrayView1<'_, f32>) -> Result<()> {
        Ok(())
    }

    fn reset(&mut self) {
        self.states.fill(0.0);
    }

    fn output(&self) -> &Array1<f32> {
        &self.states
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_layer_size_is_shape_product() {
        let layer = InputLayer::new(&[4, 10, 10]);
        assert_eq!(layer.num_neurons(), 400);
        assert_eq!(layer.parameter_count(), 0);
        assert_eq!(layer.shape(), &[4, 10, 10]);
    }

    #[test]
    fn test_set_neuron_state_bounds() {
        let mut layer = InputLayer::new(&[3]);
        layer.set_neuron_state(2, 0.25).unwrap();
        assert_eq!(layer.output()[2], 0.25);

        assert!(matches!(
            layer.set_neuron_state(3, 1.0),
            Err(CtrnnError::NeuronOutOfRange { index: 3, num_neurons: 3 })
        ));
    }

    #[test]
    fn test_set_states_casts_pixels() {
        let mut layer = InputLayer::new(&[2, 2]);
        layer.set_states(&[0u8, 64, 128, 255]).unwrap();
        assert_eq!(layer.output().to_vec(), vec![0.0, 64.0, 128.0, 255.0]);
        assert!(layer.set_states(&[1.0f32; 3]).is_err());
    }

    #[test]
    fn test_reset_clears_sensors() {
        let mut layer = InputLayer::new(&[2]);
        layer.set_states(&[1.0f32, 2.0]).unwrap();
        layer.reset();
        assert!(layer.output().iter().all(|&x| x == 0.0));
    }
}
