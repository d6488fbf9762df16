//! Continuous-Time Recurrent Neural Network layer
//!
//! Each neuron `i` integrates
//!
//! ```text
//! dy_i/dt = (1/tau_i) * ( -y_i + sum_j w_ij * o_j + sum_k u_ik * s_k )
//! o_j     = act(g_j * (y_j + b_j))
//! ```
//!
//! with one explicit Euler step of size `h` per [`Layer::step`]. `w_ij` comes
//! from the recurrent graph, `u_ik` from the sensory graph and `s_k` is the
//! previous layer's output.

use ndarray::{s, Array1, ArrayView1};
use tracing::{debug, trace};

use super::Layer;
use crate::activation::Activation;
use crate::error::{CtrnnError, Result};
use crate::graph::{PredecessorGraph, DEFAULT_WEIGHT};
use crate::numeric::bound_state;
use crate::wirings::{all_to_all, full_sensor_projection, refill_weights, Wiring};

/// State every neuron returns to on reset.
pub const RESET_STATE: f32 = 0.0;

/// CTRNN layer driven by explicit recurrent and sensory graphs.
///
/// # Parameter layout
///
/// [`Layer::configure`] consumes, in order: `N` biases, `N` time constants,
/// `N` gains, one weight per recurrent edge, one weight per sensory edge.
/// Edge weights follow predecessor order, which for the fully connected
/// topologies is row-major with the target neuron as row.
#[derive(Debug, Clone)]
pub struct CtrnnLayer {
    recurrent: PredecessorGraph,
    sensory: PredecessorGraph,
    num_sensors: usize,
    step_size: f32,
    activation: Activation,
    biases: Array1<f32>,
    gains: Array1<f32>,
    /// Reciprocal time constants
    rtaus: Array1<f32>,
    states: Array1<f32>,
    outputs: Array1<f32>,
    /// Scratch buffer for the derivative of every neuron
    derivatives: Array1<f32>,
    parameter_count: usize,
}

impl CtrnnLayer {
    /// Creates a layer whose neuron count is `recurrent.num_nodes()`.
    ///
    /// The sensory graph must have one predecessor list per neuron and every
    /// sensory source must index one of the `num_sensors` inputs.
    pub fn new(
        recurrent: PredecessorGraph,
        sensory: PredecessorGraph,
        num_sensors: usize,
        step_size: f32,
    ) -> Result<Self> {
        if !(step_size.is_finite() && step_size > 0.0) {
            return Err(CtrnnError::InvalidStepSize(step_size));
        }

        let num_neurons = recurrent.num_nodes();
        if sensory.num_nodes() != num_neurons {
            return Err(CtrnnError::SensoryShapeMismatch {
                expected: num_neurons,
                actual: sensory.num_nodes(),
            });
        }
        if let Some(source) = recurrent.max_source().filter(|&s| s >= num_neurons) {
            return Err(CtrnnError::NodeOutOfRange {
                node: source,
                num_nodes: num_neurons,
            });
        }
        if let Some(source) = sensory.max_source().filter(|&s| s >= num_sensors) {
            return Err(CtrnnError::SensorOutOfRange {
                sensor: source,
                num_sensors,
            });
        }

        let parameter_count = 3 * num_neurons + recurrent.num_edges() + sensory.num_edges();
        debug!(
            num_neurons,
            num_sensors,
            recurrent_edges = recurrent.num_edges(),
            sensory_edges = sensory.num_edges(),
            parameter_count,
            "created ctrnn layer"
        );

        let activation = Activation::default();
        let mut layer = Self {
            recurrent,
            sensory,
            num_sensors,
            step_size,
            activation,
            biases: Array1::zeros(num_neurons),
            gains: Array1::ones(num_neurons),
            rtaus: Array1::ones(num_neurons),
            states: Array1::from_elem(num_neurons, RESET_STATE),
            outputs: Array1::zeros(num_neurons),
            derivatives: Array1::zeros(num_neurons),
            parameter_count,
        };
        layer.refresh_outputs();
        Ok(layer)
    }

    /// All-to-all recurrent circuit with a full sensor projection.
    pub fn fully_connected(num_neurons: usize, num_sensors: usize, step_size: f32) -> Result<Self> {
        Self::new(
            all_to_all(num_neurons, DEFAULT_WEIGHT),
            full_sensor_projection(num_sensors, num_neurons, DEFAULT_WEIGHT),
            num_sensors,
            step_size,
        )
    }

    /// Copies the graphs of a built wiring.
    pub fn from_wiring(wiring: &dyn Wiring, step_size: f32) -> Result<Self> {
        let (Some(num_sensors), Some(sensory)) = (wiring.input_dim(), wiring.sensory_graph())
        else {
            return Err(CtrnnError::WiringNotBuilt);
        };
        Self::new(wiring.recurrent_graph().clone(), sensory.clone(), num_sensors, step_size)
    }

    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self.refresh_outputs();
        self
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn step_size(&self) -> f32 {
        self.step_size
    }

    pub fn num_sensors(&self) -> usize {
        self.num_sensors
    }

    pub fn recurrent_graph(&self) -> &PredecessorGraph {
        &self.recurrent
    }

    pub fn sensory_graph(&self) -> &PredecessorGraph {
        &self.sensory
    }

    pub fn biases(&self) -> &Array1<f32> {
        &self.biases
    }

    pub fn gains(&self) -> &Array1<f32> {
        &self.gains
    }

    pub fn reciprocal_time_constants(&self) -> &Array1<f32> {
        &self.rtaus
    }

    /// Raw integrator states `y`, as opposed to the squashed [`Layer::output`].
    pub fn states(&self) -> &Array1<f32> {
        &self.states
    }

    fn refresh_outputs(&mut self) {
        for i in 0..self.outputs.len() {
            self.outputs[i] = self
                .activation
                .apply(self.gains[i] * (self.states[i] + self.biases[i]));
        }
    }
}

impl Layer for CtrnnLayer {
    fn kind(&self) -> &'static str {
        "ctrnn"
    }

    fn num_neurons(&self) -> usize {
        self.states.len()
    }

    fn input_size(&self) -> usize {
        self.num_sensors
    }

    fn parameter_count(&self) -> usize {
        self.parameter_count
    }

    fn configure(&mut self, parameters: ArrayView1<'_, f32>) -> Result<()> {
        if parameters.len() != self.parameter_count {
            return Err(CtrnnError::ParameterCountMismatch {
                expected: self.parameter_count,
                actual: parameters.len(),
            });
        }

        let n = self.num_neurons();
        let mut offset = 0;
        let mut next = |count: usize| {
            let slice = parameters.slice_move(s![offset..offset + count]);
            offset += count;
            slice
        };

        let biases = next(n);
        let taus = next(n);
        let gains = next(n);
        let recurrent_weights = next(self.recurrent.num_edges());
        let sensory_weights = next(self.sensory.num_edges());

        // Lengths were checked above, so the refills cannot fail part way.
        refill_weights(&mut self.recurrent, recurrent_weights)?;
        refill_weights(&mut self.sensory, sensory_weights)?;
        self.biases.assign(&biases);
        self.gains.assign(&gains);
        self.rtaus.zip_mut_with(&taus, |rtau, &tau| *rtau = 1.0 / tau);

        self.refresh_outputs();
        Ok(())
    }

    fn step(&mut self, previous: ArrayView1<'_, f32>) -> Result<()> {
        if previous.len() != self.num_sensors {
            return Err(CtrnnError::InputSizeMismatch {
                expected: self.num_sensors,
                actual: previous.len(),
            });
        }

        for i in 0..self.states.len() {
            let mut input = -self.states[i];
            for edge in self.recurrent.predecessors(i)? {
                input += edge.weight * self.outputs[edge.source];
            }
            for edge in self.sensory.predecessors(i)? {
                input += edge.weight * previous[edge.source];
            }
            self.derivatives[i] = input;
        }

        let mut clamped = 0usize;
        for i in 0..self.states.len() {
            let next = self.states[i] + self.step_size * self.rtaus[i] * self.derivatives[i];
            if !next.is_finite() {
                clamped += 1;
            }
            self.states[i] = bound_state(next);
        }
        self.refresh_outputs();

        if clamped > 0 {
            debug!(clamped, "ctrnn states clamped to representable range");
        }
        trace!(num_neurons = self.states.len(), "ctrnn step");
        Ok(())
    }

    fn reset(&mut self) {
        self.states.fill(RESET_STATE);
        self.refresh_outputs();
    }

    fn output(&self) -> &Array1<f32> {
        &self.outputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::arr1;

    fn single_neuron() -> CtrnnLayer {
        let mut layer = CtrnnLayer::fully_connected(1, 1, 1.0).unwrap();
        // bias, tau, gain, self weight, sensor weight
        layer.configure(arr1(&[0.0, 1.0, 1.0, 0.0, 1.0]).view()).unwrap();
        layer
    }

    #[test]
    fn test_parameter_count() {
        let layer = CtrnnLayer::fully_connected(4, 3, 0.1).unwrap();
        assert_eq!(layer.parameter_count(), 3 * 4 + 4 * 4 + 4 * 3);
        assert_eq!(layer.num_neurons(), 4);
        assert_eq!(layer.input_size(), 3);
    }

    #[test]
    fn test_single_euler_step() {
        let mut layer = single_neuron();
        layer.step(arr1(&[1.0]).view()).unwrap();

        assert_abs_diff_eq!(layer.states()[0], 1.0);
        assert_abs_diff_eq!(layer.output()[0], 0.731_058_6, epsilon = 1e-6);
    }

    #[test]
    fn test_configure_layout() {
        let mut layer = CtrnnLayer::fully_connected(2, 1, 0.5).unwrap();
        let params: Vec<f32> = (1..=12).map(|x| x as f32).collect();
        layer.configure(ArrayView1::from(&params)).unwrap();

        assert_eq!(layer.biases().to_vec(), vec![1.0, 2.0]);
        assert_eq!(layer.reciprocal_time_constants().to_vec(), vec![1.0 / 3.0, 1.0 / 4.0]);
        assert_eq!(layer.gains().to_vec(), vec![5.0, 6.0]);
        assert_eq!(layer.recurrent_graph().weights().collect::<Vec<_>>(), vec![7.0, 8.0, 9.0, 10.0]);
        assert_eq!(layer.sensory_graph().weights().collect::<Vec<_>>(), vec![11.0, 12.0]);
    }

    #[test]
    fn test_configure_wrong_length_leaves_parameters() {
        let mut layer = single_neuron();
        let before = layer.clone();
        assert!(layer.configure(arr1(&[5.0, 5.0, 5.0, 5.0]).view()).is_err());

        assert_eq!(layer.biases(), before.biases());
        assert_eq!(layer.gains(), before.gains());
        assert_eq!(layer.recurrent_graph(), before.recurrent_graph());
        assert_eq!(layer.sensory_graph(), before.sensory_graph());
    }

    #[test]
    fn test_step_rejects_wrong_input_size() {
        let mut layer = single_neuron();
        assert!(matches!(
            layer.step(arr1(&[1.0, 2.0]).view()),
            Err(CtrnnError::InputSizeMismatch { expected: 1, actual: 2 })
        ));
    }

    #[test]
    fn test_runaway_parameters_are_clamped() {
        let mut layer = CtrnnLayer::fully_connected(2, 1, 1.0).unwrap();
        let mut params = vec![0.0f32; layer.parameter_count()];
        // tau = 0 makes 1/tau infinite
        params[2] = 0.0;
        params[3] = 0.0;
        params[4] = 1.0;
        params[5] = 1.0;
        for weight in params[6..].iter_mut() {
            *weight = f32::MAX;
        }
        layer.configure(ArrayView1::from(&params)).unwrap();

        for _ in 0..5 {
            layer.step(arr1(&[f32::MAX]).view()).unwrap();
            assert!(layer.states().iter().all(|x| !x.is_nan()));
            assert!(layer.output().iter().all(|x| x.is_finite()));
        }
    }

    #[test]
    fn test_invalid_construction() {
        assert!(matches!(
            CtrnnLayer::fully_connected(2, 2, 0.0),
            Err(CtrnnError::InvalidStepSize(_))
        ));
        assert!(matches!(
            CtrnnLayer::new(all_to_all(3, 1.0), full_sensor_projection(2, 2, 1.0), 2, 0.1),
            Err(CtrnnError::SensoryShapeMismatch { expected: 3, actual: 2 })
        ));
        assert!(matches!(
            CtrnnLayer::new(all_to_all(2, 1.0), full_sensor_projection(4, 2, 1.0), 3, 0.1),
            Err(CtrnnError::SensorOutOfRange { sensor: 3, num_sensors: 3 })
        ));
    }
}
