//! # Readout
//!
//! Maps a window of output neurons to a discrete action by arg-max.
//!
//! By convention the window is the last `K` outputs read in reverse, so the
//! first legal action is decided by the very last neuron:
//!
//! ```text
//! outputs:  [ o0  o1  ...  oN-3  oN-2  oN-1 ]
//! actions:                  a2    a1    a0
//! ```

use ndarray::{s, Array1, ArrayView1};

use crate::error::{CtrnnError, Result};
use crate::numeric::{index_of_max, softmax_in_place};

/// Arg-max selection over a contiguous window of neuron outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readout {
    /// First neuron of the window; `None` anchors the window at the end.
    start: Option<usize>,
    reversed: bool,
}

impl Default for Readout {
    fn default() -> Self {
        Self::trailing()
    }
}

impl Readout {
    /// Window of the last `K` neurons, action 0 mapped to the last neuron.
    pub fn trailing() -> Self {
        Self {
            start: None,
            reversed: true,
        }
    }

    /// Window starting at neuron `start`, action 0 mapped to `start`.
    pub fn starting_at(start: usize) -> Self {
        Self {
            start: Some(start),
            reversed: false,
        }
    }

    pub fn reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Output neuron deciding action `action_index` out of `num_actions`.
    pub fn neuron_for(
        &self,
        action_index: usize,
        num_actions: usize,
        num_outputs: usize,
    ) -> Result<usize> {
        let start = self.window_start(num_actions, num_outputs)?;
        if action_index >= num_actions {
            return Err(CtrnnError::NeuronOutOfRange {
                index: action_index,
                num_neurons: num_actions,
            });
        }
        Ok(if self.reversed {
            start + num_actions - 1 - action_index
        } else {
            start + action_index
        })
    }

    /// Index of the action whose neuron output is strictly greatest. Ties go
    /// to the action iterated first.
    pub fn select_index(&self, num_actions: usize, outputs: ArrayView1<'_, f32>) -> Result<usize> {
        let values = self.window_values(num_actions, outputs)?;
        index_of_max(ArrayView1::from(&values)).ok_or(CtrnnError::EmptyActionSet)
    }

    /// The preferred action out of `actions`.
    pub fn select<'a, A>(&self, actions: &'a [A], outputs: ArrayView1<'_, f32>) -> Result<&'a A> {
        let index = self.select_index(actions.len(), outputs)?;
        Ok(&actions[index])
    }

    /// Softmax over the window, in action order. `temperature` must be finite
    /// and positive.
    pub fn probabilities(
        &self,
        num_actions: usize,
        outputs: ArrayView1<'_, f32>,
        temperature: f32,
    ) -> Result<Array1<f32>> {
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(CtrnnError::InvalidTemperature(temperature));
        }
        let mut values = self.window_values(num_actions, outputs)?;
        softmax_in_place(&mut values, temperature);
        Ok(Array1::from(values))
    }

    /// Window outputs in action order.
    fn window_values(&self, num_actions: usize, outputs: ArrayView1<'_, f32>) -> Result<Vec<f32>> {
        let start = self.window_start(num_actions, outputs.len())?;
        let window = outputs.slice(s![start..start + num_actions]);
        Ok(if self.reversed {
            window.iter().rev().copied().collect()
        } else {
            window.to_vec()
        })
    }

    fn window_start(&self, num_actions: usize, num_outputs: usize) -> Result<usize> {
        if num_actions == 0 {
            return Err(CtrnnError::EmptyActionSet);
        }
        let out_of_range = CtrnnError::ReadoutWindow {
            start: self.start.unwrap_or(0),
            num_actions,
            num_outputs,
        };
        match self.start {
            Some(start)
                if start
                    .checked_add(num_actions)
                    .is_some_and(|end| end <= num_outputs) =>
            {
                Ok(start)
            }
            None if num_actions <= num_outputs => Ok(num_outputs - num_actions),
            _ => Err(out_of_range),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_trailing_maps_first_action_to_last_neuron() {
        let readout = Readout::trailing();
        assert_eq!(readout.neuron_for(0, 3, 10).unwrap(), 9);
        assert_eq!(readout.neuron_for(2, 3, 10).unwrap(), 7);
    }

    #[test]
    fn test_select_picks_maximum() {
        let outputs = arr1(&[0.9, 0.1, 0.7, 0.2]);
        let actions = ["noop", "fire", "left"];
        // noop <- 0.2, fire <- 0.7, left <- 0.1
        assert_eq!(*Readout::trailing().select(&actions, outputs.view()).unwrap(), "fire");
    }

    #[test]
    fn test_window_must_fit() {
        let outputs = arr1(&[0.0, 1.0]);
        assert!(matches!(
            Readout::trailing().select_index(3, outputs.view()),
            Err(CtrnnError::ReadoutWindow { .. })
        ));
        assert!(Readout::starting_at(1).select_index(2, outputs.view()).is_err());
        assert!(matches!(
            Readout::trailing().select_index(0, outputs.view()),
            Err(CtrnnError::EmptyActionSet)
        ));
    }
}
