//! Squashing functions applied to neuron activity.
//!
//! A CTRNN neuron's readable output is `σ(gain * (state + bias))`. The default
//! σ is the logistic sigmoid; [`Activation::FastSigmoid`] is a rational
//! approximation with the same (0, 1) range that avoids the exponential.

use serde::{Deserialize, Serialize};

use crate::numeric::bound_state;

/// Bounded, monotonic squashing function used for neuron outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// `1 / (1 + e^-x)`
    #[default]
    Logistic,
    /// `0.5 * x / (1 + |x|) + 0.5`
    FastSigmoid,
}

impl Activation {
    /// Applies the activation. The argument is bounded first so that an
    /// infinite or NaN input still maps into the output range.
    #[inline]
    pub fn apply(self, x: f32) -> f32 {
        let x = bound_state(x);
        match self {
            Activation::Logistic => sigmoid(x),
            Activation::FastSigmoid => fast_sigmoid(x),
        }
    }
}

/// Logistic sigmoid.
#[inline]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Rational sigmoid: `scale * x / (curve + |x|) + bias` with scale 0.5,
/// bias 0.5 and curve 1.
#[inline]
pub fn fast_sigmoid(x: f32) -> f32 {
    0.5 * x / (1.0 + x.abs()) + 0.5
}
