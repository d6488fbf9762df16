//! # Layers
//!
//! A layer is one stage of a [`NervousSystem`](crate::NervousSystem)
//! pipeline. It reads the previous stage's output by reference, advances its
//! own state by one discrete step, and exposes its output to the next stage.
//!
//! | Layer | Parameters | Dynamics |
//! |-------|------------|----------|
//! | [`InputLayer`] | none | holds externally pushed sensor values |
//! | [`CtrnnLayer`] | biases, time constants, gains, edge weights | Euler-integrated CTRNN |
//!
//! ## Lifecycle
//!
//! ```text
//! new -> configure -> step* -> reset -> configure | step* ...
//! ```
//!
//! `configure` can be called any number of times; `reset` returns the dynamic
//! state to its fixed initial condition without touching parameters.

use std::fmt;

use ndarray::{Array1, ArrayView1};

use crate::error::Result;

mod ctrnn;
mod input;

pub use ctrnn::CtrnnLayer;
pub use input::InputLayer;

/// One processing stage of a pipeline.
pub trait Layer: Send + fmt::Debug {
    /// Short name used in logs.
    fn kind(&self) -> &'static str;

    /// Number of neurons, i.e. the length of [`Layer::output`].
    fn num_neurons(&self) -> usize;

    /// Length of the previous layer's output this layer consumes.
    fn input_size(&self) -> usize;

    /// Number of reals [`Layer::configure`] expects. Fixed at construction.
    fn parameter_count(&self) -> usize;

    /// Binds parameters from `parameters`, which must hold exactly
    /// [`Layer::parameter_count`] values. Nothing is written on error.
    fn configure(&mut self, parameters: ArrayView1<'_, f32>) -> Result<()>;

    /// Advances the layer by one step given the previous layer's output.
    fn step(&mut self, previous: ArrayView1<'_, f32>) -> Result<()>;

    /// Returns dynamic state to the fixed initial condition.
    fn reset(&mut self);

    /// Current output. Only valid until the next `step`, `configure` or
    /// `reset`.
    fn output(&self) -> &Array1<f32>;
}
