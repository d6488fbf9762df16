//! # CTRNN - Graph-Wired Continuous-Time Recurrent Neural Networks
//!
//! Simulation engine for CTRNNs whose connectivity is an explicit predecessor
//! graph and whose parameters arrive as one flat vector, the form black-box
//! optimizers such as evolution strategies work with.
//!
//! ## Features
//!
//! - **Graphs**: append-only predecessor graphs with auto-growth and edge-list import
//! - **Wirings**: all-to-all circuits, full sensor projections, seeded sparse random wirings
//! - **Layers**: input buffers and Euler-integrated CTRNN layers behind one trait
//! - **Nervous systems**: layer pipelines configured from a single flat parameter vector
//! - **Readout**: arg-max action selection over a window of output neurons
//! - **Config**: JSON network descriptions via serde
//!
//! ## Quick Start
//!
//! ```rust
//! use ctrnn::prelude::*;
//!
//! let mut system = NervousSystem::new(&[4]);
//! system.add_layer(CtrnnLayer::fully_connected(6, 4, 0.1).unwrap()).unwrap();
//!
//! // 6 biases, 6 time constants, 6 gains, 6x6 recurrent and 6x4 sensory weights
//! assert_eq!(system.parameter_count(), 18 + 36 + 24);
//!
//! let mut parameters = vec![0.1f32; system.parameter_count()];
//! parameters[6..12].fill(1.0); // time constants
//! system.configure(&parameters).unwrap();
//! system.reset();
//!
//! system.set_input(&[0u8, 255, 128, 64]).unwrap();
//! system.step().unwrap();
//!
//! let actions = ["noop", "left", "right"];
//! let action = Readout::trailing().select(&actions, system.output().view()).unwrap();
//! assert!(actions.contains(action));
//! ```

pub mod activation;
pub mod config;
pub mod error;
pub mod graph;
pub mod layers;
pub mod nervous_system;
pub mod numeric;
pub mod readout;
pub mod wirings;

pub use error::{CtrnnError, Result};
pub use nervous_system::NervousSystem;

pub mod prelude {
    pub use crate::activation::Activation;
    pub use crate::config::NetworkConfig;
    pub use crate::error::{CtrnnError, Result};
    pub use crate::graph::{EdgeTail, NodeId, PredecessorGraph};
    pub use crate::layers::{CtrnnLayer, InputLayer, Layer};
    pub use crate::nervous_system::NervousSystem;
    pub use crate::readout::Readout;
    pub use crate::wirings::{FullyConnected, Random, Wiring};
}
