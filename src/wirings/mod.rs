//! # Wirings
//!
//! Topology constructors for CTRNN layers. The free functions build single
//! graphs ([`all_to_all`], [`full_sensor_projection`]) and re-parameterize
//! them in place ([`refill_weights`]). The [`Wiring`] implementations bundle
//! a recurrent graph with the sensory graph built for a given input size.
//!
//! ```rust
//! use ctrnn::wirings::{FullyConnected, Wiring};
//!
//! let mut wiring = FullyConnected::new(8, true);
//! wiring.build(3).unwrap();
//!
//! assert_eq!(wiring.synapse_count(), 64);
//! assert_eq!(wiring.sensory_synapse_count(), 24);
//! ```

mod base;
mod builders;
mod random;

pub use base::{FullyConnected, Wiring};
pub use builders::{
    all_to_all, all_to_all_from_weights, full_sensor_projection,
    full_sensor_projection_from_weights, refill_weights,
};
pub use random::Random;
