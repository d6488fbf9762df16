//! Serializable description of a network pipeline.
//!
//! ```rust
//! use ctrnn::config::NetworkConfig;
//!
//! let config = NetworkConfig::from_json_str(r#"{
//!     "input_shape": [1, 4, 4],
//!     "layers": [
//!         { "type": "ctrnn", "num_neurons": 8, "step_size": 0.1 },
//!         { "type": "ctrnn", "num_neurons": 3, "step_size": 0.1,
//!           "topology": { "kind": "random", "sparsity_level": 0.5, "seed": 7 } }
//!     ]
//! }"#).unwrap();
//!
//! let system = config.build().unwrap();
//! assert_eq!(system.output().len(), 3);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::activation::Activation;
use crate::error::{CtrnnError, Result};
use crate::layers::CtrnnLayer;
use crate::nervous_system::NervousSystem;
use crate::wirings::{FullyConnected, Random, Wiring};

/// Whole pipeline: the input shape followed by the processing layers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    /// Shape of the sensor buffer, e.g. `[channels, height, width]`. The
    /// order of channels is whatever the caller's preprocessing produces.
    pub input_shape: Vec<usize>,
    pub layers: Vec<LayerConfig>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerConfig {
    Ctrnn(CtrnnConfig),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CtrnnConfig {
    pub num_neurons: usize,
    pub step_size: f32,
    #[serde(default)]
    pub topology: TopologyConfig,
    #[serde(default)]
    pub activation: Activation,
}

/// Recurrent and sensory connectivity of a CTRNN layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopologyConfig {
    FullyConnected {
        #[serde(default = "default_self_connections")]
        self_connections: bool,
    },
    Random {
        sparsity_level: f64,
        seed: u64,
    },
}

fn default_self_connections() -> bool {
    true
}

impl Default for TopologyConfig {
    fn default() -> Self {
        TopologyConfig::FullyConnected {
            self_connections: true,
        }
    }
}

impl NetworkConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the values serde cannot: non-empty shapes and usable layers.
    pub fn validate(&self) -> Result<()> {
        if self.input_shape.is_empty() || self.input_shape.contains(&0) {
            return Err(CtrnnError::InvalidConfig(format!(
                "input shape must be non-empty with no zero dimension, got {:?}",
                self.input_shape
            )));
        }
        for (index, layer) in self.layers.iter().enumerate() {
            match layer {
                LayerConfig::Ctrnn(ctrnn) => {
                    if ctrnn.num_neurons == 0 {
                        return Err(CtrnnError::InvalidConfig(format!(
                            "layer {} has no neurons",
                            index
                        )));
                    }
                    if !(ctrnn.step_size.is_finite() && ctrnn.step_size > 0.0) {
                        return Err(CtrnnError::InvalidStepSize(ctrnn.step_size));
                    }
                }
            }
        }
        Ok(())
    }

    /// Assembles the described pipeline.
    pub fn build(&self) -> Result<NervousSystem> {
        self.validate()?;

        let mut system = NervousSystem::new(&self.input_shape);
        let mut num_inputs: usize = self.input_shape.iter().product();
        for layer in &self.layers {
            match layer {
                LayerConfig::Ctrnn(ctrnn) => {
                    let built = ctrnn.build(num_inputs)?;
                    num_inputs = ctrnn.num_neurons;
                    system.add_layer(built)?;
                }
            }
        }
        debug!(
            layers = system.num_layers(),
            parameters = system.parameter_count(),
            "built network from config"
        );
        Ok(system)
    }
}

impl CtrnnConfig {
    fn build(&self, num_sensors: usize) -> Result<CtrnnLayer> {
        let mut wiring: Box<dyn Wiring> = match self.topology {
            TopologyConfig::FullyConnected { self_connections } => {
                Box::new(FullyConnected::new(self.num_neurons, self_connections))
            }
            TopologyConfig::Random {
                sparsity_level,
                seed,
            } => Box::new(Random::new(self.num_neurons, sparsity_level, seed)?),
        };
        wiring.build(num_sensors)?;
        Ok(CtrnnLayer::from_wiring(wiring.as_ref(), self.step_size)?.with_activation(self.activation))
    }
}
