//! Basic usage of a CTRNN nervous system
//!
//! Builds a two-layer network from a JSON description, fills it with a random
//! parameter vector the way an evolutionary search would, runs one short
//! episode and reads a discrete action out at every step.

use ctrnn::config::NetworkConfig;
use ctrnn::readout::Readout;
use ctrnn::{NervousSystem, Result};
use rand::prelude::*;

const CONFIG: &str = r#"{
    "input_shape": [4],
    "layers": [
        {
            "type": "ctrnn",
            "num_neurons": 12,
            "step_size": 0.1,
            "topology": { "kind": "random", "sparsity_level": 0.5, "seed": 7 }
        },
        {
            "type": "ctrnn",
            "num_neurons": 3,
            "step_size": 0.1,
            "activation": "fast_sigmoid"
        }
    ]
}"#;

#[derive(Debug, Clone, Copy)]
enum Action {
    Left,
    Stay,
    Right,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== CTRNN Basic Example ===\n");

    let config = NetworkConfig::from_json_str(CONFIG)?;
    let mut system = NervousSystem::from_config(&config)?;
    println!("Layers (input included): {}", system.num_layers());
    println!("Parameters:              {}", system.parameter_count());
    println!();

    let mut rng = StdRng::seed_from_u64(2024);
    let parameters: Vec<f32> = (0..system.parameter_count())
        .map(|_| rng.gen_range(0.2..2.0))
        .collect();
    system.configure(&parameters)?;
    system.reset();

    let readout = Readout::default();
    let actions = [Action::Left, Action::Stay, Action::Right];

    for t in 0..10 {
        let phase = t as f32 * 0.5;
        system.set_input(&[phase.sin(), phase.cos(), 1.0, 0.0])?;
        system.step()?;

        let action = readout.select(&actions, system.output().view())?;
        let probabilities = readout.probabilities(actions.len(), system.output().view(), 0.1)?;
        println!("t={t:2}  action={action:?}  probabilities={probabilities:.3}");
    }

    Ok(())
}
