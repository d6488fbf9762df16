use rand::prelude::*;

use super::base::{check_rebuild, Wiring};
use crate::error::{CtrnnError, Result};
use crate::graph::{EdgeTail, PredecessorGraph};

/// Random sparsity wiring structure
///
/// Keeps a seeded random subset of the possible synapses. Initial weights
/// encode polarity: about a third are inhibitory (`-1`), the rest
/// excitatory (`+1`). Each predecessor list is ordered by source.
#[derive(Clone, Debug)]
pub struct Random {
    units: usize,
    recurrent: PredecessorGraph,
    sensory: Option<PredecessorGraph>,
    input_dim: Option<usize>,
    sparsity_level: f64,
    random_seed: u64,
}

impl Random {
    pub fn new(units: usize, sparsity_level: f64, random_seed: u64) -> Result<Self> {
        if !(0.0..1.0).contains(&sparsity_level) {
            return Err(CtrnnError::InvalidSparsity(sparsity_level));
        }

        let mut rng = StdRng::seed_from_u64(random_seed);
        let predecessors = sample_synapses(&mut rng, units, units, sparsity_level);

        Ok(Self {
            units,
            recurrent: PredecessorGraph::from_predecessors(predecessors),
            sensory: None,
            input_dim: None,
            sparsity_level,
            random_seed,
        })
    }

    pub fn sparsity_level(&self) -> f64 {
        self.sparsity_level
    }

    pub fn random_seed(&self) -> u64 {
        self.random_seed
    }
}

/// Draws `round(sources * targets * (1 - sparsity))` distinct synapses and
/// returns them as one source-sorted predecessor list per target.
fn sample_synapses(
    rng: &mut StdRng,
    num_sources: usize,
    num_targets: usize,
    sparsity_level: f64,
) -> Vec<Vec<EdgeTail>> {
    let total_possible = num_sources * num_targets;
    let num_synapses = (total_possible as f64 * (1.0 - sparsity_level)).round() as usize;

    let mut all_synapses: Vec<(usize, usize)> = Vec::with_capacity(total_possible);
    for src in 0..num_sources {
        for dest in 0..num_targets {
            all_synapses.push((src, dest));
        }
    }

    let selected: Vec<_> = all_synapses
        .choose_multiple(rng, num_synapses)
        .cloned()
        .collect();

    let mut predecessors = vec![Vec::new(); num_targets];
    for (src, dest) in selected {
        let polarity: f32 = if rng.gen::<f64>() < 0.33 { -1.0 } else { 1.0 };
        predecessors[dest].push(EdgeTail::new(src, polarity));
    }
    for edges in predecessors.iter_mut() {
        edges.sort_by_key(|edge: &EdgeTail| edge.source);
    }
    predecessors
}

impl Wiring for Random {
    fn units(&self) -> usize {
        self.units
    }

    fn input_dim(&self) -> Option<usize> {
        self.input_dim
    }

    fn build(&mut self, input_dim: usize) -> Result<()> {
        if check_rebuild(self.input_dim, input_dim)? {
            // Offset the seed so sensory draws differ from the recurrent ones.
            let mut rng = StdRng::seed_from_u64(self.random_seed.wrapping_add(1));
            let predecessors = sample_synapses(&mut rng, input_dim, self.units, self.sparsity_level);
            self.input_dim = Some(input_dim);
            self.sensory = Some(PredecessorGraph::from_predecessors(predecessors));
        }
        Ok(())
    }

    fn recurrent_graph(&self) -> &PredecessorGraph {
        &self.recurrent
    }

    fn sensory_graph(&self) -> Option<&PredecessorGraph> {
        self.sensory.as_ref()
    }
}
